//! URL scheme allow-listing.
//!
//! This is the only security-relevant boundary in the engine: every URL that
//! reaches an `href` or `src` attribute must have passed through
//! [`sanitize_url`]. The check fails closed: anything not recognizably safe
//! is replaced with `#`.

const SAFE_PROTOCOLS: [&str; 5] = ["http://", "https://", "mailto:", "ftp://", "ftps://"];

/// Return `url` unchanged when it carries an allow-listed scheme or looks
/// relative, otherwise `#`.
///
/// Relative means: starts with `/`, `#`, `?` or `.`, or contains neither `:`
/// nor `//`. Script-executing pseudo-protocols (`javascript:`, `data:`,
/// `vbscript:`, ...) all carry a `:` and fail every branch.
///
/// Idempotent: a sanitized URL sanitizes to itself (`#` is relative).
pub fn sanitize_url(url: &str) -> &str {
    let trimmed = url.trim();
    let lower = trimmed.to_lowercase();

    let has_safe_protocol = SAFE_PROTOCOLS.iter().any(|p| lower.starts_with(p));
    let is_relative = trimmed.starts_with('/')
        || trimmed.starts_with('#')
        || trimmed.starts_with('?')
        || trimmed.starts_with('.')
        || (!trimmed.contains(':') && !trimmed.contains("//"));

    if has_safe_protocol || is_relative { url } else { "#" }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("https://example.com/page", true)]
    #[case("http://example.com", true)]
    #[case("mailto:a@b.c", true)]
    #[case("ftp://files.example.com", true)]
    #[case("ftps://files.example.com", true)]
    #[case("/absolute/path", true)]
    #[case("#fragment", true)]
    #[case("?query=1", true)]
    #[case("./relative.md", true)]
    #[case("plain-name", true)]
    #[case("docs/readme.md", true)]
    fn allows_safe_urls(#[case] url: &str, #[case] _ok: bool) {
        assert_eq!(sanitize_url(url), url);
    }

    #[rstest]
    #[case("javascript:alert(1)")]
    #[case("JAVASCRIPT:alert(1)")]
    #[case("data:text/html;base64,PHNjcmlwdD4=")]
    #[case("vbscript:msgbox")]
    #[case("  javascript:alert(1)")]
    fn blocks_script_schemes(#[case] url: &str) {
        assert_eq!(sanitize_url(url), "#");
    }

    #[rstest]
    #[case("https://example.com")]
    #[case("javascript:alert(1)")]
    #[case("weird://thing")]
    #[case("#")]
    fn sanitization_is_idempotent(#[case] url: &str) {
        let once = sanitize_url(url).to_string();
        assert_eq!(sanitize_url(&once), once);
    }
}
