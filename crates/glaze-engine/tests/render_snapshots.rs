//! Exact-output snapshots for the rendered HTML shapes, one per construct.

use glaze_engine::parse;

#[test]
fn snapshot_header() {
    insta::assert_snapshot!(
        parse("# Hi"),
        @r#"<div><h1><span class="syntax-marker"># </span>Hi</h1></div>"#
    );
}

#[test]
fn snapshot_bullet_list() {
    insta::assert_snapshot!(
        parse("- item"),
        @r#"<ul><li class="bullet-list"><span class="syntax-marker">- </span>item</li></ul>"#
    );
}

#[test]
fn snapshot_numbered_list() {
    insta::assert_snapshot!(
        parse("1. one"),
        @r#"<ol><li class="ordered-list"><span class="syntax-marker">1. </span>one</li></ol>"#
    );
}

#[test]
fn snapshot_checkbox() {
    insta::assert_snapshot!(
        parse("- [ ] todo"),
        @r#"<ul><li class="bullet-list"><span class="syntax-marker">- </span><span class="checkbox">[ ]</span> todo</li></ul>"#
    );
}

#[test]
fn snapshot_blockquote() {
    insta::assert_snapshot!(
        parse("> note"),
        @r#"<div><span class="blockquote"><span class="syntax-marker">&gt;</span> note</span></div>"#
    );
}

#[test]
fn snapshot_horizontal_rule() {
    insta::assert_snapshot!(
        parse("---"),
        @r#"<div><span class="hr-marker">---</span></div>"#
    );
}

#[test]
fn snapshot_bold() {
    insta::assert_snapshot!(
        parse("**bold** text"),
        @r#"<div><strong><span class="syntax-marker">**</span>bold<span class="syntax-marker">**</span></strong> text</div>"#
    );
}

#[test]
fn snapshot_italic() {
    insta::assert_snapshot!(
        parse("*lean* text"),
        @r#"<div><em><span class="syntax-marker">*</span>lean<span class="syntax-marker">*</span></em> text</div>"#
    );
}

#[test]
fn snapshot_strikethrough() {
    insta::assert_snapshot!(
        parse("~~gone~~"),
        @r#"<div><del><span class="syntax-marker">~~</span>gone<span class="syntax-marker">~~</span></del></div>"#
    );
}

#[test]
fn snapshot_code_span() {
    insta::assert_snapshot!(
        parse("`code`"),
        @r#"<div><code><span class="syntax-marker">`</span>code<span class="syntax-marker">`</span></code></div>"#
    );
}

#[test]
fn snapshot_link() {
    insta::assert_snapshot!(
        parse("[t](https://e.com)"),
        @r#"<div><a href="https://e.com" style="anchor-name: --link-0"><span class="syntax-marker">[</span>t<span class="syntax-marker url-part">](https://e.com)</span></a></div>"#
    );
}

#[test]
fn snapshot_image() {
    insta::assert_snapshot!(
        parse("![a](i.png)"),
        @r#"<div><img src="i.png" alt="a" class="glaze-image" /></div>"#
    );
}

#[test]
fn snapshot_indentation() {
    insta::assert_snapshot!(
        parse("  nested"),
        @r#"<div>&nbsp;&nbsp;nested</div>"#
    );
}

#[test]
fn snapshot_blank_line() {
    insta::assert_snapshot!(
        parse("a\n\nb"),
        @r#"<div>a</div><div>&nbsp;</div><div>b</div>"#
    );
}

#[test]
fn snapshot_code_fence() {
    insta::assert_snapshot!(
        parse("```py\nx = 1\n```"),
        @r#"<div><span class="code-fence">```py</span></div><pre class="code-block"><code class="language-py">x = 1</code></pre><div><span class="code-fence">```</span></div>"#
    );
}

#[test]
fn snapshot_table() {
    insta::assert_snapshot!(
        parse("| a | b |\n| - | - |\n| 1 | 2 |"),
        @r#"<table class="glaze-table"><thead><tr><th>a</th><th>b</th></tr></thead><tbody><tr><td>1</td><td>2</td></tr></tbody></table>"#
    );
}

#[test]
fn snapshot_escaped_html() {
    insta::assert_snapshot!(
        parse("<b>& raw</b>"),
        @r#"<div>&lt;b&gt;&amp; raw&lt;/b&gt;</div>"#
    );
}
