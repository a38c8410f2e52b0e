// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with **bold**, *italic* and `code`.\n\n- Bullet point\n  - Nested item\n- [ ] Open task\n\n1. First step\n2. Second step\n\n| col | col |\n| --- | --- |\n| a | [link](https://example.com) |\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}
