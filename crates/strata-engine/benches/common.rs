// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\nParagraph with *emphasis*, `code` and a [link][ref].\n\n- Bullet point\n  - Nested item\n- Another item\n\n> Quoted text\nlazily continued\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n[ref]: /target \"Title\"\n\n";
    base.repeat(size)
}

/// Lists nested `depth` levels deep inside a quote, each item carrying a
/// paragraph and an indented code block.
#[allow(dead_code)]
pub fn generate_nested_lists(items: usize, depth: usize) -> String {
    let mut content = String::new();
    for item in 0..items {
        for level in 0..depth {
            let indent = "  ".repeat(level);
            content.push_str(&format!("> {indent}- item {item} at level {level}\n"));
        }
        let indent = "  ".repeat(depth);
        content.push_str(">\n");
        content.push_str(&format!(">     {indent}code line {item}\n"));
    }
    content
}

/// One long paragraph dense with inline structures.
#[allow(dead_code)]
pub fn generate_inline_heavy(lines: usize) -> String {
    let line = "Some *emph* and **strong** text, `code`, [inline](/u \"t\") and ![img][r] here\n";
    let mut content = line.repeat(lines);
    content.push_str("\n[r]: /image.png\n");
    content
}
