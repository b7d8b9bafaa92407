use xi_rope::Rope;

use super::span::Span;

/// A reference to a single line in the rope.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// Byte span of this line in the rope (includes the terminator if present).
    pub span: Span,
    /// Byte span of the line content, without `\n` or `\r\n`.
    pub content: Span,
    /// The line content as a string, without the terminator.
    pub text: String,
}

/// Returns an iterator over lines with their byte spans.
///
/// Uses `lines_raw` so the spans of consecutive lines tile the rope exactly.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).map(move |line| {
        let start = offset;
        let len = line.len();
        offset += len;
        let text = line.trim_end_matches(['\n', '\r']).to_string();
        LineRef {
            span: Span { start, end: offset },
            content: Span {
                start,
                end: start + text.len(),
            },
            text,
        }
    })
}
