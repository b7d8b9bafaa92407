use xi_rope::Rope;

use super::span::Span;

/// Extracts the text for a span from the rope as an owned String.
///
/// This allocates; prefer working with spans where possible.
pub fn slice_to_string(rope: &Rope, sp: Span) -> String {
    rope.slice_to_cow(sp.start..sp.end).into_owned()
}

/// Joins the text of several spans with `\n`.
pub fn join_lines(rope: &Rope, spans: &[Span]) -> String {
    spans
        .iter()
        .map(|sp| slice_to_string(rope, *sp))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Extracts text for a span, truncating to at most `max` bytes with a "..."
/// suffix if needed. Newlines are escaped so previews stay on one line.
pub fn preview(rope: &Rope, sp: Span, max: usize) -> String {
    let mut s = slice_to_string(rope, sp);
    if s.len() > max {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        s.truncate(cut);
        s.push_str("...");
    }
    s.replace('\n', "\\n")
}
