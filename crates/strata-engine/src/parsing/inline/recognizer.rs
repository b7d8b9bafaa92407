use std::{cmp::Reverse, ops::Range};

use xi_rope::Rope;

use crate::parsing::{
    blocks::{ReferenceMap, kinds::ReferenceDefinition},
    rope::{slice::slice_to_string, span::Span},
};

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, Emphasis, Link},
    types::{NonTextInlineNode, NonTextKind, TextInlineNode, TextKind},
};

/// The two ordered streams the inline tree is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStreams {
    /// One `Text` per content line with a `SoftBreak` between lines.
    pub texts: Vec<TextInlineNode>,
    /// Recognized structures, sorted by start ascending then end descending.
    pub non_texts: Vec<NonTextInlineNode>,
}

/// Scans the content lines of one block.
///
/// The lines are joined with `\n` into a logical string so that constructs
/// may span lines; every recognized offset is mapped back to the rope, so a
/// construct crossing a line covers the container prefix of the next line
/// too, exactly like the soft break between them.
///
/// # Raw Zone Precedence
/// Code spans are matched first and suppress everything inside them. Link
/// text is scanned as a separate scope, so emphasis never crosses a link
/// boundary and links never nest.
pub fn recognize(rope: &Rope, lines: &[Span], refs: &ReferenceMap) -> InlineStreams {
    let map = LineMap::new(rope, lines);

    let mut recognizer = Recognizer {
        s: &map.text,
        refs,
        out: Vec::new(),
    };
    recognizer.scan_scope(0, map.text.len(), false);

    let mut non_texts: Vec<_> = recognizer
        .out
        .into_iter()
        .map(|raw| NonTextInlineNode {
            kind: raw.kind,
            start: map.to_rope(raw.start),
            end: map.to_rope(raw.end),
            content: Span::new(map.to_rope(raw.content.start), map.to_rope(raw.content.end)),
        })
        .collect();
    non_texts.sort_by_key(|n| (n.start, Reverse(n.end)));

    let mut texts = Vec::with_capacity(lines.len() * 2);
    for (i, line) in lines.iter().enumerate() {
        if let Some(prev) = i.checked_sub(1).map(|p| lines[p]) {
            texts.push(TextInlineNode {
                kind: TextKind::SoftBreak,
                start: prev.end,
                end: line.start,
            });
        }
        texts.push(TextInlineNode {
            kind: TextKind::Text,
            start: line.start,
            end: line.end,
        });
    }

    InlineStreams { texts, non_texts }
}

/// Maps offsets in the joined logical string back to rope offsets.
struct LineMap {
    text: String,
    /// `(offset in text, span in rope)` per line.
    starts: Vec<(usize, Span)>,
}

impl LineMap {
    fn new(rope: &Rope, lines: &[Span]) -> Self {
        let mut text = String::new();
        let mut starts = Vec::with_capacity(lines.len());
        for (i, &line) in lines.iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            starts.push((text.len(), line));
            text.push_str(&slice_to_string(rope, line));
        }
        Self { text, starts }
    }

    /// A position on a separator maps to the end of the line before it.
    fn to_rope(&self, pos: usize) -> usize {
        let idx = self.starts.partition_point(|&(start, _)| start <= pos);
        match idx.checked_sub(1).map(|i| self.starts[i]) {
            Some((start, line)) => (line.start + (pos - start)).min(line.end),
            None => pos,
        }
    }
}

/// A recognized span in logical-string coordinates.
struct RawSpan {
    kind: NonTextKind,
    start: usize,
    end: usize,
    content: Range<usize>,
}

/// An emphasis delimiter run awaiting a partner. `pos..pos + count` is the
/// unused part of the run; openers are consumed from the right, closers
/// from the left.
#[derive(Debug, Clone, Copy)]
struct Delimiter {
    ch: u8,
    pos: usize,
    count: usize,
    can_open: bool,
    can_close: bool,
}

struct Recognizer<'a> {
    s: &'a str,
    refs: &'a ReferenceMap,
    out: Vec<RawSpan>,
}

impl Recognizer<'_> {
    fn scan_scope(&mut self, start: usize, end: usize, in_link: bool) {
        let mut cur = Cursor::new(self.s, start, end);
        let mut delimiters = Vec::new();

        while let Some(b) = cur.peek() {
            match b {
                Link::ESCAPE if cur.peek_at(1).is_some_and(|c| c.is_ascii_punctuation()) => {
                    cur.bump_n(2);
                }
                CodeSpan::TICK => self.code_span(&mut cur),
                Link::IMAGE if cur.peek_at(1) == Some(Link::OPEN) => {
                    if !self.link(&mut cur, true) {
                        cur.bump();
                    }
                }
                Link::OPEN if !in_link => {
                    if !self.link(&mut cur, false) {
                        cur.bump();
                    }
                }
                b if Emphasis::is_delimiter(b) => delimiters.push(delimiter_run(&mut cur, b)),
                _ => {
                    cur.bump();
                }
            }
        }

        self.match_emphasis(&mut delimiters);
    }

    /// An unmatched backtick run is literal text.
    fn code_span(&mut self, cur: &mut Cursor<'_>) {
        let start = cur.pos();
        let len = cur.run_of(CodeSpan::TICK);
        match CodeSpan::closing_run(cur.s.as_bytes(), start + len, cur.end, len) {
            Some(close) => {
                self.out.push(RawSpan {
                    kind: NonTextKind::Code,
                    start,
                    end: close + len,
                    content: start + len..close,
                });
                cur.jump_to(close + len);
            }
            None => cur.bump_n(len),
        }
    }

    /// Tries a link or image at the cursor. Unresolved references are left
    /// as text, in which case the cursor does not move.
    fn link(&mut self, cur: &mut Cursor<'_>, image: bool) -> bool {
        let start = cur.pos();
        let open = if image { start + 1 } else { start };
        let Some(close) = find_bracket_close(cur.s.as_bytes(), open + 1, cur.end) else {
            return false;
        };
        let Some((definition, end)) = self.link_target(open + 1..close, close + 1, cur.end)
        else {
            return false;
        };

        let kind = if image {
            NonTextKind::Image { definition }
        } else {
            NonTextKind::Link { definition }
        };
        self.out.push(RawSpan {
            kind,
            start,
            end,
            content: open + 1..close,
        });
        self.scan_scope(open + 1, close, true);
        cur.jump_to(end);
        true
    }

    /// Resolves what follows `]`: an inline `(dest "title")`, a full or
    /// collapsed reference `[label]` / `[]`, or a shortcut reference using
    /// the link text itself.
    fn link_target(
        &self,
        text: Range<usize>,
        after: usize,
        end: usize,
    ) -> Option<(ReferenceDefinition, usize)> {
        let mut cur = Cursor::new(self.s, after, end);

        if cur.eat(Link::DEST_OPEN)
            && let Some(definition) = Link::inline_destination(&mut cur)
        {
            return Some((definition, cur.pos()));
        }

        cur.jump_to(after);
        if cur.eat(Link::OPEN) {
            let label_start = cur.pos();
            let label_end = label_start
                + self.s.get(label_start..end)?.bytes().position(|b| {
                    b == Link::CLOSE || b == Link::OPEN
                })?;
            if self.s.as_bytes()[label_end] == Link::CLOSE {
                let label = &self.s[label_start..label_end];
                let label = if label.trim().is_empty() {
                    &self.s[text.clone()]
                } else {
                    label
                };
                let definition = self.refs.get(label)?;
                return Some((definition.clone(), label_end + 1));
            }
        }

        let definition = self.refs.get(&self.s[text])?;
        Some((definition.clone(), after))
    }

    /// Pairs closers with the nearest compatible opener. A pair of runs that
    /// are both at least two long makes strong emphasis. Runs between a
    /// matched pair are dropped, which keeps emphasis properly nested.
    fn match_emphasis(&mut self, delimiters: &mut [Delimiter]) {
        let mut c = 0;
        while c < delimiters.len() {
            let closer = delimiters[c];
            if !closer.can_close || closer.count == 0 {
                c += 1;
                continue;
            }
            let Some(o) = (0..c).rev().find(|&o| {
                let d = delimiters[o];
                d.ch == closer.ch && d.can_open && d.count > 0
            }) else {
                c += 1;
                continue;
            };

            let used = if delimiters[o].count >= 2 && closer.count >= 2 {
                2
            } else {
                1
            };
            let content_start = delimiters[o].pos + delimiters[o].count;
            delimiters[o].count -= used;
            self.out.push(RawSpan {
                kind: NonTextKind::Emphasis { level: used as u8 },
                start: delimiters[o].pos + delimiters[o].count,
                end: closer.pos + used,
                content: content_start..closer.pos,
            });

            for d in &mut delimiters[o + 1..c] {
                d.count = 0;
            }
            delimiters[c].pos += used;
            delimiters[c].count -= used;
        }
    }
}

fn delimiter_run(cur: &mut Cursor<'_>, ch: u8) -> Delimiter {
    let pos = cur.pos();
    let count = cur.run_of(ch);
    cur.bump_n(count);
    let flanking = Emphasis::flanking(ch, cur.char_before(pos), cur.char_at(pos + count));
    Delimiter {
        ch,
        pos,
        count,
        can_open: flanking.can_open,
        can_close: flanking.can_close,
    }
}

/// Finds the `]` matching an already consumed `[`, skipping balanced inner
/// brackets, escapes and code spans.
fn find_bracket_close(bytes: &[u8], from: usize, end: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = from;
    while i < end {
        match bytes[i] {
            Link::ESCAPE if bytes.get(i + 1).is_some_and(|c| c.is_ascii_punctuation()) => {
                i += 2;
                continue;
            }
            CodeSpan::TICK => {
                let len = bytes[i..end]
                    .iter()
                    .take_while(|&&b| b == CodeSpan::TICK)
                    .count();
                i = match CodeSpan::closing_run(bytes, i + len, end, len) {
                    Some(close) => close + len,
                    None => i + len,
                };
                continue;
            }
            Link::OPEN => depth += 1,
            Link::CLOSE if depth == 0 => return Some(i),
            Link::CLOSE => depth -= 1,
            _ => {}
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(src: &str) -> InlineStreams {
        scan_with(src, &ReferenceMap::new())
    }

    fn scan_with(src: &str, refs: &ReferenceMap) -> InlineStreams {
        let rope = Rope::from(src);
        let mut lines = Vec::new();
        let mut offset = 0;
        for line in src.split('\n') {
            lines.push(Span::new(offset, offset + line.len()));
            offset += line.len() + 1;
        }
        recognize(&rope, &lines, refs)
    }

    /// `(kind, start..end, content)` of every non-text span.
    fn spans(streams: &InlineStreams) -> Vec<(String, Range<usize>, Range<usize>)> {
        streams
            .non_texts
            .iter()
            .map(|n| {
                let kind = match &n.kind {
                    NonTextKind::Code => "code".to_string(),
                    NonTextKind::Emphasis { level } => format!("em{level}"),
                    NonTextKind::Link { definition } => format!("link {}", definition.destination),
                    NonTextKind::Image { definition } => format!("img {}", definition.destination),
                };
                (kind, n.start..n.end, n.content.start..n.content.end)
            })
            .collect()
    }

    fn refs(label: &str, destination: &str) -> ReferenceMap {
        let mut map = ReferenceMap::new();
        let _ = map.insert(
            label.into(),
            ReferenceDefinition {
                destination: destination.into(),
                title: None,
            },
        );
        map
    }

    #[test]
    fn text_stream_has_soft_breaks_between_lines() {
        let streams = scan("ab\ncd");
        assert_eq!(
            streams.texts,
            vec![
                TextInlineNode { kind: TextKind::Text, start: 0, end: 2 },
                TextInlineNode { kind: TextKind::SoftBreak, start: 2, end: 3 },
                TextInlineNode { kind: TextKind::Text, start: 3, end: 5 },
            ]
        );
    }

    #[test]
    fn single_emphasis() {
        assert_eq!(spans(&scan("a*b*c")), vec![("em1".into(), 1..4, 2..3)]);
    }

    #[test]
    fn strong_inside_emphasis() {
        assert_eq!(
            spans(&scan("***a***")),
            vec![("em1".into(), 0..7, 1..6), ("em2".into(), 1..6, 3..4)]
        );
    }

    #[test]
    fn underscore_inside_word_is_literal() {
        assert_eq!(spans(&scan("snake_case_name")), vec![]);
    }

    #[test]
    fn unmatched_opener_is_literal() {
        assert_eq!(spans(&scan("**a*")), vec![("em1".into(), 1..4, 2..3)]);
    }

    #[test]
    fn code_span_suppresses_emphasis() {
        assert_eq!(spans(&scan("`*a*`")), vec![("code".into(), 0..5, 1..4)]);
    }

    #[test]
    fn code_span_needs_run_of_same_length() {
        assert_eq!(spans(&scan("``a`b``")), vec![("code".into(), 0..7, 2..5)]);
        assert_eq!(spans(&scan("`a")), vec![]);
    }

    #[test]
    fn escaped_delimiter_is_literal() {
        assert_eq!(spans(&scan(r"\*a*")), vec![]);
    }

    #[test]
    fn inline_link_with_emphasis_inside() {
        assert_eq!(
            spans(&scan("[*a*](/u)")),
            vec![("link /u".into(), 0..9, 1..4), ("em1".into(), 1..4, 2..3)]
        );
    }

    #[test]
    fn emphasis_does_not_cross_link_text() {
        assert_eq!(spans(&scan("*[a*](/u)")), vec![("link /u".into(), 1..9, 2..4)]);
    }

    #[test]
    fn image_is_recognized() {
        assert_eq!(spans(&scan("![alt](i.png)")), vec![("img i.png".into(), 0..13, 2..5)]);
    }

    #[test]
    fn reference_forms_resolve() {
        let refs = refs("Foo", "/f");
        assert_eq!(spans(&scan_with("[x][foo]", &refs)), vec![("link /f".into(), 0..8, 1..2)]);
        assert_eq!(spans(&scan_with("[foo][]", &refs)), vec![("link /f".into(), 0..7, 1..4)]);
        assert_eq!(spans(&scan_with("[FOO]", &refs)), vec![("link /f".into(), 0..5, 1..4)]);
    }

    #[test]
    fn unresolved_reference_stays_text() {
        assert_eq!(spans(&scan("[nope] and *b*")), vec![("em1".into(), 11..14, 12..13)]);
    }

    #[test]
    fn links_do_not_nest() {
        assert_eq!(
            spans(&scan("[a [b](/in) c](/out)")),
            vec![("link /out".into(), 0..20, 1..13)]
        );
    }

    #[test]
    fn emphasis_spans_lines() {
        let streams = scan("*a\nb*");
        assert_eq!(spans(&streams), vec![("em1".into(), 0..5, 1..4)]);
    }

    #[test]
    fn offsets_follow_container_prefixes() {
        // "> *a\n> b*": content lines are "*a" at 2..4 and "b*" at 7..9.
        let rope = Rope::from("> *a\n> b*");
        let lines = [Span::new(2, 4), Span::new(7, 9)];
        let streams = recognize(&rope, &lines, &ReferenceMap::new());
        assert_eq!(spans(&streams), vec![("em1".into(), 2..9, 3..8)]);
        assert_eq!(
            streams.texts[1],
            TextInlineNode { kind: TextKind::SoftBreak, start: 4, end: 7 }
        );
    }
}
