use crate::parsing::{blocks::kinds::ReferenceDefinition, inline::cursor::Cursor};

/// Link and image delimiters.
pub struct Link;

impl Link {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const IMAGE: u8 = b'!';
    pub const DEST_OPEN: u8 = b'(';
    pub const DEST_CLOSE: u8 = b')';
    pub const ESCAPE: u8 = b'\\';

    /// Parses `dest "title")` after an opening parenthesis. On success the
    /// cursor is left after the closing parenthesis.
    pub fn inline_destination(cur: &mut Cursor<'_>) -> Option<ReferenceDefinition> {
        cur.skip_whitespace();
        let destination = Self::destination(cur)?;

        let before_title = cur.pos();
        cur.skip_whitespace();
        // A title must be separated from the destination.
        let title = if cur.pos() > before_title {
            Self::title(cur)
        } else {
            None
        };
        cur.skip_whitespace();

        cur.eat(Self::DEST_CLOSE)
            .then_some(ReferenceDefinition { destination, title })
    }

    fn destination(cur: &mut Cursor<'_>) -> Option<String> {
        if cur.eat(b'<') {
            let start = cur.pos();
            while let Some(b) = cur.peek() {
                match b {
                    b'>' => {
                        let dest = cur.s[start..cur.pos()].to_string();
                        cur.bump();
                        return Some(dest);
                    }
                    b'<' | b'\n' => return None,
                    _ => {
                        cur.bump();
                    }
                }
            }
            return None;
        }

        let start = cur.pos();
        let mut depth = 0usize;
        while let Some(b) = cur.peek() {
            match b {
                Self::ESCAPE if cur.peek_at(1).is_some_and(|c| c.is_ascii_punctuation()) => {
                    cur.bump_n(2);
                    continue;
                }
                Self::DEST_OPEN => depth += 1,
                Self::DEST_CLOSE if depth == 0 => break,
                Self::DEST_CLOSE => depth -= 1,
                b if b.is_ascii_whitespace() => break,
                _ => {}
            }
            cur.bump();
        }
        (depth == 0).then(|| cur.s[start..cur.pos()].to_string())
    }

    fn title(cur: &mut Cursor<'_>) -> Option<String> {
        let close = match cur.peek()? {
            b'"' => b'"',
            b'\'' => b'\'',
            Self::DEST_OPEN => Self::DEST_CLOSE,
            _ => return None,
        };
        let saved = cur.clone();
        cur.bump();
        let start = cur.pos();
        while let Some(b) = cur.peek() {
            if b == close {
                let title = cur.s[start..cur.pos()].to_string();
                cur.bump();
                return Some(title);
            }
            cur.bump();
        }
        *cur = saved;
        None
    }
}
