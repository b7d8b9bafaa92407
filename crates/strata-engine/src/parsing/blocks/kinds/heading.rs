use std::ops::Range;

/// ATX heading syntax (`# Title`, optionally closed with `#`s).
pub struct Heading;

/// Result of scanning a heading line. Ranges are local to the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingScan {
    pub level: u8,
    /// Trimmed heading content, excluding any closing `#` run.
    pub text: Range<usize>,
}

impl Heading {
    pub const MARKER: u8 = b'#';
    pub const MAX_LEVEL: usize = 6;

    pub fn scan(s: &str) -> Option<HeadingScan> {
        let b = s.as_bytes();
        let level = b.iter().take_while(|&&c| c == Self::MARKER).count();
        if level == 0 || level > Self::MAX_LEVEL {
            return None;
        }
        if !matches!(b.get(level), None | Some(b' ') | Some(b'\t')) {
            return None;
        }

        let rest = &s[level..];
        let start = level + (rest.len() - rest.trim_start().len());
        let mut end = level + rest.trim_end().len();
        if end < start {
            return Some(HeadingScan {
                level: level as u8,
                text: start..start,
            });
        }

        // An optional closing sequence: a run of `#` preceded by whitespace
        // (or making up the whole content).
        let content = &s[start..end];
        let without_hashes = content.trim_end_matches(Self::MARKER as char);
        if without_hashes.len() < content.len()
            && (without_hashes.is_empty() || without_hashes.ends_with([' ', '\t']))
        {
            end = start + without_hashes.trim_end().len();
        }

        Some(HeadingScan {
            level: level as u8,
            text: start..end,
        })
    }
}
