/// Blockquote syntax.
///
/// All blockquote delimiter knowledge lives here, not in the classifier.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Consumes one quote marker at the start of `s` (already stripped of
    /// indentation), plus a single following space if present.
    ///
    /// Returns the byte offset where the remainder of the line begins.
    pub fn strip_marker(s: &str) -> Option<usize> {
        let b = s.as_bytes();
        if b.first() != Some(&(Self::PREFIX as u8)) {
            return None;
        }
        if b.get(1) == Some(&b' ') {
            Some(2)
        } else {
            Some(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_no_quote() {
        assert_eq!(BlockQuote::strip_marker("hello"), None);
    }

    #[test]
    fn strip_single_quote() {
        assert_eq!(BlockQuote::strip_marker("> hello"), Some(2));
    }

    #[test]
    fn strip_marker_without_space() {
        assert_eq!(BlockQuote::strip_marker(">hello"), Some(1));
    }

    #[test]
    fn only_one_marker_is_consumed() {
        // the nested marker is left for the recursive scan
        assert_eq!(BlockQuote::strip_marker(">> hello"), Some(1));
    }

    #[test]
    fn tab_after_marker_stays_in_remainder() {
        assert_eq!(BlockQuote::strip_marker(">\tcode"), Some(1));
    }
}
