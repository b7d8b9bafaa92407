/// Emphasis delimiters and the flanking rules that decide whether a run can
/// open or close.
pub struct Emphasis;

/// What a delimiter run may do, judged from its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flanking {
    pub can_open: bool,
    pub can_close: bool,
}

impl Emphasis {
    pub const STAR: u8 = b'*';
    pub const UNDERSCORE: u8 = b'_';

    pub fn is_delimiter(b: u8) -> bool {
        b == Self::STAR || b == Self::UNDERSCORE
    }

    /// Classifies a run of `ch` given the characters around it; `None` means
    /// start or end of the block.
    ///
    /// Underscores additionally refuse to open or close inside a word, so
    /// `snake_case_name` stays literal.
    pub fn flanking(ch: u8, before: Option<char>, after: Option<char>) -> Flanking {
        let space = |c: Option<char>| c.is_none_or(char::is_whitespace);
        let punct = |c: Option<char>| c.is_some_and(|c| c.is_ascii_punctuation());

        let left = !space(after) && (!punct(after) || space(before) || punct(before));
        let right = !space(before) && (!punct(before) || space(after) || punct(after));

        if ch == Self::UNDERSCORE {
            Flanking {
                can_open: left && (!right || punct(before)),
                can_close: right && (!left || punct(after)),
            }
        } else {
            Flanking {
                can_open: left,
                can_close: right,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b'*', None, Some('a'), true, false)]
    #[case(b'*', Some('a'), None, false, true)]
    #[case(b'*', Some('a'), Some('b'), true, true)]
    #[case(b'*', Some(' '), Some(' '), false, false)]
    #[case(b'_', Some('a'), Some('b'), false, false)]
    #[case(b'_', Some(' '), Some('b'), true, false)]
    #[case(b'*', Some('a'), Some('.'), false, true)]
    fn flanking_rules(
        #[case] ch: u8,
        #[case] before: Option<char>,
        #[case] after: Option<char>,
        #[case] can_open: bool,
        #[case] can_close: bool,
    ) {
        assert_eq!(
            Emphasis::flanking(ch, before, after),
            Flanking {
                can_open,
                can_close
            }
        );
    }
}
