//! Bounded forward/backward scans over a [`TokenStream`].
//!
//! Forward scans treat `until` as exclusive, backward scans as inclusive.
//! With `exclude` set the scan stops at the first token whose kind is *not*
//! listed, which is how "skip filler" scans are written.

use crate::token::{TokenKind, TokenStream};

impl TokenStream {
    /// First position in `from..until` whose kind matches.
    pub fn find_next(
        &self,
        kinds: &[TokenKind],
        from: usize,
        until: Option<usize>,
        exclude: bool,
    ) -> Option<usize> {
        let end = until.unwrap_or(self.len()).min(self.len());
        (from..end).find(|&i| kinds.contains(&self[i].kind) != exclude)
    }

    /// Last position in `until..=from` whose kind matches, scanning backwards.
    pub fn find_previous(
        &self,
        kinds: &[TokenKind],
        from: usize,
        until: Option<usize>,
        exclude: bool,
    ) -> Option<usize> {
        if from >= self.len() {
            return None;
        }
        let end = until.unwrap_or(0);
        if end > from {
            return None;
        }
        (end..=from)
            .rev()
            .find(|&i| kinds.contains(&self[i].kind) != exclude)
    }

    /// Backward scan starting just before `pos`; `None` when `pos` is 0.
    pub fn find_before(
        &self,
        kinds: &[TokenKind],
        pos: usize,
        until: Option<usize>,
        exclude: bool,
    ) -> Option<usize> {
        pos.checked_sub(1)
            .and_then(|from| self.find_previous(kinds, from, until, exclude))
    }
}

#[cfg(test)]
mod tests {
    use crate::token::{Token, TokenKind, TokenStream};

    fn stream(kinds: &[TokenKind]) -> TokenStream {
        TokenStream::new(
            kinds
                .iter()
                .enumerate()
                .map(|(i, k)| Token::new(*k, "x", i + 1, 1))
                .collect(),
        )
    }

    use TokenKind::*;

    #[test]
    fn find_next_respects_exclusive_bound() {
        let s = stream(&[Whitespace, Whitespace, Variable, Comma]);
        assert_eq!(s.find_next(&[Variable], 0, None, false), Some(2));
        assert_eq!(s.find_next(&[Variable], 0, Some(2), false), None);
        assert_eq!(s.find_next(&[Whitespace], 0, None, true), Some(2));
    }

    #[test]
    fn find_previous_respects_inclusive_bound() {
        let s = stream(&[Comment, Whitespace, Public, Whitespace, Function]);
        let skip = [Whitespace, Public];
        assert_eq!(s.find_previous(&skip, 3, None, true), Some(0));
        assert_eq!(s.find_previous(&skip, 3, Some(1), true), None);
        assert_eq!(s.find_previous(&[Comment], 3, Some(0), false), Some(0));
    }

    #[test]
    fn scans_out_of_range_are_not_found() {
        let s = stream(&[Whitespace]);
        assert_eq!(s.find_previous(&[Whitespace], 5, None, false), None);
        assert_eq!(s.find_next(&[Whitespace], 5, None, false), None);
        assert_eq!(s.find_before(&[Whitespace], 0, None, false), None);
    }
}
