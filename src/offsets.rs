/*! Character offsets of reconciled tokens.

Offsets are computed over the *unfiltered* token list with a running cursor:
a non-empty token moves the cursor past itself and one joining space, an empty token does not move it.
An empty token therefore gets `begin == end`, equal to the `begin` of the next non-empty token.

The plain text is built from the non-empty tokens only, joined with single spaces,
so that empty tokens never produce double spaces. Both agree on the position of every non-empty token.

Lengths are counted in chars.
!*/
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub begin: usize,
    pub end: usize,
}

impl Span {
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }
}

/// Compute the `(begin, end)` span of every token.
pub fn calc_offsets<S: AsRef<str>>(tokens: &[S]) -> Vec<Span> {
    let mut cursor = 0;
    tokens
        .iter()
        .map(|token| {
            let len = token.as_ref().chars().count();
            let span = Span::new(cursor, cursor + len);
            if len > 0 {
                cursor += len + 1;
            }
            span
        })
        .collect()
}

/// Join non-empty tokens with single spaces.
pub fn plain_text<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(S::as_ref)
        .filter(|token| !token.is_empty())
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contiguous_offsets() {
        let offsets = calc_offsets(&["in", "principio", "erat"]);
        assert_eq!(
            offsets,
            vec![Span::new(0, 2), Span::new(3, 12), Span::new(13, 17)]
        );
    }

    #[test]
    fn empty_token_in_the_middle() {
        let tokens = ["a", "", "bc"];
        let offsets = calc_offsets(&tokens);
        assert_eq!(offsets[1], Span::new(2, 2));
        assert_eq!(offsets[1].begin, offsets[2].begin);

        let text = plain_text(&tokens);
        assert_eq!(text, "a bc");
        assert!(!text.contains("  "));
        assert_eq!(&text[offsets[2].begin..offsets[2].end], "bc");
    }

    #[test]
    fn chars_not_bytes() {
        let offsets = calc_offsets(&["daß", "ēr"]);
        assert_eq!(offsets, vec![Span::new(0, 3), Span::new(4, 6)]);
    }

    #[test]
    fn non_decreasing_and_within_text() {
        let tokens = ["", "x", "", "", "yz", "", "w", ""];
        let offsets = calc_offsets(&tokens);
        let text_len = plain_text(&tokens).chars().count();
        for pair in offsets.windows(2) {
            assert!(pair[0].begin <= pair[1].begin);
            assert!(pair[0].end <= pair[1].begin + 1);
        }
        for span in &offsets {
            assert!(span.begin <= span.end);
            assert!(span.end <= text_len + 1);
        }
    }

    #[test]
    fn empty_document() {
        let tokens: [&str; 0] = [];
        assert!(calc_offsets(&tokens).is_empty());
        assert_eq!(plain_text(&tokens), "");
    }
}
