/*! Fragment splitting and overlap helpers for multi-token segments.
!*/

/// Characters that get surrounded by spaces before splitting a segment span.
pub const SPLIT_CHARS: [char; 46] = [
    ',', '.', ':', ';', '?', ')', '(', '-', '!', //
    '[', ']', '{', '}', '<', '>', '/', '\'', //
    '@', '#', '$', '%', '&', '*', '=', '+', '_', //
    '§', 'µ', '€', '£', '¥', '°', '±', '©', '®', '™', //
    '«', '»', '„', '“', '”', '‚', '‘', '’', '〝', '〞',
];

/// Split a span into fragments.
///
/// Every split character becomes its own fragment, the rest is split on plain spaces.
/// Empty fragments are discarded.
pub fn split_fragments(span: &str) -> Vec<String> {
    let mut padded = String::with_capacity(span.len() * 2);
    for c in span.chars() {
        if SPLIT_CHARS.contains(&c) {
            padded.push(' ');
            padded.push(c);
            padded.push(' ');
        } else {
            padded.push(c);
        }
    }

    padded
        .split(' ')
        .filter(|fragment| !fragment.is_empty())
        .map(String::from)
        .collect()
}

/// Longest overlap between two spans.
///
/// If one span contains the other, the contained one is returned.
/// Otherwise, the longest suffix of `s1` that is also a prefix of `s2` (possibly empty).
pub fn find_overlap<'a>(s1: &'a str, s2: &'a str) -> &'a str {
    if s1.contains(s2) {
        return s2;
    }
    if s2.contains(s1) {
        return s1;
    }

    // char boundaries of s1 suffixes, shortest first
    let suffix_starts = s1.char_indices().map(|(idx, _)| idx).rev();
    let max_chars = s2.chars().count();

    let mut overlap = "";
    for (nb_chars, start) in suffix_starts.enumerate().map(|(i, start)| (i + 1, start)) {
        if nb_chars > max_chars {
            break;
        }
        let suffix = &s1[start..];
        if s2.starts_with(suffix) {
            overlap = suffix;
        }
    }
    overlap
}
