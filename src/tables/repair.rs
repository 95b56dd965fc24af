/*! Line repair for relANNIS table files.

Some exports have a column delimiter degraded into a plain space.
A line whose tab count is off gets its *last* space turned back into a tab, once.
Whether the repaired line then has the right arity is checked by the caller.
!*/
use std::borrow::Cow;

/// Returns the line to split, or [None] if the line is blank and has to be dropped.
///
/// Lines with exactly `columns - 1` tabs are returned untouched.
pub fn repair_line(line: &str, columns: usize) -> Option<Cow<'_, str>> {
    if line.matches('\t').count() + 1 == columns {
        return Some(Cow::Borrowed(line));
    }

    if line.trim().is_empty() {
        return None;
    }

    match line.rfind(' ') {
        Some(idx) => {
            let mut repaired = String::with_capacity(line.len());
            repaired.push_str(&line[..idx]);
            repaired.push('\t');
            repaired.push_str(&line[idx + 1..]);
            Some(Cow::Owned(repaired))
        }
        None => Some(Cow::Borrowed(line)),
    }
}
