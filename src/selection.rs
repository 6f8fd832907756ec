//! Resolve host selections to whole buffer lines

use rustc_hash::FxHashSet;

use crate::base::TextRange;

/// Lines touched by one selection.
///
/// A caret contributes nothing. A selection that ends on the past-the-end
/// line, or at column 0 of a line, does not include its end line.
pub fn range_lines(range: &TextRange, total_lines: usize) -> std::ops::Range<usize> {
    if range.is_empty() {
        return 0..0;
    }
    let start = range.start.line;
    if range.end.line == total_lines || range.end.column == 0 {
        start..range.end.line.max(start)
    } else {
        start..range.end.line.max(start) + 1
    }
}

/// Sorted, de-duplicated union of the lines touched by every selection
pub fn selected_lines(ranges: &[TextRange], total_lines: usize) -> Vec<usize> {
    let mut lines = FxHashSet::default();
    for range in ranges {
        lines.extend(range_lines(range, total_lines));
    }
    let mut lines: Vec<_> = lines.into_iter().collect();
    lines.sort_unstable();
    tracing::trace!(?lines, "resolved selected lines");
    lines
}
