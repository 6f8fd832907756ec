use crate::base::LineIndex;
use crate::parser::{AstNode, SourceFile};

use super::LineEdits;

/// Slice the rewritten file back into lines and key them by `targets`.
///
/// The i-th line of the file goes to the i-th target in ascending order.
/// Targets beyond the end of the rewritten text get an empty string.
pub fn content_by_line(file: &SourceFile, targets: &[usize]) -> LineEdits {
    let text = file.syntax().text().to_string();
    let index = LineIndex::new(&text);

    let mut sorted = targets.to_vec();
    sorted.sort_unstable();

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, target)| {
            let range = index.line_range(i + 1);
            let line = text.get(std::ops::Range::<usize>::from(range)).unwrap_or_default();
            (target, line.to_string())
        })
        .collect()
}
