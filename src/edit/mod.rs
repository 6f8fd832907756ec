//! Compute and apply line edits for a change over selected lines.
//!
//! The selected lines are concatenated, parsed, rewritten and sliced back
//! into the same number of lines. Anything that goes wrong on the way maps
//! every target line to its original text.

mod buffer;
mod serialize;

pub use buffer::{SourceBuffer, TextBuffer, apply_edits};
pub use serialize::content_by_line;

use indexmap::IndexMap;

use crate::access::AccessChange;
use crate::base::TextRange;
use crate::parser::{AstNode, SourceFile, parse_swift};
use crate::rewrite::AccessRewriter;
use crate::selection::selected_lines;

/// New full-line text keyed by buffer line index, in ascending line order
pub type LineEdits = IndexMap<usize, String>;

/// Compute replacement text for every line touched by `selections`
pub fn compute_edits<S: AsRef<str>>(
    lines: &[S],
    selections: &[TextRange],
    change: AccessChange,
) -> LineEdits {
    let targets: Vec<usize> = selected_lines(selections, lines.len())
        .into_iter()
        .filter(|&line| {
            let in_range = line < lines.len();
            if !in_range {
                tracing::debug!(line, total = lines.len(), "selection line outside the buffer");
            }
            in_range
        })
        .collect();
    if targets.is_empty() {
        return LineEdits::default();
    }

    let source: String = targets.iter().map(|&line| lines[line].as_ref()).collect();
    let parse = parse_swift(&source);
    if !parse.ok() {
        tracing::debug!(errors = parse.errors.len(), first = ?parse.errors.first(), "selection parsed with errors");
    }

    let root = parse.syntax();
    if root.text() != source.as_str() {
        tracing::debug!("parse tree does not reproduce the selection, keeping original lines");
        return original_lines(lines, &targets);
    }

    let rewritten = AccessRewriter::new(change).rewrite(&root);
    let Some(file) = SourceFile::cast(rewritten) else {
        tracing::debug!("rewritten tree is not a source file, keeping original lines");
        return original_lines(lines, &targets);
    };

    let edits = content_by_line(&file, &targets);
    tracing::debug!(lines = edits.len(), %change, "computed line edits");
    edits
}

fn original_lines<S: AsRef<str>>(lines: &[S], targets: &[usize]) -> LineEdits {
    targets
        .iter()
        .map(|&line| (line, lines[line].as_ref().to_string()))
        .collect()
}
