use crate::base::TextRange;

use super::LineEdits;

/// A host text buffer: lines (with terminators), selections, and a content type
pub trait TextBuffer {
    /// Uniform type identifier of the content, e.g. `public.swift-source`
    fn content_type(&self) -> &str;

    fn lines(&self) -> &[String];

    fn selections(&self) -> &[TextRange];

    /// Replace the full text of line `index`
    fn replace_line(&mut self, index: usize, text: String);
}

/// In-memory buffer, mainly for tests and command-line use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBuffer {
    content_type: String,
    lines: Vec<String>,
    selections: Vec<TextRange>,
}

impl SourceBuffer {
    /// Split `text` into lines that keep their terminators
    pub fn from_text(content_type: impl Into<String>, text: &str) -> Self {
        Self {
            content_type: content_type.into(),
            lines: split_lines(text),
            selections: Vec::new(),
        }
    }

    pub fn with_selections(mut self, selections: impl IntoIterator<Item = TextRange>) -> Self {
        self.selections = selections.into_iter().collect();
        self
    }

    /// The whole buffer as one string
    pub fn text(&self) -> String {
        self.lines.concat()
    }
}

impl TextBuffer for SourceBuffer {
    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn lines(&self) -> &[String] {
        &self.lines
    }

    fn selections(&self) -> &[TextRange] {
        &self.selections
    }

    fn replace_line(&mut self, index: usize, text: String) {
        if let Some(line) = self.lines.get_mut(index) {
            *line = text;
        }
    }
}

fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let end = match rest.find(['\n', '\r']) {
            Some(i) if rest[i..].starts_with("\r\n") => i + 2,
            Some(i) => i + 1,
            None => rest.len(),
        };
        let (line, tail) = rest.split_at(end);
        lines.push(line.to_string());
        rest = tail;
    }
    lines
}

/// Write `edits` back into `buffer`, skipping lines it does not have
pub fn apply_edits<B: TextBuffer + ?Sized>(buffer: &mut B, edits: &LineEdits) {
    let total = buffer.lines().len();
    for (&index, text) in edits {
        if index >= total {
            tracing::debug!(index, total, "edit outside the buffer skipped");
            continue;
        }
        buffer.replace_line(index, text.clone());
    }
}
