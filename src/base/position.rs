//! Position tracking for host selections
//!
//! Coordinates use the host buffer's native indexing: lines index directly
//! into the buffer's line sequence, columns count from the start of the line.

/// A position in a host text buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextPosition {
    pub line: usize,
    pub column: usize,
}

/// A selection range in a host text buffer (start and end inclusive of the caret positions)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextRange {
    pub start: TextPosition,
    pub end: TextPosition,
}

impl TextPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl TextRange {
    pub fn new(start: TextPosition, end: TextPosition) -> Self {
        Self { start, end }
    }

    /// Create a range from line/column coordinates
    pub fn from_coords(
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start: TextPosition::new(start_line, start_col),
            end: TextPosition::new(end_line, end_col),
        }
    }

    /// A caret with nothing selected
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of lines touched, counting both end lines
    pub fn length(&self) -> usize {
        (self.end.line + 1).saturating_sub(self.start.line)
    }
}
