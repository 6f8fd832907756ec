//! Line/offset conversion for a single text.
//!
//! Used to slice a re-serialized tree back into the lines it was built from.
//! `\n`, `\r\n` and a lone `\r` each terminate a line.

use text_size::TextSize;

/// A byte range within a text
pub type ByteRange = text_size::TextRange;

/// 1-based line and column (column counted in bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    pub line: usize,
    pub col: usize,
}

/// Start offsets of every line in a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![TextSize::new(0)];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                    i += 2;
                    line_starts.push(TextSize::new(i as u32));
                }
                b'\n' | b'\r' => {
                    i += 1;
                    line_starts.push(TextSize::new(i as u32));
                }
                _ => i += 1,
            }
        }
        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// The line the end of the text sits on.
    ///
    /// A text ending in a terminator has one more (empty) line than it has terminators.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Total length of the indexed text
    pub fn len(&self) -> TextSize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == TextSize::new(0)
    }

    /// Byte offset of column 1 of `line` (1-based), clamped to the end of the text
    pub fn line_start(&self, line: usize) -> TextSize {
        line.checked_sub(1)
            .and_then(|idx| self.line_starts.get(idx))
            .copied()
            .unwrap_or(self.len)
    }

    /// `[start of line, start of next line)`, or up to the end of the text for the last line
    pub fn line_range(&self, line: usize) -> ByteRange {
        if line == 0 || line > self.line_count() {
            return ByteRange::empty(self.len);
        }
        let start = self.line_start(line);
        let end = if line < self.line_count() {
            self.line_start(line + 1)
        } else {
            self.len
        };
        ByteRange::new(start, end)
    }

    /// Convert a byte offset to a 1-based line/column
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let idx = self.line_starts.partition_point(|&start| start <= offset) - 1;
        LineCol {
            line: idx + 1,
            col: usize::from(offset - self.line_starts[idx]) + 1,
        }
    }

    /// Convert a 1-based line/column back to a byte offset
    pub fn offset(&self, line_col: LineCol) -> TextSize {
        let start = self.line_start(line_col.line);
        let col = TextSize::new(line_col.col.saturating_sub(1) as u32);
        (start + col).min(self.line_range(line_col.line).end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_ranges() {
        let index = LineIndex::new("ab\ncd\n");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_range(1), ByteRange::new(0.into(), 3.into()));
        assert_eq!(index.line_range(2), ByteRange::new(3.into(), 6.into()));
        assert_eq!(index.line_range(3), ByteRange::new(6.into(), 6.into()));
    }

    #[test]
    fn test_last_line_without_terminator() {
        let index = LineIndex::new("ab\ncd");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.line_range(2), ByteRange::new(3.into(), 5.into()));
    }

    #[test]
    fn test_lines_past_the_end_are_empty() {
        let index = LineIndex::new("ab\n");
        assert!(index.line_range(7).is_empty());
        assert!(index.line_range(0).is_empty());
    }

    #[test]
    fn test_crlf_and_lone_cr() {
        let index = LineIndex::new("a\r\nb\rc");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_start(2), TextSize::new(3));
        assert_eq!(index.line_start(3), TextSize::new(5));
    }

    #[test]
    fn test_line_col_round_trip() {
        let index = LineIndex::new("func a() {}\n  var b = 1\n");
        let lc = index.line_col(TextSize::new(14));
        assert_eq!(lc, LineCol { line: 2, col: 3 });
        assert_eq!(index.offset(lc), TextSize::new(14));
    }
}
