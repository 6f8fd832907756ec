//! Foundation types for access-ninja.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`TextPosition`], [`TextRange`] - Host selection coordinates (line/column)
//! - [`LineIndex`], [`LineCol`] - Byte offset ↔ line conversion for a parsed text
//! - [`TextSize`], [`ByteRange`] - Byte offsets within a text
//!
//! This module has NO dependencies on other access-ninja modules.

mod line_index;
mod position;

pub use line_index::{ByteRange, LineCol, LineIndex};
pub use position::{TextPosition, TextRange};

// Re-export text-size types for convenience
pub use text_size;
pub use text_size::TextSize;
