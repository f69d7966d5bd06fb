//! Foundation types for protoscope.
//!
//! - [`FileId`] - Resource identifiers handed out by the index
//! - [`TextRange`], [`TextSize`] - Source positions
//! - [`LineCol`] - Line/column positions for diagnostics
//!
//! This module has NO dependencies on other protoscope modules.

mod file_id;
mod span;

pub use file_id::FileId;
pub use span::{LineCol, TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
