//! # protoscope-base
//!
//! Symbol scoping, import resolution and navigation for protocol-buffer
//! `.proto` files, for use inside an editor host.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide         → navigation entry points (go to definition)
//!   ↓
//! hir         → file snapshots, qualified names, scope building
//!   ↓
//! conversion  → literal value converters
//! base        → primitives (FileId, TextRange, LineCol)
//! ```
//!
//! The host owns parsing and indexing. It hands this crate [`hir::ProtoFile`]
//! snapshots through the [`hir::ResourceIndex`] and [`hir::ImportResolver`]
//! traits, and gets back name → declaration mappings.

/// Foundation types: FileId, TextRange, LineCol
pub mod base;

/// Literal conversion with located errors
pub mod conversion;

/// Snapshots, names, and scope building
pub mod hir;

/// IDE features: navigate to definition
pub mod ide;

pub use base::{FileId, LineCol, TextRange, TextSize};
pub use conversion::ConversionError;
pub use hir::{QualifiedName, ScopeConfig, SymbolIndex, TypeDescriptions};
