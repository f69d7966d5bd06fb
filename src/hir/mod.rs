//! High-level IR: file snapshots, names, and scope building.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! scope       → local/imported/built-in type collection
//!   ↓
//! resolve     → per-request SymbolIndex
//! descriptor  → built-in descriptor catalogue
//!   ↓
//! input       → ResourceIndex / ImportResolver collaborators
//! source      → in-memory ResourceSet
//!   ↓
//! syntax      → ProtoFile snapshots and declarations
//! names       → QualifiedName, Package, name forms
//! ids         → DeclId
//! ```

mod config;
mod descriptor;
mod ids;
mod input;
mod names;
mod resolve;
mod scope;
mod source;
mod syntax;

pub use config::{DEFAULT_DESCRIPTOR_IMPORT, ScopeConfig};
pub use descriptor::{BuiltinDescriptor, builtin_types, builtin_types_at};
pub use ids::{DeclId, LocalDeclId};
pub use input::{ImportResolver, Resolution, ResolveError, ResourceIndex};
pub use names::{Package, QualifiedName, fully_qualified_name, local_names, packages_related};
pub use resolve::{SymbolDescription, SymbolIndex};
pub use scope::{TypeDescriptions, qualified_declarations};
pub use source::ResourceSet;
pub use syntax::{
    Decl, DeclBuilder, DeclFilter, DeclKind, Declaration, Import, ImportKind, ParsedResource,
    ProtoFile, ProtoFileBuilder, ResourceContents,
};
