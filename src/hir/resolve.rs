//! Per-request symbol index.
//!
//! A [`SymbolIndex`] maps [`QualifiedName`]s to the [`Declaration`]s visible
//! under them. It is built fresh for every scope request, merged from local,
//! imported and built-in contributions, and thrown away afterwards.
//!
//! ## Merge semantics
//!
//! The index is a set of (name, declaration) pairs kept in discovery order:
//! - inserting a pair twice is a no-op,
//! - one declaration may appear under many names (`N`, `M.N`, `pkg.M.N`),
//! - one name may map to several declarations. Collisions are a validation
//!   concern and are kept as-is; [`SymbolIndex::lookup`] returns the first.

use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHashMap};

use super::ids::DeclId;
use super::names::QualifiedName;
use super::syntax::Declaration;

// ============================================================================
// SYMBOL DESCRIPTION
// ============================================================================

/// One name under which a declaration is visible.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolDescription {
    pub name: QualifiedName,
    pub decl: Declaration,
}

impl SymbolDescription {
    pub fn new(name: QualifiedName, decl: Declaration) -> Self {
        Self { name, decl }
    }
}

// ============================================================================
// SYMBOL INDEX
// ============================================================================

/// Index into the entries set.
type EntryIdx = usize;

/// Name → declaration mapping for a single scope request.
#[derive(Clone, Debug, Default)]
pub struct SymbolIndex {
    /// All descriptions, deduplicated, in discovery order.
    entries: IndexSet<SymbolDescription, FxBuildHasher>,
    /// Index by qualified name -> entry indices (may have multiple).
    by_name: FxHashMap<QualifiedName, Vec<EntryIdx>>,
}

impl SymbolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a description. Returns `false` if the exact pair was already present.
    pub fn insert(&mut self, description: SymbolDescription) -> bool {
        if self.entries.contains(&description) {
            return false;
        }
        let name = description.name.clone();
        let (idx, _) = self.entries.insert_full(description);
        self.by_name.entry(name).or_default().push(idx);
        true
    }

    /// Merge another index into this one, keeping its discovery order.
    pub fn merge(&mut self, other: SymbolIndex) {
        self.extend(other.entries);
    }

    /// First declaration visible under `name`.
    pub fn lookup(&self, name: &QualifiedName) -> Option<&Declaration> {
        self.by_name
            .get(name)
            .and_then(|indices| indices.first())
            .and_then(|&idx| self.entries.get_index(idx))
            .map(|d| &d.decl)
    }

    /// Every declaration visible under `name`.
    pub fn lookup_all(&self, name: &QualifiedName) -> Vec<&Declaration> {
        self.by_name
            .get(name)
            .map(|indices| {
                indices
                    .iter()
                    .filter_map(|&idx| self.entries.get_index(idx))
                    .map(|d| &d.decl)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.by_name.contains_key(name)
    }

    /// All names a declaration is visible under, in discovery order.
    pub fn names_of(&self, decl: DeclId) -> Vec<&QualifiedName> {
        self.entries
            .iter()
            .filter(|d| d.decl.id == decl)
            .map(|d| &d.name)
            .collect()
    }

    /// Distinct names in the index, in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &QualifiedName> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(idx, d)| self.by_name.get(&d.name).and_then(|v| v.first()) == Some(idx))
            .map(|(_, d)| &d.name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymbolDescription> {
        self.entries.iter()
    }

    /// Number of (name, declaration) pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<SymbolDescription> for SymbolIndex {
    fn extend<T: IntoIterator<Item = SymbolDescription>>(&mut self, iter: T) {
        for description in iter {
            self.insert(description);
        }
    }
}

impl FromIterator<SymbolDescription> for SymbolIndex {
    fn from_iter<T: IntoIterator<Item = SymbolDescription>>(iter: T) -> Self {
        let mut index = SymbolIndex::new();
        index.extend(iter);
        index
    }
}

impl IntoIterator for SymbolIndex {
    type Item = SymbolDescription;
    type IntoIter = indexmap::set::IntoIter<SymbolDescription>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
