//! Navigate-to-definition.
//!
//! Given candidate qualified names and the file they were written in, open the
//! first declaration any of them resolves to. Candidates are tried in the
//! order the caller supplies; the first hit wins.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::base::TextRange;
use crate::hir::{
    DeclFilter, Declaration, ImportResolver, ParsedResource, QualifiedName, ResourceIndex,
    ScopeConfig, SymbolIndex, TypeDescriptions, qualified_declarations,
};

/// Outcome of a navigation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationStatus {
    /// A declaration was found and the editor was asked to open it.
    Success,
    /// The file isn't indexed, or none of the candidates resolved.
    Cancelled,
}

/// Where a declaration lives.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pub uri: Arc<str>,
    pub range: TextRange,
}

impl From<&Declaration> for Location {
    fn from(decl: &Declaration) -> Self {
        Self {
            uri: decl.uri.clone(),
            range: decl.range,
        }
    }
}

/// Host callback that opens an editor on a location.
pub trait EditorOpener {
    fn open(&mut self, location: &Location, activate: bool);
}

/// Information needed to find the declaration to navigate to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    /// Every name the declaration may have, in the order to try them.
    pub qualified_names: Vec<QualifiedName>,
    /// Path of the file the lookup happens in.
    pub file_path: Arc<str>,
}

impl Query {
    pub fn new(
        qualified_names: impl IntoIterator<Item = QualifiedName>,
        file_path: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            qualified_names: qualified_names.into_iter().collect(),
            file_path: file_path.into(),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.qualified_names.iter().map(ToString::to_string).collect();
        write!(
            f,
            "Query[qualifiedNames=[{}], filePath={}]",
            names.join(", "),
            self.file_path
        )
    }
}

/// Resolves navigation queries against the index and scope machinery.
pub struct Navigator<'a> {
    index: &'a dyn ResourceIndex,
    resolver: &'a dyn ImportResolver,
    config: &'a ScopeConfig,
}

impl<'a> Navigator<'a> {
    pub fn new(
        index: &'a dyn ResourceIndex,
        resolver: &'a dyn ImportResolver,
        config: &'a ScopeConfig,
    ) -> Self {
        Self {
            index,
            resolver,
            config,
        }
    }

    /// Open the declaration the first resolvable candidate names.
    ///
    /// `opener` is called at most once, and only on [`NavigationStatus::Success`].
    pub fn navigate(&self, query: &Query, opener: &mut dyn EditorOpener) -> NavigationStatus {
        let Some(resource) = self.index.resource_at(&query.file_path) else {
            debug!(%query, "navigation cancelled: file is not indexed");
            return NavigationStatus::Cancelled;
        };

        let scope = self.scope_of(&resource);
        for name in &query.qualified_names {
            if let Some(decl) = scope.lookup(name) {
                debug!(%name, kind = decl.kind.display(), uri = %decl.uri, "navigating to declaration");
                opener.open(&Location::from(decl), self.config.activate_editor);
                return NavigationStatus::Success;
            }
        }

        debug!(%query, "navigation cancelled: no candidate resolved");
        NavigationStatus::Cancelled
    }

    /// Resolve a single name from `file_path` without opening anything.
    pub fn find(&self, file_path: &str, name: &QualifiedName) -> Option<Declaration> {
        let resource = self.index.resource_at(file_path)?;
        self.scope_of(&resource).lookup(name).cloned()
    }

    /// Everything the resource can name: its scope, plus every declaration it
    /// exports under a fully qualified name.
    fn scope_of(&self, resource: &ParsedResource) -> SymbolIndex {
        let mut scope = match resource.root() {
            Some(root) => {
                TypeDescriptions::new(self.resolver, self.config).types_in_scope(root, DeclFilter::All)
            }
            None => SymbolIndex::new(),
        };
        scope.extend(qualified_declarations(resource, DeclFilter::All));
        scope
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hir::{ProtoFile, ResourceSet};

    #[derive(Default)]
    struct RecordingOpener {
        opened: Vec<(Location, bool)>,
    }

    impl EditorOpener for RecordingOpener {
        fn open(&mut self, location: &Location, activate: bool) {
            self.opened.push((location.clone(), activate));
        }
    }

    fn names(names: &[&str]) -> Vec<QualifiedName> {
        names.iter().map(|n| QualifiedName::parse(n)).collect()
    }

    #[test]
    fn test_query_display() {
        let query = Query::new(names(&["Foo.Bar", "Bar"]), "a.proto");
        assert_eq!(
            query.to_string(),
            "Query[qualifiedNames=[Foo.Bar, Bar], filePath=a.proto]"
        );
    }

    #[test]
    fn test_unindexed_file_cancels() {
        let set = ResourceSet::new();
        let config = ScopeConfig::default();
        let navigator = Navigator::new(&set, &set, &config);
        let mut opener = RecordingOpener::default();

        let status = navigator.navigate(&Query::new(names(&["Bar"]), "a.proto"), &mut opener);

        assert_eq!(status, NavigationStatus::Cancelled);
        assert!(opener.opened.is_empty());
    }

    #[test]
    fn test_find_without_opening() {
        let set = ResourceSet::new();
        let id = set.file_id("a.proto");
        set.insert(ProtoFile::builder(id, "a.proto").message("Bar", |m| m).build());
        let config = ScopeConfig::default();
        let navigator = Navigator::new(&set, &set, &config);

        let found = navigator.find("a.proto", &QualifiedName::parse("Bar"));
        assert_eq!(found.map(|d| d.name.to_string()), Some("Bar".to_string()));
        assert!(navigator.find("a.proto", &QualifiedName::parse("Nope")).is_none());
    }

    #[test]
    fn test_activate_flag_from_config() {
        let set = ResourceSet::new();
        let id = set.file_id("a.proto");
        set.insert(ProtoFile::builder(id, "a.proto").message("Bar", |m| m).build());
        let config = ScopeConfig::default().with_activate_editor(false);
        let navigator = Navigator::new(&set, &set, &config);
        let mut opener = RecordingOpener::default();

        navigator.navigate(&Query::new(names(&["Bar"]), "a.proto"), &mut opener);

        assert_eq!(opener.opened.len(), 1);
        assert!(!opener.opened[0].1);
    }
}
