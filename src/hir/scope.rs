//! Scope building: which names a `.proto` file can see.
//!
//! A file's scope for a given [`DeclFilter`] is the union of:
//!
//! 1. **Local types**: declarations of the file itself, visible under every
//!    name form that makes sense from the file's top level.
//! 2. **Imported types**: declarations of imported files. Files in a related
//!    package merge in as if they were local; files in unrelated packages are
//!    only reachable by fully qualified name. `import public` edges of
//!    imported files are followed transitively.
//! 3. **Built-in types**: importing the descriptor yields the fixed
//!    `google.protobuf` catalogue without touching any real file.
//!
//! Everything here is a pure walk over borrowed snapshots. Import failures
//! degrade to "no contribution" and never reach the caller.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::base::FileId;
use super::config::ScopeConfig;
use super::descriptor::builtin_types_at;
use super::input::{ImportResolver, Resolution};
use super::names::{Package, fully_qualified_name, local_names, packages_related};
use super::resolve::{SymbolDescription, SymbolIndex};
use super::syntax::{Decl, DeclFilter, Import, ParsedResource, ProtoFile};

/// (resource uri, importer package) pairs already walked in this request.
type Visited = FxHashSet<(Arc<str>, Package)>;

/// Builds type scopes for files, given the collaborators it needs.
///
/// Cheap to construct; build one per request or keep one around, it holds
/// no state between calls.
#[derive(Clone, Copy)]
pub struct TypeDescriptions<'a> {
    resolver: &'a dyn ImportResolver,
    config: &'a ScopeConfig,
}

impl<'a> TypeDescriptions<'a> {
    pub fn new(resolver: &'a dyn ImportResolver, config: &'a ScopeConfig) -> Self {
        Self { resolver, config }
    }

    /// Everything visible from the top level of `root`.
    pub fn types_in_scope(&self, root: &ProtoFile, filter: DeclFilter) -> SymbolIndex {
        let mut scope = self.local_types(root, filter);
        scope.merge(self.imported_types(root, filter));
        debug!(
            file = %root.uri(),
            ?filter,
            symbols = scope.len(),
            "built type scope"
        );
        scope
    }

    /// Declarations of `root` itself, as seen from its top level.
    pub fn local_types(&self, root: &ProtoFile, filter: DeclFilter) -> SymbolIndex {
        self.local_types_at(root, filter, 0)
    }

    /// Like [`local_types`](Self::local_types), but as if requested from
    /// `level` messages deep: name forms more local than `level` are dropped.
    pub fn local_types_at(&self, root: &ProtoFile, filter: DeclFilter, level: usize) -> SymbolIndex {
        let mut out = SymbolIndex::new();
        let mut collector = LocalCollector {
            file: root.file(),
            uri: root.uri(),
            package: root.package(),
            filter,
            ancestors: Vec::new(),
            out: &mut out,
        };
        collector.collect(root.decls(), level);
        out
    }

    /// Declarations reachable through the imports of `root`.
    pub fn imported_types(&self, root: &ProtoFile, filter: DeclFilter) -> SymbolIndex {
        let mut out = SymbolIndex::new();
        if root.imports().is_empty() {
            return out;
        }
        let mut visited = Visited::default();
        self.walk_imports(root.imports(), false, root.package(), filter, &mut visited, &mut out);
        out
    }

    fn walk_imports(
        &self,
        imports: &[Import],
        public_only: bool,
        package: &Package,
        filter: DeclFilter,
        visited: &mut Visited,
        out: &mut SymbolIndex,
    ) {
        for import in imports.iter().filter(|i| !public_only || i.is_public()) {
            if self.config.is_descriptor_import(&import.path) {
                trace!(import = %import.path, "import resolves to built-in descriptor");
                out.extend(builtin_types_at(filter, &self.config.descriptor_import));
                continue;
            }

            let resource = match self.resolver.resolve(&import.path) {
                Resolution::Resolved(resource) => resource,
                Resolution::Unreachable(err) => {
                    debug!(import = %import.path, error = %err, "import contributes no symbols");
                    continue;
                }
            };

            if !visited.insert((resource.uri().clone(), package.clone())) {
                trace!(import = %import.path, %package, "import already walked, skipping");
                continue;
            }

            if let Some(imported) = resource.root() {
                if self.config.follow_public_imports {
                    self.walk_imports(imported.imports(), true, imported.package(), filter, visited, out);
                }
                if packages_related(package, imported.package()) {
                    trace!(
                        import = %import.path,
                        package = %imported.package(),
                        "related package, merging as local types"
                    );
                    out.merge(self.local_types(imported, filter));
                    continue;
                }
            }

            trace!(import = %import.path, "collecting fully qualified declarations");
            out.extend(qualified_declarations(&resource, filter));
        }
    }
}

impl std::fmt::Debug for TypeDescriptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeDescriptions")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// LOCAL COLLECTION
// ============================================================================

struct LocalCollector<'r, 'o> {
    file: FileId,
    uri: &'r Arc<str>,
    package: &'r Package,
    filter: DeclFilter,
    /// Names of the enclosing messages, outermost first.
    ancestors: Vec<SmolStr>,
    out: &'o mut SymbolIndex,
}

impl LocalCollector<'_, '_> {
    fn collect(&mut self, decls: &[Decl], level: usize) {
        for decl in decls {
            if self.filter.accepts(decl.kind) {
                let declaration = decl.to_declaration(self.file, self.uri);
                for name in local_names(&decl.name, &self.ancestors, self.package)
                    .into_iter()
                    .skip(level)
                {
                    self.out.insert(SymbolDescription::new(name, declaration.clone()));
                }
                let fqn = fully_qualified_name(&decl.name, &self.ancestors, self.package);
                self.out.insert(SymbolDescription::new(fqn, declaration));
            }
            if decl.kind.is_message_like() {
                self.ancestors.push(decl.name.clone());
                self.collect(&decl.children, level + 1);
                self.ancestors.pop();
            }
        }
    }
}

// ============================================================================
// FULL SCAN
// ============================================================================

/// Every declaration in `resource` matching `filter`, under its fully
/// qualified name. Walks the whole tree, not just message nesting.
pub fn qualified_declarations(resource: &ParsedResource, filter: DeclFilter) -> Vec<SymbolDescription> {
    let package = resource.package();
    let mut out = Vec::new();
    let mut ancestors = Vec::new();
    scan(
        resource.decls(),
        resource.file(),
        resource.uri(),
        &package,
        filter,
        &mut ancestors,
        &mut out,
    );
    out
}

fn scan(
    decls: &[Decl],
    file: FileId,
    uri: &Arc<str>,
    package: &Package,
    filter: DeclFilter,
    ancestors: &mut Vec<SmolStr>,
    out: &mut Vec<SymbolDescription>,
) {
    for decl in decls {
        if filter.accepts(decl.kind) {
            out.push(SymbolDescription::new(
                fully_qualified_name(&decl.name, ancestors, package),
                decl.to_declaration(file, uri),
            ));
        }
        if decl.children.is_empty() {
            continue;
        }
        let opens = decl.kind.opens_scope();
        if opens {
            ancestors.push(decl.name.clone());
        }
        scan(&decl.children, file, uri, package, filter, ancestors, out);
        if opens {
            ancestors.pop();
        }
    }
}
