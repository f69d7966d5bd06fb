//! Immutable snapshots of parsed `.proto` files.
//!
//! The host parser owns the live syntax tree. What reaches this crate is a
//! [`ProtoFile`] snapshot: package, imports, and a tree of [`Decl`] nodes.
//! Resolution results never borrow the tree; they copy out [`Declaration`]
//! records instead.

use std::fmt;
use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::{FileId, TextRange, TextSize};
use super::ids::{DeclId, LocalDeclId};
use super::names::Package;

// ============================================================================
// DECLARATION KINDS
// ============================================================================

/// What a declaration node declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Message,
    /// proto2 `group`, a message declared inline with its field.
    Group,
    Enum,
    /// An enum value.
    Literal,
    Field,
    Service,
    Rpc,
}

impl DeclKind {
    /// Messages, groups and enums can be used as field types.
    pub fn is_type(self) -> bool {
        matches!(self, DeclKind::Message | DeclKind::Group | DeclKind::Enum)
    }

    /// Message-like declarations may contain nested type declarations.
    pub fn is_message_like(self) -> bool {
        matches!(self, DeclKind::Message | DeclKind::Group)
    }

    /// Whether children of this declaration get its name as a qualifier.
    ///
    /// Enum values live in the scope enclosing their enum, so an enum does not
    /// open a naming scope.
    pub fn opens_scope(self) -> bool {
        matches!(self, DeclKind::Message | DeclKind::Group | DeclKind::Service)
    }

    pub fn display(self) -> &'static str {
        match self {
            DeclKind::Message => "message",
            DeclKind::Group => "group",
            DeclKind::Enum => "enum",
            DeclKind::Literal => "enum value",
            DeclKind::Field => "field",
            DeclKind::Service => "service",
            DeclKind::Rpc => "rpc",
        }
    }
}

/// Which declarations a scope request is interested in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DeclFilter {
    /// Every declaration kind.
    All,
    /// Anything usable as a field type (messages, groups, enums).
    #[default]
    Types,
    /// Messages and groups.
    Messages,
    Enums,
    Fields,
    /// Exactly one kind.
    Kind(DeclKind),
}

impl DeclFilter {
    pub fn accepts(self, kind: DeclKind) -> bool {
        match self {
            DeclFilter::All => true,
            DeclFilter::Types => kind.is_type(),
            DeclFilter::Messages => kind.is_message_like(),
            DeclFilter::Enums => kind == DeclKind::Enum,
            DeclFilter::Fields => kind == DeclKind::Field,
            DeclFilter::Kind(k) => kind == k,
        }
    }
}

// ============================================================================
// TREE NODES
// ============================================================================

/// A declaration node in a file snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decl {
    pub id: LocalDeclId,
    pub kind: DeclKind,
    pub name: SmolStr,
    pub range: TextRange,
    pub children: Vec<Decl>,
}

impl Decl {
    /// Copy this node out as a self-contained record.
    pub fn to_declaration(&self, file: FileId, uri: &Arc<str>) -> Declaration {
        Declaration {
            id: DeclId::new(file, self.id),
            kind: self.kind,
            name: self.name.clone(),
            uri: uri.clone(),
            range: self.range,
        }
    }
}

/// A declaration copied out of a syntax tree.
///
/// This is what scopes and navigation hand back. It stays valid after the
/// file it came from is re-parsed; only its `id` goes stale.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Declaration {
    pub id: DeclId,
    pub kind: DeclKind,
    pub name: SmolStr,
    /// Uri of the resource declaring it.
    pub uri: Arc<str>,
    pub range: TextRange,
}

/// How an import re-exports the imported file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImportKind {
    Plain,
    /// `import public`: visible to importers of the importer.
    Public,
    /// `import weak`: treated like a plain import for scoping.
    Weak,
}

/// An `import "path";` statement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Import {
    pub path: SmolStr,
    pub kind: ImportKind,
}

impl Import {
    pub fn new(path: impl Into<SmolStr>, kind: ImportKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn is_public(&self) -> bool {
        self.kind == ImportKind::Public
    }
}

/// The typed root of a parsed `.proto` file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtoFile {
    file: FileId,
    uri: Arc<str>,
    package: Package,
    imports: Vec<Import>,
    decls: Vec<Decl>,
}

impl ProtoFile {
    /// Start building a file snapshot.
    pub fn builder(file: FileId, uri: impl Into<Arc<str>>) -> ProtoFileBuilder {
        ProtoFileBuilder {
            file,
            uri: uri.into(),
            package: Package::default(),
            imports: Vec::new(),
            body: DeclBuilder::new(0),
        }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn uri(&self) -> &Arc<str> {
        &self.uri
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    /// All imports in declaration order.
    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    /// Only the `import public` statements, in declaration order.
    pub fn public_imports(&self) -> impl Iterator<Item = &Import> {
        self.imports.iter().filter(|i| i.is_public())
    }

    /// Top-level declarations.
    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }
}

// ============================================================================
// PARSED RESOURCE
// ============================================================================

/// What the parser managed to produce for a resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResourceContents {
    /// A complete typed root.
    Proto(ProtoFile),
    /// Declarations recovered from a file whose root could not be built.
    /// They carry no package or imports.
    Fragments(Vec<Decl>),
}

/// A resource as held by the index: possibly stale, possibly partial.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedResource {
    file: FileId,
    uri: Arc<str>,
    contents: ResourceContents,
}

impl ParsedResource {
    pub fn new(file: FileId, uri: impl Into<Arc<str>>, contents: ResourceContents) -> Self {
        Self {
            file,
            uri: uri.into(),
            contents,
        }
    }

    pub fn file(&self) -> FileId {
        self.file
    }

    pub fn uri(&self) -> &Arc<str> {
        &self.uri
    }

    pub fn contents(&self) -> &ResourceContents {
        &self.contents
    }

    /// The typed root, if the parser produced one.
    pub fn root(&self) -> Option<&ProtoFile> {
        match &self.contents {
            ResourceContents::Proto(root) => Some(root),
            ResourceContents::Fragments(_) => None,
        }
    }

    /// Top-level declarations, whatever shape the contents have.
    pub fn decls(&self) -> &[Decl] {
        match &self.contents {
            ResourceContents::Proto(root) => root.decls(),
            ResourceContents::Fragments(decls) => decls,
        }
    }

    /// Package of the resource; recovered fragments sit in the default package.
    pub fn package(&self) -> Package {
        self.root().map(|r| r.package().clone()).unwrap_or_default()
    }
}

impl From<ProtoFile> for ParsedResource {
    fn from(root: ProtoFile) -> Self {
        Self {
            file: root.file,
            uri: root.uri.clone(),
            contents: ResourceContents::Proto(root),
        }
    }
}

impl fmt::Display for ParsedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.uri, self.file)
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

/// Builds a [`ProtoFile`] snapshot, assigning [`LocalDeclId`]s in pre-order.
#[derive(Debug)]
pub struct ProtoFileBuilder {
    file: FileId,
    uri: Arc<str>,
    package: Package,
    imports: Vec<Import>,
    body: DeclBuilder,
}

impl ProtoFileBuilder {
    pub fn package(mut self, dotted: &str) -> Self {
        self.package = Package::parse(dotted);
        self
    }

    pub fn import(mut self, path: impl Into<SmolStr>) -> Self {
        self.imports.push(Import::new(path, ImportKind::Plain));
        self
    }

    pub fn public_import(mut self, path: impl Into<SmolStr>) -> Self {
        self.imports.push(Import::new(path, ImportKind::Public));
        self
    }

    pub fn weak_import(mut self, path: impl Into<SmolStr>) -> Self {
        self.imports.push(Import::new(path, ImportKind::Weak));
        self
    }

    pub fn message(mut self, name: &str, body: impl FnOnce(DeclBuilder) -> DeclBuilder) -> Self {
        self.body = self.body.message(name, body);
        self
    }

    pub fn enumeration(mut self, name: &str, body: impl FnOnce(DeclBuilder) -> DeclBuilder) -> Self {
        self.body = self.body.enumeration(name, body);
        self
    }

    pub fn service(mut self, name: &str, body: impl FnOnce(DeclBuilder) -> DeclBuilder) -> Self {
        self.body = self.body.service(name, body);
        self
    }

    pub fn decl_at(
        mut self,
        kind: DeclKind,
        name: &str,
        range: TextRange,
        body: impl FnOnce(DeclBuilder) -> DeclBuilder,
    ) -> Self {
        self.body = self.body.decl_at(kind, name, range, body);
        self
    }

    pub fn build(self) -> ProtoFile {
        ProtoFile {
            file: self.file,
            uri: self.uri,
            package: self.package,
            imports: self.imports,
            decls: self.body.children,
        }
    }

    /// Build a resource that lost its typed root, keeping only declarations.
    pub fn build_fragments(self) -> ParsedResource {
        ParsedResource::new(
            self.file,
            self.uri,
            ResourceContents::Fragments(self.body.children),
        )
    }
}

/// Builds the children of one declaration.
#[derive(Debug)]
pub struct DeclBuilder {
    next_id: u32,
    children: Vec<Decl>,
}

impl DeclBuilder {
    fn new(next_id: u32) -> Self {
        Self {
            next_id,
            children: Vec::new(),
        }
    }

    /// Add a child of any kind with an explicit source range.
    pub fn decl_at(
        mut self,
        kind: DeclKind,
        name: &str,
        range: TextRange,
        body: impl FnOnce(DeclBuilder) -> DeclBuilder,
    ) -> Self {
        let id = LocalDeclId::new(self.next_id);
        let inner = body(DeclBuilder::new(self.next_id + 1));
        self.next_id = inner.next_id;
        self.children.push(Decl {
            id,
            kind,
            name: SmolStr::new(name),
            range,
            children: inner.children,
        });
        self
    }

    fn decl(self, kind: DeclKind, name: &str, body: impl FnOnce(DeclBuilder) -> DeclBuilder) -> Self {
        self.decl_at(kind, name, TextRange::empty(TextSize::from(0)), body)
    }

    pub fn message(self, name: &str, body: impl FnOnce(DeclBuilder) -> DeclBuilder) -> Self {
        self.decl(DeclKind::Message, name, body)
    }

    pub fn group(self, name: &str, body: impl FnOnce(DeclBuilder) -> DeclBuilder) -> Self {
        self.decl(DeclKind::Group, name, body)
    }

    pub fn enumeration(self, name: &str, body: impl FnOnce(DeclBuilder) -> DeclBuilder) -> Self {
        self.decl(DeclKind::Enum, name, body)
    }

    pub fn service(self, name: &str, body: impl FnOnce(DeclBuilder) -> DeclBuilder) -> Self {
        self.decl(DeclKind::Service, name, body)
    }

    pub fn literal(self, name: &str) -> Self {
        self.decl(DeclKind::Literal, name, |b| b)
    }

    pub fn field(self, name: &str) -> Self {
        self.decl(DeclKind::Field, name, |b| b)
    }

    pub fn rpc(self, name: &str) -> Self {
        self.decl(DeclKind::Rpc, name, |b| b)
    }
}
