//! In-memory resource set.
//!
//! [`ResourceSet`] is the simplest host-side store that satisfies both
//! [`ResourceIndex`] and [`ImportResolver`]: it assigns stable [`FileId`]s to
//! uris, holds the latest parsed snapshot for each, and remembers resources
//! that failed to parse.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::warn;

use crate::base::FileId;
use super::input::{ImportResolver, Resolution, ResolveError, ResourceIndex};
use super::syntax::ParsedResource;

#[derive(Clone, Debug)]
enum Entry {
    Parsed(Arc<ParsedResource>),
    Failed(Arc<str>),
}

/// Uri-keyed store of parsed resources.
///
/// Readers get `Arc` snapshots, so a resource replaced mid-request stays
/// valid for whoever already holds it.
#[derive(Debug, Default)]
pub struct ResourceSet {
    inner: RwLock<ResourceSetInner>,
}

#[derive(Debug, Default)]
struct ResourceSetInner {
    /// Uri → FileId mapping
    uri_to_id: IndexMap<Arc<str>, FileId>,
    /// FileId → Uri mapping (reverse lookup)
    id_to_uri: IndexMap<FileId, Arc<str>>,
    /// FileId → latest parse outcome
    entries: IndexMap<FileId, Entry>,
    /// Next FileId to assign
    next_id: u32,
}

fn normalize(uri: &str) -> &str {
    uri.trim_start_matches("./")
}

impl ResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a FileId for a uri.
    pub fn file_id(&self, uri: &str) -> FileId {
        let uri = normalize(uri);
        // Fast path: read lock
        {
            let inner = self.inner.read();
            if let Some(&id) = inner.uri_to_id.get(uri) {
                return id;
            }
        }

        // Slow path: write lock
        let mut inner = self.inner.write();

        // Double-check
        if let Some(&id) = inner.uri_to_id.get(uri) {
            return id;
        }

        let id = FileId::new(inner.next_id);
        inner.next_id += 1;
        let uri: Arc<str> = Arc::from(uri);
        inner.uri_to_id.insert(uri.clone(), id);
        inner.id_to_uri.insert(id, uri);
        id
    }

    /// Store (or replace) the parsed snapshot of a resource.
    ///
    /// The snapshot's own `FileId` wins: if the uri was known under another
    /// id, the old entry goes; if the id belonged to another uri, that uri is
    /// forgotten so it never resolves to this snapshot.
    pub fn insert(&self, resource: impl Into<ParsedResource>) {
        let resource: ParsedResource = resource.into();
        let id = resource.file();
        let uri: Arc<str> = Arc::from(normalize(resource.uri()));

        let mut inner = self.inner.write();
        if let Some(previous) = inner.uri_to_id.insert(uri.clone(), id) {
            if previous != id {
                inner.id_to_uri.swap_remove(&previous);
                inner.entries.swap_remove(&previous);
            }
        }
        if let Some(owner) = inner.id_to_uri.insert(id, uri.clone()) {
            if owner != uri {
                warn!(%id, evicted = %owner, %uri, "file id reassigned to a different uri");
                inner.uri_to_id.swap_remove(&owner);
            }
        }
        if !id.is_builtin() && id.index() >= inner.next_id {
            inner.next_id = id.index() + 1;
        }
        inner.entries.insert(id, Entry::Parsed(Arc::new(resource)));
    }

    /// Record that a resource exists but could not be parsed.
    pub fn mark_unparseable(&self, uri: &str, reason: impl Into<Arc<str>>) {
        let id = self.file_id(uri);
        self.inner.write().entries.insert(id, Entry::Failed(reason.into()));
    }

    /// Remove a resource entirely.
    pub fn remove(&self, uri: &str) {
        let mut inner = self.inner.write();
        if let Some(id) = inner.uri_to_id.swap_remove(normalize(uri)) {
            inner.id_to_uri.swap_remove(&id);
            inner.entries.swap_remove(&id);
        }
    }

    /// The latest parsed snapshot for a uri.
    pub fn get(&self, uri: &str) -> Option<Arc<ParsedResource>> {
        let inner = self.inner.read();
        let id = inner.uri_to_id.get(normalize(uri))?;
        match inner.entries.get(id)? {
            Entry::Parsed(resource) => Some(resource.clone()),
            Entry::Failed(_) => None,
        }
    }

    /// The uri for a FileId.
    pub fn uri(&self, file: FileId) -> Option<Arc<str>> {
        self.inner.read().id_to_uri.get(&file).cloned()
    }

    /// Number of uris with an entry (parsed or failed).
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ImportResolver for ResourceSet {
    fn resolve(&self, uri: &str) -> Resolution {
        let inner = self.inner.read();
        let entry = inner
            .uri_to_id
            .get(normalize(uri))
            .and_then(|id| inner.entries.get(id));
        match entry {
            Some(Entry::Parsed(resource)) => Resolution::Resolved(resource.clone()),
            Some(Entry::Failed(reason)) => {
                Resolution::Unreachable(ResolveError::unparseable(uri, reason.clone()))
            }
            None => Resolution::Unreachable(ResolveError::not_found(uri)),
        }
    }
}

impl ResourceIndex for ResourceSet {
    fn resource_at(&self, path: &str) -> Option<Arc<ParsedResource>> {
        self.get(path)
    }
}
