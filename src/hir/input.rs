//! Collaborators the scoping engine consumes.
//!
//! The host owns indexing and parsing. This crate only asks two questions of
//! it: "what is indexed at this path?" ([`ResourceIndex`]) and "what does this
//! import uri resolve to?" ([`ImportResolver`]). Both are synchronous from the
//! engine's point of view; a host backed by a cache simply answers "not found"
//! for anything not loaded yet.

use std::sync::Arc;

use thiserror::Error;

use super::syntax::ParsedResource;

/// Why an import target could not be turned into a parsed resource.
///
/// These are expected in incomplete projects and are never surfaced to the
/// user; the import simply contributes no symbols.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Nothing is indexed under the uri.
    #[error("resource not found: {uri}")]
    NotFound { uri: Arc<str> },

    /// The resource exists but could not be parsed at all.
    #[error("resource {uri} could not be parsed: {reason}")]
    Unparseable { uri: Arc<str>, reason: Arc<str> },
}

impl ResolveError {
    pub fn not_found(uri: impl Into<Arc<str>>) -> Self {
        Self::NotFound { uri: uri.into() }
    }

    pub fn unparseable(uri: impl Into<Arc<str>>, reason: impl Into<Arc<str>>) -> Self {
        Self::Unparseable {
            uri: uri.into(),
            reason: reason.into(),
        }
    }

    /// The uri that failed to resolve.
    pub fn uri(&self) -> &str {
        match self {
            Self::NotFound { uri } | Self::Unparseable { uri, .. } => uri,
        }
    }
}

/// Outcome of resolving an import.
#[derive(Clone, Debug)]
pub enum Resolution {
    Resolved(Arc<ParsedResource>),
    Unreachable(ResolveError),
}

impl Resolution {
    /// The resource, if resolution succeeded.
    pub fn resource(&self) -> Option<&Arc<ParsedResource>> {
        match self {
            Resolution::Resolved(resource) => Some(resource),
            Resolution::Unreachable(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

impl From<Result<Arc<ParsedResource>, ResolveError>> for Resolution {
    fn from(result: Result<Arc<ParsedResource>, ResolveError>) -> Self {
        match result {
            Ok(resource) => Resolution::Resolved(resource),
            Err(err) => Resolution::Unreachable(err),
        }
    }
}

/// Resolves import uris into parsed resources.
pub trait ImportResolver {
    fn resolve(&self, uri: &str) -> Resolution;
}

/// Looks up indexed resources by file path.
pub trait ResourceIndex {
    fn resource_at(&self, path: &str) -> Option<Arc<ParsedResource>>;
}

impl<T: ImportResolver + ?Sized> ImportResolver for &T {
    fn resolve(&self, uri: &str) -> Resolution {
        (**self).resolve(uri)
    }
}

impl<T: ResourceIndex + ?Sized> ResourceIndex for &T {
    fn resource_at(&self, path: &str) -> Option<Arc<ParsedResource>> {
        (**self).resource_at(path)
    }
}
