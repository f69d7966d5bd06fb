//! Identifiers for indexed `.proto` resources.

use std::fmt;

/// An interned identifier for a parsed resource.
///
/// `FileId` is a lightweight handle (just a u32) handed out by the resource
/// index. The uri and contents live with the index, not here.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FileId(pub u32);

impl FileId {
    /// Reserved id for the built-in descriptor catalogue.
    pub const BUILTIN: FileId = FileId(u32::MAX);

    /// Create a new FileId from a raw index.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Whether this id denotes the built-in descriptor rather than a real file.
    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_builtin() {
            write!(f, "FileId(builtin)")
        } else {
            write!(f, "FileId({})", self.0)
        }
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_builtin() {
            write!(f, "builtin")
        } else {
            write!(f, "file#{}", self.0)
        }
    }
}

impl From<u32> for FileId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}
