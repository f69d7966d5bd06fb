//! Scoping options.

use smol_str::SmolStr;

/// Import path of the descriptor that short-circuits to the built-in types.
pub const DEFAULT_DESCRIPTOR_IMPORT: &str = "google/protobuf/descriptor.proto";

/// Knobs a host can set on scope building and navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScopeConfig {
    /// Import path treated as the built-in descriptor.
    pub descriptor_import: SmolStr,
    /// Whether `import public` statements of imported files are followed.
    pub follow_public_imports: bool,
    /// Passed to the editor when navigation opens a declaration.
    pub activate_editor: bool,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            descriptor_import: SmolStr::new_static(DEFAULT_DESCRIPTOR_IMPORT),
            follow_public_imports: true,
            activate_editor: true,
        }
    }
}

impl ScopeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_descriptor_import(mut self, path: impl Into<SmolStr>) -> Self {
        self.descriptor_import = path.into();
        self
    }

    pub fn with_follow_public_imports(mut self, follow: bool) -> Self {
        self.follow_public_imports = follow;
        self
    }

    pub fn with_activate_editor(mut self, activate: bool) -> Self {
        self.activate_editor = activate;
        self
    }

    /// Whether `path` names the built-in descriptor.
    pub fn is_descriptor_import(&self, path: &str) -> bool {
        path.trim_start_matches("./") == self.descriptor_import
    }
}
