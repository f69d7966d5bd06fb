//! IDE features: entry points a host editor calls.
//!
//! ## Design Principles
//!
//! 1. **Explicit collaborators**: the index, resolver and editor callback are
//!    passed in, never looked up globally
//! 2. **No host types**: locations and queries are our own types, converted at
//!    the host boundary
//! 3. **Composable**: built on top of HIR scope building

mod navigate;

pub use navigate::{EditorOpener, Location, NavigationStatus, Navigator, Query};
