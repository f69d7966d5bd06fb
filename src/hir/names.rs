//! Qualified names and packages.
//!
//! A declaration in a `.proto` file can be referenced under several names:
//! bare, qualified by one or more enclosing messages, or fully qualified with
//! its package. [`local_names`] produces all of those forms, ordered from the
//! most local to the most global, and [`Package::is_related_to`] decides when
//! two packages share a namespace.

use std::fmt;

use smol_str::SmolStr;

// ============================================================================
// QUALIFIED NAME
// ============================================================================

/// An ordered sequence of name segments, e.g. `foo.bar.Outer.Inner`.
///
/// Equality and hashing are structural (segment by segment).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct QualifiedName {
    segments: Vec<SmolStr>,
}

impl QualifiedName {
    /// Build a name from its segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// A single-segment name.
    pub fn simple(name: impl Into<SmolStr>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    /// Split a dotted name. A leading dot (absolute reference) and empty
    /// segments are ignored.
    pub fn parse(dotted: &str) -> Self {
        Self::from_segments(dotted.split('.').filter(|s| !s.is_empty()))
    }

    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The last segment, if any.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(SmolStr::as_str)
    }

    /// Return a new name with `segment` added at the end.
    pub fn append(&self, segment: impl Into<SmolStr>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Return a new name with `prefix`'s segments in front of this one's.
    pub fn prepend(&self, prefix: &[SmolStr]) -> Self {
        let mut segments = Vec::with_capacity(prefix.len() + self.segments.len());
        segments.extend_from_slice(prefix);
        segments.extend_from_slice(&self.segments);
        Self { segments }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl fmt::Debug for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QualifiedName({})", self)
    }
}

impl From<&str> for QualifiedName {
    fn from(dotted: &str) -> Self {
        Self::parse(dotted)
    }
}

// ============================================================================
// PACKAGE
// ============================================================================

/// The dotted namespace a file declares with `package a.b.c;`.
///
/// An empty package is the default package.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Package {
    segments: Vec<SmolStr>,
}

impl Package {
    /// The default (empty) package.
    pub fn default_package() -> Self {
        Self::default()
    }

    pub fn parse(dotted: &str) -> Self {
        Self {
            segments: dotted
                .split('.')
                .filter(|s| !s.is_empty())
                .map(SmolStr::new)
                .collect(),
        }
    }

    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }

    pub fn is_default(&self) -> bool {
        self.segments.is_empty()
    }

    /// Two packages are related when one is an ancestor namespace of the other
    /// (identity included). The default package is related to everything.
    pub fn is_related_to(&self, other: &Package) -> bool {
        let (shorter, longer) = if self.segments.len() <= other.segments.len() {
            (&self.segments, &other.segments)
        } else {
            (&other.segments, &self.segments)
        };
        longer.starts_with(shorter)
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

impl fmt::Debug for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Package({})", self)
    }
}

/// Whether types from a file in package `b` merge unqualified into the scope
/// of a file in package `a`.
pub fn packages_related(a: &Package, b: &Package) -> bool {
    a.is_related_to(b)
}

// ============================================================================
// NAME FORMS
// ============================================================================

/// All names a declaration can be referenced by, most local first.
///
/// `ancestors` lists the enclosing scopes outermost first. For `N` inside
/// `M` in package `p` this yields `[N, M.N, p.M.N]`.
pub fn local_names(name: &str, ancestors: &[SmolStr], package: &Package) -> Vec<QualifiedName> {
    let mut names = Vec::with_capacity(ancestors.len() + 2);
    let mut current = QualifiedName::simple(name);
    names.push(current.clone());
    for ancestor in ancestors.iter().rev() {
        current = current.prepend(std::slice::from_ref(ancestor));
        names.push(current.clone());
    }
    if !package.is_default() {
        names.push(current.prepend(package.segments()));
    }
    names
}

/// The most global name of a declaration: package, enclosing scopes, name.
pub fn fully_qualified_name(name: &str, ancestors: &[SmolStr], package: &Package) -> QualifiedName {
    let mut segments = Vec::with_capacity(package.segments().len() + ancestors.len() + 1);
    segments.extend_from_slice(package.segments());
    segments.extend_from_slice(ancestors);
    segments.push(SmolStr::new(name));
    QualifiedName { segments }
}
