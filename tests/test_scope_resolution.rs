//! Cross-file scope resolution tests.
//!
//! Each test builds a small set of `.proto` snapshots in a `ResourceSet` and
//! checks which names the root file can see.

use rstest::rstest;
use protoscope::base::FileId;
use protoscope::hir::{
    DeclFilter, ProtoFile, ProtoFileBuilder, QualifiedName, ResourceSet, ScopeConfig, SymbolIndex,
    TypeDescriptions,
};

fn file(set: &ResourceSet, uri: &str) -> ProtoFileBuilder {
    ProtoFile::builder(set.file_id(uri), uri)
}

fn sees(scope: &SymbolIndex, name: &str) -> bool {
    scope.contains(&QualifiedName::parse(name))
}

fn scope_of(set: &ResourceSet, uri: &str, filter: DeclFilter) -> SymbolIndex {
    scope_with(set, uri, filter, &ScopeConfig::default())
}

fn scope_with(set: &ResourceSet, uri: &str, filter: DeclFilter, config: &ScopeConfig) -> SymbolIndex {
    let resource = set.get(uri).expect("root should be indexed");
    let root = resource.root().expect("root should have a typed root");
    TypeDescriptions::new(set, config).types_in_scope(root, filter)
}

// ============================================================================
// PACKAGE RELATIONS
// ============================================================================

#[test]
fn test_related_package_merges_unqualified() {
    let set = ResourceSet::new();
    set.insert(file(&set, "a.proto").package("foo").import("b.proto").build());
    set.insert(
        file(&set, "b.proto")
            .package("foo.bar")
            .message("B", |m| m.message("Inner", |i| i))
            .build(),
    );

    let scope = scope_of(&set, "a.proto", DeclFilter::Types);

    assert!(sees(&scope, "B"));
    assert!(sees(&scope, "foo.bar.B"));
    assert!(sees(&scope, "B.Inner"));
}

#[test]
fn test_unrelated_package_requires_full_qualification() {
    let set = ResourceSet::new();
    set.insert(file(&set, "a.proto").package("foo").import("b.proto").build());
    set.insert(
        file(&set, "b.proto")
            .package("other")
            .message("B", |m| m.enumeration("Kind", |e| e.literal("K")))
            .build(),
    );

    let scope = scope_of(&set, "a.proto", DeclFilter::Types);

    assert!(!sees(&scope, "B"));
    assert!(sees(&scope, "other.B"));
    assert!(sees(&scope, "other.B.Kind"));
    assert!(!sees(&scope, "B.Kind"));
}

#[test]
fn test_unrelated_package_has_no_partial_package_forms() {
    let set = ResourceSet::new();
    set.insert(file(&set, "a.proto").package("foo").import("b.proto").build());
    set.insert(
        file(&set, "b.proto")
            .package("x.y")
            .message("B", |m| m.message("Inner", |i| i))
            .build(),
    );

    let scope = scope_of(&set, "a.proto", DeclFilter::Types);

    let names: Vec<String> = scope.iter().map(|d| d.name.to_string()).collect();
    assert_eq!(names, vec!["x.y.B", "x.y.B.Inner"]);
    assert!(!sees(&scope, "y.B"));
    assert!(!sees(&scope, "B.Inner"));
}

#[test]
fn test_default_package_is_related_to_everything() {
    let set = ResourceSet::new();
    set.insert(file(&set, "a.proto").import("b.proto").build());
    set.insert(file(&set, "b.proto").package("x.y").message("B", |m| m).build());

    let scope = scope_of(&set, "a.proto", DeclFilter::Types);

    assert!(sees(&scope, "B"));
}

// ============================================================================
// BUILT-IN DESCRIPTOR
// ============================================================================

#[rstest]
#[case(DeclFilter::Messages, 27)]
#[case(DeclFilter::Enums, 6)]
#[case(DeclFilter::Types, 33)]
fn test_descriptor_import_yields_builtin_types(#[case] filter: DeclFilter, #[case] expected: usize) {
    let set = ResourceSet::new();
    set.insert(
        file(&set, "a.proto")
            .import("google/protobuf/descriptor.proto")
            .build(),
    );

    let scope = scope_of(&set, "a.proto", filter);

    assert_eq!(scope.len(), expected);
    assert!(scope.iter().all(|d| d.decl.id.file.is_builtin()));
}

#[test]
fn test_descriptor_import_ignores_project_state() {
    let set = ResourceSet::new();
    // A real file at the descriptor path must not shadow the built-ins.
    set.insert(
        file(&set, "google/protobuf/descriptor.proto")
            .package("google.protobuf")
            .message("Impostor", |m| m)
            .build(),
    );
    set.insert(
        file(&set, "a.proto")
            .import("google/protobuf/descriptor.proto")
            .build(),
    );

    let scope = scope_of(&set, "a.proto", DeclFilter::Messages);

    assert!(sees(&scope, "google.protobuf.FieldOptions"));
    assert!(!sees(&scope, "google.protobuf.Impostor"));
}

#[test]
fn test_custom_descriptor_path() {
    let set = ResourceSet::new();
    set.insert(file(&set, "a.proto").import("vendor/descriptor.proto").build());
    let config = ScopeConfig::default().with_descriptor_import("vendor/descriptor.proto");

    let scope = scope_with(&set, "a.proto", DeclFilter::Types, &config);

    assert!(sees(&scope, "google.protobuf.DescriptorProto"));
}

// ============================================================================
// PUBLIC IMPORTS
// ============================================================================

fn public_chain(set: &ResourceSet, b_imports_c_publicly: bool) {
    set.insert(file(set, "a.proto").package("a").import("b.proto").build());
    let b = file(set, "b.proto").package("b").message("B", |m| m);
    let b = if b_imports_c_publicly {
        b.public_import("c.proto")
    } else {
        b.import("c.proto")
    };
    set.insert(b.build());
    set.insert(
        file(set, "c.proto")
            .package("c")
            .public_import("d.proto")
            .message("C", |m| m)
            .build(),
    );
    set.insert(file(set, "d.proto").package("d").message("D", |m| m).build());
}

#[test]
fn test_public_import_chain_is_transitive() {
    let set = ResourceSet::new();
    public_chain(&set, true);

    let scope = scope_of(&set, "a.proto", DeclFilter::Types);

    assert!(sees(&scope, "b.B"));
    assert!(sees(&scope, "c.C"));
    assert!(sees(&scope, "d.D"));
}

#[test]
fn test_plain_import_stops_re_export() {
    let set = ResourceSet::new();
    public_chain(&set, false);

    let scope = scope_of(&set, "a.proto", DeclFilter::Types);

    assert!(sees(&scope, "b.B"));
    assert!(!sees(&scope, "c.C"));
    assert!(!sees(&scope, "d.D"));
}

#[test]
fn test_public_imports_can_be_disabled() {
    let set = ResourceSet::new();
    public_chain(&set, true);
    let config = ScopeConfig::default().with_follow_public_imports(false);

    let scope = scope_with(&set, "a.proto", DeclFilter::Types, &config);

    assert!(sees(&scope, "b.B"));
    assert!(!sees(&scope, "c.C"));
}

#[test]
fn test_public_import_related_to_re_exporter() {
    // b (package p) re-exports c (package p.q); relation is judged against b.
    let set = ResourceSet::new();
    set.insert(file(&set, "a.proto").package("z").import("b.proto").build());
    set.insert(file(&set, "b.proto").package("p").public_import("c.proto").build());
    set.insert(file(&set, "c.proto").package("p.q").message("C", |m| m).build());

    let scope = scope_of(&set, "a.proto", DeclFilter::Types);

    assert!(sees(&scope, "C"));
    assert!(sees(&scope, "p.q.C"));
}

// ============================================================================
// DEGRADED INPUT
// ============================================================================

#[test]
fn test_unreachable_imports_contribute_nothing() {
    let set = ResourceSet::new();
    set.mark_unparseable("broken.proto", "unexpected end of input");
    set.insert(
        file(&set, "a.proto")
            .import("missing.proto")
            .import("broken.proto")
            .import("b.proto")
            .message("A", |m| m)
            .build(),
    );
    set.insert(file(&set, "b.proto").message("B", |m| m).build());

    let scope = scope_of(&set, "a.proto", DeclFilter::Types);

    assert!(sees(&scope, "A"));
    assert!(sees(&scope, "B"));
    assert_eq!(scope.len(), 2);
}

#[test]
fn test_fragments_are_scanned_fully_qualified() {
    let set = ResourceSet::new();
    set.insert(file(&set, "a.proto").package("a").import("partial.proto").build());
    set.insert(
        file(&set, "partial.proto")
            .message("Orphan", |m| m.enumeration("State", |e| e.literal("ON")))
            .build_fragments(),
    );

    let scope = scope_of(&set, "a.proto", DeclFilter::Types);

    assert!(sees(&scope, "Orphan"));
    assert!(sees(&scope, "Orphan.State"));
}

#[test]
fn test_import_cycle_terminates() {
    let set = ResourceSet::new();
    set.insert(
        file(&set, "a.proto")
            .package("a")
            .public_import("b.proto")
            .message("A", |m| m)
            .build(),
    );
    set.insert(
        file(&set, "b.proto")
            .package("b")
            .public_import("a.proto")
            .message("B", |m| m)
            .build(),
    );
    set.insert(file(&set, "c.proto").package("c").import("a.proto").build());

    let scope = scope_of(&set, "c.proto", DeclFilter::Types);

    assert!(sees(&scope, "a.A"));
    assert!(sees(&scope, "b.B"));
}

#[test]
fn test_reparsed_import_is_picked_up() {
    let set = ResourceSet::new();
    set.insert(file(&set, "a.proto").import("b.proto").build());
    set.insert(file(&set, "b.proto").message("Old", |m| m).build());
    assert!(sees(&scope_of(&set, "a.proto", DeclFilter::Types), "Old"));

    set.insert(file(&set, "b.proto").message("New", |m| m).build());

    let scope = scope_of(&set, "a.proto", DeclFilter::Types);
    assert!(sees(&scope, "New"));
    assert!(!sees(&scope, "Old"));
}

#[test]
fn test_scope_requests_do_not_share_state() {
    let set = ResourceSet::new();
    set.insert(file(&set, "a.proto").package("a").import("b.proto").build());
    set.insert(file(&set, "b.proto").package("b").message("B", |m| m).build());

    let first = scope_of(&set, "a.proto", DeclFilter::Types);
    let second = scope_of(&set, "a.proto", DeclFilter::Types);

    let first: Vec<_> = first.iter().cloned().collect();
    let second: Vec<_> = second.iter().cloned().collect();
    assert_eq!(first, second);
    assert_eq!(first.first().map(|d| d.decl.id.file), Some(FileId::new(1)));
}
