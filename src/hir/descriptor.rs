//! Built-in `google/protobuf/descriptor.proto` types.
//!
//! Importing the descriptor never touches a real file: the declarations below
//! are built once per process and shared read-only by every scope request.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::base::FileId;
use super::config::DEFAULT_DESCRIPTOR_IMPORT;
use super::resolve::SymbolDescription;
use super::scope::qualified_declarations;
use super::syntax::{DeclBuilder, DeclFilter, ParsedResource, ProtoFile};

static CATALOGUE: Lazy<BuiltinDescriptor> = Lazy::new(BuiltinDescriptor::load);

/// The immutable catalogue of built-in declarations.
#[derive(Debug)]
pub struct BuiltinDescriptor {
    resource: ParsedResource,
    descriptions: Vec<SymbolDescription>,
}

impl BuiltinDescriptor {
    /// The process-wide catalogue.
    pub fn get() -> &'static BuiltinDescriptor {
        &CATALOGUE
    }

    fn load() -> Self {
        let resource: ParsedResource = descriptor_file().into();
        let descriptions = qualified_declarations(&resource, DeclFilter::All);
        Self {
            resource,
            descriptions,
        }
    }

    /// The descriptor as a parsed resource (package `google.protobuf`).
    pub fn resource(&self) -> &ParsedResource {
        &self.resource
    }

    /// Built-in declarations of the kinds `filter` accepts, fully qualified.
    pub fn types(&self, filter: DeclFilter) -> impl Iterator<Item = &SymbolDescription> {
        self.descriptions
            .iter()
            .filter(move |d| filter.accepts(d.decl.kind))
    }
}

/// Owned copies of the built-in declarations accepted by `filter`.
pub fn builtin_types(filter: DeclFilter) -> Vec<SymbolDescription> {
    BuiltinDescriptor::get().types(filter).cloned().collect()
}

/// Like [`builtin_types`], but located at `import`, the path the importing
/// file used for the descriptor.
pub fn builtin_types_at(filter: DeclFilter, import: &str) -> Vec<SymbolDescription> {
    let catalogue = BuiltinDescriptor::get();
    if import == &**catalogue.resource().uri() {
        return builtin_types(filter);
    }
    let uri: Arc<str> = Arc::from(import);
    catalogue
        .types(filter)
        .map(|d| {
            let mut description = d.clone();
            description.decl.uri = uri.clone();
            description
        })
        .collect()
}

fn fields(builder: DeclBuilder, names: &[&str]) -> DeclBuilder {
    names.iter().fold(builder, |b, name| b.field(name))
}

fn literals(builder: DeclBuilder, names: &[&str]) -> DeclBuilder {
    names.iter().fold(builder, |b, name| b.literal(name))
}

fn descriptor_file() -> ProtoFile {
    ProtoFile::builder(FileId::BUILTIN, DEFAULT_DESCRIPTOR_IMPORT)
        .package("google.protobuf")
        .message("FileDescriptorSet", |m| m.field("file"))
        .message("FileDescriptorProto", |m| {
            fields(
                m,
                &[
                    "name",
                    "package",
                    "dependency",
                    "public_dependency",
                    "weak_dependency",
                    "message_type",
                    "enum_type",
                    "service",
                    "extension",
                    "options",
                    "source_code_info",
                    "syntax",
                ],
            )
        })
        .message("DescriptorProto", |m| {
            let m = fields(m, &["name", "field", "extension", "nested_type", "enum_type"]);
            let m = m.message("ExtensionRange", |r| fields(r, &["start", "end", "options"]));
            let m = fields(m, &["extension_range", "oneof_decl", "options"]);
            let m = m.message("ReservedRange", |r| fields(r, &["start", "end"]));
            fields(m, &["reserved_range", "reserved_name"])
        })
        .message("ExtensionRangeOptions", |m| m.field("uninterpreted_option"))
        .message("FieldDescriptorProto", |m| {
            let m = m.enumeration("Type", |e| {
                literals(
                    e,
                    &[
                        "TYPE_DOUBLE",
                        "TYPE_FLOAT",
                        "TYPE_INT64",
                        "TYPE_UINT64",
                        "TYPE_INT32",
                        "TYPE_FIXED64",
                        "TYPE_FIXED32",
                        "TYPE_BOOL",
                        "TYPE_STRING",
                        "TYPE_GROUP",
                        "TYPE_MESSAGE",
                        "TYPE_BYTES",
                        "TYPE_UINT32",
                        "TYPE_ENUM",
                        "TYPE_SFIXED32",
                        "TYPE_SFIXED64",
                        "TYPE_SINT32",
                        "TYPE_SINT64",
                    ],
                )
            });
            let m = m.enumeration("Label", |e| {
                literals(e, &["LABEL_OPTIONAL", "LABEL_REQUIRED", "LABEL_REPEATED"])
            });
            fields(
                m,
                &[
                    "name",
                    "number",
                    "label",
                    "type",
                    "type_name",
                    "extendee",
                    "default_value",
                    "oneof_index",
                    "json_name",
                    "options",
                    "proto3_optional",
                ],
            )
        })
        .message("OneofDescriptorProto", |m| fields(m, &["name", "options"]))
        .message("EnumDescriptorProto", |m| {
            let m = fields(m, &["name", "value", "options"]);
            let m = m.message("EnumReservedRange", |r| fields(r, &["start", "end"]));
            fields(m, &["reserved_range", "reserved_name"])
        })
        .message("EnumValueDescriptorProto", |m| fields(m, &["name", "number", "options"]))
        .message("ServiceDescriptorProto", |m| fields(m, &["name", "method", "options"]))
        .message("MethodDescriptorProto", |m| {
            fields(
                m,
                &[
                    "name",
                    "input_type",
                    "output_type",
                    "options",
                    "client_streaming",
                    "server_streaming",
                ],
            )
        })
        .message("FileOptions", |m| {
            let m = fields(
                m,
                &[
                    "java_package",
                    "java_outer_classname",
                    "java_multiple_files",
                    "java_string_check_utf8",
                ],
            );
            let m = m.enumeration("OptimizeMode", |e| {
                literals(e, &["SPEED", "CODE_SIZE", "LITE_RUNTIME"])
            });
            fields(
                m,
                &[
                    "optimize_for",
                    "go_package",
                    "cc_generic_services",
                    "java_generic_services",
                    "py_generic_services",
                    "deprecated",
                    "cc_enable_arenas",
                    "objc_class_prefix",
                    "csharp_namespace",
                    "uninterpreted_option",
                ],
            )
        })
        .message("MessageOptions", |m| {
            fields(
                m,
                &[
                    "message_set_wire_format",
                    "no_standard_descriptor_accessor",
                    "deprecated",
                    "map_entry",
                    "uninterpreted_option",
                ],
            )
        })
        .message("FieldOptions", |m| {
            let m = m.field("ctype");
            let m = m.enumeration("CType", |e| literals(e, &["STRING", "CORD", "STRING_PIECE"]));
            let m = fields(m, &["packed", "jstype"]);
            let m = m.enumeration("JSType", |e| literals(e, &["JS_NORMAL", "JS_STRING", "JS_NUMBER"]));
            fields(m, &["lazy", "deprecated", "weak", "uninterpreted_option"])
        })
        .message("OneofOptions", |m| m.field("uninterpreted_option"))
        .message("EnumOptions", |m| {
            fields(m, &["allow_alias", "deprecated", "uninterpreted_option"])
        })
        .message("EnumValueOptions", |m| fields(m, &["deprecated", "uninterpreted_option"]))
        .message("ServiceOptions", |m| fields(m, &["deprecated", "uninterpreted_option"]))
        .message("MethodOptions", |m| {
            let m = m.field("deprecated");
            let m = m.enumeration("IdempotencyLevel", |e| {
                literals(e, &["IDEMPOTENCY_UNKNOWN", "NO_SIDE_EFFECTS", "IDEMPOTENT"])
            });
            fields(m, &["idempotency_level", "uninterpreted_option"])
        })
        .message("UninterpretedOption", |m| {
            let m = m.message("NamePart", |p| fields(p, &["name_part", "is_extension"]));
            fields(
                m,
                &[
                    "name",
                    "identifier_value",
                    "positive_int_value",
                    "negative_int_value",
                    "double_value",
                    "string_value",
                    "aggregate_value",
                ],
            )
        })
        .message("SourceCodeInfo", |m| {
            let m = m.message("Location", |l| {
                fields(
                    l,
                    &[
                        "path",
                        "span",
                        "leading_comments",
                        "trailing_comments",
                        "leading_detached_comments",
                    ],
                )
            });
            m.field("location")
        })
        .message("GeneratedCodeInfo", |m| {
            let m = m.message("Annotation", |a| fields(a, &["path", "source_file", "begin", "end"]));
            m.field("annotation")
        })
        .build()
}
