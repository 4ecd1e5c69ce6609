//! Read-only model of the protoc descriptor tree.
//!
//! The generator only needs a small slice of `FileDescriptorProto`: the
//! namespace hint (package and `php_namespace` option), services with their
//! methods, and messages with their fields and nested messages. Leading
//! comments are lifted out of `SourceCodeInfo` so templates can render them.
//!
//! # Structure
//!
//! - [`ProtoFile`]: one `.proto` file
//! - [`ProtoService`] / [`ProtoMethod`]: RPC services
//! - [`ProtoMessage`] / [`ProtoField`]: message types, recursively nested
//!
//! The builder methods (`with_*`) exist so tests and tools can assemble a
//! tree without going through protobuf descriptors.

use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, FieldDescriptorProto, FileDescriptorProto, MethodDescriptorProto,
    ServiceDescriptorProto, SourceCodeInfo,
};
use std::collections::HashMap;

// Field numbers used in SourceCodeInfo location paths.
const FILE_MESSAGE_TYPE: i32 = 4;
const FILE_SERVICE: i32 = 6;
const MESSAGE_FIELD: i32 = 2;
const MESSAGE_NESTED_TYPE: i32 = 3;
const SERVICE_METHOD: i32 = 2;

/// The file metadata the naming rules derive a namespace from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespaceHint<'a> {
    /// File name, used for error messages
    pub file: &'a str,

    /// Explicit `option php_namespace`, if any
    pub php_namespace: Option<&'a str>,

    /// Protobuf package, possibly empty
    pub package: &'a str,
}

/// A `.proto` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProtoFile {
    /// File name as given to protoc (e.g. `acme/billing/invoice.proto`).
    pub name: String,

    /// Protobuf package (e.g. `acme.billing`), empty when unset.
    pub package: String,

    /// Value of `option php_namespace`.
    pub php_namespace: Option<String>,

    /// Services in declaration order.
    pub services: Vec<ProtoService>,

    /// Top-level messages in declaration order.
    pub messages: Vec<ProtoMessage>,
}

/// An RPC service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProtoService {
    pub name: String,
    pub comment: Option<String>,
    pub methods: Vec<ProtoMethod>,
}

/// A method of an RPC service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProtoMethod {
    pub name: String,

    /// Fully-qualified input type, with leading dot (e.g. `.acme.billing.GetInvoiceRequest`).
    pub input_type: String,

    /// Fully-qualified output type, with leading dot.
    pub output_type: String,

    pub client_streaming: bool,
    pub server_streaming: bool,
    pub comment: Option<String>,
}

/// A message type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProtoMessage {
    pub name: String,
    pub comment: Option<String>,
    pub fields: Vec<ProtoField>,
    pub nested_messages: Vec<ProtoMessage>,

    /// Set on the `FooEntry` messages protoc synthesizes for map fields.
    pub map_entry: bool,
}

/// A message field.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtoField {
    pub name: String,
    pub json_name: String,
    pub number: i32,
    pub kind: FieldKind,
    pub repeated: bool,
    pub proto3_optional: bool,

    /// Fully-qualified type name for message and enum fields.
    pub type_name: Option<String>,

    pub comment: Option<String>,
}

/// Simplified protobuf field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    String,
    Group,
    Message,
    Bytes,
    Uint32,
    Enum,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
}

impl From<Type> for FieldKind {
    fn from(ty: Type) -> Self {
        match ty {
            Type::Double => FieldKind::Double,
            Type::Float => FieldKind::Float,
            Type::Int64 => FieldKind::Int64,
            Type::Uint64 => FieldKind::Uint64,
            Type::Int32 => FieldKind::Int32,
            Type::Fixed64 => FieldKind::Fixed64,
            Type::Fixed32 => FieldKind::Fixed32,
            Type::Bool => FieldKind::Bool,
            Type::String => FieldKind::String,
            Type::Group => FieldKind::Group,
            Type::Message => FieldKind::Message,
            Type::Bytes => FieldKind::Bytes,
            Type::Uint32 => FieldKind::Uint32,
            Type::Enum => FieldKind::Enum,
            Type::Sfixed32 => FieldKind::Sfixed32,
            Type::Sfixed64 => FieldKind::Sfixed64,
            Type::Sint32 => FieldKind::Sint32,
            Type::Sint64 => FieldKind::Sint64,
        }
    }
}

impl ProtoFile {
    /// Create an empty file with a name and package.
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            ..Default::default()
        }
    }

    pub fn with_php_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.php_namespace = Some(namespace.into());
        self
    }

    pub fn with_service(mut self, service: ProtoService) -> Self {
        self.services.push(service);
        self
    }

    pub fn with_message(mut self, message: ProtoMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// The metadata the naming rules need.
    pub fn namespace_hint(&self) -> NamespaceHint<'_> {
        NamespaceHint {
            file: &self.name,
            php_namespace: self.php_namespace.as_deref(),
            package: &self.package,
        }
    }

    /// Fully-qualified protobuf name of a top-level type in this file.
    pub fn qualify(&self, name: &str) -> String {
        if self.package.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.package, name)
        }
    }
}

impl ProtoService {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_method(mut self, method: ProtoMethod) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

impl ProtoMethod {
    pub fn new(
        name: impl Into<String>,
        input_type: impl Into<String>,
        output_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            input_type: input_type.into(),
            output_type: output_type.into(),
            ..Default::default()
        }
    }
}

impl ProtoMessage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_field(mut self, field: ProtoField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_nested(mut self, message: ProtoMessage) -> Self {
        self.nested_messages.push(message);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn as_map_entry(mut self) -> Self {
        self.map_entry = true;
        self
    }
}

impl ProtoField {
    /// A singular scalar field.
    pub fn scalar(name: impl Into<String>, number: i32, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            json_name: json_name(&name),
            name,
            number,
            kind,
            repeated: false,
            proto3_optional: false,
            type_name: None,
            comment: None,
        }
    }

    /// A singular field referencing a message type.
    pub fn message(name: impl Into<String>, number: i32, type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::scalar(name, number, FieldKind::Message)
        }
    }

    /// A singular field referencing an enum type.
    pub fn enumeration(name: impl Into<String>, number: i32, type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::scalar(name, number, FieldKind::Enum)
        }
    }

    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.proto3_optional = true;
        self
    }
}

/// protoc's default JSON name: lowerCamelCase of the field name.
fn json_name(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            result.extend(c.to_uppercase());
            upper_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// Leading comments keyed by SourceCodeInfo location path.
struct Comments(HashMap<Vec<i32>, String>);

impl Comments {
    fn new(info: Option<&SourceCodeInfo>) -> Self {
        let map = info
            .map(|info| {
                info.location
                    .iter()
                    .filter_map(|location| {
                        let text = clean_comment(location.leading_comments());
                        (!text.is_empty()).then(|| (location.path.clone(), text))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self(map)
    }

    fn get(&self, path: &[i32]) -> Option<String> {
        self.0.get(path).cloned()
    }
}

/// Strip the single leading space protoc keeps after `//` and trailing blank lines.
fn clean_comment(raw: &str) -> String {
    raw.lines()
        .map(|line| line.strip_prefix(' ').unwrap_or(line).trim_end())
        .collect::<Vec<_>>()
        .join("\n")
        .trim_matches('\n')
        .to_string()
}

impl From<&FileDescriptorProto> for ProtoFile {
    fn from(file: &FileDescriptorProto) -> Self {
        let comments = Comments::new(file.source_code_info.as_ref());

        let services = file
            .service
            .iter()
            .enumerate()
            .map(|(i, service)| convert_service(service, &[FILE_SERVICE, i as i32], &comments))
            .collect();

        let messages = file
            .message_type
            .iter()
            .enumerate()
            .map(|(i, message)| {
                convert_message(message, vec![FILE_MESSAGE_TYPE, i as i32], &comments)
            })
            .collect();

        Self {
            name: file.name().to_string(),
            package: file.package().to_string(),
            php_namespace: file
                .options
                .as_ref()
                .and_then(|options| options.php_namespace.clone()),
            services,
            messages,
        }
    }
}

fn convert_service(
    service: &ServiceDescriptorProto,
    path: &[i32],
    comments: &Comments,
) -> ProtoService {
    let methods = service
        .method
        .iter()
        .enumerate()
        .map(|(i, method)| {
            let mut method_path = path.to_vec();
            method_path.extend([SERVICE_METHOD, i as i32]);
            convert_method(method, &method_path, comments)
        })
        .collect();

    ProtoService {
        name: service.name().to_string(),
        comment: comments.get(path),
        methods,
    }
}

fn convert_method(method: &MethodDescriptorProto, path: &[i32], comments: &Comments) -> ProtoMethod {
    ProtoMethod {
        name: method.name().to_string(),
        input_type: method.input_type().to_string(),
        output_type: method.output_type().to_string(),
        client_streaming: method.client_streaming(),
        server_streaming: method.server_streaming(),
        comment: comments.get(path),
    }
}

fn convert_message(message: &DescriptorProto, path: Vec<i32>, comments: &Comments) -> ProtoMessage {
    let fields = message
        .field
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let mut field_path = path.clone();
            field_path.extend([MESSAGE_FIELD, i as i32]);
            convert_field(field, &field_path, comments)
        })
        .collect();

    let nested_messages = message
        .nested_type
        .iter()
        .enumerate()
        .map(|(i, nested)| {
            let mut nested_path = path.clone();
            nested_path.extend([MESSAGE_NESTED_TYPE, i as i32]);
            convert_message(nested, nested_path, comments)
        })
        .collect();

    ProtoMessage {
        name: message.name().to_string(),
        comment: comments.get(&path),
        fields,
        nested_messages,
        map_entry: message
            .options
            .as_ref()
            .is_some_and(|options| options.map_entry()),
    }
}

fn convert_field(field: &FieldDescriptorProto, path: &[i32], comments: &Comments) -> ProtoField {
    let json_name = match field.json_name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => json_name(field.name()),
    };

    ProtoField {
        name: field.name().to_string(),
        json_name,
        number: field.number(),
        kind: field.r#type().into(),
        repeated: field.label() == Label::Repeated,
        proto3_optional: field.proto3_optional(),
        type_name: field.type_name.clone().filter(|name| !name.is_empty()),
        comment: comments.get(path),
    }
}
