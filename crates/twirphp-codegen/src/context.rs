//! Data handed to templates, one context type per scope.
//!
//! Views are precomputed so templates only print values: PHP class names,
//! Twirp routes, property types and defaults are all derived here.

use crate::types::TypeIndex;
use serde::Serialize;
use twirphp_core::naming;
use twirphp_core::{
    FieldKind, GeneratorResult, ProtoField, ProtoFile, ProtoMessage, ProtoMethod, ProtoService,
};

/// File-level data shared by service and message contexts.
#[derive(Debug, Clone, Serialize)]
pub struct FileView {
    pub name: String,
    pub package: String,
    /// PHP namespace of the file.
    pub namespace: String,
    /// Output directory of the file.
    pub path: String,
}

impl FileView {
    /// Resolve the namespace and path of `file`.
    pub fn new(file: &ProtoFile) -> GeneratorResult<Self> {
        let namespace = naming::namespace(&file.namespace_hint())?;
        let path = naming::path_from_namespace(&namespace)?;
        Ok(Self {
            name: file.name.clone(),
            package: file.package.clone(),
            namespace,
            path,
        })
    }
}

/// A protobuf type referenced from a method signature.
#[derive(Debug, Clone, Serialize)]
pub struct TypeRef {
    pub proto_name: String,
    pub php_class: String,
}

impl TypeRef {
    fn resolve(proto_name: &str, types: &TypeIndex) -> GeneratorResult<Self> {
        Ok(Self {
            proto_name: proto_name.trim_start_matches('.').to_string(),
            php_class: types.resolve(proto_name)?.php_class,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodView {
    pub name: String,
    /// PHP method name (`GetInvoice` -> `getInvoice`).
    pub php_name: String,
    /// `package.Service.Method`
    pub full_name: String,
    /// Twirp route below the prefix: `/package.Service/Method`.
    pub route: String,
    pub input: TypeRef,
    pub output: TypeRef,
    pub client_streaming: bool,
    pub server_streaming: bool,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceView {
    pub name: String,
    /// PHP interface name, also the entity name of service artifacts.
    pub php_name: String,
    /// `package.Service`
    pub full_name: String,
    pub comment: Option<String>,
    pub methods: Vec<MethodView>,
}

impl ServiceView {
    pub fn new(file: &ProtoFile, service: &ProtoService, types: &TypeIndex) -> GeneratorResult<Self> {
        let full_name = file.qualify(&service.name);
        let methods = service
            .methods
            .iter()
            .map(|method| method_view(&full_name, method, types))
            .collect::<GeneratorResult<Vec<_>>>()?;

        Ok(Self {
            name: service.name.clone(),
            php_name: naming::class_name(&service.name, &file.package),
            full_name,
            comment: service.comment.clone(),
            methods,
        })
    }
}

fn method_view(service: &str, method: &ProtoMethod, types: &TypeIndex) -> GeneratorResult<MethodView> {
    Ok(MethodView {
        name: method.name.clone(),
        php_name: naming::lcfirst(&method.name),
        full_name: format!("{service}.{}", method.name),
        route: format!("/{service}/{}", method.name),
        input: TypeRef::resolve(&method.input_type, types)?,
        output: TypeRef::resolve(&method.output_type, types)?,
        client_streaming: method.client_streaming,
        server_streaming: method.server_streaming,
        comment: method.comment.clone(),
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: String,
    /// PHP property name (lowerCamelCase).
    pub php_name: String,
    pub json_name: String,
    pub number: i32,
    /// Type declaration, e.g. `int`, `?\Acme\Billing\Invoice`, `array`.
    pub php_type: String,
    /// Docblock type, e.g. `int[]`, `\Acme\Billing\Invoice|null`.
    pub doc_type: String,
    /// PHP literal the property is initialized with.
    pub default_value: String,
    pub repeated: bool,
    pub map: bool,
    /// Element class of message fields (singular or repeated); `None` for
    /// scalars, enums and maps.
    pub message_class: Option<String>,
    pub comment: Option<String>,
}

impl FieldView {
    pub fn new(field: &ProtoField, types: &TypeIndex) -> GeneratorResult<Self> {
        let (scalar, scalar_default) = match field.kind {
            FieldKind::Double | FieldKind::Float => ("float".to_string(), "0.0"),
            FieldKind::Int32
            | FieldKind::Int64
            | FieldKind::Uint32
            | FieldKind::Uint64
            | FieldKind::Sint32
            | FieldKind::Sint64
            | FieldKind::Fixed32
            | FieldKind::Fixed64
            | FieldKind::Sfixed32
            | FieldKind::Sfixed64
            | FieldKind::Enum => ("int".to_string(), "0"),
            FieldKind::Bool => ("bool".to_string(), "false"),
            FieldKind::String | FieldKind::Bytes => ("string".to_string(), "''"),
            FieldKind::Message | FieldKind::Group => {
                let type_name = field.type_name.as_deref().unwrap_or_default();
                let resolved = types.resolve(type_name)?;
                if resolved.map_entry {
                    return Ok(Self::build(field, "array", "array".into(), "[]", true));
                }
                (resolved.php_class, "null")
            }
        };

        let is_message = matches!(field.kind, FieldKind::Message | FieldKind::Group);
        let mut view = if field.repeated {
            Self::build(field, "array", format!("{scalar}[]"), "[]", false)
        } else if is_message || field.proto3_optional {
            Self::build(field, &format!("?{scalar}"), format!("{scalar}|null"), "null", false)
        } else {
            Self::build(field, &scalar, scalar.clone(), scalar_default, false)
        };
        if is_message {
            view.message_class = Some(scalar);
        }
        Ok(view)
    }

    fn build(field: &ProtoField, php_type: &str, doc_type: String, default_value: &str, map: bool) -> Self {
        Self {
            name: field.name.clone(),
            php_name: naming::to_camel_case(&field.name),
            json_name: field.json_name.clone(),
            number: field.number,
            php_type: php_type.to_string(),
            doc_type,
            default_value: default_value.to_string(),
            repeated: field.repeated,
            map,
            message_class: None,
            comment: field.comment.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    pub name: String,
    /// PHP class name, also the entity name of message artifacts.
    pub php_name: String,
    /// `package.Outer.Inner`
    pub full_name: String,
    /// PHP namespace the class lives in; nested types sit below their parent.
    pub namespace: String,
    pub comment: Option<String>,
    pub fields: Vec<FieldView>,
}

impl MessageView {
    pub fn new(
        file: &ProtoFile,
        message: &ProtoMessage,
        namespace: &str,
        full_name: &str,
        types: &TypeIndex,
    ) -> GeneratorResult<Self> {
        let fields = message
            .fields
            .iter()
            .map(|field| FieldView::new(field, types))
            .collect::<GeneratorResult<Vec<_>>>()?;

        Ok(Self {
            name: message.name.clone(),
            php_name: naming::class_name(&message.name, &file.package),
            full_name: full_name.to_string(),
            namespace: namespace.to_string(),
            comment: message.comment.clone(),
            fields,
        })
    }
}

/// Context for Service-scope templates.
#[derive(Debug, Serialize)]
pub struct ServiceContext<'a> {
    pub file: &'a FileView,
    pub service: &'a ServiceView,
    pub tool_version: &'a str,
    pub generator_version: &'a str,
}

/// Context for Message-scope templates.
#[derive(Debug, Serialize)]
pub struct MessageContext<'a> {
    pub file: &'a FileView,
    pub message: &'a MessageView,
}

/// Context for Global-scope templates.
#[derive(Debug, Serialize)]
pub struct GlobalContext<'a> {
    pub namespace: &'a str,
    pub generator_version: &'a str,
}
