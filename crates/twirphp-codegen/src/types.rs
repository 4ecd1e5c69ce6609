//! Index from protobuf type names to PHP class names.
//!
//! Method signatures and message fields reference types by their
//! fully-qualified protobuf name (`.acme.billing.Invoice.LineItem`). The
//! index covers every file protoc handed over, dependencies included, and
//! resolves lazily so a dependency whose namespace cannot be derived only
//! fails the run when one of its types is actually referenced.

use std::collections::HashMap;
use twirphp_core::naming;
use twirphp_core::{GeneratorError, GeneratorResult, ProtoFile, ProtoMessage};

#[derive(Debug, Clone)]
struct IndexedType {
    file: String,
    package: String,
    php_namespace: Option<String>,
    /// Class names from the outermost message down to this one.
    class_path: Vec<String>,
    map_entry: bool,
}

/// A protobuf message type resolved to PHP.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// Fully-qualified class name with leading `\`.
    pub php_class: String,

    /// Synthesized map entry; fields of this type are PHP arrays.
    pub map_entry: bool,
}

/// Message types of a request, keyed by fully-qualified protobuf name.
#[derive(Debug, Clone, Default)]
pub struct TypeIndex {
    types: HashMap<String, IndexedType>,
}

impl TypeIndex {
    /// Index every message of `files`, nested messages included.
    pub fn new<'a>(files: impl IntoIterator<Item = &'a ProtoFile>) -> Self {
        let mut index = Self::default();
        for file in files {
            let prefix = if file.package.is_empty() {
                String::new()
            } else {
                format!(".{}", file.package)
            };
            for message in &file.messages {
                index.insert(file, message, &prefix, &[]);
            }
        }
        index
    }

    fn insert(
        &mut self,
        file: &ProtoFile,
        message: &ProtoMessage,
        scope: &str,
        parents: &[String],
    ) {
        let full_name = format!("{scope}.{}", message.name);
        let mut class_path = parents.to_vec();
        class_path.push(naming::class_name(&message.name, &file.package));

        for nested in &message.nested_messages {
            self.insert(file, nested, &full_name, &class_path);
        }

        self.types.insert(
            full_name,
            IndexedType {
                file: file.name.clone(),
                package: file.package.clone(),
                php_namespace: file.php_namespace.clone(),
                class_path,
                map_entry: message.map_entry,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn contains(&self, proto_type: &str) -> bool {
        self.types.contains_key(&normalize(proto_type))
    }

    /// Resolve a fully-qualified protobuf type name.
    ///
    /// # Errors
    ///
    /// [`GeneratorError::Configuration`] if the type is not in the request or
    /// its file has no derivable namespace.
    pub fn resolve(&self, proto_type: &str) -> GeneratorResult<ResolvedType> {
        let indexed = self.types.get(&normalize(proto_type)).ok_or_else(|| {
            GeneratorError::Configuration(format!(
                "type {proto_type} is not defined in any file of the request"
            ))
        })?;

        let hint = twirphp_core::NamespaceHint {
            file: &indexed.file,
            php_namespace: indexed.php_namespace.as_deref(),
            package: &indexed.package,
        };
        let namespace = naming::namespace(&hint)?;

        Ok(ResolvedType {
            php_class: format!("\\{namespace}\\{}", indexed.class_path.join("\\")),
            map_entry: indexed.map_entry,
        })
    }
}

/// protoc always emits a leading dot; accept names without one too.
fn normalize(proto_type: &str) -> String {
    if proto_type.starts_with('.') {
        proto_type.to_string()
    } else {
        format!(".{proto_type}")
    }
}
