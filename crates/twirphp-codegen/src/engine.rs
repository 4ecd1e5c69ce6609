//! Depth-first emission over the files selected for generation.
//!
//! Per file, every service is rendered with the Service-scope templates and
//! every message (nested ones below their parent) with the Message-scope
//! templates. Namespaces that contain a service are collected on the way and
//! receive the Global-scope templates once at the end.

use crate::context::{
    FileView, GlobalContext, MessageContext, MessageView, ServiceContext, ServiceView,
};
use crate::registry::{Template, TemplateRegistry, TemplateScope};
use crate::sink::{Artifact, ArtifactSink};
use crate::types::TypeIndex;
use std::collections::BTreeSet;
use twirphp_core::naming::{self, NAMESPACE_SEPARATOR};
use twirphp_core::{GeneratorConfig, GeneratorResult, ProtoFile, ProtoMessage};

/// Output path of an artifact: `{base}/{entity}{suffix}`.
pub fn output_path(base: &str, entity: &str, template: &Template) -> String {
    format!("{base}/{entity}{}", template.suffix())
}

/// Counts of one emission run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmissionReport {
    pub service_artifacts: usize,
    pub message_artifacts: usize,
    pub global_artifacts: usize,
    /// Namespaces that received global artifacts, in emission order.
    pub namespaces: Vec<String>,
}

impl EmissionReport {
    pub fn total(&self) -> usize {
        self.service_artifacts + self.message_artifacts + self.global_artifacts
    }
}

/// Where a message sits: output directory, PHP namespace and protobuf scope.
struct Owner<'a> {
    path: &'a str,
    namespace: &'a str,
    scope: &'a str,
}

/// Renders templates for protobuf entities into an [`ArtifactSink`].
#[derive(Debug)]
pub struct Emitter<'a> {
    registry: &'a TemplateRegistry,
    config: &'a GeneratorConfig,
    types: &'a TypeIndex,
}

impl<'a> Emitter<'a> {
    pub fn new(
        registry: &'a TemplateRegistry,
        config: &'a GeneratorConfig,
        types: &'a TypeIndex,
    ) -> Self {
        Self {
            registry,
            config,
            types,
        }
    }

    /// Emit artifacts for `files` in order.
    ///
    /// The first failure aborts the run; artifacts already handed to `sink`
    /// stay there and the caller decides what to do with them.
    pub fn emit<'f>(
        &self,
        files: impl IntoIterator<Item = &'f ProtoFile>,
        sink: &mut dyn ArtifactSink,
    ) -> GeneratorResult<EmissionReport> {
        let mut report = EmissionReport::default();
        let mut namespaces = BTreeSet::new();

        for file in files {
            self.emit_file(file, sink, &mut namespaces, &mut report)?;
        }

        for namespace in namespaces {
            report.global_artifacts += self.emit_global(&namespace, sink)?;
            report.namespaces.push(namespace);
        }

        tracing::info!(
            services = report.service_artifacts,
            messages = report.message_artifacts,
            globals = report.global_artifacts,
            "emission finished"
        );
        Ok(report)
    }

    fn emit_file(
        &self,
        file: &ProtoFile,
        sink: &mut dyn ArtifactSink,
        namespaces: &mut BTreeSet<String>,
        report: &mut EmissionReport,
    ) -> GeneratorResult<()> {
        let file_view = FileView::new(file)?;
        tracing::debug!(
            file = file.name.as_str(),
            namespace = file_view.namespace.as_str(),
            "generating file"
        );

        for service in &file.services {
            namespaces.insert(file_view.namespace.clone());
            let view = ServiceView::new(file, service, self.types)?;
            let context = ServiceContext {
                file: &file_view,
                service: &view,
                tool_version: &self.config.tool_version,
                generator_version: &self.config.generator_version,
            };
            let entity = format!("service {}", view.full_name);
            report.service_artifacts += self.render_scope(
                TemplateScope::Service,
                &file_view.path,
                &view.php_name,
                &entity,
                &context,
                sink,
            )?;
        }

        let owner = Owner {
            path: &file_view.path,
            namespace: &file_view.namespace,
            scope: &file.package,
        };
        for message in &file.messages {
            report.message_artifacts +=
                self.emit_message(file, &file_view, message, &owner, sink)?;
        }
        Ok(())
    }

    fn emit_message(
        &self,
        file: &ProtoFile,
        file_view: &FileView,
        message: &ProtoMessage,
        owner: &Owner<'_>,
        sink: &mut dyn ArtifactSink,
    ) -> GeneratorResult<usize> {
        if message.map_entry {
            return Ok(0);
        }

        let full_name = if owner.scope.is_empty() {
            message.name.clone()
        } else {
            format!("{}.{}", owner.scope, message.name)
        };
        let view = MessageView::new(file, message, owner.namespace, &full_name, self.types)?;
        let context = MessageContext {
            file: file_view,
            message: &view,
        };
        let entity = format!("message {full_name}");
        let mut count = self.render_scope(
            TemplateScope::Message,
            owner.path,
            &view.php_name,
            &entity,
            &context,
            sink,
        )?;

        if !message.nested_messages.is_empty() {
            let path = format!("{}/{}", owner.path, view.php_name);
            let namespace = format!("{}{NAMESPACE_SEPARATOR}{}", owner.namespace, view.php_name);
            let nested_owner = Owner {
                path: &path,
                namespace: &namespace,
                scope: &full_name,
            };
            for nested in &message.nested_messages {
                count += self.emit_message(file, file_view, nested, &nested_owner, sink)?;
            }
        }
        Ok(count)
    }

    fn emit_global(&self, namespace: &str, sink: &mut dyn ArtifactSink) -> GeneratorResult<usize> {
        let path = naming::path_from_namespace(namespace)?;
        let context = GlobalContext {
            namespace,
            generator_version: &self.config.generator_version,
        };
        let entity = format!("namespace {namespace}");
        self.render_scope(TemplateScope::Global, &path, "", &entity, &context, sink)
    }

    fn render_scope<T: serde::Serialize>(
        &self,
        scope: TemplateScope,
        base: &str,
        entity_name: &str,
        entity: &str,
        context: &T,
        sink: &mut dyn ArtifactSink,
    ) -> GeneratorResult<usize> {
        let mut count = 0;
        for template in self.registry.templates(scope) {
            let content = self.registry.render(template, entity, context)?;
            let path = output_path(base, entity_name, template);
            tracing::debug!(path = path.as_str(), template = template.name(), "rendered");
            sink.write(Artifact {
                path,
                content,
                scope,
                template: template.name().to_string(),
            })?;
            count += 1;
        }
        Ok(count)
    }
}
