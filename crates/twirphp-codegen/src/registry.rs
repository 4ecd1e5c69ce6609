//! Compiled-in template bundle, partitioned by scope.
//!
//! Every template is registered with an explicit [`TemplateScope`]. Its output
//! suffix is the file name with the scope marker (`_Service_`, `_Message_`)
//! and the `.hbs` extension removed, so `_Service_Server.php.hbs` renders to
//! `<Service>Server.php`.
//!
//! Templates are parsed once when the registry is built. A template that does
//! not parse, or two templates of one scope with the same suffix, fail the
//! whole load: no entity is processed with a partial bundle.

use handlebars::{Handlebars, handlebars_helper};
use serde::Serialize;
use std::fmt;
use twirphp_core::naming;
use twirphp_core::{GeneratorError, GeneratorResult};

/// Extension stripped from template file names.
pub const TEMPLATE_EXTENSION: &str = ".hbs";

/// Entity granularity a template applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateScope {
    /// Once per namespace that contains a service
    Global,
    /// Once per RPC service
    Service,
    /// Once per message type, nested types included
    Message,
}

impl TemplateScope {
    /// Placeholder for the entity name inside template file names.
    pub fn marker(self) -> Option<&'static str> {
        match self {
            TemplateScope::Global => None,
            TemplateScope::Service => Some("_Service_"),
            TemplateScope::Message => Some("_Message_"),
        }
    }
}

impl fmt::Display for TemplateScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateScope::Global => write!(f, "global"),
            TemplateScope::Service => write!(f, "service"),
            TemplateScope::Message => write!(f, "message"),
        }
    }
}

/// A loaded template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    scope: TemplateScope,
    suffix: String,
    key: String,
}

impl Template {
    /// File name of the template (e.g. `_Service_Server.php.hbs`).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> TemplateScope {
        self.scope
    }

    /// Appended to the entity name to form the output file name.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

/// Source of one bundled template: scope, file name, body.
pub type TemplateSource<'a> = (TemplateScope, &'a str, &'a str);

const BUNDLE: &[TemplateSource<'static>] = &[
    (
        TemplateScope::Global,
        "TwirpError.php.hbs",
        include_str!("../templates/global/TwirpError.php.hbs"),
    ),
    (
        TemplateScope::Service,
        "_Service_.php.hbs",
        include_str!("../templates/service/_Service_.php.hbs"),
    ),
    (
        TemplateScope::Service,
        "_Service_AbstractClient.php.hbs",
        include_str!("../templates/service/_Service_AbstractClient.php.hbs"),
    ),
    (
        TemplateScope::Service,
        "_Service_JsonClient.php.hbs",
        include_str!("../templates/service/_Service_JsonClient.php.hbs"),
    ),
    (
        TemplateScope::Service,
        "_Service_Server.php.hbs",
        include_str!("../templates/service/_Service_Server.php.hbs"),
    ),
    (
        TemplateScope::Message,
        "_Message_.php.hbs",
        include_str!("../templates/message/_Message_.php.hbs"),
    ),
];

handlebars_helper!(ucfirst_helper: |s: str| naming::ucfirst(s));
handlebars_helper!(lcfirst_helper: |s: str| naming::lcfirst(s));
handlebars_helper!(php_doc_helper: |s: str, indent: str| php_doc(s, indent));
handlebars_helper!(php_string_helper: |s: str| php_string(s));

/// Docblock body lines (`<indent> * text`) for a comment.
pub fn php_doc(comment: &str, indent: &str) -> String {
    comment
        .replace("*/", "*\\/")
        .lines()
        .map(|line| format!("{indent} * {line}").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Escape text for use inside a single-quoted PHP string.
pub fn php_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Output suffix for a template file name.
fn suffix_for(scope: TemplateScope, file_name: &str) -> String {
    let stem = file_name
        .strip_suffix(TEMPLATE_EXTENSION)
        .unwrap_or(file_name);
    match scope.marker() {
        Some(marker) => stem.replace(marker, ""),
        None => stem.to_string(),
    }
}

/// The loaded template bundle.
pub struct TemplateRegistry {
    handlebars: Handlebars<'static>,
    templates: Vec<Template>,
}

impl TemplateRegistry {
    /// Load the templates compiled into this crate.
    pub fn bundled() -> GeneratorResult<Self> {
        Self::from_sources(BUNDLE.iter().copied())
    }

    /// Load templates from `(scope, file name, body)` triples, in order.
    pub fn from_sources<'a>(
        sources: impl IntoIterator<Item = TemplateSource<'a>>,
    ) -> GeneratorResult<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper("ucfirst", Box::new(ucfirst_helper));
        handlebars.register_helper("lcfirst", Box::new(lcfirst_helper));
        handlebars.register_helper("php_doc", Box::new(php_doc_helper));
        handlebars.register_helper("php_string", Box::new(php_string_helper));

        let mut templates: Vec<Template> = Vec::new();
        for (scope, file_name, body) in sources {
            let suffix = suffix_for(scope, file_name);
            let load_error = |message: String| GeneratorError::TemplateLoad {
                template: file_name.to_string(),
                message,
            };

            if scope == TemplateScope::Global && suffix.is_empty() {
                return Err(load_error(
                    "global templates need a non-empty output name".into(),
                ));
            }
            if let Some(other) = templates
                .iter()
                .find(|t| t.scope == scope && t.suffix == suffix)
            {
                return Err(load_error(format!(
                    "output suffix '{suffix}' already produced by {}",
                    other.name
                )));
            }

            let key = format!("{scope}/{file_name}");
            handlebars
                .register_template_string(&key, body)
                .map_err(|e| load_error(e.to_string()))?;

            tracing::trace!(template = file_name, %scope, suffix = suffix.as_str(), "loaded template");
            templates.push(Template {
                name: file_name.to_string(),
                scope,
                suffix,
                key,
            });
        }

        Ok(Self {
            handlebars,
            templates,
        })
    }

    /// Templates of one scope, in load order.
    pub fn templates(&self, scope: TemplateScope) -> impl Iterator<Item = &Template> + '_ {
        self.templates.iter().filter(move |t| t.scope == scope)
    }

    /// All templates, in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Template> + '_ {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Render `template` for `entity` with a serializable context.
    pub fn render<T: Serialize>(
        &self,
        template: &Template,
        entity: &str,
        context: &T,
    ) -> GeneratorResult<String> {
        self.handlebars
            .render(&template.key, context)
            .map_err(|e| GeneratorError::Render {
                entity: entity.to_string(),
                template: template.name.clone(),
                message: e.to_string(),
            })
    }
}

impl fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateRegistry")
            .field("templates", &self.templates)
            .finish()
    }
}

#[cfg(test)]
#[path = "registry/registry_tests.rs"]
mod registry_tests;
