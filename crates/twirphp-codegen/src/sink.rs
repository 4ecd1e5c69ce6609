//! Destinations for rendered artifacts.
//!
//! [`ArtifactSet`] buffers every artifact of a run in memory. Nothing reaches
//! protoc or the filesystem until the whole run has succeeded, so a failure
//! leaves no partial output behind.

use crate::registry::TemplateScope;
use prost_types::compiler::code_generator_response;
use std::collections::HashMap;
use std::path::Path;
use twirphp_core::{CollisionPolicy, GeneratorError, GeneratorResult};

/// One rendered output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Output path relative to the output root (e.g. `Acme/Billing/Invoice.php`).
    pub path: String,
    pub content: String,
    pub scope: TemplateScope,
    /// File name of the template that produced it.
    pub template: String,
}

/// Receives artifacts one at a time.
pub trait ArtifactSink {
    fn write(&mut self, artifact: Artifact) -> GeneratorResult<()>;
}

/// In-memory artifact collection keyed by output path.
///
/// Iteration follows first-write order.
#[derive(Debug, Default)]
pub struct ArtifactSet {
    policy: CollisionPolicy,
    artifacts: Vec<Artifact>,
    by_path: HashMap<String, usize>,
}

impl ArtifactSet {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&Artifact> {
        self.by_path.get(path).map(|&i| &self.artifacts[i])
    }

    pub fn contains(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> + '_ {
        self.artifacts.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.artifacts.iter().map(|a| a.path.as_str())
    }

    /// Convert into protoc response entries.
    pub fn into_response_files(self) -> Vec<code_generator_response::File> {
        self.artifacts
            .into_iter()
            .map(|artifact| code_generator_response::File {
                name: Some(artifact.path),
                content: Some(artifact.content),
                ..Default::default()
            })
            .collect()
    }

    /// Write every artifact below `root`, creating directories as needed.
    ///
    /// Returns the number of files written.
    pub fn write_to_dir(&self, root: &Path) -> GeneratorResult<usize> {
        for artifact in &self.artifacts {
            let target = root.join(&artifact.path);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&target, &artifact.content)?;
            tracing::debug!(path = %target.display(), "wrote file");
        }
        Ok(self.artifacts.len())
    }
}

impl ArtifactSink for ArtifactSet {
    fn write(&mut self, artifact: Artifact) -> GeneratorResult<()> {
        match self.by_path.get(&artifact.path) {
            None => {
                self.by_path
                    .insert(artifact.path.clone(), self.artifacts.len());
                self.artifacts.push(artifact);
                Ok(())
            }
            Some(&existing) => match self.policy {
                CollisionPolicy::Error => Err(GeneratorError::OutputCollision {
                    path: artifact.path,
                }),
                CollisionPolicy::Overwrite => {
                    tracing::warn!(
                        path = artifact.path.as_str(),
                        previous = self.artifacts[existing].template.as_str(),
                        template = artifact.template.as_str(),
                        "output path generated twice, keeping the last write"
                    );
                    self.artifacts[existing] = artifact;
                    Ok(())
                }
            },
        }
    }
}
