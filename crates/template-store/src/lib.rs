//! # Template Store
//!
//! Keeps report templates addressable by id and hands out validated `Template` values.
//! Documents are read and checked on every `load`, so a malformed template is rejected
//! before any fund data is touched, and edits on disk are picked up without a restart.

pub mod error;
pub mod validate;

pub use error::TemplateError;

use core_types::{Template, TemplateSummary};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
enum Source {
    File(PathBuf),
    Inline(String),
}

/// A collection of template documents keyed by template id.
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    sources: BTreeMap<String, Source>,
}

impl TemplateStore {
    /// Indexes every `*.json` file in `dir`; the file stem is the template id.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, TemplateError> {
        let dir = dir.as_ref();
        let io_err = |source| TemplateError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut sources = BTreeMap::new();
        for entry in fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(id) = path.file_stem().and_then(|s| s.to_str()) {
                sources.insert(id.to_string(), Source::File(path.clone()));
            }
        }

        tracing::debug!(dir = %dir.display(), templates = sources.len(), "Indexed template directory.");
        Ok(Self { sources })
    }

    /// Builds an in-memory store from `(template_id, json)` pairs.
    pub fn from_sources<I, K, V>(sources: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            sources: sources
                .into_iter()
                .map(|(id, json)| (id.into(), Source::Inline(json.into())))
                .collect(),
        }
    }

    /// Known template ids, sorted.
    pub fn ids(&self) -> Vec<String> {
        self.sources.keys().cloned().collect()
    }

    pub fn contains(&self, template_id: &str) -> bool {
        self.sources.contains_key(template_id)
    }

    /// Reads, parses and validates the template stored under `template_id`.
    pub fn load(&self, template_id: &str) -> Result<Template, TemplateError> {
        let source = self
            .sources
            .get(template_id)
            .ok_or_else(|| TemplateError::NotFound {
                template_id: template_id.to_string(),
                available: self.ids(),
            })?;

        let json = match source {
            Source::File(path) => fs::read_to_string(path).map_err(|source| TemplateError::Io {
                path: path.clone(),
                source,
            })?,
            Source::Inline(json) => json.clone(),
        };

        let parse_err = |source| TemplateError::Parse {
            template_id: template_id.to_string(),
            source,
        };
        let document: Value = serde_json::from_str(&json).map_err(parse_err)?;
        validate::check_required_fields(template_id, &document)?;
        let template: Template = serde_json::from_value(document).map_err(parse_err)?;
        validate::validate_template(template_id, &template)?;

        tracing::debug!(template_id, sections = template.sections.len(), "Loaded template.");
        Ok(template)
    }

    /// Summaries of every template, in id order. Fails on the first invalid template.
    pub fn list(&self) -> Result<Vec<TemplateSummary>, TemplateError> {
        self.sources
            .keys()
            .map(|id| self.load(id).map(|t| t.summary()))
            .collect()
    }
}
