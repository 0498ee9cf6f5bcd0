use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template '{template_id}' not found. Available templates: {}", .available.join(", "))]
    NotFound {
        template_id: String,
        available: Vec<String>,
    },

    #[error("Template '{template_id}' is invalid: {reason}")]
    Validation { template_id: String, reason: String },

    #[error("Failed to parse template '{template_id}': {source}")]
    Parse {
        template_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read templates from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
