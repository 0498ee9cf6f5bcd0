use analytics::AnalyticsError;
use core_types::ChartId;
use std::path::PathBuf;
use template_store::TemplateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Metrics error: {0}")]
    Analytics(#[from] AnalyticsError),

    /// Raised only under the strict placeholder policy.
    #[error("Unresolved placeholder '{{{name}}}' in \"{text}\"")]
    UnresolvedPlaceholder { name: String, text: String },
}

impl ComposeError {
    /// True when the fund's holdings table lacked an expected column.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, ComposeError::Analytics(e) if e.is_lookup_failure())
    }
}

/// Failures reported by a `ChartRenderer`.
#[derive(Error, Debug)]
pub enum ChartRenderError {
    #[error("Failed to render {chart}: {reason}")]
    Render { chart: ChartId, reason: String },

    #[error("Failed to write chart output to {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
