use core_types::ChartId;
use serde::Serialize;
use std::fmt;

/// A degraded but successful outcome of a composition run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompositionWarning {
    /// A section was dropped because an earlier section already shows the chart.
    DuplicateChart { chart: ChartId, section: String },
    /// A placeholder had no value in the metrics profile and was left verbatim.
    UnresolvedPlaceholder { name: String, field: String },
}

impl fmt::Display for CompositionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositionWarning::DuplicateChart { chart, section } => write!(
                f,
                "section '{}' dropped: chart '{}' is already shown",
                section, chart
            ),
            CompositionWarning::UnresolvedPlaceholder { name, field } => {
                write!(f, "placeholder '{{{}}}' in {} left unresolved", name, field)
            }
        }
    }
}
