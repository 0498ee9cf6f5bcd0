use crate::enums::{ChartId, Priority};
use serde::{Deserialize, Serialize};

/// A section with every placeholder resolved, ready for the document renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSection {
    pub title: String,
    pub chart: Option<ChartId>,
    pub commentary: String,
    pub priority: Priority,
    pub include_holdings_table: bool,
}

/// The finished output of a composition run.
///
/// This is the only contract with the chart and document renderers. No chart id appears
/// in more than one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPlan {
    pub report_title: String,
    pub report_subtitle: String,
    pub fund_character: Option<String>,
    pub sections: Vec<ResolvedSection>,
}

impl RenderPlan {
    pub fn charts(&self) -> impl Iterator<Item = ChartId> + '_ {
        self.sections.iter().filter_map(|s| s.chart)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
