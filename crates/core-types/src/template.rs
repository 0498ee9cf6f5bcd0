use crate::enums::ChartId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One section of a report template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub title: String,
    #[serde(default)]
    pub chart: Option<ChartId>,
    pub commentary_template: String,
    /// Name of an extension dataset the section cannot be shown without.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_data: Option<String>,
    #[serde(default)]
    pub include_holdings_table: bool,
}

impl SectionSpec {
    /// Every dataset name this section depends on: the declared `requires_data` tag
    /// followed by the backing dataset of its chart, as registered on `ChartId`.
    pub fn data_dependencies(&self) -> impl Iterator<Item = &str> {
        self.requires_data
            .as_deref()
            .into_iter()
            .chain(
                self.chart
                    .and_then(|c| c.backing_dataset())
                    .map(|d| d.as_str()),
            )
    }
}

/// A reusable, data-independent definition of report structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub template_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Free-form hints describing which funds the template suits.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub match_criteria: BTreeMap<String, Value>,
    pub report_title: String,
    #[serde(default)]
    pub report_subtitle: String,
    pub sections: Vec<SectionSpec>,
}

impl Template {
    /// Chart ids in section order, duplicates included.
    pub fn charts(&self) -> Vec<ChartId> {
        self.sections.iter().filter_map(|s| s.chart).collect()
    }

    pub fn summary(&self) -> TemplateSummary {
        TemplateSummary {
            template_id: self.template_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            match_criteria: self.match_criteria.clone(),
            n_sections: self.sections.len(),
            charts: self.charts(),
        }
    }
}

/// Listing entry for a template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateSummary {
    pub template_id: String,
    pub name: String,
    pub description: String,
    pub match_criteria: BTreeMap<String, Value>,
    pub n_sections: usize,
    pub charts: Vec<ChartId>,
}
