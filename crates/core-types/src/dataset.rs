use crate::enums::ExtensionDataset;
use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single periodic (monthly) return, expressed as a fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnObservation {
    pub date: NaiveDate,
    #[serde(rename = "return")]
    pub value: f64,
}

/// Cumulative value of the portfolio and its benchmark at one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub date: NaiveDate,
    pub portfolio: f64,
    pub benchmark: f64,
}

/// Risk-factor scores, one per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScores {
    pub categories: Vec<String>,
    pub scores: Vec<f64>,
}

/// Allocation weights (in percent) of every asset class at one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationPoint {
    pub date: NaiveDate,
    pub weights: Vec<f64>,
}

/// Allocation over time. `weights[i]` of every point belongs to `asset_classes[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSeries {
    pub asset_classes: Vec<String>,
    pub points: Vec<AllocationPoint>,
}

impl AllocationSeries {
    pub fn first(&self) -> Option<&AllocationPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&AllocationPoint> {
        self.points.last()
    }
}

/// A table cell: a number, a piece of text, or nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Null,
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// A loosely-shaped table (holdings, extension datasets) with named columns.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Finds the first column whose header contains `keyword`, ignoring case.
    pub fn find_column(&self, keyword: &str) -> Option<usize> {
        let keyword = keyword.to_lowercase();
        self.columns
            .iter()
            .position(|c| c.to_lowercase().contains(&keyword))
    }

    /// Like `find_column`, but a missing column is a lookup failure.
    pub fn require_column(&self, table: &str, keyword: &str) -> Result<usize, CoreError> {
        self.find_column(keyword).ok_or_else(|| CoreError::ColumnNotFound {
            table: table.to_string(),
            keyword: keyword.to_string(),
        })
    }

    /// The numeric values of a column, skipping text and empty cells.
    pub fn numeric_column(&self, index: usize) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|row| row.get(index).and_then(Cell::as_f64))
            .collect()
    }

    fn validate(&self, name: &str) -> Result<(), CoreError> {
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(CoreError::InvalidInput(
                    name.to_string(),
                    format!(
                        "row {} has {} cells but the table has {} columns",
                        i,
                        row.len(),
                        self.columns.len()
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// All raw data for one fund.
///
/// A dataset is read-only for the duration of a composition run. Call `validate` (or
/// construct it through `from_json`) before handing it to the profiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundDataset {
    pub fund_id: String,
    pub name: String,
    pub returns: Vec<ReturnObservation>,
    pub performance: Vec<PerformancePoint>,
    pub risk_scores: RiskScores,
    pub allocation: AllocationSeries,
    pub holdings: Table,
    /// Optional extension datasets keyed by dataset name (e.g. `income_stream`).
    #[serde(default)]
    pub extensions: BTreeMap<String, Table>,
}

impl FundDataset {
    /// Parses and validates a dataset from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let dataset: FundDataset = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    pub fn has(&self, dataset: ExtensionDataset) -> bool {
        self.has_extension(dataset.as_str())
    }

    pub fn extension(&self, name: &str) -> Option<&Table> {
        self.extensions.get(name)
    }

    /// The periodic return values in series order.
    pub fn return_values(&self) -> Vec<f64> {
        self.returns.iter().map(|r| r.value).collect()
    }

    /// Checks the schema contract of the dataset.
    ///
    /// Structural problems are reported as `InvalidInput`; a holdings table without a
    /// weight column is reported as `ColumnNotFound`, the same failure the profiler would
    /// otherwise hit at lookup time.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.returns.len() < 2 {
            return Err(self.invalid("returns", "at least 2 observations are required"));
        }

        let first = self
            .performance
            .first()
            .ok_or_else(|| self.invalid("performance", "series is empty"))?;
        if first.portfolio == 0.0 || first.benchmark == 0.0 {
            return Err(self.invalid("performance", "first portfolio and benchmark values must be non-zero"));
        }

        let risk = &self.risk_scores;
        if risk.categories.len() != risk.scores.len() {
            return Err(self.invalid(
                "risk_scores",
                &format!(
                    "{} categories but {} scores",
                    risk.categories.len(),
                    risk.scores.len()
                ),
            ));
        }
        if risk.scores.len() < 2 {
            return Err(self.invalid("risk_scores", "at least 2 categories are required"));
        }

        let alloc = &self.allocation;
        if alloc.asset_classes.is_empty() || alloc.points.is_empty() {
            return Err(self.invalid("allocation", "needs at least one asset class and one point"));
        }
        if let Some(point) = alloc
            .points
            .iter()
            .find(|p| p.weights.len() != alloc.asset_classes.len())
        {
            return Err(self.invalid(
                "allocation",
                &format!(
                    "point {} has {} weights for {} asset classes",
                    point.date,
                    point.weights.len(),
                    alloc.asset_classes.len()
                ),
            ));
        }

        self.holdings.validate("holdings")?;
        self.holdings.require_column("holdings", "weight")?;

        for (name, table) in &self.extensions {
            table.validate(name)?;
        }

        tracing::debug!(fund_id = %self.fund_id, "Fund dataset passed validation.");
        Ok(())
    }

    fn invalid(&self, field: &str, reason: &str) -> CoreError {
        CoreError::InvalidInput(format!("{}.{}", self.fund_id, field), reason.to_string())
    }
}
