use serde::{Deserialize, Serialize};
use std::fmt;

/// The optional, fund-type-specific datasets that unlock extra template sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionDataset {
    SectorExposure,
    IncomeStream,
    DurationProfile,
    MonthlyPnl,
}

impl ExtensionDataset {
    pub const ALL: [ExtensionDataset; 4] = [
        ExtensionDataset::SectorExposure,
        ExtensionDataset::IncomeStream,
        ExtensionDataset::DurationProfile,
        ExtensionDataset::MonthlyPnl,
    ];

    /// The dataset name used as the key in `FundDataset::extensions`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtensionDataset::SectorExposure => "sector_exposure",
            ExtensionDataset::IncomeStream => "income_stream",
            ExtensionDataset::DurationProfile => "duration_profile",
            ExtensionDataset::MonthlyPnl => "monthly_pnl",
        }
    }

    /// The profile flag that records whether this dataset is present.
    pub fn flag_key(&self) -> &'static str {
        match self {
            ExtensionDataset::SectorExposure => "has_sector_exposure",
            ExtensionDataset::IncomeStream => "has_income_stream",
            ExtensionDataset::DurationProfile => "has_duration_profile",
            ExtensionDataset::MonthlyPnl => "has_monthly_pnl",
        }
    }
}

impl fmt::Display for ExtensionDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chart identifiers recognised by the external chart registry.
///
/// This enum is the registry's contract with the composition engine: every chart a
/// template may reference is listed here, together with the extension dataset (if any)
/// that its renderer needs. A template naming any other chart fails to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartId {
    Histogram,
    LineChart,
    SpiderChart,
    StackedArea,
    DrawdownChart,
    PieChart,
    RollingReturns,
    ContributorBar,
    IncomeChart,
    DurationBar,
    SectorBar,
}

impl ChartId {
    pub const ALL: [ChartId; 11] = [
        ChartId::Histogram,
        ChartId::LineChart,
        ChartId::SpiderChart,
        ChartId::StackedArea,
        ChartId::DrawdownChart,
        ChartId::PieChart,
        ChartId::RollingReturns,
        ChartId::ContributorBar,
        ChartId::IncomeChart,
        ChartId::DurationBar,
        ChartId::SectorBar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartId::Histogram => "histogram",
            ChartId::LineChart => "line_chart",
            ChartId::SpiderChart => "spider_chart",
            ChartId::StackedArea => "stacked_area",
            ChartId::DrawdownChart => "drawdown_chart",
            ChartId::PieChart => "pie_chart",
            ChartId::RollingReturns => "rolling_returns",
            ChartId::ContributorBar => "contributor_bar",
            ChartId::IncomeChart => "income_chart",
            ChartId::DurationBar => "duration_bar",
            ChartId::SectorBar => "sector_bar",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChartId::Histogram => "Return Distribution Histogram",
            ChartId::LineChart => "Performance vs Benchmark",
            ChartId::SpiderChart => "Risk Factor Radar",
            ChartId::StackedArea => "Allocation Over Time",
            ChartId::DrawdownChart => "Drawdown Analysis",
            ChartId::PieChart => "Current Allocation Breakdown",
            ChartId::RollingReturns => "Rolling 12-Month Returns",
            ChartId::ContributorBar => "Top/Bottom Contributors",
            ChartId::IncomeChart => "Income Distribution",
            ChartId::DurationBar => "Duration Bucket Exposure",
            ChartId::SectorBar => "Sector Concentration",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ChartId::Histogram => "Frequency distribution of monthly returns with mean and percentile markers.",
            ChartId::LineChart => "Cumulative performance of the portfolio against its benchmark.",
            ChartId::SpiderChart => "Scores across risk dimensions on a radar.",
            ChartId::StackedArea => "How the asset allocation changed over time.",
            ChartId::DrawdownChart => "Underwater chart of peak-to-trough losses.",
            ChartId::PieChart => "Donut chart of the current allocation.",
            ChartId::RollingReturns => "Rolling 12-month return over time.",
            ChartId::ContributorBar => "Holding-level returns, winners and losers.",
            ChartId::IncomeChart => "Quarterly income per unit over time.",
            ChartId::DurationBar => "Fixed-income duration bucket exposure.",
            ChartId::SectorBar => "Sector weights of the portfolio.",
        }
    }

    /// The extension dataset this chart cannot be drawn without.
    pub fn backing_dataset(&self) -> Option<ExtensionDataset> {
        match self {
            ChartId::IncomeChart => Some(ExtensionDataset::IncomeStream),
            ChartId::DurationBar => Some(ExtensionDataset::DurationProfile),
            ChartId::SectorBar => Some(ExtensionDataset::SectorExposure),
            _ => None,
        }
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emphasis given to a section by the document renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

/// What the hydrator does with a `{name}` that the metrics profile does not define.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum PlaceholderPolicy {
    /// Leave the token verbatim in the output and report it as a warning.
    #[default]
    PassThrough,
    /// Fail the composition.
    Strict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_ids_serialize_as_registry_names() {
        for chart in ChartId::ALL {
            let json = serde_json::to_string(&chart).unwrap();
            assert_eq!(json, format!("\"{}\"", chart.as_str()));
        }
    }

    #[test]
    fn placeholder_policy_reads_snake_case() {
        assert_eq!(PlaceholderPolicy::default(), PlaceholderPolicy::PassThrough);
        let policy: PlaceholderPolicy = serde_json::from_str("\"pass_through\"").unwrap();
        assert_eq!(policy, PlaceholderPolicy::PassThrough);
        let policy: PlaceholderPolicy = serde_json::from_str("\"strict\"").unwrap();
        assert_eq!(policy, PlaceholderPolicy::Strict);
        assert!(serde_json::from_str::<PlaceholderPolicy>("\"lenient\"").is_err());
    }

    #[test]
    fn only_extension_charts_have_backing_datasets() {
        let backed: Vec<ChartId> = ChartId::ALL
            .into_iter()
            .filter(|c| c.backing_dataset().is_some())
            .collect();
        assert_eq!(
            backed,
            vec![ChartId::IncomeChart, ChartId::DurationBar, ChartId::SectorBar]
        );
    }

    #[test]
    fn unknown_chart_id_does_not_parse() {
        let parsed: Result<ChartId, _> = serde_json::from_str("\"waterfall\"");
        assert!(parsed.is_err());
    }
}
