use crate::assessments;
use crate::error::AnalyticsError;
use crate::stats;
use core_types::{ExtensionDataset, FundDataset, MetricValue, MetricsProfile};

/// Return observations per year; the series is monthly.
pub const PERIODS_PER_YEAR: f64 = 12.0;

/// Below this standard deviation the return series counts as flat.
const ZERO_VOLATILITY: f64 = 1e-12;

/// Every key a `MetricsProfile` produced by `MetricsProfiler` carries.
pub const PROFILE_KEYS: [&str; 47] = [
    "fund_name",
    "n_months",
    "annualized_return_pct",
    "annualized_vol_pct",
    "sharpe_ratio",
    "mean_monthly_pct",
    "max_return_pct",
    "min_return_pct",
    "pct_positive_months",
    "skewness",
    "kurtosis",
    "max_drawdown_pct",
    "portfolio_total_return_pct",
    "benchmark_total_return_pct",
    "excess_return_pct",
    "n_holdings",
    "top_holding_weight_pct",
    "top_3_concentration_pct",
    "max_holding_return",
    "min_holding_return",
    "max_risk_category",
    "max_risk_score",
    "second_risk_category",
    "min_risk_category",
    "min_risk_score",
    "avg_risk_score",
    "score_range",
    "n_asset_classes",
    "largest_allocation_name",
    "largest_allocation_pct",
    "largest_shift_name",
    "largest_shift_magnitude",
    "cash_weight_pct",
    "positive_assessment",
    "excess_assessment",
    "recovery_assessment",
    "tail_assessment",
    "consistency_assessment",
    "risk_adjusted_assessment",
    "allocation_style",
    "risk_balance_assessment",
    "skew_assessment",
    "positive_holdings_assessment",
    "has_sector_exposure",
    "has_income_stream",
    "has_duration_profile",
    "has_monthly_pnl",
];

/// Unrounded figures the qualitative rules are evaluated on.
#[derive(Debug, Default)]
struct Signals {
    positive_share: f64,
    annualized_vol_pct: f64,
    sharpe: f64,
    max_drawdown_pct: f64,
    skew: Option<f64>,
    excess_pct: f64,
    all_holdings_positive: bool,
    score_range: f64,
    equities_pct: f64,
}

/// A stateless calculator that derives every template variable from a fund's raw data.
#[derive(Debug, Default)]
pub struct MetricsProfiler {}

impl MetricsProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for profiling a fund.
    ///
    /// The dataset is validated first, so a holdings table without a weight column
    /// surfaces as a lookup failure before any figure is computed.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `MetricsProfile` or an `AnalyticsError`.
    pub fn profile(&self, data: &FundDataset) -> Result<MetricsProfile, AnalyticsError> {
        data.validate()?;

        let mut profile = MetricsProfile::new();
        let mut signals = Signals::default();

        profile.insert("fund_name", data.name.as_str());
        self.profile_returns(data, &mut profile, &mut signals)?;
        self.profile_performance(data, &mut profile, &mut signals)?;
        self.profile_holdings(data, &mut profile, &mut signals)?;
        self.profile_risk(data, &mut profile, &mut signals)?;
        self.profile_allocation(data, &mut profile, &mut signals)?;
        self.assess(&signals, &mut profile);

        for dataset in ExtensionDataset::ALL {
            profile.insert(dataset.flag_key(), data.has(dataset));
        }

        tracing::debug!(
            fund_id = %data.fund_id,
            variables = profile.len(),
            "Computed metrics profile."
        );
        Ok(profile)
    }

    /// Return statistics, annualized with `PERIODS_PER_YEAR`.
    fn profile_returns(
        &self,
        data: &FundDataset,
        profile: &mut MetricsProfile,
        signals: &mut Signals,
    ) -> Result<(), AnalyticsError> {
        let r = data.return_values();
        if r.len() < 2 {
            return Err(AnalyticsError::NotEnoughData(format!(
                "{} return observations for fund '{}'",
                r.len(),
                data.fund_id
            )));
        }

        let mean = stats::mean(&r);
        let std = stats::sample_std(&r);
        let annualization = PERIODS_PER_YEAR.sqrt();

        let annualized_return_pct = ((1.0 + mean).powf(PERIODS_PER_YEAR) - 1.0) * 100.0;
        let annualized_vol_pct = std * annualization * 100.0;
        // A flat series has no risk to adjust for.
        let sharpe = if std > ZERO_VOLATILITY {
            mean / std * annualization
        } else {
            0.0
        };
        let max_drawdown_pct = stats::max_drawdown(&r) * 100.0;
        let skew = stats::skewness(&r);
        let kurtosis = stats::excess_kurtosis(&r);
        let positive_share = stats::positive_share(&r);
        let max_return = r.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min_return = r.iter().copied().fold(f64::INFINITY, f64::min);

        profile.insert("n_months", r.len());
        profile.insert("annualized_return_pct", MetricValue::rounded(annualized_return_pct, 2));
        profile.insert("annualized_vol_pct", MetricValue::rounded(annualized_vol_pct, 2));
        profile.insert("sharpe_ratio", MetricValue::rounded(sharpe, 2));
        profile.insert("mean_monthly_pct", MetricValue::rounded(mean * 100.0, 3));
        profile.insert("max_return_pct", MetricValue::rounded(max_return * 100.0, 2));
        profile.insert("min_return_pct", MetricValue::rounded(min_return * 100.0, 2));
        profile.insert("pct_positive_months", MetricValue::rounded(positive_share * 100.0, 1));
        profile.insert(
            "skewness",
            skew.map_or(MetricValue::Unavailable, |s| MetricValue::rounded(s, 3)),
        );
        profile.insert(
            "kurtosis",
            kurtosis.map_or(MetricValue::Unavailable, |k| MetricValue::rounded(k, 3)),
        );
        profile.insert("max_drawdown_pct", MetricValue::rounded(max_drawdown_pct, 2));

        signals.positive_share = positive_share;
        signals.annualized_vol_pct = annualized_vol_pct;
        signals.sharpe = sharpe;
        signals.max_drawdown_pct = max_drawdown_pct;
        signals.skew = skew;
        Ok(())
    }

    /// Total return of the portfolio and the benchmark over the whole series.
    fn profile_performance(
        &self,
        data: &FundDataset,
        profile: &mut MetricsProfile,
        signals: &mut Signals,
    ) -> Result<(), AnalyticsError> {
        let (first, last) = match (data.performance.first(), data.performance.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(AnalyticsError::NotEnoughData(format!(
                    "empty performance series for fund '{}'",
                    data.fund_id
                )));
            }
        };

        let portfolio_total = (last.portfolio / first.portfolio - 1.0) * 100.0;
        let benchmark_total = (last.benchmark / first.benchmark - 1.0) * 100.0;
        let excess = portfolio_total - benchmark_total;

        profile.insert("portfolio_total_return_pct", MetricValue::rounded(portfolio_total, 2));
        profile.insert("benchmark_total_return_pct", MetricValue::rounded(benchmark_total, 2));
        profile.insert("excess_return_pct", MetricValue::rounded(excess, 2));

        signals.excess_pct = excess;
        Ok(())
    }

    /// Concentration and dispersion of the holdings table.
    fn profile_holdings(
        &self,
        data: &FundDataset,
        profile: &mut MetricsProfile,
        signals: &mut Signals,
    ) -> Result<(), AnalyticsError> {
        let holdings = &data.holdings;
        let weight_col = holdings.require_column("holdings", "weight")?;
        let weights = holdings.numeric_column(weight_col);
        let holding_returns = holdings
            .find_column("return")
            .map(|col| holdings.numeric_column(col))
            .unwrap_or_default();

        profile.insert("n_holdings", holdings.len());
        profile.insert(
            "top_holding_weight_pct",
            weights
                .iter()
                .copied()
                .reduce(f64::max)
                .map_or(MetricValue::Unavailable, |w| MetricValue::rounded(w, 1)),
        );
        profile.insert(
            "top_3_concentration_pct",
            if weights.is_empty() {
                MetricValue::Unavailable
            } else {
                MetricValue::rounded(stats::top_n_sum(&weights, 3), 1)
            },
        );
        profile.insert(
            "max_holding_return",
            holding_returns
                .iter()
                .copied()
                .reduce(f64::max)
                .map_or(MetricValue::Unavailable, |v| MetricValue::rounded(v, 1)),
        );
        profile.insert(
            "min_holding_return",
            holding_returns
                .iter()
                .copied()
                .reduce(f64::min)
                .map_or(MetricValue::Unavailable, |v| MetricValue::rounded(v, 1)),
        );

        signals.all_holdings_positive = holding_returns.iter().all(|v| *v >= 0.0);
        Ok(())
    }

    /// Extremes of the risk-factor scores.
    fn profile_risk(
        &self,
        data: &FundDataset,
        profile: &mut MetricsProfile,
        signals: &mut Signals,
    ) -> Result<(), AnalyticsError> {
        let risk = &data.risk_scores;
        let mut ranked: Vec<(&str, f64)> = risk
            .categories
            .iter()
            .map(String::as_str)
            .zip(risk.scores.iter().copied())
            .collect();
        // Stable: equal scores keep their input order.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let (highest, second, lowest) = match ranked.as_slice() {
            [first, second, .., last] => (*first, *second, *last),
            [first, second] => (*first, *second, *second),
            _ => {
                return Err(AnalyticsError::NotEnoughData(format!(
                    "fewer than two risk categories for fund '{}'",
                    data.fund_id
                )));
            }
        };

        let score_range = highest.1 - lowest.1;

        profile.insert("max_risk_category", highest.0);
        profile.insert("max_risk_score", MetricValue::raw(highest.1));
        profile.insert("second_risk_category", second.0);
        profile.insert("min_risk_category", lowest.0);
        profile.insert("min_risk_score", MetricValue::raw(lowest.1));
        profile.insert("avg_risk_score", MetricValue::rounded(stats::mean(&risk.scores), 2));
        profile.insert("score_range", MetricValue::rounded(score_range, 1));

        signals.score_range = score_range;
        Ok(())
    }

    /// Current allocation and how it shifted since the first observation.
    fn profile_allocation(
        &self,
        data: &FundDataset,
        profile: &mut MetricsProfile,
        signals: &mut Signals,
    ) -> Result<(), AnalyticsError> {
        let alloc = &data.allocation;
        let (first, last) = match (alloc.first(), alloc.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => {
                return Err(AnalyticsError::NotEnoughData(format!(
                    "empty allocation series for fund '{}'",
                    data.fund_id
                )));
            }
        };

        let changes: Vec<f64> = last
            .weights
            .iter()
            .zip(&first.weights)
            .map(|(l, f)| (l - f).abs())
            .collect();

        let largest = stats::argmax(&last.weights);
        let largest_shift = stats::argmax(&changes);

        profile.insert("n_asset_classes", alloc.asset_classes.len());
        match largest {
            Some(i) => {
                profile.insert("largest_allocation_name", alloc.asset_classes[i].as_str());
                profile.insert("largest_allocation_pct", MetricValue::rounded(last.weights[i], 1));
            }
            None => {
                profile.insert("largest_allocation_name", MetricValue::Unavailable);
                profile.insert("largest_allocation_pct", MetricValue::Unavailable);
            }
        }
        match largest_shift {
            Some(i) => {
                profile.insert("largest_shift_name", alloc.asset_classes[i].as_str());
                profile.insert("largest_shift_magnitude", MetricValue::rounded(changes[i], 1));
            }
            None => {
                profile.insert("largest_shift_name", MetricValue::Unavailable);
                profile.insert("largest_shift_magnitude", MetricValue::Unavailable);
            }
        }

        let cash_weight = alloc
            .asset_classes
            .iter()
            .position(|c| c.to_lowercase().contains("cash"))
            .map_or(0.0, |i| last.weights[i]);
        profile.insert("cash_weight_pct", MetricValue::rounded(cash_weight, 1));

        signals.equities_pct = alloc
            .asset_classes
            .iter()
            .position(|c| c == "Equities")
            .map_or(0.0, |i| last.weights[i]);
        Ok(())
    }

    /// Applies the threshold rules to the unrounded signals.
    fn assess(&self, s: &Signals, profile: &mut MetricsProfile) {
        profile.insert("positive_assessment", assessments::positive_assessment(s.positive_share));
        profile.insert("excess_assessment", assessments::excess_assessment(s.excess_pct));
        profile.insert(
            "recovery_assessment",
            assessments::recovery_assessment(s.annualized_vol_pct, s.max_drawdown_pct),
        );
        profile.insert("tail_assessment", assessments::tail_assessment(s.skew));
        profile.insert("consistency_assessment", assessments::consistency_assessment(s.sharpe));
        profile.insert("risk_adjusted_assessment", assessments::risk_adjusted_assessment(s.sharpe));
        profile.insert(
            "allocation_style",
            assessments::allocation_style(s.equities_pct, s.annualized_vol_pct),
        );
        profile.insert("risk_balance_assessment", assessments::risk_balance_assessment(s.score_range));
        profile.insert("skew_assessment", assessments::skew_assessment(s.skew));
        profile.insert(
            "positive_holdings_assessment",
            assessments::positive_holdings_assessment(s.all_holdings_positive),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{
        AllocationPoint, AllocationSeries, Cell, PerformancePoint, ReturnObservation, RiskScores,
        Table,
    };
    use std::collections::BTreeMap;

    fn date(month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, month, 28).unwrap()
    }

    fn dataset(returns: &[f64]) -> FundDataset {
        FundDataset {
            fund_id: "horizon_income".into(),
            name: "Horizon Stable Income Fund".into(),
            returns: returns
                .iter()
                .enumerate()
                .map(|(i, v)| ReturnObservation { date: date(i as u32 % 12 + 1), value: *v })
                .collect(),
            performance: vec![
                PerformancePoint { date: date(1), portfolio: 100.0, benchmark: 100.0 },
                PerformancePoint { date: date(12), portfolio: 112.0, benchmark: 100.5 },
            ],
            risk_scores: RiskScores {
                categories: vec![
                    "Market Risk".into(),
                    "Credit Risk".into(),
                    "Liquidity Risk".into(),
                    "ESG Risk".into(),
                ],
                scores: vec![3.5, 6.5, 2.0, 6.5],
            },
            allocation: AllocationSeries {
                asset_classes: vec!["Government Bonds".into(), "Equities".into(), "Cash".into()],
                points: vec![
                    AllocationPoint { date: date(3), weights: vec![50.0, 40.0, 10.0] },
                    AllocationPoint { date: date(12), weights: vec![55.0, 32.0, 13.0] },
                ],
            },
            holdings: Table::new(
                vec!["Holding".into(), "Weight (%)".into(), "1Y Return (%)".into()],
                vec![
                    vec![Cell::Text("Bond ETF".into()), Cell::Number(18.5), Cell::Number(2.8)],
                    vec![Cell::Text("Corp Fund".into()), Cell::Number(15.2), Cell::Number(4.5)],
                    vec![Cell::Text("TIPS".into()), Cell::Number(12.0), Cell::Number(3.2)],
                    vec![Cell::Text("Muni".into()), Cell::Number(10.5), Cell::Number(3.0)],
                ],
            ),
            extensions: BTreeMap::new(),
        }
    }

    fn text(profile: &MetricsProfile, key: &str) -> String {
        profile.get(key).unwrap_or_else(|| panic!("missing {}", key)).to_string()
    }

    #[test]
    fn zero_volatility_gives_zero_sharpe() {
        let profile = MetricsProfiler::new().profile(&dataset(&[0.01; 12])).unwrap();
        assert_eq!(text(&profile, "sharpe_ratio"), "0.0");
        assert_eq!(text(&profile, "annualized_vol_pct"), "0.0");
        assert_eq!(text(&profile, "consistency_assessment"), "variable performance");
        assert_eq!(text(&profile, "skewness"), "0.0");
    }

    #[test]
    fn every_profile_key_is_present() {
        let profile = MetricsProfiler::new().profile(&dataset(&[0.01, -0.02, 0.03])).unwrap();
        for key in PROFILE_KEYS {
            assert!(profile.contains_key(key), "profile lacks {}", key);
        }
        assert_eq!(profile.len(), PROFILE_KEYS.len());
        // Three observations: skewness is defined, kurtosis is not.
        assert!(profile.get("skewness").unwrap().is_available());
        assert_eq!(profile.get("kurtosis"), Some(&MetricValue::Unavailable));
    }

    #[test]
    fn performance_and_qualitative_figures() {
        let profile = MetricsProfiler::new()
            .profile(&dataset(&[0.004, 0.002, -0.001, 0.003, 0.005, 0.001]))
            .unwrap();
        assert_eq!(text(&profile, "fund_name"), "Horizon Stable Income Fund");
        assert_eq!(text(&profile, "n_months"), "6");
        assert_eq!(text(&profile, "portfolio_total_return_pct"), "12.0");
        assert_eq!(text(&profile, "benchmark_total_return_pct"), "0.5");
        assert_eq!(text(&profile, "excess_return_pct"), "11.5");
        assert_eq!(
            text(&profile, "excess_assessment"),
            "This represents significant outperformance, driven by active management decisions."
        );
        assert_eq!(text(&profile, "pct_positive_months"), "83.3");
        assert_eq!(
            text(&profile, "positive_assessment"),
            "strong consistency in generating positive returns"
        );
        assert_eq!(text(&profile, "max_drawdown_pct"), "-0.1");
        assert_eq!(text(&profile, "allocation_style"), "income-oriented");
    }

    #[test]
    fn holdings_concentration() {
        let profile = MetricsProfiler::new().profile(&dataset(&[0.01, 0.02, 0.03])).unwrap();
        assert_eq!(text(&profile, "n_holdings"), "4");
        assert_eq!(text(&profile, "top_holding_weight_pct"), "18.5");
        assert_eq!(text(&profile, "top_3_concentration_pct"), "45.7");
        assert_eq!(text(&profile, "max_holding_return"), "4.5");
        assert_eq!(text(&profile, "min_holding_return"), "2.8");
        assert_eq!(
            text(&profile, "positive_holdings_assessment"),
            "All holdings delivered positive trailing returns, reflecting disciplined selection."
        );
    }

    #[test]
    fn risk_ranking_keeps_input_order_on_ties() {
        let profile = MetricsProfiler::new().profile(&dataset(&[0.01, 0.02, 0.03])).unwrap();
        assert_eq!(text(&profile, "max_risk_category"), "Credit Risk");
        assert_eq!(text(&profile, "second_risk_category"), "ESG Risk");
        assert_eq!(text(&profile, "max_risk_score"), "6.5");
        assert_eq!(text(&profile, "min_risk_category"), "Liquidity Risk");
        assert_eq!(text(&profile, "min_risk_score"), "2.0");
        assert_eq!(text(&profile, "avg_risk_score"), "4.62");
        assert_eq!(text(&profile, "score_range"), "4.5");
        assert_eq!(text(&profile, "risk_balance_assessment"), "moderate");
    }

    #[test]
    fn allocation_shift_and_cash() {
        let profile = MetricsProfiler::new().profile(&dataset(&[0.01, 0.02, 0.03])).unwrap();
        assert_eq!(text(&profile, "n_asset_classes"), "3");
        assert_eq!(text(&profile, "largest_allocation_name"), "Government Bonds");
        assert_eq!(text(&profile, "largest_allocation_pct"), "55.0");
        assert_eq!(text(&profile, "largest_shift_name"), "Equities");
        assert_eq!(text(&profile, "largest_shift_magnitude"), "8.0");
        assert_eq!(text(&profile, "cash_weight_pct"), "13.0");
    }

    #[test]
    fn missing_return_column_reads_as_unavailable() {
        let mut data = dataset(&[0.01, 0.02, 0.03]);
        data.holdings.columns[2] = "Yield (%)".into();
        let profile = MetricsProfiler::new().profile(&data).unwrap();
        assert_eq!(text(&profile, "max_holding_return"), "N/A");
        assert_eq!(text(&profile, "min_holding_return"), "N/A");
    }

    #[test]
    fn missing_weight_column_is_a_lookup_failure() {
        let mut data = dataset(&[0.01, 0.02, 0.03]);
        data.holdings.columns[1] = "Position Size".into();
        let err = MetricsProfiler::new().profile(&data).unwrap_err();
        assert!(err.is_lookup_failure(), "unexpected error: {}", err);
        assert!(err.to_string().contains("weight"));
    }

    #[test]
    fn extension_flags_follow_membership() {
        let mut data = dataset(&[0.01, 0.02, 0.03]);
        data.extensions.insert("income_stream".into(), Table::default());
        let profile = MetricsProfiler::new().profile(&data).unwrap();
        assert_eq!(profile.get("has_income_stream"), Some(&MetricValue::Flag(true)));
        assert_eq!(profile.get("has_sector_exposure"), Some(&MetricValue::Flag(false)));
    }
}
