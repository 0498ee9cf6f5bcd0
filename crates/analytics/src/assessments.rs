//! Qualitative judgments as fixed threshold rules.
//!
//! The cut points and wording are part of the output contract: commentary templates
//! embed these phrases verbatim. All rules read unrounded inputs.

/// Share of positive months (0..=1).
pub fn positive_assessment(positive_share: f64) -> &'static str {
    if positive_share > 0.6 {
        "strong consistency in generating positive returns"
    } else if positive_share > 0.45 {
        "a balanced mix of positive and negative periods"
    } else {
        "challenging consistency, with fewer than half of months positive"
    }
}

/// Excess total return over the benchmark, in percentage points.
pub fn excess_assessment(excess_pct: f64) -> &'static str {
    if excess_pct > 10.0 {
        "This represents significant outperformance, driven by active management decisions."
    } else if excess_pct > 0.0 {
        "The portfolio matched or modestly outperformed the benchmark."
    } else {
        "The portfolio underperformed the benchmark, reflecting positioning headwinds."
    }
}

pub fn recovery_assessment(annualized_vol_pct: f64, max_drawdown_pct: f64) -> &'static str {
    if annualized_vol_pct > 15.0 && max_drawdown_pct > -25.0 {
        "swift"
    } else {
        "moderate"
    }
}

/// An undefined skew reads as symmetric.
pub fn tail_assessment(skew: Option<f64>) -> &'static str {
    match skew {
        Some(s) if s > 0.3 => "Positive skewness indicates a desirable right-tail asymmetry.",
        Some(s) if s < -0.3 => "Negative skewness suggests greater downside tail risk.",
        _ => "Near-symmetric distribution with balanced tail behavior.",
    }
}

pub fn skew_assessment(skew: Option<f64>) -> &'static str {
    match skew {
        Some(s) if s > 0.3 => "a favorable bias toward positive returns",
        Some(s) if s < -0.3 => "a slight downside bias",
        _ => "near-symmetric return behavior",
    }
}

pub fn consistency_assessment(sharpe: f64) -> &'static str {
    if sharpe > 1.0 {
        "strong consistency"
    } else if sharpe > 0.5 {
        "moderate consistency"
    } else {
        "variable performance"
    }
}

pub fn risk_adjusted_assessment(sharpe: f64) -> &'static str {
    if sharpe > 1.0 {
        "excellent risk-adjusted returns"
    } else if sharpe > 0.5 {
        "adequate risk-adjusted returns"
    } else {
        "below-target risk-adjusted returns"
    }
}

/// `equities_pct` is the latest weight of the asset class named exactly `Equities`,
/// or zero when the fund has none.
pub fn allocation_style(equities_pct: f64, annualized_vol_pct: f64) -> &'static str {
    if equities_pct > 60.0 {
        "growth-oriented"
    } else if annualized_vol_pct < 5.0 {
        "income-oriented"
    } else {
        "balanced"
    }
}

pub fn risk_balance_assessment(score_range: f64) -> &'static str {
    if score_range > 5.0 {
        "concentrated"
    } else if score_range > 3.0 {
        "moderate"
    } else {
        "well-balanced"
    }
}

pub fn positive_holdings_assessment(all_positive: bool) -> &'static str {
    if all_positive {
        "All holdings delivered positive trailing returns, reflecting disciplined selection."
    } else {
        "Returns were mixed, with some holdings detracting from overall performance."
    }
}
