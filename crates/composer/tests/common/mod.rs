#![allow(dead_code)]

use core_types::{FundDataset, Template};
use serde_json::{Value, json};

fn monthly(values: &[f64]) -> Value {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| json!({"date": format!("2024-{:02}-28", i % 12 + 1), "return": v}))
        .collect()
}

fn core_fields(fund_id: &str, name: &str, returns: &[f64]) -> Value {
    json!({
        "fund_id": fund_id,
        "name": name,
        "returns": monthly(returns),
        "performance": [
            {"date": "2024-01-31", "portfolio": 100.0, "benchmark": 100.0},
            {"date": "2024-06-30", "portfolio": 104.0, "benchmark": 101.5},
            {"date": "2024-12-31", "portfolio": 108.0, "benchmark": 103.0}
        ],
        "risk_scores": {
            "categories": ["Interest Rate Risk", "Credit Risk", "Liquidity Risk", "Inflation Risk"],
            "scores": [6.0, 4.5, 2.0, 5.0]
        },
        "allocation": {
            "asset_classes": ["Bonds", "Equities", "Cash"],
            "points": [
                {"date": "2024-03-31", "weights": [55.0, 30.0, 15.0]},
                {"date": "2024-12-31", "weights": [60.0, 25.0, 15.0]}
            ]
        },
        "holdings": {
            "columns": ["Holding", "Weight (%)", "1Y Return (%)"],
            "rows": [
                ["US Treasury 10Y", 22.5, 3.1],
                ["Corporate Bond Fund", 18.0, 4.2],
                ["Dividend Equity ETF", 14.0, -1.5],
                ["Money Market", 15.0, 5.0]
            ]
        }
    })
}

/// An income fund with the income and duration extension tables.
pub fn horizon_income() -> FundDataset {
    let mut value = core_fields(
        "horizon_income",
        "Horizon Stable Income Fund",
        &[0.004, 0.006, -0.002, 0.005, 0.003, 0.007, 0.001, 0.004, -0.001, 0.006, 0.005, 0.003],
    );
    value["extensions"] = json!({
        "income_stream": {
            "columns": ["Month", "Income ($K)"],
            "rows": [["2024-01", 410.0], ["2024-02", 415.5], ["2024-03", 420.0]]
        },
        "duration_profile": {
            "columns": ["Bucket", "Weight (%)"],
            "rows": [["0-2Y", 30.0], ["2-5Y", 45.0], ["5Y+", 25.0]]
        }
    });
    serde_json::from_value(value).unwrap()
}

/// A fund with only the core data and no extension tables.
pub fn core_only() -> FundDataset {
    serde_json::from_value(core_fields(
        "core_only",
        "Core Only Fund",
        &[0.01, -0.02, 0.015, 0.03, -0.01, 0.005],
    ))
    .unwrap()
}

/// A fund whose monthly return never changes.
pub fn flat_returns() -> FundDataset {
    serde_json::from_value(core_fields("flat", "Flat Fund", &[0.01; 12])).unwrap()
}

/// A fund whose holdings table has no weight column.
pub fn missing_weight_column() -> FundDataset {
    let mut value = core_fields("no_weights", "No Weights Fund", &[0.01, 0.02, -0.01]);
    value["holdings"]["columns"] = json!(["Holding", "Position Size", "1Y Return (%)"]);
    serde_json::from_value(value).unwrap()
}

pub const STABLE_INCOME: &str = r#"{
    "template_id": "stable_income",
    "name": "Stable Income",
    "description": "Layout for income-oriented funds",
    "report_title": "{fund_name} Quarterly Report",
    "report_subtitle": "{n_months} months of history",
    "sections": [
        {"title": "Performance", "chart": "line_chart",
         "commentary_template": "Total return {portfolio_total_return_pct}% vs {benchmark_total_return_pct}%."},
        {"title": "Income", "chart": "income_chart", "requires_data": "income_stream",
         "commentary_template": "{fund_name} paid a steady income."},
        {"title": "Allocation", "chart": "pie_chart",
         "commentary_template": "{largest_allocation_name} is the largest sleeve at {largest_allocation_pct}%."},
        {"title": "Allocation Detail", "chart": "pie_chart",
         "commentary_template": "Repeated chart."},
        {"title": "Sectors", "chart": "sector_bar",
         "commentary_template": "Sector tilts."},
        {"title": "Holdings", "chart": null, "include_holdings_table": true,
         "commentary_template": "{n_holdings} holdings; the largest weighs {top_holding_weight_pct}%."}
    ]
}"#;

/// A template where three sections need extension tables.
pub const EXTENSION_HEAVY: &str = r#"{
    "template_id": "extension_heavy",
    "name": "Extension Heavy",
    "report_title": "{fund_name}",
    "sections": [
        {"title": "Returns", "chart": "histogram", "commentary_template": "Skew: {skewness}."},
        {"title": "Income", "chart": "income_chart", "commentary_template": "Income."},
        {"title": "Duration", "chart": "duration_bar", "commentary_template": "Duration."},
        {"title": "P&L", "chart": "contributor_bar", "requires_data": "monthly_pnl",
         "commentary_template": "Monthly P&L."},
        {"title": "Risk", "chart": "spider_chart", "commentary_template": "{max_risk_category} leads."},
        {"title": "Unknown", "commentary_template": "Value: {nonexistent_key}"}
    ]
}"#;

pub fn template(json: &str) -> Template {
    serde_json::from_str(json).unwrap()
}
