use core_types::{ChartPalette, PlaceholderPolicy};
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional; an empty file (or no file at all) yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub templates: TemplateSettings,
    pub composition: CompositionSettings,
    pub charts: ChartSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

impl Config {
    /// The palette handed to the chart renderer, built from the configured theme.
    pub fn chart_palette(&self) -> ChartPalette {
        ChartPalette::from_theme(self.charts.palette.as_deref())
    }
}

/// Where template definitions are read from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Directory holding one `<template_id>.json` per template.
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompositionSettings {
    pub placeholder_policy: PlaceholderPolicy,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Theme colours as `#RRGGBB`. Only the first eight are used; fewer are padded
    /// from the default palette.
    pub palette: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Root directory for render plans, one subdirectory per fund.
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

// --- Default Implementations ---

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("templates"),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}
