use crate::error::ConfigError;
use std::path::Path;
use tracing_subscriber::EnvFilter;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use core_types::PlaceholderPolicy;
pub use settings::{
    ChartSettings, CompositionSettings, Config, LoggingSettings, OutputSettings,
    TemplateSettings,
};

/// Prefix of the environment variables that override file settings,
/// e.g. `FUND_REPORT_COMPOSITION__PLACEHOLDER_POLICY=strict`.
pub const ENV_PREFIX: &str = "FUND_REPORT";

/// Loads the application configuration.
///
/// Sources are layered in order: built-in defaults, then the TOML file, then environment
/// variables. With no explicit `path`, a `config.toml` in the working directory is used
/// if one exists. An explicit `path` must exist.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(p) => config::File::from(p).required(true),
        None => config::File::with_name("config").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("charts.palette")
                .try_parsing(true),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}

/// Checks values serde cannot check on its own.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if let Some(palette) = &config.charts.palette {
        if let Some(bad) = palette.iter().find(|c| !is_hex_color(c)) {
            return Err(ConfigError::ValidationError(format!(
                "charts.palette entry '{}' is not a #RRGGBB colour",
                bad
            )));
        }
    }

    EnvFilter::try_new(&config.logging.level).map_err(|e| {
        ConfigError::ValidationError(format!(
            "logging.level '{}' is not a valid filter directive: {}",
            config.logging.level, e
        ))
    })?;

    Ok(())
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
