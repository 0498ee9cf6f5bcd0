use analytics::MetricsProfiler;
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};
use composer::{Composition, ReportComposer, render_plan_charts};
use configuration::{Config, PlaceholderPolicy, load_config};
use core_types::{ChartId, ChartPalette, FundDataset};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use template_store::TemplateStore;
use uuid::Uuid;

mod logging;
mod render;

use render::ChartJobRecorder;

/// The main entry point for the fund report composer.
fn main() -> Result<()> {
    // A missing .env file is fine; it only supplies FUND_REPORT_* overrides.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let _log_guard = logging::init(&config.logging).context("Failed to initialize logging")?;

    match cli.command {
        Commands::ListTemplates => handle_list_templates(&config),
        Commands::Charts => {
            handle_charts();
            Ok(())
        }
        Commands::Profile(args) => handle_profile(args),
        Commands::Compose(args) => handle_compose(args, &config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Composes fund reports from templates and raw fund data.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults to ./config.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available report templates.
    ListTemplates,
    /// List the registered chart types and the data each one needs.
    Charts,
    /// Print the metrics profile computed for a fund.
    Profile(ProfileArgs),
    /// Compose render plans for one or more funds.
    Compose(ComposeArgs),
}

#[derive(Parser)]
struct ProfileArgs {
    /// Path to the fund dataset (JSON).
    #[arg(long)]
    fund: PathBuf,
}

#[derive(Parser)]
struct ComposeArgs {
    /// The template to compose with (e.g., "stable_income").
    #[arg(long)]
    template: String,

    /// One or more fund dataset files (JSON).
    #[arg(long, required = true, num_args = 1..)]
    fund: Vec<PathBuf>,

    /// Output directory. Overrides `[output] dir`.
    #[arg(long)]
    out: Option<PathBuf>,

    /// What to do with unknown placeholders. Overrides `[composition] placeholder_policy`.
    #[arg(long, value_enum)]
    policy: Option<PlaceholderPolicy>,
}

// ==============================================================================
// Listing Commands
// ==============================================================================

fn handle_list_templates(config: &Config) -> Result<()> {
    let store = TemplateStore::from_dir(&config.templates.dir)?;
    let summaries = store.list()?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Template", "Name", "Sections", "Charts"]);

    for summary in &summaries {
        let charts: Vec<&str> = summary.charts.iter().map(|c| c.as_str()).collect();
        table.add_row(vec![
            summary.template_id.clone(),
            summary.name.clone(),
            summary.n_sections.to_string(),
            charts.join(", "),
        ]);
    }

    println!("{table}");
    Ok(())
}

fn handle_charts() {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Chart", "Label", "Requires", "Description"]);

    for chart in ChartId::ALL {
        table.add_row(vec![
            chart.as_str().to_string(),
            chart.label().to_string(),
            chart
                .backing_dataset()
                .map_or_else(|| "-".to_string(), |d| d.to_string()),
            chart.description().to_string(),
        ]);
    }

    println!("{table}");
}

fn handle_profile(args: ProfileArgs) -> Result<()> {
    let data = read_fund(&args.fund)?;
    let profile = MetricsProfiler::new()
        .profile(&data)
        .with_context(|| format!("Failed to profile fund '{}'", data.fund_id))?;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

// ==============================================================================
// Compose Command Logic
// ==============================================================================

/// Composes every fund against one template, writing each plan under
/// `<out>/<fund_id>/`. A failing fund is reported and skipped.
fn handle_compose(args: ComposeArgs, config: &Config) -> Result<()> {
    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("run", %run_id, template_id = %args.template);
    let _guard = span.enter();

    let store = TemplateStore::from_dir(&config.templates.dir)?;
    let template = store.load(&args.template)?;
    let policy = args.policy.unwrap_or(config.composition.placeholder_policy);
    let out_dir = args.out.unwrap_or_else(|| config.output.dir.clone());
    let palette = config.chart_palette();

    let mut failed = 0usize;
    let mut funds = Vec::with_capacity(args.fund.len());
    for path in &args.fund {
        match read_fund(path) {
            Ok(data) => funds.push(data),
            Err(e) => {
                failed += 1;
                tracing::error!(path = %path.display(), "Skipping fund: {:#}", e);
                eprintln!("✗ {}: {:#}", path.display(), e);
            }
        }
    }

    tracing::info!(funds = funds.len(), ?policy, "Starting composition.");

    let progress_bar = ProgressBar::new(funds.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("=>-"),
    );

    let composer = ReportComposer::new(policy);
    let results = composer.compose_many_with_progress(&template, &funds, &progress_bar);
    progress_bar.finish_and_clear();

    for (data, result) in funds.iter().zip(results) {
        let outcome = result
            .map_err(anyhow::Error::from)
            .and_then(|composition| write_outputs(&composition, data, &palette, &out_dir));
        match outcome {
            Ok(plan_path) => println!("✓ {} -> {}", data.fund_id, plan_path.display()),
            Err(e) => {
                failed += 1;
                tracing::error!(fund_id = %data.fund_id, "Composition failed: {:#}", e);
                eprintln!("✗ {}: {:#}", data.fund_id, e);
            }
        }
    }

    let total = args.fund.len();
    tracing::info!(total, failed, "Composition finished.");
    if failed > 0 {
        bail!("{} of {} funds failed", failed, total);
    }
    Ok(())
}

/// Writes the render plan and the chart jobs for one composed fund. Returns the plan path.
fn write_outputs(
    composition: &Composition,
    data: &FundDataset,
    palette: &ChartPalette,
    out_dir: &Path,
) -> Result<PathBuf> {
    let fund_dir = out_dir.join(&composition.fund_id);
    fs::create_dir_all(&fund_dir)
        .with_context(|| format!("Failed to create {}", fund_dir.display()))?;

    for warning in &composition.warnings {
        println!("  ! {}: {}", composition.fund_id, warning);
    }

    let recorder = ChartJobRecorder::default();
    render_plan_charts(&composition.plan, data, &recorder, palette, &fund_dir.join("charts"))?;
    fs::write(
        fund_dir.join("chart_jobs.json"),
        serde_json::to_string_pretty(&recorder.into_jobs())?,
    )?;

    let plan_path = fund_dir.join("hydrated_plan.json");
    fs::write(&plan_path, composition.plan.to_json_pretty()?)
        .with_context(|| format!("Failed to write {}", plan_path.display()))?;
    Ok(plan_path)
}

fn read_fund(path: &Path) -> Result<FundDataset> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read fund file {}", path.display()))?;
    FundDataset::from_json(&json).with_context(|| format!("Invalid fund file {}", path.display()))
}
