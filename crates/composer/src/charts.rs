//! The seam to the chart renderer.
//!
//! Drawing is left to an implementation of `ChartRenderer`; this module decides which
//! charts a plan needs, where each one goes, and which colours it gets.

use crate::error::ChartRenderError;
use core_types::{ChartId, ChartPalette, FundDataset, RenderPlan};
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Draws one chart for one fund.
pub trait ChartRenderer {
    /// Renders `chart` from `data` into `path` and returns the path written.
    fn render(
        &self,
        chart: ChartId,
        data: &FundDataset,
        palette: &ChartPalette,
        path: &Path,
    ) -> Result<PathBuf, ChartRenderError>;
}

/// A chart produced for a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedChart {
    pub chart: ChartId,
    pub path: PathBuf,
}

/// The output file for `chart` under `out_dir`.
pub fn chart_path(out_dir: &Path, chart: ChartId) -> PathBuf {
    out_dir.join(format!("{}.png", chart.as_str()))
}

/// Renders each distinct chart of `plan` once, in plan order, to
/// `<out_dir>/<chart_id>.png`.
pub fn render_plan_charts(
    plan: &RenderPlan,
    data: &FundDataset,
    renderer: &dyn ChartRenderer,
    palette: &ChartPalette,
    out_dir: &Path,
) -> Result<Vec<RenderedChart>, ChartRenderError> {
    fs::create_dir_all(out_dir).map_err(|source| ChartRenderError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut seen = HashSet::new();
    let mut rendered = Vec::new();
    for chart in plan.charts() {
        if !seen.insert(chart) {
            continue;
        }
        let path = renderer.render(chart, data, palette, &chart_path(out_dir, chart))?;
        tracing::debug!(chart = %chart, path = %path.display(), "Chart rendered.");
        rendered.push(RenderedChart { chart, path });
    }

    Ok(rendered)
}
