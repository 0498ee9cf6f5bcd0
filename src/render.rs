use composer::{ChartRenderError, ChartRenderer};
use core_types::{ChartId, ChartPalette, FundDataset};
use serde::Serialize;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// One chart the external renderer still has to draw.
#[derive(Debug, Clone, Serialize)]
pub struct ChartJob {
    pub chart: ChartId,
    pub label: &'static str,
    pub fund_id: String,
    pub path: PathBuf,
    pub palette: Vec<String>,
}

/// A `ChartRenderer` that records chart jobs instead of drawing them.
///
/// The jobs are written next to the render plan as `chart_jobs.json`, which is what the
/// document builder picks up.
#[derive(Debug, Default)]
pub struct ChartJobRecorder {
    jobs: RefCell<Vec<ChartJob>>,
}

impl ChartJobRecorder {
    pub fn into_jobs(self) -> Vec<ChartJob> {
        self.jobs.into_inner()
    }
}

impl ChartRenderer for ChartJobRecorder {
    fn render(
        &self,
        chart: ChartId,
        data: &FundDataset,
        palette: &ChartPalette,
        path: &Path,
    ) -> Result<PathBuf, ChartRenderError> {
        if let Some(dataset) = chart.backing_dataset() {
            if !data.has(dataset) {
                return Err(ChartRenderError::Render {
                    chart,
                    reason: format!("fund '{}' has no {} table", data.fund_id, dataset),
                });
            }
        }

        self.jobs.borrow_mut().push(ChartJob {
            chart,
            label: chart.label(),
            fund_id: data.fund_id.clone(),
            path: path.to_path_buf(),
            palette: palette.colors().to_vec(),
        });
        Ok(path.to_path_buf())
    }
}
