//! # Report Composer
//!
//! Composes a fund's `RenderPlan` from a template: validate the data, profile it, drop
//! the sections the data cannot support, hydrate the commentary, and assemble the plan.
//!
//! ## Architectural Principles
//!
//! - **Stateless:** a `ReportComposer` holds only its placeholder policy. Runs share
//!   nothing, so funds can be composed in parallel.
//! - **All or nothing:** a failure at any stage aborts the run; no partial plan is
//!   ever returned.
//!
//! ## Public API
//!
//! - `ReportComposer`: the pipeline.
//! - `Composition`: a finished plan with its profile and warnings.
//! - `ChartRenderer` / `render_plan_charts`: the seam to the chart renderer.

pub mod assemble;
pub mod charts;
pub mod error;
pub mod filter;
pub mod hydrate;
pub mod warning;

pub use assemble::PlanAssembler;
pub use charts::{ChartRenderer, RenderedChart, render_plan_charts};
pub use error::{ChartRenderError, ComposeError};
pub use filter::SectionFilter;
pub use hydrate::{Hydrated, Hydrator};
pub use warning::CompositionWarning;
// Re-exported so callers can pick a policy without depending on `core-types`.
pub use core_types::PlaceholderPolicy;

use analytics::MetricsProfiler;
use core_types::{FundDataset, MetricsProfile, RenderPlan, Template};
use indicatif::{ParallelProgressIterator, ProgressBar};
use rayon::prelude::*;
use template_store::TemplateStore;

/// The outcome of composing one fund against one template.
#[derive(Debug, Clone)]
pub struct Composition {
    pub fund_id: String,
    pub template_id: String,
    pub profile: MetricsProfile,
    pub plan: RenderPlan,
    pub warnings: Vec<CompositionWarning>,
}

#[derive(Debug, Default)]
pub struct ReportComposer {
    profiler: MetricsProfiler,
    assembler: PlanAssembler,
}

impl ReportComposer {
    pub fn new(policy: PlaceholderPolicy) -> Self {
        Self {
            profiler: MetricsProfiler::new(),
            assembler: PlanAssembler::new(Hydrator::new(policy)),
        }
    }

    /// Runs the full pipeline for one fund.
    pub fn compose(&self, template: &Template, data: &FundDataset) -> Result<Composition, ComposeError> {
        let span = tracing::info_span!(
            "compose",
            fund_id = %data.fund_id,
            template_id = %template.template_id
        );
        let _guard = span.enter();

        let profile = self.profiler.profile(data)?;
        let sections = SectionFilter::eligible(template, data);
        let (plan, warnings) = self.assembler.assemble(template, &sections, &profile)?;

        tracing::info!(
            sections = plan.sections.len(),
            dropped = template.sections.len() - plan.sections.len(),
            warnings = warnings.len(),
            "Render plan composed."
        );

        Ok(Composition {
            fund_id: data.fund_id.clone(),
            template_id: template.template_id.clone(),
            profile,
            plan,
            warnings,
        })
    }

    /// Loads `template_id` from `store`, then composes.
    pub fn compose_by_id(
        &self,
        store: &TemplateStore,
        template_id: &str,
        data: &FundDataset,
    ) -> Result<Composition, ComposeError> {
        let template = store.load(template_id)?;
        self.compose(&template, data)
    }

    /// Composes every fund in parallel. One result per fund, in input order; a failing
    /// fund does not affect the others.
    pub fn compose_many(
        &self,
        template: &Template,
        funds: &[FundDataset],
    ) -> Vec<Result<Composition, ComposeError>> {
        self.compose_many_with_progress(template, funds, &ProgressBar::hidden())
    }

    /// `compose_many`, advancing `progress` once per finished fund.
    pub fn compose_many_with_progress(
        &self,
        template: &Template,
        funds: &[FundDataset],
        progress: &ProgressBar,
    ) -> Vec<Result<Composition, ComposeError>> {
        funds
            .par_iter()
            .progress_with(progress.clone())
            .map(|data| self.compose(template, data))
            .collect()
    }
}
