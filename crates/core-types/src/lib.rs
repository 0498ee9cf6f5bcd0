//! Shared domain types for the report composition engine: raw fund data, derived
//! metrics, templates, the chart registry, and the render plan.

pub mod dataset;
pub mod enums;
pub mod error;
pub mod palette;
pub mod plan;
pub mod profile;
pub mod template;

// Re-export the core types to provide a clean public API.
pub use dataset::{
    AllocationPoint, AllocationSeries, Cell, FundDataset, PerformancePoint, ReturnObservation,
    RiskScores, Table,
};
pub use enums::{ChartId, ExtensionDataset, PlaceholderPolicy, Priority};
pub use error::CoreError;
pub use palette::{ChartPalette, DEFAULT_PALETTE};
pub use plan::{RenderPlan, ResolvedSection};
pub use profile::{MetricValue, MetricsProfile, UNAVAILABLE};
pub use template::{SectionSpec, Template, TemplateSummary};
