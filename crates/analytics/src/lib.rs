//! # Fund Metrics Profiler
//!
//! This crate turns a fund's raw data into the flat table of named values that report
//! templates are hydrated with.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** It has no knowledge of templates, files or rendering. It depends
//!   only on `core-types`.
//! - **Stateless Calculation:** The `MetricsProfiler` takes a `FundDataset` as input and
//!   produces a `MetricsProfile` as output. Numbers are rounded once, at the output
//!   boundary; the qualitative rules see the unrounded figures.
//!
//! ## Public API
//!
//! - `MetricsProfiler`: The main struct that contains the calculation logic.
//! - `PROFILE_KEYS`: Every variable name a profile carries.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

pub mod assessments;
pub mod engine;
pub mod error;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{MetricsProfiler, PERIODS_PER_YEAR, PROFILE_KEYS};
pub use error::AnalyticsError;
