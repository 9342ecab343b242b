//! Core data model and view pipeline for the Mutirão cleanup dashboard.
//!
//! The record set is parsed once by [`ingest`] and stays immutable; the
//! [`dashboard::Dashboard`] owns the only mutable piece of state (the filter
//! selection) and recomputes every derived view on each change.

/// Aggregate statistics, category totals, and rankings.
pub mod aggregate;
/// View coordinator owning records, filter state, and the derived snapshot.
pub mod dashboard;
/// Error taxonomy for the ingestion boundary.
pub mod error;
/// Pure filter engine.
pub mod filter;
/// Dataset sources and CSV decoding.
pub mod ingest;
/// Domain models: records, categories, dates, and filter state.
pub mod model;
/// Weight-to-presentation mapping for map markers.
pub mod visual;

pub use aggregate::*;
pub use dashboard::*;
pub use error::*;
pub use filter::*;
pub use ingest::*;
pub use model::*;
pub use visual::*;
