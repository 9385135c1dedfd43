//! Interval hierarchy engine over the normalized domain `[0, 1]`.
//!
//! `interval-hierarchy` enumerates every sub-range of `[0, 1]` at a fixed
//! resolution, arranges them in a triangular grid keyed by (length, start),
//! attaches externally computed evaluation results to each, and derives
//! containment-based importance scores and a score ranking from them.
//!
//! Scores are never computed here; they come from a [`ResultsProvider`] or
//! are attached directly by interval id.

pub mod analysis;
pub mod hierarchy;
pub mod interval;
pub mod types;

pub use analysis::{Accuracy, BuildTime, ImportanceAggregator, Metric, MissingScores};
pub use hierarchy::{
    HierarchyConfig, HierarchyError, InMemoryResults, IntervalHierarchy, ProviderError,
    ResultKey, ResultScope, ResultsProvider,
};
pub use interval::{GridCoordinates, IndexError, Indexer, Interval};
pub use types::{HierarchyEvaluation, IntervalId, IntervalLabel, IntervalResult, RankedInterval, Ranking};
