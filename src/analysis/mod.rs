pub mod importance;
pub mod metric;
pub mod ranking;

pub use importance::{ImportanceAggregator, MissingScores};
pub use metric::{Accuracy, BuildTime, Metric};
pub use ranking::{compare_ranked, evaluate, rank_intervals};
