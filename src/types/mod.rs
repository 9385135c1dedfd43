pub mod evaluation;
pub mod identifiers;

pub use evaluation::{HierarchyEvaluation, IntervalResult, RankedInterval, Ranking};
pub use identifiers::{IntervalId, IntervalLabel};
