use serde::{Deserialize, Serialize};

use crate::types::identifiers::{IntervalId, IntervalLabel};

/// Externally computed evaluation of a classifier restricted to one interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalResult {
    pub accuracy: f64,
    pub build_time_nanos: u64,
}

impl IntervalResult {
    pub fn new(accuracy: f64, build_time_nanos: u64) -> Self {
        Self {
            accuracy,
            build_time_nanos,
        }
    }

    /// A result carrying only an accuracy, with zero build cost.
    pub fn with_accuracy(accuracy: f64) -> Self {
        Self::new(accuracy, 0)
    }
}

/// One entry of a [`Ranking`], self-contained and serializable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedInterval {
    pub id: IntervalId,
    pub label: IntervalLabel,
    pub length_index: usize,
    pub start_index: usize,
    pub score: f64,
    pub outranks_full_domain: bool,
}

impl RankedInterval {
    /// Number of resolution units covered.
    pub fn width(&self) -> usize {
        self.length_index + 1
    }
}

/// All intervals of a hierarchy ordered best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub full_domain_score: f64,
    pub intervals: Vec<RankedInterval>,
}

impl Ranking {
    pub fn best(&self) -> Option<&RankedInterval> {
        self.intervals.first()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedInterval> {
        self.intervals.iter()
    }
}

/// Summary of how many intervals score at least as well as the full domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HierarchyEvaluation {
    pub intervals_outranking_full_domain: usize,
    pub total_intervals: usize,
    pub proportion_outranking_full_domain: f64,
}
