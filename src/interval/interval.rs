use serde::{Deserialize, Serialize};

use crate::analysis::metric::Metric;
use crate::hierarchy::HierarchyError;
use crate::interval::indexer::{GridCoordinates, IndexError, Indexer};
use crate::types::evaluation::IntervalResult;
use crate::types::identifiers::{IntervalId, IntervalLabel};

/// One sub-range of `[0, 1]`.
///
/// Identity (id, bounds, indices, label) is fixed at construction. Only the
/// attached result and the ranking flag change afterwards, and only through
/// the owning [`IntervalHierarchy`](crate::hierarchy::IntervalHierarchy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    id: IntervalId,
    start_fraction: f64,
    end_fraction: f64,
    start_index: usize,
    end_index: usize,
    label: IntervalLabel,
    result: Option<IntervalResult>,
    outranks_full_domain: Option<bool>,
}

impl Interval {
    /// Builds the interval enumerated at `id` for the indexer's resolution.
    pub fn from_id(indexer: &Indexer, id: IntervalId) -> Result<Self, IndexError> {
        let (start_fraction, end_fraction) = indexer.enumerate(id)?;
        let r = indexer.resolution() as f64;

        Ok(Interval {
            id,
            start_fraction,
            end_fraction,
            start_index: (start_fraction * r).round() as usize,
            end_index: (end_fraction * r).round() as usize,
            label: indexer.label(start_fraction, end_fraction),
            result: None,
            outranks_full_domain: None,
        })
    }

    pub fn id(&self) -> IntervalId {
        self.id
    }

    pub fn start_fraction(&self) -> f64 {
        self.start_fraction
    }

    pub fn end_fraction(&self) -> f64 {
        self.end_fraction
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn end_index(&self) -> usize {
        self.end_index
    }

    /// Covered resolution units.
    pub fn width(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn length_index(&self) -> usize {
        self.width() - 1
    }

    pub fn coordinates(&self) -> GridCoordinates {
        GridCoordinates {
            length_index: self.length_index(),
            start_index: self.start_index,
        }
    }

    pub fn label(&self) -> &IntervalLabel {
        &self.label
    }

    pub fn result(&self) -> Option<&IntervalResult> {
        self.result.as_ref()
    }

    /// Attached accuracy, if any.
    pub fn score(&self) -> Option<f64> {
        self.result.map(|r| r.accuracy)
    }

    /// Attached build time in nanoseconds, if any.
    pub fn build_cost(&self) -> Option<u64> {
        self.result.map(|r| r.build_time_nanos)
    }

    /// `None` until the owning hierarchy has been ranked.
    pub fn outranks_full_domain(&self) -> Option<bool> {
        self.outranks_full_domain
    }

    /// `other` lies within `self` (inclusive on both ends).
    pub fn contains(&self, other: &Interval) -> bool {
        other.start_fraction >= self.start_fraction && other.end_fraction <= self.end_fraction
    }

    pub fn measure<M: Metric + ?Sized>(&self, metric: &M) -> Result<f64, HierarchyError> {
        self.result
            .as_ref()
            .map(|r| metric.measure(r))
            .ok_or_else(|| HierarchyError::Unscored {
                label: self.label.as_str().to_string(),
            })
    }

    pub(crate) fn set_result(&mut self, result: Option<IntervalResult>) {
        self.result = result;
    }

    pub(crate) fn set_outranks_full_domain(&mut self, flag: Option<bool>) {
        self.outranks_full_domain = flag;
    }
}
