use tracing::debug;

use crate::analysis::metric::{Accuracy, Metric};
use crate::hierarchy::{HierarchyError, IntervalHierarchy};

/// What to do with an unscored interval that contains a finest position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingScores {
    /// Report [`HierarchyError::Unscored`].
    #[default]
    Fail,
    /// Leave the interval out of the aggregate. Finest intervals must still be scored.
    Skip,
}

/// Per-position importance derived from every interval containing that
/// position.
///
/// Position `k` is the finest interval `[k/R, (k+1)/R]`. Its own score always
/// contributes; every wider interval whose span contains it contributes once.
pub struct ImportanceAggregator<M> {
    metric: M,
    missing: MissingScores,
}

impl Default for ImportanceAggregator<Accuracy> {
    fn default() -> Self {
        Self {
            metric: Accuracy,
            missing: MissingScores::Fail,
        }
    }
}

impl<M> ImportanceAggregator<M>
where
    M: Metric,
{
    pub fn new(metric: M) -> Self {
        Self {
            metric,
            missing: MissingScores::Fail,
        }
    }

    pub fn missing_scores(mut self, missing: MissingScores) -> Self {
        self.missing = missing;
        self
    }

    /// Mean metric value over all intervals containing each finest position.
    pub fn compute_mean_importance(&self, hierarchy: &IntervalHierarchy) -> Result<Vec<f64>, HierarchyError> {
        let totals = self.scan(
            hierarchy,
            |score| (score, 1usize),
            |(sum, count): &mut (f64, usize), score: f64| {
                *sum += score;
                *count += 1;
            },
        )?;

        let importances: Vec<f64> = totals
            .into_iter()
            .map(|(sum, count)| sum / count as f64)
            .collect();
        debug!(positions = importances.len(), "computed mean importances");
        Ok(importances)
    }

    /// Lowest metric value over all intervals containing each finest position.
    pub fn compute_min_importance(&self, hierarchy: &IntervalHierarchy) -> Result<Vec<f64>, HierarchyError> {
        let importances = self.scan(
            hierarchy,
            |score| score,
            |current: &mut f64, score: f64| {
                if score < *current {
                    *current = score;
                }
            },
        )?;
        debug!(positions = importances.len(), "computed min importances");
        Ok(importances)
    }

    fn scan<A>(
        &self,
        hierarchy: &IntervalHierarchy,
        init: impl Fn(f64) -> A,
        merge: impl Fn(&mut A, f64),
    ) -> Result<Vec<A>, HierarchyError> {
        // Finest intervals seed their own position
        let finest = hierarchy.finest_intervals();
        let mut accumulators = Vec::with_capacity(finest.len());
        for interval in finest {
            accumulators.push(init(interval.measure(&self.metric)?));
        }

        // Every wider interval, shortest first
        for outer in hierarchy.iter().skip(finest.len()) {
            if outer.result().is_none() && self.missing == MissingScores::Skip {
                continue;
            }
            let score = outer.measure(&self.metric)?;

            for (accumulator, inner) in accumulators.iter_mut().zip(finest) {
                if outer.contains(inner) {
                    merge(accumulator, score);
                }
            }
        }

        Ok(accumulators)
    }
}
