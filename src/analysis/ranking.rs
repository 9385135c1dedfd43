use std::cmp::Ordering;

use tracing::debug;

use crate::analysis::metric::Metric;
use crate::hierarchy::{HierarchyError, IntervalHierarchy};
use crate::interval::Interval;
use crate::types::evaluation::{HierarchyEvaluation, RankedInterval, Ranking};

/// Best-first order: higher score first, and on equal scores the wider
/// interval first. Equal score and equal width compare `Equal`.
pub fn compare_ranked(a: &RankedInterval, b: &RankedInterval) -> Ordering {
    // NaN is rejected before entries are built
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.width().cmp(&a.width()))
}

fn comparable_score<M: Metric + ?Sized>(interval: &Interval, metric: &M) -> Result<f64, HierarchyError> {
    let score = interval.measure(metric)?;
    if score.is_nan() {
        return Err(HierarchyError::InvalidScore {
            label: interval.label().as_str().to_string(),
            score,
        });
    }
    Ok(score)
}

/// Ranks every interval of `hierarchy` by `metric`, best first, and flags
/// those scoring at least as well as the full-domain interval.
///
/// The sort is stable, so fully tied intervals keep canonical traversal order.
pub fn rank_intervals<M: Metric + ?Sized>(
    hierarchy: &IntervalHierarchy,
    metric: &M,
) -> Result<Ranking, HierarchyError> {
    let full_domain_score = comparable_score(hierarchy.full_domain_interval(), metric)?;

    let mut intervals = hierarchy
        .iter()
        .map(|interval| -> Result<RankedInterval, HierarchyError> {
            let score = comparable_score(interval, metric)?;
            Ok(RankedInterval {
                id: interval.id(),
                label: interval.label().clone(),
                length_index: interval.length_index(),
                start_index: interval.start_index(),
                score,
                // >= so the full domain always outranks itself
                outranks_full_domain: score >= full_domain_score,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    intervals.sort_by(compare_ranked);

    debug_assert!(intervals.windows(2).all(|w| {
        let a = &w[0];
        let b = &w[1];
        a.score > b.score || (a.score == b.score && a.width() >= b.width())
    }));

    debug!(
        intervals = intervals.len(),
        full_domain_score,
        best = ?intervals.first().map(|r| r.score),
        "ranked interval hierarchy"
    );

    Ok(Ranking {
        full_domain_score,
        intervals,
    })
}

pub fn evaluate(ranking: &Ranking) -> HierarchyEvaluation {
    let total_intervals = ranking.len();
    let intervals_outranking_full_domain = ranking
        .iter()
        .filter(|r| r.outranks_full_domain)
        .count();

    let proportion_outranking_full_domain = if total_intervals == 0 {
        0.0
    } else {
        intervals_outranking_full_domain as f64 / total_intervals as f64
    };

    HierarchyEvaluation {
        intervals_outranking_full_domain,
        total_intervals,
        proportion_outranking_full_domain,
    }
}
