use interval_hierarchy::analysis::{BuildTime, ImportanceAggregator, MissingScores};
use interval_hierarchy::hierarchy::{HierarchyError, IntervalHierarchy};
use interval_hierarchy::types::{IntervalId, IntervalResult};

fn scored(resolution: usize, scores: &[f64]) -> IntervalHierarchy {
    let mut hierarchy = IntervalHierarchy::with_resolution(resolution).unwrap();
    for (id, &score) in scores.iter().enumerate() {
        hierarchy
            .attach_result(IntervalId::new(id), Some(IntervalResult::with_accuracy(score)))
            .unwrap();
    }
    hierarchy
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-12, "{actual:?} != {expected:?}");
    }
}

#[test]
fn mean_and_min_over_containing_intervals() {
    // ids at R=3: 0=[0,1/3] 1=[0,2/3] 2=[0,1] 3=[1/3,2/3] 4=[1/3,1] 5=[2/3,1]
    let hierarchy = scored(3, &[0.9, 0.5, 0.7, 0.8, 0.6, 0.3]);

    let mean = hierarchy.mean_importances().unwrap();
    assert_close(&mean, &[0.7, 0.65, (0.3 + 0.6 + 0.7) / 3.0]);

    let min = hierarchy.min_importances().unwrap();
    assert_close(&min, &[0.5, 0.5, 0.3]);
}

#[test]
fn own_score_always_contributes() {
    // position 0 is the lowest score anywhere, so min must pick it up
    let hierarchy = scored(2, &[0.1, 0.6, 0.4]);
    assert_close(&hierarchy.min_importances().unwrap(), &[0.1, 0.4]);
    assert_close(&hierarchy.mean_importances().unwrap(), &[0.35, 0.5]);
}

#[test]
fn importances_match_finest_scores_when_only_finest_are_scored() {
    let mut hierarchy = IntervalHierarchy::with_resolution(4).unwrap();
    let finest_ids: Vec<_> = hierarchy.finest_intervals().iter().map(|i| i.id()).collect();
    for (id, score) in finest_ids.into_iter().zip([1.0, 2.0, 3.0, 4.0]) {
        hierarchy
            .attach_result(id, Some(IntervalResult::with_accuracy(score)))
            .unwrap();
    }

    let aggregator = ImportanceAggregator::default().missing_scores(MissingScores::Skip);
    assert_close(&aggregator.compute_mean_importance(&hierarchy).unwrap(), &[1.0, 2.0, 3.0, 4.0]);
    assert_close(&aggregator.compute_min_importance(&hierarchy).unwrap(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn unscored_intervals_fail_by_default() {
    let mut hierarchy = scored(3, &[0.9, 0.5, 0.7, 0.8, 0.6, 0.3]);
    hierarchy.attach_result(IntervalId::new(4), None).unwrap();

    let err = hierarchy.mean_importances().unwrap_err();
    assert!(matches!(err, HierarchyError::Unscored { ref label } if label == "33_00"));
    assert!(hierarchy.min_importances().is_err());
}

#[test]
fn unscored_finest_interval_fails_even_when_skipping() {
    let hierarchy = IntervalHierarchy::with_resolution(3).unwrap();
    let aggregator = ImportanceAggregator::default().missing_scores(MissingScores::Skip);
    assert!(matches!(
        aggregator.compute_mean_importance(&hierarchy),
        Err(HierarchyError::Unscored { .. })
    ));
}

#[test]
fn custom_metric_is_threaded_through() {
    let mut hierarchy = IntervalHierarchy::with_resolution(2).unwrap();
    for (id, nanos) in [(0, 10), (1, 40), (2, 20)] {
        hierarchy
            .attach_result(IntervalId::new(id), Some(IntervalResult::new(0.5, nanos)))
            .unwrap();
    }

    let by_time = ImportanceAggregator::new(BuildTime);
    assert_close(&by_time.compute_mean_importance(&hierarchy).unwrap(), &[25.0, 30.0]);

    let inverted = ImportanceAggregator::new(|r: &IntervalResult| 1.0 - r.accuracy);
    assert_close(&inverted.compute_min_importance(&hierarchy).unwrap(), &[0.5, 0.5]);
}
