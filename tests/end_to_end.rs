use interval_hierarchy::hierarchy::{HierarchyConfig, IntervalHierarchy};
use interval_hierarchy::types::{IntervalId, IntervalResult};

/// Scores every interval by its position in canonical traversal order,
/// so the full domain (last visited) gets the highest score.
fn scored_by_traversal(resolution: usize) -> IntervalHierarchy {
    let mut hierarchy = IntervalHierarchy::build(&HierarchyConfig::with_resolution(resolution)).unwrap();
    let ids: Vec<IntervalId> = hierarchy.iter().map(|i| i.id()).collect();
    for (position, id) in ids.into_iter().enumerate() {
        let score = 0.5 + 0.01 * position as f64;
        hierarchy
            .attach_result(id, Some(IntervalResult::with_accuracy(score)))
            .unwrap();
    }
    hierarchy
}

#[test]
fn build_score_rank_and_aggregate() {
    let mut hierarchy = scored_by_traversal(4);
    assert_eq!(hierarchy.len(), 10);

    let full_score = hierarchy.full_domain_interval().score().unwrap();
    assert!((full_score - (0.5 + 0.01 * 9.0)).abs() < 1e-12);

    let max_score = hierarchy
        .iter()
        .filter_map(|i| i.score())
        .fold(f64::MIN, f64::max);
    let ranking = hierarchy.ordered_intervals().unwrap();
    assert_eq!(ranking.len(), 10);
    assert_eq!(ranking.best().unwrap().score, max_score);
    assert_eq!(ranking.best().unwrap().id, IntervalId::new(3));

    let evaluation = *hierarchy.hierarchy_evaluation().unwrap();
    assert_eq!(evaluation.intervals_outranking_full_domain, 1);
    assert!((0.0..=1.0).contains(&evaluation.proportion_outranking_full_domain));

    assert_eq!(hierarchy.mean_importances().unwrap().len(), 4);
    assert_eq!(hierarchy.min_importances().unwrap().len(), 4);
}

#[test]
fn min_importance_is_the_finest_score_when_it_is_the_lowest() {
    // finest intervals come first in traversal, so they carry the lowest scores
    let hierarchy = scored_by_traversal(4);
    let min = hierarchy.min_importances().unwrap();
    for (k, value) in min.iter().enumerate() {
        assert!((value - (0.5 + 0.01 * k as f64)).abs() < 1e-12);
    }
}

#[test]
fn diagnostic_dump_lists_longest_first() {
    let mut hierarchy = IntervalHierarchy::with_resolution(2).unwrap();
    hierarchy
        .attach_result(IntervalId::new(1), Some(IntervalResult::with_accuracy(0.5)))
        .unwrap();

    let dump = hierarchy.to_string();
    let lines: Vec<&str> = dump.lines().collect();

    assert_eq!(lines[0], "   00_00, ");
    assert_eq!(lines[1], "0.500000, ");
    assert_eq!(lines[2], "");
    assert_eq!(lines[3], "   00_50,    50_00, ");
    assert_eq!(lines[4], "       -,        -, ");
}

#[test]
fn ranking_serializes_to_json() {
    let mut hierarchy = scored_by_traversal(2);
    let ranking = hierarchy.ordered_intervals().unwrap();
    let json = serde_json::to_value(ranking).unwrap();

    assert_eq!(json["intervals"].as_array().unwrap().len(), 3);
    assert_eq!(json["intervals"][0]["label"], "00_00");
    assert_eq!(json["intervals"][0]["id"], 1);
    assert_eq!(json["intervals"][0]["outranks_full_domain"], true);
    assert_eq!(json["intervals"][2]["label"], "00_50");
}
