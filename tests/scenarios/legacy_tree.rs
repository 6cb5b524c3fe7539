//! Legacy fully-nested responses go through the fallback traversal but
//! look identical to callers.

use downline::{materialize, Side, SideFilter, TreeQuery};

use crate::common::{fragment, legacy_child, snapshot};

/// root -> A(2)[left C(4)[left E(6)], right D(5)], B(3)
fn legacy_snapshot() -> downline::RootSnapshot {
    let mut c = fragment(4, 2, Side::Left);
    c.left_child = Some(Box::new(fragment(6, 3, Side::Left)));

    let mut a = fragment(2, 1, Side::Left);
    a.left_child = Some(Box::new(c));
    a.right_child = Some(Box::new(fragment(5, 2, Side::Left)));

    snapshot(Some(legacy_child(a)), Some(legacy_child(fragment(3, 1, Side::Right))))
}

#[test]
fn scenario_full_walk_levels_and_counts() {
    let outcome = materialize(&legacy_snapshot(), &TreeQuery::new(1)).unwrap();

    let view: Vec<(i64, u32, u64)> = outcome
        .members
        .iter()
        .map(|m| (m.id, m.level, m.descendant_count))
        .collect();
    assert_eq!(
        view,
        vec![(2, 1, 3), (4, 2, 1), (6, 3, 0), (5, 2, 0), (3, 1, 0)]
    );
    assert!(outcome.report.is_clean());
}

#[test]
fn scenario_depth_bounds_match_merge_semantics() {
    let query = TreeQuery::new(1).with_depth_bounds(Some(2), Some(2));
    let outcome = materialize(&legacy_snapshot(), &query).unwrap();

    let ids: Vec<i64> = outcome.members.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![4, 5]);
}

#[test]
fn scenario_side_filter_selects_branch() {
    let query = TreeQuery::new(1).with_side(SideFilter::Left);
    let outcome = materialize(&legacy_snapshot(), &query).unwrap();

    let ids: Vec<i64> = outcome.members.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![2, 4, 6, 5]);

    // descendant counts ignore the depth filter entirely
    assert_eq!(outcome.members[0].descendant_count, 3);
}

#[test]
fn scenario_root_is_never_in_the_view() {
    let outcome = materialize(&legacy_snapshot(), &TreeQuery::new(1)).unwrap();
    assert!(outcome.members.iter().all(|m| m.id != 1));
}
