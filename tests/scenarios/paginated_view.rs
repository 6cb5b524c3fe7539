//! Paginated materialization scenarios.

use downline::{materialize, Side, SideFilter, SideMembers, TreeQuery};

use crate::common::{envelope, envelope_page, fragment, paginated_child, snapshot};

/// Left direct child A whose left pages report count=3; no right child.
/// With page_size=2 and max_depth=2 the view shows A plus the two
/// level-2 entries of the current page.
#[test]
fn scenario_partial_page_under_depth_bound() {
    let page = envelope_page(
        vec![fragment(4, 2, Side::Left), fragment(5, 2, Side::Left)],
        3,
        1,
        2,
        2,
    );
    let child = paginated_child(2, Side::Left, page, envelope(Vec::new()));
    let snap = snapshot(Some(child), None);

    let query = TreeQuery::new(1)
        .with_side(SideFilter::Both)
        .with_page_size(2)
        .with_depth_bounds(None, Some(2));
    let outcome = materialize(&snap, &query).unwrap();

    let ids: Vec<i64> = outcome.members.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![2, 4, 5]);
    assert_eq!(outcome.members[0].level, 1);
    assert!(outcome.members[1..].iter().all(|m| m.level == 2));
    assert!(outcome.report.is_clean());
}

/// side=right with no right child and no right collection: a valid empty
/// view, not an error.
#[test]
fn scenario_empty_right_branch() {
    let child = paginated_child(2, Side::Left, envelope(Vec::new()), envelope(Vec::new()));
    let snap = snapshot(Some(child), None);

    let query = TreeQuery::new(1).with_side(SideFilter::Right);
    let outcome = materialize(&snap, &query).unwrap();

    assert!(outcome.members.is_empty());
    assert!(outcome.report.is_clean());
}

/// node 5 is both the left direct child and erroneously duplicated inside
/// the left side pages; it must appear exactly once.
#[test]
fn scenario_direct_child_duplicated_in_pages() {
    let page = envelope(vec![fragment(5, 1, Side::Left), fragment(6, 2, Side::Left)]);
    let child = paginated_child(5, Side::Left, page, envelope(Vec::new()));
    let snap = snapshot(Some(child), None);

    let outcome = materialize(&snap, &TreeQuery::new(1)).unwrap();

    let occurrences = outcome.members.iter().filter(|m| m.id == 5).count();
    assert_eq!(occurrences, 1);
    assert_eq!(outcome.members.len(), 2);
    assert!(!outcome.report.is_clean());
}

/// min_depth=2 and max_depth=2 exclude the level-1 direct child and keep
/// the paginated level-2 descendant.
#[test]
fn scenario_depth_window_excludes_direct_child() {
    let page = envelope(vec![fragment(4, 2, Side::Left)]);
    let child = paginated_child(2, Side::Left, page, envelope(Vec::new()));
    let snap = snapshot(Some(child), None);

    let query = TreeQuery::new(1).with_depth_bounds(Some(2), Some(2));
    let outcome = materialize(&snap, &query).unwrap();

    let ids: Vec<i64> = outcome.members.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![4]);
}

/// Both branches paginated: the view is the ordered union of direct
/// children first, then each branch's pages.
#[test]
fn scenario_both_branches() {
    let left = paginated_child(
        2,
        Side::Left,
        envelope(vec![fragment(4, 2, Side::Left)]),
        envelope(vec![fragment(5, 2, Side::Left)]),
    );
    let right = paginated_child(
        3,
        Side::Right,
        envelope(vec![fragment(6, 2, Side::Right)]),
        envelope(Vec::new()),
    );
    let snap = snapshot(Some(left), Some(right));

    let outcome = materialize(&snap, &TreeQuery::new(1)).unwrap();
    let ids: Vec<i64> = outcome.members.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![2, 3, 4, 5, 6]);

    let left_only = materialize(&snap, &TreeQuery::new(1).with_side(SideFilter::Left)).unwrap();
    let ids: Vec<i64> = left_only.members.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![2, 4, 5]);
}

/// A mixed snapshot: paginated left child, legacy unpaged list on the
/// right child. Both shapes feed the same merge pass.
#[test]
fn scenario_mixed_collection_shapes() {
    let left = paginated_child(
        2,
        Side::Left,
        envelope(vec![fragment(4, 2, Side::Left)]),
        envelope(Vec::new()),
    );
    let mut right = paginated_child(3, Side::Right, envelope(Vec::new()), envelope(Vec::new()));
    right.left_side_members = Some(SideMembers::Unpaged(vec![fragment(7, 2, Side::Right)]));
    right.right_side_members = None;

    let snap = snapshot(Some(left), Some(right));
    let outcome = materialize(&snap, &TreeQuery::new(1)).unwrap();

    let ids: Vec<i64> = outcome.members.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![2, 3, 4, 7]);
}
