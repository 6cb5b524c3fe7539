//! A user paging through a large branch: the coordinator decides each
//! fetch, the window reflects what the snapshot reports.

use downline::{PageCursors, PageWindow, Side, SideFilter, ViewerConfig};

use crate::common::{envelope, envelope_page, fragment, paginated_child, snapshot};

fn two_branch_snapshot(left_pages: u32, right_pages: u32, page: u32) -> downline::RootSnapshot {
    let left = paginated_child(
        2,
        Side::Left,
        envelope_page(vec![fragment(4, 2, Side::Left)], 40, page, 10, left_pages),
        envelope(Vec::new()),
    );
    let right = paginated_child(
        3,
        Side::Right,
        envelope_page(vec![fragment(6, 2, Side::Right)], 20, page, 10, right_pages),
        envelope(Vec::new()),
    );
    snapshot(Some(left), Some(right))
}

#[test]
fn journey_window_spans_both_branches() {
    let snap = two_branch_snapshot(4, 2, 1);

    let both = PageWindow::from_snapshot(&snap, SideFilter::Both);
    assert_eq!(both.total_pages, 4);
    assert!(both.has_next);
    assert!(!both.has_previous);

    let right = PageWindow::from_snapshot(&snap, SideFilter::Right);
    assert_eq!(right.total_pages, 2);
}

#[test]
fn journey_next_enabled_while_either_branch_has_pages() {
    // page 3 of 4: the right branch (2 pages) is exhausted but the left
    // one is not, so Next stays available under Both
    let snap = two_branch_snapshot(4, 2, 3);
    let window = PageWindow::from_snapshot(&snap, SideFilter::Both);

    let mut cursors = PageCursors::default();
    cursors.advance(&window);
    cursors.advance(&window);
    assert_eq!(cursors.active_page(), 3);
    assert!(cursors.can_advance(&window));
    assert!(cursors.advance(&window));
    assert!(!cursors.can_advance(&window));
}

#[test]
fn journey_filter_change_resets_pagination() {
    let snap = two_branch_snapshot(4, 2, 1);
    let window = PageWindow::from_snapshot(&snap, SideFilter::Both);

    let mut cursors = PageCursors::default();
    cursors.advance(&window);
    cursors.advance(&window);
    assert_eq!(cursors.query(1).page, 3);

    cursors.set_side(SideFilter::Right);
    let query = cursors.query(1);
    assert_eq!(query.page, 1);
    assert_eq!(query.side, SideFilter::Right);
}

#[test]
fn journey_clamp_before_fetch_after_shrink() {
    let mut cursors = PageCursors::default();
    let wide = PageWindow {
        total_pages: 6,
        has_next: true,
        has_previous: false,
    };
    cursors.advance(&wide);
    cursors.advance(&PageWindow {
        has_previous: true,
        ..wide
    });
    cursors.advance(&PageWindow {
        has_previous: true,
        ..wide
    });
    assert_eq!(cursors.active_page(), 4);

    // a refetch reports fewer pages; never request page 4 again
    let shrunk = PageWindow::from_snapshot(&two_branch_snapshot(2, 2, 2), SideFilter::Both);
    cursors.clamp_to(&shrunk);
    assert_eq!(cursors.active_page(), 2);
}

#[test]
fn journey_config_defaults_feed_initial_query() {
    let config = ViewerConfig {
        page_size: 25,
        side: SideFilter::Left,
        min_depth: None,
        max_depth: Some(4),
    };
    let cursors = PageCursors::new(&config);
    let query = cursors.query(7);

    assert_eq!(query.page, 1);
    assert_eq!(query.page_size, 25);
    assert_eq!(query.side, SideFilter::Left);
    assert_eq!(query.max_depth, Some(4));
    assert_eq!(
        query.query_string(),
        "rootId=7&side=left&page=1&page_size=25&max_depth=4"
    );
}

#[test]
fn journey_unpaged_collections_are_single_page() {
    use downline::SideMembers;

    let mut child = paginated_child(2, Side::Left, envelope(Vec::new()), envelope(Vec::new()));
    child.left_side_members = Some(SideMembers::Unpaged(vec![fragment(4, 2, Side::Left)]));
    child.right_side_members = None;
    let snap = snapshot(Some(child), None);

    let window = PageWindow::from_snapshot(&snap, SideFilter::Both);
    assert_eq!(window.total_pages, 1);
    assert!(!window.has_next);
    assert!(!window.has_previous);
}
