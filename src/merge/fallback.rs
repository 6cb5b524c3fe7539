//! Fallback traversal engine
//!
//! Full recursive descent over a legacy fully-nested tree, used only when
//! the snapshot carries no side-member collection at all. Output is
//! semantically equivalent to the merge engine: the root itself is never
//! emitted, levels count edges from the root, and the same inclusive depth
//! bounds apply. `descendant_count` is the unfiltered subtree size, kept
//! for display columns regardless of the depth window.

use std::collections::HashSet;

use crate::models::{Member, MemberFragment, RootSnapshot, Side};
use crate::query::TreeQuery;
use crate::report::{MergeAnomaly, MergeReport};

use super::{build_member, depth_filter, MergeOutcome};

const SIDES: [Side; 2] = [Side::Left, Side::Right];

pub(crate) fn traverse(snapshot: &RootSnapshot, query: &TreeQuery) -> MergeOutcome {
    let mut processed: HashSet<i64> = HashSet::new();
    let mut members = Vec::new();
    let mut report = MergeReport::default();

    for branch in SIDES {
        if !query.side.admits(branch) {
            continue;
        }
        if let Some(child) = snapshot.child(branch) {
            walk(
                &child.fragment,
                branch,
                1,
                Some(snapshot.id),
                snapshot.display_name(),
                query,
                &mut processed,
                &mut members,
                &mut report,
            );
        }
    }

    let members = depth_filter(members, query, &mut report);
    MergeOutcome { members, report }
}

#[allow(clippy::too_many_arguments)]
fn walk(
    node: &MemberFragment,
    slot: Side,
    level: u32,
    parent_id: Option<i64>,
    parent_name: &str,
    query: &TreeQuery,
    processed: &mut HashSet<i64>,
    members: &mut Vec<Member>,
    report: &mut MergeReport,
) {
    match node.node_id {
        Some(node_id) if !processed.insert(node_id) => {
            report.record(MergeAnomaly::DuplicateNode { node_id });
        }
        Some(_) => {
            if query.admits_level(level) {
                if let Some(member) = build_member(
                    node,
                    slot,
                    level,
                    parent_id,
                    parent_name,
                    subtree_size(node),
                    report,
                ) {
                    members.push(member);
                }
            }
        }
        None => {
            report.record(MergeAnomaly::MissingIdentity {
                branch: slot,
                index: 0,
            });
        }
    }

    for child_slot in SIDES {
        if let Some(child) = node.nested_child(child_slot) {
            walk(
                child,
                child_slot,
                level + 1,
                node.node_id,
                node.display_name().unwrap_or(""),
                query,
                processed,
                members,
                report,
            );
        }
    }
}

/// Count of all nodes strictly below `node`, unaffected by any filter
fn subtree_size(node: &MemberFragment) -> u64 {
    SIDES
        .into_iter()
        .filter_map(|slot| node.nested_child(slot))
        .map(|child| 1 + subtree_size(child))
        .sum()
}
