//! Fragment merge engine
//!
//! Combines direct children (Phase A) with their side-member collections
//! (Phase B) into one ordered member list, then runs the Phase C safety
//! filter. The processed-id set guarantees no `node_id` is emitted twice
//! within one call; it is never shared across calls.

use std::collections::HashSet;

use crate::models::{MemberFragment, RootSnapshot, Side};
use crate::query::TreeQuery;
use crate::report::{MergeAnomaly, MergeReport};
use crate::resolver::ParentNames;

use super::{build_member, safety_filter, MergeOutcome};

const SIDES: [Side; 2] = [Side::Left, Side::Right];

pub(crate) fn merge(
    snapshot: &RootSnapshot,
    query: &TreeQuery,
    parents: &ParentNames,
) -> MergeOutcome {
    let mut processed: HashSet<i64> = HashSet::new();
    let mut members = Vec::new();
    let mut report = MergeReport::default();

    // Phase A: direct children, level 1. A child whose descendants arrive
    // through pagination envelopes is emitted alone; its subtree is already
    // represented by its side-member pages. Legacy-shaped children are
    // recursed instead.
    for branch in SIDES {
        if !query.side.admits(branch) {
            continue;
        }
        let Some(child) = snapshot.child(branch) else {
            continue;
        };
        let fragment = &child.fragment;
        let Some(node_id) = fragment.node_id else {
            report.record(MergeAnomaly::MissingIdentity { branch, index: 0 });
            continue;
        };

        if processed.insert(node_id) {
            // Marked processed even when depth bounds exclude it, so an
            // erroneous duplicate in the side pages stays out.
            if query.admits_level(1) {
                let position = fragment.side.unwrap_or(branch);
                match build_member(
                    fragment,
                    position,
                    1,
                    Some(snapshot.id),
                    snapshot.display_name(),
                    fragment.reported_descendants(),
                    &mut report,
                ) {
                    Some(member) => members.push(member),
                    None => report.record(MergeAnomaly::MissingIdentity { branch, index: 0 }),
                }
            }
        } else {
            report.record(MergeAnomaly::DuplicateNode { node_id });
        }

        if !child.has_paginated_descendants() {
            descend_legacy(
                fragment,
                branch,
                2,
                query,
                &mut processed,
                &mut members,
                &mut report,
            );
        }
    }

    // Phase B: side-member pages of each admitted branch.
    for branch in SIDES {
        if !query.side.admits(branch) {
            continue;
        }
        let Some(child) = snapshot.child(branch) else {
            continue;
        };
        for collection_side in SIDES {
            let Some(collection) = child.side_members(collection_side) else {
                continue;
            };
            for (index, fragment) in collection.fragments().iter().enumerate() {
                absorb_fragment(
                    fragment, branch, index, query, parents, &mut processed, &mut members,
                    &mut report,
                );
            }
        }
    }

    // Phase C: defensive re-filter by side and depth.
    let members = safety_filter(members, query, &mut report);

    MergeOutcome { members, report }
}

/// Phase B handling of a single side-member fragment
#[allow(clippy::too_many_arguments)]
fn absorb_fragment(
    fragment: &MemberFragment,
    branch: Side,
    index: usize,
    query: &TreeQuery,
    parents: &ParentNames,
    processed: &mut HashSet<i64>,
    members: &mut Vec<crate::models::Member>,
    report: &mut MergeReport,
) {
    let (Some(node_id), Some(_)) = (fragment.node_id, fragment.user_id) else {
        report.record(MergeAnomaly::MissingIdentity { branch, index });
        return;
    };

    let level = fragment.level.unwrap_or(0).max(0) as u32;
    if !query.admits_level(level) {
        return;
    }
    if !processed.insert(node_id) {
        report.record(MergeAnomaly::DuplicateNode { node_id });
        return;
    }

    let parent_name = fragment
        .parent_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .or_else(|| fragment.parent.and_then(|id| parents.get(id)))
        .unwrap_or("");

    let position = fragment.side.unwrap_or(branch);
    if let Some(member) = build_member(
        fragment,
        position,
        level,
        fragment.parent,
        parent_name,
        fragment.reported_descendants(),
        report,
    ) {
        members.push(member);
    }
}

/// Backward-compatible recursion into a legacy-shaped direct child whose
/// descendants are embedded rather than paginated.
fn descend_legacy(
    node: &MemberFragment,
    branch: Side,
    level: u32,
    query: &TreeQuery,
    processed: &mut HashSet<i64>,
    members: &mut Vec<crate::models::Member>,
    report: &mut MergeReport,
) {
    for slot in SIDES {
        let Some(nested) = node.nested_child(slot) else {
            continue;
        };
        let Some(node_id) = nested.node_id else {
            report.record(MergeAnomaly::MissingIdentity { branch, index: 0 });
            continue;
        };

        if processed.insert(node_id) {
            if query.admits_level(level) {
                // Members of an embedded subtree inherit the branch tag
                // unless the API tagged them explicitly.
                let position = nested.side.unwrap_or(branch);
                if let Some(member) = build_member(
                    nested,
                    position,
                    level,
                    node.node_id,
                    node.display_name().unwrap_or(""),
                    nested.reported_descendants(),
                    report,
                ) {
                    members.push(member);
                }
            }
        } else {
            report.record(MergeAnomaly::DuplicateNode { node_id });
        }

        descend_legacy(nested, branch, level + 1, query, processed, members, report);
    }
}
