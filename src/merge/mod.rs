//! Fragment materialization
//!
//! Two engines produce the same output shape and are interchangeable to
//! callers:
//! - the merge engine ([`engine`]) combines direct children with paginated
//!   side-member collections,
//! - the fallback traversal ([`fallback`]) walks legacy fully-nested trees
//!   when no side-member collection is present anywhere in the snapshot.
//!
//! Both are pure: same snapshot and query in, same ordered member list out.
//! The processed-id set lives on the stack of one call, so a superseded
//! fetch is discarded by simply materializing again with fresh inputs.

mod engine;
mod fallback;

use crate::error::DownlineResult;
use crate::models::{Member, MemberFragment, RootSnapshot, Side};
use crate::query::TreeQuery;
use crate::report::{MergeAnomaly, MergeReport};
use crate::resolver::ParentNames;

/// Result of one materialization pass
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// Ordered, deduplicated, side/depth-filtered member list
    pub members: Vec<Member>,
    /// Non-fatal data-quality anomalies noticed along the way
    pub report: MergeReport,
}

/// Materialize one slice of the tree.
///
/// Dispatches to the paginated merge engine when any side-member collection
/// is present, and to the legacy full traversal otherwise. The capability is
/// decided once here, never re-inferred during recursion.
pub fn materialize(snapshot: &RootSnapshot, query: &TreeQuery) -> DownlineResult<MergeOutcome> {
    query.validate()?;

    if snapshot.has_side_member_collections() {
        let parents = ParentNames::from_snapshot(snapshot);
        Ok(engine::merge(snapshot, query, &parents))
    } else {
        Ok(fallback::traverse(snapshot, query))
    }
}

/// Build one output member from a fragment.
///
/// Returns `None` when the fragment lacks identity; lenient field parses
/// (earnings, join date) degrade to defaults and record an anomaly.
pub(crate) fn build_member(
    fragment: &MemberFragment,
    position: Side,
    level: u32,
    parent_id: Option<i64>,
    parent_name: &str,
    descendant_count: u64,
    report: &mut MergeReport,
) -> Option<Member> {
    let node_id = fragment.node_id?;
    let user_id = fragment.user_id?;

    let metric_value = match fragment.total_earnings.as_deref() {
        None => 0.0,
        Some(raw) => match raw.trim().parse::<f64>() {
            Ok(value) => value,
            Err(_) => {
                report.record(MergeAnomaly::UnparsedEarnings {
                    node_id,
                    raw: raw.to_string(),
                });
                0.0
            }
        },
    };

    let joined_at = match fragment.date_joined.as_deref() {
        None => None,
        Some(raw) => match crate::models::parse_joined(raw) {
            Some(stamp) => Some(stamp),
            None => {
                report.record(MergeAnomaly::UnparsedDate {
                    node_id,
                    raw: raw.to_string(),
                });
                None
            }
        },
    };

    Some(Member {
        id: node_id,
        display_name: fragment.display_name().unwrap_or("").to_string(),
        user_id,
        joined_at,
        position,
        metric_value,
        level,
        descendant_count,
        is_active: fragment.is_active_buyer.unwrap_or(false),
        parent_id,
        parent_name: parent_name.to_string(),
        referral_code: fragment.referral_code.clone().unwrap_or_default(),
    })
}

/// Phase C safety filter: side and depth.
///
/// Phases A/B already enforce both; this pass defends against upstream
/// fragments that violate the contract (a record tagged for the wrong side,
/// a level outside the requested window). Drops are recorded as anomalies.
pub(crate) fn safety_filter(
    members: Vec<Member>,
    query: &TreeQuery,
    report: &mut MergeReport,
) -> Vec<Member> {
    members
        .into_iter()
        .filter(|member| {
            if !query.side.admits(member.position) {
                report.record(MergeAnomaly::SideConflict {
                    node_id: member.id,
                    tagged: member.position,
                    requested: query.side,
                });
                return false;
            }
            if !query.admits_level(member.level) {
                report.record(MergeAnomaly::DepthConflict {
                    node_id: member.id,
                    level: member.level,
                });
                return false;
            }
            true
        })
        .collect()
}

/// Depth-only safety pass used by the fallback traversal, where side
/// selection already happened by choosing which subtree to walk.
pub(crate) fn depth_filter(
    members: Vec<Member>,
    query: &TreeQuery,
    report: &mut MergeReport,
) -> Vec<Member> {
    members
        .into_iter()
        .filter(|member| {
            if !query.admits_level(member.level) {
                report.record(MergeAnomaly::DepthConflict {
                    node_id: member.id,
                    level: member.level,
                });
                return false;
            }
            true
        })
        .collect()
}
