//! Core data models for downline
//!
//! Defines the wire contract consumed by the materialization engine:
//! - `RootSnapshot` / `ChildSnapshot`: the root and its direct children
//! - `SideMembers`: a side-member collection, paginated or legacy plain list
//! - `MemberFragment`: one unit of hierarchical data prior to merging
//! - `Member`: the engine's output unit, valid for one render cycle

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Branch of the binary tree a node occupies under its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Which branches a materialization includes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SideFilter {
    Left,
    Right,
    #[default]
    Both,
}

impl SideFilter {
    /// Does this filter admit members on `side`?
    pub fn admits(self, side: Side) -> bool {
        match self {
            SideFilter::Left => side == Side::Left,
            SideFilter::Right => side == Side::Right,
            SideFilter::Both => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SideFilter::Left => "left",
            SideFilter::Right => "right",
            SideFilter::Both => "both",
        }
    }
}

/// One unit of hierarchical data as delivered by the API
///
/// Identity fields are optional on the wire so that one malformed record
/// can be skipped without poisoning its whole page. Legacy fully-nested
/// responses embed children directly via `left_child`/`right_child`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MemberFragment {
    #[serde(default)]
    pub node_id: Option<i64>,

    #[serde(default)]
    pub user_id: Option<i64>,

    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    /// Edge distance from the queried root; direct children are level 1
    #[serde(default)]
    pub level: Option<i64>,

    /// Immediate parent's node id
    #[serde(default)]
    pub parent: Option<i64>,

    #[serde(default)]
    pub parent_name: Option<String>,

    /// Branch this member belongs to, as tagged by the API
    #[serde(default)]
    pub side: Option<Side>,

    /// Decimal string; parsed leniently into `Member::metric_value`
    #[serde(default)]
    pub total_earnings: Option<String>,

    #[serde(default)]
    pub left_count: Option<u64>,

    #[serde(default)]
    pub right_count: Option<u64>,

    #[serde(default)]
    pub is_active_buyer: Option<bool>,

    #[serde(default)]
    pub referral_code: Option<String>,

    #[serde(default)]
    pub date_joined: Option<String>,

    /// Legacy nested shape only; absent when descendants are paginated
    #[serde(default)]
    pub left_child: Option<Box<MemberFragment>>,

    #[serde(default)]
    pub right_child: Option<Box<MemberFragment>>,
}

impl MemberFragment {
    /// Preferred display name: full name, else username
    pub fn display_name(&self) -> Option<&str> {
        self.full_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| self.username.as_deref().filter(|name| !name.is_empty()))
    }

    /// Reported descendant total (left + right subtree counters)
    pub fn reported_descendants(&self) -> u64 {
        self.left_count
            .unwrap_or(0)
            .saturating_add(self.right_count.unwrap_or(0))
    }

    pub fn nested_child(&self, side: Side) -> Option<&MemberFragment> {
        match side {
            Side::Left => self.left_child.as_deref(),
            Side::Right => self.right_child.as_deref(),
        }
    }
}

fn first_page() -> u32 {
    1
}

/// Pagination wrapper around one side-member collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEnvelope {
    pub count: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<MemberFragment>,
}

/// A side-member collection, resolved once at the input boundary
///
/// Older API responses ship a plain ordered list; current ones ship a
/// `PageEnvelope`. The shape is decided here so the engine never branches
/// on it again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SideMembers {
    Paged(PageEnvelope),
    Unpaged(Vec<MemberFragment>),
}

impl SideMembers {
    pub fn is_paginated(&self) -> bool {
        matches!(self, SideMembers::Paged(_))
    }

    /// The fragments of the current page (or the whole legacy list)
    pub fn fragments(&self) -> &[MemberFragment] {
        match self {
            SideMembers::Paged(envelope) => &envelope.results,
            SideMembers::Unpaged(list) => list,
        }
    }

    pub fn envelope(&self) -> Option<&PageEnvelope> {
        match self {
            SideMembers::Paged(envelope) => Some(envelope),
            SideMembers::Unpaged(_) => None,
        }
    }
}

/// A direct child of the queried root, with its side-member collections
///
/// Side-member pages never include the direct child itself; callers must
/// not double-count it against envelope totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChildSnapshot {
    #[serde(flatten)]
    pub fragment: MemberFragment,

    #[serde(default)]
    pub left_side_members: Option<SideMembers>,

    #[serde(default)]
    pub right_side_members: Option<SideMembers>,
}

impl ChildSnapshot {
    pub fn side_members(&self, side: Side) -> Option<&SideMembers> {
        match side {
            Side::Left => self.left_side_members.as_ref(),
            Side::Right => self.right_side_members.as_ref(),
        }
    }

    /// Capability flag, decided once when the snapshot is received: does
    /// this child's descendant set arrive through pagination envelopes?
    pub fn has_paginated_descendants(&self) -> bool {
        [Side::Left, Side::Right]
            .into_iter()
            .any(|side| self.side_members(side).is_some_and(SideMembers::is_paginated))
    }

    fn has_side_member_collections(&self) -> bool {
        self.left_side_members.is_some() || self.right_side_members.is_some()
    }
}

/// The queried root with up to two direct children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootSnapshot {
    pub id: i64,

    #[serde(default)]
    pub user_id: Option<i64>,

    #[serde(default)]
    pub full_name: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub referral_code: Option<String>,

    #[serde(default)]
    pub left_child: Option<ChildSnapshot>,

    #[serde(default)]
    pub right_child: Option<ChildSnapshot>,
}

impl RootSnapshot {
    pub fn child(&self, side: Side) -> Option<&ChildSnapshot> {
        match side {
            Side::Left => self.left_child.as_ref(),
            Side::Right => self.right_child.as_ref(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .or_else(|| self.username.as_deref().filter(|name| !name.is_empty()))
            .unwrap_or("")
    }

    /// True when any side-member collection is present on either child.
    /// When false the snapshot is a legacy fully-nested tree and must be
    /// walked by the fallback traversal.
    pub fn has_side_member_collections(&self) -> bool {
        [Side::Left, Side::Right]
            .into_iter()
            .filter_map(|side| self.child(side))
            .any(ChildSnapshot::has_side_member_collections)
    }
}

/// Engine output unit
///
/// Constructed fresh on every materialization; never cached across calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Member {
    pub id: i64,
    pub display_name: String,
    pub user_id: i64,
    pub joined_at: Option<DateTime<Utc>>,
    /// Branch assignment under the queried root; for direct children this
    /// is the slot they occupy under the root
    pub position: Side,
    pub metric_value: f64,
    pub level: u32,
    pub descendant_count: u64,
    pub is_active: bool,
    pub parent_id: Option<i64>,
    pub parent_name: String,
    pub referral_code: String,
}

/// Lenient join-date parsing: RFC 3339, then naive datetime, then date-only
pub(crate) fn parse_joined(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}
