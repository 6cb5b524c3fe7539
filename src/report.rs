//! Data-quality anomalies collected during a materialization
//!
//! One bad record never aborts a merge; it is skipped (or dropped) and
//! recorded here so callers can surface the problem without losing the
//! rest of the view.

use std::fmt;

use crate::models::{Side, SideFilter};

/// A non-fatal irregularity noticed while merging fragments
#[derive(Debug, Clone, PartialEq)]
pub enum MergeAnomaly {
    /// Fragment without `node_id`/`user_id`; skipped
    MissingIdentity { branch: Side, index: usize },

    /// A `node_id` that was already emitted in this materialization
    DuplicateNode { node_id: i64 },

    /// Fragment tagged for a side the query did not request; dropped by
    /// the safety filter
    SideConflict {
        node_id: i64,
        tagged: Side,
        requested: SideFilter,
    },

    /// A member that slipped past the depth bounds and was dropped by the
    /// safety filter
    DepthConflict { node_id: i64, level: u32 },

    /// `total_earnings` that did not parse as a decimal; treated as 0
    UnparsedEarnings { node_id: i64, raw: String },

    /// `date_joined` in no recognized format; treated as unknown
    UnparsedDate { node_id: i64, raw: String },
}

impl fmt::Display for MergeAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeAnomaly::MissingIdentity { branch, index } => write!(
                f,
                "skipped fragment #{index} on {} branch: missing node_id/user_id",
                branch.as_str()
            ),
            MergeAnomaly::DuplicateNode { node_id } => {
                write!(f, "node {node_id} appeared more than once; kept first")
            }
            MergeAnomaly::SideConflict {
                node_id,
                tagged,
                requested,
            } => write!(
                f,
                "node {node_id} tagged {} but query requested {}; dropped",
                tagged.as_str(),
                requested.as_str()
            ),
            MergeAnomaly::DepthConflict { node_id, level } => {
                write!(f, "node {node_id} at level {level} escaped depth bounds; dropped")
            }
            MergeAnomaly::UnparsedEarnings { node_id, raw } => {
                write!(f, "node {node_id}: unparseable earnings '{raw}'")
            }
            MergeAnomaly::UnparsedDate { node_id, raw } => {
                write!(f, "node {node_id}: unparseable join date '{raw}'")
            }
        }
    }
}

/// Collector for the anomalies of one materialization pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeReport {
    pub anomalies: Vec<MergeAnomaly>,
}

impl MergeReport {
    pub fn record(&mut self, anomaly: MergeAnomaly) {
        self.anomalies.push(anomaly);
    }

    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.anomalies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anomalies.is_empty()
    }
}
