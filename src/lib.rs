//! Downline - materialization engine for paginated binary genealogy trees
//!
//! Downline reconstructs a user-visible slice of a large binary referral
//! tree from a fragment-oriented API: a root snapshot carrying up to two
//! direct children, plus independently paginated side-member collections
//! per branch, are merged into a single deduplicated, depth/side-filtered,
//! level-annotated member list. A legacy fallback walks fully nested tree
//! objects when no paginated collections are present.

pub mod config;
pub mod error;
pub mod merge;
pub mod models;
pub mod pager;
pub mod query;
pub mod report;
pub mod resolver;
pub mod source;

// Re-exports for convenience
pub use config::{load_or_default, ConfigWarning, ViewerConfig};
pub use error::{DownlineError, DownlineResult};
pub use merge::{materialize, MergeOutcome};
pub use models::{
    ChildSnapshot, Member, MemberFragment, PageEnvelope, RootSnapshot, Side, SideFilter,
    SideMembers,
};
pub use pager::{PageCursors, PageWindow};
pub use query::{TreeQuery, MAX_PAGE_SIZE};
pub use report::{MergeAnomaly, MergeReport};
pub use source::{FetchError, FragmentSource, JsonFileSource};
