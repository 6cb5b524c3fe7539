//! Immutable materialization query
//!
//! A `TreeQuery` captures everything one materialization depends on: the
//! root, the side filter, the page cursor, and the inclusive depth bounds.
//! The engine takes it by reference and holds no state of its own, so a
//! superseded fetch can simply be discarded and re-run with fresh inputs.

use crate::error::{DownlineError, DownlineResult};
use crate::models::SideFilter;

/// Largest page the API accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// Default page size when no configuration overrides it
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Query parameters for one materialization / fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeQuery {
    pub root_id: i64,
    pub side: SideFilter,
    /// 1-based page cursor
    pub page: u32,
    pub page_size: u32,
    /// Inclusive lower depth bound; `None` is unconstrained
    pub min_depth: Option<u32>,
    /// Inclusive upper depth bound; `None` is unconstrained
    pub max_depth: Option<u32>,
}

impl TreeQuery {
    pub fn new(root_id: i64) -> Self {
        Self {
            root_id,
            side: SideFilter::Both,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            min_depth: None,
            max_depth: None,
        }
    }

    pub fn with_side(mut self, side: SideFilter) -> Self {
        self.side = side;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_depth_bounds(mut self, min_depth: Option<u32>, max_depth: Option<u32>) -> Self {
        self.min_depth = min_depth;
        self.max_depth = max_depth;
        self
    }

    pub fn validate(&self) -> DownlineResult<()> {
        if self.page < 1 {
            return Err(DownlineError::InvalidPage { page: self.page });
        }
        if self.page_size < 1 || self.page_size > MAX_PAGE_SIZE {
            return Err(DownlineError::InvalidPageSize {
                page_size: self.page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        if let (Some(min), Some(max)) = (self.min_depth, self.max_depth) {
            if min > max {
                return Err(DownlineError::InvertedDepthBounds { min, max });
            }
        }
        Ok(())
    }

    /// Inclusive depth-bound check; an unset bound is unconstrained
    pub fn admits_level(&self, level: u32) -> bool {
        if self.min_depth.is_some_and(|min| level < min) {
            return false;
        }
        if self.max_depth.is_some_and(|max| level > max) {
            return false;
        }
        true
    }

    /// Request parameters for a fetch.
    ///
    /// Unset depth bounds are omitted entirely rather than sent as null, so
    /// upstream cache keys stay unambiguous.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("rootId", self.root_id.to_string()),
            ("side", self.side.as_str().to_string()),
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
        ];
        if let Some(min) = self.min_depth {
            pairs.push(("min_depth", min.to_string()));
        }
        if let Some(max) = self.max_depth {
            pairs.push(("max_depth", max.to_string()));
        }
        pairs
    }

    pub fn query_string(&self) -> String {
        let pairs: Vec<String> = self
            .to_query_pairs()
            .into_iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        pairs.join("&")
    }
}
