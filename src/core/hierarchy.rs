//! Parent-child relations between regions
//!
//! A region may sit inside a larger one (a volcano inside a mountain range).
//! The backward resolver treats a target stored in a parent or child region
//! as reachable from the requesting region.

use crate::core::types::Region;
use serde::{Deserialize, Serialize};

/// One edge of the region tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionLink {
    pub child: Region,
    pub parent: Region,
}

impl RegionLink {
    pub fn new(child: Region, parent: Region) -> Self {
        Self { child, parent }
    }
}

/// Region forest built from configured links
#[derive(Debug, Clone, Default)]
pub struct RegionHierarchy {
    links: Vec<RegionLink>,
}

impl RegionHierarchy {
    pub fn new(links: &[RegionLink]) -> Self {
        let links = links
            .iter()
            .copied()
            .filter(|l| l.child != l.parent)
            .filter(|l| l.child != Region::Unknown && l.parent != Region::Unknown)
            .collect();
        Self { links }
    }

    /// True if `a` is the direct parent or a direct child of `b`
    pub fn is_related(&self, a: Region, b: Region) -> bool {
        self.links
            .iter()
            .any(|l| (l.child == a && l.parent == b) || (l.child == b && l.parent == a))
    }
}
