//! `LockRegistry` — the blocked bit per region plus the hierarchical
//! unblock rule.
//!
//! # Unblock asymmetry
//!
//! Children gate the parent, never the other way round: a parent is blocked
//! *because* some descendant is blocked, never independently.  So
//! [`try_unblock`][LockRegistry::try_unblock] clears a region only once all
//! of its children are clear, and then walks the same check up a blocked
//! ancestor chain.  Blocking is the mirror image: locking a region with
//! `blocks_parent` locks the parent (and siblings) explicitly at grant time.

use acs_core::{CoreResult, RegionId};

use crate::RegionTable;

/// Blocked bit per region, parallel to the [`RegionTable`] rows.
pub struct LockRegistry {
    blocked: Vec<bool>,
}

impl LockRegistry {
    /// All regions unblocked.
    pub fn new(table: &RegionTable) -> Self {
        Self {
            blocked: vec![false; table.len()],
        }
    }

    /// `true` if `region` is currently blocked.
    pub fn is_blocked(&self, table: &RegionTable, region: RegionId) -> CoreResult<bool> {
        Ok(self.blocked[Self::slot(table, region)?])
    }

    /// Mark every listed region blocked.
    pub fn block(&mut self, table: &RegionTable, regions: &[RegionId]) -> CoreResult<()> {
        for &region in regions {
            self.blocked[Self::slot(table, region)?] = true;
        }
        Ok(())
    }

    /// Unconditionally clear one region's bit (no hierarchy check).
    ///
    /// Used for the side-effect locks (siblings, parent) whose holder is
    /// known to be releasing; plain activity locks go through
    /// [`try_unblock`][Self::try_unblock].
    pub fn clear(&mut self, table: &RegionTable, region: RegionId) -> CoreResult<()> {
        self.blocked[Self::slot(table, region)?] = false;
        Ok(())
    }

    /// Attempt to unblock `region` under the children-gate rule.
    ///
    /// The region is cleared only if *all* of its children (excluding
    /// itself) are currently unblocked.  On success, if its parent is
    /// blocked the same check recurses upward — a parent with two blocked
    /// children therefore unblocks in the exact tick the second child
    /// clears, never later.
    ///
    /// Returns `true` if `region` itself was unblocked.
    pub fn try_unblock(&mut self, table: &RegionTable, region: RegionId) -> CoreResult<bool> {
        for &child in table.children(region)? {
            if child != region && self.is_blocked(table, child)? {
                return Ok(false);
            }
        }

        self.blocked[Self::slot(table, region)?] = false;

        let parent = table.parent(region)?;
        if parent != region && self.is_blocked(table, parent)? {
            self.try_unblock(table, parent)?;
        }
        Ok(true)
    }

    /// Number of currently blocked regions.
    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// The registry's bit for a region lives at the same position as the
    /// region's row in the table.
    fn slot(table: &RegionTable, region: RegionId) -> CoreResult<usize> {
        table.pos(region)
    }
}
