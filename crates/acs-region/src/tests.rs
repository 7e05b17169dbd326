//! Unit tests for acs-region.

use acs_core::{AgentId, RegionId};

use crate::{DirectRelocator, LockRegistry, RegionTable, Relocator};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A small house:
///
/// ```text
/// universe(0)
/// └── house(1)
///     ├── kitchen(2)
///     ├── bedroom(3)
///     └── bathroom(4)
/// ```
fn house(agent_count: usize) -> RegionTable {
    RegionTable::new(
        &[
            (RegionId(1), RegionId::UNIVERSE),
            (RegionId(2), RegionId(1)),
            (RegionId(3), RegionId(1)),
            (RegionId(4), RegionId(1)),
        ],
        agent_count,
    )
    .unwrap()
}

// ── RegionTable ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod table {
    use super::*;

    #[test]
    fn universe_inserted_automatically() {
        let t = house(0);
        assert!(t.contains(RegionId::UNIVERSE));
        assert_eq!(t.len(), 5);
        assert_eq!(t.parent(RegionId::UNIVERSE).unwrap(), RegionId::UNIVERSE);
    }

    #[test]
    fn tree_structure() {
        let t = house(0);
        assert_eq!(t.parent(RegionId(2)).unwrap(), RegionId(1));
        assert_eq!(
            t.children(RegionId(1)).unwrap(),
            &[RegionId(2), RegionId(3), RegionId(4)]
        );
        assert_eq!(
            t.siblings(RegionId(2)).unwrap(),
            vec![RegionId(3), RegionId(4)]
        );
        assert!(t.siblings(RegionId::UNIVERSE).unwrap().is_empty());
    }

    #[test]
    fn agents_start_in_universe() {
        let t = house(3);
        assert_eq!(t.occupancy(RegionId::UNIVERSE).unwrap(), 3);
        assert_eq!(t.occupancy(RegionId(2)).unwrap(), 0);
        assert_eq!(t.region_of(AgentId(1)), RegionId::UNIVERSE);
    }

    #[test]
    fn move_updates_occupancy_both_sides() {
        let mut t = house(3);
        let moved = t.move_agents(&[AgentId(0), AgentId(2)], RegionId(2)).unwrap();
        assert_eq!(moved, vec![AgentId(0), AgentId(2)]);
        assert_eq!(t.occupancy(RegionId(2)).unwrap(), 2);
        assert_eq!(t.occupancy(RegionId::UNIVERSE).unwrap(), 1);
        assert_eq!(t.region_of(AgentId(0)), RegionId(2));

        // Moving between rooms releases the old room.
        t.move_agents(&[AgentId(0)], RegionId(3)).unwrap();
        assert_eq!(t.occupancy(RegionId(2)).unwrap(), 1);
        assert_eq!(t.occupancy(RegionId(3)).unwrap(), 1);
    }

    #[test]
    fn move_to_current_region_is_noop_but_counts_as_moved() {
        let mut t = house(1);
        t.move_agents(&[AgentId(0)], RegionId(2)).unwrap();
        let moved = t.move_agents(&[AgentId(0)], RegionId(2)).unwrap();
        assert_eq!(moved, vec![AgentId(0)]);
        assert_eq!(t.occupancy(RegionId(2)).unwrap(), 1);
    }

    #[test]
    fn unknown_region_is_an_error() {
        let mut t = house(1);
        assert!(t.move_agents(&[AgentId(0)], RegionId(99)).is_err());
        assert!(t.occupancy(RegionId(99)).is_err());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let result = RegionTable::new(
            &[(RegionId(1), RegionId::UNIVERSE), (RegionId(1), RegionId::UNIVERSE)],
            0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_parent_rejected() {
        let result = RegionTable::new(&[(RegionId(2), RegionId(7))], 0);
        assert!(result.is_err());
    }
}

// ── LockRegistry ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod locks {
    use super::*;

    #[test]
    fn block_and_query() {
        let t = house(0);
        let mut locks = LockRegistry::new(&t);
        assert!(!locks.is_blocked(&t, RegionId(2)).unwrap());

        locks.block(&t, &[RegionId(2), RegionId(3)]).unwrap();
        assert!(locks.is_blocked(&t, RegionId(2)).unwrap());
        assert!(locks.is_blocked(&t, RegionId(3)).unwrap());
        assert!(!locks.is_blocked(&t, RegionId(4)).unwrap());
        assert_eq!(locks.blocked_count(), 2);
    }

    #[test]
    fn leaf_unblocks_immediately() {
        let t = house(0);
        let mut locks = LockRegistry::new(&t);
        locks.block(&t, &[RegionId(2)]).unwrap();
        assert!(locks.try_unblock(&t, RegionId(2)).unwrap());
        assert!(!locks.is_blocked(&t, RegionId(2)).unwrap());
    }

    #[test]
    fn parent_gated_by_children() {
        let t = house(0);
        let mut locks = LockRegistry::new(&t);
        // Parent blocked because two children are blocked.
        locks.block(&t, &[RegionId(1), RegionId(2), RegionId(3)]).unwrap();

        // Parent cannot clear while any child is blocked.
        assert!(!locks.try_unblock(&t, RegionId(1)).unwrap());
        assert!(locks.is_blocked(&t, RegionId(1)).unwrap());

        // First child clears; parent still gated by the second.
        assert!(locks.try_unblock(&t, RegionId(2)).unwrap());
        assert!(locks.is_blocked(&t, RegionId(1)).unwrap());

        // Second child clears → the recursion clears the parent in the same
        // call, not a tick later.
        assert!(locks.try_unblock(&t, RegionId(3)).unwrap());
        assert!(!locks.is_blocked(&t, RegionId(1)).unwrap());
    }

    #[test]
    fn recursion_stops_at_unblocked_parent() {
        let t = house(0);
        let mut locks = LockRegistry::new(&t);
        locks.block(&t, &[RegionId(2)]).unwrap();
        // Parent (house) never blocked; child clearing must not touch it.
        assert!(locks.try_unblock(&t, RegionId(2)).unwrap());
        assert!(!locks.is_blocked(&t, RegionId(1)).unwrap());
    }

    #[test]
    fn clear_is_unconditional() {
        let t = house(0);
        let mut locks = LockRegistry::new(&t);
        locks.block(&t, &[RegionId(1), RegionId(2)]).unwrap();
        // Even with a blocked child, `clear` drops the parent bit directly.
        locks.clear(&t, RegionId(1)).unwrap();
        assert!(!locks.is_blocked(&t, RegionId(1)).unwrap());
        assert!(locks.is_blocked(&t, RegionId(2)).unwrap());
    }
}

// ── Relocator ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod relocate {
    use super::*;

    #[test]
    fn direct_relocator_moves_everyone() {
        let mut t = house(2);
        let mut relocator = DirectRelocator;
        let moved = relocator
            .move_agents(&mut t, &[AgentId(0), AgentId(1)], RegionId(3))
            .unwrap();
        assert_eq!(moved.len(), 2);
        assert_eq!(t.occupancy(RegionId(3)).unwrap(), 2);
    }
}
