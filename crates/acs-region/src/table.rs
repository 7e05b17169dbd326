//! `RegionTable` — the scheduler's read/write view of the location tree.
//!
//! The geometry collaborator owns the actual spatial model; this table keeps
//! only what scheduling needs: the `(id, parent)` tree, per-region occupancy
//! counts, and each agent's current region.  Rows are sorted by id and
//! looked up by binary search, so region ids may be sparse.
//!
//! `RegionId::UNIVERSE` (id 0) is always present: it is the root of the
//! tree, its own parent, and the region every agent starts in.

use acs_core::{AgentId, CoreError, CoreResult, RegionId};

/// One row of the region tree: `(id, parent)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionRow {
    pub id:     RegionId,
    /// `RegionId::UNIVERSE` for top-level regions.
    pub parent: RegionId,
}

/// The region tree plus live occupancy, indexed by binary search on id.
pub struct RegionTable {
    /// Sorted ascending by `id`, universe row first.
    rows: Vec<RegionRow>,
    /// Children of each row, parallel to `rows`.
    children: Vec<Vec<RegionId>>,
    /// Live occupant count per row, parallel to `rows`.
    occupancy: Vec<u32>,
    /// Each agent's current region.  Everyone starts in the universe.
    agent_region: Vec<RegionId>,
}

impl RegionTable {
    /// Build a table from `(id, parent)` pairs for `agent_count` agents.
    ///
    /// The universe row (id 0) is inserted automatically if absent.  All
    /// agents start in the universe, which therefore begins with occupancy
    /// equal to the population.
    ///
    /// # Errors
    /// Returns `CoreError::Config` on duplicate ids or a parent that is not
    /// itself a listed region.
    pub fn new(regions: &[(RegionId, RegionId)], agent_count: usize) -> CoreResult<Self> {
        let mut rows: Vec<RegionRow> = regions
            .iter()
            .map(|&(id, parent)| RegionRow { id, parent })
            .collect();
        if !rows.iter().any(|r| r.id == RegionId::UNIVERSE) {
            rows.push(RegionRow {
                id:     RegionId::UNIVERSE,
                parent: RegionId::UNIVERSE,
            });
        }
        rows.sort_unstable_by_key(|r| r.id);
        if rows.windows(2).any(|w| w[0].id == w[1].id) {
            return Err(CoreError::Config("duplicate region id".to_owned()));
        }

        let mut table = Self {
            children:     vec![Vec::new(); rows.len()],
            occupancy:    vec![0; rows.len()],
            agent_region: vec![RegionId::UNIVERSE; agent_count],
            rows,
        };

        // Wire up children; every parent must resolve.
        for i in 0..table.rows.len() {
            let RegionRow { id, parent } = table.rows[i];
            if id == RegionId::UNIVERSE {
                continue;
            }
            let p = table
                .pos(parent)
                .map_err(|_| CoreError::Config(format!("region {id} has unknown parent {parent}")))?;
            table.children[p].push(id);
        }

        table.occupancy[0] = agent_count as u32;
        Ok(table)
    }

    /// Row position of `region`, by binary search.  The lock registry keys
    /// its bit vector off the same positions.
    pub(crate) fn pos(&self, region: RegionId) -> CoreResult<usize> {
        self.rows
            .binary_search_by_key(&region, |r| r.id)
            .map_err(|_| CoreError::RegionNotFound(region))
    }

    /// Number of regions, universe included.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `true` if `region` is a listed region.
    pub fn contains(&self, region: RegionId) -> bool {
        self.pos(region).is_ok()
    }

    /// All region ids in ascending order.
    pub fn region_ids(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.rows.iter().map(|r| r.id)
    }

    // ── Tree queries ──────────────────────────────────────────────────────

    /// Parent of `region` (`UNIVERSE` for top-level regions and the universe
    /// itself).
    pub fn parent(&self, region: RegionId) -> CoreResult<RegionId> {
        Ok(self.rows[self.pos(region)?].parent)
    }

    /// Direct children of `region`.
    pub fn children(&self, region: RegionId) -> CoreResult<&[RegionId]> {
        Ok(&self.children[self.pos(region)?])
    }

    /// Siblings of `region`: the parent's other children.
    pub fn siblings(&self, region: RegionId) -> CoreResult<Vec<RegionId>> {
        let parent = self.parent(region)?;
        if parent == region {
            // The universe has no siblings.
            return Ok(Vec::new());
        }
        Ok(self
            .children(parent)?
            .iter()
            .copied()
            .filter(|&c| c != region)
            .collect())
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// Live occupant count of `region`.
    pub fn occupancy(&self, region: RegionId) -> CoreResult<u32> {
        Ok(self.occupancy[self.pos(region)?])
    }

    /// The region `agent` currently occupies.
    #[inline]
    pub fn region_of(&self, agent: AgentId) -> RegionId {
        self.agent_region[agent.index()]
    }

    /// Teleport `agents` into `dest`, updating both regions' occupancy.
    ///
    /// Agents already in `dest` are left alone but still count as moved.
    /// Returns the agents now in `dest` (all of them — the table itself
    /// never refuses a move; partial failure is a relocation-collaborator
    /// concern).
    pub fn move_agents(&mut self, agents: &[AgentId], dest: RegionId) -> CoreResult<Vec<AgentId>> {
        let dest_pos = self.pos(dest)?;
        let mut moved = Vec::with_capacity(agents.len());
        for &agent in agents {
            let from = self.agent_region[agent.index()];
            if from != dest {
                let from_pos = self.pos(from)?;
                self.occupancy[from_pos] -= 1;
                self.occupancy[dest_pos] += 1;
                self.agent_region[agent.index()] = dest;
            }
            moved.push(agent);
        }
        Ok(moved)
    }
}
