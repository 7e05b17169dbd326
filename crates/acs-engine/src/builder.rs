//! `EngineBuilder` — validated assembly of an [`Engine`].
//!
//! The builder owns every setup decision: population size, region tree,
//! proposal sources, observers, and the relocation collaborator.  `build`
//! cross-checks the pieces against each other so the engine itself can
//! assume consistent sizes everywhere.

use acs_core::{ActivityRegistry, EngineConfig, RegionId};
use acs_propose::ProposalSource;
use acs_queue::AgentQueues;
use acs_region::{DirectRelocator, RegionTable, Relocator};
use acs_state::{ActivityStateTable, AgentRngs};

use crate::{Engine, EngineError, EngineObserver, EngineResult};

/// Step-wise constructor for [`Engine`].
///
/// ```no_run
/// # use acs_core::{ActivityRegistry, EngineConfig};
/// # use acs_engine::EngineBuilder;
/// # use acs_region::DirectRelocator;
/// let mut registry = ActivityRegistry::new();
/// registry.register("rest").unwrap();
/// let engine = EngineBuilder::new(EngineConfig::default(), registry, 100)
///     .relocator(DirectRelocator)
///     .build()
///     .unwrap();
/// ```
pub struct EngineBuilder<R: Relocator = DirectRelocator> {
    config:      EngineConfig,
    registry:    ActivityRegistry,
    agent_count: usize,
    regions:     Option<RegionTable>,
    rngs:        Option<AgentRngs>,
    sources:     Vec<Box<dyn ProposalSource>>,
    observers:   Vec<Box<dyn EngineObserver>>,
    relocator:   Option<R>,
}

impl EngineBuilder<DirectRelocator> {
    /// Start a build for `agent_count` agents.  Location tracking is off
    /// until a relocator is supplied.
    pub fn new(config: EngineConfig, registry: ActivityRegistry, agent_count: usize) -> Self {
        Self {
            config,
            registry,
            agent_count,
            regions: None,
            rngs: None,
            sources: Vec::new(),
            observers: Vec::new(),
            relocator: None,
        }
    }
}

impl<R: Relocator> EngineBuilder<R> {
    /// Use a pre-built region table.
    pub fn regions(mut self, regions: RegionTable) -> Self {
        self.regions = Some(regions);
        self
    }

    /// Build the region table from `(id, parent)` rows.
    pub fn region_rows(mut self, rows: &[(RegionId, RegionId)]) -> EngineResult<Self> {
        self.regions = Some(RegionTable::new(rows, self.agent_count)?);
        Ok(self)
    }

    /// Override the per-agent RNG pool (defaults to one seeded from
    /// `config.seed`).
    pub fn rngs(mut self, rngs: AgentRngs) -> Self {
        self.rngs = Some(rngs);
        self
    }

    /// Attach a proposal source.  Sources are consulted in ascending
    /// z-order regardless of attachment order.
    pub fn source(mut self, source: Box<dyn ProposalSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Attach a passive per-tick observer.
    pub fn observer(mut self, observer: Box<dyn EngineObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Supply the relocation collaborator, enabling location arbitration.
    pub fn relocator<R2: Relocator>(self, relocator: R2) -> EngineBuilder<R2> {
        EngineBuilder {
            config:      self.config,
            registry:    self.registry,
            agent_count: self.agent_count,
            regions:     self.regions,
            rngs:        self.rngs,
            sources:     self.sources,
            observers:   self.observers,
            relocator:   Some(relocator),
        }
    }

    /// Validate and assemble the engine.
    ///
    /// # Errors
    /// - `Config` if the queue depth is zero or the registry holds only the
    ///   reserved none-kind.
    /// - `CountMismatch` if a supplied RNG pool does not cover the
    ///   population.
    pub fn build(mut self) -> EngineResult<Engine<R>> {
        if self.config.queue_depth == 0 {
            return Err(EngineError::Config("queue_depth must be > 0".to_owned()));
        }
        if self.registry.len() <= 1 {
            return Err(EngineError::Config(
                "no activity kinds registered".to_owned(),
            ));
        }

        let rngs = match self.rngs.take() {
            Some(rngs) => {
                if rngs.len() != self.agent_count {
                    return Err(EngineError::CountMismatch {
                        expected: self.agent_count,
                        got:      rngs.len(),
                        what:     "agent rngs",
                    });
                }
                rngs
            }
            None => AgentRngs::new(self.agent_count, self.config.seed),
        };
        let regions = match self.regions.take() {
            Some(regions) => regions,
            None => RegionTable::new(&[], self.agent_count)?,
        };

        // Stable sort: sources sharing a z-order keep attachment order.
        self.sources.sort_by_key(|s| s.z_order());

        let table = ActivityStateTable::new(self.agent_count, self.registry.len());
        let queues = AgentQueues::new(self.agent_count, self.config.queue_depth);

        Ok(Engine::assemble(
            self.config,
            self.registry,
            table,
            rngs,
            queues,
            regions,
            self.sources,
            self.observers,
            self.relocator,
        ))
    }
}
