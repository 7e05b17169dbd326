//! `ActivityRegistry` — the closed set of activity kinds for one run.
//!
//! Kinds are registered once at setup, in a deterministic order, and the set
//! is closed for the duration of the run.  The registry is an explicit value
//! passed to every component at construction time; there is no process-wide
//! counter, so two engines in one process never interfere.
//!
//! Id 0 is pre-registered as the `"none"` kind — the "no activity" sentinel
//! every agent starts in and returns to when an activity stops.

use crate::{ActivityId, CoreError, CoreResult};

/// One registered activity kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityKind {
    /// Registration-order id.  `ActivityId::NONE` for the sentinel.
    pub id: ActivityId,
    /// Application-chosen name ("sleep", "work", …).  Unique within a run.
    pub name: String,
}

/// The closed, ordered set of activity kinds.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityRegistry {
    kinds: Vec<ActivityKind>,
}

impl ActivityRegistry {
    /// A registry containing only the reserved `"none"` sentinel kind.
    pub fn new() -> Self {
        Self {
            kinds: vec![ActivityKind {
                id:   ActivityId::NONE,
                name: "none".to_owned(),
            }],
        }
    }

    /// Register a new kind and return its id.
    ///
    /// Ids are assigned by registration order, starting at 1 (0 is the
    /// reserved sentinel).  Registering a duplicate name is a setup error.
    pub fn register(&mut self, name: &str) -> CoreResult<ActivityId> {
        if self.kinds.iter().any(|k| k.name == name) {
            return Err(CoreError::DuplicateActivity(name.to_owned()));
        }
        let id = ActivityId(
            u16::try_from(self.kinds.len())
                .map_err(|_| CoreError::Config("activity registry full".to_owned()))?,
        );
        self.kinds.push(ActivityKind { id, name: name.to_owned() });
        Ok(id)
    }

    /// Number of registered kinds, including the sentinel.
    ///
    /// This is the stride of every state-table row.
    #[inline]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        // Never true: the sentinel is always present.
        self.kinds.is_empty()
    }

    /// `true` if `id` refers to a registered kind.
    #[inline]
    pub fn contains(&self, id: ActivityId) -> bool {
        id.index() < self.kinds.len()
    }

    /// Name of a registered kind, or `None` for out-of-range ids.
    pub fn name(&self, id: ActivityId) -> Option<&str> {
        self.kinds.get(id.index()).map(|k| k.name.as_str())
    }

    /// Look up a kind by name.
    pub fn id_of(&self, name: &str) -> Option<ActivityId> {
        self.kinds.iter().find(|k| k.name == name).map(|k| k.id)
    }

    /// Read-only slice of all kinds in id order.
    pub fn kinds(&self) -> &[ActivityKind] {
        &self.kinds
    }
}
