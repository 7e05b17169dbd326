//! `RequestRing` — the one bounded buffer design behind all four per-agent
//! queues.
//!
//! # Why a ring
//!
//! Queue traffic is tiny per agent but the population is large, so every
//! queue is a fixed-depth array: no per-push allocation, no unbounded growth
//! from a misbehaving proposal source.  Pushing into a full ring silently
//! evicts the oldest entry — an explicit capacity-vs-data-loss tradeoff, not
//! an error condition.  The FIFO queues read from the front; the LIFO
//! (interrupted) stack reads from the back of the same structure, so
//! "oldest" and "deepest" are the same slot and eviction is one rule.

use crate::ActivityRequest;

/// A fixed-capacity ring buffer of [`ActivityRequest`]s.
///
/// `pop_front` gives FIFO semantics, `pop_back` gives LIFO; both are O(1).
#[derive(Clone, Debug)]
pub struct RequestRing {
    slots: Vec<Option<ActivityRequest>>,
    /// Index of the oldest entry.
    head:  usize,
    /// Number of occupied slots, `0..=depth`.
    count: usize,
}

impl RequestRing {
    /// An empty ring with room for `depth` requests.
    ///
    /// # Panics
    /// Panics if `depth == 0`.
    pub fn new(depth: usize) -> Self {
        assert!(depth > 0, "ring depth must be > 0");
        Self {
            slots: vec![None; depth],
            head:  0,
            count: 0,
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    /// Append a request at the newest end.
    ///
    /// At capacity, the oldest (FIFO) / deepest (LIFO) entry is evicted and
    /// returned so callers that care can observe the loss.
    pub fn push(&mut self, request: ActivityRequest) -> Option<ActivityRequest> {
        let depth = self.slots.len();
        if self.count == depth {
            // Overwrite the oldest slot and advance the head past it.
            let evicted = self.slots[self.head].replace(request);
            self.head = (self.head + 1) % depth;
            return evicted;
        }
        let tail = (self.head + self.count) % depth;
        self.slots[tail] = Some(request);
        self.count += 1;
        None
    }

    /// Remove and return the oldest entry (FIFO order), or `None` if empty.
    pub fn pop_front(&mut self) -> Option<ActivityRequest> {
        if self.count == 0 {
            return None;
        }
        let request = self.slots[self.head].take();
        self.head = (self.head + 1) % self.slots.len();
        self.count -= 1;
        request
    }

    /// Remove and return the newest entry (LIFO order), or `None` if empty.
    ///
    /// The interrupted stack treats `None` here as a broken invariant; that
    /// policy lives in the engine, not the ring.
    pub fn pop_back(&mut self) -> Option<ActivityRequest> {
        if self.count == 0 {
            return None;
        }
        let tail = (self.head + self.count - 1) % self.slots.len();
        let request = self.slots[tail].take();
        self.count -= 1;
        request
    }

    /// The oldest entry without removing it.
    pub fn peek_front(&self) -> Option<&ActivityRequest> {
        if self.count == 0 {
            return None;
        }
        self.slots[self.head].as_ref()
    }

    /// The newest entry without removing it.
    pub fn peek_back(&self) -> Option<&ActivityRequest> {
        if self.count == 0 {
            return None;
        }
        let tail = (self.head + self.count - 1) % self.slots.len();
        self.slots[tail].as_ref()
    }

    /// Iterate oldest → newest without consuming.
    pub fn iter(&self) -> impl Iterator<Item = &ActivityRequest> + '_ {
        (0..self.count).map(move |i| {
            let idx = (self.head + i) % self.slots.len();
            self.slots[idx]
                .as_ref()
                .expect("occupied ring slot is Some")
        })
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.head = 0;
        self.count = 0;
    }
}
