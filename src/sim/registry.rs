//! Entity registry with two-phase removal
//!
//! Ids are monotonically allocated and never reused for the life of the
//! process. A `BTreeMap` keeps iteration in ascending-id order, which the
//! collision pass relies on for reproducible resolution. Removal is
//! mark-then-flush: `mark_removed` only enqueues an id, and the map is
//! only mutated by `flush_removals` once the tick's scans are done.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entity::Body;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    bodies: BTreeMap<u32, Body>,
    pending_removal: Vec<u32>,
    next_id: u32,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            bodies: BTreeMap::new(),
            pending_removal: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, body: Body) {
        debug_assert!(!self.bodies.contains_key(&body.id));
        self.bodies.insert(body.id, body);
    }

    pub fn get(&self, id: u32) -> Option<&Body> {
        self.bodies.get(&id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Body> {
        self.bodies.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Ascending-id snapshot of the live set, taken at scan start
    pub fn ids(&self) -> Vec<u32> {
        self.bodies.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.values()
    }

    /// Remove every body and drop the removal queue. The id allocator
    /// carries on, so ids stay unique for the life of the process even
    /// across session restarts.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.pending_removal.clear();
    }

    /// Enqueue an id for end-of-tick removal. Idempotent: duplicate marks
    /// are harmless and the flush tolerates them.
    pub fn mark_removed(&mut self, id: u32) {
        self.pending_removal.push(id);
    }

    /// Ids currently queued for removal
    pub fn pending_removals(&self) -> &[u32] {
        &self.pending_removal
    }

    /// Drain the removal queue and delete each id. A second delete of the
    /// same id is a silent no-op. Returns the number of bodies removed.
    pub fn flush_removals(&mut self) -> usize {
        let mut removed = 0;
        for id in std::mem::take(&mut self.pending_removal) {
            if self.bodies.remove(&id).is_some() {
                removed += 1;
            }
        }
        removed
    }
}
