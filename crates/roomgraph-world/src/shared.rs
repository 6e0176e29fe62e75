//! A master graph that many merges can write to at once.
//!
//! The index of identities sits behind a read-write lock; each room sits
//! behind its own mutex. A merge takes the index lock only long enough to
//! find or create the room's slot, so merges of disjoint identities run in
//! parallel while two merges of the same identity take turns.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use roomgraph_core::{IdentityIntegrityError, Room, RoomId};

use crate::graph::{Absorbed, WorldGraph};
use crate::merge::MergeReport;

type Slot = Arc<Mutex<Room>>;

/// Concurrent master graph.
#[derive(Debug, Default)]
pub struct SharedWorld {
    index: RwLock<HashMap<RoomId, Slot>>,
}

impl SharedWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the master with an existing graph.
    pub fn from_graph(graph: WorldGraph) -> Self {
        let index = graph
            .into_rooms()
            .into_iter()
            .map(|room| (room.id.clone(), Arc::new(Mutex::new(room))))
            .collect();
        Self {
            index: RwLock::new(index),
        }
    }

    /// Merge a single room.
    pub fn merge_room(&self, room: Room) -> Result<Absorbed, IdentityIntegrityError> {
        let existing = self
            .index
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&room.id)
            .cloned();

        let slot = match existing {
            Some(slot) => slot,
            None => {
                let mut index = self.index.write().unwrap_or_else(PoisonError::into_inner);
                match index.get(&room.id) {
                    // Another merge created the slot between our two locks.
                    Some(slot) => slot.clone(),
                    None => {
                        index.insert(room.id.clone(), Arc::new(Mutex::new(room)));
                        return Ok(Absorbed::Added);
                    }
                }
            }
        };

        let mut held = slot.lock().unwrap_or_else(PoisonError::into_inner);
        held.merge_from(&room).map(Absorbed::Merged)
    }

    /// Merge every room of a partial graph.
    pub fn merge_graph(&self, graph: WorldGraph) -> MergeReport {
        let mut report = MergeReport::default();
        for room in graph.into_rooms() {
            report.record(self.merge_room(room));
        }
        report
    }

    pub fn room_count(&self) -> usize {
        self.index
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Collect the merged rooms into an ordinary graph.
    pub fn into_graph(self) -> WorldGraph {
        let index = self.index.into_inner().unwrap_or_else(PoisonError::into_inner);
        index
            .into_values()
            .map(|slot| match Arc::try_unwrap(slot) {
                Ok(mutex) => mutex.into_inner().unwrap_or_else(PoisonError::into_inner),
                Err(shared) => shared
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone(),
            })
            .collect()
    }
}
