//! The room graph container.
//!
//! Rooms are keyed by [`RoomId`] in a `BTreeMap`, so iteration and
//! serialization order depend only on content.

use std::collections::BTreeMap;

use roomgraph_core::{
    location_of, IdentityIntegrityError, RegionLookup, Room, RoomId, RoomMerge,
};
use roomgraph_parse::LabelRegistry;
use tracing::warn;

/// How a room entered the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Absorbed {
    /// First time this identity was seen.
    Added,
    /// Folded into an existing record.
    Merged(RoomMerge),
}

/// A set of rooms keyed by identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorldGraph {
    rooms: BTreeMap<RoomId, Room>,
}

impl WorldGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a room, or fold it into the record already held for its id.
    ///
    /// A room whose id matches but whose content does not is refused and
    /// the graph is left as it was.
    pub fn absorb(&mut self, room: Room) -> Result<Absorbed, IdentityIntegrityError> {
        match self.rooms.get_mut(&room.id) {
            Some(existing) => existing.merge_from(&room).map(Absorbed::Merged),
            None => {
                self.rooms.insert(room.id.clone(), room);
                Ok(Absorbed::Added)
            }
        }
    }

    pub fn get(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    pub fn get_mut(&mut self, id: &RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id)
    }

    pub fn contains(&self, id: &RoomId) -> bool {
        self.rooms.contains_key(id)
    }

    /// Find a room by its display id, label, or bare fingerprint.
    pub fn find(&self, key: &str) -> Option<&Room> {
        if let Ok(id) = key.parse::<RoomId>() {
            if let Some(room) = self.rooms.get(&id) {
                return Some(room);
            }
        }
        self.rooms
            .values()
            .find(|room| room.label == key || room.id.fingerprint() == key)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn into_rooms(self) -> Vec<Room> {
        self.rooms.into_values().collect()
    }

    /// Number of exits across all rooms, and how many of them resolve.
    pub fn exit_counts(&self) -> (usize, usize) {
        self.rooms.values().fold((0, 0), |(all, resolved), room| {
            (all + room.exits.len(), resolved + room.exits.resolved_count())
        })
    }

    /// Reassign labels so they are unique across the whole graph.
    ///
    /// Rooms are labelled in order of first observation (source, then line),
    /// which keeps labels stable for a given set of inputs.
    pub fn relabel(&mut self) {
        let mut order: Vec<(String, usize, RoomId)> = self
            .rooms
            .values()
            .map(|r| {
                (
                    r.provenance.source.clone(),
                    r.provenance.lines.start,
                    r.id.clone(),
                )
            })
            .collect();
        order.sort();
        let mut labels = LabelRegistry::new();
        for (_, _, id) in order {
            let label = labels.label(&id);
            if let Some(room) = self.rooms.get_mut(&id) {
                room.label = label;
            }
        }
    }

    /// Tag rooms that have no region yet.
    ///
    /// A scoped region applies to every such room; otherwise the lookup is
    /// asked with the room's location text. Returns the number tagged.
    pub fn annotate_regions(&mut self, lookup: &dyn RegionLookup, scoped: Option<&str>) -> usize {
        let mut tagged = 0;
        for room in self.rooms.values_mut().filter(|r| r.region.is_none()) {
            let region = match scoped {
                Some(region) => region.to_string(),
                None => lookup.classify(location_of(&room.title)),
            };
            room.region = Some(region);
            tagged += 1;
        }
        tagged
    }
}

impl FromIterator<Room> for WorldGraph {
    /// Collect rooms, keeping the first record for any colliding identity.
    /// Use [`WorldGraph::absorb`] where the collision must be reported.
    fn from_iter<I: IntoIterator<Item = Room>>(iter: I) -> Self {
        let mut graph = WorldGraph::new();
        for room in iter {
            if let Err(err) = graph.absorb(room) {
                warn!(%err, "dropping room with colliding identity");
            }
        }
        graph
    }
}
