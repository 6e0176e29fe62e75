//! Human-readable labels for rooms.
//!
//! Labels are for people reading the output; identity comparisons always
//! use [`RoomId`]. A registry lives for one parse run, so parallel runs
//! never share a counter.

use std::collections::HashMap;

use roomgraph_core::RoomId;

/// Hands out `slug`, `slug_01`, `slug_02`, ... in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct LabelRegistry {
    assigned: HashMap<RoomId, String>,
    per_slug: HashMap<String, usize>,
}

impl LabelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The label for `id`, assigning the next free one on first sight.
    pub fn label(&mut self, id: &RoomId) -> String {
        if let Some(label) = self.assigned.get(id) {
            return label.clone();
        }
        let seen = self.per_slug.entry(id.slug().to_string()).or_insert(0);
        let label = if *seen == 0 {
            id.slug().to_string()
        } else {
            format!("{}_{:02}", id.slug(), seen)
        };
        *seen += 1;
        self.assigned.insert(id.clone(), label.clone());
        label
    }

    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
