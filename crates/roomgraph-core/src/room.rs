//! The finished room record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::diagnostic::{ExitConflict, IdentityIntegrityError};
use crate::exit::{ExitName, ExitTarget, Exits, Offer};
use crate::identity::{normalize_whitespace, RoomId};
use crate::provenance::Provenance;

/// A room as observed in one or more transcripts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Canonical identity, computed from title and description.
    pub id: RoomId,
    /// Human-readable identifier assigned by the parse run.
    pub label: String,
    /// Trimmed, case-preserved title.
    pub title: String,
    /// Annotation that followed the header, if the capture tool wrote one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Whitespace-normalized description with transient content removed.
    pub description: String,
    pub exits: Exits,
    /// Structural keywords found in the description.
    pub features: BTreeSet<String>,
    /// Scenery nouns confirmed by a successful go/enter.
    pub static_items: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Whether an obvious-exits line was seen for this room.
    #[serde(default)]
    pub saw_declared_exits: bool,
    pub provenance: Provenance,
}

/// Result of folding one room record into another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomMerge {
    /// Whether exits, features, or items changed.
    pub changed: bool,
    pub conflicts: Vec<ExitConflict>,
}

impl Room {
    /// Create a room from raw title and description text.
    pub fn new(title: &str, description: &str, provenance: Provenance) -> Self {
        let title = title.trim().to_string();
        let description = normalize_whitespace(description);
        let id = RoomId::compute(&title, &description);
        Self {
            label: id.slug().to_string(),
            id,
            title,
            uid: None,
            description,
            exits: Exits::new(),
            features: BTreeSet::new(),
            static_items: BTreeSet::new(),
            region: None,
            saw_declared_exits: false,
            provenance,
        }
    }

    /// Whether both records were computed from the same normalized content.
    pub fn same_content(&self, other: &Room) -> bool {
        self.title == other.title && self.description == other.description
    }

    /// Offer an exit target, recording a conflict if one arises.
    pub fn offer_exit(&mut self, name: ExitName, target: ExitTarget) -> (Offer, Option<ExitConflict>) {
        let offer = self.exits.offer(name.clone(), target);
        let conflict = match &offer {
            Offer::Conflict { existing, offered } => Some(ExitConflict {
                room: self.id.clone(),
                exit: name,
                kept: existing.clone(),
                rejected: offered.clone(),
            }),
            _ => None,
        };
        (offer, conflict)
    }

    /// Fold another record of the same room into this one.
    ///
    /// Exits follow the strength order of [`Exits::offer`]; features and
    /// static items are unioned. Records whose content differs are refused.
    pub fn merge_from(&mut self, other: &Room) -> Result<RoomMerge, IdentityIntegrityError> {
        if !self.same_content(other) {
            return Err(IdentityIntegrityError {
                id: self.id.clone(),
                existing_title: self.title.clone(),
                existing_description: self.description.clone(),
                existing_source: self.provenance.to_string(),
                incoming_title: other.title.clone(),
                incoming_description: other.description.clone(),
                incoming_source: other.provenance.to_string(),
            });
        }

        let mut merge = RoomMerge::default();
        for (name, target) in &other.exits {
            let (offer, conflict) = self.offer_exit(name.clone(), target.clone());
            merge.changed |= offer.changed();
            merge.conflicts.extend(conflict);
        }
        for feature in &other.features {
            merge.changed |= self.features.insert(feature.clone());
        }
        for item in &other.static_items {
            merge.changed |= self.static_items.insert(item.clone());
        }
        self.saw_declared_exits |= other.saw_declared_exits;
        if other.label < self.label {
            self.label = other.label.clone();
        }
        self.region = least(self.region.take(), other.region.as_ref());
        self.uid = least(self.uid.take(), other.uid.as_ref());
        self.provenance.absorb(&other.provenance);
        Ok(merge)
    }
}

/// The smaller of two optional tags, preferring any value over none.
fn least(current: Option<String>, other: Option<&String>) -> Option<String> {
    match (current, other) {
        (Some(a), Some(b)) if b < &a => Some(b.clone()),
        (None, b) => b.cloned(),
        (a, _) => a,
    }
}
