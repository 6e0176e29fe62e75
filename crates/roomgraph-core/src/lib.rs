//! Core data model for transcript-derived world maps.
//!
//! A [`Room`] is identified by a [`RoomId`] derived from its normalized
//! title and description, so the same room observed in different
//! transcripts, on different machines, resolves to the same key. Exits map
//! an [`ExitName`] to an [`ExitTarget`], whose sentinels (`unknown`,
//! `hidden`) are strictly weaker than a resolved room.

pub mod diagnostic;
pub mod direction;
pub mod error;
pub mod exit;
pub mod identity;
pub mod provenance;
pub mod region;
pub mod room;

pub use diagnostic::{
    Diagnostic, ExitConflict, IdentityIntegrityError, ParseWarning, SelfLoop, Severity,
};
pub use direction::Direction;
pub use error::{CoreError, Result};
pub use exit::{ExitName, ExitTarget, Exits, Offer};
pub use identity::{normalize_whitespace, RoomId};
pub use provenance::{LineSpan, Provenance};
pub use region::{location_of, RegionLookup, RegionTable, UNCLASSIFIED};
pub use room::{Room, RoomMerge};
