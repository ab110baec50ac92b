//! Domain model for the academic structure managed by the console.
//!
//! # Responsibility
//! - Define typed records for programs, classes, teaching units, subjects.
//! - Define closed sets (academic levels) as enums.
//! - Own label validation and the label ordering used by every listing.
//!
//! # Invariants
//! - Every record is identified by a store-assigned `DocumentId`.
//! - Labels persisted through the console are trimmed and non-empty.
//! - Records carry no cross-entity guarantees: a class may outlive its
//!   program, and a subject may reference a missing teaching unit.

pub mod class;
pub mod id;
pub mod label;
pub mod program;
pub mod subject;
pub mod teaching_unit;
