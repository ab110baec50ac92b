//! Repository layer: the collection store and typed record access.
//!
//! # Responsibility
//! - Define the document-store contract consumed by services and views.
//! - Isolate SQLite/JSON details from use-case orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`,
//!   `InvalidDocument`) in addition to DB transport errors.

pub mod collection_repo;
pub mod records;
