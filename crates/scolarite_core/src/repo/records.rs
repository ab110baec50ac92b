//! Typed record mapping over the document store.
//!
//! # Responsibility
//! - Bind each record type to its collection.
//! - Encode insert/update payloads to document fields and decode stored
//!   documents back into records.
//!
//! # Invariants
//! - A document that does not decode fails the whole listing with
//!   `RepoError::InvalidDocument`; nothing is silently dropped.

use crate::model::class::Class;
use crate::model::id::DocumentId;
use crate::model::program::Program;
use crate::model::subject::Subject;
use crate::model::teaching_unit::TeachingUnit;
use crate::repo::collection_repo::{
    Collection, CollectionRepository, Document, EqualityFilter, Fields, RepoError, RepoResult,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// A typed view over one collection.
pub trait Record: DeserializeOwned {
    const COLLECTION: Collection;
}

impl Record for Program {
    const COLLECTION: Collection = Collection::Programs;
}

impl Record for Class {
    const COLLECTION: Collection = Collection::Classes;
}

impl Record for TeachingUnit {
    const COLLECTION: Collection = Collection::TeachingUnits;
}

impl Record for Subject {
    const COLLECTION: Collection = Collection::Subjects;
}

/// Serializes a payload struct into document fields.
pub fn to_fields<T: Serialize>(collection: Collection, payload: &T) -> RepoResult<Fields> {
    match serde_json::to_value(payload) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(RepoError::InvalidDocument {
            collection,
            message: "payload must serialize to an object".to_string(),
        }),
        Err(err) => Err(RepoError::InvalidDocument {
            collection,
            message: err.to_string(),
        }),
    }
}

/// Decodes one stored document into `T`, re-attaching its id.
pub fn from_document<T: Record>(document: Document) -> RepoResult<T> {
    let Document { id, mut fields } = document;
    fields.insert("id".to_string(), Value::String(id.to_string()));
    serde_json::from_value(Value::Object(fields)).map_err(|err| RepoError::InvalidDocument {
        collection: T::COLLECTION,
        message: format!("document {id}: {err}"),
    })
}

/// Inserts `payload` into `T`'s collection.
pub fn insert_record<T: Record, P: Serialize>(
    repo: &impl CollectionRepository,
    payload: &P,
) -> RepoResult<DocumentId> {
    repo.insert(T::COLLECTION, to_fields(T::COLLECTION, payload)?)
}

/// Lists and decodes `T` records, optionally filtered. Unordered.
pub fn list_records<T: Record>(
    repo: &impl CollectionRepository,
    filter: Option<&EqualityFilter>,
) -> RepoResult<Vec<T>> {
    repo.list(T::COLLECTION, filter)?
        .into_iter()
        .map(from_document::<T>)
        .collect()
}

/// Applies a partial update payload to one `T` record.
pub fn update_record<T: Record, P: Serialize>(
    repo: &impl CollectionRepository,
    id: &DocumentId,
    changes: &P,
) -> RepoResult<()> {
    repo.update(T::COLLECTION, id, to_fields(T::COLLECTION, changes)?)
}

/// Deletes one `T` record.
pub fn delete_record<T: Record>(repo: &impl CollectionRepository, id: &DocumentId) -> RepoResult<()> {
    repo.delete(T::COLLECTION, id)
}
