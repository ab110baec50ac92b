//! Store and prompt doubles shared by integration tests.
#![allow(dead_code)]

use scolarite_core::console::prompt::ConfirmPrompt;
use scolarite_core::db::open_db_in_memory;
use scolarite_core::model::id::DocumentId;
use scolarite_core::repo::collection_repo::{
    Collection, CollectionRepository, Document, EqualityFilter, Fields, RepoError, RepoResult,
    SqliteCollectionRepository,
};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

pub fn memory_repo() -> SqliteCollectionRepository {
    SqliteCollectionRepository::try_new(open_db_in_memory().unwrap()).unwrap()
}

/// Which store verb a `FlakyRepo` should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Insert,
    List,
    Update,
    Delete,
}

/// SQLite store that records calls and fails chosen verbs on demand.
pub struct FlakyRepo {
    inner: SqliteCollectionRepository,
    failing: RefCell<Vec<(Verb, Option<Collection>)>>,
    calls: RefCell<Vec<(Verb, Collection)>>,
    inserts: Cell<usize>,
}

impl FlakyRepo {
    pub fn new() -> Self {
        Self {
            inner: memory_repo(),
            failing: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
            inserts: Cell::new(0),
        }
    }

    /// Fails `verb` on every collection.
    pub fn fail(&self, verb: Verb) {
        self.failing.borrow_mut().push((verb, None));
    }

    /// Fails `verb` on one collection only.
    pub fn fail_on(&self, verb: Verb, collection: Collection) {
        self.failing.borrow_mut().push((verb, Some(collection)));
    }

    pub fn heal(&self) {
        self.failing.borrow_mut().clear();
    }

    pub fn inner(&self) -> &SqliteCollectionRepository {
        &self.inner
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.get()
    }

    pub fn calls(&self) -> Vec<(Verb, Collection)> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn check(&self, verb: Verb, collection: Collection) -> RepoResult<()> {
        self.calls.borrow_mut().push((verb, collection));
        let failing = self
            .failing
            .borrow()
            .iter()
            .any(|(v, c)| *v == verb && c.map_or(true, |c| c == collection));
        if failing {
            return Err(RepoError::InvalidDocument {
                collection,
                message: format!("injected {verb:?} failure"),
            });
        }
        Ok(())
    }
}

impl CollectionRepository for FlakyRepo {
    fn insert(&self, collection: Collection, fields: Fields) -> RepoResult<DocumentId> {
        self.check(Verb::Insert, collection)?;
        self.inserts.set(self.inserts.get() + 1);
        self.inner.insert(collection, fields)
    }

    fn list(
        &self,
        collection: Collection,
        filter: Option<&EqualityFilter>,
    ) -> RepoResult<Vec<Document>> {
        self.check(Verb::List, collection)?;
        self.inner.list(collection, filter)
    }

    fn update(&self, collection: Collection, id: &DocumentId, fields: Fields) -> RepoResult<()> {
        self.check(Verb::Update, collection)?;
        self.inner.update(collection, id, fields)
    }

    fn delete(&self, collection: Collection, id: &DocumentId) -> RepoResult<()> {
        self.check(Verb::Delete, collection)?;
        self.inner.delete(collection, id)
    }
}

/// Prompt replaying queued answers and recording what was asked.
///
/// Answers `false` once the queue is exhausted.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl ConfirmPrompt for ScriptedPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}
