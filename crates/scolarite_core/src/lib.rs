//! Core of the director-of-studies console.
//! Holds the academic structure model, its document store and the
//! console view models that front ends render.

pub mod config;
pub mod console;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, ConsoleConfig};
pub use console::feedback::{FeedbackKind, FeedbackPanel};
pub use console::host::{Console, ConsoleError, ConsoleSection, FormRequest};
pub use console::navigation::{ClassTab, NavigationEvent, ViewState};
pub use console::snapshot::ConsoleSnapshot;
pub use console::{FormField, Outcome};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::class::{AcademicLevel, Class};
pub use model::id::{ClassId, DocumentId, ProgramId, SubjectId, TeachingUnitId};
pub use model::label::ValidationError;
pub use model::program::Program;
pub use model::subject::Subject;
pub use model::teaching_unit::TeachingUnit;
pub use repo::collection_repo::{
    Collection, CollectionRepository, RepoError, RepoResult, SqliteCollectionRepository,
};

/// Health check for front-end wiring.
pub fn ping() -> &'static str {
    "pong"
}

pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_answers() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_set() {
        assert!(!core_version().is_empty());
    }
}
