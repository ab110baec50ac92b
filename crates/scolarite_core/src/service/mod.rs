//! Use-case services for the academic structure.
//!
//! # Responsibility
//! - Validate and normalize operator input before any store call.
//! - Orchestrate typed repository calls and return label-sorted listings.
//! - Stay storage-agnostic and UI-agnostic: no feedback, no view state.
//!
//! # Invariants
//! - Validation failures never reach the repository.
//! - Every listing is sorted with `model::label::sort_by_label`.

use crate::model::label::ValidationError;
use crate::repo::collection_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod class_service;
pub mod program_service;
pub mod subject_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from structure services.
#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected before any store interaction.
    Validation(ValidationError),
    /// Store call failed.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}
