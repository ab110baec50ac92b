//! Console view models: navigation, per-view state, feedback, prompts.
//!
//! # Responsibility
//! - Hold each screen's local state (lists, loading flag, modal descriptor).
//! - Run the fetch/mutate contracts: validate, call the store, report
//!   through the feedback channel, re-fetch the whole scope on success.
//! - Drive drill-down navigation through an explicit state machine.
//!
//! # Invariants
//! - A failed operation leaves the view's lists untouched.
//! - Every successful mutation is followed by a full re-fetch.
//! - Errors never escape a view; callers observe an `Outcome`.

use crate::model::class::AcademicLevel;
use crate::model::id::TeachingUnitId;
use crate::model::label::ValidationError;
use crate::repo::collection_repo::CollectionRepository;
use crate::service::{ServiceError, ServiceResult};
use log::{error, warn};

pub mod class_detail;
pub mod class_list;
pub mod feedback;
pub mod host;
pub mod navigation;
pub mod program_list;
pub mod prompt;
pub mod snapshot;
pub mod subjects_panel;

use feedback::{FeedbackChannel, FeedbackKind};

/// Collaborators a view needs for one operation.
pub struct ViewContext<'a, R: CollectionRepository> {
    pub repo: &'a R,
    pub feedback: &'a mut dyn FeedbackChannel,
}

impl<'a, R: CollectionRepository> ViewContext<'a, R> {
    pub fn new(repo: &'a R, feedback: &'a mut dyn FeedbackChannel) -> Self {
        Self { repo, feedback }
    }
}

/// What a view operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Store call succeeded (a follow-up re-fetch may still have failed).
    Done,
    /// Input rejected before any store call.
    Rejected(ValidationError),
    /// Store call failed; local state unchanged.
    Failed,
    /// Operator declined the confirmation prompt.
    Cancelled,
}

/// One field edit on the open form.
///
/// A field the open form does not have is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Label(String),
    Code(String),
    Level(AcademicLevel),
    /// `None` clears the unit selector.
    Unit(Option<TeachingUnitId>),
}

/// Log coordinates and operator message for one view operation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Operation {
    pub event: &'static str,
    pub module: &'static str,
    pub failure: &'static str,
}

/// Turns a service result into the value or a reported `Outcome`.
pub(crate) fn settle<T>(
    feedback: &mut dyn FeedbackChannel,
    operation: Operation,
    result: ServiceResult<T>,
) -> Result<T, Outcome> {
    match result {
        Ok(value) => Ok(value),
        Err(ServiceError::Validation(err)) => {
            warn!(
                "event={} module={} status=rejected reason={}",
                operation.event, operation.module, err
            );
            feedback.show(err.user_message(), FeedbackKind::Error);
            Err(Outcome::Rejected(err))
        }
        Err(ServiceError::Repo(err)) => {
            error!(
                "event={} module={} status=error error={}",
                operation.event, operation.module, err
            );
            feedback.show(operation.failure, FeedbackKind::Error);
            Err(Outcome::Failed)
        }
    }
}
