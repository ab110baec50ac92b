//! Program (filière) records.

use crate::model::id::ProgramId;
use crate::model::label::Labeled;
use serde::{Deserialize, Serialize};

/// An academic track containing classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub id: ProgramId,
    /// Non-empty, trimmed display name.
    pub label: String,
}

/// Insert payload for `programs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProgram {
    pub label: String,
}

/// Partial update payload for `programs`. Only the label is editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramChanges {
    pub label: String,
}

impl Labeled for Program {
    fn id(&self) -> &ProgramId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }
}
