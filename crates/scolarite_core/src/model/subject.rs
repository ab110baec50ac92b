//! Subject (matière) records.
//!
//! # Invariants
//! - `teaching_unit_id` is not checked against existing units. A dangling
//!   reference is kept as-is and rendered as "no unit".

use crate::model::id::{ClassId, SubjectId, TeachingUnitId};
use crate::model::label::Labeled;
use serde::{Deserialize, Serialize};

/// A single taught topic within a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub class_id: ClassId,
    pub label: String,
    #[serde(default)]
    pub teaching_unit_id: Option<TeachingUnitId>,
}

/// Insert payload for `subjects`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSubject {
    pub class_id: ClassId,
    pub label: String,
    pub teaching_unit_id: Option<TeachingUnitId>,
}

/// Partial update payload for `subjects`.
///
/// `teaching_unit_id: None` is written as an explicit null so a cleared
/// unit replaces the previous reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectChanges {
    pub label: String,
    pub teaching_unit_id: Option<TeachingUnitId>,
}

impl Labeled for Subject {
    fn id(&self) -> &SubjectId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }
}
