//! Teaching unit (UE) records.

use crate::model::id::{ClassId, TeachingUnitId};
use crate::model::label::Labeled;
use serde::{Deserialize, Serialize};

/// A grouping of subjects within a class, optionally coded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeachingUnit {
    pub id: TeachingUnitId,
    pub class_id: ClassId,
    pub label: String,
    #[serde(default)]
    pub code: Option<String>,
}

impl TeachingUnit {
    /// Selector text: `"{code} - {label}"` when coded, else the label.
    pub fn display_name(&self) -> String {
        match self.code.as_deref() {
            Some(code) => format!("{code} - {}", self.label),
            None => self.label.clone(),
        }
    }
}

/// Insert payload for `teaching_units`. No update payload exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTeachingUnit {
    pub class_id: ClassId,
    pub label: String,
    pub code: Option<String>,
}

impl Labeled for TeachingUnit {
    fn id(&self) -> &TeachingUnitId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }
}
