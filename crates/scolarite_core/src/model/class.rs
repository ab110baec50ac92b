//! Class (classe) records and the closed set of academic levels.
//!
//! # Invariants
//! - `Class::label` is derived once, at creation, from the program label
//!   and level. Renaming the program later does not touch it.
//! - `Class::program_label` is a denormalized copy taken at creation time.

use crate::model::id::{ClassId, ProgramId};
use crate::model::label::Labeled;
use crate::model::program::Program;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Academic level of a class cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AcademicLevel {
    #[default]
    #[serde(rename = "Licence 1")]
    Licence1,
    #[serde(rename = "Licence 2")]
    Licence2,
    #[serde(rename = "Licence 3")]
    Licence3,
    #[serde(rename = "Master 1")]
    Master1,
    #[serde(rename = "Master 2")]
    Master2,
}

impl AcademicLevel {
    /// Every level in selector order. The first entry is the form default.
    pub const ALL: [AcademicLevel; 5] = [
        Self::Licence1,
        Self::Licence2,
        Self::Licence3,
        Self::Master1,
        Self::Master2,
    ];

    /// Stored and displayed label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Licence1 => "Licence 1",
            Self::Licence2 => "Licence 2",
            Self::Licence3 => "Licence 3",
            Self::Master1 => "Master 1",
            Self::Master2 => "Master 2",
        }
    }

    /// Parses either the full label (`Licence 2`) or the short code (`L2`),
    /// ignoring case and inner whitespace.
    pub fn parse(value: &str) -> Option<Self> {
        let compact: String = value
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        match compact.as_str() {
            "licence1" | "l1" => Some(Self::Licence1),
            "licence2" | "l2" => Some(Self::Licence2),
            "licence3" | "l3" => Some(Self::Licence3),
            "master1" | "m1" => Some(Self::Master1),
            "master2" | "m2" => Some(Self::Master2),
            _ => None,
        }
    }
}

impl Display for AcademicLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One cohort at a specific level within a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: ClassId,
    pub program_id: ProgramId,
    pub program_label: String,
    pub level: AcademicLevel,
    pub label: String,
}

/// Insert payload for `classes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewClass {
    pub program_id: ProgramId,
    pub program_label: String,
    pub level: AcademicLevel,
    pub label: String,
}

impl NewClass {
    /// Builds the payload for a class of `level` under `program`.
    pub fn for_program(program: &Program, level: AcademicLevel) -> Self {
        Self {
            program_id: program.id.clone(),
            program_label: program.label.clone(),
            level,
            label: derive_class_label(&program.label, level),
        }
    }
}

/// `"{program_label} - {level}"`.
pub fn derive_class_label(program_label: &str, level: AcademicLevel) -> String {
    format!("{program_label} - {level}")
}

impl Labeled for Class {
    fn id(&self) -> &ClassId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.label
    }
}
