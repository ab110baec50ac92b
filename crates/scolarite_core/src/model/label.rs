//! Label validation and ordering.
//!
//! # Responsibility
//! - Trim and validate operator-entered labels before any store write.
//! - Provide the single ordering used by every listing view.
//!
//! # Invariants
//! - A label that trims to empty is never persisted.
//! - Ordering is total: folded key, then raw label, then id.

use crate::model::id::DocumentId;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Form validation failures caught before any store call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Program, class or subject label is blank after trim.
    EmptyLabel,
    /// Teaching unit label is blank after trim.
    EmptyTeachingUnitLabel,
}

impl ValidationError {
    /// Operator-facing message shown through the feedback channel.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::EmptyLabel => "Libellé requis.",
            Self::EmptyTeachingUnitLabel => "Libellé UE requis.",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyLabel => write!(f, "label must not be blank"),
            Self::EmptyTeachingUnitLabel => write!(f, "teaching unit label must not be blank"),
        }
    }
}

impl Error for ValidationError {}

/// Trims `value` and rejects it when nothing remains.
pub fn normalize_label(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyLabel);
    }
    Ok(trimmed.to_string())
}

/// Trims an optional free-text field; blank input becomes `None`.
pub fn normalize_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}

/// Accent- and case-insensitive comparison key.
///
/// "Économie" and "economie" share the key `economie`, so French labels
/// sort the way an operator reads them instead of by code point.
pub fn collation_key(label: &str) -> String {
    label
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Locale-aware ascending comparison of two labels.
pub fn compare_labels(left: &str, right: &str) -> Ordering {
    collation_key(left)
        .cmp(&collation_key(right))
        .then_with(|| left.cmp(right))
}

/// Records that listing views order by label.
pub trait Labeled {
    fn id(&self) -> &DocumentId;
    fn label(&self) -> &str;
}

/// Sorts records ascending by label; id breaks exact ties.
pub fn sort_by_label<T: Labeled>(items: &mut [T]) {
    items.sort_by(|left, right| {
        compare_labels(left.label(), right.label()).then_with(|| left.id().cmp(right.id()))
    });
}
