//! Subject and teaching-unit use-case service.
//!
//! # Invariants
//! - `teaching_unit_id` is stored as given; it is not checked against the
//!   class's units.
//! - Teaching units can only be created and listed.

use crate::model::id::{ClassId, SubjectId, TeachingUnitId};
use crate::model::label::{normalize_label, normalize_optional, sort_by_label, ValidationError};
use crate::model::subject::{NewSubject, Subject, SubjectChanges};
use crate::model::teaching_unit::{NewTeachingUnit, TeachingUnit};
use crate::repo::collection_repo::{CollectionRepository, EqualityFilter};
use crate::repo::records::{delete_record, insert_record, list_records, update_record};
use crate::service::ServiceResult;

pub struct SubjectService<R: CollectionRepository> {
    repo: R,
}

impl<R: CollectionRepository> SubjectService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Teaching units of one class, ascending by label.
    pub fn list_teaching_units(&self, class_id: &ClassId) -> ServiceResult<Vec<TeachingUnit>> {
        let filter = EqualityFilter::by_id("class_id", class_id);
        let mut units = list_records::<TeachingUnit>(&self.repo, Some(&filter))?;
        sort_by_label(&mut units);
        Ok(units)
    }

    /// Subjects of one class, ascending by label.
    pub fn list_subjects(&self, class_id: &ClassId) -> ServiceResult<Vec<Subject>> {
        let filter = EqualityFilter::by_id("class_id", class_id);
        let mut subjects = list_records::<Subject>(&self.repo, Some(&filter))?;
        sort_by_label(&mut subjects);
        Ok(subjects)
    }

    /// Creates a subject; `teaching_unit_id` `None` stores null.
    pub fn create_subject(
        &self,
        class_id: &ClassId,
        label: &str,
        teaching_unit_id: Option<TeachingUnitId>,
    ) -> ServiceResult<SubjectId> {
        let draft = NewSubject {
            class_id: class_id.clone(),
            label: normalize_label(label)?,
            teaching_unit_id,
        };
        let id = insert_record::<Subject, _>(&self.repo, &draft)?;
        Ok(id)
    }

    /// Replaces label and unit of a subject; `None` clears the unit.
    pub fn update_subject(
        &self,
        id: &SubjectId,
        label: &str,
        teaching_unit_id: Option<TeachingUnitId>,
    ) -> ServiceResult<()> {
        let changes = SubjectChanges {
            label: normalize_label(label)?,
            teaching_unit_id,
        };
        update_record::<Subject, _>(&self.repo, id, &changes)?;
        Ok(())
    }

    pub fn delete_subject(&self, id: &SubjectId) -> ServiceResult<()> {
        delete_record::<Subject>(&self.repo, id)?;
        Ok(())
    }

    /// Creates a teaching unit; a blank code is stored as null.
    pub fn create_teaching_unit(
        &self,
        class_id: &ClassId,
        label: &str,
        code: Option<&str>,
    ) -> ServiceResult<TeachingUnitId> {
        let label =
            normalize_label(label).map_err(|_| ValidationError::EmptyTeachingUnitLabel)?;
        let draft = NewTeachingUnit {
            class_id: class_id.clone(),
            label,
            code: normalize_optional(code),
        };
        let id = insert_record::<TeachingUnit, _>(&self.repo, &draft)?;
        Ok(id)
    }
}
