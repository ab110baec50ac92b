//! Class use-case service.
//!
//! # Invariants
//! - Class labels are derived at creation and never updated.
//! - No update operation exists for classes.

use crate::model::class::{AcademicLevel, Class, NewClass};
use crate::model::id::{ClassId, ProgramId};
use crate::model::label::sort_by_label;
use crate::model::program::Program;
use crate::repo::collection_repo::{CollectionRepository, EqualityFilter};
use crate::repo::records::{delete_record, insert_record, list_records};
use crate::service::ServiceResult;

pub struct ClassService<R: CollectionRepository> {
    repo: R,
}

impl<R: CollectionRepository> ClassService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Classes whose `program_id` matches, ascending by label.
    pub fn list_classes(&self, program_id: &ProgramId) -> ServiceResult<Vec<Class>> {
        let filter = EqualityFilter::by_id("program_id", program_id);
        let mut classes = list_records::<Class>(&self.repo, Some(&filter))?;
        sort_by_label(&mut classes);
        Ok(classes)
    }

    /// Creates a class of `level` under `program`, labelled
    /// `"{program.label} - {level}"`.
    pub fn create_class(&self, program: &Program, level: AcademicLevel) -> ServiceResult<ClassId> {
        let draft = NewClass::for_program(program, level);
        let id = insert_record::<Class, _>(&self.repo, &draft)?;
        Ok(id)
    }

    /// Deletes a class. Its units and subjects are left in place.
    pub fn delete_class(&self, id: &ClassId) -> ServiceResult<()> {
        delete_record::<Class>(&self.repo, id)?;
        Ok(())
    }
}
