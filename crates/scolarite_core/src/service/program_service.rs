//! Program (filière) use-case service.

use crate::model::id::ProgramId;
use crate::model::label::{normalize_label, sort_by_label};
use crate::model::program::{NewProgram, Program, ProgramChanges};
use crate::repo::collection_repo::CollectionRepository;
use crate::repo::records::{delete_record, insert_record, list_records, update_record};
use crate::service::ServiceResult;

/// Program service facade over a collection repository.
pub struct ProgramService<R: CollectionRepository> {
    repo: R,
}

impl<R: CollectionRepository> ProgramService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// All programs, ascending by label.
    pub fn list_programs(&self) -> ServiceResult<Vec<Program>> {
        let mut programs = list_records::<Program>(&self.repo, None)?;
        sort_by_label(&mut programs);
        Ok(programs)
    }

    /// Creates a program from a trimmed, non-empty label.
    pub fn create_program(&self, label: &str) -> ServiceResult<ProgramId> {
        let label = normalize_label(label)?;
        let id = insert_record::<Program, _>(&self.repo, &NewProgram { label })?;
        Ok(id)
    }

    /// Replaces a program label. Classes keep their stored copy.
    pub fn rename_program(&self, id: &ProgramId, label: &str) -> ServiceResult<()> {
        let label = normalize_label(label)?;
        update_record::<Program, _>(&self.repo, id, &ProgramChanges { label })?;
        Ok(())
    }

    /// Deletes a program. Its classes are left in place.
    pub fn delete_program(&self, id: &ProgramId) -> ServiceResult<()> {
        delete_record::<Program>(&self.repo, id)?;
        Ok(())
    }
}
