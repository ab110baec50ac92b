//! Subjects tab of the class detail screen.
//!
//! # Responsibility
//! - Load a class's teaching units and subjects together.
//! - Create/edit/delete subjects and create teaching units.
//! - Filter subjects by teaching unit and resolve unit labels for display.
//!
//! # Invariants
//! - Units and subjects are replaced together or not at all.
//! - The filtered view is derived on demand; it is never stored.
//! - A subject whose unit id is null or unknown displays as `NO_UNIT`.

use crate::console::feedback::FeedbackKind;
use crate::console::prompt::{ConfirmPrompt, CONFIRM_DELETE_SUBJECT};
use crate::console::{settle, FormField, Operation, Outcome, ViewContext};
use crate::model::class::Class;
use crate::model::id::{SubjectId, TeachingUnitId};
use crate::model::subject::Subject;
use crate::model::teaching_unit::TeachingUnit;
use crate::repo::collection_repo::CollectionRepository;
use crate::service::subject_service::SubjectService;
use crate::service::ServiceResult;
use log::info;

const MODULE: &str = "subjects";

const LOAD: Operation = Operation {
    event: "subjects_load",
    module: MODULE,
    failure: "Erreur de chargement.",
};
const CREATE_SUBJECT: Operation = Operation {
    event: "subject_create",
    module: MODULE,
    failure: "Ajout impossible.",
};
const UPDATE_SUBJECT: Operation = Operation {
    event: "subject_update",
    module: MODULE,
    failure: "Mise à jour impossible.",
};
const DELETE_SUBJECT: Operation = Operation {
    event: "subject_delete",
    module: MODULE,
    failure: "Suppression impossible.",
};
const CREATE_UNIT: Operation = Operation {
    event: "teaching_unit_create",
    module: MODULE,
    failure: "Création UE impossible.",
};

pub const SUBJECT_CREATED: &str = "Matière ajoutée.";
pub const SUBJECT_UPDATED: &str = "Matière mise à jour.";
pub const SUBJECT_DELETED: &str = "Matière supprimée.";
pub const UNIT_CREATED: &str = "UE créée.";

/// Display text for a subject without a resolvable unit.
pub const NO_UNIT: &str = "—";

/// Subject form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectDraft {
    pub label: String,
    pub teaching_unit_id: Option<TeachingUnitId>,
}

/// Teaching-unit form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitDraft {
    pub label: String,
    pub code: String,
}

/// Open form on the subjects tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectModal {
    CreateSubject { draft: SubjectDraft },
    EditSubject { id: SubjectId, draft: SubjectDraft },
    CreateUnit { draft: UnitDraft },
}

/// Subjects whose unit equals `unit_id`; every subject when `None`.
pub fn filter_by_unit<'s>(
    subjects: &'s [Subject],
    unit_id: Option<&TeachingUnitId>,
) -> Vec<&'s Subject> {
    subjects
        .iter()
        .filter(|subject| match unit_id {
            Some(unit_id) => subject.teaching_unit_id.as_ref() == Some(unit_id),
            None => true,
        })
        .collect()
}

/// Looks up a subject's unit by id among the loaded units.
pub fn resolve_unit<'u>(
    units: &'u [TeachingUnit],
    unit_id: Option<&TeachingUnitId>,
) -> Option<&'u TeachingUnit> {
    let unit_id = unit_id?;
    units.iter().find(|unit| &unit.id == unit_id)
}

#[derive(Debug, Clone)]
pub struct SubjectsPanel {
    class: Class,
    units: Vec<TeachingUnit>,
    subjects: Vec<Subject>,
    unit_filter: Option<TeachingUnitId>,
    loading: bool,
    modal: Option<SubjectModal>,
}

impl SubjectsPanel {
    pub fn new(class: Class) -> Self {
        Self {
            class,
            units: Vec::new(),
            subjects: Vec::new(),
            unit_filter: None,
            loading: true,
            modal: None,
        }
    }

    pub fn class(&self) -> &Class {
        &self.class
    }

    pub fn teaching_units(&self) -> &[TeachingUnit] {
        &self.units
    }

    /// Unfiltered subjects, sorted by label.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn unit_filter(&self) -> Option<&TeachingUnitId> {
        self.unit_filter.as_ref()
    }

    /// Selects the unit filter; `None` (the empty selector) shows all.
    pub fn set_unit_filter(&mut self, unit_id: Option<TeachingUnitId>) {
        self.unit_filter = unit_id;
    }

    /// Subjects matching the current filter.
    pub fn visible_subjects(&self) -> Vec<&Subject> {
        filter_by_unit(&self.subjects, self.unit_filter.as_ref())
    }

    /// Unit label shown next to `subject`, or `NO_UNIT`.
    pub fn unit_display(&self, subject: &Subject) -> String {
        resolve_unit(&self.units, subject.teaching_unit_id.as_ref())
            .map(|unit| unit.label.clone())
            .unwrap_or_else(|| NO_UNIT.to_string())
    }

    pub fn modal(&self) -> Option<&SubjectModal> {
        self.modal.as_ref()
    }

    pub fn modal_mut(&mut self) -> Option<&mut SubjectModal> {
        self.modal.as_mut()
    }

    pub fn open_create_subject(&mut self) {
        self.modal = Some(SubjectModal::CreateSubject {
            draft: SubjectDraft::default(),
        });
    }

    pub fn open_edit_subject(&mut self, id: &SubjectId) -> bool {
        let Some(subject) = self.subjects.iter().find(|subject| &subject.id == id) else {
            return false;
        };
        self.modal = Some(SubjectModal::EditSubject {
            id: subject.id.clone(),
            draft: SubjectDraft {
                label: subject.label.clone(),
                teaching_unit_id: subject.teaching_unit_id.clone(),
            },
        });
        true
    }

    pub fn open_create_unit(&mut self) {
        self.modal = Some(SubjectModal::CreateUnit {
            draft: UnitDraft::default(),
        });
    }

    /// Applies a field edit to the open form. Returns `false` when no form
    /// is open or the form has no such field.
    pub fn edit_form(&mut self, field: FormField) -> bool {
        match (self.modal.as_mut(), field) {
            (
                Some(SubjectModal::CreateSubject { draft })
                | Some(SubjectModal::EditSubject { draft, .. }),
                FormField::Label(text),
            ) => draft.label = text,
            (
                Some(SubjectModal::CreateSubject { draft })
                | Some(SubjectModal::EditSubject { draft, .. }),
                FormField::Unit(unit_id),
            ) => draft.teaching_unit_id = unit_id,
            (Some(SubjectModal::CreateUnit { draft }), FormField::Label(text)) => draft.label = text,
            (Some(SubjectModal::CreateUnit { draft }), FormField::Code(code)) => draft.code = code,
            _ => return false,
        }
        true
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub fn submit_modal<R: CollectionRepository>(&mut self, ctx: &mut ViewContext<'_, R>) -> Outcome {
        match self.modal.clone() {
            Some(SubjectModal::CreateSubject { draft }) => {
                self.create_subject(ctx, &draft.label, draft.teaching_unit_id)
            }
            Some(SubjectModal::EditSubject { id, draft }) => {
                self.update_subject(ctx, &id, &draft.label, draft.teaching_unit_id)
            }
            Some(SubjectModal::CreateUnit { draft }) => {
                self.create_teaching_unit(ctx, &draft.label, Some(draft.code.as_str()))
            }
            None => Outcome::Cancelled,
        }
    }

    /// Loads units and subjects of the class and replaces both lists.
    pub fn load_all<R: CollectionRepository>(&mut self, ctx: &mut ViewContext<'_, R>) -> Outcome {
        self.loading = true;
        let service = SubjectService::new(ctx.repo);
        let units = service.list_teaching_units(&self.class.id);
        let subjects = service.list_subjects(&self.class.id);
        self.loading = false;

        let joined: ServiceResult<_> = units.and_then(|units| Ok((units, subjects?)));
        match settle(ctx.feedback, LOAD, joined) {
            Ok((units, subjects)) => {
                self.units = units;
                self.subjects = subjects;
                Outcome::Done
            }
            Err(outcome) => outcome,
        }
    }

    pub fn create_subject<R: CollectionRepository>(
        &mut self,
        ctx: &mut ViewContext<'_, R>,
        label: &str,
        teaching_unit_id: Option<TeachingUnitId>,
    ) -> Outcome {
        let result =
            SubjectService::new(ctx.repo).create_subject(&self.class.id, label, teaching_unit_id);
        match settle(ctx.feedback, CREATE_SUBJECT, result) {
            Ok(id) => {
                info!(
                    "event=subject_create module={MODULE} status=ok id={id} class_id={}",
                    self.class.id
                );
                self.after_mutation(ctx, SUBJECT_CREATED)
            }
            Err(outcome) => outcome,
        }
    }

    pub fn update_subject<R: CollectionRepository>(
        &mut self,
        ctx: &mut ViewContext<'_, R>,
        id: &SubjectId,
        label: &str,
        teaching_unit_id: Option<TeachingUnitId>,
    ) -> Outcome {
        let result = SubjectService::new(ctx.repo).update_subject(id, label, teaching_unit_id);
        match settle(ctx.feedback, UPDATE_SUBJECT, result) {
            Ok(()) => {
                info!("event=subject_update module={MODULE} status=ok id={id}");
                self.after_mutation(ctx, SUBJECT_UPDATED)
            }
            Err(outcome) => outcome,
        }
    }

    pub fn delete_subject<R: CollectionRepository>(
        &mut self,
        ctx: &mut ViewContext<'_, R>,
        prompt: &mut dyn ConfirmPrompt,
        id: &SubjectId,
    ) -> Outcome {
        if !prompt.confirm(CONFIRM_DELETE_SUBJECT) {
            return Outcome::Cancelled;
        }
        let result = SubjectService::new(ctx.repo).delete_subject(id);
        match settle(ctx.feedback, DELETE_SUBJECT, result) {
            Ok(()) => {
                info!("event=subject_delete module={MODULE} status=ok id={id}");
                ctx.feedback.show(SUBJECT_DELETED, FeedbackKind::Success);
                self.load_all(ctx);
                Outcome::Done
            }
            Err(outcome) => outcome,
        }
    }

    pub fn create_teaching_unit<R: CollectionRepository>(
        &mut self,
        ctx: &mut ViewContext<'_, R>,
        label: &str,
        code: Option<&str>,
    ) -> Outcome {
        let result =
            SubjectService::new(ctx.repo).create_teaching_unit(&self.class.id, label, code);
        match settle(ctx.feedback, CREATE_UNIT, result) {
            Ok(id) => {
                info!(
                    "event=teaching_unit_create module={MODULE} status=ok id={id} class_id={}",
                    self.class.id
                );
                self.after_mutation(ctx, UNIT_CREATED)
            }
            Err(outcome) => outcome,
        }
    }

    fn after_mutation<R: CollectionRepository>(
        &mut self,
        ctx: &mut ViewContext<'_, R>,
        message: &str,
    ) -> Outcome {
        ctx.feedback.show(message, FeedbackKind::Success);
        self.close_modal();
        self.load_all(ctx);
        Outcome::Done
    }
}

#[cfg(test)]
mod tests {
    use super::{filter_by_unit, resolve_unit};
    use crate::model::id::TeachingUnitId;
    use crate::model::subject::Subject;
    use crate::model::teaching_unit::TeachingUnit;

    fn subject(id: &str, label: &str, unit: Option<&str>) -> Subject {
        Subject {
            id: id.into(),
            class_id: "c-1".into(),
            label: label.to_string(),
            teaching_unit_id: unit.map(TeachingUnitId::from),
        }
    }

    #[test]
    fn filter_keeps_only_matching_unit_and_is_idempotent() {
        let subjects = vec![
            subject("s-1", "Algo", Some("u-1")),
            subject("s-2", "Anglais", None),
            subject("s-3", "Réseaux", Some("u-2")),
        ];
        let unit = TeachingUnitId::from("u-1");

        let first: Vec<_> = filter_by_unit(&subjects, Some(&unit))
            .into_iter()
            .map(|s| s.label.as_str())
            .collect();
        let second: Vec<_> = filter_by_unit(&subjects, Some(&unit))
            .into_iter()
            .map(|s| s.label.as_str())
            .collect();
        assert_eq!(first, vec!["Algo"]);
        assert_eq!(first, second);

        assert_eq!(filter_by_unit(&subjects, None).len(), subjects.len());
    }

    #[test]
    fn dangling_unit_reference_does_not_resolve() {
        let units = vec![TeachingUnit {
            id: "u-1".into(),
            class_id: "c-1".into(),
            label: "UE1".to_string(),
            code: Some("U101".to_string()),
        }];
        let missing = TeachingUnitId::from("u-404");
        assert!(resolve_unit(&units, Some(&missing)).is_none());
        assert!(resolve_unit(&units, None).is_none());
        let found = TeachingUnitId::from("u-1");
        assert_eq!(resolve_unit(&units, Some(&found)).unwrap().label, "UE1");
    }
}
