//! Class list screen, scoped to one program.
//!
//! # Invariants
//! - Listing is filtered by `program_id` and re-run whenever the scoping
//!   program id changes.
//! - Class labels come from the program label at creation time.

use crate::console::feedback::FeedbackKind;
use crate::console::navigation::NavigationEvent;
use crate::console::prompt::{ConfirmPrompt, CONFIRM_DELETE_CLASS};
use crate::console::{settle, FormField, Operation, Outcome, ViewContext};
use crate::model::class::{AcademicLevel, Class};
use crate::model::id::ClassId;
use crate::model::program::Program;
use crate::repo::collection_repo::CollectionRepository;
use crate::service::class_service::ClassService;
use log::info;

const MODULE: &str = "classes";

const LIST: Operation = Operation {
    event: "class_list",
    module: MODULE,
    failure: "Erreur de chargement des classes.",
};
const CREATE: Operation = Operation {
    event: "class_create",
    module: MODULE,
    failure: "Ajout impossible.",
};
const DELETE: Operation = Operation {
    event: "class_delete",
    module: MODULE,
    failure: "Suppression impossible.",
};

pub const CLASS_CREATED: &str = "Classe ajoutée.";
pub const CLASS_DELETED: &str = "Classe supprimée.";

/// Open form on the class screen. Classes have no edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassModal {
    Create { level: AcademicLevel },
}

#[derive(Debug, Clone)]
pub struct ClassListView {
    program: Program,
    classes: Vec<Class>,
    loading: bool,
    modal: Option<ClassModal>,
}

impl ClassListView {
    pub fn new(program: Program) -> Self {
        Self {
            program,
            classes: Vec::new(),
            loading: true,
            modal: None,
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn modal(&self) -> Option<ClassModal> {
        self.modal
    }

    pub fn find(&self, id: &ClassId) -> Option<&Class> {
        self.classes.iter().find(|class| &class.id == id)
    }

    /// Opens the creation form with the first level preselected.
    pub fn open_create(&mut self) {
        self.modal = Some(ClassModal::Create {
            level: AcademicLevel::default(),
        });
    }

    pub fn select_level(&mut self, level: AcademicLevel) {
        if let Some(ClassModal::Create { level: selected }) = self.modal.as_mut() {
            *selected = level;
        }
    }

    pub fn edit_form(&mut self, field: FormField) -> bool {
        match (self.modal.is_some(), field) {
            (true, FormField::Level(level)) => {
                self.select_level(level);
                true
            }
            _ => false,
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub fn submit_modal<R: CollectionRepository>(&mut self, ctx: &mut ViewContext<'_, R>) -> Outcome {
        match self.modal {
            Some(ClassModal::Create { level }) => self.create(ctx, level),
            None => Outcome::Cancelled,
        }
    }

    /// Rescopes the view; re-fetches only when the program id changed.
    pub fn set_program<R: CollectionRepository>(
        &mut self,
        ctx: &mut ViewContext<'_, R>,
        program: Program,
    ) -> Outcome {
        let changed = program.id != self.program.id;
        self.program = program;
        if changed {
            self.list(ctx)
        } else {
            Outcome::Done
        }
    }

    pub fn list<R: CollectionRepository>(&mut self, ctx: &mut ViewContext<'_, R>) -> Outcome {
        self.loading = true;
        let result = ClassService::new(ctx.repo).list_classes(&self.program.id);
        self.loading = false;
        match settle(ctx.feedback, LIST, result) {
            Ok(classes) => {
                self.classes = classes;
                Outcome::Done
            }
            Err(outcome) => outcome,
        }
    }

    pub fn create<R: CollectionRepository>(
        &mut self,
        ctx: &mut ViewContext<'_, R>,
        level: AcademicLevel,
    ) -> Outcome {
        let result = ClassService::new(ctx.repo).create_class(&self.program, level);
        match settle(ctx.feedback, CREATE, result) {
            Ok(id) => {
                info!(
                    "event=class_create module={MODULE} status=ok id={id} program_id={} level={}",
                    self.program.id,
                    level.label()
                );
                ctx.feedback.show(CLASS_CREATED, FeedbackKind::Success);
                self.close_modal();
                self.list(ctx);
                Outcome::Done
            }
            Err(outcome) => outcome,
        }
    }

    pub fn delete<R: CollectionRepository>(
        &mut self,
        ctx: &mut ViewContext<'_, R>,
        prompt: &mut dyn ConfirmPrompt,
        id: &ClassId,
    ) -> Outcome {
        if !prompt.confirm(CONFIRM_DELETE_CLASS) {
            return Outcome::Cancelled;
        }
        let result = ClassService::new(ctx.repo).delete_class(id);
        match settle(ctx.feedback, DELETE, result) {
            Ok(()) => {
                info!("event=class_delete module={MODULE} status=ok id={id}");
                ctx.feedback.show(CLASS_DELETED, FeedbackKind::Success);
                self.list(ctx);
                Outcome::Done
            }
            Err(outcome) => outcome,
        }
    }

    pub fn open(&self, id: &ClassId) -> Option<NavigationEvent> {
        self.find(id).cloned().map(NavigationEvent::OpenClass)
    }
}
