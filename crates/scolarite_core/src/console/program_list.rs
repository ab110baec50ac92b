//! Program (filière) list screen.
//!
//! # Responsibility
//! - List, create, rename and delete programs.
//! - Emit the navigation event that opens a program's classes.
//!
//! # Invariants
//! - The local list is only replaced by a successful fetch.
//! - Deletes are gated by `CONFIRM_DELETE_PROGRAM`.

use crate::console::feedback::FeedbackKind;
use crate::console::navigation::NavigationEvent;
use crate::console::prompt::{ConfirmPrompt, CONFIRM_DELETE_PROGRAM};
use crate::console::{settle, FormField, Operation, Outcome, ViewContext};
use crate::model::id::ProgramId;
use crate::model::program::Program;
use crate::repo::collection_repo::CollectionRepository;
use crate::service::program_service::ProgramService;
use log::info;

const MODULE: &str = "programs";

const LIST: Operation = Operation {
    event: "program_list",
    module: MODULE,
    failure: "Erreur de chargement des filières.",
};
const CREATE: Operation = Operation {
    event: "program_create",
    module: MODULE,
    failure: "Ajout impossible.",
};
const UPDATE: Operation = Operation {
    event: "program_update",
    module: MODULE,
    failure: "Mise à jour impossible.",
};
const DELETE: Operation = Operation {
    event: "program_delete",
    module: MODULE,
    failure: "Suppression impossible.",
};

pub const PROGRAM_CREATED: &str = "Filière ajoutée.";
pub const PROGRAM_UPDATED: &str = "Filière mise à jour.";
pub const PROGRAM_DELETED: &str = "Filière supprimée.";

/// Open form on the program screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramModal {
    Create { draft: String },
    Edit { id: ProgramId, draft: String },
}

#[derive(Debug, Clone)]
pub struct ProgramListView {
    programs: Vec<Program>,
    loading: bool,
    modal: Option<ProgramModal>,
}

impl Default for ProgramListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramListView {
    /// Unmounted view; `loading` stays set until the first `list` settles.
    pub fn new() -> Self {
        Self {
            programs: Vec::new(),
            loading: true,
            modal: None,
        }
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn modal(&self) -> Option<&ProgramModal> {
        self.modal.as_ref()
    }

    pub fn find(&self, id: &ProgramId) -> Option<&Program> {
        self.programs.iter().find(|program| &program.id == id)
    }

    pub fn open_create(&mut self) {
        self.modal = Some(ProgramModal::Create {
            draft: String::new(),
        });
    }

    /// Opens the edit form prefilled with the current label.
    pub fn open_edit(&mut self, id: &ProgramId) -> bool {
        let Some(program) = self.find(id) else {
            return false;
        };
        self.modal = Some(ProgramModal::Edit {
            id: program.id.clone(),
            draft: program.label.clone(),
        });
        true
    }

    /// Replaces the draft text of the open form, if any.
    pub fn set_draft(&mut self, text: &str) {
        match self.modal.as_mut() {
            Some(ProgramModal::Create { draft }) | Some(ProgramModal::Edit { draft, .. }) => {
                *draft = text.to_string();
            }
            None => {}
        }
    }

    /// Applies a field edit to the open form; only the label exists here.
    pub fn edit_form(&mut self, field: FormField) -> bool {
        match (self.modal.is_some(), field) {
            (true, FormField::Label(text)) => {
                self.set_draft(&text);
                true
            }
            _ => false,
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Submits the open form as create or update.
    pub fn submit_modal<R: CollectionRepository>(&mut self, ctx: &mut ViewContext<'_, R>) -> Outcome {
        match self.modal.clone() {
            Some(ProgramModal::Create { draft }) => self.create(ctx, &draft),
            Some(ProgramModal::Edit { id, draft }) => self.update(ctx, &id, &draft),
            None => Outcome::Cancelled,
        }
    }

    /// Fetches all programs and replaces the local list, sorted by label.
    pub fn list<R: CollectionRepository>(&mut self, ctx: &mut ViewContext<'_, R>) -> Outcome {
        self.loading = true;
        let result = ProgramService::new(ctx.repo).list_programs();
        self.loading = false;
        match settle(ctx.feedback, LIST, result) {
            Ok(programs) => {
                self.programs = programs;
                Outcome::Done
            }
            Err(outcome) => outcome,
        }
    }

    pub fn create<R: CollectionRepository>(
        &mut self,
        ctx: &mut ViewContext<'_, R>,
        label: &str,
    ) -> Outcome {
        let result = ProgramService::new(ctx.repo).create_program(label);
        match settle(ctx.feedback, CREATE, result) {
            Ok(id) => {
                info!("event=program_create module={MODULE} status=ok id={id}");
                ctx.feedback.show(PROGRAM_CREATED, FeedbackKind::Success);
                self.close_modal();
                self.list(ctx);
                Outcome::Done
            }
            Err(outcome) => outcome,
        }
    }

    pub fn update<R: CollectionRepository>(
        &mut self,
        ctx: &mut ViewContext<'_, R>,
        id: &ProgramId,
        label: &str,
    ) -> Outcome {
        let result = ProgramService::new(ctx.repo).rename_program(id, label);
        match settle(ctx.feedback, UPDATE, result) {
            Ok(()) => {
                info!("event=program_update module={MODULE} status=ok id={id}");
                ctx.feedback.show(PROGRAM_UPDATED, FeedbackKind::Success);
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
        id: &ProgramId,
    ) -> Outcome {
        if !prompt.confirm(CONFIRM_DELETE_PROGRAM) {
            return Outcome::Cancelled;
        }
        let result = ProgramService::new(ctx.repo).delete_program(id);
        match settle(ctx.feedback, DELETE, result) {
            Ok(()) => {
                info!("event=program_delete module={MODULE} status=ok id={id}");
                ctx.feedback.show(PROGRAM_DELETED, FeedbackKind::Success);
                self.list(ctx);
                Outcome::Done
            }
            Err(outcome) => outcome,
        }
    }

    /// Navigation event opening the classes of a listed program.
    pub fn open(&self, id: &ProgramId) -> Option<NavigationEvent> {
        self.find(id).cloned().map(NavigationEvent::OpenProgram)
    }
}
