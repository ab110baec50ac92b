//! Class detail screen: header, tab selector, active tab body.
//!
//! Owns no data of its own. The subjects panel is mounted only while the
//! subjects tab is active; leaving the tab drops it and coming back mounts
//! a fresh one.

use crate::console::navigation::ClassTab;
use crate::console::subjects_panel::SubjectsPanel;
use crate::console::{Outcome, ViewContext};
use crate::model::class::{AcademicLevel, Class};
use crate::model::program::Program;
use crate::repo::collection_repo::CollectionRepository;

pub const COMING_SOON: &str = "Fonctionnalité à venir.";

/// Header block above the tabs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassHeader {
    pub class_label: String,
    pub program_label: String,
    pub level: AcademicLevel,
}

/// Body shown for tabs without an implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    pub title: &'static str,
    pub notice: &'static str,
}

#[derive(Debug, Clone)]
pub struct ClassDetailView {
    program: Program,
    class: Class,
    tab: ClassTab,
    subjects: Option<SubjectsPanel>,
}

impl ClassDetailView {
    /// Unmounted view; call `mount` to load the active tab.
    pub fn new(program: Program, class: Class, tab: ClassTab) -> Self {
        Self {
            program,
            class,
            tab,
            subjects: None,
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn class(&self) -> &Class {
        &self.class
    }

    pub fn tab(&self) -> ClassTab {
        self.tab
    }

    /// Header uses the class's stored `program_label`, not the live program.
    pub fn header(&self) -> ClassHeader {
        ClassHeader {
            class_label: self.class.label.clone(),
            program_label: self.class.program_label.clone(),
            level: self.class.level,
        }
    }

    pub fn subjects(&self) -> Option<&SubjectsPanel> {
        self.subjects.as_ref()
    }

    pub fn subjects_mut(&mut self) -> Option<&mut SubjectsPanel> {
        self.subjects.as_mut()
    }

    /// Placeholder for the active tab, when it has no implementation.
    pub fn placeholder(&self) -> Option<Placeholder> {
        match self.tab {
            ClassTab::Subjects => None,
            other => Some(Placeholder {
                title: other.title(),
                notice: COMING_SOON,
            }),
        }
    }

    /// Switches tab. Selecting the active tab again is a no-op.
    pub fn set_tab<R: CollectionRepository>(
        &mut self,
        ctx: &mut ViewContext<'_, R>,
        tab: ClassTab,
    ) -> Outcome {
        if tab == self.tab {
            return Outcome::Done;
        }
        self.tab = tab;
        self.mount(ctx)
    }

    /// Mounts the active tab, loading the subjects panel if selected.
    pub fn mount<R: CollectionRepository>(&mut self, ctx: &mut ViewContext<'_, R>) -> Outcome {
        match self.tab {
            ClassTab::Subjects => {
                let mut panel = SubjectsPanel::new(self.class.clone());
                let outcome = panel.load_all(ctx);
                self.subjects = Some(panel);
                outcome
            }
            ClassTab::Schedule | ClassTab::ReportCardTemplate => {
                self.subjects = None;
                Outcome::Done
            }
        }
    }
}
