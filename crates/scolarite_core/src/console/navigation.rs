//! Drill-down navigation state machine.
//!
//! # Responsibility
//! - Track where the operator is: program list, classes of one program,
//!   or one class with an active tab.
//! - Validate transitions; data loading belongs to the mounted view.
//!
//! # Invariants
//! - Initial state is `ProgramList`; there is no terminal state.
//! - Transitions are pure: `transition` never touches the store.
//! - Events that do not apply to the current state are rejected and the
//!   state is left unchanged.

use crate::model::class::Class;
use crate::model::program::Program;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Secondary tabs of the class detail screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassTab {
    #[default]
    Subjects,
    Schedule,
    ReportCardTemplate,
}

impl ClassTab {
    pub const ALL: [ClassTab; 3] = [Self::Subjects, Self::Schedule, Self::ReportCardTemplate];

    pub fn title(self) -> &'static str {
        match self {
            Self::Subjects => "Matières",
            Self::Schedule => "Emploi du temps",
            Self::ReportCardTemplate => "Modèle de bulletin",
        }
    }

    /// Accepts the serialized name or the short French alias.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "subjects" | "matieres" | "matières" => Some(Self::Subjects),
            "schedule" | "emploi" | "edt" => Some(Self::Schedule),
            "report_card_template" | "bulletin" => Some(Self::ReportCardTemplate),
            _ => None,
        }
    }
}

/// Current navigation location.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    ProgramList,
    ClassList {
        program: Program,
    },
    ClassDetail {
        program: Program,
        class: Class,
        tab: ClassTab,
    },
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProgramList => "program_list",
            Self::ClassList { .. } => "class_list",
            Self::ClassDetail { .. } => "class_detail",
        }
    }
}

/// Operator intents that move between locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    OpenProgram(Program),
    Back,
    OpenClass(Class),
    BackToClasses,
    ChangeTab(ClassTab),
}

impl NavigationEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::OpenProgram(_) => "open_program",
            Self::Back => "back",
            Self::OpenClass(_) => "open_class",
            Self::BackToClasses => "back_to_classes",
            Self::ChangeTab(_) => "change_tab",
        }
    }
}

/// Event not accepted in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionError {
    pub state: &'static str,
    pub event: &'static str,
}

impl Display for TransitionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "event `{}` is not valid in state `{}`", self.event, self.state)
    }
}

impl Error for TransitionError {}

/// Computes the state reached from `state` on `event`.
pub fn transition(state: &ViewState, event: NavigationEvent) -> Result<ViewState, TransitionError> {
    let rejected = TransitionError {
        state: state.name(),
        event: event.name(),
    };
    match (state, event) {
        (ViewState::ProgramList, NavigationEvent::OpenProgram(program)) => {
            Ok(ViewState::ClassList { program })
        }
        (ViewState::ClassList { .. }, NavigationEvent::Back) => Ok(ViewState::ProgramList),
        (ViewState::ClassList { program }, NavigationEvent::OpenClass(class)) => {
            Ok(ViewState::ClassDetail {
                program: program.clone(),
                class,
                tab: ClassTab::Subjects,
            })
        }
        (ViewState::ClassDetail { program, .. }, NavigationEvent::BackToClasses) => {
            Ok(ViewState::ClassList {
                program: program.clone(),
            })
        }
        (ViewState::ClassDetail { program, class, .. }, NavigationEvent::ChangeTab(tab)) => {
            Ok(ViewState::ClassDetail {
                program: program.clone(),
                class: class.clone(),
                tab,
            })
        }
        _ => Err(rejected),
    }
}

/// Owner of the current location for one mounted console.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    state: ViewState,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Applies `event`; on error the state is unchanged.
    pub fn dispatch(&mut self, event: NavigationEvent) -> Result<&ViewState, TransitionError> {
        self.state = transition(&self.state, event)?;
        Ok(&self.state)
    }
}
