//! Console host: owns the store, navigation, feedback and mounted view.
//!
//! # Responsibility
//! - Mount exactly one screen matching the navigation state and trigger
//!   its mount fetch.
//! - Hand out a screen together with the context its operations need.
//! - Track the top-level section; only the structure section is built.
//!
//! # Invariants
//! - A view's results are only ever applied to the mounted view; replacing
//!   the view drops the old one with its state.
//! - Switching sections never resets the structure module.

use crate::console::class_detail::ClassDetailView;
use crate::console::class_list::ClassListView;
use crate::console::feedback::FeedbackPanel;
use crate::console::navigation::{
    ClassTab, NavigationEvent, Navigator, TransitionError, ViewState,
};
use crate::console::program_list::ProgramListView;
use crate::console::snapshot::{capture, ConsoleSnapshot};
use crate::console::subjects_panel::SubjectsPanel;
use crate::console::{FormField, Outcome, ViewContext};
use crate::model::id::{ClassId, DocumentId, ProgramId, SubjectId};
use crate::repo::collection_repo::CollectionRepository;
use log::{info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Top-level navigation entries of the director-of-studies console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleSection {
    /// Programs, classes, teaching units and subjects.
    #[default]
    Structure,
    Attendance,
    Students,
    Professors,
    Evaluations,
}

impl ConsoleSection {
    pub const ALL: [ConsoleSection; 5] = [
        Self::Structure,
        Self::Attendance,
        Self::Students,
        Self::Professors,
        Self::Evaluations,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Structure => "Filières et classes",
            Self::Attendance => "Présences",
            Self::Students => "Étudiants",
            Self::Professors => "Professeurs",
            Self::Evaluations => "Évaluations",
        }
    }

    pub fn is_implemented(self) -> bool {
        matches!(self, Self::Structure)
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "structure" | "filieres" | "filières" => Some(Self::Structure),
            "attendance" | "presences" | "présences" => Some(Self::Attendance),
            "students" | "etudiants" | "étudiants" => Some(Self::Students),
            "professors" | "professeurs" => Some(Self::Professors),
            "evaluations" | "évaluations" => Some(Self::Evaluations),
            _ => None,
        }
    }
}

/// Screen currently mounted for the structure section.
#[derive(Debug, Clone)]
pub enum MountedView {
    ProgramList(ProgramListView),
    ClassList(ClassListView),
    ClassDetail(ClassDetailView),
}

/// Form a shell asks to open on the mounted screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormRequest {
    CreateProgram,
    EditProgram(ProgramId),
    CreateClass,
    CreateSubject,
    EditSubject(SubjectId),
    CreateTeachingUnit,
}

/// Screen owning the form operations are routed to.
enum FormOwner<'v> {
    Programs(&'v mut ProgramListView),
    Classes(&'v mut ClassListView),
    Subjects(&'v mut SubjectsPanel),
}

/// Host-level misuse: wrong screen, unknown row, inactive section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    Transition(TransitionError),
    SectionInactive(ConsoleSection),
    ViewNotMounted { expected: &'static str },
    UnknownRecord(DocumentId),
}

impl Display for ConsoleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transition(err) => write!(f, "{err}"),
            Self::SectionInactive(section) => {
                write!(f, "section `{}` is active, not structure", section.title())
            }
            Self::ViewNotMounted { expected } => write!(f, "`{expected}` is not mounted"),
            Self::UnknownRecord(id) => write!(f, "no listed record with id {id}"),
        }
    }
}

impl Error for ConsoleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transition(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransitionError> for ConsoleError {
    fn from(value: TransitionError) -> Self {
        Self::Transition(value)
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// One mounted console session.
pub struct Console<R: CollectionRepository> {
    repo: R,
    navigator: Navigator,
    feedback: FeedbackPanel,
    section: ConsoleSection,
    view: MountedView,
}

impl<R: CollectionRepository> Console<R> {
    /// Mounts the console on the program list and loads it.
    pub fn mount(repo: R, mut feedback: FeedbackPanel) -> Self {
        let mut view = ProgramListView::new();
        view.list(&mut ViewContext::new(&repo, &mut feedback));
        info!("event=console_mount module=console status=ok");
        Self {
            repo,
            navigator: Navigator::new(),
            feedback,
            section: ConsoleSection::Structure,
            view: MountedView::ProgramList(view),
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn state(&self) -> &ViewState {
        self.navigator.state()
    }

    pub fn section(&self) -> ConsoleSection {
        self.section
    }

    pub fn view(&self) -> &MountedView {
        &self.view
    }

    pub fn feedback(&self) -> &FeedbackPanel {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut FeedbackPanel {
        &mut self.feedback
    }

    /// Selects a top-level section. Placeholders keep structure state intact.
    pub fn select_section(&mut self, section: ConsoleSection) {
        if section != self.section {
            info!(
                "event=section_select module=console status=ok section={:?}",
                section
            );
        }
        self.section = section;
    }

    /// Applies a navigation event and mounts the screen it leads to.
    pub fn navigate(&mut self, event: NavigationEvent) -> ConsoleResult<Outcome> {
        self.ensure_structure()?;
        let tab_change = matches!(event, NavigationEvent::ChangeTab(_));
        let event_name = event.name();
        let state = match self.navigator.dispatch(event) {
            Ok(state) => state.clone(),
            Err(err) => {
                warn!("event=navigate module=console status=rejected error={err}");
                return Err(err.into());
            }
        };
        info!(
            "event=navigate module=console status=ok action={} state={}",
            event_name,
            state.name()
        );

        let mut ctx = ViewContext::new(&self.repo, &mut self.feedback);
        if tab_change {
            if let (MountedView::ClassDetail(view), ViewState::ClassDetail { tab, .. }) =
                (&mut self.view, &state)
            {
                return Ok(view.set_tab(&mut ctx, *tab));
            }
        }

        let (view, outcome) = mount_view(&mut ctx, state);
        self.view = view;
        Ok(outcome)
    }

    /// Opens a program listed on the program screen.
    pub fn open_program(&mut self, id: &ProgramId) -> ConsoleResult<Outcome> {
        let event = match &self.view {
            MountedView::ProgramList(view) => view
                .open(id)
                .ok_or_else(|| ConsoleError::UnknownRecord(id.clone()))?,
            _ => return Err(ConsoleError::ViewNotMounted {
                expected: "program_list",
            }),
        };
        self.navigate(event)
    }

    /// Opens a class listed on the class screen.
    pub fn open_class(&mut self, id: &ClassId) -> ConsoleResult<Outcome> {
        let event = match &self.view {
            MountedView::ClassList(view) => view
                .open(id)
                .ok_or_else(|| ConsoleError::UnknownRecord(id.clone()))?,
            _ => return Err(ConsoleError::ViewNotMounted {
                expected: "class_list",
            }),
        };
        self.navigate(event)
    }

    pub fn back_to_programs(&mut self) -> ConsoleResult<Outcome> {
        self.navigate(NavigationEvent::Back)
    }

    pub fn back_to_classes(&mut self) -> ConsoleResult<Outcome> {
        self.navigate(NavigationEvent::BackToClasses)
    }

    pub fn change_tab(&mut self, tab: ClassTab) -> ConsoleResult<Outcome> {
        self.navigate(NavigationEvent::ChangeTab(tab))
    }

    /// Program screen plus the context its operations take.
    pub fn programs(&mut self) -> ConsoleResult<(&mut ProgramListView, ViewContext<'_, R>)> {
        self.ensure_structure()?;
        match &mut self.view {
            MountedView::ProgramList(view) => {
                Ok((view, ViewContext::new(&self.repo, &mut self.feedback)))
            }
            _ => Err(ConsoleError::ViewNotMounted {
                expected: "program_list",
            }),
        }
    }

    /// Class screen plus the context its operations take.
    pub fn classes(&mut self) -> ConsoleResult<(&mut ClassListView, ViewContext<'_, R>)> {
        self.ensure_structure()?;
        match &mut self.view {
            MountedView::ClassList(view) => {
                Ok((view, ViewContext::new(&self.repo, &mut self.feedback)))
            }
            _ => Err(ConsoleError::ViewNotMounted {
                expected: "class_list",
            }),
        }
    }

    /// Subjects tab plus the context its operations take.
    pub fn subjects(&mut self) -> ConsoleResult<(&mut SubjectsPanel, ViewContext<'_, R>)> {
        self.ensure_structure()?;
        let not_mounted = ConsoleError::ViewNotMounted {
            expected: "subjects_panel",
        };
        match &mut self.view {
            MountedView::ClassDetail(view) => match view.subjects_mut() {
                Some(panel) => Ok((panel, ViewContext::new(&self.repo, &mut self.feedback))),
                None => Err(not_mounted),
            },
            _ => Err(not_mounted),
        }
    }

    /// Opens a form on the screen it belongs to. Any form already open on
    /// that screen is replaced.
    pub fn open_form(&mut self, request: FormRequest) -> ConsoleResult<()> {
        match request {
            FormRequest::CreateProgram => self.programs()?.0.open_create(),
            FormRequest::EditProgram(id) => {
                if !self.programs()?.0.open_edit(&id) {
                    return Err(ConsoleError::UnknownRecord(id));
                }
            }
            FormRequest::CreateClass => self.classes()?.0.open_create(),
            FormRequest::CreateSubject => self.subjects()?.0.open_create_subject(),
            FormRequest::EditSubject(id) => {
                if !self.subjects()?.0.open_edit_subject(&id) {
                    return Err(ConsoleError::UnknownRecord(id));
                }
            }
            FormRequest::CreateTeachingUnit => self.subjects()?.0.open_create_unit(),
        }
        Ok(())
    }

    /// Edits a field of the open form; `false` when nothing took the edit.
    pub fn edit_form(&mut self, field: FormField) -> ConsoleResult<bool> {
        let (owner, _) = self.form_owner()?;
        Ok(match owner {
            FormOwner::Programs(view) => view.edit_form(field),
            FormOwner::Classes(view) => view.edit_form(field),
            FormOwner::Subjects(panel) => panel.edit_form(field),
        })
    }

    /// Submits the open form. `Cancelled` when no form is open; a rejected
    /// or failed submit keeps the form open with its draft.
    pub fn submit_form(&mut self) -> ConsoleResult<Outcome> {
        let (owner, mut ctx) = self.form_owner()?;
        Ok(match owner {
            FormOwner::Programs(view) => view.submit_modal(&mut ctx),
            FormOwner::Classes(view) => view.submit_modal(&mut ctx),
            FormOwner::Subjects(panel) => panel.submit_modal(&mut ctx),
        })
    }

    pub fn close_form(&mut self) -> ConsoleResult<()> {
        let (owner, _) = self.form_owner()?;
        match owner {
            FormOwner::Programs(view) => view.close_modal(),
            FormOwner::Classes(view) => view.close_modal(),
            FormOwner::Subjects(panel) => panel.close_modal(),
        }
        Ok(())
    }

    /// Render model of the whole console; expired notices are dropped first.
    pub fn snapshot(&mut self) -> ConsoleSnapshot {
        self.feedback.expire(Instant::now());
        capture(
            self.section,
            self.navigator.state(),
            &self.view,
            &self.feedback,
        )
    }

    fn form_owner(&mut self) -> ConsoleResult<(FormOwner<'_>, ViewContext<'_, R>)> {
        self.ensure_structure()?;
        let owner = match &mut self.view {
            MountedView::ProgramList(view) => FormOwner::Programs(view),
            MountedView::ClassList(view) => FormOwner::Classes(view),
            MountedView::ClassDetail(view) => match view.subjects_mut() {
                Some(panel) => FormOwner::Subjects(panel),
                None => {
                    return Err(ConsoleError::ViewNotMounted {
                        expected: "subjects_panel",
                    })
                }
            },
        };
        Ok((owner, ViewContext::new(&self.repo, &mut self.feedback)))
    }

    fn ensure_structure(&self) -> ConsoleResult<()> {
        if self.section.is_implemented() {
            Ok(())
        } else {
            Err(ConsoleError::SectionInactive(self.section))
        }
    }
}

fn mount_view<R: CollectionRepository>(
    ctx: &mut ViewContext<'_, R>,
    state: ViewState,
) -> (MountedView, Outcome) {
    match state {
        ViewState::ProgramList => {
            let mut view = ProgramListView::new();
            let outcome = view.list(ctx);
            (MountedView::ProgramList(view), outcome)
        }
        ViewState::ClassList { program } => {
            let mut view = ClassListView::new(program);
            let outcome = view.list(ctx);
            (MountedView::ClassList(view), outcome)
        }
        ViewState::ClassDetail {
            program,
            class,
            tab,
        } => {
            let mut view = ClassDetailView::new(program, class, tab);
            let outcome = view.mount(ctx);
            (MountedView::ClassDetail(view), outcome)
        }
    }
}
