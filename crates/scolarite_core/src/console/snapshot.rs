//! Serializable render model of the console.
//!
//! Front ends (the Flutter bridge, the line CLI) render from this value only;
//! they never reach into view state directly.

use crate::console::class_detail::ClassDetailView;
use crate::console::class_list::{ClassListView, ClassModal};
use crate::console::feedback::{FeedbackKind, FeedbackPanel};
use crate::console::host::{ConsoleSection, MountedView};
use crate::console::navigation::{ClassTab, ViewState};
use crate::console::program_list::{ProgramListView, ProgramModal};
use crate::console::subjects_panel::{SubjectModal, SubjectsPanel};
use crate::model::class::AcademicLevel;
use crate::model::id::{ClassId, ProgramId, SubjectId, TeachingUnitId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsoleSnapshot {
    pub section: ConsoleSection,
    pub section_title: &'static str,
    /// Navigation state name, e.g. `class_detail`.
    pub location: &'static str,
    pub breadcrumb: Vec<String>,
    pub notices: Vec<NoticeSnapshot>,
    pub loading: bool,
    pub modal: Option<ModalSnapshot>,
    pub body: BodySnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeSnapshot {
    pub kind: FeedbackKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModalSnapshot {
    CreateProgram {
        label: String,
    },
    EditProgram {
        id: ProgramId,
        label: String,
    },
    CreateClass {
        level: AcademicLevel,
    },
    CreateSubject {
        label: String,
        teaching_unit_id: Option<TeachingUnitId>,
    },
    EditSubject {
        id: SubjectId,
        label: String,
        teaching_unit_id: Option<TeachingUnitId>,
    },
    CreateTeachingUnit {
        label: String,
        code: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowSnapshot {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitOption {
    pub id: TeachingUnitId,
    /// Selector text: `code - label`, or the label alone.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectRow {
    pub id: SubjectId,
    pub label: String,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TabBody {
    Subjects {
        units: Vec<UnitOption>,
        filter: Option<TeachingUnitId>,
        subjects: Vec<SubjectRow>,
    },
    Placeholder {
        title: &'static str,
        notice: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodySnapshot {
    Programs {
        rows: Vec<RowSnapshot>,
    },
    Classes {
        program_id: ProgramId,
        program_label: String,
        rows: Vec<RowSnapshot>,
    },
    ClassDetail {
        class_id: ClassId,
        class_label: String,
        program_label: String,
        level: AcademicLevel,
        tab: ClassTab,
        tabs: Vec<&'static str>,
        panel: TabBody,
    },
    /// Section without an implementation yet.
    Section {
        title: &'static str,
        notice: &'static str,
    },
}

pub(crate) fn capture(
    section: ConsoleSection,
    state: &ViewState,
    view: &MountedView,
    feedback: &FeedbackPanel,
) -> ConsoleSnapshot {
    let notices = feedback
        .active()
        .map(|notice| NoticeSnapshot {
            kind: notice.kind,
            message: notice.message.clone(),
        })
        .collect();

    if !section.is_implemented() {
        return ConsoleSnapshot {
            section,
            section_title: section.title(),
            location: state.name(),
            breadcrumb: vec![section.title().to_string()],
            notices,
            loading: false,
            modal: None,
            body: BodySnapshot::Section {
                title: section.title(),
                notice: crate::console::class_detail::COMING_SOON,
            },
        };
    }

    let (loading, modal, body) = match view {
        MountedView::ProgramList(view) => programs(view),
        MountedView::ClassList(view) => classes(view),
        MountedView::ClassDetail(view) => class_detail(view),
    };

    ConsoleSnapshot {
        section,
        section_title: section.title(),
        location: state.name(),
        breadcrumb: breadcrumb(state),
        notices,
        loading,
        modal,
        body,
    }
}

fn breadcrumb(state: &ViewState) -> Vec<String> {
    let root = ConsoleSection::Structure.title().to_string();
    match state {
        ViewState::ProgramList => vec![root],
        ViewState::ClassList { program } => vec![root, program.label.clone()],
        ViewState::ClassDetail {
            program,
            class,
            tab,
        } => vec![
            root,
            program.label.clone(),
            class.label.clone(),
            tab.title().to_string(),
        ],
    }
}

fn programs(view: &ProgramListView) -> (bool, Option<ModalSnapshot>, BodySnapshot) {
    let modal = view.modal().map(|modal| match modal {
        ProgramModal::Create { draft } => ModalSnapshot::CreateProgram {
            label: draft.clone(),
        },
        ProgramModal::Edit { id, draft } => ModalSnapshot::EditProgram {
            id: id.clone(),
            label: draft.clone(),
        },
    });
    let rows = view
        .programs()
        .iter()
        .map(|program| RowSnapshot {
            id: program.id.to_string(),
            label: program.label.clone(),
        })
        .collect();
    (view.is_loading(), modal, BodySnapshot::Programs { rows })
}

fn classes(view: &ClassListView) -> (bool, Option<ModalSnapshot>, BodySnapshot) {
    let modal = view.modal().map(|modal| match modal {
        ClassModal::Create { level } => ModalSnapshot::CreateClass { level },
    });
    let rows = view
        .classes()
        .iter()
        .map(|class| RowSnapshot {
            id: class.id.to_string(),
            label: class.label.clone(),
        })
        .collect();
    let body = BodySnapshot::Classes {
        program_id: view.program().id.clone(),
        program_label: view.program().label.clone(),
        rows,
    };
    (view.is_loading(), modal, body)
}

fn class_detail(view: &ClassDetailView) -> (bool, Option<ModalSnapshot>, BodySnapshot) {
    let header = view.header();
    let (loading, modal, panel) = match (view.subjects(), view.placeholder()) {
        (Some(panel), _) => subjects(panel),
        (None, Some(placeholder)) => (
            false,
            None,
            TabBody::Placeholder {
                title: placeholder.title,
                notice: placeholder.notice,
            },
        ),
        // Subjects tab selected but not mounted yet.
        (None, None) => (
            true,
            None,
            TabBody::Subjects {
                units: Vec::new(),
                filter: None,
                subjects: Vec::new(),
            },
        ),
    };
    let body = BodySnapshot::ClassDetail {
        class_id: view.class().id.clone(),
        class_label: header.class_label,
        program_label: header.program_label,
        level: header.level,
        tab: view.tab(),
        tabs: ClassTab::ALL.iter().map(|tab| tab.title()).collect(),
        panel,
    };
    (loading, modal, body)
}

fn subjects(panel: &SubjectsPanel) -> (bool, Option<ModalSnapshot>, TabBody) {
    let modal = panel.modal().map(|modal| match modal {
        SubjectModal::CreateSubject { draft } => ModalSnapshot::CreateSubject {
            label: draft.label.clone(),
            teaching_unit_id: draft.teaching_unit_id.clone(),
        },
        SubjectModal::EditSubject { id, draft } => ModalSnapshot::EditSubject {
            id: id.clone(),
            label: draft.label.clone(),
            teaching_unit_id: draft.teaching_unit_id.clone(),
        },
        SubjectModal::CreateUnit { draft } => ModalSnapshot::CreateTeachingUnit {
            label: draft.label.clone(),
            code: draft.code.clone(),
        },
    });
    let units = panel
        .teaching_units()
        .iter()
        .map(|unit| UnitOption {
            id: unit.id.clone(),
            name: unit.display_name(),
        })
        .collect();
    let subjects = panel
        .visible_subjects()
        .into_iter()
        .map(|subject| SubjectRow {
            id: subject.id.clone(),
            label: subject.label.clone(),
            unit: panel.unit_display(subject),
        })
        .collect();
    let body = TabBody::Subjects {
        units,
        filter: panel.unit_filter().cloned(),
        subjects,
    };
    (panel.is_loading(), modal, body)
}

#[cfg(test)]
mod tests {
    use super::{capture, BodySnapshot, TabBody};
    use crate::console::class_detail::ClassDetailView;
    use crate::console::feedback::{FeedbackKind, FeedbackPanel};
    use crate::console::host::{ConsoleSection, MountedView};
    use crate::console::navigation::{ClassTab, ViewState};
    use crate::console::program_list::ProgramListView;
    use crate::model::class::{AcademicLevel, Class};
    use crate::model::program::Program;
    use std::time::Instant;

    fn program() -> Program {
        Program {
            id: "p-1".into(),
            label: "Informatique".to_string(),
        }
    }

    fn class() -> Class {
        Class {
            id: "c-1".into(),
            program_id: "p-1".into(),
            program_label: "Info (ancien)".to_string(),
            level: AcademicLevel::Licence2,
            label: "Informatique - Licence 2".to_string(),
        }
    }

    #[test]
    fn placeholder_tab_renders_coming_soon() {
        let view = ClassDetailView::new(program(), class(), ClassTab::Schedule);
        let state = ViewState::ClassDetail {
            program: program(),
            class: class(),
            tab: ClassTab::Schedule,
        };
        let snapshot = capture(
            ConsoleSection::Structure,
            &state,
            &MountedView::ClassDetail(view),
            &FeedbackPanel::default(),
        );

        assert_eq!(snapshot.location, "class_detail");
        assert_eq!(
            snapshot.breadcrumb.last().map(String::as_str),
            Some("Emploi du temps")
        );
        match snapshot.body {
            BodySnapshot::ClassDetail {
                program_label,
                panel,
                ..
            } => {
                assert_eq!(program_label, "Info (ancien)");
                assert_eq!(
                    panel,
                    TabBody::Placeholder {
                        title: "Emploi du temps",
                        notice: "Fonctionnalité à venir.",
                    }
                );
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn inactive_section_renders_placeholder_and_keeps_notices() {
        let mut feedback = FeedbackPanel::default();
        feedback.show_at("Filière ajoutée.", FeedbackKind::Success, Instant::now());
        let snapshot = capture(
            ConsoleSection::Students,
            &ViewState::ProgramList,
            &MountedView::ProgramList(ProgramListView::new()),
            &feedback,
        );

        assert_eq!(snapshot.notices.len(), 1);
        assert!(!snapshot.loading);
        assert!(matches!(snapshot.body, BodySnapshot::Section { .. }));

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["section"], "students");
        assert_eq!(json["body"]["kind"], "section");
    }
}
