mod support;

use scolarite_core::console::feedback::{FeedbackKind, FeedbackPanel};
use scolarite_core::console::prompt::{PresetAnswer, CONFIRM_DELETE_SUBJECT};
use scolarite_core::console::subjects_panel::{SubjectModal, SubjectsPanel, NO_UNIT};
use scolarite_core::console::{FormField, Outcome, ViewContext};
use scolarite_core::model::class::{AcademicLevel, Class};
use scolarite_core::model::label::ValidationError;
use scolarite_core::model::program::Program;
use scolarite_core::repo::collection_repo::Collection;
use scolarite_core::service::class_service::ClassService;
use scolarite_core::service::program_service::ProgramService;
use support::{FlakyRepo, Verb};

fn seed_class(repo: &FlakyRepo) -> Class {
    let programs = ProgramService::new(repo);
    let program_id = programs.create_program("Informatique").unwrap();
    let program: Program = programs
        .list_programs()
        .unwrap()
        .into_iter()
        .find(|p| p.id == program_id)
        .unwrap();
    let classes = ClassService::new(repo);
    classes.create_class(&program, AcademicLevel::Licence1).unwrap();
    classes.list_classes(&program.id).unwrap().remove(0)
}

fn rows(panel: &SubjectsPanel) -> Vec<(String, String)> {
    panel
        .visible_subjects()
        .into_iter()
        .map(|subject| (subject.label.clone(), panel.unit_display(subject)))
        .collect()
}

#[test]
fn mount_loads_units_and_subjects_of_the_class() {
    let repo = FlakyRepo::new();
    let class = seed_class(&repo);
    let mut feedback = FeedbackPanel::default();
    let mut panel = SubjectsPanel::new(class);
    assert!(panel.is_loading());

    assert_eq!(panel.load_all(&mut ViewContext::new(&repo, &mut feedback)), Outcome::Done);
    assert!(!panel.is_loading());
    assert!(panel.teaching_units().is_empty());
    assert!(panel.subjects().is_empty());
}

#[test]
fn unit_filter_and_unit_display() {
    let repo = FlakyRepo::new();
    let class = seed_class(&repo);
    let mut feedback = FeedbackPanel::default();
    let mut panel = SubjectsPanel::new(class);
    let mut ctx = ViewContext::new(&repo, &mut feedback);
    panel.load_all(&mut ctx);

    assert_eq!(
        panel.create_teaching_unit(&mut ctx, "UE1", Some("U101")),
        Outcome::Done
    );
    let unit = panel.teaching_units()[0].clone();
    assert_eq!(unit.display_name(), "U101 - UE1");

    panel.create_subject(&mut ctx, "Algo", Some(unit.id.clone()));
    panel.create_subject(&mut ctx, "Anglais", None);

    assert_eq!(
        rows(&panel),
        vec![
            ("Algo".to_string(), "UE1".to_string()),
            ("Anglais".to_string(), NO_UNIT.to_string()),
        ]
    );

    panel.set_unit_filter(Some(unit.id.clone()));
    assert_eq!(rows(&panel), vec![("Algo".to_string(), "UE1".to_string())]);
    assert_eq!(panel.subjects().len(), 2, "filtering never drops loaded rows");

    panel.set_unit_filter(None);
    assert_eq!(rows(&panel).len(), 2);
}

#[test]
fn clearing_the_unit_on_edit_shows_the_dash() {
    let repo = FlakyRepo::new();
    let class = seed_class(&repo);
    let mut feedback = FeedbackPanel::default();
    let mut panel = SubjectsPanel::new(class);
    let mut ctx = ViewContext::new(&repo, &mut feedback);
    panel.load_all(&mut ctx);
    panel.create_teaching_unit(&mut ctx, "UE1", None);
    let unit_id = panel.teaching_units()[0].id.clone();
    panel.create_subject(&mut ctx, "Algo", Some(unit_id));
    let subject_id = panel.subjects()[0].id.clone();

    assert!(panel.open_edit_subject(&subject_id));
    if let Some(SubjectModal::EditSubject { draft, .. }) = panel.modal_mut() {
        draft.label = "Algorithmique".to_string();
        draft.teaching_unit_id = None;
    }
    assert_eq!(panel.submit_modal(&mut ctx), Outcome::Done);

    assert!(panel.modal().is_none());
    assert_eq!(
        rows(&panel),
        vec![("Algorithmique".to_string(), NO_UNIT.to_string())]
    );
    assert_eq!(panel.subjects()[0].teaching_unit_id, None);
    assert_eq!(
        feedback.current(FeedbackKind::Success).map(|n| n.message.as_str()),
        Some("Matière mise à jour.")
    );
}

#[test]
fn blank_labels_are_rejected_with_their_own_messages() {
    let repo = FlakyRepo::new();
    let class = seed_class(&repo);
    let inserts_before = repo.insert_count();
    let mut feedback = FeedbackPanel::default();
    let mut panel = SubjectsPanel::new(class);
    let mut ctx = ViewContext::new(&repo, &mut feedback);

    assert_eq!(
        panel.create_subject(&mut ctx, " ", None),
        Outcome::Rejected(ValidationError::EmptyLabel)
    );
    assert_eq!(
        panel.create_teaching_unit(&mut ctx, "", Some("U1")),
        Outcome::Rejected(ValidationError::EmptyTeachingUnitLabel)
    );
    assert_eq!(repo.insert_count(), inserts_before);
    assert_eq!(
        feedback.current(FeedbackKind::Error).map(|n| n.message.as_str()),
        Some("Libellé UE requis.")
    );
}

#[test]
fn blank_unit_code_is_stored_as_absent() {
    let repo = FlakyRepo::new();
    let class = seed_class(&repo);
    let mut feedback = FeedbackPanel::default();
    let mut panel = SubjectsPanel::new(class);
    let mut ctx = ViewContext::new(&repo, &mut feedback);

    panel.open_create_unit();
    if let Some(SubjectModal::CreateUnit { draft }) = panel.modal_mut() {
        draft.label = "  UE2 ".to_string();
        draft.code = "   ".to_string();
    }
    assert_eq!(panel.submit_modal(&mut ctx), Outcome::Done);

    let unit = &panel.teaching_units()[0];
    assert_eq!(unit.label, "UE2");
    assert_eq!(unit.code, None);
    assert_eq!(unit.display_name(), "UE2");
}

#[test]
fn one_failed_listing_fails_the_whole_load() {
    let repo = FlakyRepo::new();
    let class = seed_class(&repo);
    let mut feedback = FeedbackPanel::default();
    let mut panel = SubjectsPanel::new(class);
    let mut ctx = ViewContext::new(&repo, &mut feedback);
    panel.load_all(&mut ctx);
    panel.create_teaching_unit(&mut ctx, "UE1", None);
    panel.create_subject(&mut ctx, "Algo", None);

    repo.fail_on(Verb::List, Collection::Subjects);
    assert_eq!(panel.load_all(&mut ctx), Outcome::Failed);

    assert_eq!(panel.teaching_units().len(), 1);
    assert_eq!(panel.subjects().len(), 1);
    assert_eq!(
        feedback.current(FeedbackKind::Error).map(|n| n.message.as_str()),
        Some("Erreur de chargement.")
    );
}

#[test]
fn delete_subject_asks_and_refetches() {
    let repo = FlakyRepo::new();
    let class = seed_class(&repo);
    let mut feedback = FeedbackPanel::default();
    let mut panel = SubjectsPanel::new(class);
    let mut ctx = ViewContext::new(&repo, &mut feedback);
    panel.create_subject(&mut ctx, "Algo", None);
    let id = panel.subjects()[0].id.clone();

    assert_eq!(
        panel.delete_subject(&mut ctx, &mut PresetAnswer(false), &id),
        Outcome::Cancelled
    );
    assert_eq!(panel.subjects().len(), 1);

    assert_eq!(
        panel.delete_subject(&mut ctx, &mut PresetAnswer(true), &id),
        Outcome::Done
    );
    assert!(panel.subjects().is_empty());
    assert_eq!(CONFIRM_DELETE_SUBJECT, "Supprimer cette matière ?");
}

#[test]
fn failed_unit_creation_reports_its_message() {
    let repo = FlakyRepo::new();
    let class = seed_class(&repo);
    let mut feedback = FeedbackPanel::default();
    let mut panel = SubjectsPanel::new(class);
    let mut ctx = ViewContext::new(&repo, &mut feedback);
    repo.fail_on(Verb::Insert, Collection::TeachingUnits);

    assert_eq!(
        panel.create_teaching_unit(&mut ctx, "UE1", None),
        Outcome::Failed
    );
    assert_eq!(
        feedback.current(FeedbackKind::Error).map(|n| n.message.as_str()),
        Some("Création UE impossible.")
    );
}

fn error_message(feedback: &FeedbackPanel) -> Option<&str> {
    feedback.current(FeedbackKind::Error).map(|n| n.message.as_str())
}

#[test]
fn failed_subject_insert_reports_and_keeps_rows() {
    let repo = FlakyRepo::new();
    let class = seed_class(&repo);
    let mut feedback = FeedbackPanel::default();
    let mut panel = SubjectsPanel::new(class);
    let mut ctx = ViewContext::new(&repo, &mut feedback);
    panel.create_subject(&mut ctx, "Algo", None);

    repo.fail_on(Verb::Insert, Collection::Subjects);
    assert_eq!(panel.create_subject(&mut ctx, "Anglais", None), Outcome::Failed);

    assert_eq!(rows(&panel), vec![("Algo".to_string(), NO_UNIT.to_string())]);
    assert_eq!(error_message(&feedback), Some("Ajout impossible."));
}

#[test]
fn failed_subject_update_reports_and_keeps_rows() {
    let repo = FlakyRepo::new();
    let class = seed_class(&repo);
    let mut feedback = FeedbackPanel::default();
    let mut panel = SubjectsPanel::new(class);
    let mut ctx = ViewContext::new(&repo, &mut feedback);
    panel.create_subject(&mut ctx, "Algo", None);
    let id = panel.subjects()[0].id.clone();

    repo.fail_on(Verb::Update, Collection::Subjects);
    assert_eq!(
        panel.update_subject(&mut ctx, &id, "Algorithmique", None),
        Outcome::Failed
    );

    assert_eq!(rows(&panel), vec![("Algo".to_string(), NO_UNIT.to_string())]);
    assert_eq!(error_message(&feedback), Some("Mise à jour impossible."));
}

#[test]
fn failed_subject_delete_reports_and_keeps_rows() {
    let repo = FlakyRepo::new();
    let class = seed_class(&repo);
    let mut feedback = FeedbackPanel::default();
    let mut panel = SubjectsPanel::new(class);
    let mut ctx = ViewContext::new(&repo, &mut feedback);
    panel.create_subject(&mut ctx, "Algo", None);
    let id = panel.subjects()[0].id.clone();

    repo.fail_on(Verb::Delete, Collection::Subjects);
    assert_eq!(
        panel.delete_subject(&mut ctx, &mut PresetAnswer(true), &id),
        Outcome::Failed
    );

    assert_eq!(panel.subjects().len(), 1);
    assert_eq!(error_message(&feedback), Some("Suppression impossible."));
}

#[test]
fn blank_label_on_update_makes_no_store_call() {
    let repo = FlakyRepo::new();
    let class = seed_class(&repo);
    let mut feedback = FeedbackPanel::default();
    let mut panel = SubjectsPanel::new(class);
    let mut ctx = ViewContext::new(&repo, &mut feedback);
    panel.create_subject(&mut ctx, "Algo", None);
    let id = panel.subjects()[0].id.clone();
    repo.clear_calls();

    assert_eq!(
        panel.update_subject(&mut ctx, &id, "  ", None),
        Outcome::Rejected(ValidationError::EmptyLabel)
    );

    assert!(repo.calls().is_empty());
    assert_eq!(panel.subjects()[0].label, "Algo");
    assert_eq!(error_message(&feedback), Some("Libellé requis."));
}

#[test]
fn form_edits_follow_the_open_form() {
    let repo = FlakyRepo::new();
    let class = seed_class(&repo);
    let mut feedback = FeedbackPanel::default();
    let mut panel = SubjectsPanel::new(class);
    let mut ctx = ViewContext::new(&repo, &mut feedback);
    panel.create_teaching_unit(&mut ctx, "UE1", None);
    let unit_id = panel.teaching_units()[0].id.clone();

    assert!(!panel.edit_form(FormField::Label("Algo".to_string())));

    panel.open_create_subject();
    assert!(panel.edit_form(FormField::Label("Algo".to_string())));
    assert!(panel.edit_form(FormField::Unit(Some(unit_id.clone()))));
    assert!(!panel.edit_form(FormField::Code("U1".to_string())));
    assert_eq!(panel.submit_modal(&mut ctx), Outcome::Done);
    assert_eq!(rows(&panel), vec![("Algo".to_string(), "UE1".to_string())]);

    panel.open_create_unit();
    assert!(panel.edit_form(FormField::Code("U102".to_string())));
    assert!(!panel.edit_form(FormField::Unit(None)));
    panel.close_modal();
    assert!(panel.modal().is_none());
}
