mod support;

use scolarite_core::console::class_list::{ClassListView, ClassModal};
use scolarite_core::console::feedback::{FeedbackKind, FeedbackPanel};
use scolarite_core::console::prompt::CONFIRM_DELETE_CLASS;
use scolarite_core::console::{FormField, Outcome, ViewContext};
use scolarite_core::model::class::AcademicLevel;
use scolarite_core::model::program::Program;
use scolarite_core::repo::collection_repo::Collection;
use scolarite_core::service::class_service::ClassService;
use scolarite_core::service::program_service::ProgramService;
use support::{FlakyRepo, ScriptedPrompt, Verb};

fn seed_program(repo: &FlakyRepo, label: &str) -> Program {
    let service = ProgramService::new(repo);
    let id = service.create_program(label).unwrap();
    service
        .list_programs()
        .unwrap()
        .into_iter()
        .find(|program| program.id == id)
        .unwrap()
}

fn labels(view: &ClassListView) -> Vec<&str> {
    view.classes().iter().map(|c| c.label.as_str()).collect()
}

#[test]
fn created_class_label_combines_program_and_level() {
    let repo = FlakyRepo::new();
    let info = seed_program(&repo, "Informatique");
    let mut feedback = FeedbackPanel::default();
    let mut view = ClassListView::new(info.clone());
    let mut ctx = ViewContext::new(&repo, &mut feedback);
    view.list(&mut ctx);

    view.open_create();
    assert_eq!(
        view.modal(),
        Some(ClassModal::Create {
            level: AcademicLevel::Licence1
        })
    );
    view.select_level(AcademicLevel::Licence2);
    assert_eq!(view.submit_modal(&mut ctx), Outcome::Done);

    assert!(view.modal().is_none());
    let class = &view.classes()[0];
    assert_eq!(class.label, "Informatique - Licence 2");
    assert_eq!(class.program_id, info.id);
    assert_eq!(class.program_label, "Informatique");
    assert_eq!(class.level, AcademicLevel::Licence2);
    assert_eq!(
        feedback.current(FeedbackKind::Success).map(|n| n.message.as_str()),
        Some("Classe ajoutée.")
    );
}

#[test]
fn listing_is_scoped_to_the_program() {
    let repo = FlakyRepo::new();
    let droit = seed_program(&repo, "Droit");
    let info = seed_program(&repo, "Informatique");
    let classes = ClassService::new(&repo);
    classes.create_class(&droit, AcademicLevel::Master1).unwrap();
    classes.create_class(&info, AcademicLevel::Licence3).unwrap();
    classes.create_class(&info, AcademicLevel::Licence1).unwrap();

    let mut feedback = FeedbackPanel::default();
    let mut view = ClassListView::new(info.clone());
    let mut ctx = ViewContext::new(&repo, &mut feedback);
    view.list(&mut ctx);
    assert_eq!(
        labels(&view),
        vec!["Informatique - Licence 1", "Informatique - Licence 3"]
    );

    repo.clear_calls();
    assert_eq!(view.set_program(&mut ctx, info.clone()), Outcome::Done);
    assert!(repo.calls().is_empty(), "same program must not refetch");

    view.set_program(&mut ctx, droit);
    assert_eq!(labels(&view), vec!["Droit - Master 1"]);
}

#[test]
fn renaming_a_program_leaves_class_labels_stale() {
    let repo = FlakyRepo::new();
    let info = seed_program(&repo, "Info");
    ClassService::new(&repo)
        .create_class(&info, AcademicLevel::Licence1)
        .unwrap();
    ProgramService::new(&repo)
        .rename_program(&info.id, "Informatique")
        .unwrap();

    let mut feedback = FeedbackPanel::default();
    let mut view = ClassListView::new(info);
    view.list(&mut ViewContext::new(&repo, &mut feedback));
    assert_eq!(view.classes()[0].label, "Info - Licence 1");
    assert_eq!(view.classes()[0].program_label, "Info");
}

#[test]
fn deleting_a_program_keeps_its_classes() {
    let repo = FlakyRepo::new();
    let info = seed_program(&repo, "Informatique");
    ClassService::new(&repo)
        .create_class(&info, AcademicLevel::Licence1)
        .unwrap();
    ProgramService::new(&repo).delete_program(&info.id).unwrap();

    let remaining = ClassService::new(&repo).list_classes(&info.id).unwrap();
    assert_eq!(remaining.len(), 1);
}

#[test]
fn delete_is_gated_by_confirmation() {
    let repo = FlakyRepo::new();
    let info = seed_program(&repo, "Informatique");
    let mut feedback = FeedbackPanel::default();
    let mut view = ClassListView::new(info);
    let mut ctx = ViewContext::new(&repo, &mut feedback);
    view.create(&mut ctx, AcademicLevel::Master2);
    let id = view.classes()[0].id.clone();

    let mut prompt = ScriptedPrompt::new([false, true]);
    assert_eq!(view.delete(&mut ctx, &mut prompt, &id), Outcome::Cancelled);
    assert_eq!(view.classes().len(), 1);

    assert_eq!(view.delete(&mut ctx, &mut prompt, &id), Outcome::Done);
    assert!(view.classes().is_empty());
    assert_eq!(prompt.asked().len(), 2);
    assert!(prompt.asked().iter().all(|m| m == CONFIRM_DELETE_CLASS));
}

#[test]
fn failed_delete_keeps_rows() {
    let repo = FlakyRepo::new();
    let info = seed_program(&repo, "Informatique");
    let mut feedback = FeedbackPanel::default();
    let mut view = ClassListView::new(info);
    let mut ctx = ViewContext::new(&repo, &mut feedback);
    view.create(&mut ctx, AcademicLevel::Licence1);
    let id = view.classes()[0].id.clone();

    repo.fail_on(Verb::Delete, Collection::Classes);
    let mut prompt = ScriptedPrompt::new([true]);
    assert_eq!(view.delete(&mut ctx, &mut prompt, &id), Outcome::Failed);
    assert_eq!(view.classes().len(), 1);
    assert_eq!(
        feedback.current(FeedbackKind::Error).map(|n| n.message.as_str()),
        Some("Suppression impossible.")
    );
}

#[test]
fn failed_insert_reports_and_keeps_rows_and_form() {
    let repo = FlakyRepo::new();
    let info = seed_program(&repo, "Informatique");
    let mut feedback = FeedbackPanel::default();
    let mut view = ClassListView::new(info);
    let mut ctx = ViewContext::new(&repo, &mut feedback);
    view.create(&mut ctx, AcademicLevel::Licence1);

    repo.fail_on(Verb::Insert, Collection::Classes);
    view.open_create();
    assert!(view.edit_form(FormField::Level(AcademicLevel::Master1)));
    assert!(!view.edit_form(FormField::Label("M1".to_string())));
    assert_eq!(view.submit_modal(&mut ctx), Outcome::Failed);

    assert_eq!(labels(&view), vec!["Informatique - Licence 1"]);
    assert_eq!(
        view.modal(),
        Some(ClassModal::Create {
            level: AcademicLevel::Master1
        })
    );
    assert_eq!(
        feedback.current(FeedbackKind::Error).map(|n| n.message.as_str()),
        Some("Ajout impossible.")
    );
}
