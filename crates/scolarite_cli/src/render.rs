//! Plain-text rendering of console snapshots.

use scolarite_core::console::snapshot::{BodySnapshot, ModalSnapshot, TabBody};
use scolarite_core::{ConsoleSnapshot, FeedbackKind};
use std::fmt::Write;

pub fn render(snapshot: &ConsoleSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {}", snapshot.breadcrumb.join(" > "));
    for notice in &snapshot.notices {
        let tag = match notice.kind {
            FeedbackKind::Success => "ok",
            FeedbackKind::Error => "erreur",
        };
        let _ = writeln!(out, "[{tag}] {}", notice.message);
    }
    if snapshot.loading {
        let _ = writeln!(out, "(chargement...)");
    }

    match &snapshot.body {
        BodySnapshot::Programs { rows } => {
            let _ = writeln!(out, "Filières:");
            numbered(&mut out, rows.iter().map(|row| row.label.as_str()));
        }
        BodySnapshot::Classes {
            program_label,
            rows,
            ..
        } => {
            let _ = writeln!(out, "Classes de {program_label}:");
            numbered(&mut out, rows.iter().map(|row| row.label.as_str()));
        }
        BodySnapshot::ClassDetail {
            class_label,
            program_label,
            level,
            tab,
            tabs,
            panel,
            ..
        } => {
            let _ = writeln!(out, "{class_label} ({program_label}, {level})");
            let selected = tab.title();
            let bar: Vec<String> = tabs
                .iter()
                .map(|title| {
                    if *title == selected {
                        format!("[{title}]")
                    } else {
                        (*title).to_string()
                    }
                })
                .collect();
            let _ = writeln!(out, "{}", bar.join(" | "));
            render_tab(&mut out, panel);
        }
        BodySnapshot::Section { title, notice } => {
            let _ = writeln!(out, "{title}: {notice}");
        }
    }

    if let Some(modal) = &snapshot.modal {
        let _ = writeln!(out, "formulaire ouvert: {}", modal_name(modal));
    }
    out
}

fn render_tab(out: &mut String, panel: &TabBody) {
    match panel {
        TabBody::Subjects {
            units,
            filter,
            subjects,
        } => {
            let _ = writeln!(out, "UE:");
            for (index, unit) in units.iter().enumerate() {
                let marker = if filter.as_ref() == Some(&unit.id) { "*" } else { " " };
                let _ = writeln!(out, " {marker}{}. {}", index + 1, unit.name);
            }
            if units.is_empty() {
                let _ = writeln!(out, "  (aucune)");
            }
            let _ = writeln!(out, "Matières:");
            for (index, subject) in subjects.iter().enumerate() {
                let _ = writeln!(out, "  {}. {} [{}]", index + 1, subject.label, subject.unit);
            }
            if subjects.is_empty() {
                let _ = writeln!(out, "  (aucune)");
            }
        }
        TabBody::Placeholder { title, notice } => {
            let _ = writeln!(out, "{title}: {notice}");
        }
    }
}

fn numbered<'a>(out: &mut String, labels: impl Iterator<Item = &'a str>) {
    let mut empty = true;
    for (index, label) in labels.enumerate() {
        empty = false;
        let _ = writeln!(out, "  {}. {label}", index + 1);
    }
    if empty {
        let _ = writeln!(out, "  (vide)");
    }
}

fn modal_name(modal: &ModalSnapshot) -> &'static str {
    match modal {
        ModalSnapshot::CreateProgram { .. } => "nouvelle filière",
        ModalSnapshot::EditProgram { .. } => "modifier la filière",
        ModalSnapshot::CreateClass { .. } => "nouvelle classe",
        ModalSnapshot::CreateSubject { .. } => "nouvelle matière",
        ModalSnapshot::EditSubject { .. } => "modifier la matière",
        ModalSnapshot::CreateTeachingUnit { .. } => "nouvelle UE",
    }
}
