//! Line commands accepted on stdin.
//!
//! Row numbers are 1-based and refer to the listing printed last.
//! Optional trailing fields are separated by `|`, e.g.
//! `add-subject Algo | 1` or `add-unit UE1 | U101`. On `edit-subject` an
//! omitted unit keeps the current one and `| -` clears it.

use scolarite_core::{AcademicLevel, ClassTab, ConsoleSection};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Show,
    Quit,
    Back,
    Open(usize),
    Section(ConsoleSection),
    AddProgram(String),
    RenameProgram(usize, String),
    DeleteProgram(usize),
    AddClass(AcademicLevel),
    DeleteClass(usize),
    Tab(ClassTab),
    /// `None` clears the filter.
    Filter(Option<usize>),
    AddUnit { label: String, code: Option<String> },
    AddSubject { label: String, unit: Option<usize> },
    EditSubject { row: usize, label: String, unit: UnitChoice },
    DeleteSubject(usize),
}

/// Unit field of `edit-subject`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitChoice {
    Keep,
    Clear,
    Row(usize),
}

pub const HELP: &str = "\
commandes:
  show | help | quit
  section <structure|presences|etudiants|professeurs|evaluations>
  open <n> | back
  add-program <libellé> | rename-program <n> <libellé> | delete-program <n>
  add-class <L1..M2> | delete-class <n>
  tab <matieres|emploi|bulletin>
  add-unit <libellé> [| code] | filter <n|all>
  add-subject <libellé> [| ue] | delete-subject <n>
  edit-subject <n> <libellé> [| ue|-]  (sans ue: inchangée, -: aucune)";

/// Parses one input line; blank lines parse to `Show`.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "" | "show" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "back" => Ok(Command::Back),
        "open" => Ok(Command::Open(row(rest)?)),
        "section" => ConsoleSection::parse(rest)
            .map(Command::Section)
            .ok_or_else(|| format!("section inconnue `{rest}`")),
        "add-program" => Ok(Command::AddProgram(rest.to_string())),
        "rename-program" => {
            let (n, label) = row_and_text(rest)?;
            Ok(Command::RenameProgram(n, label))
        }
        "delete-program" => Ok(Command::DeleteProgram(row(rest)?)),
        "add-class" => AcademicLevel::parse(rest)
            .map(Command::AddClass)
            .ok_or_else(|| format!("niveau inconnu `{rest}`")),
        "delete-class" => Ok(Command::DeleteClass(row(rest)?)),
        "tab" => ClassTab::parse(rest)
            .map(Command::Tab)
            .ok_or_else(|| format!("onglet inconnu `{rest}`")),
        "filter" => match rest {
            "" | "all" | "toutes" => Ok(Command::Filter(None)),
            other => Ok(Command::Filter(Some(row(other)?))),
        },
        "add-unit" => {
            let (label, code) = split_optional(rest);
            Ok(Command::AddUnit {
                label: label.to_string(),
                code: code.map(str::to_string),
            })
        }
        "add-subject" => {
            let (label, unit) = split_optional(rest);
            let unit = match unit_choice(unit)? {
                UnitChoice::Row(n) => Some(n),
                UnitChoice::Keep | UnitChoice::Clear => None,
            };
            Ok(Command::AddSubject {
                label: label.to_string(),
                unit,
            })
        }
        "edit-subject" => {
            let (head, unit) = split_optional(rest);
            let (n, label) = row_and_text(head)?;
            Ok(Command::EditSubject {
                row: n,
                label,
                unit: unit_choice(unit)?,
            })
        }
        "delete-subject" => Ok(Command::DeleteSubject(row(rest)?)),
        other => Err(format!("commande inconnue `{other}` (help)")),
    }
}

fn row(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("numéro de ligne attendu, reçu `{}`", value.trim())),
    }
}

fn unit_choice(value: Option<&str>) -> Result<UnitChoice, String> {
    match value {
        None => Ok(UnitChoice::Keep),
        Some("-" | "aucune" | "none") => Ok(UnitChoice::Clear),
        Some(n) => row(n).map(UnitChoice::Row),
    }
}

fn row_and_text(value: &str) -> Result<(usize, String), String> {
    let (n, text) = value.split_once(char::is_whitespace).unwrap_or((value, ""));
    Ok((row(n)?, text.trim().to_string()))
}

fn split_optional(value: &str) -> (&str, Option<&str>) {
    match value.split_once('|') {
        Some((head, tail)) => (head.trim(), Some(tail.trim()).filter(|t| !t.is_empty())),
        None => (value.trim(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse, Command, UnitChoice};
    use scolarite_core::{AcademicLevel, ClassTab};

    #[test]
    fn parses_navigation_and_listing_commands() {
        assert_eq!(parse("  "), Ok(Command::Show));
        assert_eq!(parse("open 2"), Ok(Command::Open(2)));
        assert_eq!(parse("tab bulletin"), Ok(Command::Tab(ClassTab::ReportCardTemplate)));
        assert_eq!(parse("add-class L2"), Ok(Command::AddClass(AcademicLevel::Licence2)));
        assert_eq!(parse("filter all"), Ok(Command::Filter(None)));
    }

    #[test]
    fn keeps_label_text_and_optional_fields() {
        assert_eq!(
            parse("add-program Sciences de gestion"),
            Ok(Command::AddProgram("Sciences de gestion".to_string()))
        );
        assert_eq!(
            parse("add-unit UE1 | U101"),
            Ok(Command::AddUnit {
                label: "UE1".to_string(),
                code: Some("U101".to_string())
            })
        );
        assert_eq!(
            parse("edit-subject 1 Algorithmique"),
            Ok(Command::EditSubject {
                row: 1,
                label: "Algorithmique".to_string(),
                unit: UnitChoice::Keep
            })
        );
        assert_eq!(
            parse("edit-subject 1 Algorithmique | -"),
            Ok(Command::EditSubject {
                row: 1,
                label: "Algorithmique".to_string(),
                unit: UnitChoice::Clear
            })
        );
        assert_eq!(
            parse("edit-subject 1 Algorithmique | 2"),
            Ok(Command::EditSubject {
                row: 1,
                label: "Algorithmique".to_string(),
                unit: UnitChoice::Row(2)
            })
        );
        assert_eq!(
            parse("add-subject Algo | 1"),
            Ok(Command::AddSubject {
                label: "Algo".to_string(),
                unit: Some(1)
            })
        );
    }

    #[test]
    fn rejects_bad_rows_and_unknown_verbs() {
        assert!(parse("open 0").is_err());
        assert!(parse("open x").is_err());
        assert!(parse("delete-everything").is_err());
        assert!(parse("add-class Doctorat").is_err());
    }
}
