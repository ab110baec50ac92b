//! Terminal driver for the director-of-studies console.
//!
//! Reads one command per line from stdin, applies it to the console and
//! prints the rendered screen after each command.

mod command;
mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{info, warn};

use command::{Command, UnitChoice, HELP};
use scolarite_core::console::host::Console;
use scolarite_core::console::prompt::ConfirmPrompt;
use scolarite_core::console::snapshot::{BodySnapshot, TabBody};
use scolarite_core::db::{open_db, open_db_in_memory};
use scolarite_core::{
    init_logging, ConsoleConfig, ConsoleSnapshot, DocumentId, FeedbackPanel,
    SqliteCollectionRepository, TeachingUnitId,
};

const IN_MEMORY: &str = ":memory:";

/// Manage programs, classes, teaching units and subjects.
#[derive(Parser)]
#[command(name = "scolarite", version, about = "Console de gestion des filières et classes")]
struct Cli {
    /// Database file; `:memory:` for a throwaway session.
    #[arg(long)]
    db: Option<PathBuf>,

    /// trace, debug, info, warn or error.
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

type Session = Console<SqliteCollectionRepository>;

fn main() {
    let cli = Cli::parse();
    let config = match resolve_config(cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration invalide: {err}");
            process::exit(2);
        }
    };

    if let Some(dir) = &config.log_dir {
        if let Err(err) = init_logging(&config.log_level, &dir.to_string_lossy()) {
            eprintln!("journalisation désactivée: {err}");
        }
    }

    let mut console = match open_console(&config) {
        Ok(console) => console,
        Err(err) => {
            eprintln!("ouverture impossible de {}: {err}", config.db_path.display());
            process::exit(1);
        }
    };
    info!(
        "event=cli_start module=cli status=ok db={}",
        config.db_path.display()
    );

    let code = run(&mut console);
    drop(console);
    log::logger().flush();
    process::exit(code);
}

fn resolve_config(cli: Cli) -> Result<ConsoleConfig, scolarite_core::ConfigError> {
    let mut config = ConsoleConfig::from_env()?;
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(dir) = cli.log_dir {
        config = config.with_log_dir(dir)?;
    }
    Ok(config)
}

fn open_console(config: &ConsoleConfig) -> Result<Session, String> {
    let conn = if config.db_path.as_os_str() == IN_MEMORY {
        open_db_in_memory()
    } else {
        open_db(&config.db_path)
    }
    .map_err(|err| err.to_string())?;
    let repo = SqliteCollectionRepository::try_new(conn).map_err(|err| err.to_string())?;
    Ok(Console::mount(
        repo,
        FeedbackPanel::new(config.feedback_ttl()),
    ))
}

/// Command loop; returns the process exit code.
fn run(console: &mut Session) -> i32 {
    let stdin = io::stdin();
    let mut screen = console.snapshot();
    print!("{}", render::render(&screen));

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        // The lock is released before a delete prompt reads stdin again.
        match stdin.lock().read_line(&mut line) {
            Ok(0) => return 0,
            Ok(_) => {}
            Err(err) => {
                eprintln!("lecture impossible: {err}");
                return 3;
            }
        }

        let command = match command::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        match command {
            Command::Quit => return 0,
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            other => {
                if let Err(message) = apply(console, &screen, other) {
                    warn!("event=cli_command module=cli status=rejected error={message}");
                    println!("{message}");
                }
            }
        }

        screen = console.snapshot();
        print!("{}", render::render(&screen));
    }
}

/// Applies `command` using `screen` to translate row numbers into ids.
fn apply(console: &mut Session, screen: &ConsoleSnapshot, command: Command) -> Result<(), String> {
    let mut prompt = StdinPrompt;
    match command {
        Command::Show | Command::Help | Command::Quit => {}
        Command::Section(section) => console.select_section(section),
        Command::Back => {
            let result = match screen.location {
                "class_detail" => console.back_to_classes(),
                _ => console.back_to_programs(),
            };
            result.map_err(|err| err.to_string())?;
        }
        Command::Open(n) => {
            let id = listed_row(screen, n)?;
            let result = match screen.location {
                "class_list" => console.open_class(&id),
                _ => console.open_program(&id),
            };
            result.map_err(|err| err.to_string())?;
        }
        Command::AddProgram(label) => {
            let (view, mut ctx) = console.programs().map_err(|err| err.to_string())?;
            view.create(&mut ctx, &label);
        }
        Command::RenameProgram(n, label) => {
            let id = listed_row(screen, n)?;
            let (view, mut ctx) = console.programs().map_err(|err| err.to_string())?;
            view.update(&mut ctx, &id, &label);
        }
        Command::DeleteProgram(n) => {
            let id = listed_row(screen, n)?;
            let (view, mut ctx) = console.programs().map_err(|err| err.to_string())?;
            view.delete(&mut ctx, &mut prompt, &id);
        }
        Command::AddClass(level) => {
            let (view, mut ctx) = console.classes().map_err(|err| err.to_string())?;
            view.create(&mut ctx, level);
        }
        Command::DeleteClass(n) => {
            let id = listed_row(screen, n)?;
            let (view, mut ctx) = console.classes().map_err(|err| err.to_string())?;
            view.delete(&mut ctx, &mut prompt, &id);
        }
        Command::Tab(tab) => {
            console.change_tab(tab).map_err(|err| err.to_string())?;
        }
        Command::Filter(unit) => {
            let unit = unit.map(|n| unit_row(screen, n)).transpose()?;
            let (panel, _) = console.subjects().map_err(|err| err.to_string())?;
            panel.set_unit_filter(unit);
        }
        Command::AddUnit { label, code } => {
            let (panel, mut ctx) = console.subjects().map_err(|err| err.to_string())?;
            panel.create_teaching_unit(&mut ctx, &label, code.as_deref());
        }
        Command::AddSubject { label, unit } => {
            let unit = unit.map(|n| unit_row(screen, n)).transpose()?;
            let (panel, mut ctx) = console.subjects().map_err(|err| err.to_string())?;
            panel.create_subject(&mut ctx, &label, unit);
        }
        Command::EditSubject { row, label, unit } => {
            let id = subject_row(screen, row)?;
            let chosen = match unit {
                UnitChoice::Row(n) => Some(Some(unit_row(screen, n)?)),
                UnitChoice::Clear => Some(None),
                UnitChoice::Keep => None,
            };
            let (panel, mut ctx) = console.subjects().map_err(|err| err.to_string())?;
            let unit = match chosen {
                Some(unit) => unit,
                None => panel
                    .subjects()
                    .iter()
                    .find(|subject| subject.id == id)
                    .ok_or_else(|| format!("matière {row} introuvable"))?
                    .teaching_unit_id
                    .clone(),
            };
            panel.update_subject(&mut ctx, &id, &label, unit);
        }
        Command::DeleteSubject(n) => {
            let id = subject_row(screen, n)?;
            let (panel, mut ctx) = console.subjects().map_err(|err| err.to_string())?;
            panel.delete_subject(&mut ctx, &mut prompt, &id);
        }
    }
    Ok(())
}

fn listed_row(screen: &ConsoleSnapshot, n: usize) -> Result<DocumentId, String> {
    let rows = match &screen.body {
        BodySnapshot::Programs { rows } | BodySnapshot::Classes { rows, .. } => rows,
        _ => return Err("aucune liste affichée".to_string()),
    };
    rows.get(n - 1)
        .map(|row| DocumentId::from(row.id.as_str()))
        .ok_or_else(|| format!("ligne {n} introuvable"))
}

fn subject_row(screen: &ConsoleSnapshot, n: usize) -> Result<DocumentId, String> {
    match &screen.body {
        BodySnapshot::ClassDetail {
            panel: TabBody::Subjects { subjects, .. },
            ..
        } => subjects
            .get(n - 1)
            .map(|row| row.id.clone())
            .ok_or_else(|| format!("matière {n} introuvable")),
        _ => Err("onglet Matières non affiché".to_string()),
    }
}

fn unit_row(screen: &ConsoleSnapshot, n: usize) -> Result<TeachingUnitId, String> {
    match &screen.body {
        BodySnapshot::ClassDetail {
            panel: TabBody::Subjects { units, .. },
            ..
        } => units
            .get(n - 1)
            .map(|unit| unit.id.clone())
            .ok_or_else(|| format!("UE {n} introuvable")),
        _ => Err("onglet Matières non affiché".to_string()),
    }
}

/// Asks on stdout and reads the answer from stdin; only `o`/`oui`/`y`/`yes`
/// confirm.
struct StdinPrompt;

impl ConfirmPrompt for StdinPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        print!("{message} [o/N] ");
        let _ = io::stdout().flush();
        let mut answer = String::new();
        if io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(
            answer.trim().to_lowercase().as_str(),
            "o" | "oui" | "y" | "yes"
        )
    }
}
