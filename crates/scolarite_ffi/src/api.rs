//! Flutter-facing console API.
//!
//! # Responsibility
//! - Hold one console session per process and route operator actions to it.
//! - Return the rendered snapshot as JSON after every call.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Calls made before `console_open` fail with `ok=false` and no snapshot.
//! - Delete confirmations are answered by the shell before the call
//!   (`confirmed`), never asked from Rust.

use log::{info, warn};
use scolarite_core::console::host::Console;
use scolarite_core::console::prompt::PresetAnswer;
use scolarite_core::db::{open_db, open_db_in_memory};
use scolarite_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AcademicLevel, ClassTab, ConsoleConfig, ConsoleSection, FeedbackPanel, FormField,
    FormRequest, Outcome, SqliteCollectionRepository, TeachingUnitId,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};

const IN_MEMORY: &str = ":memory:";

type Session = Console<SqliteCollectionRepository>;

static SESSION: OnceLock<Mutex<Option<Session>>> = OnceLock::new();

/// Health check.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Starts file logging once per process.
///
/// Returns an empty string on success, the error message otherwise.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Result envelope of every console call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleResponse {
    /// `false` when the call itself was refused (no session, wrong screen,
    /// invalid argument). Store failures still answer `ok=true` with
    /// `outcome=failed`; the operator message is in the snapshot notices.
    pub ok: bool,
    /// `done|rejected|failed|cancelled`, empty when `ok=false`.
    pub outcome: String,
    pub message: String,
    /// Serialized `ConsoleSnapshot`; empty when no session is open.
    pub snapshot_json: String,
}

impl ConsoleResponse {
    fn refused(message: impl Into<String>, snapshot_json: String) -> Self {
        Self {
            ok: false,
            outcome: String::new(),
            message: message.into(),
            snapshot_json,
        }
    }
}

/// Opens (or reopens) the console on `db_path`.
///
/// An empty path falls back to `SCOLARITE_DB_PATH` or the temp-dir default;
/// `:memory:` opens a throwaway database.
#[flutter_rust_bridge::frb(sync)]
pub fn console_open(db_path: String) -> ConsoleResponse {
    let config = match ConsoleConfig::from_env() {
        Ok(config) => config,
        Err(err) => return ConsoleResponse::refused(format!("console_open failed: {err}"), String::new()),
    };
    let path = match db_path.trim() {
        "" => config.db_path.clone(),
        other => PathBuf::from(other),
    };

    let opened = if path.as_os_str() == IN_MEMORY {
        open_db_in_memory()
    } else {
        open_db(&path)
    };
    let repo = match opened
        .map_err(|err| err.to_string())
        .and_then(|conn| SqliteCollectionRepository::try_new(conn).map_err(|err| err.to_string()))
    {
        Ok(repo) => repo,
        Err(err) => {
            warn!("event=console_open module=ffi status=error error={err}");
            return ConsoleResponse::refused(format!("console_open failed: {err}"), String::new());
        }
    };

    let mut console = Console::mount(repo, FeedbackPanel::new(config.feedback_ttl()));
    let snapshot_json = render(&mut console);
    *lock_session() = Some(console);
    info!("event=console_open module=ffi status=ok");
    ConsoleResponse {
        ok: true,
        outcome: outcome_name(Outcome::Done).to_string(),
        message: String::new(),
        snapshot_json,
    }
}

/// Drops the session and its connection.
#[flutter_rust_bridge::frb(sync)]
pub fn console_close() -> bool {
    lock_session().take().is_some()
}

#[flutter_rust_bridge::frb(sync)]
pub fn console_snapshot() -> ConsoleResponse {
    with_console(|_| Ok(Outcome::Done))
}

#[flutter_rust_bridge::frb(sync)]
pub fn section_select(section: String) -> ConsoleResponse {
    with_console(|console| {
        let section = ConsoleSection::parse(&section)
            .ok_or_else(|| format!("unknown section `{section}`"))?;
        console.select_section(section);
        Ok(Outcome::Done)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn program_create(label: String) -> ConsoleResponse {
    with_console(|console| {
        let (view, mut ctx) = console.programs().map_err(|err| err.to_string())?;
        Ok(view.create(&mut ctx, &label))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn program_update(id: String, label: String) -> ConsoleResponse {
    with_console(|console| {
        let (view, mut ctx) = console.programs().map_err(|err| err.to_string())?;
        Ok(view.update(&mut ctx, &id.into(), &label))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn program_delete(id: String, confirmed: bool) -> ConsoleResponse {
    with_console(|console| {
        let (view, mut ctx) = console.programs().map_err(|err| err.to_string())?;
        Ok(view.delete(&mut ctx, &mut PresetAnswer(confirmed), &id.into()))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn program_open(id: String) -> ConsoleResponse {
    with_console(|console| console.open_program(&id.into()).map_err(|err| err.to_string()))
}

#[flutter_rust_bridge::frb(sync)]
pub fn programs_back() -> ConsoleResponse {
    with_console(|console| console.back_to_programs().map_err(|err| err.to_string()))
}

/// `level` accepts `Licence 2`, `L2` or `licence 2`.
#[flutter_rust_bridge::frb(sync)]
pub fn class_create(level: String) -> ConsoleResponse {
    with_console(|console| {
        let level =
            AcademicLevel::parse(&level).ok_or_else(|| format!("unknown level `{level}`"))?;
        let (view, mut ctx) = console.classes().map_err(|err| err.to_string())?;
        Ok(view.create(&mut ctx, level))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn class_delete(id: String, confirmed: bool) -> ConsoleResponse {
    with_console(|console| {
        let (view, mut ctx) = console.classes().map_err(|err| err.to_string())?;
        Ok(view.delete(&mut ctx, &mut PresetAnswer(confirmed), &id.into()))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn class_open(id: String) -> ConsoleResponse {
    with_console(|console| console.open_class(&id.into()).map_err(|err| err.to_string()))
}

#[flutter_rust_bridge::frb(sync)]
pub fn classes_back() -> ConsoleResponse {
    with_console(|console| console.back_to_classes().map_err(|err| err.to_string()))
}

#[flutter_rust_bridge::frb(sync)]
pub fn tab_change(tab: String) -> ConsoleResponse {
    with_console(|console| {
        let tab = ClassTab::parse(&tab).ok_or_else(|| format!("unknown tab `{tab}`"))?;
        console.change_tab(tab).map_err(|err| err.to_string())
    })
}

/// `None` or an empty id shows every subject.
#[flutter_rust_bridge::frb(sync)]
pub fn subjects_filter(unit_id: Option<String>) -> ConsoleResponse {
    with_console(|console| {
        let (panel, _) = console.subjects().map_err(|err| err.to_string())?;
        panel.set_unit_filter(unit_ref(unit_id));
        Ok(Outcome::Done)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn subject_create(label: String, unit_id: Option<String>) -> ConsoleResponse {
    with_console(|console| {
        let (panel, mut ctx) = console.subjects().map_err(|err| err.to_string())?;
        Ok(panel.create_subject(&mut ctx, &label, unit_ref(unit_id)))
    })
}

/// `unit_id` `None` clears the subject's unit.
#[flutter_rust_bridge::frb(sync)]
pub fn subject_update(id: String, label: String, unit_id: Option<String>) -> ConsoleResponse {
    with_console(|console| {
        let (panel, mut ctx) = console.subjects().map_err(|err| err.to_string())?;
        Ok(panel.update_subject(&mut ctx, &id.into(), &label, unit_ref(unit_id)))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn subject_delete(id: String, confirmed: bool) -> ConsoleResponse {
    with_console(|console| {
        let (panel, mut ctx) = console.subjects().map_err(|err| err.to_string())?;
        Ok(panel.delete_subject(&mut ctx, &mut PresetAnswer(confirmed), &id.into()))
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn teaching_unit_create(label: String, code: Option<String>) -> ConsoleResponse {
    with_console(|console| {
        let (panel, mut ctx) = console.subjects().map_err(|err| err.to_string())?;
        Ok(panel.create_teaching_unit(&mut ctx, &label, code.as_deref()))
    })
}

/// Opens a form on the mounted screen.
///
/// `kind` is the snapshot's modal kind (`create_program`, `edit_program`,
/// `create_class`, `create_subject`, `edit_subject`,
/// `create_teaching_unit`); edit forms take the record `id`.
#[flutter_rust_bridge::frb(sync)]
pub fn form_open(kind: String, id: Option<String>) -> ConsoleResponse {
    with_console(|console| {
        let request = form_request(&kind, id)?;
        console.open_form(request).map_err(|err| err.to_string())?;
        Ok(Outcome::Done)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn form_set_label(label: String) -> ConsoleResponse {
    edit_form(FormField::Label(label))
}

#[flutter_rust_bridge::frb(sync)]
pub fn form_set_code(code: String) -> ConsoleResponse {
    edit_form(FormField::Code(code))
}

#[flutter_rust_bridge::frb(sync)]
pub fn form_set_level(level: String) -> ConsoleResponse {
    match AcademicLevel::parse(&level) {
        Some(level) => edit_form(FormField::Level(level)),
        None => with_console(|_| Err(format!("unknown level `{level}`"))),
    }
}

/// `None` or an empty id clears the unit selector.
#[flutter_rust_bridge::frb(sync)]
pub fn form_set_unit(unit_id: Option<String>) -> ConsoleResponse {
    edit_form(FormField::Unit(unit_ref(unit_id)))
}

/// Submits the open form; `cancelled` when none is open.
#[flutter_rust_bridge::frb(sync)]
pub fn form_submit() -> ConsoleResponse {
    with_console(|console| console.submit_form().map_err(|err| err.to_string()))
}

#[flutter_rust_bridge::frb(sync)]
pub fn form_close() -> ConsoleResponse {
    with_console(|console| {
        console.close_form().map_err(|err| err.to_string())?;
        Ok(Outcome::Done)
    })
}

fn edit_form(field: FormField) -> ConsoleResponse {
    with_console(|console| {
        if console.edit_form(field).map_err(|err| err.to_string())? {
            Ok(Outcome::Done)
        } else {
            Err("no open form takes this field".to_string())
        }
    })
}

fn form_request(kind: &str, id: Option<String>) -> Result<FormRequest, String> {
    let id = id.map(|id| id.trim().to_string()).filter(|id| !id.is_empty());
    let required = |id: Option<String>| id.ok_or_else(|| format!("`{kind}` needs an id"));
    match kind.trim() {
        "create_program" => Ok(FormRequest::CreateProgram),
        "edit_program" => Ok(FormRequest::EditProgram(required(id)?.into())),
        "create_class" => Ok(FormRequest::CreateClass),
        "create_subject" => Ok(FormRequest::CreateSubject),
        "edit_subject" => Ok(FormRequest::EditSubject(required(id)?.into())),
        "create_teaching_unit" => Ok(FormRequest::CreateTeachingUnit),
        other => Err(format!("unknown form `{other}`")),
    }
}

fn lock_session() -> std::sync::MutexGuard<'static, Option<Session>> {
    SESSION
        .get_or_init(|| Mutex::new(None))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

fn with_console(f: impl FnOnce(&mut Session) -> Result<Outcome, String>) -> ConsoleResponse {
    let mut guard = lock_session();
    let Some(console) = guard.as_mut() else {
        return ConsoleResponse::refused("console is not open", String::new());
    };
    match f(console) {
        Ok(outcome) => ConsoleResponse {
            ok: true,
            outcome: outcome_name(outcome).to_string(),
            message: String::new(),
            snapshot_json: render(console),
        },
        Err(message) => {
            warn!("event=console_call module=ffi status=rejected error={message}");
            ConsoleResponse::refused(message, render(console))
        }
    }
}

fn render(console: &mut Session) -> String {
    serde_json::to_string(&console.snapshot()).unwrap_or_else(|err| {
        warn!("event=snapshot_encode module=ffi status=error error={err}");
        String::new()
    })
}

fn outcome_name(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Done => "done",
        Outcome::Rejected(_) => "rejected",
        Outcome::Failed => "failed",
        Outcome::Cancelled => "cancelled",
    }
}

fn unit_ref(unit_id: Option<String>) -> Option<TeachingUnitId> {
    unit_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .map(TeachingUnitId::from)
}
