//! Blocking confirmation prompts gating deletes.

pub const CONFIRM_DELETE_PROGRAM: &str = "Supprimer cette filière ?";
pub const CONFIRM_DELETE_CLASS: &str = "Supprimer cette classe ?";
pub const CONFIRM_DELETE_SUBJECT: &str = "Supprimer cette matière ?";

/// Yes/no prompt. Only an explicit `true` lets the operation proceed.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Prompt whose answer was collected by the shell before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetAnswer(pub bool);

impl ConfirmPrompt for PresetAnswer {
    fn confirm(&mut self, _message: &str) -> bool {
        self.0
    }
}
