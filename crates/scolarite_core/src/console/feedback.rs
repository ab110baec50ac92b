//! Transient operator notifications.
//!
//! # Invariants
//! - At most one notice per kind is active; a new notice of the same kind
//!   replaces the previous one.
//! - Notices older than the panel TTL are no longer reported.

use serde::Serialize;
use std::time::{Duration, Instant};

/// Default auto-hide delay.
pub const DEFAULT_FEEDBACK_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Success,
    Error,
}

/// Sink for operator notifications.
pub trait FeedbackChannel {
    fn show(&mut self, message: &str, kind: FeedbackKind);
}

/// One displayed notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: FeedbackKind,
    pub message: String,
    shown_at: Instant,
}

impl Notice {
    pub fn shown_at(&self) -> Instant {
        self.shown_at
    }
}

/// Notification panel holding one slot per kind.
#[derive(Debug, Clone)]
pub struct FeedbackPanel {
    ttl: Duration,
    success: Option<Notice>,
    error: Option<Notice>,
}

impl Default for FeedbackPanel {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK_TTL)
    }
}

impl FeedbackPanel {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            success: None,
            error: None,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Shows `message`, replacing any active notice of the same kind.
    pub fn show_at(&mut self, message: &str, kind: FeedbackKind, now: Instant) {
        *self.slot_mut(kind) = Some(Notice {
            kind,
            message: message.to_string(),
            shown_at: now,
        });
    }

    /// Active notice of `kind`, if any.
    pub fn current(&self, kind: FeedbackKind) -> Option<&Notice> {
        match kind {
            FeedbackKind::Success => self.success.as_ref(),
            FeedbackKind::Error => self.error.as_ref(),
        }
    }

    /// Active notices, success first.
    pub fn active(&self) -> impl Iterator<Item = &Notice> {
        self.success.iter().chain(self.error.iter())
    }

    /// Drops notices whose TTL elapsed at `now`.
    pub fn expire(&mut self, now: Instant) {
        let ttl = self.ttl;
        for slot in [&mut self.success, &mut self.error] {
            if slot
                .as_ref()
                .is_some_and(|notice| now.saturating_duration_since(notice.shown_at) >= ttl)
            {
                *slot = None;
            }
        }
    }

    pub fn dismiss(&mut self, kind: FeedbackKind) {
        *self.slot_mut(kind) = None;
    }

    fn slot_mut(&mut self, kind: FeedbackKind) -> &mut Option<Notice> {
        match kind {
            FeedbackKind::Success => &mut self.success,
            FeedbackKind::Error => &mut self.error,
        }
    }
}

impl FeedbackChannel for FeedbackPanel {
    fn show(&mut self, message: &str, kind: FeedbackKind) {
        self.show_at(message, kind, Instant::now());
    }
}
