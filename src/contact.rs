//! Contact form state. Submission is simulated: nothing leaves the browser.

use thiserror::Error;

pub const SIMULATED_SEND_MS: u32 = 1_500;
pub const RESET_AFTER_MS: u32 = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlintConfig {
    pub pool_capacity: usize,
    pub min_interval_ms: u32,
    pub glint_ms: u32,
}

impl Default for GlintConfig {
    fn default() -> Self {
        Self {
            pool_capacity: 10,
            min_interval_ms: 100,
            glint_ms: 1_000,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("name is required")]
    MissingName,
    #[error("email is required")]
    MissingEmail,
    #[error("email address looks invalid")]
    InvalidEmail,
    #[error("message is required")]
    MissingMessage,
}

impl ContactDraft {
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }

        let email = self.email.trim();
        if email.is_empty() {
            return Err(DraftError::MissingEmail);
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {}
            _ => return Err(DraftError::InvalidEmail),
        }

        if self.message.trim().is_empty() {
            return Err(DraftError::MissingMessage);
        }

        Ok(())
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Message => &mut self.message,
        }
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Message => &self.message,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Sending,
    Sent,
    Failed,
}

impl SubmitPhase {
    pub fn button_label(self) -> &'static str {
        match self {
            Self::Idle => "Send Message",
            Self::Sending => "Sending...",
            Self::Sent => "Message Sent!",
            Self::Failed => "Error! Try Again",
        }
    }

    pub fn button_disabled(self) -> bool {
        matches!(self, Self::Sending | Self::Sent)
    }

    /// A new submission may start from a resting or failed form.
    pub fn accepts_submit(self) -> bool {
        matches!(self, Self::Idle | Self::Failed)
    }

    /// Where the simulated send lands once its delay has elapsed.
    pub fn after_send(draft: &ContactDraft) -> Self {
        match draft.validate() {
            Ok(()) => Self::Sent,
            Err(_) => Self::Failed,
        }
    }
}

/// Ticket for one submit attempt. Only the newest ticket may move the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Submission(u64);

/// Submit button state shared by every in-flight send.
///
/// Each send holds the [`Submission`] it was started with; once a newer
/// submission begins, settling or resetting with the old ticket is ignored.
#[derive(Debug)]
pub struct SubmitFlow {
    phase: SubmitPhase,
    latest: u64,
}

impl Default for SubmitFlow {
    fn default() -> Self {
        Self {
            phase: SubmitPhase::Idle,
            latest: 0,
        }
    }
}

impl SubmitFlow {
    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn begin(&mut self) -> Option<Submission> {
        if !self.phase.accepts_submit() {
            return None;
        }

        self.latest += 1;
        self.phase = SubmitPhase::Sending;
        Some(Submission(self.latest))
    }

    /// Records the send outcome. Returns `false` for a stale ticket.
    pub fn settle(&mut self, submission: Submission, outcome: SubmitPhase) -> bool {
        if submission.0 != self.latest || self.phase != SubmitPhase::Sending {
            return false;
        }

        self.phase = outcome;
        true
    }

    /// Returns the form to `Idle`. Returns `false` for a stale ticket.
    pub fn reset(&mut self, submission: Submission) -> bool {
        if submission.0 != self.latest {
            return false;
        }

        self.phase = SubmitPhase::Idle;
        true
    }
}

/// Whether a field keeps its highlight after losing focus.
pub fn keeps_focus_style(value: &str) -> bool {
    !value.is_empty()
}
