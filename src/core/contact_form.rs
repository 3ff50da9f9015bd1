//! Contact form submission state machine.
//!
//! `Editing -> Validating -> {Invalid, Sending} -> {Sent, SendFailed}`.
//! `Invalid`, `Sent` and `SendFailed` go back to `Editing` on the next edit.
//!
//! Submission is split in two steps so the caller owns the suspension point:
//! [`ContactForm::submit`] validates and hands back a [`Dispatch`], the caller
//! awaits [`Dispatch::send`] and reports the outcome through
//! [`ContactForm::finish`]. While a dispatch is outstanding the form is in
//! `Sending`, inputs are read-only, further submits and resets are ignored.
//! Every dispatch is tagged with the submission it belongs to; an outcome
//! from any other submission is dropped by `finish`.

use crate::domain::model::{Profile, RelayPayload};
use crate::domain::ports::MailRelay;
use crate::utils::error::{PortfolioError, Result};
use crate::utils::validation::is_valid_email;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub const MIN_MESSAGE_CHARS: usize = 10;
pub const MESSAGE_COUNTER_MAX: usize = 500;
pub const DEFAULT_RELAY_TIMEOUT: Duration = Duration::from_secs(15);

pub const SUCCESS_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";
pub const FAILURE_MESSAGE: &str =
    "Failed to send message. Please try again or contact me directly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Subject,
        FormField::Message,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Subject => "Subject",
            FormField::Message => "Message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-field validation failure. Stays inside the form, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("is required")]
    RequiredField,
    #[error("has an invalid format")]
    InvalidFormat,
    #[error("must be at least {min} characters")]
    TooShort { min: usize },
    #[error("must be at most {max} characters")]
    TooLong { max: usize },
}

impl FieldError {
    /// Inline message shown under the field.
    pub fn message_for(&self, field: FormField) -> String {
        match self {
            FieldError::InvalidFormat if field == FormField::Email => {
                "Please enter a valid email".to_string()
            }
            other => format!("{} {}", field.label(), other),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    fn slot(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Subject => &mut self.subject,
            FormField::Message => &mut self.message,
        }
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Validating,
    Invalid,
    Sending,
    Sent,
    SendFailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLimits {
    pub min_message_chars: usize,
    pub max_message_chars: usize,
    /// 超過上限時是否視為驗證失敗 (預設只當作顯示用的計數器)
    pub enforce_max_message: bool,
}

impl Default for FormLimits {
    fn default() -> Self {
        Self {
            min_message_chars: MIN_MESSAGE_CHARS,
            max_message_chars: MESSAGE_COUNTER_MAX,
            enforce_max_message: false,
        }
    }
}

/// Runs every field validator; the map holds one entry per failed field.
pub fn validate_submission(
    submission: &ContactSubmission,
    limits: &FormLimits,
) -> BTreeMap<FormField, FieldError> {
    let mut errors = BTreeMap::new();

    if submission.name.trim().is_empty() {
        errors.insert(FormField::Name, FieldError::RequiredField);
    }

    let email = submission.email.trim();
    if email.is_empty() {
        errors.insert(FormField::Email, FieldError::RequiredField);
    } else if !is_valid_email(email) {
        errors.insert(FormField::Email, FieldError::InvalidFormat);
    }

    if submission.subject.trim().is_empty() {
        errors.insert(FormField::Subject, FieldError::RequiredField);
    }

    let message = submission.message.trim();
    let length = message.chars().count();
    if message.is_empty() {
        errors.insert(FormField::Message, FieldError::RequiredField);
    } else if length < limits.min_message_chars {
        errors.insert(
            FormField::Message,
            FieldError::TooShort {
                min: limits.min_message_chars,
            },
        );
    } else if limits.enforce_max_message && length > limits.max_message_chars {
        errors.insert(
            FormField::Message,
            FieldError::TooLong {
                max: limits.max_message_chars,
            },
        );
    }

    errors
}

#[derive(Debug)]
pub enum SubmitAction {
    /// Validation failed; the listed fields carry errors.
    Rejected(Vec<FormField>),
    /// A submission is already in flight.
    Ignored,
    Dispatch(Dispatch),
}

/// One accepted submission waiting to be handed to the relay.
#[derive(Debug, Clone)]
pub struct Dispatch {
    submission: u64,
    payload: RelayPayload,
    timeout: Duration,
}

impl Dispatch {
    /// Sequence number of the submission this dispatch belongs to.
    pub fn submission(&self) -> u64 {
        self.submission
    }

    /// Calls the relay once, bounded by the form's relay timeout.
    pub async fn send<R: MailRelay + ?Sized>(self, relay: &R) -> DispatchOutcome {
        let result = match tokio::time::timeout(self.timeout, relay.send(&self.payload)).await {
            Ok(result) => result,
            Err(_) => Err(PortfolioError::dispatch(format!(
                "relay did not answer within {:?}",
                self.timeout
            ))),
        };
        DispatchOutcome {
            submission: self.submission,
            result,
        }
    }
}

/// Relay result of one dispatch, handed back to [`ContactForm::finish`].
#[derive(Debug)]
pub struct DispatchOutcome {
    submission: u64,
    result: Result<()>,
}

impl DispatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug)]
pub struct ContactForm {
    to_email: String,
    fields: ContactSubmission,
    errors: BTreeMap<FormField, FieldError>,
    state: FormState,
    limits: FormLimits,
    relay_timeout: Duration,
    history: Vec<FormState>,
    last_failure: Option<String>,
    submission: u64,
}

impl ContactForm {
    pub fn new(to_email: impl Into<String>) -> Self {
        Self {
            to_email: to_email.into(),
            fields: ContactSubmission::default(),
            errors: BTreeMap::new(),
            state: FormState::Editing,
            limits: FormLimits::default(),
            relay_timeout: DEFAULT_RELAY_TIMEOUT,
            history: vec![FormState::Editing],
            last_failure: None,
            submission: 0,
        }
    }

    pub fn for_profile(profile: &Profile) -> Self {
        Self::new(profile.email.clone())
    }

    pub fn with_limits(mut self, limits: FormLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_relay_timeout(mut self, timeout: Duration) -> Self {
        self.relay_timeout = timeout;
        self
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// Every state entered since the form was created, in order.
    pub fn history(&self) -> &[FormState] {
        &self.history
    }

    pub fn fields(&self) -> &ContactSubmission {
        &self.fields
    }

    pub fn value(&self, field: FormField) -> &str {
        self.fields.get(field)
    }

    pub fn errors(&self) -> &BTreeMap<FormField, FieldError> {
        &self.errors
    }

    pub fn error(&self, field: FormField) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    pub fn error_message(&self, field: FormField) -> Option<String> {
        self.error(field).map(|e| e.message_for(field))
    }

    pub fn is_read_only(&self) -> bool {
        self.state == FormState::Sending
    }

    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    pub fn message_counter(&self) -> String {
        format!(
            "{}/{}",
            self.fields.message.chars().count(),
            self.limits.max_message_chars
        )
    }

    pub fn status_message(&self) -> Option<&'static str> {
        match self.state {
            FormState::Sent => Some(SUCCESS_MESSAGE),
            FormState::SendFailed => Some(FAILURE_MESSAGE),
            _ => None,
        }
    }

    /// Updates one field and clears only that field's error.
    /// Returns `false` when the form is read-only.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) -> bool {
        if self.is_read_only() {
            tracing::debug!("Ignoring edit of {} while sending", field);
            return false;
        }

        *self.fields.slot(field) = value.into();
        self.errors.remove(&field);

        if matches!(
            self.state,
            FormState::Invalid | FormState::Sent | FormState::SendFailed
        ) {
            self.transition(FormState::Editing);
        }
        true
    }

    pub fn submit(&mut self) -> SubmitAction {
        if self.state == FormState::Sending {
            tracing::debug!("Submit ignored: a message is already being sent");
            return SubmitAction::Ignored;
        }

        self.transition(FormState::Validating);
        let snapshot = self.fields.clone();
        let errors = validate_submission(&snapshot, &self.limits);

        if !errors.is_empty() {
            let failed: Vec<FormField> = errors.keys().copied().collect();
            tracing::debug!("Contact form rejected, {} field error(s)", failed.len());
            self.errors = errors;
            self.transition(FormState::Invalid);
            return SubmitAction::Rejected(failed);
        }

        self.errors.clear();
        self.last_failure = None;
        self.submission += 1;
        self.transition(FormState::Sending);

        let payload = RelayPayload {
            from_name: snapshot.name.trim().to_string(),
            from_email: snapshot.email.trim().to_string(),
            subject: snapshot.subject.trim().to_string(),
            message: snapshot.message.trim().to_string(),
            to_email: self.to_email.clone(),
        };
        tracing::info!("📨 Sending contact message from {}", payload.from_email);

        SubmitAction::Dispatch(Dispatch {
            submission: self.submission,
            payload,
            timeout: self.relay_timeout,
        })
    }

    /// Applies the relay outcome of the outstanding dispatch. Outcomes of any
    /// other submission, or arriving when nothing is outstanding, are dropped.
    pub fn finish(&mut self, outcome: DispatchOutcome) -> FormState {
        if self.state != FormState::Sending {
            tracing::warn!("Relay outcome arrived while form is {:?}, ignoring", self.state);
            return self.state;
        }
        if outcome.submission != self.submission {
            tracing::warn!(
                "Stale relay outcome for submission #{} (current #{}), ignoring",
                outcome.submission,
                self.submission
            );
            return self.state;
        }

        match outcome.result {
            Ok(()) => {
                tracing::info!("✅ Contact message delivered");
                self.fields = ContactSubmission::default();
                self.transition(FormState::Sent);
            }
            Err(e) => {
                // 保留使用者輸入，讓使用者可以重試
                tracing::warn!("❌ Contact message failed: {}", e);
                self.last_failure = Some(e.to_string());
                self.transition(FormState::SendFailed);
            }
        }
        self.state
    }

    /// Validate, dispatch and apply the result in one call.
    pub async fn submit_with<R: MailRelay + ?Sized>(&mut self, relay: &R) -> FormState {
        match self.submit() {
            SubmitAction::Dispatch(dispatch) => {
                let outcome = dispatch.send(relay).await;
                self.finish(outcome)
            }
            SubmitAction::Rejected(_) | SubmitAction::Ignored => self.state,
        }
    }

    /// Drops everything the user typed, e.g. when navigating away.
    /// Returns `false` while a dispatch is outstanding; nothing is cleared.
    pub fn reset(&mut self) -> bool {
        if self.is_read_only() {
            tracing::debug!("Reset ignored: a message is being sent");
            return false;
        }
        self.fields = ContactSubmission::default();
        self.errors.clear();
        self.last_failure = None;
        self.transition(FormState::Editing);
        true
    }

    fn transition(&mut self, next: FormState) {
        if self.state != next {
            tracing::debug!("Contact form {:?} -> {:?}", self.state, next);
            self.state = next;
            self.history.push(next);
        }
    }
}
