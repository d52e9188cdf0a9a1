//! Login submission lifecycle.
//!
//! The controller owns the credential form and the authoritative
//! `SubmissionState`. State is mutated in exactly two places: `submit`
//! gates and dispatches an attempt, `resolve` applies the transport
//! outcome that comes back for it.

use tracing::{debug, info, warn};

use crate::form::CredentialForm;
use crate::identity::{Credentials, SessionIdentity};
use crate::transport::{AuthClient, AuthError};

/// User-facing failure categories for a rejected login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Username/password mismatch - correctable by the user
    InvalidCredentials,
    /// Credentials are right but the account is not usable yet
    AccountNotActivated,
    /// Anything else, including failures that carry no backend tag
    Unclassified,
}

impl ErrorCategory {
    /// Fixed message the view renders for this category.
    pub fn message(self) -> &'static str {
        match self {
            ErrorCategory::InvalidCredentials => "Check your username or password.",
            ErrorCategory::AccountNotActivated => "Account is not activated.",
            ErrorCategory::Unclassified => "Login failed (contact an administrator).",
        }
    }
}

/// Maps a transport failure to its user-facing category.
///
/// Closed, first-match switch on the backend exception tag. Failures
/// without a tag (network, timeout, unparseable body) fall through to
/// `Unclassified`.
pub fn classify(err: &AuthError) -> ErrorCategory {
    match err.backend_exception.as_deref() {
        Some("BadCredentialsException") => ErrorCategory::InvalidCredentials,
        Some("DisabledException") => ErrorCategory::AccountNotActivated,
        _ => ErrorCategory::Unclassified,
    }
}

/// One login attempt's lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Loading,
    Succeeded(SessionIdentity),
    Failed(ErrorCategory),
}

/// Identifier for a dispatched login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptId(u64);

#[derive(Debug, Default)]
struct AttemptSeq {
    next: u64,
}

impl AttemptSeq {
    fn next_id(&mut self) -> AttemptId {
        let id = AttemptId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Work handed back to the caller by an accepted `submit`.
#[derive(Debug)]
pub struct LoginAttempt {
    pub id: AttemptId,
    /// Snapshot taken at submit time; later form edits do not affect it.
    pub credentials: Credentials,
}

/// Outcome of a `submit` call.
#[derive(Debug)]
pub enum SubmitAction {
    /// Invalid form or a submission already in flight; state unchanged.
    Rejected,
    /// Transitioned to `Loading`; run the attempt and feed back `resolve`.
    Dispatch(LoginAttempt),
}

/// Drives the submission lifecycle and owns the authoritative state.
#[derive(Debug)]
pub struct SessionController {
    form: CredentialForm,
    state: SubmissionState,
    attempts: AttemptSeq,
    active: Option<AttemptId>,
}

impl SessionController {
    pub fn new(form: CredentialForm) -> Self {
        Self {
            form,
            state: SubmissionState::Idle,
            attempts: AttemptSeq::default(),
            active: None,
        }
    }

    pub fn form(&self) -> &CredentialForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CredentialForm {
        &mut self.form
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// The stored identity after a successful login, if any.
    pub fn identity(&self) -> Option<&SessionIdentity> {
        match &self.state {
            SubmissionState::Succeeded(identity) => Some(identity),
            _ => None,
        }
    }

    /// Attempts to start a submission.
    ///
    /// Always lowers the error-display gate. Rejects with no state change
    /// when the form is invalid or an attempt is already in flight; at
    /// most one transport call may be pending per controller.
    pub fn submit(&mut self) -> SubmitAction {
        self.form.mark_submitted();

        if !self.form.is_valid() {
            debug!("submission gated by invalid form");
            return SubmitAction::Rejected;
        }
        if matches!(self.state, SubmissionState::Loading) {
            debug!("submission rejected: attempt already in flight");
            return SubmitAction::Rejected;
        }

        let id = self.attempts.next_id();
        self.active = Some(id);
        self.state = SubmissionState::Loading;
        SubmitAction::Dispatch(LoginAttempt {
            id,
            credentials: self.form.credentials(),
        })
    }

    /// Applies a transport outcome.
    ///
    /// Outcomes for anything but the active attempt are dropped: a
    /// resolution arriving after the controller moved on must not
    /// mutate it.
    pub fn resolve(&mut self, attempt: AttemptId, outcome: Result<SessionIdentity, AuthError>) {
        if self.active != Some(attempt) {
            debug!(?attempt, "dropping stale login resolution");
            return;
        }
        self.active = None;

        match outcome {
            Ok(identity) => {
                info!(username = %identity.username, "login succeeded");
                self.form.clear_password();
                self.state = SubmissionState::Succeeded(identity);
            }
            Err(err) => {
                let category = classify(&err);
                warn!(%err, ?category, "login failed");
                self.state = SubmissionState::Failed(category);
            }
        }
    }

    /// Runs one full submit, transport, resolve cycle.
    ///
    /// The transport call is the single suspension point; attempt N+1
    /// cannot start until N has resolved.
    pub async fn submit_with(&mut self, client: &AuthClient) -> &SubmissionState {
        if let SubmitAction::Dispatch(attempt) = self.submit() {
            let outcome = client.login(&attempt.credentials).await;
            self.resolve(attempt.id, outcome);
        }
        self.state()
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(CredentialForm::default())
    }
}
