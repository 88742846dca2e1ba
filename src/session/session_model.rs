use std::fmt;

use crate::form::flow::Role;
use crate::transport::request::AuthRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded,
    FailedValidation,
    FailedRequest,
}

impl SubmissionState {
    /// Whether a new submit may start from here.
    pub fn accepts_submit(&self) -> bool {
        matches!(
            self,
            SubmissionState::Idle | SubmissionState::FailedValidation | SubmissionState::FailedRequest
        )
    }
}

/// Bearer token and role label returned by a successful auth call.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    pub token: String,
    pub role: String,
}

impl Credential {
    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }
}

// Token stays out of logs and panic messages.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Where the router should go after success. The session only signals this;
/// it never navigates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    /// Login succeeded; open the role's dashboard
    Dashboard { role: Role },

    /// Registration succeeded; show the confirmation with a link to login
    RegistrationConfirmed { role: Role },
}

impl NavigationIntent {
    pub fn route(&self) -> &'static str {
        match self {
            NavigationIntent::Dashboard { role } => role.dashboard_route(),
            NavigationIntent::RegistrationConfirmed { role } => role.login_route(),
        }
    }
}

/// A request that has been handed out for sending. The ticket must be passed
/// back with the outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub ticket: u64,
    pub request: AuthRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAttempt {
    /// A request is already outstanding; nothing changed
    Busy,

    /// Already succeeded; nothing changed
    Finished,

    /// Validation failed; errors were published
    Invalid,

    /// Validation passed; send this request and resolve with its outcome
    Dispatch(PendingSubmission),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied(SubmissionState),

    /// Outcome did not belong to the outstanding request
    Discarded,
}

pub const STORAGE_FAILURE_MESSAGE: &str = "Signed in, but the credentials could not be saved.";
