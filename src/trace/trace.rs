use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    form::{flow::Flow, validator::ErrorMap},
    session::session_model::SubmissionState,
};

/// One line of the submission trace. Carries field names and status codes
/// only, never field values or credentials.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub flow: String,
    pub event: &'static str,

    pub state: String,
    pub ticket: Option<u64>,

    pub error_fields: Vec<String>,
    pub status: Option<u16>,
    pub note: Option<String>,
}

impl TraceEvent {
    pub fn now(flow: Flow, event: &'static str, state: &SubmissionState) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            flow: flow.to_string(),
            event,
            state: format!("{:?}", state),
            ticket: None,
            error_fields: vec![],
            status: None,
            note: None,
        }
    }

    pub fn with_ticket(mut self, ticket: u64) -> Self {
        self.ticket = Some(ticket);
        self
    }

    pub fn with_errors(mut self, errors: &ErrorMap) -> Self {
        self.error_fields = errors.fields().map(str::to_string).collect();
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_note(mut self, note: impl ToString) -> Self {
        self.note = Some(note.to_string());
        self
    }
}
