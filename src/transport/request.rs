use serde::Deserialize;
use serde_json::{Map, Value};

use crate::form::field_store::{FieldSnapshot, FieldValue};
use crate::form::flow::Flow;

/// One POST to the auth API: endpoint path plus JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthRequest {
    pub flow: Flow,
    pub path: &'static str,
    pub body: Value,
}

impl AuthRequest {
    /// Build the request body from the fields the flow sends on the wire.
    /// Text values go out verbatim, toggles as JSON booleans.
    pub fn from_snapshot(snapshot: &FieldSnapshot) -> Self {
        let flow = snapshot.flow();
        let descriptor = flow.descriptor();

        let body: Map<String, Value> = descriptor
            .fields
            .iter()
            .filter(|spec| spec.sent)
            .filter_map(|spec| {
                let value = match snapshot.get(spec.name)? {
                    FieldValue::Text(s) => Value::String(s.clone()),
                    FieldValue::Toggle(b) => Value::Bool(*b),
                };
                Some((spec.name.to_string(), value))
            })
            .collect();

        Self {
            flow,
            path: descriptor.endpoint,
            body: Value::Object(body),
        }
    }
}

/// What came back from a single exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportOutcome {
    /// Any HTTP response, successful or not
    Response { status: u16, body: String },

    /// No response at all (connection refused, DNS, timeout). `server` is the
    /// base URL that was tried, when the transport knows it.
    Unreachable { reason: String, server: Option<String> },
}

impl TransportOutcome {
    pub fn response(status: u16, body: impl Into<String>) -> Self {
        TransportOutcome::Response {
            status,
            body: body.into(),
        }
    }

    pub fn unreachable(reason: impl Into<String>) -> Self {
        TransportOutcome::Unreachable {
            reason: reason.into(),
            server: None,
        }
    }

    pub fn unreachable_at(reason: impl Into<String>, server: impl Into<String>) -> Self {
        TransportOutcome::Unreachable {
            reason: reason.into(),
            server: Some(server.into()),
        }
    }
}

/// Success body of every auth endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Error body of a rejected request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Lenient parse: a malformed body reads as an empty one.
pub fn parse_auth_response(body: &str) -> AuthResponse {
    serde_json::from_str(body).unwrap_or_default()
}

/// Server-supplied message, if the body carried a non-blank one.
pub fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()?
        .message
        .filter(|m| !m.trim().is_empty())
}
