use thiserror::Error;

use crate::form::field_store::InputKind;

pub type FormResult<T> = Result<T, FormError>;

/// Programmer-facing errors. None of these are shown to the person filling
/// in the form; user-facing problems live in an `ErrorMap` instead.
#[derive(Debug, Error)]
pub enum FormError {
    /// Field name is not part of the flow's closed key set
    #[error("unknown field '{field}' for flow {flow}")]
    UnknownField { field: String, flow: String },

    /// Toggle event for a text field, or text event for a toggle
    #[error("field '{field}' expects {expected} input, got {got:?}")]
    KindMismatch {
        field: String,
        expected: &'static str,
        got: InputKind,
    },

    /// Flow name did not match any known flow
    #[error("unknown flow '{0}'")]
    UnknownFlow(String),

    /// Role label did not match any known role
    #[error("unknown role '{0}'")]
    UnknownRole(String),

    /// A fields file gave a bare number where text is expected
    #[error("field '{field}' has the unquoted number {value}; quote it so it is sent as written")]
    UnquotedNumber { field: String, value: String },
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage file {path} is not a JSON object: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
