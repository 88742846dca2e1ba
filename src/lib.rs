//! Form sessions for the hiring platform's onboarding pages: client,
//! freelancer and admin login and registration.
//!
//! A [`FormSession`] holds the field values of one page, validates them
//! against the page's [`Flow`] rules, sends at most one request at a time to
//! the auth API and writes the returned credential to a [`CredentialStore`].
//! Rendering and routing belong to the host; the session publishes an
//! [`ErrorMap`], a [`SubmissionState`] and a [`NavigationIntent`] for it.

pub mod cli;
pub mod error;
pub mod form;
pub mod session;
pub mod storage;
pub mod trace;
pub mod transport;

pub use error::{FormError, StorageError};
pub use form::field_store::{FieldSnapshot, FieldValue, InputKind};
pub use form::flow::{Flow, Role};
pub use form::validator::{ErrorMap, SUBMIT_KEY, validate};
pub use session::controller::FormSession;
pub use session::session_model::{Credential, NavigationIntent, SubmissionState, SubmitAttempt};
pub use storage::{CredentialStore, FileStore, MemoryStore};
pub use transport::Transport;
pub use transport::http::HttpTransport;
pub use transport::request::{AuthRequest, TransportOutcome};
