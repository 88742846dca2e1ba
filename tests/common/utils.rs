use std::cell::RefCell;
use std::collections::VecDeque;

use onboarding_forms::{
    AuthRequest, CredentialStore, FieldSnapshot, Flow, FormSession, MemoryStore, StorageError,
    Transport, TransportOutcome,
};

// =========================================================================
// Transports
// =========================================================================

/// Replays canned outcomes in order and records every request it sees.
pub struct ScriptedTransport {
    outcomes: RefCell<VecDeque<TransportOutcome>>,
    pub sent: RefCell<Vec<AuthRequest>>,
}

impl ScriptedTransport {
    pub fn new(outcomes: Vec<TransportOutcome>) -> Self {
        Self {
            outcomes: RefCell::new(outcomes.into()),
            sent: RefCell::new(vec![]),
        }
    }

    pub fn ok(body: &str) -> Self {
        Self::new(vec![TransportOutcome::response(200, body)])
    }

    pub fn send_count(&self) -> usize {
        self.sent.borrow().len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &AuthRequest) -> TransportOutcome {
        self.sent.borrow_mut().push(request.clone());
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| TransportOutcome::unreachable("no scripted outcome"))
    }
}

// =========================================================================
// Stores
// =========================================================================

/// Store whose writes always fail.
pub struct BrokenStore;

impl CredentialStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io {
            path: key.to_string(),
            source: std::io::Error::other("disk full"),
        })
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

/// In-memory store that refuses writes to one key.
pub struct FailingKeyStore {
    pub inner: MemoryStore,
    failing_key: &'static str,
}

impl FailingKeyStore {
    pub fn new(failing_key: &'static str) -> Self {
        Self {
            inner: MemoryStore::new(),
            failing_key,
        }
    }
}

impl CredentialStore for FailingKeyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == self.failing_key {
            return Err(StorageError::Io {
                path: key.to_string(),
                source: std::io::Error::other("quota exceeded"),
            });
        }
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }
}

pub fn stored(session: &FormSession<MemoryStore>, key: &str) -> Option<String> {
    session.storage().get(key).unwrap()
}

// =========================================================================
// Field values
// =========================================================================

/// Text values that pass every rule of `flow`.
pub fn valid_values(flow: Flow) -> Vec<(&'static str, &'static str)> {
    match flow {
        Flow::ClientLogin | Flow::FreelancerLogin | Flow::AdminLogin => vec![
            ("email", "jane@example.com"),
            ("password", "longenough1"),
        ],
        Flow::ClientRegistration => vec![
            ("fullName", "Jane Doe"),
            ("email", "jane@example.com"),
            ("password", "longenough1"),
            ("companyName", "Acme Corp"),
            ("phoneNumber", "+1 555 0100"),
        ],
        Flow::FreelancerRegistration => vec![
            ("fullName", "Jane Doe"),
            ("email", "jane@example.com"),
            ("password", "longenough1"),
            ("confirmPassword", "longenough1"),
            ("professionalTitle", "Full Stack Developer"),
            ("phoneNumber", "+1 555 0100"),
            ("skills", "React, Node.js, Rust"),
            ("portfolioUrl", "https://jane.dev"),
        ],
        Flow::AdminRegistration => vec![
            ("fullName", "Jane Doe"),
            ("email", "jane@example.com"),
            ("password", "longenough1"),
            ("confirmPassword", "longenough1"),
            ("adminCode", "ADMIN-2024"),
            ("department", "Operations"),
        ],
    }
}

pub fn valid_snapshot(flow: Flow) -> FieldSnapshot {
    let mut snapshot = FieldSnapshot::new(flow);
    for (name, value) in valid_values(flow) {
        snapshot.set_text(name, value).unwrap();
    }
    if !flow.is_login() {
        snapshot.set_toggle("agreedToTerms", true).unwrap();
    }
    snapshot
}

pub fn valid_session(flow: Flow) -> FormSession<MemoryStore> {
    let mut session = FormSession::new(flow, MemoryStore::new());
    for (name, value) in valid_values(flow) {
        session.set_text(name, value).unwrap();
    }
    if !flow.is_login() {
        session.set_toggle("agreedToTerms", true).unwrap();
    }
    session
}
