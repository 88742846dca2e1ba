use crate::{
    error::{FormResult, StorageError},
    form::{
        field_store::{FieldSnapshot, InputKind},
        flow::{Flow, FlowKind},
        validator::{ErrorMap, validate},
    },
    session::session_model::{
        Credential, NavigationIntent, PendingSubmission, Resolution, STORAGE_FAILURE_MESSAGE,
        SubmissionState, SubmitAttempt,
    },
    storage::{CredentialStore, REMEMBERED_EMAIL_KEY, ROLE_KEY, TOKEN_KEY},
    trace::{logger::TraceLogger, trace::TraceEvent},
    transport::{
        Transport,
        request::{AuthRequest, TransportOutcome, is_success, parse_auth_response, parse_error_message},
    },
};

const REMEMBER_FIELD: &str = "rememberMe";

/// Form session for one page: field values, validation and a single
/// in-flight submission.
///
/// The session does no I/O of its own. [`begin_submit`](Self::begin_submit)
/// hands out a [`PendingSubmission`]; the caller sends it and feeds the
/// outcome to [`resolve`](Self::resolve). [`submit`](Self::submit) does both
/// in one call with a [`Transport`].
pub struct FormSession<S: CredentialStore> {
    flow: Flow,
    snapshot: FieldSnapshot,
    errors: ErrorMap,
    state: SubmissionState,

    credential: Option<Credential>,
    intent: Option<NavigationIntent>,

    in_flight: Option<u64>,
    next_ticket: u64,

    storage: S,
    tracer: TraceLogger,
}

impl<S: CredentialStore> FormSession<S> {
    pub fn new(flow: Flow, storage: S) -> Self {
        Self {
            flow,
            snapshot: FieldSnapshot::new(flow),
            errors: ErrorMap::new(),
            state: SubmissionState::Idle,
            credential: None,
            intent: None,
            in_flight: None,
            next_ticket: 1,
            storage,
            tracer: TraceLogger::disabled(),
        }
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    // ---- Accessors ----

    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn snapshot(&self) -> &FieldSnapshot {
        &self.snapshot
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// The UI disables the submit button while this is false.
    pub fn can_submit(&self) -> bool {
        self.state.accepts_submit()
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn navigation_intent(&self) -> Option<NavigationIntent> {
        self.intent
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    // ---- Field events ----

    pub fn update(&mut self, field: &str, raw_value: &str, kind: InputKind) -> FormResult<&FieldSnapshot> {
        self.snapshot.update(field, raw_value, kind)
    }

    pub fn set_text(&mut self, field: &str, value: &str) -> FormResult<&FieldSnapshot> {
        self.snapshot.set_text(field, value)
    }

    pub fn set_toggle(&mut self, field: &str, checked: bool) -> FormResult<&FieldSnapshot> {
        self.snapshot.set_toggle(field, checked)
    }

    pub fn add_skill(&mut self, skill: &str) -> FormResult<&FieldSnapshot> {
        self.snapshot.add_skill(skill)
    }

    pub fn remove_skill(&mut self, skill: &str) -> FormResult<&FieldSnapshot> {
        self.snapshot.remove_skill(skill)
    }

    // ---- Submission ----

    /// Validate and, if clean, move to `Submitting` and hand out the request.
    pub fn begin_submit(&mut self) -> SubmitAttempt {
        match self.state {
            SubmissionState::Submitting => {
                self.trace(TraceEvent::now(self.flow, "suppressed", &self.state)
                    .with_note("request already in flight"));
                return SubmitAttempt::Busy;
            }
            SubmissionState::Succeeded => return SubmitAttempt::Finished,
            _ => {}
        }

        let errors = validate(&self.snapshot, self.flow);
        if !errors.is_empty() {
            self.state = SubmissionState::FailedValidation;
            self.trace(TraceEvent::now(self.flow, "validation_failed", &self.state).with_errors(&errors));
            tracing::debug!(flow = %self.flow, fields = errors.len(), "validation failed");
            self.errors = errors;
            return SubmitAttempt::Invalid;
        }

        let ticket = self.next_ticket;
        self.next_ticket += 1;

        self.errors.clear();
        self.credential = None;
        self.intent = None;
        self.state = SubmissionState::Submitting;
        self.in_flight = Some(ticket);
        self.trace(TraceEvent::now(self.flow, "dispatched", &self.state).with_ticket(ticket));

        SubmitAttempt::Dispatch(PendingSubmission {
            ticket,
            request: AuthRequest::from_snapshot(&self.snapshot),
        })
    }

    /// Apply the outcome of the request identified by `ticket`. Outcomes for
    /// anything but the outstanding ticket are dropped without mutation.
    pub fn resolve(&mut self, ticket: u64, outcome: TransportOutcome) -> Resolution {
        if self.in_flight != Some(ticket) {
            self.trace(TraceEvent::now(self.flow, "discarded", &self.state)
                .with_ticket(ticket)
                .with_note("stale response"));
            return Resolution::Discarded;
        }
        self.in_flight = None;

        match outcome {
            TransportOutcome::Unreachable { reason, server } => {
                tracing::warn!(flow = %self.flow, %reason, ?server, "auth server unreachable");
                let message = self.flow.descriptor().unreachable_message_for(server.as_deref());
                self.fail_request(ticket, message, None);
            }
            TransportOutcome::Response { status, body } if is_success(status) => {
                self.complete(ticket, status, &body);
            }
            TransportOutcome::Response { status, body } => {
                let message = parse_error_message(&body)
                    .unwrap_or_else(|| self.flow.descriptor().failure_message.to_string());
                tracing::info!(flow = %self.flow, status, "auth request rejected");
                self.fail_request(ticket, message, Some(status));
            }
        }

        Resolution::Applied(self.state)
    }

    /// Begin, send through `transport`, resolve. Returns the resulting state;
    /// when no request was started the state is unchanged.
    pub fn submit(&mut self, transport: &dyn Transport) -> SubmissionState {
        if let SubmitAttempt::Dispatch(pending) = self.begin_submit() {
            let outcome = transport.send(&pending.request);
            self.resolve(pending.ticket, outcome);
        }
        self.state
    }

    /// Abandon any outstanding request and return to `Idle`, dropping the
    /// credential and navigation intent of an earlier success. A late
    /// outcome for the abandoned ticket is discarded.
    pub fn reset(&mut self) {
        self.in_flight = None;
        self.errors.clear();
        self.credential = None;
        self.intent = None;
        self.state = SubmissionState::Idle;
    }

    fn complete(&mut self, ticket: u64, status: u16, body: &str) {
        let descriptor = self.flow.descriptor();
        let response = parse_auth_response(body);

        let Some(token) = response.token.filter(|t| !t.is_empty()) else {
            tracing::warn!(flow = %self.flow, status, "success response without a token");
            self.fail_request(ticket, descriptor.failure_message, Some(status));
            return;
        };

        let credential = Credential {
            token,
            role: response
                .role
                .unwrap_or_else(|| descriptor.role.as_label().to_string()),
        };

        if let Err(e) = self.persist(&credential) {
            tracing::error!(flow = %self.flow, error = %e, "failed to persist credentials");
            self.fail_request(ticket, STORAGE_FAILURE_MESSAGE, Some(status));
            return;
        }

        let intent = match descriptor.kind {
            FlowKind::Login => NavigationIntent::Dashboard {
                role: credential.role().unwrap_or(descriptor.role),
            },
            FlowKind::Registration => NavigationIntent::RegistrationConfirmed {
                role: descriptor.role,
            },
        };

        tracing::info!(flow = %self.flow, role = %credential.role, route = intent.route(), "submission succeeded");

        self.credential = Some(credential);
        self.intent = Some(intent);
        self.errors.clear();
        self.state = SubmissionState::Succeeded;
        self.trace(TraceEvent::now(self.flow, "resolved", &self.state)
            .with_ticket(ticket)
            .with_status(status));
    }

    /// Write every credential key or none of them. Keys written before a
    /// failing write are removed again.
    fn persist(&mut self, credential: &Credential) -> Result<(), StorageError> {
        let mut entries = vec![(TOKEN_KEY, credential.token.clone()), (ROLE_KEY, credential.role.clone())];
        if self.flow.is_login() && self.snapshot.toggle(REMEMBER_FIELD) {
            entries.push((REMEMBERED_EMAIL_KEY, self.snapshot.text("email").to_string()));
        }

        for (i, (key, value)) in entries.iter().enumerate() {
            if let Err(e) = self.storage.set(key, value) {
                for (written, _) in &entries[..i] {
                    if let Err(undo) = self.storage.remove(written) {
                        tracing::error!(flow = %self.flow, key = *written, error = %undo, "failed to roll back credential entry");
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }

    fn fail_request(&mut self, ticket: u64, message: impl Into<String>, status: Option<u16>) {
        self.errors = ErrorMap::submit(message);
        self.state = SubmissionState::FailedRequest;

        let mut event = TraceEvent::now(self.flow, "resolved", &self.state)
            .with_ticket(ticket)
            .with_errors(&self.errors);
        if let Some(status) = status {
            event = event.with_status(status);
        }
        self.trace(event);
    }

    fn trace(&self, event: TraceEvent) {
        self.tracer.log(&event);
    }
}
