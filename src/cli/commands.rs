use std::collections::BTreeMap;

use serde::Deserialize;

use crate::cli::config::Settings;
use crate::error::{FormError, FormResult};
use crate::form::flow::{FieldKind, Flow};
use crate::form::validator::{ErrorMap, validate};
use crate::session::controller::FormSession;
use crate::session::session_model::SubmissionState;
use crate::storage::{CredentialStore, FileStore, MemoryStore};
use crate::trace::logger::TraceLogger;
use crate::transport::http::HttpTransport;

// ============================================================================
// Fields file
// ============================================================================

/// A value in a fields file. Bare numbers are parsed only to be rejected;
/// text fields take quoted strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldInput {
    Toggle(bool),
    Number(serde_yaml::Number),
    Text(String),
}

pub type FieldsFile = BTreeMap<String, FieldInput>;

pub fn parse_fields(content: &str) -> Result<FieldsFile, serde_yaml::Error> {
    serde_yaml::from_str(content)
}

pub fn load_fields(path: &str) -> Result<FieldsFile, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read fields file '{}': {}", path, e))?;
    Ok(parse_fields(&content)?)
}

/// Replay a fields file as change events on `session`.
pub fn apply_fields<S: CredentialStore>(session: &mut FormSession<S>, fields: &FieldsFile) -> FormResult<()> {
    for (name, value) in fields {
        match value {
            FieldInput::Toggle(checked) => session.set_toggle(name, *checked)?,
            FieldInput::Number(n) => {
                return Err(FormError::UnquotedNumber {
                    field: name.clone(),
                    value: n.to_string(),
                });
            }
            FieldInput::Text(s) => session.set_text(name, s)?,
        };
    }
    Ok(())
}

// ============================================================================
// flows subcommand
// ============================================================================

pub fn cmd_flows() {
    for flow in Flow::ALL {
        let descriptor = flow.descriptor();
        println!("{} (POST {})", flow, descriptor.endpoint);
        for spec in descriptor.fields {
            let kind = match spec.kind {
                FieldKind::Text => "text",
                FieldKind::Toggle => "toggle",
            };
            println!("  - {} [{}]", spec.name, kind);
        }
    }
}

// ============================================================================
// validate subcommand
// ============================================================================

/// Validate a fields file and return whether it is clean.
pub fn cmd_validate(flow_name: &str, fields_path: &str) -> Result<bool, Box<dyn std::error::Error>> {
    let flow: Flow = flow_name.parse()?;
    let fields = load_fields(fields_path)?;

    let mut session = FormSession::new(flow, MemoryStore::new());
    apply_fields(&mut session, &fields)?;

    let errors = validate(session.snapshot(), flow);
    if errors.is_empty() {
        println!("{}: all fields valid", flow);
        return Ok(true);
    }

    print_errors(&errors);
    Ok(false)
}

// ============================================================================
// submit subcommand
// ============================================================================

/// Submit a fields file and return whether the submission succeeded.
pub fn cmd_submit(
    flow_name: &str,
    fields_path: &str,
    settings: &Settings,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let flow: Flow = flow_name.parse()?;
    let fields = load_fields(fields_path)?;

    let transport = HttpTransport::new(&settings.base_url, settings.timeout)?;
    let tracer = match &settings.trace_path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    let mut session = FormSession::new(flow, FileStore::new(&settings.storage_path)).with_tracer(tracer);
    apply_fields(&mut session, &fields)?;

    if verbose > 0 {
        eprintln!("Submitting {} to {}...", flow, transport.base_url());
    }

    match session.submit(&transport) {
        SubmissionState::Succeeded => {
            let role = session.credential().map(|c| c.role.as_str()).unwrap_or_default();
            println!("{}: succeeded (role {})", flow, role);
            if let Some(intent) = session.navigation_intent() {
                println!("Next: {}", intent.route());
            }
            println!("Credentials stored in {}", settings.storage_path.display());
            Ok(true)
        }
        state => {
            println!("{}: {:?}", flow, state);
            print_errors(session.errors());
            Ok(false)
        }
    }
}

fn print_errors(errors: &ErrorMap) {
    for (field, message) in errors.iter() {
        println!("  {}: {}", field, message);
    }
}
