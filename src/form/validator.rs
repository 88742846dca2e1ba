use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::form::field_store::{FieldSnapshot, skills_list};
use crate::form::flow::{FieldRule, Flow};

/// Key used for request-level (not field-level) failures.
pub const SUBMIT_KEY: &str = "submit";

// Coarse shape checks, intentionally loose.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));
static URL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://.+").expect("url pattern compiles"));

/// Field name (or `submit`) to user-facing message. Empty means no errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorMap(BTreeMap<String, String>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map holding only a request-level failure.
    pub fn submit(message: impl Into<String>) -> Self {
        let mut map = Self::new();
        map.insert(SUBMIT_KEY, message);
        map
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Check every field of `snapshot` against the rules of `flow`.
///
/// Pure and deterministic. All fields are checked; for a single field the
/// first failing rule wins (a missing email is reported as required, not as
/// malformed).
pub fn validate(snapshot: &FieldSnapshot, flow: Flow) -> ErrorMap {
    let mut errors = ErrorMap::new();

    for spec in flow.descriptor().fields {
        if let Some(message) = check_rule(spec.rule, spec.name, snapshot) {
            errors.insert(spec.name, message);
        }
    }

    errors
}

fn check_rule(rule: FieldRule, name: &str, snapshot: &FieldSnapshot) -> Option<&'static str> {
    let value = snapshot.text(name);

    match rule {
        FieldRule::Required(message) => value.trim().is_empty().then_some(message),

        FieldRule::Email => {
            if value.trim().is_empty() {
                Some("Email is required")
            } else if !EMAIL_SHAPE.is_match(value) {
                Some("Email is invalid")
            } else {
                None
            }
        }

        FieldRule::Password { min_len } => {
            if value.is_empty() {
                Some("Password is required")
            } else if min_len.is_some_and(|min| value.chars().count() < min) {
                Some("Password must be at least 8 characters")
            } else {
                None
            }
        }

        FieldRule::ConfirmPassword => {
            if value.is_empty() {
                Some("Please confirm your password")
            } else if value != snapshot.text("password") {
                Some("Passwords do not match")
            } else {
                None
            }
        }

        FieldRule::Skills { min_distinct } => {
            if value.trim().is_empty() {
                Some("Please add at least one skill")
            } else if distinct_skills(value) < min_distinct {
                Some("Please add at least 3 skills")
            } else {
                None
            }
        }

        FieldRule::OptionalUrl => {
            (!value.is_empty() && !URL_SHAPE.is_match(value))
                .then_some("Please enter a valid URL (http:// or https://)")
        }

        FieldRule::MustAgree => {
            (!snapshot.toggle(name)).then_some("You must agree to the terms and conditions")
        }

        FieldRule::Unchecked => None,
    }
}

fn distinct_skills(raw: &str) -> usize {
    skills_list(raw).into_iter().collect::<HashSet<_>>().len()
}
