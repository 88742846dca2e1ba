use std::collections::BTreeMap;

use crate::error::{FormError, FormResult};
use crate::form::flow::{FieldKind, Flow};

/// Stored value of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Toggle(bool),
}

/// Type of the input that produced a change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Toggle { checked: bool },
}

/// Current values of a form, keyed by field name. The key set is fixed by the
/// flow when the snapshot is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSnapshot {
    flow: Flow,
    values: BTreeMap<&'static str, FieldValue>,
}

impl FieldSnapshot {
    /// Every declared field starts empty: `""` for text, `false` for toggles.
    pub fn new(flow: Flow) -> Self {
        let values = flow
            .descriptor()
            .fields
            .iter()
            .map(|spec| {
                let empty = match spec.kind {
                    FieldKind::Text => FieldValue::Text(String::new()),
                    FieldKind::Toggle => FieldValue::Toggle(false),
                };
                (spec.name, empty)
            })
            .collect();

        Self { flow, values }
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    /// Apply a change event. Toggles store the checked state, text inputs
    /// store `raw_value` verbatim.
    pub fn update(&mut self, field: &str, raw_value: &str, kind: InputKind) -> FormResult<&Self> {
        let spec = self
            .flow
            .descriptor()
            .field(field)
            .ok_or_else(|| FormError::UnknownField {
                field: field.to_string(),
                flow: self.flow.to_string(),
            })?;

        let value = match (spec.kind, kind) {
            (FieldKind::Text, InputKind::Text) => FieldValue::Text(raw_value.to_string()),
            (FieldKind::Toggle, InputKind::Toggle { checked }) => FieldValue::Toggle(checked),
            (FieldKind::Text, got) => {
                return Err(FormError::KindMismatch {
                    field: field.to_string(),
                    expected: "text",
                    got,
                });
            }
            (FieldKind::Toggle, got) => {
                return Err(FormError::KindMismatch {
                    field: field.to_string(),
                    expected: "toggle",
                    got,
                });
            }
        };

        self.values.insert(spec.name, value);
        Ok(self)
    }

    /// Shorthand for a text change event.
    pub fn set_text(&mut self, field: &str, value: &str) -> FormResult<&Self> {
        self.update(field, value, InputKind::Text)
    }

    /// Shorthand for a checkbox change event.
    pub fn set_toggle(&mut self, field: &str, checked: bool) -> FormResult<&Self> {
        self.update(field, "", InputKind::Toggle { checked })
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Text value of a field; empty for toggles and undeclared names.
    pub fn text(&self, field: &str) -> &str {
        match self.values.get(field) {
            Some(FieldValue::Text(s)) => s,
            _ => "",
        }
    }

    /// Toggle state of a field; `false` for text fields and undeclared names.
    pub fn toggle(&self, field: &str) -> bool {
        matches!(self.values.get(field), Some(FieldValue::Toggle(true)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }
}

// ============================================================================
// Skills list helpers
// ============================================================================

pub const SKILLS_FIELD: &str = "skills";

/// Suggestion chips offered next to the skills input.
pub const POPULAR_SKILLS: &[&str] = &[
    "JavaScript", "React", "Python", "Node.js", "UI/UX Design",
    "Java", "C++", "Angular", "Vue.js", "Django", "Ruby", "PHP",
];

/// Split a comma separated skills string, trimming parts and dropping blanks.
/// Order is kept; duplicates are not removed.
pub fn skills_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl FieldSnapshot {
    /// Append `skill` to the skills field unless already listed. The raw
    /// field is rewritten as the list joined with `", "`.
    pub fn add_skill(&mut self, skill: &str) -> FormResult<&Self> {
        let mut skills = skills_list(self.text(SKILLS_FIELD));
        let skill = skill.trim();
        if !skill.is_empty() && !skills.iter().any(|s| s == skill) {
            skills.push(skill.to_string());
        }
        self.set_text(SKILLS_FIELD, &skills.join(", "))
    }

    pub fn remove_skill(&mut self, skill: &str) -> FormResult<&Self> {
        let skills: Vec<String> = skills_list(self.text(SKILLS_FIELD))
            .into_iter()
            .filter(|s| s != skill.trim())
            .collect();
        self.set_text(SKILLS_FIELD, &skills.join(", "))
    }
}
