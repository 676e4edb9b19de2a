//! Model of the in-browser validation pass.
//!
//! The mirror is advisory only: it checks raw keystrokes against the shared
//! rules before a request is sent, and the server re-validates everything.

use std::collections::BTreeMap;

use serde::Serialize;

use super::catalog::lookup_program;
use super::domain::{FieldErrors, FieldKey};
use super::render::{
    PREVIEW_BIO_PLACEHOLDER, PREVIEW_EMAIL_PLACEHOLDER, PREVIEW_NAME_PLACEHOLDER,
    PREVIEW_PHONE_PLACEHOLDER, PREVIEW_PROGRAM_PLACEHOLDER,
};
use super::rules::RuleSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MirrorPhase {
    Idle,
    Validating,
    Blocked,
    PassedThrough,
}

/// Result of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Submission cancelled; focus moves to the first errored field.
    Blocked { focus: FieldKey },
    /// Request may proceed to the server.
    PassedThrough,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MirrorError {
    #[error("'{0}' is not a tracked form field")]
    UnknownField(String),
}

/// Preview text as the browser would display it (plain text, not markup).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MirrorPreview {
    pub name: String,
    pub program: String,
    pub email: String,
    pub phone: String,
    pub bio: String,
}

#[derive(Debug, Clone)]
pub struct ClientMirror {
    rules: &'static RuleSet,
    values: BTreeMap<FieldKey, String>,
    errors: FieldErrors,
    phase: MirrorPhase,
}

impl Default for ClientMirror {
    fn default() -> Self {
        Self::new(RuleSet::shared())
    }
}

impl ClientMirror {
    pub fn new(rules: &'static RuleSet) -> Self {
        Self {
            rules,
            values: BTreeMap::new(),
            errors: FieldErrors::new(),
            phase: MirrorPhase::Idle,
        }
    }

    pub fn phase(&self) -> MirrorPhase {
        self.phase
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn value(&self, field: FieldKey) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    /// Keystroke or change event on a tracked field.
    ///
    /// Clears the message shown for `field` only; other fields keep theirs
    /// until they are edited or the form is submitted again.
    pub fn input(&mut self, field: FieldKey, value: impl Into<String>) {
        self.values.insert(field, value.into());
        self.errors.remove(field);
        self.phase = MirrorPhase::Idle;
    }

    pub fn input_named(&mut self, name: &str, value: impl Into<String>) -> Result<(), MirrorError> {
        let field =
            FieldKey::from_name(name).ok_or_else(|| MirrorError::UnknownField(name.to_string()))?;
        self.input(field, value);
        Ok(())
    }

    /// Bio counter, on the raw value as typed.
    pub fn bio_count(&self) -> usize {
        self.value(FieldKey::Bio).chars().count()
    }

    pub fn preview(&self) -> MirrorPreview {
        let trimmed_or = |field: FieldKey, placeholder: &str| {
            let value = self.value(field).trim();
            if value.is_empty() {
                placeholder.to_string()
            } else {
                value.to_string()
            }
        };

        let program = lookup_program(self.value(FieldKey::Program))
            .map(|entry| entry.name)
            .unwrap_or(PREVIEW_PROGRAM_PLACEHOLDER)
            .to_string();

        MirrorPreview {
            name: trimmed_or(FieldKey::FullName, PREVIEW_NAME_PLACEHOLDER),
            program,
            email: trimmed_or(FieldKey::Email, PREVIEW_EMAIL_PLACEHOLDER),
            phone: trimmed_or(FieldKey::Phone, PREVIEW_PHONE_PLACEHOLDER),
            bio: trimmed_or(FieldKey::Bio, PREVIEW_BIO_PLACEHOLDER),
        }
    }

    /// Submit attempt: re-runs the shared rules on the current raw values.
    pub fn submit(&mut self) -> SubmitDecision {
        self.phase = MirrorPhase::Validating;
        self.errors.clear();

        for field in FieldKey::ALL {
            let raw = self
                .values
                .get(&field)
                .map(String::as_str)
                .unwrap_or_default();
            // Bio length and the program selection are read as-is; the rest
            // are trimmed like the page script does.
            let candidate = match field {
                FieldKey::Bio | FieldKey::Program => raw,
                _ => raw.trim(),
            };
            if let Err(message) = self.rules.check(field, candidate) {
                self.errors.insert(field, message);
            }
        }

        match self.errors.first() {
            Some(focus) => {
                self.phase = MirrorPhase::Blocked;
                SubmitDecision::Blocked { focus }
            }
            None => {
                self.phase = MirrorPhase::PassedThrough;
                SubmitDecision::PassedThrough
            }
        }
    }
}
