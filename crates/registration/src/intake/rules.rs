//! Single rules table shared by the authoritative evaluator and the
//! client mirror.
//!
//! Patterns are written in the common subset of the Rust `regex` and
//! ECMAScript dialects so the same strings can be shipped to the browser.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use super::domain::FieldKey;

/// ASCII whitespace only; no-break and other Unicode spaces are rejected.
pub const NAME_PATTERN: &str = r"^[A-Za-z \t\n\x0B\x0C\r]+$";
pub const EMAIL_PATTERN: &str = r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$";
pub const PHONE_STRIP_PATTERN: &str = r"[^0-9+]";
pub const PHONE_PATTERN: &str = r"^\+?[0-9]{7,15}$";
pub const BIO_MAX_CHARS: usize = 500;

/// Submitted text that counts as missing for requiredness.
pub const BLANK_VALUES: [&str; 2] = ["", "0"];

pub const FULL_NAME_REQUIRED: &str = "Full Name is required.";
pub const FULL_NAME_INVALID: &str = "Name should only contain letters and spaces.";
pub const EMAIL_REQUIRED: &str = "Email Address is required.";
pub const EMAIL_INVALID: &str = "Please enter a valid email address.";
pub const PROGRAM_REQUIRED: &str = "Please select a program.";
pub const PHONE_REQUIRED: &str = "Phone Number is required.";
pub const PHONE_INVALID: &str = "Please enter a valid phone number (7–15 digits, optional +).";
pub const BIO_TOO_LONG: &str = "Bio must be 500 characters or fewer.";

/// Declarative rule for one field, evaluated in the order: requiredness,
/// strip, pattern, length. The first failing step decides the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldRule {
    pub field: FieldKey,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strip_pattern: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_chars: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_message: Option<&'static str>,
}

impl FieldRule {
    const fn new(field: FieldKey) -> Self {
        Self {
            field,
            required_message: None,
            strip_pattern: None,
            pattern: None,
            pattern_message: None,
            max_chars: None,
            length_message: None,
        }
    }
}

/// Program membership in the catalog is deliberately not checked here; any
/// non-empty code passes and later resolves to the fallback label.
pub const FIELD_RULES: [FieldRule; 5] = [
    FieldRule {
        required_message: Some(FULL_NAME_REQUIRED),
        pattern: Some(NAME_PATTERN),
        pattern_message: Some(FULL_NAME_INVALID),
        ..FieldRule::new(FieldKey::FullName)
    },
    FieldRule {
        required_message: Some(EMAIL_REQUIRED),
        pattern: Some(EMAIL_PATTERN),
        pattern_message: Some(EMAIL_INVALID),
        ..FieldRule::new(FieldKey::Email)
    },
    FieldRule {
        required_message: Some(PHONE_REQUIRED),
        strip_pattern: Some(PHONE_STRIP_PATTERN),
        pattern: Some(PHONE_PATTERN),
        pattern_message: Some(PHONE_INVALID),
        ..FieldRule::new(FieldKey::Phone)
    },
    FieldRule {
        required_message: Some(PROGRAM_REQUIRED),
        ..FieldRule::new(FieldKey::Program)
    },
    FieldRule {
        max_chars: Some(BIO_MAX_CHARS),
        length_message: Some(BIO_TOO_LONG),
        ..FieldRule::new(FieldKey::Bio)
    },
];

#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    #[error("pattern for {field} failed to compile: {source}")]
    InvalidPattern {
        field: FieldKey,
        #[source]
        source: regex::Error,
    },
    #[error("no rule defined for {0}")]
    MissingRule(FieldKey),
}

#[derive(Debug)]
struct CompiledRule {
    rule: FieldRule,
    strip: Option<Regex>,
    pattern: Option<Regex>,
}

/// Compiled form of a rules table.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    pub fn compile(rules: &[FieldRule]) -> Result<Self, RulesError> {
        let compile = |field: FieldKey, pattern: Option<&str>| {
            pattern
                .map(Regex::new)
                .transpose()
                .map_err(|source| RulesError::InvalidPattern { field, source })
        };

        let mut compiled = Vec::with_capacity(FieldKey::ALL.len());
        for field in FieldKey::ALL {
            let rule = rules
                .iter()
                .find(|rule| rule.field == field)
                .copied()
                .ok_or(RulesError::MissingRule(field))?;
            compiled.push(CompiledRule {
                rule,
                strip: compile(field, rule.strip_pattern)?,
                pattern: compile(field, rule.pattern)?,
            });
        }

        Ok(Self { rules: compiled })
    }

    /// Process-wide compiled copy of `FIELD_RULES`.
    pub fn shared() -> &'static RuleSet {
        static SHARED: OnceLock<RuleSet> = OnceLock::new();
        SHARED.get_or_init(|| RuleSet::compile(&FIELD_RULES).expect("valid field rules"))
    }

    pub fn rules(&self) -> impl Iterator<Item = &FieldRule> {
        self.rules.iter().map(|compiled| &compiled.rule)
    }

    pub fn rule(&self, field: FieldKey) -> &FieldRule {
        &self.compiled(field).rule
    }

    fn compiled(&self, field: FieldKey) -> &CompiledRule {
        // compile() stores exactly one entry per FieldKey, in declaration order.
        &self.rules[field as usize]
    }

    /// Applies the field's strip pattern, if any. Stripping is idempotent.
    pub fn strip<'a>(&self, field: FieldKey, value: &'a str) -> Cow<'a, str> {
        match &self.compiled(field).strip {
            Some(strip) => strip.replace_all(value, ""),
            None => Cow::Borrowed(value),
        }
    }

    /// Checks one value, returning the accepted value or the failure message.
    ///
    /// The accepted value differs from the input only for fields with a strip
    /// pattern (the phone number).
    pub fn check<'a>(&self, field: FieldKey, value: &'a str) -> Result<Cow<'a, str>, &'static str> {
        let compiled = self.compiled(field);
        let rule = &compiled.rule;

        if is_blank(value) {
            return match rule.required_message {
                Some(message) => Err(message),
                None => Ok(Cow::Borrowed(value)),
            };
        }

        let candidate = self.strip(field, value);

        if let Some(pattern) = &compiled.pattern {
            if !pattern.is_match(&candidate) {
                return Err(rule.pattern_message.unwrap_or("Invalid value."));
            }
        }

        if let Some(max) = rule.max_chars {
            if candidate.chars().count() > max {
                return Err(rule.length_message.unwrap_or("Value is too long."));
            }
        }

        Ok(candidate)
    }

    pub fn validate_full_name<'a>(&self, value: &'a str) -> Result<Cow<'a, str>, &'static str> {
        self.check(FieldKey::FullName, value)
    }

    pub fn validate_email<'a>(&self, value: &'a str) -> Result<Cow<'a, str>, &'static str> {
        self.check(FieldKey::Email, value)
    }

    pub fn validate_phone<'a>(&self, value: &'a str) -> Result<Cow<'a, str>, &'static str> {
        self.check(FieldKey::Phone, value)
    }

    pub fn validate_program<'a>(&self, value: &'a str) -> Result<Cow<'a, str>, &'static str> {
        self.check(FieldKey::Program, value)
    }

    pub fn validate_bio<'a>(&self, value: &'a str) -> Result<Cow<'a, str>, &'static str> {
        self.check(FieldKey::Bio, value)
    }

    /// JSON export consumed by the browser-side mirror.
    pub fn to_json(&self) -> serde_json::Value {
        let rules: Vec<&FieldRule> = self.rules().collect();
        serde_json::json!({ "rules": rules, "blankValues": BLANK_VALUES })
    }
}

pub fn is_blank(value: &str) -> bool {
    BLANK_VALUES.contains(&value)
}
