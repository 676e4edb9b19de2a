use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Form fields in the order they appear on the page.
///
/// The declaration order drives `FieldErrors` iteration, so the first error
/// reported is always the first errored field on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    FullName,
    Email,
    Phone,
    Program,
    Bio,
}

impl FieldKey {
    pub const ALL: [FieldKey; 5] = [
        FieldKey::FullName,
        FieldKey::Email,
        FieldKey::Phone,
        FieldKey::Program,
        FieldKey::Bio,
    ];

    /// Name used for the form control and the request payload.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::FullName => "fullName",
            FieldKey::Email => "email",
            FieldKey::Phone => "phone",
            FieldKey::Program => "program",
            FieldKey::Bio => "bio",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldKey::FullName => "Full Name",
            FieldKey::Email => "Email Address",
            FieldKey::Phone => "Phone Number",
            FieldKey::Program => "Program Applied For",
            FieldKey::Bio => "Short Bio",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw field values exactly as the client sent them. Absent keys are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubmissionInput {
    pub full_name: String,
    pub email: String,
    pub program: String,
    pub phone: String,
    pub bio: String,
}

impl SubmissionInput {
    pub fn get(&self, field: FieldKey) -> &str {
        match field {
            FieldKey::FullName => &self.full_name,
            FieldKey::Email => &self.email,
            FieldKey::Phone => &self.phone,
            FieldKey::Program => &self.program,
            FieldKey::Bio => &self.bio,
        }
    }
}

/// Text that has been trimmed, unescaped and markup-escaped.
///
/// Values of this type can be written into HTML without further escaping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NormalizedField(String);

impl NormalizedField {
    /// Wraps a value already known to carry no markup-significant characters.
    pub(crate) fn from_escaped(value: String) -> Self {
        Self(value)
    }

    /// Escapes plain display text such as placeholders or catalog labels.
    pub fn from_plain(value: &str) -> Self {
        Self(super::normalizer::escape_markup(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Character count of the escaped representation.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for NormalizedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalized counterpart of `SubmissionInput`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSubmission {
    pub full_name: NormalizedField,
    pub email: NormalizedField,
    pub program: NormalizedField,
    pub phone: NormalizedField,
    pub bio: NormalizedField,
}

impl NormalizedSubmission {
    pub fn get(&self, field: FieldKey) -> &NormalizedField {
        match field {
            FieldKey::FullName => &self.full_name,
            FieldKey::Email => &self.email,
            FieldKey::Phone => &self.phone,
            FieldKey::Program => &self.program,
            FieldKey::Bio => &self.bio,
        }
    }

    pub(crate) fn set(&mut self, field: FieldKey, value: NormalizedField) {
        let slot = match field {
            FieldKey::FullName => &mut self.full_name,
            FieldKey::Email => &mut self.email,
            FieldKey::Phone => &mut self.phone,
            FieldKey::Program => &mut self.program,
            FieldKey::Bio => &mut self.bio,
        };
        *slot = value;
    }
}

/// Field-keyed validation messages. A field without an entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FieldKey, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message unless the field already failed; first failing rule wins.
    pub fn insert(&mut self, field: FieldKey, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: FieldKey) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn remove(&mut self, field: FieldKey) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn contains(&self, field: FieldKey) -> bool {
        self.0.contains_key(&field)
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

    /// First errored field in form order.
    pub fn first(&self) -> Option<FieldKey> {
        self.0.keys().next().copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = FieldKey> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> {
        self.0.iter().map(|(key, message)| (*key, message.as_str()))
    }
}

pub const REFERENCE_PREFIX: &str = "SAP-";
pub const REFERENCE_MIN: u32 = 10_000;
pub const REFERENCE_MAX: u32 = 99_999;

/// Display-only confirmation identifier, `SAP-NNNNN`. Not unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ReferenceId(String);

impl ReferenceId {
    pub(crate) fn from_number(number: u32) -> Self {
        Self(format!("{REFERENCE_PREFIX}{number}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn number(&self) -> Option<u32> {
        self.0.strip_prefix(REFERENCE_PREFIX)?.parse().ok()
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of evaluating one submission.
///
/// `program_name` and `reference_id` are populated exactly when no field
/// reported an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub(crate) accepted: bool,
    pub(crate) normalized_values: NormalizedSubmission,
    pub(crate) errors: FieldErrors,
    pub(crate) program_name: Option<String>,
    pub(crate) reference_id: Option<ReferenceId>,
    #[serde(skip)]
    pub(crate) selected_program: String,
}

impl SubmissionResult {
    pub fn accepted(&self) -> bool {
        self.accepted
    }

    pub fn normalized_values(&self) -> &NormalizedSubmission {
        &self.normalized_values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn program_name(&self) -> Option<&str> {
        self.program_name.as_deref()
    }

    pub fn reference_id(&self) -> Option<&ReferenceId> {
        self.reference_id.as_ref()
    }

    /// Program code exactly as submitted, before normalization.
    pub fn selected_program(&self) -> &str {
        &self.selected_program
    }
}
