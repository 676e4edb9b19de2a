use super::domain::{FieldKey, NormalizedField, NormalizedSubmission, SubmissionInput};
use super::rules::RuleSet;

/// Trim, drop legacy backslash escaping, then markup-escape.
pub fn normalize(raw: &str) -> NormalizedField {
    let unescaped = strip_slashes(raw.trim());
    NormalizedField::from_escaped(escape_markup(&unescaped))
}

pub fn normalize_submission(input: &SubmissionInput) -> NormalizedSubmission {
    NormalizedSubmission {
        full_name: normalize(&input.full_name),
        email: normalize(&input.email),
        program: normalize(&input.program),
        phone: normalize(&input.phone),
        bio: normalize(&input.bio),
    }
}

/// Removes one level of backslash quoting: `\x` becomes `x`, `\\` becomes `\`
/// and `\0` becomes NUL. A trailing lone backslash is dropped.
pub fn strip_slashes(value: &str) -> String {
    if !value.contains('\\') {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('\0'),
            Some(next) => out.push(next),
            None => {}
        }
    }
    out
}

pub fn escape_markup(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Keeps ASCII digits and `+`, discarding spacing and punctuation.
///
/// Uses the phone strip pattern of the shared rules table, the same one the
/// evaluator applies.
pub fn normalize_phone(value: &str) -> String {
    RuleSet::shared()
        .strip(FieldKey::Phone, value)
        .into_owned()
}
