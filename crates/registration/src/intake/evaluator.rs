use std::borrow::Cow;

use rand::Rng;
use tracing::debug;

use super::catalog::resolve_program_name;
use super::domain::{
    FieldErrors, FieldKey, NormalizedField, ReferenceId, SubmissionInput, SubmissionResult,
    REFERENCE_MAX, REFERENCE_MIN,
};
use super::normalizer::normalize_submission;
use super::rules::RuleSet;

/// Authoritative, stateless check of a submission against the shared rules.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionEvaluator {
    rules: &'static RuleSet,
}

impl Default for SubmissionEvaluator {
    fn default() -> Self {
        Self::new(RuleSet::shared())
    }
}

impl SubmissionEvaluator {
    pub fn new(rules: &'static RuleSet) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static RuleSet {
        self.rules
    }

    /// Normalizes every field, validates each one independently, and on
    /// success derives the program name and a reference id from `rng`.
    pub fn evaluate<R>(&self, input: &SubmissionInput, rng: &mut R) -> SubmissionResult
    where
        R: Rng + ?Sized,
    {
        let mut values = normalize_submission(input);
        let mut errors = FieldErrors::new();

        for field in FieldKey::ALL {
            let replacement = match self.rules.check(field, values.get(field).as_str()) {
                Ok(Cow::Owned(accepted)) => Some(accepted),
                Ok(Cow::Borrowed(_)) => None,
                Err(message) => {
                    debug!(field = field.as_str(), "field rejected");
                    errors.insert(field, message);
                    None
                }
            };
            // Stripping an escaped value only ever removes characters.
            if let Some(accepted) = replacement {
                values.set(field, NormalizedField::from_escaped(accepted));
            }
        }

        let accepted = errors.is_empty();
        let (program_name, reference_id) = if accepted {
            let name = resolve_program_name(values.program.as_str()).to_string();
            (Some(name), Some(draw_reference_id(rng)))
        } else {
            (None, None)
        };

        SubmissionResult {
            accepted,
            normalized_values: values,
            errors,
            program_name,
            reference_id,
            selected_program: input.program.clone(),
        }
    }
}

/// Uniform draw from the inclusive `SAP-10000..=SAP-99999` range.
pub fn draw_reference_id<R>(rng: &mut R) -> ReferenceId
where
    R: Rng + ?Sized,
{
    ReferenceId::from_number(rng.gen_range(REFERENCE_MIN..=REFERENCE_MAX))
}
