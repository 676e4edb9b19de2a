//! Student registration intake: normalization, validation, render-state
//! building, the client-side mirror model and the HTTP surface.

pub mod catalog;
pub mod domain;
pub mod entropy;
pub mod evaluator;
pub mod mirror;
pub mod normalizer;
pub mod page;
pub mod render;
pub mod router;
pub mod rules;
pub mod service;

#[cfg(test)]
mod tests;

pub use catalog::{resolve_program_name, ProgramEntry, PROGRAM_CATALOG, UNKNOWN_PROGRAM};
pub use domain::{
    FieldErrors, FieldKey, NormalizedField, NormalizedSubmission, ReferenceId, SubmissionInput,
    SubmissionResult,
};
pub use entropy::{EntropySource, SeededEntropy, ThreadEntropy};
pub use evaluator::{draw_reference_id, SubmissionEvaluator};
pub use mirror::{ClientMirror, MirrorError, MirrorPhase, MirrorPreview, SubmitDecision};
pub use normalizer::{normalize, normalize_phone};
pub use page::render_page;
pub use render::{
    CelebrationSignal, Confirmation, FormFields, PreviewCard, RenderBranch, RenderState,
    RenderStateBuilder, DEFAULT_CELEBRATION_PIECES,
};
pub use router::registration_router;
pub use rules::{FieldRule, RuleSet, RulesError, FIELD_RULES};
pub use service::RegistrationService;
