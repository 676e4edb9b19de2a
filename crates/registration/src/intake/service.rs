use std::sync::Arc;

use tracing::info;

use super::domain::SubmissionInput;
use super::entropy::EntropySource;
use super::evaluator::SubmissionEvaluator;
use super::page::render_page;
use super::render::{RenderState, RenderStateBuilder};
use super::rules::RuleSet;

/// Request-scoped facade composing the evaluator, the render-state builder
/// and the page renderer. Holds no per-request state.
pub struct RegistrationService<E> {
    evaluator: SubmissionEvaluator,
    builder: RenderStateBuilder,
    entropy: Arc<E>,
}

impl<E> RegistrationService<E>
where
    E: EntropySource + 'static,
{
    pub fn new(entropy: Arc<E>, celebration_pieces: usize) -> Self {
        Self::with_parts(
            SubmissionEvaluator::default(),
            RenderStateBuilder::new(celebration_pieces),
            entropy,
        )
    }

    pub fn with_parts(
        evaluator: SubmissionEvaluator,
        builder: RenderStateBuilder,
        entropy: Arc<E>,
    ) -> Self {
        Self {
            evaluator,
            builder,
            entropy,
        }
    }

    pub fn rules(&self) -> &'static RuleSet {
        self.evaluator.rules()
    }

    /// State for the first page load.
    pub fn blank(&self) -> RenderState {
        self.builder.blank()
    }

    /// Evaluate a submission and build the state for the response page.
    pub fn submit(&self, input: &SubmissionInput) -> RenderState {
        let mut rng = self.entropy.rng();
        let result = self.evaluator.evaluate(input, &mut rng);

        info!(
            accepted = result.accepted(),
            error_count = result.errors().len(),
            reference_id = result.reference_id().map(|id| id.as_str()),
            "registration evaluated"
        );

        self.builder.build(&result, true)
    }

    pub fn render(&self, state: &RenderState) -> String {
        let mut rng = self.entropy.rng();
        render_page(state, self.rules(), &mut rng)
    }
}
