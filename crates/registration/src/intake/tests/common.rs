use std::sync::Arc;

use axum::response::Response;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

use crate::intake::domain::{SubmissionInput, SubmissionResult};
use crate::intake::entropy::SeededEntropy;
use crate::intake::evaluator::SubmissionEvaluator;
use crate::intake::render::DEFAULT_CELEBRATION_PIECES;
use crate::intake::router::registration_router;
use crate::intake::service::RegistrationService;

pub(super) const SEED: u64 = 2024;

/// Scenario A: every field valid, phone typed with spacing.
pub(super) fn valid_input() -> SubmissionInput {
    SubmissionInput {
        full_name: "Alice Rao".to_string(),
        email: "alice@x.com".to_string(),
        program: "CS".to_string(),
        phone: "+91 98765 43210".to_string(),
        bio: String::new(),
    }
}

pub(super) fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(SEED)
}

pub(super) fn evaluate(input: &SubmissionInput) -> SubmissionResult {
    SubmissionEvaluator::default().evaluate(input, &mut seeded_rng())
}

pub(super) fn build_service() -> RegistrationService<SeededEntropy> {
    RegistrationService::new(
        Arc::new(SeededEntropy::new(SEED)),
        DEFAULT_CELEBRATION_PIECES,
    )
}

pub(super) fn router() -> axum::Router {
    registration_router(Arc::new(build_service()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
