//! End-to-end scenarios driven through the public intake facade and router.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tower::ServiceExt;

use registration::intake::{
    registration_router, ClientMirror, FieldKey, RegistrationService, RenderBranch,
    RenderStateBuilder, SeededEntropy, SubmissionEvaluator, SubmissionInput, SubmitDecision,
    ThreadEntropy,
};

fn scenario_a() -> SubmissionInput {
    SubmissionInput {
        full_name: "Alice Rao".to_string(),
        email: "alice@x.com".to_string(),
        program: "CS".to_string(),
        phone: "+91 98765 43210".to_string(),
        bio: String::new(),
    }
}

#[test]
fn scenario_a_flows_from_evaluation_to_confirmation() {
    let evaluator = SubmissionEvaluator::default();
    let result = evaluator.evaluate(&scenario_a(), &mut StdRng::seed_from_u64(1));
    let state = RenderStateBuilder::default().build(&result, true);

    assert_eq!(state.branch, RenderBranch::Confirmation);
    let confirmation = state.confirmation.expect("confirmation present");
    assert_eq!(confirmation.program_name, "Computer Science");
    assert_eq!(confirmation.phone.as_str(), "+919876543210");
    assert!(confirmation.reference_id.as_str().starts_with("SAP-"));
}

#[test]
fn client_mirror_and_server_agree_on_clean_input() {
    let input = scenario_a();
    let mut mirror = ClientMirror::default();
    for field in FieldKey::ALL {
        mirror.input(field, input.get(field));
    }

    assert_eq!(mirror.submit(), SubmitDecision::PassedThrough);
    let result = SubmissionEvaluator::default().evaluate(&input, &mut StdRng::seed_from_u64(9));
    assert!(result.accepted());
}

#[test]
fn client_mirror_and_server_agree_on_invalid_input() {
    let mut input = scenario_a();
    input.full_name = "A1ice".to_string();
    input.phone = "12345".to_string();

    let mut mirror = ClientMirror::default();
    for field in FieldKey::ALL {
        mirror.input(field, input.get(field));
    }
    mirror.submit();

    let result = SubmissionEvaluator::default().evaluate(&input, &mut StdRng::seed_from_u64(9));
    assert_eq!(mirror.errors(), result.errors());
}

#[tokio::test]
async fn unseeded_service_serves_the_form() {
    let service = Arc::new(RegistrationService::new(Arc::new(ThreadEntropy), 18));
    let response = registration_router(service)
        .oneshot(Request::get("/").body(Body::empty()).expect("request builds"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn seeded_service_round_trips_json_submission() {
    let service = Arc::new(RegistrationService::new(
        Arc::new(SeededEntropy::new(7)),
        4,
    ));
    let body = serde_json::to_vec(&scenario_a()).expect("serializes");
    let response = registration_router(service)
        .oneshot(
            Request::post("/api/v1/registrations")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload: serde_json::Value = serde_json::from_slice(&bytes).expect("json payload");
    assert_eq!(payload["accepted"], true);
    assert_eq!(payload["celebration"]["pieces"], 4);
}
