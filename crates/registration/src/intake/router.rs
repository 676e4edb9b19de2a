use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};

use super::domain::SubmissionInput;
use super::entropy::EntropySource;
use super::service::RegistrationService;

/// Router builder exposing the form page and the JSON intake endpoints.
pub fn registration_router<E>(service: Arc<RegistrationService<E>>) -> Router
where
    E: EntropySource + 'static,
{
    Router::new()
        .route("/", get(form_handler::<E>).post(submit_form_handler::<E>))
        .route(
            "/api/v1/registrations",
            axum::routing::post(submit_json_handler::<E>),
        )
        .route("/api/v1/registrations/rules", get(rules_handler::<E>))
        .with_state(service)
}

pub(crate) async fn form_handler<E>(
    State(service): State<Arc<RegistrationService<E>>>,
) -> Html<String>
where
    E: EntropySource + 'static,
{
    let state = service.blank();
    Html(service.render(&state))
}

/// Browser form post. Always answers with a full page, errors included.
pub(crate) async fn submit_form_handler<E>(
    State(service): State<Arc<RegistrationService<E>>>,
    Form(input): Form<SubmissionInput>,
) -> Html<String>
where
    E: EntropySource + 'static,
{
    let state = service.submit(&input);
    Html(service.render(&state))
}

pub(crate) async fn submit_json_handler<E>(
    State(service): State<Arc<RegistrationService<E>>>,
    axum::Json(input): axum::Json<SubmissionInput>,
) -> Response
where
    E: EntropySource + 'static,
{
    let state = service.submit(&input);
    let status = if state.accepted {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    (status, axum::Json(state)).into_response()
}

pub(crate) async fn rules_handler<E>(
    State(service): State<Arc<RegistrationService<E>>>,
) -> axum::Json<serde_json::Value>
where
    E: EntropySource + 'static,
{
    axum::Json(service.rules().to_json())
}
