use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};

use crate::identity::{IdTokenUser, Identity};
use crate::server::server::AppState;
use crate::views::problem::check_answer;

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub hash: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub id_token: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/view", get(current_view))
        .route("/navigate", post(navigate))
        .route("/problems/{number}/answer", post(answer))
        .route("/auth/google", post(google_sign_in))
        .route("/identity", get(current_identity))
        .route("/identity/refresh", post(refresh_identity))
}

fn error_response(status: StatusCode, message: impl std::fmt::Display) -> Response {
    (status, Json(json!({ "error": message.to_string() }))).into_response()
}

async fn current_view(State(state): State<AppState>) -> Response {
    match state.app.router.container().current() {
        Some(view) => Json(view).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn navigate(State(state): State<AppState>, Json(request): Json<NavigateRequest>) -> Response {
    let changed = state.app.window.set_hash(&request.hash);
    info!(hash = %request.hash, changed, "navigation requested");
    (
        StatusCode::ACCEPTED,
        Json(json!({ "hash": state.app.window.hash(), "changed": changed })),
    )
        .into_response()
}

async fn answer(Path(number): Path<usize>, Json(request): Json<AnswerRequest>) -> Response {
    match check_answer(number, &request.answer) {
        Some(feedback) => Json(feedback).into_response(),
        None => error_response(StatusCode::NOT_FOUND, format!("problem {} does not exist", number)),
    }
}

async fn google_sign_in(State(state): State<AppState>, Json(request): Json<SignInRequest>) -> Response {
    let user = match IdTokenUser::from_id_token(&request.id_token) {
        Ok(user) => user,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, err),
    };

    let task = match state.app.federator.on_google_sign_in(Arc::new(user)) {
        Ok(task) => task,
        Err(err) => return error_response(StatusCode::CONFLICT, err),
    };
    if let Err(err) = task.await {
        error!("sign-in task failed: {}", err);
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, err);
    }

    match state.app.identity().peek() {
        Some(Ok(identity)) => Json(identity).into_response(),
        Some(Err(err)) => error_response(StatusCode::BAD_GATEWAY, err),
        None => error_response(StatusCode::INTERNAL_SERVER_ERROR, "identity not settled"),
    }
}

fn signed_in(state: &AppState) -> Option<Identity> {
    state.app.identity().peek().and_then(Result::ok)
}

async fn current_identity(State(state): State<AppState>) -> Response {
    match signed_in(&state) {
        Some(identity) => Json(identity).into_response(),
        None => error_response(StatusCode::UNAUTHORIZED, "not signed in"),
    }
}

async fn refresh_identity(State(state): State<AppState>) -> Response {
    let Some(identity) = signed_in(&state) else {
        return error_response(StatusCode::UNAUTHORIZED, "not signed in");
    };
    // new provider token first, then exchange it for new cloud credentials
    match identity.refresh_and_renew().await {
        Ok(identity_id) => Json(json!({ "id": identity_id })).into_response(),
        Err(err) => {
            warn!(error = %err, "identity refresh failed");
            error_response(StatusCode::BAD_GATEWAY, err)
        }
    }
}
