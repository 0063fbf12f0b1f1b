use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use uco_auth_types::identity::IdentityHeaders;
use uco_domain::id::UserId;

use crate::error::UsersServiceError;
use crate::state::AppState;
use crate::usecase::verification::{
    ConfirmVerificationCodeUseCase, SendVerificationCodeUseCase, VerifyContactCodeUseCase,
};

fn parse_user_id(raw: &str) -> Result<UserId, UsersServiceError> {
    raw.parse().map_err(|_| UsersServiceError::UserNotFound)
}

#[derive(Debug, Serialize)]
pub struct ConfirmedResponse {
    pub confirmed: bool,
}

// ── POST /users/{id}/send-code ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SendCodeQuery {
    pub channel: Option<String>,
}

pub async fn send_code(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SendCodeQuery>,
) -> Result<StatusCode, UsersServiceError> {
    let usecase = SendVerificationCodeUseCase {
        users: state.user_repo(),
        issuer: state.code_issuer(),
    };
    let channel = query.channel.unwrap_or_default();
    usecase.execute(parse_user_id(&id)?, &channel).await?;
    Ok(StatusCode::ACCEPTED)
}

// ── POST /users/{id}/confirm-code ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ConfirmCodeRequest {
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub code: String,
}

pub async fn confirm_code(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ConfirmCodeRequest>,
) -> Result<Json<ConfirmedResponse>, UsersServiceError> {
    let usecase = ConfirmVerificationCodeUseCase {
        users: state.user_repo(),
        codes: state.code_repo(),
    };
    usecase
        .execute(parse_user_id(&id)?, &body.channel, &body.code)
        .await?;
    Ok(Json(ConfirmedResponse { confirmed: true }))
}

// ── POST /users/verify-code (public) ─────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct VerifyCodeRequest {
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub code: String,
}

pub async fn verify_code(
    State(state): State<AppState>,
    Json(body): Json<VerifyCodeRequest>,
) -> Result<Json<ConfirmedResponse>, UsersServiceError> {
    let usecase = VerifyContactCodeUseCase {
        users: state.user_repo(),
        codes: state.code_repo(),
    };
    usecase.execute(&body.contact, &body.code).await?;
    Ok(Json(ConfirmedResponse { confirmed: true }))
}
