use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use uco_auth_types::identity::IdentityHeaders;
use uco_domain::pagination::PageRequest;

use crate::domain::types::User;
use crate::error::UsersServiceError;
use crate::state::AppState;
use crate::usecase::user::{Executor, ListUsersUseCase, RegisterUserInput, RegisterUserUseCase};

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    pub id: Option<String>,
    pub id_type: Option<String>,
    pub id_number: Option<String>,
    pub first_name: Option<String>,
    pub second_name: Option<String>,
    pub first_surname: Option<String>,
    pub second_surname: Option<String>,
    pub home_city: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
}

impl From<RegisterUserRequest> for RegisterUserInput {
    fn from(body: RegisterUserRequest) -> Self {
        Self {
            id: body.id,
            id_type: body.id_type,
            id_number: body.id_number,
            first_name: body.first_name,
            second_name: body.second_name,
            first_surname: body.first_surname,
            second_surname: body.second_surname,
            home_city: body.home_city,
            email: body.email,
            mobile_number: body.mobile_number,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub id_type: String,
    pub id_number: String,
    pub first_name: String,
    pub second_name: Option<String>,
    pub first_surname: String,
    pub second_surname: Option<String>,
    pub home_city: String,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub email_confirmed: bool,
    pub mobile_number_confirmed: bool,
    #[serde(serialize_with = "uco_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "uco_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            id_type: user.id_type.to_string(),
            id_number: user.id_number,
            first_name: user.first_name,
            second_name: user.second_name,
            first_surname: user.first_surname,
            second_surname: user.second_surname,
            home_city: user.home_city.to_string(),
            email: user.email,
            mobile_number: user.mobile_number,
            email_confirmed: user.email_confirmed,
            mobile_number_confirmed: user.mobile_number_confirmed,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

pub async fn register_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), UsersServiceError> {
    let usecase = RegisterUserUseCase {
        users: state.user_repo(),
        id_types: state.id_type_repo(),
        locations: state.location_repo(),
        issuer: state.code_issuer(),
        fallback_admin_email: state.admin_email.clone(),
    };
    let executor = Executor {
        email: identity.contact_email().map(str::to_owned),
        id: identity.user_id,
    };
    let user = usecase.execute(body.into(), executor).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── GET /users ───────────────────────────────────────────────────────────────

/// Raw paging values; parsed leniently so bad input falls back to defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersQuery {
    pub page: Option<String>,
    pub size: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub document_number: String,
    pub mobile_number: Option<String>,
    pub email_confirmed: bool,
    pub mobile_number_confirmed: bool,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_names(),
            last_name: user.last_name(),
            email: user.email,
            document_number: user.id_number,
            mobile_number: user.mobile_number,
            email_confirmed: user.email_confirmed,
            mobile_number_confirmed: user.mobile_number_confirmed,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersPageResponse {
    pub users: Vec<UserSummary>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
}

pub async fn list_users(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<UsersPageResponse>, UsersServiceError> {
    let page = PageRequest::parse(query.page.as_deref(), query.size.as_deref());
    let usecase = ListUsersUseCase {
        users: state.user_repo(),
    };
    let result = usecase.execute(page).await?;
    Ok(Json(UsersPageResponse {
        page: result.page,
        size: result.size,
        total_elements: result.total_elements,
        users: result.items.into_iter().map(UserSummary::from).collect(),
    }))
}
