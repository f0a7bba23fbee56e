//! Platform user directory handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use common::AppResult;
use domain::User;
use supabase_rest::CallerIdentity;

use crate::state::AppState;

/// One directory entry as exposed by `/api/auth/users`.
#[derive(Debug, Serialize, ToSchema)]
pub struct DirectoryUser {
    pub id: Uuid,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "rol")]
    pub role: String,
    #[serde(rename = "cargo", skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for DirectoryUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role.as_str().to_string(),
            position: user.position,
            created_at: user.created_at,
        }
    }
}

/// Create user directory routes (require authentication).
pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users))
}

/// List the platform user directory
#[utoipa::path(
    get,
    path = "/api/auth/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Users, newest first", body = Vec<DirectoryUser>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    )
)]
pub async fn list_users(
    Extension(caller): Extension<CallerIdentity>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DirectoryUser>>> {
    let users = state.contracts.directory_users(&caller.email).await?;
    Ok(Json(users.into_iter().map(DirectoryUser::from).collect()))
}
