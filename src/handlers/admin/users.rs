use axum::{
    extract::Path,
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use tower_sessions::Session;
use uuid::Uuid;

use crate::auth::password;
use crate::database::manager::DatabaseManager;
use crate::database::models::{Role, User, UserStatus};
use crate::database::{self, users};
use crate::error::ApiError;
use crate::guard;
use crate::handlers::users::approve_user;
use crate::middleware::session::resolve_identity;
use crate::validate::{self, Rule};

/// GET /admin/users
pub async fn list(session: Session) -> Result<Json<Vec<User>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let caller = resolve_identity(&pool, &session).await?;
    guard::require_admin(&caller)?;

    Ok(Json(users::list_all(&pool).await?))
}

/// POST /admin/users - administrator-created accounts start ACTIVE
pub async fn create(
    session: Session,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let pool = DatabaseManager::pool().await?;
    let caller = resolve_identity(&pool, &session).await?;
    guard::require_admin(&caller)?;

    validate::check(
        &body,
        &[
            Rule::Required("email"),
            Rule::Text { field: "email", max: 255 },
            Rule::Required("password"),
            Rule::Text { field: "password", max: 255 },
            Rule::Required("name"),
            Rule::Text { field: "name", max: 100 },
            Rule::Required("role"),
            Rule::OneOf { field: "role", allowed: &Role::ALL },
        ],
    )?;

    let password_hash = password::hash(
        validate::str_field(&body, "password").unwrap_or_default().to_string(),
    )
    .await?;

    let user = users::insert(
        &pool,
        validate::str_field(&body, "email").unwrap_or_default(),
        validate::str_field(&body, "name").unwrap_or_default(),
        validate::str_field(&body, "role").unwrap_or_default(),
        UserStatus::Active.as_str(),
        &password_hash,
    )
    .await
    .map_err(|e| {
        if database::is_unique_violation(&e) {
            ApiError::conflict("An account with this email already exists")
        } else {
            ApiError::from(e)
        }
    })?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// PATCH /admin/users/{id}/approve
pub async fn approve(session: Session, Path(id): Path<Uuid>) -> Result<Json<User>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let caller = resolve_identity(&pool, &session).await?;
    guard::require_admin(&caller)?;

    Ok(Json(approve_user(&pool, id).await?))
}

/// PATCH /admin/users/{id}/status - body { "status": "PENDING"|"ACTIVE"|"INACTIVE" }
pub async fn status(
    session: Session,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<User>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let caller = resolve_identity(&pool, &session).await?;
    guard::require_admin(&caller)?;

    validate::check(
        &body,
        &[
            Rule::Required("status"),
            Rule::OneOf { field: "status", allowed: &UserStatus::ALL },
        ],
    )?;

    let user = users::update_status(
        &pool,
        id,
        validate::str_field(&body, "status").unwrap_or_default(),
    )
    .await?
    .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(user))
}
