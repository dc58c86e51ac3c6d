//! Legacy user-lifecycle endpoints kept for existing clients. The
//! `/admin/users` module covers the same transitions on newer paths.

use axum::{extract::Path, response::Json};
use sqlx::PgPool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::{User, UserStatus};
use crate::database::users;
use crate::error::ApiError;
use crate::guard;
use crate::mail;
use crate::middleware::session::resolve_identity;

/// Transition a user to ACTIVE and fire the best-effort approval notice.
/// The update is unconditional: approving an already-ACTIVE user succeeds
/// with the same end state.
pub(crate) async fn approve_user(pool: &PgPool, id: Uuid) -> Result<User, ApiError> {
    let user = users::update_status(pool, id, UserStatus::Active.as_str())
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    // Dispatched after the transition committed; failures never surface.
    mail::send_approval_notice(&user);

    Ok(user)
}

/// PATCH /users/{id}/approve (legacy path)
pub async fn approve(session: Session, Path(id): Path<Uuid>) -> Result<Json<User>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let caller = resolve_identity(&pool, &session).await?;
    guard::require_admin(&caller)?;

    Ok(Json(approve_user(&pool, id).await?))
}

/// DELETE /users/{id}/reject - permanent removal, distinct from setting
/// status to INACTIVE
pub async fn reject(session: Session, Path(id): Path<Uuid>) -> Result<Json<User>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let caller = resolve_identity(&pool, &session).await?;
    guard::require_admin(&caller)?;

    let deleted = users::delete(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(deleted))
}

/// GET /users/pending
pub async fn pending(session: Session) -> Result<Json<Vec<User>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let caller = resolve_identity(&pool, &session).await?;
    guard::require_admin(&caller)?;

    Ok(Json(users::list_pending(&pool).await?))
}
