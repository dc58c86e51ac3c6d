use axum::response::Json;
use tower_sessions::Session;

use crate::database::manager::DatabaseManager;
use crate::database::stats::{self, Stats};
use crate::error::ApiError;
use crate::guard;
use crate::middleware::session::resolve_identity;

/// GET /admin/stats - administrator-only aggregate counts
pub async fn get(session: Session) -> Result<Json<Stats>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let caller = resolve_identity(&pool, &session).await?;
    guard::require_admin(&caller)?;

    Ok(Json(stats::aggregate(&pool).await?))
}
