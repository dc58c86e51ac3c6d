use axum::Extension;

use crate::database::manager::DatabaseManager;
use crate::database::stats::{self, Stats};
use crate::guard;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{MobileResponse, MobileResult};

/// GET /mobile/stats - administrator-only, same counts as the web surface
/// but enveloped
pub async fn get(Extension(auth_user): Extension<AuthUser>) -> MobileResult<Stats> {
    let pool = DatabaseManager::pool().await?;
    let user = guard::current_user(&pool, auth_user.user_id).await?;
    guard::require_admin(&user)?;

    Ok(MobileResponse::success(stats::aggregate(&pool).await?))
}
