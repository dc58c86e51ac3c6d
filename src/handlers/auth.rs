use axum::{http::StatusCode, response::Json};
use serde_json::Value;
use tower_sessions::Session;

use crate::auth::password;
use crate::database::manager::DatabaseManager;
use crate::database::models::User;
use crate::database::users;
use crate::error::ApiError;
use crate::middleware::session::AuthSession;
use crate::validate::{self, Rule};

/// One message for every failure mode: unknown email, wrong password, or a
/// non-ACTIVE account. Never reveals whether the email existed.
fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid email or password".to_string())
}

/// POST /auth/login - verify credentials and establish a session
pub async fn login(session: Session, Json(body): Json<Value>) -> Result<Json<User>, ApiError> {
    validate::check(
        &body,
        &[
            Rule::Required("email"),
            Rule::Text { field: "email", max: 255 },
            Rule::Required("password"),
            Rule::Text { field: "password", max: 255 },
        ],
    )?;

    let email = validate::str_field(&body, "email").unwrap_or_default();
    let password = validate::str_field(&body, "password").unwrap_or_default();

    let pool = DatabaseManager::pool().await?;

    let Some(user) = users::find_by_email(&pool, email).await? else {
        return Err(invalid_credentials());
    };

    let verified = password::verify(password.to_string(), user.password_hash.clone()).await?;
    if !verified || !user.is_active() {
        return Err(invalid_credentials());
    }

    AuthSession::new(&session).set_user_id(user.id).await?;

    Ok(Json(user))
}

/// POST /auth/logout - drop the session
pub async fn logout(session: Session) -> StatusCode {
    AuthSession::new(&session).clear().await;
    StatusCode::NO_CONTENT
}
