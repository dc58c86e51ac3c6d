use axum::{response::Json, Extension};
use serde_json::{json, Value};

use crate::auth::{self, password, Claims};
use crate::database::manager::DatabaseManager;
use crate::database::models::{Role, User, UserStatus};
use crate::database::{self, users};
use crate::error::ApiError;
use crate::guard;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{MobileResponse, MobileResult};
use crate::validate::{self, Rule};

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid email or password".to_string())
}

/// POST /mobile/auth/register - self-registration; the account starts
/// PENDING and cannot authenticate until an administrator approves it
pub async fn register(Json(body): Json<Value>) -> MobileResult<User> {
    validate::check(
        &body,
        &[
            Rule::Required("email"),
            Rule::Text { field: "email", max: 255 },
            Rule::Required("password"),
            Rule::Text { field: "password", max: 255 },
            Rule::Required("name"),
            Rule::Text { field: "name", max: 100 },
            Rule::OneOf { field: "role", allowed: &["STUDENT", "TEACHER"] },
        ],
    )?;

    let password_hash = password::hash(
        validate::str_field(&body, "password").unwrap_or_default().to_string(),
    )
    .await?;

    let role = validate::str_field(&body, "role").unwrap_or(Role::Student.as_str());

    let pool = DatabaseManager::pool().await?;
    let user = users::insert(
        &pool,
        validate::str_field(&body, "email").unwrap_or_default(),
        validate::str_field(&body, "name").unwrap_or_default(),
        role,
        UserStatus::Pending.as_str(),
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

    Ok(MobileResponse::created(user))
}

/// POST /mobile/auth/login - verify credentials and issue a bearer token
pub async fn login(Json(body): Json<Value>) -> MobileResult<Value> {
    validate::check(
        &body,
        &[
            Rule::Required("email"),
            Rule::Text { field: "email", max: 255 },
            Rule::Required("password"),
            Rule::Text { field: "password", max: 255 },
        ],
    )?;

    let pool = DatabaseManager::pool().await?;

    let Some(user) = users::find_by_email(
        &pool,
        validate::str_field(&body, "email").unwrap_or_default(),
    )
    .await?
    else {
        return Err(invalid_credentials());
    };

    let verified = password::verify(
        validate::str_field(&body, "password").unwrap_or_default().to_string(),
        user.password_hash.clone(),
    )
    .await?;
    if !verified || !user.is_active() {
        return Err(invalid_credentials());
    }

    let token = auth::generate_jwt(Claims::new(&user)).map_err(ApiError::internal)?;

    Ok(MobileResponse::success(json!({
        "token": token,
        "user": user,
    })))
}

/// GET /mobile/auth/verify - resolve the caller behind the token. The
/// identity is re-fetched, so a deactivated account fails here even with a
/// token that still verifies.
pub async fn verify(Extension(auth_user): Extension<AuthUser>) -> MobileResult<User> {
    let pool = DatabaseManager::pool().await?;
    let user = guard::current_user(&pool, auth_user.user_id).await?;

    Ok(MobileResponse::success(user))
}
