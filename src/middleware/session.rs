//! Type-safe wrapper over the server-side session for the credentials
//! (web) surface.

use sqlx::PgPool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::database::models::User;
use crate::error::ApiError;
use crate::guard;

const SESSION_AUTH_USER_ID: &str = "auth:user";

/// Authentication session management: stores only the user id; the identity
/// is re-fetched on every request.
pub struct AuthSession<'a> {
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Establish a logged-in session after credential verification.
    pub async fn set_user_id(&self, user_id: Uuid) -> Result<(), ApiError> {
        self.session
            .insert(SESSION_AUTH_USER_ID, user_id)
            .await
            .map_err(ApiError::internal)
    }

    pub async fn get_user_id(&self) -> Result<Option<Uuid>, ApiError> {
        self.session
            .get::<Uuid>(SESSION_AUTH_USER_ID)
            .await
            .map_err(ApiError::internal)
    }

    /// Logout: drop all session state.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}

/// Resolve the caller behind the session cookie. No session, an unknown id,
/// or a non-ACTIVE identity all produce the same generic 401.
pub async fn resolve_identity(pool: &PgPool, session: &Session) -> Result<User, ApiError> {
    let user_id = AuthSession::new(session)
        .get_user_id()
        .await?
        .ok_or_else(ApiError::unauthorized)?;

    guard::current_user(pool, user_id).await
}
