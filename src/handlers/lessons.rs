use axum::{
    extract::Query,
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::Value;
use tower_sessions::Session;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::Lesson;
use crate::database::{self, lessons};
use crate::error::ApiError;
use crate::guard;
use crate::middleware::session::resolve_identity;
use crate::validate::{self, Rule};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub course_id: Option<Uuid>,
}

/// GET /lessons?courseId= - ordered by position
pub async fn list(
    session: Session,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Lesson>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    resolve_identity(&pool, &session).await?;

    Ok(Json(lessons::list(&pool, query.course_id).await?))
}

/// POST /lessons - position is assigned server-side, atomically
pub async fn create(
    session: Session,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Lesson>), ApiError> {
    let pool = DatabaseManager::pool().await?;
    let user = resolve_identity(&pool, &session).await?;
    guard::require_staff(&user)?;

    validate::check(
        &body,
        &[
            Rule::Required("courseId"),
            Rule::Id("courseId"),
            Rule::Required("title"),
            Rule::Text { field: "title", max: 200 },
            Rule::Text { field: "notes", max: 5000 },
        ],
    )?;

    let row = lessons::insert_with_next_position(
        &pool,
        validate::uuid_field(&body, "courseId").unwrap_or_default(),
        validate::str_field(&body, "title").unwrap_or_default(),
        validate::str_field(&body, "notes"),
    )
    .await
    .map_err(|e| {
        if database::is_foreign_key_violation(&e) {
            ApiError::bad_request("courseId must reference an existing course")
        } else {
            ApiError::from(e)
        }
    })?;

    Ok((StatusCode::CREATED, Json(row)))
}
