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
use crate::database::models::StudentGroup;
use crate::database::{self, groups};
use crate::error::ApiError;
use crate::guard;
use crate::middleware::session::resolve_identity;
use crate::validate::{self, Rule};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub course_id: Option<Uuid>,
}

/// GET /groups?courseId=
pub async fn list(
    session: Session,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<StudentGroup>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    resolve_identity(&pool, &session).await?;

    Ok(Json(groups::list(&pool, query.course_id).await?))
}

/// POST /groups - capacity is recorded but never enforced against
/// enrollment counts
pub async fn create(
    session: Session,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<StudentGroup>), ApiError> {
    let pool = DatabaseManager::pool().await?;
    let user = resolve_identity(&pool, &session).await?;
    guard::require_staff(&user)?;

    validate::check(
        &body,
        &[
            Rule::Required("courseId"),
            Rule::Id("courseId"),
            Rule::Required("name"),
            Rule::Text { field: "name", max: 100 },
            Rule::Required("capacity"),
            Rule::Positive("capacity"),
        ],
    )?;

    let capacity = validate::i64_field(&body, "capacity").unwrap_or_default() as i32;

    let row = groups::insert(
        &pool,
        validate::uuid_field(&body, "courseId").unwrap_or_default(),
        validate::str_field(&body, "name").unwrap_or_default(),
        capacity,
    )
    .await
    .map_err(|e| {
        if database::is_unique_violation(&e) {
            ApiError::bad_request("A group with this name already exists for this course")
        } else if database::is_foreign_key_violation(&e) {
            ApiError::bad_request("courseId must reference an existing course")
        } else {
            ApiError::from(e)
        }
    })?;

    Ok((StatusCode::CREATED, Json(row)))
}
