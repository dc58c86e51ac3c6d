use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::Value;
use tower_sessions::Session;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::{Enrollment, EnrollmentResponse};
use crate::database::{self, enrollments};
use crate::error::ApiError;
use crate::guard;
use crate::middleware::session::resolve_identity;
use crate::validate::{self, Rule};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub course_id: Option<Uuid>,
}

/// GET /enrollments?courseId= - administrator or the course's own teacher;
/// newest-enrolled-first
pub async fn list(
    session: Session,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<EnrollmentResponse>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let user = resolve_identity(&pool, &session).await?;

    let course_id = query
        .course_id
        .ok_or_else(|| ApiError::bad_request("courseId is required"))?;

    guard::require_course_teacher(&pool, &user, course_id).await?;

    let rows = enrollments::list_by_course(&pool, course_id).await?;
    Ok(Json(rows.into_iter().map(EnrollmentResponse::from).collect()))
}

/// POST /enrollments - no capacity or schedule checks, by design of the
/// data model
pub async fn create(
    session: Session,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Enrollment>), ApiError> {
    let pool = DatabaseManager::pool().await?;
    let user = resolve_identity(&pool, &session).await?;
    guard::require_staff(&user)?;

    validate::check(
        &body,
        &[
            Rule::Required("studentId"),
            Rule::Id("studentId"),
            Rule::Required("courseId"),
            Rule::Id("courseId"),
        ],
    )?;

    let row = enrollments::insert(
        &pool,
        validate::uuid_field(&body, "studentId").unwrap_or_default(),
        validate::uuid_field(&body, "courseId").unwrap_or_default(),
    )
    .await
    .map_err(|e| {
        if database::is_unique_violation(&e) {
            ApiError::conflict("Student is already enrolled in this course")
        } else if database::is_foreign_key_violation(&e) {
            ApiError::bad_request("studentId and courseId must reference existing records")
        } else {
            ApiError::from(e)
        }
    })?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// DELETE /enrollments/{id}
pub async fn delete(session: Session, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let user = resolve_identity(&pool, &session).await?;
    guard::require_staff(&user)?;

    if enrollments::delete(&pool, id).await? == 0 {
        return Err(ApiError::not_found("Enrollment not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
