use axum::{
    extract::Path,
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use tower_sessions::Session;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::CourseResponse;
use crate::database::{self, courses};
use crate::error::ApiError;
use crate::guard;
use crate::middleware::session::resolve_identity;
use crate::validate::{self, Rule};

/// GET /courses - list all courses with their teachers
pub async fn list(session: Session) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    resolve_identity(&pool, &session).await?;

    let rows = courses::list_all(&pool).await?;
    Ok(Json(rows.into_iter().map(CourseResponse::from).collect()))
}

/// POST /courses - create a course owned by a teacher
pub async fn create(
    session: Session,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<CourseResponse>), ApiError> {
    let pool = DatabaseManager::pool().await?;
    let user = resolve_identity(&pool, &session).await?;
    guard::require_staff(&user)?;

    validate::check(
        &body,
        &[
            Rule::Required("title"),
            Rule::Text { field: "title", max: 200 },
            Rule::Text { field: "description", max: 2000 },
            Rule::Required("teacherId"),
            Rule::Id("teacherId"),
        ],
    )?;

    let title = validate::str_field(&body, "title").unwrap_or_default();
    let description = validate::str_field(&body, "description");
    let teacher_id = validate::uuid_field(&body, "teacherId").unwrap_or_default();

    let row = courses::insert(&pool, title, description, teacher_id)
        .await
        .map_err(|e| {
            if database::is_foreign_key_violation(&e) {
                ApiError::bad_request("teacherId must reference an existing teacher")
            } else {
                e.into()
            }
        })?;

    Ok((StatusCode::CREATED, Json(CourseResponse::from(row))))
}

/// GET /courses/{id}
pub async fn get(
    session: Session,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseResponse>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    resolve_identity(&pool, &session).await?;

    let row = courses::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Course not found"))?;

    Ok(Json(CourseResponse::from(row)))
}

/// PATCH /courses/{id} - partial update
pub async fn update(
    session: Session,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<CourseResponse>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let user = resolve_identity(&pool, &session).await?;
    guard::require_staff(&user)?;

    validate::check(
        &body,
        &[
            Rule::Text { field: "title", max: 200 },
            Rule::Text { field: "description", max: 2000 },
            Rule::Id("teacherId"),
        ],
    )?;

    let row = courses::update(
        &pool,
        id,
        validate::str_field(&body, "title"),
        validate::str_field(&body, "description"),
        validate::uuid_field(&body, "teacherId"),
    )
    .await
    .map_err(|e| {
        if database::is_foreign_key_violation(&e) {
            ApiError::bad_request("teacherId must reference an existing teacher")
        } else {
            ApiError::from(e)
        }
    })?
    .ok_or_else(|| ApiError::not_found("Course not found"))?;

    Ok(Json(CourseResponse::from(row)))
}

/// DELETE /courses/{id}
pub async fn delete(session: Session, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let user = resolve_identity(&pool, &session).await?;
    guard::require_staff(&user)?;

    if courses::delete(&pool, id).await? == 0 {
        return Err(ApiError::not_found("Course not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
