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
use crate::database::models::{schedule::DAYS_OF_WEEK, Schedule};
use crate::database::{self, schedules};
use crate::error::ApiError;
use crate::guard;
use crate::middleware::session::resolve_identity;
use crate::validate::{self, Rule};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub course_id: Option<Uuid>,
}

/// GET /schedules?courseId= - list course schedules
pub async fn list(
    session: Session,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Schedule>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    resolve_identity(&pool, &session).await?;

    Ok(Json(schedules::list(&pool, query.course_id).await?))
}

fn time_slot_rules<'a>() -> [Rule<'a>; 4] {
    [
        Rule::OneOf { field: "dayOfWeek", allowed: &DAYS_OF_WEEK },
        Rule::Time("startTime"),
        Rule::Time("endTime"),
        Rule::After { start: "startTime", end: "endTime" },
    ]
}

/// POST /schedules
pub async fn create(
    session: Session,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Schedule>), ApiError> {
    let pool = DatabaseManager::pool().await?;
    let user = resolve_identity(&pool, &session).await?;
    guard::require_staff(&user)?;

    validate::check(
        &body,
        &[
            Rule::Required("courseId"),
            Rule::Id("courseId"),
            Rule::Required("dayOfWeek"),
            Rule::Required("startTime"),
            Rule::Required("endTime"),
            Rule::Text { field: "location", max: 200 },
        ],
    )?;
    validate::check(&body, &time_slot_rules())?;

    let row = schedules::insert(
        &pool,
        validate::uuid_field(&body, "courseId").unwrap_or_default(),
        validate::str_field(&body, "dayOfWeek").unwrap_or_default(),
        validate::str_field(&body, "startTime").unwrap_or_default(),
        validate::str_field(&body, "endTime").unwrap_or_default(),
        validate::str_field(&body, "location"),
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

/// PATCH /schedules/{id} - partial update; time ordering is checked only
/// when both times appear in the body
pub async fn update(
    session: Session,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<Schedule>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let user = resolve_identity(&pool, &session).await?;
    guard::require_staff(&user)?;

    validate::check(&body, &[Rule::Text { field: "location", max: 200 }])?;
    validate::check(&body, &time_slot_rules())?;

    let row = schedules::update(
        &pool,
        id,
        validate::str_field(&body, "dayOfWeek"),
        validate::str_field(&body, "startTime"),
        validate::str_field(&body, "endTime"),
        validate::str_field(&body, "location"),
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Schedule not found"))?;

    Ok(Json(row))
}

/// DELETE /schedules/{id}
pub async fn delete(session: Session, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let user = resolve_identity(&pool, &session).await?;
    guard::require_staff(&user)?;

    if schedules::delete(&pool, id).await? == 0 {
        return Err(ApiError::not_found("Schedule not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
