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
use crate::database::models::{schedule::DAYS_OF_WEEK, GroupSchedule};
use crate::database::{self, group_schedules};
use crate::error::ApiError;
use crate::guard;
use crate::middleware::session::resolve_identity;
use crate::validate::{self, Rule};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub group_id: Option<Uuid>,
}

fn time_slot_rules<'a>() -> [Rule<'a>; 4] {
    [
        Rule::OneOf { field: "dayOfWeek", allowed: &DAYS_OF_WEEK },
        Rule::Time("startTime"),
        Rule::Time("endTime"),
        Rule::After { start: "startTime", end: "endTime" },
    ]
}

/// GET /group-schedules?groupId=
pub async fn list(
    session: Session,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<GroupSchedule>>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    resolve_identity(&pool, &session).await?;

    Ok(Json(group_schedules::list(&pool, query.group_id).await?))
}

/// POST /group-schedules
pub async fn create(
    session: Session,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<GroupSchedule>), ApiError> {
    let pool = DatabaseManager::pool().await?;
    let user = resolve_identity(&pool, &session).await?;
    guard::require_staff(&user)?;

    validate::check(
        &body,
        &[
            Rule::Required("groupId"),
            Rule::Id("groupId"),
            Rule::Required("dayOfWeek"),
            Rule::Required("startTime"),
            Rule::Required("endTime"),
            Rule::Text { field: "location", max: 200 },
        ],
    )?;
    validate::check(&body, &time_slot_rules())?;

    let row = group_schedules::insert(
        &pool,
        validate::uuid_field(&body, "groupId").unwrap_or_default(),
        validate::str_field(&body, "dayOfWeek").unwrap_or_default(),
        validate::str_field(&body, "startTime").unwrap_or_default(),
        validate::str_field(&body, "endTime").unwrap_or_default(),
        validate::str_field(&body, "location"),
    )
    .await
    .map_err(|e| {
        if database::is_foreign_key_violation(&e) {
            ApiError::bad_request("groupId must reference an existing group")
        } else {
            ApiError::from(e)
        }
    })?;

    Ok((StatusCode::CREATED, Json(row)))
}

/// PATCH /group-schedules/{id}
pub async fn update(
    session: Session,
    Path(id): Path<Uuid>,
    Json(body): Json<Value>,
) -> Result<Json<GroupSchedule>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let user = resolve_identity(&pool, &session).await?;
    guard::require_staff(&user)?;

    validate::check(&body, &[Rule::Text { field: "location", max: 200 }])?;
    validate::check(&body, &time_slot_rules())?;

    let row = group_schedules::update(
        &pool,
        id,
        validate::str_field(&body, "dayOfWeek"),
        validate::str_field(&body, "startTime"),
        validate::str_field(&body, "endTime"),
        validate::str_field(&body, "location"),
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Group schedule not found"))?;

    Ok(Json(row))
}

/// DELETE /group-schedules/{id}
pub async fn delete(session: Session, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    let pool = DatabaseManager::pool().await?;
    let user = resolve_identity(&pool, &session).await?;
    guard::require_staff(&user)?;

    if group_schedules::delete(&pool, id).await? == 0 {
        return Err(ApiError::not_found("Group schedule not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /group-schedules/{id}/duplicate - clone an entry, applying any
/// overrides from the body. The body is optional; without one the entry is
/// cloned as-is.
pub async fn duplicate(
    session: Session,
    Path(id): Path<Uuid>,
    body: Option<Json<Value>>,
) -> Result<(StatusCode, Json<GroupSchedule>), ApiError> {
    let Json(body) = body.unwrap_or_else(|| Json(Value::Object(Default::default())));

    let pool = DatabaseManager::pool().await?;
    let user = resolve_identity(&pool, &session).await?;
    guard::require_staff(&user)?;

    validate::check(&body, &[Rule::Text { field: "location", max: 200 }])?;
    validate::check(&body, &time_slot_rules())?;

    let row = group_schedules::duplicate(
        &pool,
        id,
        validate::str_field(&body, "dayOfWeek"),
        validate::str_field(&body, "startTime"),
        validate::str_field(&body, "endTime"),
        validate::str_field(&body, "location"),
    )
    .await?
    .ok_or_else(|| ApiError::not_found("Group schedule not found"))?;

    Ok((StatusCode::CREATED, Json(row)))
}
