use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Group-level schedule entry, same shape as a course schedule but parented
/// by a student group.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GroupSchedule {
    pub id: Uuid,
    pub group_id: Uuid,
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
