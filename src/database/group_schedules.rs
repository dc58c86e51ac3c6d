use sqlx::PgPool;
use uuid::Uuid;

use super::models::GroupSchedule;

pub async fn list(pool: &PgPool, group_id: Option<Uuid>) -> Result<Vec<GroupSchedule>, sqlx::Error> {
    match group_id {
        Some(group_id) => {
            sqlx::query_as::<_, GroupSchedule>(
                "SELECT * FROM group_schedules WHERE group_id = $1 ORDER BY day_of_week, start_time",
            )
            .bind(group_id)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, GroupSchedule>(
                "SELECT * FROM group_schedules ORDER BY day_of_week, start_time",
            )
            .fetch_all(pool)
            .await
        }
    }
}

pub async fn insert(
    pool: &PgPool,
    group_id: Uuid,
    day_of_week: &str,
    start_time: &str,
    end_time: &str,
    location: Option<&str>,
) -> Result<GroupSchedule, sqlx::Error> {
    sqlx::query_as::<_, GroupSchedule>(
        "INSERT INTO group_schedules (id, group_id, day_of_week, start_time, end_time, location, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, now(), now()) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(group_id)
    .bind(day_of_week)
    .bind(start_time)
    .bind(end_time)
    .bind(location)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    day_of_week: Option<&str>,
    start_time: Option<&str>,
    end_time: Option<&str>,
    location: Option<&str>,
) -> Result<Option<GroupSchedule>, sqlx::Error> {
    sqlx::query_as::<_, GroupSchedule>(
        "UPDATE group_schedules SET \
             day_of_week = COALESCE($2, day_of_week), \
             start_time = COALESCE($3, start_time), \
             end_time = COALESCE($4, end_time), \
             location = COALESCE($5, location), \
             updated_at = now() \
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(day_of_week)
    .bind(start_time)
    .bind(end_time)
    .bind(location)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM group_schedules WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Clone an existing entry, applying overrides where given. One statement;
/// returns None when the source entry does not exist.
pub async fn duplicate(
    pool: &PgPool,
    id: Uuid,
    day_of_week: Option<&str>,
    start_time: Option<&str>,
    end_time: Option<&str>,
    location: Option<&str>,
) -> Result<Option<GroupSchedule>, sqlx::Error> {
    sqlx::query_as::<_, GroupSchedule>(
        "INSERT INTO group_schedules (id, group_id, day_of_week, start_time, end_time, location, created_at, updated_at) \
         SELECT $2, group_id, \
                COALESCE($3, day_of_week), \
                COALESCE($4, start_time), \
                COALESCE($5, end_time), \
                COALESCE($6, location), \
                now(), now() \
         FROM group_schedules WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(Uuid::new_v4())
    .bind(day_of_week)
    .bind(start_time)
    .bind(end_time)
    .bind(location)
    .fetch_optional(pool)
    .await
}
