use sqlx::PgPool;
use uuid::Uuid;

use super::models::Schedule;

pub async fn list(pool: &PgPool, course_id: Option<Uuid>) -> Result<Vec<Schedule>, sqlx::Error> {
    match course_id {
        Some(course_id) => {
            sqlx::query_as::<_, Schedule>(
                "SELECT * FROM schedules WHERE course_id = $1 ORDER BY day_of_week, start_time",
            )
            .bind(course_id)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Schedule>("SELECT * FROM schedules ORDER BY day_of_week, start_time")
                .fetch_all(pool)
                .await
        }
    }
}

pub async fn insert(
    pool: &PgPool,
    course_id: Uuid,
    day_of_week: &str,
    start_time: &str,
    end_time: &str,
    location: Option<&str>,
) -> Result<Schedule, sqlx::Error> {
    sqlx::query_as::<_, Schedule>(
        "INSERT INTO schedules (id, course_id, day_of_week, start_time, end_time, location, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, now(), now()) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(course_id)
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
) -> Result<Option<Schedule>, sqlx::Error> {
    sqlx::query_as::<_, Schedule>(
        "UPDATE schedules SET \
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
    let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
