use sqlx::PgPool;
use uuid::Uuid;

use super::models::Lesson;

pub async fn list(pool: &PgPool, course_id: Option<Uuid>) -> Result<Vec<Lesson>, sqlx::Error> {
    match course_id {
        Some(course_id) => {
            sqlx::query_as::<_, Lesson>(
                "SELECT * FROM lessons WHERE course_id = $1 ORDER BY \"position\"",
            )
            .bind(course_id)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Lesson>("SELECT * FROM lessons ORDER BY course_id, \"position\"")
                .fetch_all(pool)
                .await
        }
    }
}

/// Insert with a server-assigned position. The next position is computed and
/// written in a single statement so concurrent creates cannot both observe
/// the same maximum.
pub async fn insert_with_next_position(
    pool: &PgPool,
    course_id: Uuid,
    title: &str,
    notes: Option<&str>,
) -> Result<Lesson, sqlx::Error> {
    sqlx::query_as::<_, Lesson>(
        "INSERT INTO lessons (id, course_id, title, notes, \"position\", created_at, updated_at) \
         SELECT $1, $2, $3, $4, COALESCE(MAX(\"position\"), 0) + 1, now(), now() \
         FROM lessons WHERE course_id = $2 RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(course_id)
    .bind(title)
    .bind(notes)
    .fetch_one(pool)
    .await
}
