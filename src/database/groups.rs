use sqlx::PgPool;
use uuid::Uuid;

use super::models::StudentGroup;

pub async fn list(pool: &PgPool, course_id: Option<Uuid>) -> Result<Vec<StudentGroup>, sqlx::Error> {
    match course_id {
        Some(course_id) => {
            sqlx::query_as::<_, StudentGroup>(
                "SELECT * FROM student_groups WHERE course_id = $1 ORDER BY name",
            )
            .bind(course_id)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, StudentGroup>("SELECT * FROM student_groups ORDER BY name")
                .fetch_all(pool)
                .await
        }
    }
}

/// Relies on the (course_id, name) unique constraint; callers translate the
/// violation to a domain message.
pub async fn insert(
    pool: &PgPool,
    course_id: Uuid,
    name: &str,
    capacity: i32,
) -> Result<StudentGroup, sqlx::Error> {
    sqlx::query_as::<_, StudentGroup>(
        "INSERT INTO student_groups (id, course_id, name, capacity, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, now(), now()) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(course_id)
    .bind(name)
    .bind(capacity)
    .fetch_one(pool)
    .await
}
