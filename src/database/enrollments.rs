use sqlx::PgPool;
use uuid::Uuid;

use super::models::{Enrollment, EnrollmentWithStudent};

/// Enrollments for a course, newest-enrolled-first, with student fields.
pub async fn list_by_course(
    pool: &PgPool,
    course_id: Uuid,
) -> Result<Vec<EnrollmentWithStudent>, sqlx::Error> {
    sqlx::query_as::<_, EnrollmentWithStudent>(
        "SELECT e.id, e.student_id, e.course_id, e.created_at, \
                u.name AS student_name, u.email AS student_email \
         FROM enrollments e JOIN users u ON u.id = e.student_id \
         WHERE e.course_id = $1 ORDER BY e.created_at DESC",
    )
    .bind(course_id)
    .fetch_all(pool)
    .await
}

pub async fn insert(
    pool: &PgPool,
    student_id: Uuid,
    course_id: Uuid,
) -> Result<Enrollment, sqlx::Error> {
    sqlx::query_as::<_, Enrollment>(
        "INSERT INTO enrollments (id, student_id, course_id, created_at) \
         VALUES ($1, $2, $3, now()) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(student_id)
    .bind(course_id)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
