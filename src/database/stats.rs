use serde::Serialize;
use sqlx::PgPool;

/// Aggregate counts for the administrator dashboard.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_students: i64,
    pub total_teachers: i64,
    pub pending_users: i64,
    pub total_courses: i64,
    pub total_enrollments: i64,
}

pub async fn aggregate(pool: &PgPool) -> Result<Stats, sqlx::Error> {
    sqlx::query_as::<_, Stats>(
        "SELECT \
             (SELECT COUNT(*) FROM users WHERE role = 'STUDENT') AS total_students, \
             (SELECT COUNT(*) FROM users WHERE role = 'TEACHER') AS total_teachers, \
             (SELECT COUNT(*) FROM users WHERE status = 'PENDING') AS pending_users, \
             (SELECT COUNT(*) FROM courses) AS total_courses, \
             (SELECT COUNT(*) FROM enrollments) AS total_enrollments",
    )
    .fetch_one(pool)
    .await
}
