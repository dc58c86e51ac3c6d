use sqlx::PgPool;
use uuid::Uuid;

use super::models::CourseWithTeacher;

const JOINED: &str = "c.id, c.title, c.description, c.teacher_id, c.created_at, c.updated_at, \
                      u.name AS teacher_name, u.email AS teacher_email";

pub async fn list_all(pool: &PgPool) -> Result<Vec<CourseWithTeacher>, sqlx::Error> {
    sqlx::query_as::<_, CourseWithTeacher>(&format!(
        "SELECT {JOINED} FROM courses c JOIN users u ON u.id = c.teacher_id \
         ORDER BY c.created_at DESC"
    ))
    .fetch_all(pool)
    .await
}

pub async fn list_by_teacher(
    pool: &PgPool,
    teacher_id: Uuid,
) -> Result<Vec<CourseWithTeacher>, sqlx::Error> {
    sqlx::query_as::<_, CourseWithTeacher>(&format!(
        "SELECT {JOINED} FROM courses c JOIN users u ON u.id = c.teacher_id \
         WHERE c.teacher_id = $1 ORDER BY c.created_at DESC"
    ))
    .bind(teacher_id)
    .fetch_all(pool)
    .await
}

pub async fn list_enrolled(
    pool: &PgPool,
    student_id: Uuid,
) -> Result<Vec<CourseWithTeacher>, sqlx::Error> {
    sqlx::query_as::<_, CourseWithTeacher>(&format!(
        "SELECT {JOINED} FROM courses c \
         JOIN users u ON u.id = c.teacher_id \
         JOIN enrollments e ON e.course_id = c.id \
         WHERE e.student_id = $1 ORDER BY c.created_at DESC"
    ))
    .bind(student_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<CourseWithTeacher>, sqlx::Error> {
    sqlx::query_as::<_, CourseWithTeacher>(&format!(
        "SELECT {JOINED} FROM courses c JOIN users u ON u.id = c.teacher_id WHERE c.id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Insert and return the joined row in one statement.
pub async fn insert(
    pool: &PgPool,
    title: &str,
    description: Option<&str>,
    teacher_id: Uuid,
) -> Result<CourseWithTeacher, sqlx::Error> {
    sqlx::query_as::<_, CourseWithTeacher>(
        "WITH ins AS (\
             INSERT INTO courses (id, title, description, teacher_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, now(), now()) RETURNING *\
         ) \
         SELECT ins.id, ins.title, ins.description, ins.teacher_id, ins.created_at, \
                ins.updated_at, u.name AS teacher_name, u.email AS teacher_email \
         FROM ins JOIN users u ON u.id = ins.teacher_id",
    )
    .bind(Uuid::new_v4())
    .bind(title)
    .bind(description)
    .bind(teacher_id)
    .fetch_one(pool)
    .await
}

/// Partial update: absent fields keep their stored value.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    title: Option<&str>,
    description: Option<&str>,
    teacher_id: Option<Uuid>,
) -> Result<Option<CourseWithTeacher>, sqlx::Error> {
    sqlx::query_as::<_, CourseWithTeacher>(
        "WITH upd AS (\
             UPDATE courses SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 teacher_id = COALESCE($4, teacher_id), \
                 updated_at = now() \
             WHERE id = $1 RETURNING *\
         ) \
         SELECT upd.id, upd.title, upd.description, upd.teacher_id, upd.created_at, \
                upd.updated_at, u.name AS teacher_name, u.email AS teacher_email \
         FROM upd JOIN users u ON u.id = upd.teacher_id",
    )
    .bind(id)
    .bind(title)
    .bind(description)
    .bind(teacher_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM courses WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Teacher id of a course, used for ownership checks.
pub async fn teacher_of(pool: &PgPool, id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>("SELECT teacher_id FROM courses WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
