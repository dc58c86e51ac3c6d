use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Course row joined with its owning teacher's display fields.
#[derive(Debug, Clone, FromRow)]
pub struct CourseWithTeacher {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub teacher_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub teacher_name: String,
    pub teacher_email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeacherRef {
    pub name: String,
    pub email: String,
}

/// Response shape: the course with `teacher: { name, email }` nested.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub teacher_id: Uuid,
    pub teacher: TeacherRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CourseWithTeacher> for CourseResponse {
    fn from(row: CourseWithTeacher) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            teacher_id: row.teacher_id,
            teacher: TeacherRef {
                name: row.teacher_name,
                email: row.teacher_email,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_nests_teacher() {
        let now = Utc::now();
        let row = CourseWithTeacher {
            id: Uuid::new_v4(),
            title: "Piano I".into(),
            description: None,
            teacher_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            teacher_name: "Clara Wieck".into(),
            teacher_email: "clara@example.com".into(),
        };
        let json = serde_json::to_value(CourseResponse::from(row)).unwrap();
        assert_eq!(json["title"], "Piano I");
        assert_eq!(json["teacher"]["name"], "Clara Wieck");
        assert_eq!(json["teacher"]["email"], "clara@example.com");
    }
}
