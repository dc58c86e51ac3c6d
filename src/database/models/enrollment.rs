use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Enrollment row joined with the enrolled student's display fields.
#[derive(Debug, Clone, FromRow)]
pub struct EnrollmentWithStudent {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub student_name: String,
    pub student_email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentRef {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub course_id: Uuid,
    pub student: StudentRef,
    pub created_at: DateTime<Utc>,
}

impl From<EnrollmentWithStudent> for EnrollmentResponse {
    fn from(row: EnrollmentWithStudent) -> Self {
        Self {
            id: row.id,
            student_id: row.student_id,
            course_id: row.course_id,
            student: StudentRef {
                name: row.student_name,
                email: row.student_email,
            },
            created_at: row.created_at,
        }
    }
}
