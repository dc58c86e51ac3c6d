//! Role- and ownership-based authorization decisions.
//!
//! Both authentication schemes resolve a caller the same way: the claim (a
//! session user id or a decoded bearer token) is only a lookup key, and the
//! identity is re-fetched here before any decision is made. A caller whose
//! record has since gone missing or left ACTIVE status is unauthenticated.

use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Role, User};
use crate::database::{courses, users};
use crate::error::ApiError;

/// Re-fetch the identity behind a claim and require it to be ACTIVE.
pub async fn current_user(pool: &PgPool, user_id: Uuid) -> Result<User, ApiError> {
    let user = users::find_by_id(pool, user_id)
        .await?
        .ok_or_else(ApiError::unauthorized)?;

    if !user.is_active() {
        return Err(ApiError::unauthorized());
    }

    Ok(user)
}

/// Administrator-only actions: stats, user listing, approval, rejection,
/// status changes.
pub fn require_admin(user: &User) -> Result<(), ApiError> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(ApiError::forbidden())
    }
}

/// Mutating course/schedule/group/lesson handlers are teacher- or
/// administrator-invoked; students are denied.
pub fn require_staff(user: &User) -> Result<(), ApiError> {
    match user.role() {
        Some(Role::Teacher) | Some(Role::Administrator) => Ok(()),
        _ => Err(ApiError::forbidden()),
    }
}

/// Administrator, or the teacher who owns the course. Another teacher is
/// authenticated but forbidden. A missing course is 404.
pub async fn require_course_teacher(
    pool: &PgPool,
    user: &User,
    course_id: Uuid,
) -> Result<(), ApiError> {
    let teacher_id = courses::teacher_of(pool, course_id).await?;
    course_teacher_access(user, teacher_id)
}

/// Ownership decision for a course, separated from the lookup. A missing
/// course is 404 for everyone, administrators included.
fn course_teacher_access(user: &User, teacher_id: Option<Uuid>) -> Result<(), ApiError> {
    let teacher_id = teacher_id.ok_or_else(|| ApiError::not_found("Course not found"))?;

    if user.is_admin() {
        return Ok(());
    }

    if user.role() == Some(Role::Teacher) && teacher_id == user.id {
        Ok(())
    } else {
        Err(ApiError::forbidden())
    }
}

/// Enumeration strategy for course listings: selected by role before the
/// query runs, a data-scoping rule rather than a binary allow/deny.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseScope {
    All,
    Teaching(Uuid),
    Enrolled(Uuid),
}

pub fn course_scope(user: &User) -> CourseScope {
    match user.role() {
        Some(Role::Administrator) => CourseScope::All,
        Some(Role::Teacher) => CourseScope::Teaching(user.id),
        _ => CourseScope::Enrolled(user.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(role: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: "t@example.com".into(),
            name: "T".into(),
            role: role.into(),
            status: "ACTIVE".into(),
            password_hash: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn admin_checks() {
        assert!(require_admin(&user("ADMINISTRATOR")).is_ok());
        assert!(require_admin(&user("TEACHER")).is_err());
        assert!(require_admin(&user("STUDENT")).is_err());
    }

    #[test]
    fn staff_checks() {
        assert!(require_staff(&user("ADMINISTRATOR")).is_ok());
        assert!(require_staff(&user("TEACHER")).is_ok());
        assert!(require_staff(&user("STUDENT")).is_err());
        assert!(require_staff(&user("SOMETHING_ELSE")).is_err());
    }

    #[test]
    fn course_ownership_checks() {
        use axum::http::StatusCode;

        let teacher = user("TEACHER");

        // The owning teacher passes; any other caller short of admin is 403
        assert!(course_teacher_access(&teacher, Some(teacher.id)).is_ok());

        let other = course_teacher_access(&teacher, Some(Uuid::new_v4())).unwrap_err();
        assert_eq!(other.status_code(), StatusCode::FORBIDDEN);

        let student = course_teacher_access(&user("STUDENT"), Some(Uuid::new_v4())).unwrap_err();
        assert_eq!(student.status_code(), StatusCode::FORBIDDEN);

        // Administrators pass regardless of ownership
        assert!(course_teacher_access(&user("ADMINISTRATOR"), Some(Uuid::new_v4())).is_ok());
    }

    #[test]
    fn missing_course_is_404_for_everyone() {
        use axum::http::StatusCode;

        for role in ["ADMINISTRATOR", "TEACHER", "STUDENT"] {
            let err = course_teacher_access(&user(role), None).unwrap_err();
            assert_eq!(err.status_code(), StatusCode::NOT_FOUND, "{role}");
        }
    }

    #[test]
    fn scope_follows_role() {
        let admin = user("ADMINISTRATOR");
        assert_eq!(course_scope(&admin), CourseScope::All);

        let teacher = user("TEACHER");
        assert_eq!(course_scope(&teacher), CourseScope::Teaching(teacher.id));

        let student = user("STUDENT");
        assert_eq!(course_scope(&student), CourseScope::Enrolled(student.id));
    }
}
