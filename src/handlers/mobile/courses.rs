use axum::Extension;

use crate::database::courses;
use crate::database::manager::DatabaseManager;
use crate::database::models::CourseResponse;
use crate::guard::{self, CourseScope};
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{MobileResponse, MobileResult};

/// GET /mobile/courses - role-scoped enumeration: a student sees courses
/// they are enrolled in, a teacher the courses they teach, an administrator
/// everything
pub async fn list(Extension(auth_user): Extension<AuthUser>) -> MobileResult<Vec<CourseResponse>> {
    let pool = DatabaseManager::pool().await?;
    let user = guard::current_user(&pool, auth_user.user_id).await?;

    let rows = match guard::course_scope(&user) {
        CourseScope::All => courses::list_all(&pool).await?,
        CourseScope::Teaching(id) => courses::list_by_teacher(&pool, id).await?,
        CourseScope::Enrolled(id) => courses::list_enrolled(&pool, id).await?,
    };

    Ok(MobileResponse::success(
        rows.into_iter().map(CourseResponse::from).collect(),
    ))
}
