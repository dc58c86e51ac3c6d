pub mod admin;
pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod group_schedules;
pub mod groups;
pub mod lessons;
pub mod mobile;
pub mod schedules;
pub mod users;
