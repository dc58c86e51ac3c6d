pub mod course;
pub mod enrollment;
pub mod group;
pub mod group_schedule;
pub mod lesson;
pub mod schedule;
pub mod user;

pub use course::{CourseResponse, CourseWithTeacher, TeacherRef};
pub use enrollment::{Enrollment, EnrollmentResponse, EnrollmentWithStudent, StudentRef};
pub use group::StudentGroup;
pub use group_schedule::GroupSchedule;
pub use lesson::Lesson;
pub use schedule::Schedule;
pub use user::{Role, User, UserStatus};
