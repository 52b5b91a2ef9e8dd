//! Record types for `CheckMyGrade`

pub mod course;
pub mod grades;
pub mod login_user;
pub mod professor;
pub mod student;

pub use course::{validate_course_code, Course, DEFAULT_CREDITS};
pub use grades::{Grade, GradeBand, GRADE_BANDS};
pub use login_user::{LoginUser, Role};
pub use professor::Professor;
pub use student::{Enrollment, Student};
