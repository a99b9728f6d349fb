pub mod assignment;
pub mod course;
pub mod course_work;
pub mod submission;

pub use assignment::Assignment;
pub use course::{Course, CourseRole};
pub use course_work::CourseWorkItem;
pub use submission::{StudentSubmission, SubmissionState};
