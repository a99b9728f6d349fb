use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub name: String,
}

/// Role filter for the course list; a request carries exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseRole {
    Student,
    Teacher,
}

impl CourseRole {
    /// Query parameter name understood by the courses endpoint.
    pub fn query_param(self) -> &'static str {
        match self {
            CourseRole::Student => "studentId",
            CourseRole::Teacher => "teacherId",
        }
    }
}
