use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flattened view of one course-work item joined with its course and the
/// student's submission. Built fresh for every query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub course_title: String,
    pub course_work_title: String,
    pub link: String,
    pub due: Option<DateTime<Utc>>,
}
