use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseWorkItem {
    pub id: String,
    pub title: String,
    pub link: String,
    pub due: Option<DateTime<Utc>>,
}
