use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCoursesResponse {
    #[serde(default)]
    pub courses: Vec<RawCourse>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCourse {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub course_state: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCourseWorkResponse {
    #[serde(default)]
    pub course_work: Vec<RawCourseWork>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCourseWork {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub alternate_link: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub due_date: Option<Date>,
    #[serde(default)]
    pub due_time: Option<TimeOfDay>,
}

/// Calendar date as sent by the API. Fields may be omitted. They are kept as
/// raw JSON so that out-of-range or non-integer values only invalidate the due
/// date instead of failing the whole page.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Date {
    #[serde(default)]
    pub year: Value,
    #[serde(default)]
    pub month: Value,
    #[serde(default)]
    pub day: Value,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct TimeOfDay {
    #[serde(default)]
    pub hours: Value,
    #[serde(default)]
    pub minutes: Value,
    #[serde(default)]
    pub seconds: Value,
    #[serde(default)]
    pub nanos: Value,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStudentSubmissionsResponse {
    #[serde(default)]
    pub student_submissions: Vec<RawStudentSubmission>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStudentSubmission {
    pub id: String,
    #[serde(default)]
    pub course_work_id: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub assigned_grade: Option<f64>,
}
