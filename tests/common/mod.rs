#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use glanceables::classroom::{ClassroomClient, dto};
use glanceables::error::AppError;
use glanceables::models::CourseRole;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// In-memory Classroom API. Pages are registered per endpoint key; page `n`
/// is addressed by the token `page-n`, and every page but the last gets a
/// `nextPageToken` pointing at the following one.
#[derive(Default)]
pub struct FakeClassroom {
    pages: HashMap<String, Vec<Value>>,
    failing: HashSet<(String, usize)>,
    calls: Mutex<HashMap<String, usize>>,
    delay: Option<Duration>,
}

pub fn courses_key(role: CourseRole) -> String {
    match role {
        CourseRole::Student => "courses:student".to_string(),
        CourseRole::Teacher => "courses:teacher".to_string(),
    }
}

pub fn course_work_key(course_id: &str) -> String {
    format!("courseWork:{}", course_id)
}

pub fn submissions_key(course_id: &str) -> String {
    format!("submissions:{}", course_id)
}

impl FakeClassroom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(mut self, key: String, pages: Vec<Value>) -> Self {
        self.pages.insert(key, pages);
        self
    }

    pub fn failing_page(mut self, key: String, index: usize) -> Self {
        self.failing.insert((key, index));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self, key: &str) -> usize {
        self.calls.lock().unwrap().get(key).copied().unwrap_or(0)
    }

    async fn page<T: DeserializeOwned>(&self, key: String, page_token: Option<&str>) -> Result<T, AppError> {
        *self.calls.lock().unwrap().entry(key.clone()).or_default() += 1;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let index = page_token
            .map(|t| t.trim_start_matches("page-").parse::<usize>().unwrap())
            .unwrap_or(0);
        if self.failing.contains(&(key.clone(), index)) {
            return Err(AppError::Api {
                status: 500,
                body: "internal error".to_string(),
            });
        }

        let page = match self.pages.get(&key) {
            Some(pages) => {
                let mut page = pages[index].clone();
                if index + 1 < pages.len() {
                    page["nextPageToken"] = json!(format!("page-{}", index + 1));
                }
                page
            }
            None => json!({}),
        };
        Ok(serde_json::from_value(page).unwrap())
    }
}

#[async_trait]
impl ClassroomClient for FakeClassroom {
    async fn list_courses(
        &self,
        role: CourseRole,
        page_token: Option<&str>,
    ) -> Result<dto::ListCoursesResponse, AppError> {
        self.page(courses_key(role), page_token).await
    }

    async fn list_course_work(
        &self,
        course_id: &str,
        page_token: Option<&str>,
    ) -> Result<dto::ListCourseWorkResponse, AppError> {
        self.page(course_work_key(course_id), page_token).await
    }

    async fn list_student_submissions(
        &self,
        course_id: &str,
        page_token: Option<&str>,
    ) -> Result<dto::ListStudentSubmissionsResponse, AppError> {
        self.page(submissions_key(course_id), page_token).await
    }
}

pub fn course(id: &str, name: &str, state: &str) -> Value {
    json!({ "id": id, "name": name, "courseState": state })
}

pub fn courses_page(courses: Vec<Value>) -> Value {
    json!({ "courses": courses })
}

pub fn course_work(id: &str, title: &str, state: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "state": state,
        "alternateLink": format!("https://classroom.google.com/c/{}", id),
    })
}

/// Course work due 2023-04-25T15:09:25.250Z.
pub fn course_work_due(id: &str, title: &str) -> Value {
    let mut work = course_work(id, title, "PUBLISHED");
    work["dueDate"] = json!({ "year": 2023, "month": 4, "day": 25 });
    work["dueTime"] = json!({ "hours": 15, "minutes": 9, "seconds": 25, "nanos": 250000000 });
    work
}

pub fn course_work_page(items: Vec<Value>) -> Value {
    json!({ "courseWork": items })
}

pub fn submission(id: &str, course_work_id: &str, state: &str) -> Value {
    json!({ "id": id, "courseWorkId": course_work_id, "state": state })
}

pub fn submissions_page(items: Vec<Value>) -> Value {
    json!({ "studentSubmissions": items })
}
