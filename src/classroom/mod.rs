pub mod dto;
pub mod fetch;

use std::env;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::models::CourseRole;

pub const DEFAULT_BASE_URL: &str = "https://classroom.googleapis.com/v1/";

/// OAuth2 scopes the access token has to carry for the three list endpoints.
pub const CLASSROOM_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/classroom.courses.readonly",
    "https://www.googleapis.com/auth/classroom.coursework.me.readonly",
    "https://www.googleapis.com/auth/classroom.coursework.students.readonly",
];

#[derive(Clone, Debug)]
pub struct ClassroomConfig {
    pub access_token: String,
    pub base_url: String,
    pub page_size: Option<u32>,
}

impl ClassroomConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let access_token = env::var("CLASSROOM_ACCESS_TOKEN")
            .map_err(|_| AppError::Config("CLASSROOM_ACCESS_TOKEN is not set".to_string()))?;
        let base_url = env::var("CLASSROOM_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let page_size = match env::var("CLASSROOM_PAGE_SIZE") {
            Ok(raw) => Some(raw.parse::<u32>().ok().filter(|n| *n > 0).ok_or_else(|| {
                AppError::Config(format!("CLASSROOM_PAGE_SIZE must be a positive integer, got {}", raw))
            })?),
            Err(_) => None,
        };

        Ok(Self {
            access_token,
            base_url,
            page_size,
        })
    }
}

/// One call per page of each list endpoint. Pagination itself lives in
/// [`fetch`], so implementations only need to know how to get a single page.
#[async_trait]
pub trait ClassroomClient: Send + Sync {
    async fn list_courses(
        &self,
        role: CourseRole,
        page_token: Option<&str>,
    ) -> Result<dto::ListCoursesResponse, AppError>;

    async fn list_course_work(
        &self,
        course_id: &str,
        page_token: Option<&str>,
    ) -> Result<dto::ListCourseWorkResponse, AppError>;

    async fn list_student_submissions(
        &self,
        course_id: &str,
        page_token: Option<&str>,
    ) -> Result<dto::ListStudentSubmissionsResponse, AppError>;
}

pub struct ClassroomHttpClient {
    client: Client,
    base_url: Url,
    config: ClassroomConfig,
}

impl ClassroomHttpClient {
    pub fn new(config: ClassroomConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build http client: {}", e)))?;

        // Url::join drops the last path segment unless the base ends with '/'.
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| AppError::Config(format!("Invalid base url {}: {}", config.base_url, e)))?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        page_token: Option<&str>,
    ) -> Result<T, AppError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| AppError::Config(format!("Invalid request path {}: {}", path, e)))?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
            if let Some(size) = self.config.page_size {
                query.append_pair("pageSize", &size.to_string());
            }
            if let Some(token) = page_token {
                query.append_pair("pageToken", token);
            }
        }

        tracing::debug!("GET {}", url.path());

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.config.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body_text = response.text().await?;
        serde_json::from_str::<T>(&body_text).map_err(|e| {
            tracing::error!("Failed to parse {}: {}", path, e);
            AppError::Parse(e.to_string())
        })
    }
}

#[async_trait]
impl ClassroomClient for ClassroomHttpClient {
    async fn list_courses(
        &self,
        role: CourseRole,
        page_token: Option<&str>,
    ) -> Result<dto::ListCoursesResponse, AppError> {
        self.get_page("courses", &[(role.query_param(), "me")], page_token)
            .await
    }

    async fn list_course_work(
        &self,
        course_id: &str,
        page_token: Option<&str>,
    ) -> Result<dto::ListCourseWorkResponse, AppError> {
        let path = format!("courses/{}/courseWork", course_id);
        self.get_page(&path, &[], page_token).await
    }

    async fn list_student_submissions(
        &self,
        course_id: &str,
        page_token: Option<&str>,
    ) -> Result<dto::ListStudentSubmissionsResponse, AppError> {
        // "-" asks for submissions across all course work of the course.
        let path = format!("courses/{}/courseWork/-/studentSubmissions", course_id);
        self.get_page(&path, &[], page_token).await
    }
}

pub struct NoopClassroomClient;

#[async_trait]
impl ClassroomClient for NoopClassroomClient {
    async fn list_courses(
        &self,
        _role: CourseRole,
        _page_token: Option<&str>,
    ) -> Result<dto::ListCoursesResponse, AppError> {
        Ok(dto::ListCoursesResponse::default())
    }

    async fn list_course_work(
        &self,
        _course_id: &str,
        _page_token: Option<&str>,
    ) -> Result<dto::ListCourseWorkResponse, AppError> {
        Ok(dto::ListCourseWorkResponse::default())
    }

    async fn list_student_submissions(
        &self,
        _course_id: &str,
        _page_token: Option<&str>,
    ) -> Result<dto::ListStudentSubmissionsResponse, AppError> {
        Ok(dto::ListStudentSubmissionsResponse::default())
    }
}
