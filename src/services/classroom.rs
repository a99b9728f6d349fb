use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{info, warn};

use crate::classroom::ClassroomClient;
use crate::classroom::fetch::{fetch_course_work, fetch_courses, fetch_student_submissions};
use crate::clock::Clock;
use crate::error::AppError;
use crate::models::{Assignment, Course, CourseRole};
use crate::services::aggregate::{AssignmentQuery, StudentData};
use crate::services::fetch_once::{FetchOnce, FetchStatus};

/// Assignment queries and role checks over the Classroom API.
///
/// Student data is fetched on the first query and then kept for the lifetime
/// of the service. Construct a new service to pick up fresh data.
pub struct ClassroomService {
    client: Arc<dyn ClassroomClient>,
    clock: Arc<dyn Clock>,
    student: Arc<FetchOnce<StudentData>>,
    teacher_courses: Arc<FetchOnce<Vec<Course>>>,
}

impl ClassroomService {
    pub fn new(client: Arc<dyn ClassroomClient>, clock: Arc<dyn Clock>) -> Self {
        Self {
            client,
            clock,
            student: Arc::new(FetchOnce::new()),
            teacher_courses: Arc::new(FetchOnce::new()),
        }
    }

    pub async fn completed_assignments(&self) -> Result<Vec<Assignment>, AppError> {
        self.assignments(AssignmentQuery::Completed).await
    }

    pub async fn assignments_with_approaching_due_date(&self) -> Result<Vec<Assignment>, AppError> {
        self.assignments(AssignmentQuery::ApproachingDueDate).await
    }

    pub async fn assignments_with_missed_due_date(&self) -> Result<Vec<Assignment>, AppError> {
        self.assignments(AssignmentQuery::MissedDueDate).await
    }

    pub async fn assignments_without_due_date(&self) -> Result<Vec<Assignment>, AppError> {
        self.assignments(AssignmentQuery::NoDueDate).await
    }

    pub async fn assignments(&self, query: AssignmentQuery) -> Result<Vec<Assignment>, AppError> {
        let data = self.student_data().await?;
        Ok(data.assignments(query, self.clock.now()))
    }

    /// Callback form of [`ClassroomService::assignments`]. Callbacks queued
    /// behind a running fetch are invoked in the order they were registered.
    ///
    /// Must be called from within a Tokio runtime, which runs the first fetch.
    pub fn query_with<C>(&self, query: AssignmentQuery, callback: C)
    where
        C: FnOnce(Vec<Assignment>) + Send + 'static,
    {
        let client = Arc::clone(&self.client);
        let clock = Arc::clone(&self.clock);
        self.student.run(
            move || load_student_data(client),
            Box::new(move |data: Arc<StudentData>| callback(data.assignments(query, clock.now()))),
        );
    }

    pub async fn is_student_role_active(&self) -> Result<bool, AppError> {
        Ok(!self.student_data().await?.courses.is_empty())
    }

    pub async fn is_teacher_role_active(&self) -> Result<bool, AppError> {
        let client = Arc::clone(&self.client);
        let courses = self
            .teacher_courses
            .get(move || async move {
                fetch_courses(client.as_ref(), CourseRole::Teacher)
                    .await
                    .unwrap_or_else(|e| {
                        warn!("Failed to fetch teacher courses: {}", e);
                        Vec::new()
                    })
            })
            .await?;
        Ok(!courses.is_empty())
    }

    pub fn student_fetch_status(&self) -> FetchStatus {
        self.student.status()
    }

    async fn student_data(&self) -> Result<Arc<StudentData>, AppError> {
        let client = Arc::clone(&self.client);
        self.student.get(move || load_student_data(client)).await
    }
}

/// Fetches student courses, then course work and submissions for every course
/// concurrently. A list that fails to load is replaced by an empty one.
async fn load_student_data(client: Arc<dyn ClassroomClient>) -> StudentData {
    info!("Fetching student courses");
    let courses = fetch_courses(client.as_ref(), CourseRole::Student)
        .await
        .unwrap_or_else(|e| {
            warn!("Failed to fetch student courses: {}", e);
            Vec::new()
        });

    let per_course = join_all(courses.iter().map(|course| {
        let client = Arc::clone(&client);
        let course_id = course.id.clone();
        async move {
            let (course_work, submissions) = futures_util::join!(
                fetch_course_work(client.as_ref(), &course_id),
                fetch_student_submissions(client.as_ref(), &course_id),
            );
            let course_work = or_empty(course_work, "course work", &course_id);
            let submissions = or_empty(submissions, "submissions", &course_id);
            (course_id, course_work, submissions)
        }
    }))
    .await;

    let mut data = StudentData {
        courses,
        ..Default::default()
    };
    for (course_id, course_work, submissions) in per_course {
        data.course_work.insert(course_id.clone(), course_work);
        data.submissions.insert(course_id, submissions);
    }

    info!("Fetched student data for {} course(s)", data.courses.len());
    data
}

fn or_empty<T>(result: Result<Vec<T>, AppError>, what: &str, course_id: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!("Discarding {} for course {}: {}", what, course_id, e);
        Vec::new()
    })
}
