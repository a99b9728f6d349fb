use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::{Assignment, Course, CourseWorkItem, StudentSubmission, SubmissionState};

/// Everything fetched for the student role, keyed by course id.
#[derive(Debug, Clone, Default)]
pub struct StudentData {
    pub courses: Vec<Course>,
    pub course_work: HashMap<String, Vec<CourseWorkItem>>,
    pub submissions: HashMap<String, Vec<StudentSubmission>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentQuery {
    Completed,
    ApproachingDueDate,
    MissedDueDate,
    NoDueDate,
}

impl AssignmentQuery {
    pub fn due_matches(self, due: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match self {
            AssignmentQuery::Completed => true,
            AssignmentQuery::ApproachingDueDate => due.is_some_and(|due| now < due),
            AssignmentQuery::MissedDueDate => due.is_some_and(|due| now > due),
            AssignmentQuery::NoDueDate => due.is_none(),
        }
    }

    pub fn state_matches(self, state: SubmissionState) -> bool {
        match self {
            AssignmentQuery::Completed => {
                matches!(state, SubmissionState::TurnedIn | SubmissionState::Graded)
            }
            AssignmentQuery::ApproachingDueDate
            | AssignmentQuery::MissedDueDate
            | AssignmentQuery::NoDueDate => state == SubmissionState::Assigned,
        }
    }
}

impl StudentData {
    /// Joins courses, course work and submissions into assignments matching
    /// `query`. Output follows course order, then course-work order.
    pub fn assignments(&self, query: AssignmentQuery, now: DateTime<Utc>) -> Vec<Assignment> {
        let mut assignments = Vec::new();

        for course in &self.courses {
            let Some(items) = self.course_work.get(&course.id) else {
                continue;
            };

            // One submission per course-work item for a student; keep the first.
            let mut submission_by_work: HashMap<&str, &StudentSubmission> = HashMap::new();
            for submission in self.submissions.get(&course.id).into_iter().flatten() {
                submission_by_work
                    .entry(submission.course_work_id.as_str())
                    .or_insert(submission);
            }

            for item in items {
                if !query.due_matches(item.due, now) {
                    continue;
                }
                let Some(submission) = submission_by_work.get(item.id.as_str()) else {
                    continue;
                };
                if query.state_matches(submission.state) {
                    assignments.push(Assignment {
                        course_title: course.name.clone(),
                        course_work_title: item.title.clone(),
                        link: item.link.clone(),
                        due: item.due,
                    });
                }
            }
        }

        assignments
    }
}
