//! Paginated fetchers for the three list endpoints.
//!
//! Every fetcher follows `nextPageToken` until the server stops sending one
//! and returns the concatenation of all pages in page order. A failed page
//! fails the whole list: whatever was accumulated before is dropped and the
//! error is returned. No retries happen here.

use std::future::Future;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde_json::Value;
use tracing::debug;

use super::{ClassroomClient, dto};
use crate::error::AppError;
use crate::models::{Course, CourseRole, CourseWorkItem, StudentSubmission, SubmissionState};

const ACTIVE_COURSE_STATE: &str = "ACTIVE";
const PUBLISHED_COURSE_WORK_STATE: &str = "PUBLISHED";

async fn collect_pages<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, AppError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<(Vec<T>, Option<String>), AppError>>,
{
    let mut items = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let (page_items, next_page_token) = fetch_page(page_token.take()).await?;
        pages += 1;
        items.extend(page_items);

        match next_page_token.filter(|token| !token.is_empty()) {
            Some(token) => page_token = Some(token),
            None => {
                debug!("Collected {} items over {} page(s)", items.len(), pages);
                return Ok(items);
            }
        }
    }
}

pub async fn fetch_courses(
    client: &dyn ClassroomClient,
    role: CourseRole,
) -> Result<Vec<Course>, AppError> {
    collect_pages(move |page_token| async move {
        let page = client.list_courses(role, page_token.as_deref()).await?;
        let courses = page
            .courses
            .into_iter()
            .filter(|c| c.course_state.as_deref() == Some(ACTIVE_COURSE_STATE))
            .map(|c| Course {
                id: c.id,
                name: c.name,
            })
            .collect::<Vec<_>>();
        Ok::<_, AppError>((courses, page.next_page_token))
    })
    .await
}

pub async fn fetch_course_work(
    client: &dyn ClassroomClient,
    course_id: &str,
) -> Result<Vec<CourseWorkItem>, AppError> {
    collect_pages(move |page_token| async move {
        let page = client
            .list_course_work(course_id, page_token.as_deref())
            .await?;
        let items = page
            .course_work
            .into_iter()
            .filter(|w| w.state.as_deref() == Some(PUBLISHED_COURSE_WORK_STATE))
            .map(|w| CourseWorkItem {
                due: due_timestamp(w.due_date.as_ref(), w.due_time.as_ref()),
                id: w.id,
                title: w.title,
                link: w.alternate_link,
            })
            .collect::<Vec<_>>();
        Ok::<_, AppError>((items, page.next_page_token))
    })
    .await
}

pub async fn fetch_student_submissions(
    client: &dyn ClassroomClient,
    course_id: &str,
) -> Result<Vec<StudentSubmission>, AppError> {
    collect_pages(move |page_token| async move {
        let page = client
            .list_student_submissions(course_id, page_token.as_deref())
            .await?;
        let submissions = page
            .student_submissions
            .into_iter()
            .map(|s| StudentSubmission {
                state: SubmissionState::from_raw(s.state.as_deref(), s.assigned_grade.is_some()),
                id: s.id,
                course_work_id: s.course_work_id,
            })
            .collect::<Vec<_>>();
        Ok::<_, AppError>((submissions, page.next_page_token))
    })
    .await
}

/// Combines the API's separate due date and time of day into one UTC instant.
/// A missing time means midnight. Fields that do not form a real date or time
/// yield `None` instead of an error.
pub fn due_timestamp(
    date: Option<&dto::Date>,
    time: Option<&dto::TimeOfDay>,
) -> Option<DateTime<Utc>> {
    let date = date?;
    let year = i32::try_from(date.year.as_i64()?).ok()?;
    let date = NaiveDate::from_ymd_opt(year, date_field(&date.month)?, date_field(&date.day)?)?;

    let time = match time {
        Some(t) => NaiveTime::from_hms_nano_opt(
            time_field(&t.hours)?,
            time_field(&t.minutes)?,
            time_field(&t.seconds)?,
            time_field(&t.nanos)?,
        )?,
        None => NaiveTime::MIN,
    };
    Some(date.and_time(time).and_utc())
}

fn date_field(value: &Value) -> Option<u32> {
    u32::try_from(value.as_i64()?).ok()
}

/// Omitted time components count as zero.
fn time_field(value: &Value) -> Option<u32> {
    if value.is_null() {
        return Some(0);
    }
    u32::try_from(value.as_i64()?).ok()
}

#[cfg(test)]
mod tests {
    use chrono::SecondsFormat;
    use serde_json::json;

    use super::*;

    fn date(year: i32, month: i64, day: i64) -> dto::Date {
        dto::Date {
            year: json!(year),
            month: json!(month),
            day: json!(day),
        }
    }

    #[test]
    fn combines_date_and_time() {
        let time = dto::TimeOfDay {
            hours: json!(15),
            minutes: json!(9),
            seconds: json!(25),
            nanos: json!(250_000_000),
        };
        let due = due_timestamp(Some(&date(2023, 4, 25)), Some(&time)).unwrap();
        assert_eq!(
            due.to_rfc3339_opts(SecondsFormat::Millis, true),
            "2023-04-25T15:09:25.250Z"
        );
    }

    #[test]
    fn missing_time_is_midnight() {
        let due = due_timestamp(Some(&date(2023, 4, 25)), None).unwrap();
        assert_eq!(due.to_rfc3339(), "2023-04-25T00:00:00+00:00");
    }

    #[test]
    fn invalid_fields_mean_no_due_date() {
        assert!(due_timestamp(None, None).is_none());
        assert!(due_timestamp(Some(&date(2023, 2, 30)), None).is_none());
        assert!(due_timestamp(Some(&date(2023, 0, 1)), None).is_none());
        let bad_time = dto::TimeOfDay {
            hours: json!(25),
            ..Default::default()
        };
        assert!(due_timestamp(Some(&date(2023, 4, 25)), Some(&bad_time)).is_none());
    }

    #[test]
    fn negative_or_fractional_fields_mean_no_due_date() {
        assert!(due_timestamp(Some(&date(2023, -1, 25)), None).is_none());
        assert!(due_timestamp(Some(&date(2023, 4, 4_294_967_321)), None).is_none());

        let fractional = dto::Date {
            year: json!(2023),
            month: json!(4.5),
            day: json!(25),
        };
        assert!(due_timestamp(Some(&fractional), None).is_none());

        let negative_time = dto::TimeOfDay {
            minutes: json!(-5),
            ..Default::default()
        };
        assert!(due_timestamp(Some(&date(2023, 4, 25)), Some(&negative_time)).is_none());
    }

    #[test]
    fn omitted_time_components_are_zero() {
        let time = dto::TimeOfDay {
            hours: json!(8),
            ..Default::default()
        };
        let due = due_timestamp(Some(&date(2023, 4, 25)), Some(&time)).unwrap();
        assert_eq!(due.to_rfc3339(), "2023-04-25T08:00:00+00:00");
    }
}
