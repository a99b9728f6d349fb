use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Assigned,
    TurnedIn,
    Graded,
    Other,
}

impl SubmissionState {
    /// Collapses the raw Classroom submission state into the four states the
    /// assignment queries care about. A returned submission only counts as
    /// graded when a grade was actually assigned.
    pub fn from_raw(state: Option<&str>, has_assigned_grade: bool) -> Self {
        match state {
            Some("NEW") | Some("CREATED") | Some("RECLAIMED_BY_STUDENT") => SubmissionState::Assigned,
            Some("TURNED_IN") => SubmissionState::TurnedIn,
            Some("RETURNED") if has_assigned_grade => SubmissionState::Graded,
            Some("RETURNED") => SubmissionState::Assigned,
            _ => SubmissionState::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSubmission {
    pub id: String,
    pub course_work_id: String,
    pub state: SubmissionState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_raw_states() {
        assert_eq!(SubmissionState::from_raw(Some("NEW"), false), SubmissionState::Assigned);
        assert_eq!(SubmissionState::from_raw(Some("CREATED"), false), SubmissionState::Assigned);
        assert_eq!(
            SubmissionState::from_raw(Some("RECLAIMED_BY_STUDENT"), false),
            SubmissionState::Assigned
        );
        assert_eq!(SubmissionState::from_raw(Some("TURNED_IN"), false), SubmissionState::TurnedIn);
        assert_eq!(SubmissionState::from_raw(Some("RETURNED"), true), SubmissionState::Graded);
        assert_eq!(SubmissionState::from_raw(Some("RETURNED"), false), SubmissionState::Assigned);
    }

    #[test]
    fn unknown_or_missing_state_is_other() {
        assert_eq!(
            SubmissionState::from_raw(Some("SUBMISSION_STATE_UNSPECIFIED"), false),
            SubmissionState::Other
        );
        assert_eq!(SubmissionState::from_raw(Some("bogus"), true), SubmissionState::Other);
        assert_eq!(SubmissionState::from_raw(None, false), SubmissionState::Other);
    }
}
