pub mod aggregate;
pub mod classroom;
pub mod fetch_once;

pub use aggregate::{AssignmentQuery, StudentData};
pub use classroom::ClassroomService;
pub use fetch_once::{FetchOnce, FetchStatus};
