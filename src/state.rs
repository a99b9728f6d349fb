use std::sync::Arc;

use crate::services::ClassroomService;

#[derive(Clone)]
pub struct AppState {
    pub classroom: Arc<ClassroomService>,
}
