use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::error::AppError;
use crate::models::Assignment;
use crate::services::AssignmentQuery;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct RoleStatus {
    pub active: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/assignments/completed", get(completed))
        .route("/assignments/approaching", get(approaching))
        .route("/assignments/missed", get(missed))
        .route("/assignments/no-due-date", get(no_due_date))
        .route("/roles/student", get(student_role))
        .route("/roles/teacher", get(teacher_role))
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn list(state: &AppState, query: AssignmentQuery) -> Result<Json<Vec<Assignment>>, AppError> {
    let assignments = state.classroom.assignments(query).await?;
    Ok(Json(assignments))
}

async fn completed(State(state): State<AppState>) -> Result<Json<Vec<Assignment>>, AppError> {
    list(&state, AssignmentQuery::Completed).await
}

async fn approaching(State(state): State<AppState>) -> Result<Json<Vec<Assignment>>, AppError> {
    list(&state, AssignmentQuery::ApproachingDueDate).await
}

async fn missed(State(state): State<AppState>) -> Result<Json<Vec<Assignment>>, AppError> {
    list(&state, AssignmentQuery::MissedDueDate).await
}

async fn no_due_date(State(state): State<AppState>) -> Result<Json<Vec<Assignment>>, AppError> {
    list(&state, AssignmentQuery::NoDueDate).await
}

async fn student_role(State(state): State<AppState>) -> Result<Json<RoleStatus>, AppError> {
    let active = state.classroom.is_student_role_active().await?;
    Ok(Json(RoleStatus { active }))
}

async fn teacher_role(State(state): State<AppState>) -> Result<Json<RoleStatus>, AppError> {
    let active = state.classroom.is_teacher_role_active().await?;
    Ok(Json(RoleStatus { active }))
}
