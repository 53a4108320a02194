//! Task submission route handlers.

use axum::{Json, extract::State, http::StatusCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::db::TaskLogRepository;
use crate::error::Result;
use crate::middleware::auth::RequireAuth;
use crate::models::TaskLog;
use crate::routes::auth::load_active_user;
use crate::services::TaskSubmission;
use crate::state::AppState;

/// New task submission body.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    pub description: String,
    pub supervisors: Vec<String>,
}

/// A pending task submission.
#[derive(Debug, Serialize)]
pub struct TaskView {
    pub id: i32,
    pub description: String,
    pub supervisors: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&TaskLog> for TaskView {
    fn from(task: &TaskLog) -> Self {
        Self {
            id: task.id.as_i32(),
            description: task.description.clone(),
            supervisors: task.admin_supervised.clone(),
            created_at: task.created_at,
        }
    }
}

/// List the shopper's pending task submissions.
#[instrument(skip(state, session, auth))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(auth): RequireAuth,
) -> Result<Json<Vec<TaskView>>> {
    let user = load_active_user(&state, &session, &auth).await?;

    let tasks = TaskLogRepository::new(state.pool())
        .list_by_user(user.id)
        .await?;

    Ok(Json(tasks.iter().map(TaskView::from).collect()))
}

/// Submit a completed task for staff approval.
#[instrument(skip(state, session, auth, body))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(auth): RequireAuth,
    Json(body): Json<CreateRequest>,
) -> Result<(StatusCode, Json<TaskView>)> {
    let submission = TaskSubmission::parse(&body.description, &body.supervisors)?;

    let user = load_active_user(&state, &session, &auth).await?;

    let task = TaskLogRepository::new(state.pool())
        .create(
            &submission.description,
            &submission.supervisors,
            user.id,
            &user.name,
        )
        .await?;

    tracing::info!(task_id = %task.id, "task submitted for approval");

    Ok((StatusCode::CREATED, Json(TaskView::from(&task))))
}
