use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

use goalpath_core::analysis::{analyze_offline, build_strategies};
use goalpath_core::board::{BoardError, DashboardSummary, GoalBoard};
use goalpath_core::calendar;
use goalpath_core::strategy::{ParsedGoal, PlanningStrategy};
use goalpath_store::models::{Goal, Task};
use goalpath_store::queries::goals::LookupError;
use goalpath_store::queries::tasks::GoalProgress;

/// Shared handle to the loaded board. Handlers take the lock for the whole
/// request so mutations and their saves are serialized.
pub type SharedBoard = Arc<Mutex<GoalBoard>>;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn unprocessable(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: msg.into(),
        }
    }
}

impl From<BoardError> for AppError {
    fn from(err: BoardError) -> Self {
        let status = match &err {
            BoardError::GoalNotFound(_)
            | BoardError::TaskNotFound(_)
            | BoardError::Lookup(LookupError::NotFound { .. }) => StatusCode::NOT_FOUND,
            BoardError::Lookup(LookupError::Ambiguous { .. }) => StatusCode::BAD_REQUEST,
            BoardError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct GoalSummaryResponse {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress: GoalProgress,
}

#[derive(Debug, Serialize)]
pub struct GoalDetailResponse {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress: GoalProgress,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Serialize)]
pub struct TaskToggleResponse {
    #[serde(flatten)]
    pub task: Task,
    /// Set when the change could not be saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StrategiesRequest {
    pub goal: String,
}

#[derive(Debug, Serialize)]
pub struct StrategiesResponse {
    pub goal: ParsedGoal,
    pub strategies: Vec<PlanningStrategy>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(board: SharedBoard) -> Router {
    Router::new()
        .route("/api/goals", get(list_goals))
        .route("/api/goals/{id}", get(get_goal_detail))
        .route("/api/tasks/today", get(today_tasks))
        .route("/api/tasks/{id}/toggle", post(toggle_task))
        .route("/api/strategies", post(strategies))
        .route("/api/summary", get(summary))
        .layer(CorsLayer::permissive())
        .with_state(board)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(board: GoalBoard, bind: &str, port: u16) -> Result<()> {
    let app = build_router(Arc::new(Mutex::new(board)));
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("goalpath serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("goalpath serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl+C; shutting down");
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn list_goals(State(board): State<SharedBoard>) -> Json<Vec<GoalSummaryResponse>> {
    let board = board.lock().await;
    let goals = board
        .goals()
        .iter()
        .map(|goal| GoalSummaryResponse {
            goal: goal.clone(),
            progress: board.goal_progress(goal.id),
        })
        .collect();
    Json(goals)
}

async fn get_goal_detail(
    State(board): State<SharedBoard>,
    Path(id): Path<String>,
) -> Result<Json<GoalDetailResponse>, AppError> {
    let board = board.lock().await;
    let goal = board.resolve_goal(&id)?.clone();
    Ok(Json(GoalDetailResponse {
        progress: board.goal_progress(goal.id),
        tasks: board.tasks_for_goal(goal.id),
        goal,
    }))
}

async fn today_tasks(State(board): State<SharedBoard>) -> Json<Vec<Task>> {
    let board = board.lock().await;
    Json(board.today_tasks(calendar::today()))
}

async fn toggle_task(
    State(board): State<SharedBoard>,
    Path(id): Path<String>,
) -> Result<Json<TaskToggleResponse>, AppError> {
    let mut board = board.lock().await;
    let task_id = board.resolve_task(&id)?.id;
    board.toggle_task(task_id)?;
    let warning = board.take_notice().map(|n| n.message);
    let task = board
        .task(task_id)
        .cloned()
        .ok_or(BoardError::TaskNotFound(task_id))?;
    Ok(Json(TaskToggleResponse { task, warning }))
}

async fn strategies(
    Json(request): Json<StrategiesRequest>,
) -> Result<Json<StrategiesResponse>, AppError> {
    if request.goal.trim().is_empty() {
        return Err(AppError::bad_request("goal text must not be empty"));
    }
    let analysis = analyze_offline(&request.goal);
    let strategies =
        build_strategies(&analysis.analysis).map_err(|e| AppError::unprocessable(e.to_string()))?;
    Ok(Json(StrategiesResponse {
        goal: analysis.analysis.goal,
        strategies,
    }))
}

async fn summary(State(board): State<SharedBoard>) -> Json<DashboardSummary> {
    let board = board.lock().await;
    Json(board.dashboard_summary(calendar::today()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
