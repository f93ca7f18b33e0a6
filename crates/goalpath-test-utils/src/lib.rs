//! Shared test utilities for goalpath integration tests.
//!
//! - Fixed-date goal fixtures, so schedules are reproducible.
//! - Temp-dir backed [`JsonFileStore`]s; the directory lives as long as the
//!   returned [`TempDir`].
//! - A throwaway plan service on `127.0.0.1:0` that answers every request
//!   with a canned status and body.

use std::net::SocketAddr;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use chrono::NaiveDate;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use goalpath_store::config::StoreConfig;
use goalpath_store::file_store::JsonFileStore;
use goalpath_store::models::Goal;

/// Shorthand for a calendar date in tests.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid test date {year}-{month}-{day}"))
}

/// Monday 2025-06-02; week-aligned fixtures start here.
pub fn monday() -> NaiveDate {
    date(2025, 6, 2)
}

/// An active goal spanning `days` calendar days from `start`.
pub fn goal_for_days(title: &str, start: NaiveDate, days: u64, minutes: u32) -> Goal {
    let end = start
        .checked_add_days(chrono::Days::new(days.saturating_sub(1)))
        .expect("test goal end date overflows");
    Goal::new(title, start, end, minutes)
}

/// Create a [`JsonFileStore`] rooted in a fresh temporary directory.
///
/// Keep the returned [`TempDir`] alive for the duration of the test.
pub fn create_test_store() -> (JsonFileStore, StoreConfig, TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = StoreConfig::new(dir.path().join("data"));
    let store = JsonFileStore::open(&config).expect("failed to open test store");
    (store, config, dir)
}

/// A running canned plan service.
pub struct PlanServer {
    pub addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl PlanServer {
    /// URL of the plan endpoint.
    pub fn endpoint(&self) -> String {
        format!("http://{}/generate-plan", self.addr)
    }
}

impl Drop for PlanServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Serve `POST /generate-plan`, always answering `status` with `body`.
pub async fn spawn_plan_server(status: StatusCode, body: &'static str) -> PlanServer {
    let app = Router::new().route("/generate-plan", post(move || async move { (status, body) }));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no local addr");

    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    PlanServer { addr, handle }
}
