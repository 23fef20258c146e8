//! Integration tests for the MyTrack admin dashboard.
//!
//! The dashboard is driven against an `httpmock` server standing in for the
//! MyTrack backend. No external services are needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mytrack-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `dashboard_loading` - Initial loads, the ready gate, tolerated failures
//! - `dashboard_actions` - User, verification and page actions
//! - `plan_editor` - Per-plan drafts and saving
//! - `metrics_poller` - Periodic refresh and cancellation

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::time::Duration;

use httpmock::prelude::*;
use httpmock::Mock;
use mytrack_admin::{AdminApi, Dashboard, DashboardState, Notification};
use mytrack_core::Role;
use secrecy::SecretString;
use serde_json::Value;
use tokio::sync::broadcast;
use url::Url;

pub mod fixtures;

pub const TEST_TOKEN: &str = "test-admin-token";

/// Long enough that no poll fires during a test unless asked for.
const IDLE_POLL_INTERVAL: Duration = Duration::from_secs(3600);

const STATE_TIMEOUT: Duration = Duration::from_secs(5);

/// A mock MyTrack backend.
pub struct TestBackend {
    server: MockServer,
}

/// Mocks for every read endpoint, to count hits.
pub struct ReadMocks<'a> {
    pub users: Mock<'a>,
    pub pages: Mock<'a>,
    pub analytics: Mock<'a>,
    pub metrics: Mock<'a>,
    pub verification: Mock<'a>,
    pub plan_configs: Mock<'a>,
}

impl TestBackend {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start_async().await,
        }
    }

    #[must_use]
    pub const fn server(&self) -> &MockServer {
        &self.server
    }

    #[must_use]
    pub fn api(&self) -> AdminApi {
        let base = Url::parse(&self.server.url("/api/")).unwrap();
        AdminApi::new(base, &SecretString::from(TEST_TOKEN), Duration::from_secs(5)).unwrap()
    }

    /// A dashboard whose poller stays idle for the duration of a test.
    #[must_use]
    pub fn dashboard(&self, actor: Role) -> Dashboard {
        Dashboard::new(self.api(), actor).with_poll_interval(IDLE_POLL_INTERVAL)
    }

    /// A dashboard that has already loaded every resource once.
    pub async fn loaded_dashboard(&self, actor: Role) -> Dashboard {
        let dashboard = self.dashboard(actor);
        dashboard.refresh_all().await.unwrap();
        dashboard
    }

    /// `GET /api{path}` answering with `body`.
    pub async fn mock_get(&self, path: &str, body: Value) -> Mock<'_> {
        let path = format!("/api{path}");
        self.server
            .mock_async(|when, then| {
                when.method(GET)
                    .path(path)
                    .header("authorization", format!("Bearer {TEST_TOKEN}"));
                then.status(200).json_body(body);
            })
            .await
    }

    /// `GET /api{path}` failing with `status`.
    pub async fn mock_get_failure(&self, path: &str, status: u16) -> Mock<'_> {
        let path = format!("/api{path}");
        self.server
            .mock_async(|when, then| {
                when.method(GET).path(path);
                then.status(status)
                    .json_body(serde_json::json!({ "detail": "backend unavailable" }));
            })
            .await
    }

    /// `PUT /api{path}` answering with `status` and `body`.
    pub async fn mock_put(&self, path: &str, status: u16, body: Value) -> Mock<'_> {
        let path = format!("/api{path}");
        self.server
            .mock_async(|when, then| {
                when.method(PUT).path(path);
                then.status(status).json_body(body);
            })
            .await
    }

    /// Any `PUT`, to prove that none was sent.
    pub async fn mock_any_put(&self) -> Mock<'_> {
        self.server
            .mock_async(|when, then| {
                when.method(PUT);
                then.status(200).json_body(serde_json::json!({ "message": "ok" }));
            })
            .await
    }

    /// Every read endpoint answering with the standard fixtures.
    pub async fn mock_reads(&self) -> ReadMocks<'_> {
        ReadMocks {
            users: self.mock_get("/admin/users", fixtures::users()).await,
            pages: self.mock_get("/admin/pages", fixtures::pages()).await,
            analytics: self
                .mock_get("/admin/analytics/global", fixtures::global_analytics())
                .await,
            metrics: self
                .mock_get("/admin/system/metrics", fixtures::system_metrics())
                .await,
            verification: self
                .mock_get("/admin/verification/requests", fixtures::verification_requests())
                .await,
            plan_configs: self
                .mock_get("/admin/plan-configs", fixtures::plan_configs())
                .await,
        }
    }
}

/// Wait until the dashboard state satisfies `predicate`.
pub async fn wait_for_state(
    dashboard: &Dashboard,
    predicate: impl FnMut(&DashboardState) -> bool,
) -> DashboardState {
    let mut rx = dashboard.subscribe();
    let state = tokio::time::timeout(STATE_TIMEOUT, rx.wait_for(predicate))
        .await
        .expect("timed out waiting for dashboard state")
        .unwrap()
        .clone();
    state
}

/// Every notification received so far, in order.
pub fn drain_notifications(rx: &mut broadcast::Receiver<Notification>) -> Vec<Notification> {
    let mut out = Vec::new();
    while let Ok(notification) = rx.try_recv() {
        out.push(notification);
    }
    out
}
