//! Initial loading and the users+pages ready gate.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::time::Duration;

use mytrack_admin::{Dashboard, DashboardError, NotificationKind, UserStats};
use mytrack_core::{PageId, PageStatus, Plan, Role};
use mytrack_integration_tests::{TestBackend, drain_notifications, fixtures, wait_for_state};
use serde_json::json;

#[tokio::test]
async fn test_activate_loads_every_resource() {
    let backend = TestBackend::start().await;
    let mocks = backend.mock_reads().await;
    let dashboard = backend.dashboard(Role::Owner);

    assert!(dashboard.state().loading);
    dashboard.activate().unwrap();
    dashboard.wait_ready().await.unwrap();

    let state = wait_for_state(&dashboard, |s| {
        s.global_analytics.is_some()
            && s.system_metrics.is_some()
            && !s.verification_requests.is_empty()
            && !s.plan_configs.is_empty()
    })
    .await;

    assert!(!state.loading);
    assert_eq!(state.users.len(), 6);
    assert_eq!(state.pages.len(), 2);
    assert_eq!(
        state.user_stats(),
        UserStats {
            total: 6,
            active: 5,
            banned: 1,
            verified: 1,
        }
    );
    assert_eq!(state.pending_count(), 2);
    assert_eq!(state.users_on_plan(Plan::Pro), 2);
    assert_eq!(state.plan_configs.len(), 3);

    dashboard.deactivate().await;
    assert_eq!(mocks.users.hits_async().await, 1);
    assert_eq!(mocks.pages.hits_async().await, 1);
    assert_eq!(mocks.metrics.hits_async().await, 1);
}

#[tokio::test]
async fn test_failed_secondary_reads_do_not_block_ready_gate() {
    let backend = TestBackend::start().await;
    backend.mock_get("/admin/users", fixtures::users()).await;
    backend.mock_get("/admin/pages", fixtures::pages()).await;
    let analytics = backend.mock_get_failure("/admin/analytics/global", 500).await;
    let metrics = backend.mock_get_failure("/admin/system/metrics", 503).await;
    let verification = backend
        .mock_get_failure("/admin/verification/requests", 500)
        .await;
    let plans = backend.mock_get_failure("/admin/plan-configs", 500).await;

    let dashboard = backend.dashboard(Role::Admin);
    let mut notifications = dashboard.notifications();
    dashboard.activate().unwrap();
    dashboard.wait_ready().await.unwrap();

    // Stop background work before inspecting the state.
    dashboard.deactivate().await;
    let state = dashboard.state();
    assert_eq!(state.users.len(), 6);
    assert!(state.global_analytics.is_none());
    assert!(state.system_metrics.is_none());
    assert!(state.verification_requests.is_empty());
    assert!(state.plan_configs.is_empty());

    // Secondary read failures are logged, not shown.
    assert!(drain_notifications(&mut notifications).is_empty());

    assert!(analytics.hits_async().await <= 1);
    assert!(metrics.hits_async().await <= 1);
    assert!(verification.hits_async().await <= 1);
    assert!(plans.hits_async().await <= 1);
}

#[tokio::test]
async fn test_users_failure_resolves_gate_with_error_notification() {
    let backend = TestBackend::start().await;
    backend.mock_get_failure("/admin/users", 500).await;
    backend.mock_get("/admin/pages", fixtures::pages()).await;

    let dashboard = backend.dashboard(Role::Admin);
    let mut notifications = dashboard.notifications();
    dashboard.refresh_all().await.unwrap();

    let state = dashboard.state();
    assert!(!state.loading);
    assert!(state.users.is_empty());
    // Users and pages are applied together or not at all.
    assert!(state.pages.is_empty());

    let received = drain_notifications(&mut notifications);
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].kind, NotificationKind::Error);
    assert_eq!(received[0].message, "Не удалось загрузить данные");
}

#[tokio::test]
async fn test_failed_reload_keeps_previous_values() {
    let backend = TestBackend::start().await;
    let mut mocks = backend.mock_reads().await;
    let dashboard = backend.loaded_dashboard(Role::Admin).await;
    assert!(dashboard.state().system_metrics.is_some());

    mocks.metrics.delete_async().await;
    mocks.users.delete_async().await;
    backend.mock_get_failure("/admin/system/metrics", 500).await;
    backend.mock_get_failure("/admin/users", 502).await;

    dashboard.refresh_all().await.unwrap();

    let state = dashboard.state();
    assert!(state.system_metrics.is_some());
    assert_eq!(state.users.len(), 6);
    assert_eq!(state.pages.len(), 2);
}

#[tokio::test]
async fn test_activation_is_one_shot() {
    let backend = TestBackend::start().await;
    backend.mock_reads().await;
    let dashboard = backend.dashboard(Role::Admin);

    dashboard.activate().unwrap();
    assert!(matches!(
        dashboard.activate(),
        Err(DashboardError::AlreadyActive)
    ));

    dashboard.deactivate().await;
    assert!(!dashboard.is_active());
    assert!(matches!(
        dashboard.refresh_all().await,
        Err(DashboardError::Inactive)
    ));
}

#[tokio::test]
async fn test_reads_carry_bearer_token() {
    let backend = TestBackend::start().await;
    // Only token-bearing requests match the read mocks.
    let mocks = backend.mock_reads().await;
    let dashboard = backend.loaded_dashboard(Role::Admin).await;

    assert_eq!(dashboard.state().users.len(), 6);
    mocks.users.assert_async().await;
    mocks.plan_configs.assert_async().await;
}

#[tokio::test]
async fn test_odd_rows_do_not_hide_the_rest() {
    let backend = TestBackend::start().await;
    backend.mock_get("/admin/users", fixtures::users()).await;
    backend
        .mock_get(
            "/admin/pages",
            json!([
                fixtures::page("p1", "u1", "bedroom_producer", "active"),
                { "id": "p9", "slug": "legacy", "status": null },
                { "id": "p10", "slug": "archived", "status": "blocked" },
                { "title": "no id or slug" }
            ]),
        )
        .await;
    backend
        .mock_get(
            "/admin/verification/requests",
            json!([
                fixtures::verification_request("r1", "u2", "pending"),
                { "id": "r2", "user_id": "u1", "status": null }
            ]),
        )
        .await;
    backend
        .mock_get(
            "/admin/plan-configs",
            json!([
                { "plan_name": "pro", "max_pages_limit": null },
                { "plan_name": "enterprise", "max_pages_limit": 500 }
            ]),
        )
        .await;

    let dashboard = backend.dashboard(Role::Admin);
    let mut notifications = dashboard.notifications();
    dashboard.refresh_all().await.unwrap();

    let state = dashboard.state();
    assert_eq!(state.users.len(), 6);
    assert_eq!(state.pages.len(), 3);
    for id in ["p9", "p10"] {
        let page = state.page(&PageId::new(id)).unwrap();
        assert_eq!(page.status, PageStatus::Disabled);
    }
    assert_eq!(state.verification_requests.len(), 2);
    assert_eq!(state.pending_count(), 1);
    assert_eq!(state.plan_configs.len(), 1);
    assert!(state.plan_config(Plan::Pro).is_some());
    assert!(drain_notifications(&mut notifications).is_empty());
}

#[tokio::test]
async fn test_refresh_before_activation_does_not_poll() {
    let backend = TestBackend::start().await;
    let mocks = backend.mock_reads().await;
    let dashboard =
        Dashboard::new(backend.api(), Role::Admin).with_poll_interval(Duration::from_millis(50));

    dashboard.refresh_all().await.unwrap();
    tokio::time::sleep(Duration::from_millis(250)).await;

    assert!(!dashboard.is_active());
    assert_eq!(dashboard.state().users.len(), 6);
    assert_eq!(mocks.metrics.hits_async().await, 1);

    dashboard.deactivate().await;
    assert!(matches!(
        dashboard.refresh_all().await,
        Err(DashboardError::Inactive)
    ));
    assert_eq!(mocks.users.hits_async().await, 1);
}
