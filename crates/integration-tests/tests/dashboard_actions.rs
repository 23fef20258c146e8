//! Administrator actions: one write, a notification, then a re-fetch.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use httpmock::prelude::*;
use mytrack_admin::{DashboardError, Notification, NotificationKind};
use mytrack_core::{PageId, PageStatus, Plan, Role, UserId};
use mytrack_integration_tests::{TestBackend, drain_notifications, fixtures};
use serde_json::json;

#[tokio::test]
async fn test_ban_user_sends_one_write_then_refetches_users() {
    let backend = TestBackend::start().await;
    let mocks = backend.mock_reads().await;
    let dashboard = backend.loaded_dashboard(Role::Admin).await;
    let ban = backend
        .server()
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/admin/users/u1/ban")
                .json_body(json!({ "is_banned": true }));
            then.status(200).json_body(json!({ "message": "ok" }));
        })
        .await;
    let mut notifications = dashboard.notifications();

    dashboard.toggle_ban(&UserId::new("u1")).await.unwrap();

    ban.assert_hits_async(1).await;
    assert_eq!(
        drain_notifications(&mut notifications),
        vec![Notification::success("Пользователь забанен")]
    );
    assert_eq!(mocks.users.hits_async().await, 2);
    assert_eq!(mocks.pages.hits_async().await, 2);
}

#[tokio::test]
async fn test_unban_sends_false() {
    let backend = TestBackend::start().await;
    backend.mock_reads().await;
    let dashboard = backend.loaded_dashboard(Role::Admin).await;
    let unban = backend
        .server()
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/admin/users/u3/ban")
                .json_body(json!({ "is_banned": false }));
            then.status(200).json_body(json!({ "message": "ok" }));
        })
        .await;
    let mut notifications = dashboard.notifications();

    dashboard.toggle_ban(&UserId::new("u3")).await.unwrap();

    unban.assert_async().await;
    assert_eq!(
        drain_notifications(&mut notifications)[0].message,
        "Пользователь разбанен"
    );
}

#[tokio::test]
async fn test_protected_targets_send_nothing() {
    let backend = TestBackend::start().await;
    backend.mock_reads().await;
    let dashboard = backend.loaded_dashboard(Role::Owner).await;
    let any_put = backend.mock_any_put().await;

    let owner = UserId::new("o1");
    for result in [
        dashboard.toggle_ban(&owner).await,
        dashboard.change_role(&owner, Role::Admin).await,
        dashboard.change_plan(&owner, Plan::Free).await,
        dashboard.toggle_verified(&owner).await,
        dashboard.toggle_ban(&UserId::new("a1")).await,
    ] {
        assert!(matches!(result, Err(DashboardError::Forbidden(_))));
    }

    assert_eq!(any_put.hits_async().await, 0);
}

#[tokio::test]
async fn test_owner_rows_offer_no_mutations() {
    let backend = TestBackend::start().await;
    backend.mock_reads().await;

    for actor in [Role::Owner, Role::Admin, Role::Moderator] {
        let dashboard = backend.loaded_dashboard(actor).await;
        let actions = dashboard.offered_actions(&UserId::new("o1")).unwrap();
        assert!(!actions.can_ban);
        assert!(!actions.can_change_role);
        assert!(!actions.can_change_plan);
    }
}

#[tokio::test]
async fn test_non_owner_never_offered_role_change() {
    let backend = TestBackend::start().await;
    backend.mock_reads().await;
    let dashboard = backend.loaded_dashboard(Role::Admin).await;
    let any_put = backend.mock_any_put().await;

    for user in dashboard.state().users {
        let actions = dashboard.offered_actions(&user.id).unwrap();
        assert!(!actions.can_change_role, "role change offered for {}", user.id);
    }

    let result = dashboard.change_role(&UserId::new("u1"), Role::Moderator).await;
    assert!(matches!(result, Err(DashboardError::Forbidden(_))));
    assert_eq!(any_put.hits_async().await, 0);
}

#[tokio::test]
async fn test_owner_changes_role_and_selection_is_cleared() {
    let backend = TestBackend::start().await;
    let mocks = backend.mock_reads().await;
    let dashboard = backend.loaded_dashboard(Role::Owner).await;
    let role = backend
        .server()
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/admin/users/u1/role")
                .json_body(json!({ "role": "moderator" }));
            then.status(200).json_body(json!({ "message": "ok" }));
        })
        .await;
    let mut notifications = dashboard.notifications();

    dashboard.select_user(Some(UserId::new("u1")));
    dashboard
        .change_role(&UserId::new("u1"), Role::Moderator)
        .await
        .unwrap();

    role.assert_async().await;
    assert_eq!(dashboard.state().selected_user, None);
    assert_eq!(
        drain_notifications(&mut notifications),
        vec![Notification::success("Роль изменена на Модератор")]
    );
    assert_eq!(mocks.users.hits_async().await, 2);
}

#[tokio::test]
async fn test_owner_role_cannot_be_assigned() {
    let backend = TestBackend::start().await;
    backend.mock_reads().await;
    let dashboard = backend.loaded_dashboard(Role::Owner).await;
    let any_put = backend.mock_any_put().await;

    let result = dashboard.change_role(&UserId::new("a1"), Role::Owner).await;

    assert!(matches!(result, Err(DashboardError::Forbidden(_))));
    assert_eq!(any_put.hits_async().await, 0);
}

#[tokio::test]
async fn test_change_plan() {
    let backend = TestBackend::start().await;
    backend.mock_reads().await;
    let dashboard = backend.loaded_dashboard(Role::Admin).await;
    let plan = backend
        .server()
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/admin/users/u1/plan")
                .json_body(json!({ "plan": "pro" }));
            then.status(200).json_body(json!({ "message": "ok" }));
        })
        .await;
    let mut notifications = dashboard.notifications();

    dashboard.select_user(Some(UserId::new("u1")));
    dashboard.change_plan(&UserId::new("u1"), Plan::Pro).await.unwrap();

    plan.assert_async().await;
    assert_eq!(dashboard.state().selected_user, None);
    assert_eq!(
        drain_notifications(&mut notifications)[0].message,
        "План изменён на Pro"
    );
}

#[tokio::test]
async fn test_toggle_verified() {
    let backend = TestBackend::start().await;
    backend.mock_reads().await;
    let dashboard = backend.loaded_dashboard(Role::Admin).await;
    let verify = backend
        .server()
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/api/admin/users/u1/verify")
                .json_body(json!({ "is_verified": true }));
            then.status(200).json_body(json!({ "message": "ok" }));
        })
        .await;
    let mut notifications = dashboard.notifications();

    dashboard.toggle_verified(&UserId::new("u1")).await.unwrap();

    verify.assert_async().await;
    assert_eq!(
        drain_notifications(&mut notifications)[0].message,
        "Пользователь верифицирован"
    );
}

#[tokio::test]
async fn test_failed_write_shows_server_detail_and_skips_refetch() {
    let backend = TestBackend::start().await;
    let mocks = backend.mock_reads().await;
    let dashboard = backend.loaded_dashboard(Role::Admin).await;
    backend
        .mock_put(
            "/admin/users/u1/ban",
            400,
            json!({ "detail": "Нельзя забанить этого пользователя" }),
        )
        .await;
    let before = dashboard.state();
    let mut notifications = dashboard.notifications();

    let err = dashboard.toggle_ban(&UserId::new("u1")).await.unwrap_err();

    assert_eq!(err.detail(), Some("Нельзя забанить этого пользователя"));
    let received = drain_notifications(&mut notifications);
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].kind, NotificationKind::Error);
    assert_eq!(received[0].message, "Нельзя забанить этого пользователя");
    assert_eq!(mocks.users.hits_async().await, 1);
    assert_eq!(dashboard.state(), before);
}

#[tokio::test]
async fn test_failed_write_without_detail_uses_fallback() {
    let backend = TestBackend::start().await;
    backend.mock_reads().await;
    let dashboard = backend.loaded_dashboard(Role::Owner).await;
    backend
        .mock_put("/admin/users/u1/role", 500, json!({ "error": "internal" }))
        .await;
    let mut notifications = dashboard.notifications();

    let result = dashboard.change_role(&UserId::new("u1"), Role::Admin).await;

    assert!(matches!(result, Err(DashboardError::Api(_))));
    assert_eq!(
        drain_notifications(&mut notifications),
        vec![Notification::error("Не удалось изменить роль")]
    );
}

#[tokio::test]
async fn test_approve_verification_refetches_and_decrements_pending() {
    let backend = TestBackend::start().await;
    let mut mocks = backend.mock_reads().await;
    let dashboard = backend.loaded_dashboard(Role::Admin).await;
    assert_eq!(dashboard.state().pending_count(), 2);

    // The backend marks the request approved once the write lands.
    mocks.verification.delete_async().await;
    let refreshed = backend
        .mock_get(
            "/admin/verification/requests",
            json!([
                fixtures::verification_request("r1", "u2", "approved"),
                fixtures::verification_request("r2", "u1", "pending"),
                fixtures::verification_request("r3", "u3", "rejected")
            ]),
        )
        .await;
    let approve = backend
        .mock_put("/admin/verification/u2/approve", 200, json!({ "message": "ok" }))
        .await;
    let mut notifications = dashboard.notifications();

    dashboard
        .approve_verification(&UserId::new("u2"))
        .await
        .unwrap();

    approve.assert_hits_async(1).await;
    refreshed.assert_hits_async(1).await;
    assert_eq!(mocks.users.hits_async().await, 2);
    assert_eq!(dashboard.state().pending_count(), 1);
    assert_eq!(
        drain_notifications(&mut notifications),
        vec![Notification::success("Верификация одобрена")]
    );
}

#[tokio::test]
async fn test_reject_verification() {
    let backend = TestBackend::start().await;
    let mocks = backend.mock_reads().await;
    let dashboard = backend.loaded_dashboard(Role::Admin).await;
    let reject = backend
        .mock_put("/admin/verification/u1/reject", 200, json!({ "message": "ok" }))
        .await;
    let mut notifications = dashboard.notifications();

    dashboard
        .reject_verification(&UserId::new("u1"))
        .await
        .unwrap();

    reject.assert_async().await;
    assert_eq!(mocks.verification.hits_async().await, 2);
    assert_eq!(mocks.users.hits_async().await, 2);
    assert_eq!(
        drain_notifications(&mut notifications)[0].message,
        "Верификация отклонена"
    );
}

#[tokio::test]
async fn test_failed_approve_uses_fallback_message() {
    let backend = TestBackend::start().await;
    let mocks = backend.mock_reads().await;
    let dashboard = backend.loaded_dashboard(Role::Admin).await;
    backend
        .mock_put("/admin/verification/u2/approve", 404, json!({}))
        .await;
    let mut notifications = dashboard.notifications();

    assert!(
        dashboard
            .approve_verification(&UserId::new("u2"))
            .await
            .is_err()
    );
    assert_eq!(
        drain_notifications(&mut notifications),
        vec![Notification::error("Не удалось одобрить верификацию")]
    );
    assert_eq!(mocks.verification.hits_async().await, 1);
}

#[tokio::test]
async fn test_toggling_page_twice_restores_status() {
    let backend = TestBackend::start().await;
    let mut mocks = backend.mock_reads().await;
    let dashboard = backend.loaded_dashboard(Role::Admin).await;
    let page_id = PageId::new("p1");
    let original = dashboard.state().page(&page_id).unwrap().status;
    assert_eq!(original, PageStatus::Active);

    let toggle = backend
        .mock_put(
            "/admin/pages/p1/disable",
            200,
            json!({ "message": "Страница отключена" }),
        )
        .await;

    // First toggle: the backend now reports the page disabled.
    mocks.pages.delete_async().await;
    let mut disabled = backend
        .mock_get(
            "/admin/pages",
            json!([
                fixtures::page("p1", "u1", "bedroom_producer", "disabled"),
                fixtures::page("p2", "u2", "indie_band", "disabled")
            ]),
        )
        .await;
    let mut notifications = dashboard.notifications();
    dashboard.toggle_page_status(&page_id).await.unwrap();

    assert_eq!(toggle.hits_async().await, 1);
    assert_eq!(disabled.hits_async().await, 1);
    assert_eq!(
        dashboard.state().page(&page_id).unwrap().status,
        original.toggled()
    );
    assert_eq!(
        drain_notifications(&mut notifications),
        vec![Notification::success("Страница отключена")]
    );

    // Second toggle: back to active.
    disabled.delete_async().await;
    let active = backend.mock_get("/admin/pages", fixtures::pages()).await;
    dashboard.toggle_page_status(&page_id).await.unwrap();

    assert_eq!(toggle.hits_async().await, 2);
    assert_eq!(active.hits_async().await, 1);
    assert_eq!(dashboard.state().page(&page_id).unwrap().status, original);
}

#[tokio::test]
async fn test_failed_page_toggle_uses_fallback_message() {
    let backend = TestBackend::start().await;
    backend.mock_reads().await;
    let dashboard = backend.loaded_dashboard(Role::Admin).await;
    backend
        .mock_put("/admin/pages/p2/disable", 500, json!({}))
        .await;
    let mut notifications = dashboard.notifications();

    assert!(dashboard.toggle_page_status(&PageId::new("p2")).await.is_err());
    assert_eq!(
        drain_notifications(&mut notifications),
        vec![Notification::error("Не удалось обновить страницу")]
    );
}

#[tokio::test]
async fn test_unknown_targets_are_rejected_locally() {
    let backend = TestBackend::start().await;
    backend.mock_reads().await;
    let dashboard = backend.loaded_dashboard(Role::Owner).await;
    let any_put = backend.mock_any_put().await;

    assert!(matches!(
        dashboard.toggle_ban(&UserId::new("ghost")).await,
        Err(DashboardError::UnknownUser(_))
    ));
    assert!(matches!(
        dashboard.toggle_page_status(&PageId::new("nope")).await,
        Err(DashboardError::UnknownPage(_))
    ));
    assert_eq!(any_put.hits_async().await, 0);
}

#[tokio::test]
async fn test_actions_after_deactivation_are_refused() {
    let backend = TestBackend::start().await;
    backend.mock_reads().await;
    let dashboard = backend.loaded_dashboard(Role::Owner).await;
    let any_put = backend.mock_any_put().await;

    dashboard.deactivate().await;

    assert!(matches!(
        dashboard.toggle_ban(&UserId::new("u1")).await,
        Err(DashboardError::Inactive)
    ));
    assert!(matches!(
        dashboard.approve_verification(&UserId::new("u2")).await,
        Err(DashboardError::Inactive)
    ));
    assert_eq!(any_put.hits_async().await, 0);
}
