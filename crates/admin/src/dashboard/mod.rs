//! Admin dashboard controller.
//!
//! A [`Dashboard`] owns the view state of one admin session. On
//! [`Dashboard::activate`] it loads every resource in parallel and starts
//! the metrics poller; action methods send one write each and then re-fetch
//! whatever the write affected.
//!
//! # Lifecycle
//!
//! ```text
//! new ──> activate ──> (actions, polling) ──> deactivate
//! ```
//!
//! Deactivation cancels the poller and every in-flight read. Results that
//! arrive afterwards are dropped instead of being applied.

mod actions;
mod loader;
mod plan_editor;
mod poller;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use mytrack_core::{Role, UserId};
use tokio::sync::{broadcast, watch};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, instrument};

pub use plan_editor::PlanEdit;

use crate::api::AdminApi;
use crate::config::{AdminConfig, DEFAULT_METRICS_POLL_SECS};
use crate::error::DashboardError;
use crate::models::Page;
use crate::notify::{Notification, Notifier};
use crate::permissions::UserActions;
use crate::state::DashboardState;

/// Controller for one admin dashboard session.
pub struct Dashboard {
    inner: Arc<Inner>,
    tracker: TaskTracker,
    activated: AtomicBool,
    poll_interval: Duration,
}

/// Shared between the controller and its background tasks.
struct Inner {
    api: AdminApi,
    /// Role of the signed-in administrator.
    actor: Role,
    state: watch::Sender<DashboardState>,
    notifier: Notifier,
    cancel: CancellationToken,
}

impl Dashboard {
    /// Create a dashboard acting as `actor`.
    ///
    /// Nothing is fetched or polled until [`Dashboard::activate`], but
    /// [`Dashboard::refresh_all`] and the action methods can be used right
    /// away for one-shot work.
    #[must_use]
    pub fn new(api: AdminApi, actor: Role) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self {
            inner: Arc::new(Inner {
                api,
                actor,
                state,
                notifier: Notifier::new(),
                cancel: CancellationToken::new(),
            }),
            tracker: TaskTracker::new(),
            activated: AtomicBool::new(false),
            poll_interval: Duration::from_secs(DEFAULT_METRICS_POLL_SECS),
        }
    }

    /// Override the metrics poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Connect using `config` and resolve the acting role from `GET /auth/me`.
    ///
    /// # Errors
    ///
    /// Returns error if authentication or the current-user lookup fails.
    pub async fn connect(config: &AdminConfig) -> Result<Self, DashboardError> {
        let api = AdminApi::connect(config).await?;
        let me = api.current_user().await?;
        info!(user = %me.username, role = %me.role, "Signed in to MyTrack admin");
        Ok(Self::new(api, me.role).with_poll_interval(config.metrics_poll_interval))
    }

    /// Start the initial loads and the metrics poller.
    ///
    /// Returns immediately; use [`Dashboard::wait_ready`] to wait for the
    /// users and pages to arrive.
    ///
    /// # Errors
    ///
    /// Returns error if the dashboard was already activated or deactivated.
    #[instrument(skip(self))]
    pub fn activate(&self) -> Result<(), DashboardError> {
        if self.inner.cancel.is_cancelled() {
            return Err(DashboardError::Inactive);
        }
        if self.activated.swap(true, Ordering::SeqCst) {
            return Err(DashboardError::AlreadyActive);
        }

        self.spawn(|inner| async move { inner.refresh_users_and_pages().await });
        self.spawn(|inner| async move { inner.refresh_global_analytics().await });
        self.spawn(|inner| async move { inner.refresh_system_metrics().await });
        self.spawn(|inner| async move { inner.refresh_verification_requests().await });
        self.spawn(|inner| async move { inner.refresh_plan_configs().await });

        let period = self.poll_interval;
        self.spawn(move |inner| poller::poll_metrics(inner, period));

        debug!(poll_interval = ?self.poll_interval, "Dashboard activated");
        Ok(())
    }

    /// Wait until the first users+pages load has resolved, successfully or not.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Inactive`] if the dashboard is deactivated
    /// before that happens.
    pub async fn wait_ready(&self) -> Result<(), DashboardError> {
        let mut rx = self.inner.state.subscribe();
        tokio::select! {
            biased;
            () = self.inner.cancel.cancelled() => Err(DashboardError::Inactive),
            ready = rx.wait_for(|s| !s.loading) => ready
                .map(|_| ())
                .map_err(|_| DashboardError::Inactive),
        }
    }

    /// Stop polling, cancel in-flight reads and drop unsaved plan drafts.
    ///
    /// Waits for background tasks to finish. Safe to call more than once.
    #[instrument(skip(self))]
    pub async fn deactivate(&self) {
        if !self.inner.cancel.is_cancelled() {
            self.inner.state.send_if_modified(|s| {
                let had_drafts = !s.plan_drafts.is_empty();
                s.plan_drafts.clear();
                had_drafts
            });
            self.inner.cancel.cancel();
        }
        self.tracker.close();
        self.tracker.wait().await;
        debug!("Dashboard deactivated");
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.activated.load(Ordering::SeqCst) && !self.inner.cancel.is_cancelled()
    }

    /// Re-fetch every resource now and wait for the results.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Inactive`] after deactivation.
    pub async fn refresh_all(&self) -> Result<(), DashboardError> {
        self.ensure_not_deactivated()?;
        let inner = &self.inner;
        tokio::join!(
            inner.refresh_users_and_pages(),
            inner.refresh_global_analytics(),
            inner.refresh_system_metrics(),
            inner.refresh_verification_requests(),
            inner.refresh_plan_configs(),
        );
        Ok(())
    }

    /// Snapshot of the current view state.
    #[must_use]
    pub fn state(&self) -> DashboardState {
        self.inner.state.borrow().clone()
    }

    /// Observe state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.inner.state.subscribe()
    }

    /// Receive notifications emitted from now on.
    #[must_use]
    pub fn notifications(&self) -> broadcast::Receiver<Notification> {
        self.inner.notifier.subscribe()
    }

    #[must_use]
    pub fn actor(&self) -> Role {
        self.inner.actor
    }

    /// Open or close the detail panel for a user.
    pub fn select_user(&self, user_id: Option<UserId>) {
        self.inner.state.send_if_modified(|s| {
            if s.selected_user == user_id {
                return false;
            }
            s.selected_user = user_id;
            true
        });
    }

    /// Actions offered to the current administrator for a user row.
    #[must_use]
    pub fn offered_actions(&self, user_id: &UserId) -> Option<UserActions> {
        let state = self.inner.state.borrow();
        state
            .user(user_id)
            .map(|user| UserActions::resolve(self.inner.actor, user))
    }

    /// Absolute cover URL of a page, resolved against the backend origin.
    #[must_use]
    pub fn cover_url(&self, page: &Page) -> Option<String> {
        let origin = self.inner.api.base_url().join("/").ok()?;
        page.cover_url(&origin)
    }

    /// Actions and on-demand refreshes also work before [`Dashboard::activate`];
    /// only deactivation ends them.
    fn ensure_not_deactivated(&self) -> Result<(), DashboardError> {
        if self.inner.cancel.is_cancelled() {
            Err(DashboardError::Inactive)
        } else {
            Ok(())
        }
    }

    fn spawn<F, Fut>(&self, task: F)
    where
        F: FnOnce(Arc<Inner>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.tracker.spawn(task(Arc::clone(&self.inner)));
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.inner.cancel.cancel();
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("actor", &self.inner.actor)
            .field("active", &self.is_active())
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

impl Inner {
    /// Run `fut` unless the dashboard is deactivated first.
    async fn guard<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => None,
            out = fut => Some(out),
        }
    }

    /// Apply a state change, unless the dashboard has been deactivated.
    fn apply(&self, change: impl FnOnce(&mut DashboardState)) -> bool {
        if self.cancel.is_cancelled() {
            debug!("Discarding result that arrived after deactivation");
            return false;
        }
        self.state.send_modify(change);
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;
    use url::Url;

    use super::*;

    fn offline_dashboard(actor: Role) -> Dashboard {
        let api = AdminApi::new(
            Url::parse("http://127.0.0.1:9/api/").unwrap(),
            &SecretString::from("tok"),
            Duration::from_secs(1),
        )
        .unwrap();
        Dashboard::new(api, actor)
    }

    #[tokio::test]
    async fn test_select_user_round_trip() {
        let dashboard = offline_dashboard(Role::Admin);
        dashboard.select_user(Some(UserId::new("u1")));
        assert_eq!(dashboard.state().selected_user, Some(UserId::new("u1")));
        dashboard.select_user(None);
        assert_eq!(dashboard.state().selected_user, None);
    }

    #[tokio::test]
    async fn test_activate_after_deactivate_is_rejected() {
        let dashboard = offline_dashboard(Role::Owner);
        dashboard.deactivate().await;
        assert!(matches!(dashboard.activate(), Err(DashboardError::Inactive)));
        assert!(matches!(
            dashboard.wait_ready().await,
            Err(DashboardError::Inactive)
        ));
    }

    #[tokio::test]
    async fn test_cover_url_uses_backend_origin() {
        let dashboard = offline_dashboard(Role::Admin);
        let page: Page = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "slug": "debut",
            "cover_image": "/uploads/cover.jpg"
        }))
        .unwrap();
        assert_eq!(
            dashboard.cover_url(&page).as_deref(),
            Some("http://127.0.0.1:9/uploads/cover.jpg")
        );
    }
}
