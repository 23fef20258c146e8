//! Resource reads.
//!
//! Each read is independent: a failure keeps the previous value and never
//! blocks the others. Reads are abandoned on deactivation.

use tracing::{debug, warn};

use super::Inner;
use crate::api::ApiError;
use crate::state::DashboardState;

/// Shown when the users+pages load fails.
const LOAD_FAILED: &str = "Не удалось загрузить данные";

impl Inner {
    /// Load users and pages together and clear the loading flag.
    ///
    /// Both lists are applied or neither is.
    pub(super) async fn refresh_users_and_pages(&self) {
        let fetched = self
            .guard(async { tokio::join!(self.api.list_users(), self.api.list_pages()) })
            .await;
        let Some(results) = fetched else {
            return;
        };

        match results {
            (Ok(users), Ok(pages)) => {
                debug!(users = users.len(), pages = pages.len(), "Users and pages loaded");
                self.apply(|s| {
                    s.users = users;
                    s.pages = pages;
                    s.loading = false;
                });
            }
            (Err(err), _) | (_, Err(err)) => {
                warn!(status = ?err.status(), error = %err, "Failed to load users and pages");
                if self.apply(|s| s.loading = false) {
                    self.notifier.error(LOAD_FAILED);
                }
            }
        }
    }

    pub(super) async fn refresh_global_analytics(&self) {
        self.refresh("global analytics", self.api.global_analytics(), |s, analytics| {
            s.global_analytics = Some(analytics);
        })
        .await;
    }

    pub(super) async fn refresh_system_metrics(&self) {
        self.refresh("system metrics", self.api.system_metrics(), |s, metrics| {
            s.system_metrics = Some(metrics);
        })
        .await;
    }

    pub(super) async fn refresh_verification_requests(&self) {
        self.refresh(
            "verification requests",
            self.api.verification_requests(),
            |s, requests| s.verification_requests = requests,
        )
        .await;
    }

    pub(super) async fn refresh_plan_configs(&self) {
        self.refresh("plan configs", self.api.plan_configs(), |s, configs| {
            s.plan_configs = configs;
        })
        .await;
    }

    /// Fetch one resource and store it; failures are only logged.
    async fn refresh<T>(
        &self,
        resource: &'static str,
        fetch: impl Future<Output = Result<T, ApiError>>,
        store: impl FnOnce(&mut DashboardState, T),
    ) {
        match self.guard(fetch).await {
            None => debug!(resource, "Fetch abandoned after deactivation"),
            Some(Ok(value)) => {
                if self.apply(|s| store(s, value)) {
                    debug!(resource, "Fetched");
                }
            }
            Some(Err(err)) => warn!(resource, status = ?err.status(), error = %err, "Failed to fetch"),
        }
    }
}
