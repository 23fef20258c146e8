//! Administrator actions.
//!
//! Every action sends exactly one write. On success it notifies and then
//! re-fetches the affected collections; on failure it notifies with the
//! server's detail (or a fallback message) and leaves the state untouched.
//! Actions that are not offered to the administrator are refused before any
//! request goes out.

use mytrack_core::{PageId, Plan, Role, UserId};
use tracing::{instrument, warn};

use super::Dashboard;
use crate::api::ApiError;
use crate::error::DashboardError;
use crate::models::User;
use crate::permissions::{UserAction, UserActions};
use crate::presentation::{plan_badge, role_badge};

impl Dashboard {
    /// Ban a user who is not banned, or unban one who is.
    ///
    /// # Errors
    ///
    /// Returns error if the user is unknown, may not be banned, or the write fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn toggle_ban(&self, user_id: &UserId) -> Result<(), DashboardError> {
        let user = self.authorize(user_id, UserAction::Ban)?;
        let currently_banned = user.is_banned();

        self.write(
            self.inner.api.set_user_banned(user_id, !currently_banned),
            "Не удалось обновить пользователя",
        )
        .await?;

        self.inner.notifier.success(if currently_banned {
            "Пользователь разбанен"
        } else {
            "Пользователь забанен"
        });
        self.inner.refresh_users_and_pages().await;
        Ok(())
    }

    /// Grant or revoke the verified badge.
    ///
    /// # Errors
    ///
    /// Returns error if the user is unknown, is protected, or the write fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn toggle_verified(&self, user_id: &UserId) -> Result<(), DashboardError> {
        let user = self.authorize(user_id, UserAction::Verify)?;
        let currently_verified = user.is_verified();

        self.write(
            self.inner.api.set_user_verified(user_id, !currently_verified),
            "Не удалось обновить верификацию",
        )
        .await?;

        self.inner.notifier.success(if currently_verified {
            "Верификация снята"
        } else {
            "Пользователь верифицирован"
        });
        self.inner.refresh_users_and_pages().await;
        Ok(())
    }

    /// Assign a new role. Only owners may do this, and never to or from owner.
    ///
    /// # Errors
    ///
    /// Returns error if the change is not permitted or the write fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn change_role(&self, user_id: &UserId, role: Role) -> Result<(), DashboardError> {
        let user = self.authorize(user_id, UserAction::ChangeRole)?;
        if !UserActions::resolve(self.inner.actor, &user)
            .assignable_roles()
            .contains(&role)
        {
            return Err(DashboardError::Forbidden(format!(
                "role {role} cannot be assigned"
            )));
        }

        self.write(
            self.inner.api.set_user_role(user_id, role),
            "Не удалось изменить роль",
        )
        .await?;

        self.inner.notifier.success(format!(
            "Роль изменена на {}",
            role_badge(role).label
        ));
        self.select_user(None);
        self.inner.refresh_users_and_pages().await;
        Ok(())
    }

    /// Move a user to another plan.
    ///
    /// # Errors
    ///
    /// Returns error if the user is unknown, is an owner, or the write fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn change_plan(&self, user_id: &UserId, plan: Plan) -> Result<(), DashboardError> {
        self.authorize(user_id, UserAction::ChangePlan)?;

        self.write(
            self.inner.api.set_user_plan(user_id, plan),
            "Не удалось изменить план",
        )
        .await?;

        self.inner.notifier.success(format!(
            "План изменён на {}",
            plan_badge(plan).label
        ));
        self.select_user(None);
        self.inner.refresh_users_and_pages().await;
        Ok(())
    }

    /// Approve the pending verification request of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns error if the dashboard has been deactivated or the write fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn approve_verification(&self, user_id: &UserId) -> Result<(), DashboardError> {
        self.ensure_not_deactivated()?;
        self.write(
            self.inner.api.approve_verification(user_id),
            "Не удалось одобрить верификацию",
        )
        .await?;

        self.inner.notifier.success("Верификация одобрена");
        self.refresh_after_review().await;
        Ok(())
    }

    /// Reject the pending verification request of `user_id`.
    ///
    /// # Errors
    ///
    /// Returns error if the dashboard has been deactivated or the write fails.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn reject_verification(&self, user_id: &UserId) -> Result<(), DashboardError> {
        self.ensure_not_deactivated()?;
        self.write(
            self.inner.api.reject_verification(user_id),
            "Не удалось отклонить верификацию",
        )
        .await?;

        self.inner.notifier.success("Верификация отклонена");
        self.refresh_after_review().await;
        Ok(())
    }

    /// Switch a page between active and disabled.
    ///
    /// The success notification is the server's own message.
    ///
    /// # Errors
    ///
    /// Returns error if the page is unknown or the write fails.
    #[instrument(skip(self), fields(page_id = %page_id))]
    pub async fn toggle_page_status(&self, page_id: &PageId) -> Result<(), DashboardError> {
        self.ensure_not_deactivated()?;
        if self.inner.state.borrow().page(page_id).is_none() {
            return Err(DashboardError::UnknownPage(page_id.clone()));
        }

        let response = self
            .write(
                self.inner.api.toggle_page_status(page_id),
                "Не удалось обновить страницу",
            )
            .await?;

        self.inner.notifier.success(response.message);
        self.inner.refresh_users_and_pages().await;
        Ok(())
    }

    /// Look up `user_id` and check that `action` is offered for it.
    pub(super) fn authorize(
        &self,
        user_id: &UserId,
        action: UserAction,
    ) -> Result<User, DashboardError> {
        self.ensure_not_deactivated()?;
        let user = self
            .inner
            .state
            .borrow()
            .user(user_id)
            .cloned()
            .ok_or_else(|| DashboardError::UnknownUser(user_id.clone()))?;

        if UserActions::resolve(self.inner.actor, &user).allows(action) {
            Ok(user)
        } else {
            Err(DashboardError::Forbidden(format!(
                "{} may not {action} {} user {user_id}",
                self.inner.actor, user.role
            )))
        }
    }

    /// Await a write and turn a failure into an error notification.
    pub(super) async fn write<T>(
        &self,
        request: impl Future<Output = Result<T, ApiError>>,
        fallback: &str,
    ) -> Result<T, DashboardError> {
        match request.await {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!(error = %err, "Write rejected");
                self.inner.notifier.error(err.detail().unwrap_or(fallback));
                Err(err.into())
            }
        }
    }

    async fn refresh_after_review(&self) {
        tokio::join!(
            self.inner.refresh_verification_requests(),
            self.inner.refresh_users_and_pages(),
        );
    }
}
