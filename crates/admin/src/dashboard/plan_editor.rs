//! Plan configuration drafts.
//!
//! Each plan has its own draft. Editing a plan copies its last fetched row
//! into a draft on first touch; the plan stays dirty until the draft is
//! saved or discarded. Other plans are never affected.

use mytrack_core::{PageLimit, Plan};
use tracing::{debug, instrument};

use super::Dashboard;
use crate::error::DashboardError;
use crate::models::{PlanConfigUpdate, PlanFeature};

/// A single field edit in the plan editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanEdit {
    /// New page limit in wire form, `-1` meaning unlimited.
    MaxPagesLimit(i64),
    Feature(PlanFeature, bool),
}

impl Dashboard {
    /// Apply one edit to the draft of `plan`, marking it dirty.
    ///
    /// # Errors
    ///
    /// Returns error if the page limit is below `-1` or no configuration for
    /// `plan` has been loaded.
    #[instrument(skip(self))]
    pub fn edit_plan_config(&self, plan: Plan, edit: PlanEdit) -> Result<(), DashboardError> {
        self.ensure_not_deactivated()?;
        let limit = match edit {
            PlanEdit::MaxPagesLimit(raw) => Some(
                PageLimit::from_wire(raw).map_err(|_| DashboardError::InvalidPageLimit(raw))?,
            ),
            PlanEdit::Feature(..) => None,
        };

        let mut outcome = Ok(());
        self.inner.state.send_if_modified(|s| {
            let Some(mut draft) = s.plan_config_view(plan).cloned() else {
                outcome = Err(DashboardError::UnknownPlan(plan));
                return false;
            };
            match (edit, limit) {
                (PlanEdit::Feature(feature, enabled), _) => draft.set_feature(feature, enabled),
                (PlanEdit::MaxPagesLimit(_), Some(limit)) => draft.max_pages_limit = limit,
                (PlanEdit::MaxPagesLimit(_), None) => {}
            }
            s.plan_drafts.insert(plan, draft);
            true
        });
        outcome
    }

    /// Drop the draft of `plan`. Returns whether there was one.
    pub fn discard_plan_draft(&self, plan: Plan) -> bool {
        self.inner
            .state
            .send_if_modified(|s| s.plan_drafts.remove(&plan).is_some())
    }

    /// Save the draft of `plan`, sending every field.
    ///
    /// On success the draft is cleared and plan configurations are
    /// re-fetched. On failure the draft is kept.
    ///
    /// # Errors
    ///
    /// Returns error if the plan has no draft or the write fails.
    #[instrument(skip(self))]
    pub async fn save_plan_config(&self, plan: Plan) -> Result<(), DashboardError> {
        self.ensure_not_deactivated()?;
        let draft = self
            .inner
            .state
            .borrow()
            .plan_drafts
            .get(&plan)
            .cloned()
            .ok_or(DashboardError::NotDirty(plan))?;

        self.write(
            self.inner
                .api
                .update_plan_config(plan, &PlanConfigUpdate::from(&draft)),
            "Не удалось обновить настройки плана",
        )
        .await?;

        // Edits made while the save was in flight stay pending.
        self.inner.state.send_if_modified(|s| {
            if s.plan_drafts.get(&plan) == Some(&draft) {
                s.plan_drafts.remove(&plan);
                true
            } else {
                debug!(%plan, "Draft changed during save, keeping it");
                false
            }
        });

        self.inner
            .notifier
            .success(format!("Настройки плана {plan} обновлены"));
        self.inner.refresh_plan_configs().await;
        Ok(())
    }
}
