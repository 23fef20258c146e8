//! Dashboard view state and derived view data.

use std::collections::BTreeMap;

use mytrack_core::{PageId, Plan, UserId};

use crate::models::{GlobalAnalytics, Page, PlanConfig, SystemMetrics, User, VerificationRequest};

/// Everything the dashboard shows.
///
/// Each collection is an independently refreshed copy of server data.
/// `plan_drafts` holds unsaved plan edits; a plan is dirty exactly when it
/// has an entry there.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub users: Vec<User>,
    pub pages: Vec<Page>,
    pub verification_requests: Vec<VerificationRequest>,
    pub global_analytics: Option<GlobalAnalytics>,
    pub system_metrics: Option<SystemMetrics>,
    pub plan_configs: Vec<PlanConfig>,
    /// Set until the first users+pages load has resolved.
    pub loading: bool,
    pub selected_user: Option<UserId>,
    pub plan_drafts: BTreeMap<Plan, PlanConfig>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            pages: Vec::new(),
            verification_requests: Vec::new(),
            global_analytics: None,
            system_metrics: None,
            plan_configs: Vec::new(),
            loading: true,
            selected_user: None,
            plan_drafts: BTreeMap::new(),
        }
    }
}

/// Headline user counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub banned: usize,
    pub verified: usize,
}

impl DashboardState {
    #[must_use]
    pub fn user_stats(&self) -> UserStats {
        UserStats {
            total: self.users.len(),
            active: self.users.iter().filter(|u| u.is_active()).count(),
            banned: self.users.iter().filter(|u| u.is_banned()).count(),
            verified: self.users.iter().filter(|u| u.is_verified()).count(),
        }
    }

    pub fn pending_requests(&self) -> impl Iterator<Item = &VerificationRequest> {
        self.verification_requests.iter().filter(|r| r.is_pending())
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending_requests().count()
    }

    #[must_use]
    pub fn users_on_plan(&self, plan: Plan) -> usize {
        self.users.iter().filter(|u| u.plan == plan).count()
    }

    #[must_use]
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    #[must_use]
    pub fn page(&self, id: &PageId) -> Option<&Page> {
        self.pages.iter().find(|p| &p.id == id)
    }

    /// Last fetched configuration for `plan`.
    #[must_use]
    pub fn plan_config(&self, plan: Plan) -> Option<&PlanConfig> {
        self.plan_configs.iter().find(|c| c.plan_name == plan)
    }

    /// What the editor shows for `plan`: the draft if any, else the server row.
    #[must_use]
    pub fn plan_config_view(&self, plan: Plan) -> Option<&PlanConfig> {
        self.plan_drafts
            .get(&plan)
            .or_else(|| self.plan_config(plan))
    }

    #[must_use]
    pub fn is_dirty(&self, plan: Plan) -> bool {
        self.plan_drafts.contains_key(&plan)
    }

    pub fn dirty_plans(&self) -> impl Iterator<Item = Plan> + '_ {
        self.plan_drafts.keys().copied()
    }
}
