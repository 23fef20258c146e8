//! Per-plan limits and feature flags.

use mytrack_core::{PageLimit, Plan};
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Feature flags a plan can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanFeature {
    CustomDesign,
    Analytics,
    AdvancedAnalytics,
    RemoveBranding,
    PrioritySupport,
}

impl PlanFeature {
    pub const ALL: [Self; 5] = [
        Self::CustomDesign,
        Self::Analytics,
        Self::AdvancedAnalytics,
        Self::RemoveBranding,
        Self::PrioritySupport,
    ];

    /// Field name on the wire.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::CustomDesign => "can_use_custom_design",
            Self::Analytics => "has_analytics",
            Self::AdvancedAnalytics => "has_advanced_analytics",
            Self::RemoveBranding => "can_remove_branding",
            Self::PrioritySupport => "priority_support",
        }
    }

    /// Label shown in the plan editor.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CustomDesign => "Кастомный дизайн",
            Self::Analytics => "Аналитика",
            Self::AdvancedAnalytics => "Расширенная аналитика",
            Self::RemoveBranding => "Убрать брендинг",
            Self::PrioritySupport => "Приоритетная поддержка",
        }
    }
}

impl std::str::FromStr for PlanFeature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.key() == s)
            .ok_or_else(|| format!("invalid plan feature: {s}"))
    }
}

/// Configuration row for one plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanConfig {
    pub plan_name: Plan,
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_pages_limit: PageLimit,
    #[serde(default, deserialize_with = "null_as_default")]
    pub can_use_custom_design: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_analytics: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_advanced_analytics: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub can_remove_branding: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority_support: bool,
}

impl PlanConfig {
    #[must_use]
    pub const fn feature(&self, feature: PlanFeature) -> bool {
        match feature {
            PlanFeature::CustomDesign => self.can_use_custom_design,
            PlanFeature::Analytics => self.has_analytics,
            PlanFeature::AdvancedAnalytics => self.has_advanced_analytics,
            PlanFeature::RemoveBranding => self.can_remove_branding,
            PlanFeature::PrioritySupport => self.priority_support,
        }
    }

    pub const fn set_feature(&mut self, feature: PlanFeature, enabled: bool) {
        let slot = match feature {
            PlanFeature::CustomDesign => &mut self.can_use_custom_design,
            PlanFeature::Analytics => &mut self.has_analytics,
            PlanFeature::AdvancedAnalytics => &mut self.has_advanced_analytics,
            PlanFeature::RemoveBranding => &mut self.can_remove_branding,
            PlanFeature::PrioritySupport => &mut self.priority_support,
        };
        *slot = enabled;
    }
}

/// Full update body for `PUT /admin/plan-configs/{plan}`.
///
/// Always carries every field, never a diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanConfigUpdate {
    pub max_pages_limit: PageLimit,
    pub can_use_custom_design: bool,
    pub has_analytics: bool,
    pub has_advanced_analytics: bool,
    pub can_remove_branding: bool,
    pub priority_support: bool,
}

impl From<&PlanConfig> for PlanConfigUpdate {
    fn from(config: &PlanConfig) -> Self {
        Self {
            max_pages_limit: config.max_pages_limit,
            can_use_custom_design: config.can_use_custom_design,
            has_analytics: config.has_analytics,
            has_advanced_analytics: config.has_advanced_analytics,
            can_remove_branding: config.can_remove_branding,
            priority_support: config.priority_support,
        }
    }
}
