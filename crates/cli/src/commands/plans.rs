//! Plan configuration commands.
//!
//! # Usage
//!
//! ```bash
//! # Show all plans
//! mytrack-admin plans list
//!
//! # Unlimited pages and analytics for Pro
//! mytrack-admin plans set pro --max-pages -1 --feature has_analytics=true
//! ```

use mytrack_admin::models::PlanFeature;
use mytrack_admin::presentation::plan_badge;
use mytrack_admin::{Dashboard, DashboardError, PlanEdit};
use mytrack_core::Plan;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while editing a plan.
#[derive(Debug, Error)]
pub enum PlanCommandError {
    /// Neither a limit nor a feature was given.
    #[error("Nothing to change: pass --max-pages and/or --feature")]
    NoChanges,

    #[error(transparent)]
    Dashboard(#[from] DashboardError),
}

/// A `--feature key=bool` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureToggle {
    pub feature: PlanFeature,
    pub enabled: bool,
}

/// Parse `key=true|false`, where `key` is a plan feature field name.
pub fn parse_feature_toggle(raw: &str) -> Result<FeatureToggle, String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=true|false, got {raw}"))?;
    let feature: PlanFeature = key.trim().parse()?;
    let enabled = match value.trim() {
        "true" | "on" | "1" => true,
        "false" | "off" | "0" => false,
        other => return Err(format!("invalid value for {key}: {other}")),
    };
    Ok(FeatureToggle { feature, enabled })
}

/// Log each plan's limits, features and user count.
pub fn list(dashboard: &Dashboard) {
    let state = dashboard.state();
    for plan in Plan::ALL {
        let Some(config) = state.plan_config(plan) else {
            info!("{}: not configured", plan_badge(plan).label);
            continue;
        };
        let features: Vec<String> = PlanFeature::ALL
            .into_iter()
            .map(|f| format!("{} [{}]={}", f.label(), f.key(), config.feature(f)))
            .collect();
        info!(
            "{}: max_pages={} users={} | {}",
            plan_badge(plan).label,
            config.max_pages_limit,
            state.users_on_plan(plan),
            features.join(", "),
        );
    }
}

/// Apply the given edits to one plan's draft and save it.
pub async fn set(
    dashboard: &Dashboard,
    plan: Plan,
    max_pages: Option<i64>,
    features: &[FeatureToggle],
) -> Result<(), PlanCommandError> {
    if max_pages.is_none() && features.is_empty() {
        return Err(PlanCommandError::NoChanges);
    }

    if let Some(limit) = max_pages {
        dashboard.edit_plan_config(plan, PlanEdit::MaxPagesLimit(limit))?;
    }
    for toggle in features {
        dashboard.edit_plan_config(plan, PlanEdit::Feature(toggle.feature, toggle.enabled))?;
    }

    dashboard.save_plan_config(plan).await?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feature_toggle() {
        assert_eq!(
            parse_feature_toggle("has_analytics=true").unwrap(),
            FeatureToggle {
                feature: PlanFeature::Analytics,
                enabled: true,
            }
        );
        assert!(!parse_feature_toggle("priority_support=off").unwrap().enabled);
    }

    #[test]
    fn test_parse_feature_toggle_rejects_garbage() {
        assert!(parse_feature_toggle("has_analytics").is_err());
        assert!(parse_feature_toggle("free_coffee=true").is_err());
        assert!(parse_feature_toggle("has_analytics=maybe").is_err());
    }
}
