//! User listing.
//!
//! Mutations go straight through [`Dashboard`] methods; this module only
//! renders the user table.

use mytrack_admin::presentation::{plan_badge, role_badge};
use mytrack_admin::{Dashboard, UserActions};
use tracing::info;

/// Log user stats, then one line per user with the actions on offer.
pub fn list(dashboard: &Dashboard) {
    let state = dashboard.state();
    let stats = state.user_stats();
    info!(
        "Users: {} total, {} active, {} banned, {} verified",
        stats.total, stats.active, stats.banned, stats.verified
    );

    for user in &state.users {
        let actions = UserActions::resolve(dashboard.actor(), user);
        let mut flags = Vec::new();
        if user.is_banned() {
            flags.push("banned");
        }
        if user.is_verified() {
            flags.push("verified");
        }

        info!(
            "{:<24} {:<20} {:<13} {:<9} pages={:<3} [{}] actions: {}",
            user.id,
            user.username,
            role_badge(user.role).label,
            plan_badge(user.plan).label,
            user.page_count,
            flags.join(", "),
            offered(&actions),
        );
    }
}

fn offered(actions: &UserActions) -> String {
    let mut names = Vec::new();
    if actions.can_ban {
        names.push("ban");
    }
    if actions.can_verify {
        names.push("verify");
    }
    if actions.can_change_plan {
        names.push("plan");
    }
    if actions.can_change_role {
        names.push("role");
    }
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}
