//! Verification request listing.

use mytrack_admin::Dashboard;
use tracing::info;

/// Log pending requests, oldest first as returned by the backend.
pub fn list(dashboard: &Dashboard) {
    let state = dashboard.state();
    info!("Pending verification requests: {}", state.pending_count());

    for request in state.pending_requests() {
        let submitted = request
            .submitted_at()
            .map_or_else(|| "-".to_string(), |at| at.format("%d.%m.%Y %H:%M").to_string());
        info!(
            "{:<24} {} (@{}) email={} submitted={} links={}",
            request.user_id,
            request.artist_name,
            request.username,
            request.email.as_deref().unwrap_or("-"),
            submitted,
            request.social_links.as_deref().unwrap_or("-"),
        );
    }
}
