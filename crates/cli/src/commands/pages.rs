//! Page listing.

use mytrack_admin::Dashboard;
use tracing::info;

pub fn list(dashboard: &Dashboard) {
    let state = dashboard.state();
    info!("Pages: {}", state.pages.len());

    for page in &state.pages {
        info!(
            "{:<24} {:<8} {:<24} {:<30} owner={} views={} clicks={}{}",
            page.id,
            page.status,
            page.public_path(),
            page.title,
            page.owner_name(),
            page.views,
            page.total_clicks,
            dashboard
                .cover_url(page)
                .map(|url| format!(" cover={url}"))
                .unwrap_or_default(),
        );
    }
}
