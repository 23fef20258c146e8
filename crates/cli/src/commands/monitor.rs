//! Analytics and host metrics output.

use mytrack_admin::models::{SystemMetrics, UsageMetrics};
use mytrack_admin::presentation::{ProgressColor, format_gb, top_countries};
use mytrack_admin::{Dashboard, DashboardError};
use tracing::{info, warn};

const TOP_COUNTRIES: usize = 5;

pub fn analytics(dashboard: &Dashboard) {
    let state = dashboard.state();
    let Some(analytics) = state.global_analytics.as_ref() else {
        warn!("Global analytics unavailable");
        return;
    };

    info!(
        "Users {} | Pages {} | Views {} | Clicks {} | Shares {} | QR scans {}",
        analytics.total_users,
        analytics.total_pages,
        analytics.total_views,
        analytics.total_clicks,
        analytics.total_shares,
        analytics.total_qr_scans,
    );

    let recent: u64 = analytics.timeline.iter().map(|p| p.clicks).sum();
    info!(
        "Clicks over the last {} days: {recent}",
        analytics.timeline.len()
    );

    for (rank, country) in top_countries(&analytics.by_country, TOP_COUNTRIES)
        .iter()
        .enumerate()
    {
        info!(
            "{}. {} {:<16} {:>8} clicks ({:.0}%)",
            rank + 1,
            country.flag,
            country.name,
            country.clicks,
            country.percent_of_leader,
        );
    }
}

pub fn metrics(dashboard: &Dashboard) {
    match dashboard.state().system_metrics {
        Some(metrics) => log_metrics(&metrics),
        None => warn!("System metrics unavailable"),
    }
}

/// Log metrics on every poll until Ctrl+C.
pub async fn watch(dashboard: &Dashboard) -> Result<(), DashboardError> {
    let mut rx = dashboard.subscribe();
    let mut last = rx.borrow_and_update().system_metrics.clone();
    if let Some(metrics) = &last {
        log_metrics(metrics);
    }
    info!("Watching system metrics, press Ctrl+C to stop");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    return Err(DashboardError::Inactive);
                }
                let current = rx.borrow_and_update().system_metrics.clone();
                if current != last {
                    if let Some(metrics) = &current {
                        log_metrics(metrics);
                    }
                    last = current;
                }
            }
        }
    }
    Ok(())
}

fn log_metrics(metrics: &SystemMetrics) {
    if let Some(cpu) = &metrics.cpu {
        info!(
            "CPU    {:>5.1}% [{}] {} cores",
            cpu.percent,
            ProgressColor::for_percent(cpu.percent).as_str(),
            cpu.count
        );
    }
    if let Some(memory) = &metrics.memory {
        log_usage("Memory", memory);
    }
    if let Some(disk) = &metrics.disk {
        log_usage("Disk", disk);
    }
}

fn log_usage(name: &str, usage: &UsageMetrics) {
    info!(
        "{name:<6} {:>5.1}% [{}] {} / {}",
        usage.percent,
        ProgressColor::for_percent(usage.percent).as_str(),
        format_gb(usage.used_gb()),
        format_gb(usage.total_gb()),
    );
}
