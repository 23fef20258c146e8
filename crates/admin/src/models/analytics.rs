//! Read-only aggregate snapshots: platform analytics and host metrics.
//!
//! Both are replaced wholesale on every fetch, never merged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::null_as_default;

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Platform-wide totals with a daily timeline and per-country breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlobalAnalytics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_users: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_pages: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_views: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_clicks: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_shares: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_qr_scans: u64,
    /// Daily clicks for the last 30 days.
    #[serde(default, deserialize_with = "null_as_default")]
    pub timeline: Vec<TimelinePoint>,
    /// Clicks per country, busiest first.
    #[serde(default, deserialize_with = "null_as_default")]
    pub by_country: Vec<CountryClicks>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clicks: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryClicks {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub clicks: u64,
}

/// Host resource usage of the backend server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SystemMetrics {
    #[serde(default)]
    pub cpu: Option<CpuMetrics>,
    #[serde(default)]
    pub memory: Option<UsageMetrics>,
    #[serde(default)]
    pub disk: Option<UsageMetrics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuMetrics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub percent: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u32,
}

/// Memory or disk usage in bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageMetrics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub percent: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub used: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
}

impl UsageMetrics {
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Byte counts stay far below f64's exact range in practice
    pub fn used_gb(&self) -> f64 {
        self.used as f64 / BYTES_PER_GB
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn total_gb(&self) -> f64 {
        self.total as f64 / BYTES_PER_GB
    }
}
