//! Wire models for the MyTrack admin API.
//!
//! These are transient, re-fetchable copies of backend-owned records. They
//! are deserialized leniently: optional counters may be missing or `null`.

mod analytics;
mod page;
mod plan_config;
mod user;
mod verification;

pub use analytics::{CountryClicks, CpuMetrics, GlobalAnalytics, SystemMetrics, TimelinePoint, UsageMetrics};
pub use page::{Page, PageOwner, TogglePageResponse};
pub use plan_config::{PlanConfig, PlanConfigUpdate, PlanFeature};
pub use user::User;
pub use verification::VerificationRequest;

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
