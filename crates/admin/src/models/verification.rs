//! Artist verification requests.

use chrono::{DateTime, NaiveDateTime, Utc};
use mytrack_core::{UserId, VerificationRequestId, VerificationStatus};
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// A request from an artist to receive the verified badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    pub id: VerificationRequestId,
    pub user_id: UserId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artist_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub social_links: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: VerificationStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl VerificationRequest {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == VerificationStatus::Pending
    }

    /// Submission time, accepting RFC 3339 or a naive UTC timestamp.
    #[must_use]
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }
}
