//! MyTrack account as seen by the admin dashboard.

use mytrack_core::{AccountStatus, Plan, Role, UserId};
use serde::{Deserialize, Deserializer, Serialize};

use super::null_as_default;

/// A MyTrack user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Unknown roles fall back to [`Role::User`].
    #[serde(default = "lowest_role", deserialize_with = "lossy_role")]
    pub role: Role,
    /// Unknown plans fall back to [`Plan::Free`].
    #[serde(default, deserialize_with = "lossy_plan")]
    pub plan: Plan,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_banned: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_verified: bool,
    /// Legacy verification flag still set on older accounts.
    #[serde(default, deserialize_with = "null_as_default")]
    pub verified: bool,
    #[serde(default)]
    pub status: Option<AccountStatus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_count: u32,
}

impl User {
    /// Banned either by flag or by a blocked account status.
    #[must_use]
    pub fn is_banned(&self) -> bool {
        self.is_banned || self.status == Some(AccountStatus::Blocked)
    }

    /// Verified by the current or the legacy flag.
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        self.is_verified || self.verified
    }

    /// Not banned and explicitly marked active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.is_banned && self.status == Some(AccountStatus::Active)
    }
}

const fn lowest_role() -> Role {
    Role::User
}

fn lossy_role<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Role, D::Error> {
    let key = Option::<String>::deserialize(deserializer)?;
    Ok(key.map_or(Role::User, |k| Role::parse_lossy(&k)))
}

fn lossy_plan<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Plan, D::Error> {
    let key = Option::<String>::deserialize(deserializer)?;
    Ok(key.map_or(Plan::Free, |k| Plan::parse_lossy(&k)))
}
