//! Role, plan and status enums for MyTrack entities.

use serde::{Deserialize, Serialize};

/// Authorization tier of a MyTrack account.
///
/// Variants are declared from lowest to highest so the derived ordering
/// matches the privilege order: `Owner > Admin > Moderator > User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular musician account.
    User,
    /// Can review content.
    Moderator,
    /// Full access to the admin dashboard except role management.
    Admin,
    /// Platform owner; the only role allowed to change other roles.
    Owner,
}

impl Role {
    /// All roles, highest privilege first.
    pub const ALL: [Self; 4] = [Self::Owner, Self::Admin, Self::Moderator, Self::User];

    /// Roles an owner may hand out through the dashboard.
    pub const ASSIGNABLE: [Self; 3] = [Self::User, Self::Moderator, Self::Admin];

    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Moderator => "moderator",
            Self::User => "user",
        }
    }

    /// Parse a role, falling back to [`Role::User`] for unknown keys.
    #[must_use]
    pub fn parse_lossy(key: &str) -> Self {
        key.parse().unwrap_or(Self::User)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "moderator" => Ok(Self::Moderator),
            "user" => Ok(Self::User),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Subscription tier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    #[default]
    Free,
    Pro,
    Ultimate,
}

impl Plan {
    /// All plans, cheapest first.
    pub const ALL: [Self; 3] = [Self::Free, Self::Pro, Self::Ultimate];

    /// Wire name of the plan.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Ultimate => "ultimate",
        }
    }

    /// Parse a plan, falling back to [`Plan::Free`] for unknown keys.
    #[must_use]
    pub fn parse_lossy(key: &str) -> Self {
        key.parse().unwrap_or_default()
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Plan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Self::Free),
            "pro" => Ok(Self::Pro),
            "ultimate" => Ok(Self::Ultimate),
            _ => Err(format!("invalid plan: {s}")),
        }
    }
}

/// Publication status of a link page.
///
/// Any status other than `active`, including a missing one, is shown and
/// toggled as disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PageStatus {
    Active,
    #[default]
    Disabled,
}

impl PageStatus {
    /// The status a toggle moves the page to.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Disabled,
            Self::Disabled => Self::Active,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Disabled => "disabled",
        }
    }

    /// Parse a page status, treating every key but `active` as disabled.
    #[must_use]
    pub fn parse_lossy(key: &str) -> Self {
        if key == "active" {
            Self::Active
        } else {
            Self::Disabled
        }
    }
}

impl std::fmt::Display for PageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Artist verification request status.
///
/// `Pending -> Approved` and `Pending -> Rejected` are the only transitions.
/// A missing or unrecognised status is [`VerificationStatus::Unknown`] and
/// never counts as pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Approved,
    Rejected,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Account status reported alongside the ban flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Blocked,
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(Role::Owner > Role::Admin);
        assert!(Role::Admin > Role::Moderator);
        assert!(Role::Moderator > Role::User);
    }

    #[test]
    fn test_role_round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_lossy_parsing_falls_back_to_lowest_tier() {
        assert_eq!(Role::parse_lossy("emperor"), Role::User);
        assert_eq!(Plan::parse_lossy("platinum"), Plan::Free);
        assert_eq!(Plan::parse_lossy("pro"), Plan::Pro);
    }

    #[test]
    fn test_assignable_roles_exclude_owner() {
        assert!(!Role::ASSIGNABLE.contains(&Role::Owner));
    }

    #[test]
    fn test_page_status_toggle_is_involution() {
        assert_eq!(PageStatus::Active.toggled(), PageStatus::Disabled);
        assert_eq!(PageStatus::Active.toggled().toggled(), PageStatus::Active);
    }

    #[test]
    fn test_page_status_lossy_parsing() {
        assert_eq!(PageStatus::parse_lossy("active"), PageStatus::Active);
        assert_eq!(PageStatus::parse_lossy("disabled"), PageStatus::Disabled);
        assert_eq!(PageStatus::parse_lossy("blocked"), PageStatus::Disabled);
        assert_eq!(PageStatus::default(), PageStatus::Disabled);
    }

    #[test]
    fn test_verification_status_tolerates_unknown_values() {
        let status: VerificationStatus = serde_json::from_str("\"escalated\"").unwrap_or_default();
        assert_eq!(status, VerificationStatus::Unknown);
        let status: VerificationStatus = serde_json::from_str("\"approved\"").unwrap_or_default();
        assert_eq!(status, VerificationStatus::Approved);
        assert_eq!(VerificationStatus::default(), VerificationStatus::Unknown);
    }

    #[test]
    fn test_account_status_tolerates_unknown_values() {
        let status: AccountStatus = serde_json::from_str("\"suspended\"").unwrap_or(AccountStatus::Active);
        assert_eq!(status, AccountStatus::Other);
    }
}
