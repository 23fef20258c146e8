//! Unified error handling for the dashboard controller.

use mytrack_core::{PageId, Plan, UserId};
use thiserror::Error;

use crate::api::ApiError;

/// Errors surfaced by [`crate::Dashboard`] operations.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Backend call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The acting administrator may not perform this action.
    ///
    /// Raised before any request is sent.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// No user with this id in the current list.
    #[error("Unknown user: {0}")]
    UnknownUser(UserId),

    /// No page with this id in the current list.
    #[error("Unknown page: {0}")]
    UnknownPage(PageId),

    /// No configuration row for this plan has been loaded.
    #[error("No configuration loaded for plan {0}")]
    UnknownPlan(Plan),

    /// Save requested for a plan without pending edits.
    #[error("Plan {0} has no unsaved changes")]
    NotDirty(Plan),

    /// Page limit below the `-1` unlimited sentinel.
    #[error("Invalid page limit: {0} (use -1 for unlimited)")]
    InvalidPageLimit(i64),

    /// Controller has been deactivated.
    #[error("Dashboard has been deactivated")]
    Inactive,

    /// `activate` called twice.
    #[error("Dashboard is already active")]
    AlreadyActive,
}

impl DashboardError {
    /// Server-supplied detail, when the failure came from the backend.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Api(err) => err.detail(),
            _ => None,
        }
    }
}
