//! Request and response bodies for admin API calls.

use mytrack_core::{Plan, Role};
use serde::{Deserialize, Serialize};

use crate::models::User;

#[derive(Debug, Serialize)]
pub(crate) struct BanUpdate {
    pub is_banned: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct VerifyUpdate {
    pub is_verified: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct RoleUpdate {
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub(crate) struct PlanUpdate {
    pub plan: Plan,
}

#[derive(Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Response of `POST /auth/login`.
#[derive(Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}
