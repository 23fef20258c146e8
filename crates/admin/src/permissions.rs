//! Which user-row actions an administrator is offered.
//!
//! Authorization is decided by role alone: the backend enforces it again,
//! the dashboard only hides what it knows will be refused.

use mytrack_core::Role;

use crate::models::User;

/// A mutation that targets a single user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserAction {
    Ban,
    Verify,
    ChangeRole,
    ChangePlan,
}

impl UserAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ban => "ban",
            Self::Verify => "verify",
            Self::ChangeRole => "change role",
            Self::ChangePlan => "change plan",
        }
    }
}

impl std::fmt::Display for UserAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actions offered for one user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct UserActions {
    pub can_ban: bool,
    pub can_verify: bool,
    pub can_change_role: bool,
    pub can_change_plan: bool,
}

impl UserActions {
    /// Resolve the offered actions for `actor` looking at `target`.
    ///
    /// Owners are protected from every mutation. Only an owner may change
    /// roles, and admins cannot be banned.
    #[must_use]
    pub fn resolve(actor: Role, target: &User) -> Self {
        let target_is_owner = target.role == Role::Owner;
        Self {
            can_ban: !matches!(target.role, Role::Owner | Role::Admin),
            can_verify: !target_is_owner,
            can_change_role: actor == Role::Owner && !target_is_owner,
            can_change_plan: !target_is_owner,
        }
    }

    #[must_use]
    pub const fn allows(&self, action: UserAction) -> bool {
        match action {
            UserAction::Ban => self.can_ban,
            UserAction::Verify => self.can_verify,
            UserAction::ChangeRole => self.can_change_role,
            UserAction::ChangePlan => self.can_change_plan,
        }
    }

    /// Roles the role selector lists, empty when role changes are not offered.
    #[must_use]
    pub const fn assignable_roles(&self) -> &'static [Role] {
        if self.can_change_role {
            &Role::ASSIGNABLE
        } else {
            &[]
        }
    }
}
