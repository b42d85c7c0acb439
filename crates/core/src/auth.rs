use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

/// Coarse access level carried by the authenticated session.
///
/// The auth service resolves the role at login; org-chart administration is
/// restricted to leaders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Regular employee account.
    Employee,
    /// Team leader with org-chart administration access.
    Leader,
}

impl UserRole {
    /// Returns the storage string for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Leader => "leader",
        }
    }

    /// Parses a storage string into a role.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "employee" => Ok(Self::Employee),
            "leader" => Ok(Self::Leader),
            _ => Err(AppError::Validation(format!("unknown user role '{value}'"))),
        }
    }
}

/// User information persisted in the authenticated session.
///
/// Written by the auth service at login; this repository only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: String,
    display_name: String,
    email: Option<String>,
    role: UserRole,
}

impl UserIdentity {
    /// Creates a user identity from authentication data.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        display_name: impl Into<String>,
        email: Option<String>,
        role: UserRole,
    ) -> Self {
        Self {
            subject: subject.into(),
            display_name: display_name.into(),
            email,
            role,
        }
    }

    /// Returns the stable subject claim (the user's UUID) from the session.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the email, if the auth service recorded one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Returns the coarse access level.
    #[must_use]
    pub fn role(&self) -> UserRole {
        self.role
    }
}
