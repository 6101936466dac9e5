//! Account roles
//!
//! Three fixed roles gate the API surface: customers register as `user`,
//! restaurant owners are `admin`, and admins create `worker` helper
//! accounts for their staff.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Account role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Ordering customer (default on registration)
    User,
    /// Restaurant staff account, created by an admin
    Worker,
    /// Restaurant owner
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// Error parsing a role string
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "worker" => Ok(Role::Worker),
            "admin" => Ok(Role::Admin),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::User => "user",
            Role::Worker => "worker",
            Role::Admin => "admin",
        };
        write!(f, "{}", s)
    }
}
