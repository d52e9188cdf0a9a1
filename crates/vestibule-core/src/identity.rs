//! Wire types exchanged with the authentication backend.
//!
//! Field names mirror the backend's entity classes exactly; serde maps the
//! JSON straight into these structs with no intermediate mapping step.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Login request body.
///
/// The password travels client to server exactly once, at login, and is
/// never echoed back. `Debug` redacts it so it cannot leak through logs.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Authenticated user record returned after a successful login.
///
/// The backend never populates a password on this projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    /// Stable identifier for the user.
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Roles attached to the account (e.g. USER, ADMIN, MODERATOR).
    #[serde(default)]
    pub roles: Vec<Role>,
}

/// A single named role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
}
