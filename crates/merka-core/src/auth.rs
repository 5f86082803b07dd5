//! # Login Gate
//!
//! The shop runs with two fixed accounts, one per role. There is no user
//! table; credentials are compared as given.
//!
//! | Username  | Password | Role      |
//! |-----------|----------|-----------|
//! | `admin`   | `1234`   | `Admin`   |
//! | `barbero` | `1234`   | `Barbero` |

use crate::error::{CoreError, CoreResult};
use crate::types::Role;

/// The accepted (username, password, role) triples.
const ACCOUNTS: [(&str, &str, Role); 2] = [
    ("admin", "1234", Role::Admin),
    ("barbero", "1234", Role::Barbero),
];

/// Checks a username/password pair and returns the role it logs in as.
///
/// ## Example
/// ```rust
/// use merka_core::auth::authenticate;
/// use merka_core::Role;
///
/// assert_eq!(authenticate("admin", "1234").unwrap(), Role::Admin);
/// assert!(authenticate("admin", "admin").is_err());
/// ```
pub fn authenticate(username: &str, password: &str) -> CoreResult<Role> {
    ACCOUNTS
        .iter()
        .find(|(user, pass, _)| *user == username && *pass == password)
        .map(|(_, _, role)| *role)
        .ok_or(CoreError::InvalidCredentials)
}
