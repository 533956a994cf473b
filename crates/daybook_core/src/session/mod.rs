//! Process-local login session.
//!
//! # Responsibility
//! - Track the signed-in username for the lifetime of the process.
//! - Check login/register input for presence, nothing more.
//!
//! # Invariants
//! - No credential is ever persisted or verified against stored data.
//! - Session state does not survive a process restart.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected login/register input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    EmptyUsername,
    EmptyPassword,
    /// Register only: confirmation does not match the password.
    PasswordMismatch,
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
            Self::PasswordMismatch => write!(f, "passwords do not match"),
        }
    }
}

impl Error for AuthError {}

/// In-memory authentication state.
///
/// Login is a local-only placeholder: any non-empty username and password
/// pair is accepted, by design.
#[derive(Debug, Default)]
pub struct Session {
    username: Option<String>,
}

impl Session {
    /// Creates a logged-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signs in with a presence-only check on both fields.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        if username.is_empty() {
            return Err(AuthError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }

        self.username = Some(username.to_string());
        Ok(())
    }

    /// Validates register input: all fields present, passwords matching.
    ///
    /// Nothing is stored; the caller redirects to login on success.
    pub fn register(username: &str, password: &str, confirm: &str) -> Result<(), AuthError> {
        if username.is_empty() {
            return Err(AuthError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        if password != confirm {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(())
    }

    /// Clears the signed-in username.
    pub fn logout(&mut self) {
        self.username = None;
    }

    /// The signed-in username, or `None` when logged out.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Whether a username is currently signed in.
    pub fn is_logged_in(&self) -> bool {
        self.username.is_some()
    }
}
