//! Static-credential login with a persisted session record.
//!
//! A single configured account may log in. Successful logins write a session
//! record (username plus a random token) to the key-value directory; the
//! session counts as authenticated while that record exists and still names
//! the configured account.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storyboard_core::auth::AuthGate;
use storyboard_core::store::StoreError;
use storyboard_core::types::Timestamp;

use crate::file_store::KeyValueDir;
use crate::password;

/// Key holding the current session record.
pub const SESSION_KEY: &str = "session";

/// Persisted login session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    pub token: String,
    pub logged_in_at: Timestamp,
}

/// Reasons a login attempt can fail.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Login is disabled: STORYBOARD_PASSWORD_HASH is not set")]
    NotConfigured,

    #[error("Configured password hash is malformed: {0}")]
    MalformedHash(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The one account allowed to log in.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password_hash: Option<String>,
}

/// Login gate backed by the key-value directory.
#[derive(Debug, Clone)]
pub struct SessionAuth {
    dir: KeyValueDir,
    credentials: Credentials,
}

impl SessionAuth {
    pub fn new(dir: KeyValueDir, credentials: Credentials) -> Self {
        Self { dir, credentials }
    }

    /// Check `username` / `password` and, on success, persist a new session.
    pub fn login(&self, username: &str, password: &str) -> Result<Session, LoginError> {
        let hash = self
            .credentials
            .password_hash
            .as_deref()
            .ok_or(LoginError::NotConfigured)?;

        let password_ok = password::matches_hash(password, hash)
            .map_err(|e| LoginError::MalformedHash(e.to_string()))?;
        if username != self.credentials.username || !password_ok {
            tracing::warn!(username, "Rejected login attempt");
            return Err(LoginError::InvalidCredentials);
        }

        let session = Session {
            username: username.to_string(),
            token: Uuid::new_v4().simple().to_string(),
            logged_in_at: Utc::now(),
        };
        self.dir.put(SESSION_KEY, &session)?;
        tracing::info!(username, "Logged in");
        Ok(session)
    }

    /// Drop the current session. Returns whether one existed.
    pub fn logout(&self) -> Result<bool, StoreError> {
        let existed = self.dir.delete(SESSION_KEY)?;
        if existed {
            tracing::info!("Logged out");
        }
        Ok(existed)
    }

    /// The active session, if any. Sessions for another account are ignored.
    pub fn current(&self) -> Result<Option<Session>, StoreError> {
        let session: Option<Session> = self.dir.get(SESSION_KEY)?;
        Ok(session.filter(|s| s.username == self.credentials.username && !s.token.is_empty()))
    }
}

impl AuthGate for SessionAuth {
    fn is_authenticated(&self) -> bool {
        match self.current() {
            Ok(session) => session.is_some(),
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable session record; treating as logged out");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn auth_with_password(dir: &std::path::Path, password: Option<&str>) -> SessionAuth {
        let credentials = Credentials {
            username: "Chirag".to_string(),
            password_hash: password.map(|p| password::hash_password(p).unwrap()),
        };
        SessionAuth::new(KeyValueDir::open(dir).unwrap(), credentials)
    }

    #[test]
    fn correct_credentials_log_in() {
        let tmp = tempfile::tempdir().unwrap();
        let auth = auth_with_password(tmp.path(), Some("Loki"));
        assert!(!auth.is_authenticated());

        let session = auth.login("Chirag", "Loki").unwrap();
        assert_eq!(session.username, "Chirag");
        assert_eq!(session.token.len(), 32);
        assert!(auth.is_authenticated());
        assert_eq!(auth.current().unwrap(), Some(session));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let auth = auth_with_password(tmp.path(), Some("Loki"));
        assert_matches!(auth.login("Chirag", "Thor"), Err(LoginError::InvalidCredentials));
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn wrong_username_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let auth = auth_with_password(tmp.path(), Some("Loki"));
        assert_matches!(auth.login("chirag", "Loki"), Err(LoginError::InvalidCredentials));
    }

    #[test]
    fn login_without_configured_hash_is_disabled() {
        let tmp = tempfile::tempdir().unwrap();
        let auth = auth_with_password(tmp.path(), None);
        assert_matches!(auth.login("Chirag", "Loki"), Err(LoginError::NotConfigured));
    }

    #[test]
    fn logout_clears_session() {
        let tmp = tempfile::tempdir().unwrap();
        let auth = auth_with_password(tmp.path(), Some("Loki"));
        auth.login("Chirag", "Loki").unwrap();

        assert!(auth.logout().unwrap());
        assert!(!auth.is_authenticated());
        assert!(!auth.logout().unwrap());
    }

    #[test]
    fn session_for_other_account_is_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let auth = auth_with_password(tmp.path(), Some("Loki"));
        auth.login("Chirag", "Loki").unwrap();

        let renamed = SessionAuth::new(
            KeyValueDir::open(tmp.path()).unwrap(),
            Credentials {
                username: "someone-else".to_string(),
                password_hash: None,
            },
        );
        assert!(!renamed.is_authenticated());
    }

    #[test]
    fn corrupt_session_counts_as_logged_out() {
        let tmp = tempfile::tempdir().unwrap();
        let auth = auth_with_password(tmp.path(), Some("Loki"));
        std::fs::write(tmp.path().join("session.json"), b"garbage").unwrap();
        assert!(!auth.is_authenticated());
    }
}
