//! Local accounts and sessions
//!
//! There is no remote identity service: users live in a table in the local
//! store and the logged-in user is a session record next to it. Signup and
//! login wait a configurable moment to mimic a network round trip.

pub mod password;
pub mod types;

pub use types::{Plan, StoredUser, User};

use password::{hash_password, verify_password};

use crate::config::AuthConfig;
use crate::error::{LegalisError, Result};
use crate::storage::{keys, read_json, write_json, KeyValueStore};
use chrono::{SubsecRound, Utc};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Manager for the local user table and session record
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    signup_latency: Duration,
    login_latency: Duration,
}

impl SessionManager {
    /// Create a manager with the default simulated latencies
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::from_config(store, &AuthConfig::default())
    }

    /// Create a manager with latencies taken from configuration
    pub fn from_config(store: Arc<dyn KeyValueStore>, config: &AuthConfig) -> Self {
        Self::with_latency(
            store,
            Duration::from_millis(config.signup_latency_ms),
            Duration::from_millis(config.login_latency_ms),
        )
    }

    /// Create a manager with explicit latencies (zero in tests)
    pub fn with_latency(
        store: Arc<dyn KeyValueStore>,
        signup_latency: Duration,
        login_latency: Duration,
    ) -> Self {
        Self {
            store,
            signup_latency,
            login_latency,
        }
    }

    /// Currently logged-in user, if any
    pub fn current_user(&self) -> Option<User> {
        read_json(self.store.as_ref(), keys::SESSION)
    }

    /// Logged-in user, or an authentication error naming the requirement
    pub fn require_user(&self) -> Result<User> {
        self.current_user().ok_or_else(|| {
            LegalisError::Authentication("Please log in to run an analysis.".to_string()).into()
        })
    }

    /// Register an account and log it in
    ///
    /// # Errors
    ///
    /// Returns `LegalisError::Validation` for a short name, malformed email,
    /// empty password or an email that is already registered, and
    /// `LegalisError::Storage` if the account cannot be written
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use std::time::Duration;
    /// use legalis::auth::{Plan, SessionManager};
    /// use legalis::storage::MemoryStore;
    ///
    /// let runtime = tokio::runtime::Runtime::new().unwrap();
    /// runtime.block_on(async {
    ///     let sessions = SessionManager::with_latency(
    ///         Arc::new(MemoryStore::new()),
    ///         Duration::ZERO,
    ///         Duration::ZERO,
    ///     );
    ///     let user = sessions.signup("Ada", "ada@example.com", "pw").await.unwrap();
    ///     assert_eq!(user.plan, Plan::Free);
    ///     assert_eq!(sessions.current_user(), Some(user));
    /// });
    /// ```
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<User> {
        simulate_latency(self.signup_latency).await;

        let name = name.trim();
        let email = email.trim();
        if name.chars().count() < 2 {
            return Err(LegalisError::Validation("Please enter a valid name.".to_string()).into());
        }
        if !is_valid_email(email) {
            return Err(
                LegalisError::Validation("Please enter a valid email address.".to_string()).into(),
            );
        }
        if password.is_empty() {
            return Err(LegalisError::Validation("Password cannot be empty.".to_string()).into());
        }

        let mut users = self.users();
        if users.iter().any(|u| u.matches_email(email)) {
            return Err(LegalisError::Validation("Email already registered.".to_string()).into());
        }

        let hashed = hash_password(password);
        let stored = StoredUser {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hashed.hash,
            salt: hashed.salt,
            plan: Plan::Free,
            joined_at: Utc::now().trunc_subsecs(3),
        };
        let user = stored.to_user();
        users.push(stored);

        write_json(self.store.as_ref(), keys::USERS, &users)?;
        if let Err(e) = write_json(self.store.as_ref(), keys::SESSION, &user) {
            users.pop();
            if let Err(rollback) = write_json(self.store.as_ref(), keys::USERS, &users) {
                tracing::warn!("Failed to roll back user table: {}", rollback);
            }
            return Err(e);
        }

        tracing::info!("Registered user {}", user.id);
        Ok(user)
    }

    /// Log in with email and password
    ///
    /// # Errors
    ///
    /// Returns `LegalisError::Authentication` unless the pair matches a
    /// registered account
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        simulate_latency(self.login_latency).await;

        let user = self
            .users()
            .into_iter()
            .find(|u| u.matches_email(email) && verify_password(password, &u.salt, &u.password_hash))
            .map(|u| u.to_user())
            .ok_or_else(|| {
                tracing::debug!("Login rejected");
                LegalisError::Authentication("Invalid email or password.".to_string())
            })?;

        write_json(self.store.as_ref(), keys::SESSION, &user)?;
        tracing::info!("Logged in user {}", user.id);
        Ok(user)
    }

    /// End the current session; does nothing when logged out
    ///
    /// # Errors
    ///
    /// Returns `LegalisError::Storage` if the session record cannot be removed
    pub fn logout(&self) -> Result<()> {
        self.store.remove(keys::SESSION)?;
        tracing::debug!("Session cleared");
        Ok(())
    }

    fn users(&self) -> Vec<StoredUser> {
        read_json(self.store.as_ref(), keys::USERS).unwrap_or_default()
    }
}

async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}
