use dashmap::DashMap;
use uuid::Uuid;

use crate::error::IndexError;
use crate::types::user::{Role, User};
use crate::IndexResult;

/// A configured login. Credentials come from deployment config; there is no
/// self-service signup.
#[derive(Debug, Clone)]
pub struct Account {
    pub email: String,
    pub password: String,
    pub role: Role,
}

pub trait AuthService: Send + Sync {
    /// Checks credentials and opens a bearer-token session.
    fn login(&self, email: &str, password: &str) -> IndexResult<(User, String)>;
    /// Drops the session. Unknown tokens are ignored so client-side cleanup
    /// always succeeds.
    fn logout(&self, token: &str);
    fn current_user(&self, token: &str) -> Option<User>;
}

pub struct InMemoryAuthService {
    accounts: Vec<Account>,
    sessions: DashMap<String, User>,
}

impl InMemoryAuthService {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts,
            sessions: DashMap::new(),
        }
    }
}

impl AuthService for InMemoryAuthService {
    fn login(&self, email: &str, password: &str) -> IndexResult<(User, String)> {
        let account = self
            .accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email) && a.password == password)
            .ok_or(IndexError::InvalidCredentials)?;

        let user = User {
            email: account.email.clone(),
            role: account.role,
        };
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(token.clone(), user.clone());
        tracing::info!("Session opened for {}", user.email);
        Ok((user, token))
    }

    fn logout(&self, token: &str) {
        self.sessions.remove(token);
    }

    fn current_user(&self, token: &str) -> Option<User> {
        self.sessions.get(token).map(|entry| entry.value().clone())
    }
}
