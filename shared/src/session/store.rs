use super::storage::SessionStorage;
use crate::config::{EMAIL_KEY, TEST_ACCOUNT_EMAIL, TEST_TOKEN_PREFIX, TOKEN_KEY};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Identity {
    token: String,
    email: String,
}

/// Current authenticated identity. Token and email are present together or
/// not at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session(Option<Identity>);

impl Session {
    pub fn absent() -> Self {
        Self(None)
    }

    /// A blank token or email gives an absent session.
    pub fn new(token: impl Into<String>, email: impl Into<String>) -> Self {
        let (token, email) = (token.into(), email.into());
        if is_blank(&token) || is_blank(&email) {
            return Self::absent();
        }
        Self(Some(Identity { token, email }))
    }

    pub fn token(&self) -> Option<&str> {
        self.0.as_ref().map(|i| i.token.as_str())
    }

    pub fn email(&self) -> Option<&str> {
        self.0.as_ref().map(|i| i.email.as_str())
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    pub fn is_test_account(&self) -> bool {
        self.token().is_some_and(|t| t.starts_with(TEST_TOKEN_PREFIX))
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Uninitialized,
    Restoring,
    Authenticated,
    Absent,
}

/// Owns the session and keeps it in sync with durable storage. One instance
/// per app, handed to whoever needs it.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    session: Session,
    phase: SessionPhase,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            session: Session::absent(),
            phase: SessionPhase::Uninitialized,
        }
    }

    /// Rehydrates from storage once. Later calls are no-ops.
    pub fn restore(&mut self) -> &Session {
        if self.phase != SessionPhase::Uninitialized {
            return &self.session;
        }
        self.phase = SessionPhase::Restoring;

        let token = self.storage.read(TOKEN_KEY).filter(|t| !is_blank(t));
        let email = self.storage.read(EMAIL_KEY).filter(|e| !is_blank(e));
        match (token, email) {
            (Some(token), Some(email)) => {
                log::info!("Restored session for {}", email);
                self.replace(Session::new(token, email));
            }
            (token, email) => {
                if token.is_some() || email.is_some() {
                    log::warn!("Ignoring partial stored session");
                } else {
                    log::info!("No stored session");
                }
                self.replace(Session::absent());
            }
        }
        &self.session
    }

    pub fn login(&mut self, token: &str, email: &str) {
        if is_blank(token) || is_blank(email) {
            log::warn!("Ignoring login with a blank token or email");
            return;
        }
        self.storage.write(TOKEN_KEY, token);
        self.storage.write(EMAIL_KEY, email);
        self.replace(Session::new(token, email));
        log::info!("Logged in as {}", email);
    }

    /// Logs in with a locally minted token the remote service will most
    /// likely reject. Useful for exercising the UI without a backend.
    pub fn login_with_test_account(&mut self) {
        let token = format!(
            "{}{}",
            TEST_TOKEN_PREFIX,
            chrono::Utc::now().timestamp_millis()
        );
        log::info!("Using test account {}", TEST_ACCOUNT_EMAIL);
        self.login(&token, TEST_ACCOUNT_EMAIL);
    }

    pub fn logout(&mut self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(EMAIL_KEY);
        if !self.session.is_absent() {
            log::info!("Logged out");
        }
        self.replace(Session::absent());
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == SessionPhase::Authenticated
    }

    fn replace(&mut self, session: Session) {
        self.phase = if session.is_absent() {
            SessionPhase::Absent
        } else {
            SessionPhase::Authenticated
        };
        self.session = session;
    }
}
