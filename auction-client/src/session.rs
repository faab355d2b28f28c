use crate::backend::AuthBackend;
use crate::error::AuctionClientError;
use crate::models::{LoginForm, RegisterRequest, TokenResponse};
use crate::token_store::TokenStore;

pub const RESTORED_USERNAME: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
}

/// Gates UI affordances on the presence of a persisted token.
#[derive(Debug)]
pub struct SessionGate<T: TokenStore> {
    store: T,
    session: Option<Session>,
}

impl<T: TokenStore> SessionGate<T> {
    pub fn new(store: T) -> Self {
        Self {
            store,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.store.load().ok().flatten()
    }

    pub fn store(&self) -> &T {
        &self.store
    }

    /// Marks a session if a token is persisted. No network call is made.
    pub fn restore_session(&mut self) -> Option<&Session> {
        match self.store.load() {
            Ok(Some(_)) => {
                tracing::debug!("Restoring session from persisted token");
                self.session = Some(Session {
                    username: RESTORED_USERNAME.to_string(),
                });
            }
            Ok(None) => self.session = None,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read persisted token");
                self.session = None;
            }
        }
        self.session.as_ref()
    }

    pub async fn login<B>(
        &mut self,
        backend: &B,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<&Session, AuctionClientError>
    where
        B: AuthBackend + ?Sized,
    {
        let form = LoginForm {
            username: username.into(),
            password: password.into(),
        };

        tracing::debug!(username = %form.username, "Sending login request");
        let token = backend.login(&form).await?;
        self.complete_login(form.username, token)
    }

    pub fn complete_login(
        &mut self,
        username: impl Into<String>,
        token: TokenResponse,
    ) -> Result<&Session, AuctionClientError> {
        if token.access_token.trim().is_empty() {
            return Err(AuctionClientError::SerializationError(
                "login response carried an empty access_token".into(),
            ));
        }

        self.store.save(&token.access_token)?;
        let session = self.session.insert(Session {
            username: username.into(),
        });
        tracing::info!(username = %session.username, "Logged in");
        Ok(&*session)
    }

    /// Registration never creates a session; the user logs in afterwards.
    pub async fn register<B>(
        &self,
        backend: &B,
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<(), AuctionClientError>
    where
        B: AuthBackend + ?Sized,
    {
        let req = RegisterRequest {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        };

        tracing::debug!(username = %req.username, "Sending register request");
        backend.register(&req).await
    }

    pub fn logout(&mut self) -> Result<(), AuctionClientError> {
        self.session = None;
        self.store.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_store::MemoryTokenStore;
    use async_trait::async_trait;
    use std::cell::Cell;

    struct FakeAuth {
        calls: Cell<usize>,
    }

    impl FakeAuth {
        fn new() -> Self {
            Self { calls: Cell::new(0) }
        }
    }

    #[async_trait(?Send)]
    impl AuthBackend for FakeAuth {
        async fn login(&self, form: &LoginForm) -> Result<TokenResponse, AuctionClientError> {
            self.calls.set(self.calls.get() + 1);
            if form.password == "hunter2" {
                Ok(TokenResponse {
                    access_token: format!("token-for-{}", form.username),
                    token_type: "bearer".into(),
                })
            } else {
                Err(AuctionClientError::Api {
                    status: 401,
                    detail: Some("Incorrect username or password".into()),
                })
            }
        }

        async fn register(&self, req: &RegisterRequest) -> Result<(), AuctionClientError> {
            self.calls.set(self.calls.get() + 1);
            if req.username == "taken" {
                Err(AuctionClientError::Api {
                    status: 400,
                    detail: Some("Username already registered".into()),
                })
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn login_persists_token_and_marks_session() {
        let backend = FakeAuth::new();
        let mut gate = SessionGate::new(MemoryTokenStore::new());

        let session = gate.login(&backend, "alice", "hunter2").await.unwrap();
        assert_eq!(session.username, "alice");
        assert!(gate.is_active());
        assert_eq!(gate.token().as_deref(), Some("token-for-alice"));
    }

    #[tokio::test]
    async fn failed_login_leaves_no_session() {
        let backend = FakeAuth::new();
        let mut gate = SessionGate::new(MemoryTokenStore::new());

        let err = gate.login(&backend, "alice", "wrong").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message("Login failed"), "Incorrect username or password");
        assert!(!gate.is_active());
        assert_eq!(gate.token(), None);
    }

    #[tokio::test]
    async fn restore_after_login_needs_no_network() {
        let backend = FakeAuth::new();
        let mut gate = SessionGate::new(MemoryTokenStore::new());
        gate.login(&backend, "alice", "hunter2").await.unwrap();
        assert_eq!(backend.calls.get(), 1);

        // Simulate a reload: a fresh gate over the same persisted storage.
        let mut reloaded = SessionGate::new(gate.store().clone());
        let session = reloaded.restore_session().cloned();

        assert_eq!(
            session,
            Some(Session {
                username: RESTORED_USERNAME.into()
            })
        );
        assert_eq!(backend.calls.get(), 1);
    }

    #[test]
    fn logout_then_restore_yields_nothing() {
        let mut gate = SessionGate::new(MemoryTokenStore::with_token("abc"));
        assert!(gate.restore_session().is_some());

        gate.logout().unwrap();
        assert!(!gate.is_active());
        assert!(gate.restore_session().is_none());
    }

    #[test]
    fn restore_without_token_is_inactive() {
        let mut gate = SessionGate::new(MemoryTokenStore::new());
        assert!(gate.restore_session().is_none());
    }

    #[test]
    fn empty_access_token_is_rejected() {
        let mut gate = SessionGate::new(MemoryTokenStore::new());
        let result = gate.complete_login(
            "alice",
            TokenResponse {
                access_token: String::new(),
                token_type: "bearer".into(),
            },
        );
        assert!(result.is_err());
        assert!(!gate.is_active());
    }

    #[tokio::test]
    async fn register_does_not_log_in() {
        let backend = FakeAuth::new();
        let gate = SessionGate::new(MemoryTokenStore::new());

        gate.register(&backend, "bob", "bob@example.com", "pw")
            .await
            .unwrap();
        assert!(!gate.is_active());

        let err = gate
            .register(&backend, "taken", "t@example.com", "pw")
            .await
            .unwrap_err();
        assert_eq!(err.user_message("Registration failed"), "Username already registered");
    }
}
