//! The session state machine.

use pal_core::{AuthTransport, Credentials, Registration, Session, SessionStatus, User};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::error::{AuthError, LOGIN_FAILED, LOGOUT_FAILED, REGISTRATION_FAILED};

/// Owns the client-side [`Session`] and mediates every change to it.
///
/// All mutation goes through [`check_session`](Self::check_session),
/// [`login`](Self::login), [`register`](Self::register) and
/// [`logout`](Self::logout). Observers read the session through
/// [`subscribe`](Self::subscribe) or the borrowing getters.
pub struct SessionManager<T> {
    transport: T,
    session: Session,
    updates: watch::Sender<Session>,
    cancel: CancellationToken,
}

impl<T: AuthTransport> SessionManager<T> {
    #[must_use]
    pub fn new(transport: T) -> Self {
        let (updates, _) = watch::channel(Session::unknown());
        Self {
            transport,
            session: Session::unknown(),
            updates,
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.session.status()
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.session.user()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Receiver that sees every session change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.updates.subscribe()
    }

    /// Token that tears this manager down when cancelled.
    #[must_use]
    pub fn cancel_handle(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Stop accepting results. Calls in flight resolve without touching the session.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn is_shut_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Ask the server who we are.
    ///
    /// Any failure, "not logged in" included, resolves to `anonymous`; nothing
    /// is returned as an error. After shutdown this is a no-op.
    pub async fn check_session(&mut self) -> &Session {
        if self.is_shut_down() {
            return &self.session;
        }
        self.set(Session::checking());

        let Some(result) = self
            .cancel
            .run_until_cancelled(self.transport.get_profile())
            .await
        else {
            tracing::debug!("identity check discarded after shutdown");
            return &self.session;
        };

        match result {
            Ok(user) => {
                tracing::info!(user = user.display_name(), "session restored");
                self.set(Session::authenticated(user));
            }
            Err(error) if error.is_unauthorized() => {
                tracing::debug!(%error, "no active session");
                self.set(Session::anonymous());
            }
            Err(error) => {
                tracing::warn!(%error, "identity check failed; treating session as anonymous");
                self.set(Session::anonymous());
            }
        }
        &self.session
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the server rejects the credentials or cannot be
    /// reached. The session is left unchanged in that case.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<Session, AuthError> {
        let result = self
            .cancel
            .run_until_cancelled(self.transport.login(credentials))
            .await
            .ok_or(AuthError::Discarded)?;

        let user = result.map_err(|error| {
            tracing::debug!(%error, email = %credentials.email, "login rejected");
            AuthError::from_transport(error, LOGIN_FAILED)
        })?;
        tracing::info!(user = user.display_name(), "logged in");
        self.set(Session::authenticated(user));
        Ok(self.session.clone())
    }

    /// Create an account and log into it.
    ///
    /// Password confirmation is the caller's job (see
    /// [`Registration::validate`]); the form is forwarded as-is.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the server rejects the registration or cannot be
    /// reached. The session is left unchanged in that case.
    pub async fn register(&mut self, registration: &Registration) -> Result<Session, AuthError> {
        let result = self
            .cancel
            .run_until_cancelled(self.transport.register(registration))
            .await
            .ok_or(AuthError::Discarded)?;

        let user = result.map_err(|error| {
            tracing::debug!(%error, email = %registration.email, "registration rejected");
            AuthError::from_transport(error, REGISTRATION_FAILED)
        })?;
        tracing::info!(user = user.display_name(), "registered");
        self.set(Session::authenticated(user));
        Ok(self.session.clone())
    }

    /// End the server session.
    ///
    /// On success the session becomes `anonymous` whatever it was before.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the server call fails; the session is left
    /// unchanged and the caller may still navigate away.
    pub async fn logout(&mut self) -> Result<(), AuthError> {
        let result = self
            .cancel
            .run_until_cancelled(self.transport.logout())
            .await
            .ok_or(AuthError::Discarded)?;

        result.map_err(|error| {
            tracing::warn!(%error, "logout failed");
            AuthError::from_transport(error, LOGOUT_FAILED)
        })?;
        tracing::info!("logged out");
        self.set(Session::anonymous());
        Ok(())
    }

    fn set(&mut self, next: Session) {
        let from = self.session.status();
        let to = next.status();
        if from != to && !from.can_transition_to(to) {
            tracing::debug!(%from, %to, "session moved outside the checked path");
        }
        self.session = next;
        self.updates.send_replace(self.session.clone());
    }
}
