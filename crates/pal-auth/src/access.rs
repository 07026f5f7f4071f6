//! Access control between views.
//!
//! Protected views send anonymous users to the login view; anonymous-only
//! views send authenticated users to the chat. While the identity check is
//! still running nobody is redirected.

use pal_core::{AuthTransport, Route, Session, SessionStatus};

use crate::error::AuthError;
use crate::manager::SessionManager;

/// Navigation collaborator. Fire-and-forget.
pub trait Navigator {
    fn navigate_to(&mut self, route: Route);
}

/// Redirect target for `route` given a resolved authentication state.
#[must_use]
pub const fn redirect_for(route: Route, is_authenticated: bool) -> Option<Route> {
    if route.is_protected() && !is_authenticated {
        Some(Route::Login)
    } else if route.is_anonymous_only() && is_authenticated {
        Some(Route::Chat)
    } else {
        None
    }
}

/// Like [`redirect_for`], but holds off until the session status is resolved.
#[must_use]
pub const fn guard(route: Route, status: SessionStatus) -> Option<Route> {
    if !status.is_resolved() {
        return None;
    }
    redirect_for(route, matches!(status, SessionStatus::Authenticated))
}

/// Enter `route`, redirecting through `navigator` if the session does not allow it.
///
/// Returns the route that is actually shown.
pub fn enter<N: Navigator + ?Sized>(route: Route, session: &Session, navigator: &mut N) -> Route {
    match guard(route, session.status()) {
        Some(target) => {
            tracing::debug!(from = %route, to = %target, "access guard redirect");
            navigator.navigate_to(target);
            target
        }
        None => route,
    }
}

/// Log out, then leave for the login view whether or not the server agreed.
///
/// # Errors
///
/// Returns the [`AuthError`] from [`SessionManager::logout`]; navigation has
/// already happened by then.
pub async fn sign_out<T, N>(session: &mut SessionManager<T>, navigator: &mut N) -> Result<(), AuthError>
where
    T: AuthTransport,
    N: Navigator + ?Sized,
{
    let result = session.logout().await;
    navigator.navigate_to(Route::Login);
    result
}
