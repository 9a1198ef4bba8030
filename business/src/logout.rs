//! Logout: notify the backend, then tear down the local session no matter what.
//!
//! The two steps are independent. The server call is best-effort and bounded by
//! [`BusinessConfig::logout_timeout`]; its outcome is logged and otherwise
//! ignored. Clearing the session always runs afterwards, and the caller always
//! navigates to the login view.

use log::{error, info, warn};
use thiserror::Error;

use crate::BusinessConfig;
use crate::http::{Client, HttpError};
use crate::route::{Navigation, Route};
use crate::session::Session;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LogoutError {
    #[error("logout endpoint answered with status {0}")]
    Status(u16),
    #[error(transparent)]
    Network(#[from] HttpError),
}

/// What happened during a logout. The session is cleared in every case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoutOutcome {
    /// Result of the server notification, kept for logging and tests only.
    pub server: Result<(), LogoutError>,
    /// Where the UI goes next; always the login view.
    pub navigation: Navigation,
}

/// `POST /api/auth/logout` with an empty body.
pub async fn notify_server(config: &BusinessConfig, session: &Session) -> Result<(), LogoutError> {
    let response = Client::post(config.logout_url())
        .bearer(session.token().as_deref())
        .timeout(config.logout_timeout)
        .send()
        .await?;

    if response.is_success() {
        Ok(())
    } else {
        Err(LogoutError::Status(response.status))
    }
}

/// Removes the token and profile. Failures are logged; the caller proceeds
/// as signed out regardless.
pub fn clear_local_session(session: &Session) {
    match session.clear() {
        Ok(()) => info!("Logout: local session cleared"),
        Err(err) => error!("Logout: failed to clear local session: {}", err),
    }
}

pub async fn logout(config: &BusinessConfig, session: &Session) -> LogoutOutcome {
    let server = notify_server(config, session).await;
    match &server {
        Ok(()) => info!("Logout: server acknowledged"),
        Err(err) => warn!("Logout: server notification failed (ignored): {}", err),
    }

    clear_local_session(session);

    LogoutOutcome {
        server,
        navigation: Navigation::push(Route::Login),
    }
}
