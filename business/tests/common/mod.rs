//! Shared setup for business integration tests.

use std::time::Duration;

use loanpay_business::{BusinessConfig, Role, Session, UserProfile};
use wiremock::MockServer;

pub struct TestContext {
    pub mock_server: MockServer,
    pub config: BusinessConfig,
    pub session: Session,
}

impl TestContext {
    /// Mock server plus an in-memory session that is signed out.
    pub async fn new() -> Self {
        let mock_server = MockServer::start().await;
        let mut config = BusinessConfig::new(mock_server.uri());
        config.logout_timeout = Duration::from_millis(300);

        Self {
            mock_server,
            config,
            session: Session::in_memory(),
        }
    }

    /// Same as [`Self::new`], signed in as Ada with the `borrower` role.
    pub async fn signed_in() -> Self {
        let ctx = Self::new().await;
        ctx.session
            .sign_in("test-token", &sample_user())
            .expect("sign in should succeed");
        ctx
    }
}

pub fn sample_user() -> UserProfile {
    UserProfile {
        email: Some("ada@example.com".to_owned()),
        name: Some("Ada Lovelace".to_owned()),
        phone_number: Some("+15550100".to_owned()),
        role: Some(Role::new("borrower")),
    }
}

/// Config pointing at a port nothing listens on.
pub fn unreachable_config() -> BusinessConfig {
    let mut config = BusinessConfig::new("http://127.0.0.1:1".to_owned());
    config.logout_timeout = Duration::from_millis(300);
    config
}
