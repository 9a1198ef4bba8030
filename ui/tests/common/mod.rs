use std::time::Duration;

use egui_kittest::Harness;
use loanpay_business::{Role, UserProfile};
use loanpay_ui::LoanPayApp;
use loanpay_ui::state::State;
use wiremock::MockServer;

pub struct TestCtx<'a> {
    pub mock_server: MockServer,
    harness: Harness<'a, LoanPayApp>,
}

impl<'a> TestCtx<'a> {
    /// App wired to a fresh mock server, signed out.
    pub async fn new_app() -> Self {
        let mock_server = MockServer::start().await;
        let state = State::test(mock_server.uri());
        Self::with_state(mock_server, state)
    }

    /// App signed in as Ada with the given role.
    pub async fn new_app_with_role(role: &str) -> Self {
        let mock_server = MockServer::start().await;
        let state = State::test(mock_server.uri());
        state
            .session
            .sign_in("test-token", &sample_user(role))
            .expect("sign in should succeed");
        Self::with_state(mock_server, state)
    }

    fn with_state(mock_server: MockServer, state: State) -> Self {
        let app = LoanPayApp::new(state);
        let harness = Harness::new_eframe(|_| app);
        Self {
            mock_server,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, LoanPayApp> {
        &mut self.harness
    }

    pub fn state(&self) -> &State {
        self.harness.state().state()
    }

    /// Steps frames, yielding to spawned requests in between, until `done` holds.
    pub async fn step_until(&mut self, done: impl Fn(&State) -> bool) {
        for _ in 0..40 {
            if done(self.state()) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
            self.harness.step();
        }
        assert!(done(self.state()), "condition not reached in time");
    }
}

pub fn sample_user(role: &str) -> UserProfile {
    UserProfile {
        email: Some("ada@example.com".to_owned()),
        name: Some("Ada Lovelace".to_owned()),
        phone_number: Some("+15550100".to_owned()),
        role: Some(Role::new(role)),
    }
}
