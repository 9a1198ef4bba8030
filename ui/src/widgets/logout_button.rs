//! Logout icon button.
//!
//! The click runs [`loanpay_business::logout`] in the background; that call
//! clears the session whether or not the server answers. The resulting
//! navigation is applied to the history by [`poll_logout_result`].

use egui::{Response, RichText, Ui};
use loanpay_business::{BusinessConfig, History, LogoutOutcome, Session, logout};
use log::info;

use crate::utils::task;

pub type LogoutResultSender = flume::Sender<LogoutOutcome>;
pub type LogoutResultReceiver = flume::Receiver<LogoutOutcome>;

pub const LOGOUT_ICON: &str = "⎋";

pub fn create_logout_channel() -> (LogoutResultSender, LogoutResultReceiver) {
    flume::unbounded()
}

#[derive(Debug, Clone, Default)]
pub struct LogoutButtonState {
    pub in_flight: bool,
}

pub fn logout_button(
    state: &mut LogoutButtonState,
    config: &BusinessConfig,
    session: &Session,
    sender: &LogoutResultSender,
    ui: &mut Ui,
) -> Response {
    let response = ui
        .add_enabled(
            !state.in_flight,
            egui::Button::new(RichText::new(LOGOUT_ICON).size(18.0)).frame(false),
        )
        .on_hover_text("Log out");

    if response.clicked() {
        perform_logout(state, config, session, sender, ui.ctx());
    }

    response
}

/// Starts the logout in the background. Ignored while one is already running.
pub fn perform_logout(
    state: &mut LogoutButtonState,
    config: &BusinessConfig,
    session: &Session,
    sender: &LogoutResultSender,
    egui_ctx: &egui::Context,
) {
    if state.in_flight {
        return;
    }
    state.in_flight = true;

    let config = config.clone();
    let session = session.clone();
    let sender = sender.clone();
    let egui_ctx = egui_ctx.clone();

    task::spawn(async move {
        let outcome = logout(&config, &session).await;
        if sender.send(outcome).is_err() {
            info!("LogoutButton: app dropped before logout finished");
        }
        egui_ctx.request_repaint();
    });
}

/// Applies a finished logout to the history. Returns `true` if one was applied.
pub fn poll_logout_result(
    receiver: &LogoutResultReceiver,
    state: &mut LogoutButtonState,
    history: &mut History,
) -> bool {
    let Ok(outcome) = receiver.try_recv() else {
        return false;
    };
    state.in_flight = false;
    history.navigate(outcome.navigation);
    true
}
