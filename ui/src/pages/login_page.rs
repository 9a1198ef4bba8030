//! Login page for unauthenticated users.
//!
//! Sessions are issued by the LoanPay portal; this page only waits for one to
//! appear in the session store and then moves on.

use egui::{Align, Layout, Response, Ui};
use loanpay_business::{Navigation, Route};

use crate::state::State;

pub fn login_page(state: &mut State, ui: &mut Ui) -> Response {
    if state.session.is_signed_in() {
        state.history.navigate(Navigation::replace(Route::Root));
        ui.ctx().request_repaint();
    }

    ui.with_layout(Layout::top_down(Align::Center), |ui| {
        ui.add_space(20.0);
        ui.heading("LoanPay");
        ui.add_space(40.0);
        ui.label("You are signed out.");
        ui.add_space(8.0);
        ui.label("Sign in through the LoanPay portal to continue.");
    })
    .response
}
