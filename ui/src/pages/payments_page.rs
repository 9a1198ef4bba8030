use egui::{Response, Ui};
use loanpay_business::RouteGuard;

use super::PAYMENT_ROLES;
use crate::{state::State, widgets};

pub fn payments_page(state: &mut State, ui: &mut Ui) -> Response {
    let State {
        config,
        session,
        history,
        payment_form,
        payment_result_sender,
        ..
    } = state;

    ui.vertical(|ui| {
        widgets::route_guard(
            &RouteGuard::new(PAYMENT_ROLES),
            session,
            history,
            ui,
            |ui| {
                widgets::payment_form(payment_form, config, session, payment_result_sender, ui);

                if let Some(url) = &payment_form.checkout_url {
                    ui.add_space(12.0);
                    ui.label("Checkout opened in a new tab.");
                    ui.hyperlink_to("Open it again", url);
                }
            },
        );
    })
    .response
}
