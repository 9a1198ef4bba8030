use egui::{Grid, Response, Ui};
use loanpay_business::RouteGuard;

use super::ADMIN_ROLES;
use crate::{state::State, widgets};

/// Account overview for admins: the profile currently held in the session.
pub fn admin_page(state: &mut State, ui: &mut Ui) -> Response {
    let State {
        config,
        session,
        history,
        ..
    } = state;

    ui.vertical(|ui| {
        widgets::route_guard(&RouteGuard::new(ADMIN_ROLES), session, history, ui, |ui| {
            ui.heading("Admin");
            ui.add_space(8.0);

            let user = session.user().unwrap_or_default();
            let value = |field: Option<&str>| field.unwrap_or("—").to_owned();

            Grid::new("admin_session_grid")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    ui.label("Email");
                    ui.label(value(user.email.as_deref()));
                    ui.end_row();

                    ui.label("Name");
                    ui.label(value(user.name.as_deref()));
                    ui.end_row();

                    ui.label("Phone");
                    ui.label(value(user.phone_number.as_deref()));
                    ui.end_row();

                    ui.label("Role");
                    ui.label(value(user.role.as_ref().map(|r| r.as_str())));
                    ui.end_row();

                    ui.label("API");
                    ui.label(config.api_url().as_str());
                    ui.end_row();
                });
        });
    })
    .response
}
