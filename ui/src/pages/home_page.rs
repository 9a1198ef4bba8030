use egui::{Response, Ui};
use loanpay_business::{Navigation, Route, RouteGuard};

use crate::{state::State, widgets};

/// Landing view for any signed-in user.
pub fn home_page(state: &mut State, ui: &mut Ui) -> Response {
    let State {
        session, history, ..
    } = state;
    let user = session.user();

    ui.vertical(|ui| {
        let mut target = None;
        widgets::route_guard(&RouteGuard::signed_in(), session, history, ui, |ui| {
            let name = user
                .as_ref()
                .and_then(|u| u.name.as_deref())
                .unwrap_or("there");
            ui.heading(format!("Welcome, {name}"));
            if let Some(role) = user.as_ref().and_then(|u| u.role) {
                ui.label(format!("Signed in as {role}"));
            }
            ui.add_space(16.0);

            ui.horizontal(|ui| {
                if ui.button("Payments").clicked() {
                    target = Some(Route::Payments);
                }
                if ui.button("Admin").clicked() {
                    target = Some(Route::Admin);
                }
            });
        });

        if let Some(route) = target {
            history.navigate(Navigation::push(route));
        }

        ui.add_space(16.0);
        widgets::powered_by_egui_and_eframe(ui);
    })
    .response
}
