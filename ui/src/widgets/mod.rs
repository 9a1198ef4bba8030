mod logout_button;
mod payment_form;
mod route_guard;

pub use logout_button::{
    LOGOUT_ICON, LogoutButtonState, LogoutResultReceiver, LogoutResultSender,
    create_logout_channel, logout_button, perform_logout, poll_logout_result,
};
pub use payment_form::{
    PaymentResult, PaymentResultReceiver, PaymentResultSender, create_payment_channel,
    payment_form, poll_payment_result, submit_payment,
};
pub use route_guard::route_guard;

pub fn powered_by_egui_and_eframe(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        ui.label("Powered by ");
        ui.hyperlink_to("egui", "https://github.com/emilk/egui");
        ui.label(" and ");
        ui.hyperlink_to(
            "eframe",
            "https://github.com/emilk/egui/tree/master/crates/eframe",
        );
        ui.label(".");
    });
}
