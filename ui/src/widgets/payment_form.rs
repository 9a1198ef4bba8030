//! Payment form: amount input, submit action, inline error.
//!
//! Submitting validates locally, then runs [`initialize_payment`] in the
//! background. The outcome arrives on a channel and is applied by
//! [`poll_payment_result`], which opens the checkout page in a new tab.

use egui::{Color32, Frame, Margin, Response, RichText, Ui};
use loanpay_business::payment::initialize_payment;
use loanpay_business::{BusinessConfig, PaymentError, PaymentForm, Session};
use log::info;

use crate::utils::task;

pub type PaymentResult = Result<String, PaymentError>;
pub type PaymentResultSender = flume::Sender<PaymentResult>;
pub type PaymentResultReceiver = flume::Receiver<PaymentResult>;

/// Red color for error status
const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

pub fn create_payment_channel() -> (PaymentResultSender, PaymentResultReceiver) {
    flume::unbounded()
}

/// Renders the form. Returns the response of the submit button.
pub fn payment_form(
    form: &mut PaymentForm,
    config: &BusinessConfig,
    session: &Session,
    sender: &PaymentResultSender,
    ui: &mut Ui,
) -> Response {
    ui.vertical(|ui| {
        ui.heading("Make a payment");
        ui.add_space(8.0);

        if let Some(error) = form.error.clone() {
            error_alert(form, &error, ui);
            ui.add_space(8.0);
        }

        let mut enter_pressed = false;
        ui.horizontal(|ui| {
            ui.label("Amount:");
            let input = ui.add_enabled(
                !form.loading,
                egui::TextEdit::singleline(&mut form.amount)
                    .desired_width(160.0)
                    .hint_text("e.g. 250.00"),
            );
            enter_pressed = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        });

        ui.add_space(12.0);

        let button = ui
            .horizontal(|ui| {
                let text = if form.loading { "Processing..." } else { "Pay Now" };
                let button = ui.add_enabled(form.can_submit(), egui::Button::new(text));
                if form.loading {
                    ui.spinner();
                }
                button
            })
            .inner;

        if button.clicked() || enter_pressed {
            submit_payment(form, config, session, sender, ui.ctx());
        }

        button
    })
    .inner
}

/// Dismissable inline alert.
fn error_alert(form: &mut PaymentForm, error: &str, ui: &mut Ui) {
    Frame::NONE
        .fill(COLOR_RED)
        .inner_margin(Margin::symmetric(8, 4))
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(error).color(Color32::WHITE));
                if ui
                    .add(egui::Button::new(RichText::new("✖").color(Color32::WHITE)).frame(false))
                    .on_hover_text("Dismiss")
                    .clicked()
                {
                    form.dismiss_error();
                }
            });
        });
}

/// Validates the form and, if valid, starts the initialization request.
///
/// Returns `true` when a request was started.
pub fn submit_payment(
    form: &mut PaymentForm,
    config: &BusinessConfig,
    session: &Session,
    sender: &PaymentResultSender,
    egui_ctx: &egui::Context,
) -> bool {
    let Some(amount) = form.begin_submit() else {
        return false;
    };

    let config = config.clone();
    let session = session.clone();
    let sender = sender.clone();
    let egui_ctx = egui_ctx.clone();

    task::spawn(async move {
        let result = initialize_payment(&config, &session, amount).await;
        if sender.send(result).is_err() {
            info!("PaymentForm: form dropped before the result arrived");
        }
        egui_ctx.request_repaint();
    });

    true
}

/// Applies a finished request, if any, and opens the checkout page on success.
///
/// Returns the URL that was opened.
pub fn poll_payment_result(
    receiver: &PaymentResultReceiver,
    form: &mut PaymentForm,
    egui_ctx: &egui::Context,
) -> Option<String> {
    let result = receiver.try_recv().ok()?;
    form.finish(&result);

    match result {
        Ok(url) => {
            info!("PaymentForm: opening checkout in a new tab");
            egui_ctx.open_url(egui::OpenUrl::new_tab(&url));
            Some(url)
        }
        Err(_) => None,
    }
}
