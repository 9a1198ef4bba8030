use egui::RichText;
use loanpay_business::{Navigation, Route};

use crate::{pages, state::State, widgets};

pub struct LoanPayApp {
    state: State,
}

impl LoanPayApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    /// Applies background results that arrived since the last frame.
    fn poll_results(&mut self, ctx: &egui::Context) {
        let state = &mut self.state;
        if widgets::poll_logout_result(
            &state.logout_result_receiver,
            &mut state.logout_button,
            &mut state.history,
        ) {
            state.discard_user_views();
        }

        // Payment results wait while a logout is running; it discards them.
        if !state.logout_button.in_flight {
            widgets::poll_payment_result(
                &state.payment_result_receiver,
                &mut state.payment_form,
                ctx,
            );
        }
    }

    fn top_bar(&mut self, ui: &mut egui::Ui) {
        let state = &mut self.state;
        ui.horizontal(|ui| {
            ui.label(RichText::new("LoanPay").strong());
            ui.separator();
            ui.label(RichText::new(state.history.current().path()).monospace());

            if state.history.can_go_back() && ui.button("⬅").on_hover_text("Back").clicked() {
                state.history.back();
            }

            if state.session.is_signed_in() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    widgets::logout_button(
                        &mut state.logout_button,
                        &state.config,
                        &state.session,
                        &state.logout_result_sender,
                        ui,
                    );
                    if ui.button("Home").clicked() {
                        state.history.navigate(Navigation::push(Route::Root));
                    }
                });
            }
        });
    }
}

impl eframe::App for LoanPayApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.top_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.state.history.current() {
            Route::Login => pages::login_page(&mut self.state, ui),
            Route::Root => pages::home_page(&mut self.state, ui),
            Route::Payments => pages::payments_page(&mut self.state, ui),
            Route::Admin => pages::admin_page(&mut self.state, ui),
        });
    }
}
