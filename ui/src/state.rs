use loanpay_business::{BusinessConfig, History, PaymentForm, Route, Session};

use crate::widgets::{
    LogoutButtonState, LogoutResultReceiver, LogoutResultSender, PaymentResultReceiver,
    PaymentResultSender, create_logout_channel, create_payment_channel,
};

/// The main application state.
///
/// Fields are public so pages can borrow them disjointly, e.g. the history
/// mutably for a guard redirect while the session is read by the guarded content.
pub struct State {
    pub config: BusinessConfig,
    pub session: Session,
    pub history: History,
    pub payment_form: PaymentForm,
    pub payment_result_sender: PaymentResultSender,
    pub payment_result_receiver: PaymentResultReceiver,
    pub logout_button: LogoutButtonState,
    pub logout_result_sender: LogoutResultSender,
    pub logout_result_receiver: LogoutResultReceiver,
}

impl State {
    pub fn new(config: BusinessConfig, session: Session) -> Self {
        let (payment_result_sender, payment_result_receiver) = create_payment_channel();
        let (logout_result_sender, logout_result_receiver) = create_logout_channel();

        let start = if session.is_signed_in() {
            Route::Root
        } else {
            Route::Login
        };

        Self {
            config,
            session,
            history: History::new(start),
            payment_form: PaymentForm::default(),
            payment_result_sender,
            payment_result_receiver,
            logout_button: LogoutButtonState::default(),
            logout_result_sender,
            logout_result_receiver,
        }
    }

    /// Forgets view state that belonged to the signed-out user.
    ///
    /// The payment channel is replaced, so a request still in flight from the
    /// old session delivers into a dropped receiver and is never applied.
    pub fn discard_user_views(&mut self) {
        let (payment_result_sender, payment_result_receiver) = create_payment_channel();
        self.payment_form = PaymentForm::default();
        self.payment_result_sender = payment_result_sender;
        self.payment_result_receiver = payment_result_receiver;
    }

    /// State against a test backend with an in-memory session.
    pub fn test(base_url: String) -> Self {
        Self::new(BusinessConfig::new(base_url), Session::in_memory())
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(BusinessConfig::default(), Session::default())
    }
}
