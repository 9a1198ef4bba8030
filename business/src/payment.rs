//! Payment initialization against the gateway-backed `/payment/initialize` endpoint.
//!
//! The flow is:
//!
//! 1. Validate the free-text amount (must parse as a finite number)
//! 2. Build a [`PaymentRequest`] from the amount and the session's user profile
//! 3. `POST` it with the session's bearer token
//! 4. Hand the returned `checkout_url` back to the caller, which opens it in a new tab
//!
//! Every failure ends here as a [`PaymentError`]; nothing is retried.

use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::BusinessConfig;
use crate::http::{Client, HttpError};
use crate::session::{Session, UserProfile};

pub const INVALID_AMOUNT_MESSAGE: &str = "Enter a valid amount";
pub const INITIALIZATION_FAILED_MESSAGE: &str = "Initialization failed";

/// Request body for `POST /api/payment/initialize`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRequest {
    pub amount: f64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

impl PaymentRequest {
    /// Fills the payer fields from the stored profile; missing fields become empty.
    pub fn new(amount: f64, user: Option<&UserProfile>) -> Self {
        let user = user.cloned().unwrap_or_default();
        let (first_name, last_name) = split_name(user.name.as_deref());

        Self {
            amount,
            email: user.email.unwrap_or_default(),
            first_name,
            last_name,
            phone_number: user.phone_number.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentInitResponse {
    pub checkout_url: Option<String>,
}

/// Error body; only `message` is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentErrorBody {
    pub message: Option<String>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentError {
    #[error("Enter a valid amount")]
    InvalidAmount,
    #[error("payment initialization rejected with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error("payment initialization response had no checkout_url")]
    MalformedResponse,
    #[error("failed to encode payment request: {0}")]
    Encode(String),
    #[error(transparent)]
    Network(#[from] HttpError),
}

impl PaymentError {
    /// Text shown inline in the form.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidAmount => INVALID_AMOUNT_MESSAGE.to_owned(),
            Self::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Rejected { message: None, .. }
            | Self::MalformedResponse
            | Self::Encode(_)
            | Self::Network(_) => INITIALIZATION_FAILED_MESSAGE.to_owned(),
        }
    }
}

/// Parses the free-text amount; rejects empty, non-numeric and non-finite input.
pub fn parse_amount(input: &str) -> Result<f64, PaymentError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PaymentError::InvalidAmount);
    }
    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(PaymentError::InvalidAmount),
    }
}

/// Splits a display name at the first space.
///
/// `"Ada King Lovelace"` gives `("Ada", "King Lovelace")`; a single word leaves the
/// last name empty.
pub fn split_name(name: Option<&str>) -> (String, String) {
    match name {
        Some(name) => match name.split_once(' ') {
            Some((first, last)) => (first.to_owned(), last.to_owned()),
            None => (name.to_owned(), String::new()),
        },
        None => (String::new(), String::new()),
    }
}

/// Extracts the server's `message`, if the body carries one.
fn extract_error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<PaymentErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
}

/// Sends one initialization request and returns the checkout URL.
pub async fn initialize_payment(
    config: &BusinessConfig,
    session: &Session,
    amount: f64,
) -> Result<String, PaymentError> {
    let request = PaymentRequest::new(amount, session.user().as_ref());
    let token = session.token();
    if token.is_none() {
        warn!("PaymentInit: no auth token in session, sending unauthenticated");
    }

    info!("PaymentInit: initializing payment of {}", request.amount);

    let response = Client::post(config.payment_initialize_url())
        .bearer(token.as_deref())
        .json(&request)
        .map_err(|e| PaymentError::Encode(e.to_string()))?
        .send()
        .await
        .inspect_err(|e| error!("PaymentInit: {}", e))?;

    if !response.is_success() {
        let message = extract_error_message(&response.body);
        info!(
            "PaymentInit: rejected with status {}: {:?}",
            response.status, message
        );
        return Err(PaymentError::Rejected {
            status: response.status,
            message,
        });
    }

    match response.json::<PaymentInitResponse>() {
        Ok(PaymentInitResponse {
            checkout_url: Some(url),
        }) if !url.is_empty() => {
            info!("PaymentInit: checkout ready");
            Ok(url)
        }
        Ok(_) => {
            error!("PaymentInit: response had no checkout_url");
            Err(PaymentError::MalformedResponse)
        }
        Err(e) => {
            error!("PaymentInit: failed to parse response: {}", e);
            Err(PaymentError::MalformedResponse)
        }
    }
}

/// Local state of the payment form widget.
#[derive(Debug, Clone, Default)]
pub struct PaymentForm {
    /// Raw text of the amount field.
    pub amount: String,
    /// A request is in flight; the submit action is disabled.
    pub loading: bool,
    pub error: Option<String>,
    /// Last checkout URL opened.
    pub checkout_url: Option<String>,
}

impl PaymentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_submit(&self) -> bool {
        !self.loading
    }

    /// Validates the amount and marks the form loading.
    ///
    /// Returns `None` when the submit must not reach the network: the form is
    /// already loading, or the amount is invalid (the error is then set).
    pub fn begin_submit(&mut self) -> Option<f64> {
        if self.loading {
            return None;
        }
        match parse_amount(&self.amount) {
            Ok(amount) => {
                self.error = None;
                self.loading = true;
                Some(amount)
            }
            Err(err) => {
                info!("PaymentForm: rejected amount {:?}", self.amount);
                self.error = Some(err.user_message());
                None
            }
        }
    }

    /// Applies the outcome of the request started by [`Self::begin_submit`].
    pub fn finish(&mut self, result: &Result<String, PaymentError>) {
        self.loading = false;
        match result {
            Ok(url) => {
                self.error = None;
                self.checkout_url = Some(url.clone());
            }
            Err(err) => {
                self.error = Some(err.user_message());
            }
        }
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }
}
