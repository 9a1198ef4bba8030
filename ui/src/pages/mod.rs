//! Pages of the application, one per [`loanpay_business::Route`]:
//! - `login_page`: shown when signed out
//! - `home_page`: landing view for any signed-in user
//! - `payments_page`: the payment form, for borrowers
//! - `admin_page`: account overview, for admins

mod admin_page;
mod home_page;
mod login_page;
mod payments_page;

pub use admin_page::admin_page;
pub use home_page::home_page;
pub use login_page::login_page;
pub use payments_page::payments_page;

/// Roles that may start a payment.
pub const PAYMENT_ROLES: [&str; 2] = ["borrower", "admin"];
pub const ADMIN_ROLES: [&str; 1] = ["admin"];
