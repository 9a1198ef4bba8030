//! Business layer of the LoanPay client: session context, HTTP plumbing, and the
//! payment, logout and route-guard logic behind the UI widgets.

mod config;
pub mod http;
pub mod logout;
pub mod payment;
pub mod route;
pub mod session;

pub use config::BusinessConfig;
pub use logout::{LogoutError, LogoutOutcome, logout};
pub use payment::{PaymentError, PaymentForm, PaymentRequest, initialize_payment};
pub use route::{
    AllowedRoles, GuardDecision, History, Navigation, NavigationMode, Route, RouteGuard,
};
pub use session::{
    FileSessionStore, MemorySessionStore, Role, Session, SessionError, SessionStore, UserProfile,
};
