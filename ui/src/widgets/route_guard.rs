//! Guard wrapper for page content.

use egui::Ui;
use loanpay_business::{GuardDecision, History, RouteGuard, Session};

/// Renders `add_contents` only if the guard admits the session's user;
/// otherwise applies the redirect to `history` and renders nothing.
///
/// Like [`RouteGuard`] itself this is a navigation convenience, not access
/// control.
pub fn route_guard<R>(
    guard: &RouteGuard,
    session: &Session,
    history: &mut History,
    ui: &mut Ui,
    add_contents: impl FnOnce(&mut Ui) -> R,
) -> Option<R> {
    match guard.check(session) {
        GuardDecision::Render => Some(add_contents(ui)),
        GuardDecision::Redirect(navigation) => {
            history.navigate(navigation);
            ui.ctx().request_repaint();
            None
        }
    }
}
