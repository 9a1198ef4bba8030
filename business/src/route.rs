//! Routes, navigation history and the role-based route guard.

use std::collections::HashSet;

use log::info;
use serde::{Deserialize, Serialize};

use crate::session::{Role, Session};

/// The views of the application shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Login,
    #[default]
    Root,
    Payments,
    Admin,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Root => "/",
            Self::Payments => "/payments",
            Self::Admin => "/admin",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/login" => Some(Self::Login),
            "/" => Some(Self::Root),
            "/payments" => Some(Self::Payments),
            "/admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// Adds a history entry.
    Push,
    /// Overwrites the current entry, so `back()` cannot return to it.
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub to: Route,
    pub mode: NavigationMode,
}

impl Navigation {
    pub fn push(to: Route) -> Self {
        Self {
            to,
            mode: NavigationMode::Push,
        }
    }

    pub fn replace(to: Route) -> Self {
        Self {
            to,
            mode: NavigationMode::Replace,
        }
    }
}

/// In-app navigation stack. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<Route>,
}

impl History {
    pub fn new(start: Route) -> Self {
        Self {
            entries: vec![start],
        }
    }

    pub fn current(&self) -> Route {
        self.entries.last().copied().unwrap_or_default()
    }

    /// Whether [`History::back`] has an entry to return to.
    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }

    pub fn navigate(&mut self, navigation: Navigation) {
        info!(
            "History: {:?} {} -> {}",
            navigation.mode,
            self.current().path(),
            navigation.to.path()
        );
        match navigation.mode {
            NavigationMode::Push => self.entries.push(navigation.to),
            NavigationMode::Replace => match self.entries.last_mut() {
                Some(top) => *top = navigation.to,
                None => self.entries.push(navigation.to),
            },
        }
    }

    /// Pops the current entry. Returns `false` when already at the first entry.
    pub fn back(&mut self) -> bool {
        if self.can_go_back() {
            self.entries.pop();
            true
        } else {
            false
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::Root)
    }
}

/// Roles admitted by a [`RouteGuard`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedRoles {
    /// Any signed-in user, whatever their role.
    Any,
    Only(HashSet<Role>),
}

impl AllowedRoles {
    pub fn admits(&self, role: Option<Role>) -> bool {
        match self {
            Self::Any => true,
            Self::Only(roles) => role.is_some_and(|role| roles.contains(&role)),
        }
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the guarded content in place.
    Render,
    Redirect(Navigation),
}

/// Gate over a subtree, keyed on the session user's role.
///
/// The check runs synchronously against local session state only. It is a
/// navigation convenience and not a security boundary: a tampered local
/// session passes it. The backend must authorize every request on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    allowed_roles: AllowedRoles,
}

impl RouteGuard {
    pub fn new<R: Into<Role>>(roles: impl IntoIterator<Item = R>) -> Self {
        Self {
            allowed_roles: AllowedRoles::Only(roles.into_iter().map(Into::into).collect()),
        }
    }

    /// Admits any signed-in user.
    pub fn signed_in() -> Self {
        Self {
            allowed_roles: AllowedRoles::Any,
        }
    }

    /// No user: replace-redirect to login. Role not allowed: push to root.
    pub fn check(&self, session: &Session) -> GuardDecision {
        let Some(user) = session.user() else {
            return GuardDecision::Redirect(Navigation::replace(Route::Login));
        };

        if self.allowed_roles.admits(user.role) {
            GuardDecision::Render
        } else {
            info!("RouteGuard: role {:?} not admitted", user.role);
            GuardDecision::Redirect(Navigation::push(Route::Root))
        }
    }
}
