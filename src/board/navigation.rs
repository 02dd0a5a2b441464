//! Application routes used for session-based redirection.

use std::fmt;

/// Pages the application can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Sign-in page; the target of every unauthenticated redirect.
    Login,
    /// Account registration page.
    SignUp,
    /// The kanban board.
    Tasks,
}

impl Route {
    /// Returns the URL path for the route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::SignUp => "/signup",
            Self::Tasks => "/tasks",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
