use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Page-level views reachable from the portal's navigation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    #[default]
    Home,
    Faqs,
    About,
    CreateCase,
    TrackCase,
    Login,
}

/// Collaborator that turns navigation requests into page changes.
///
/// Components never route themselves; they hand the target view to a router.
#[cfg_attr(test, mockall::automock)]
pub trait Router: Send + Sync {
    fn navigate(&self, route: Route);
}

/// A path that does not name any portal view
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown route: {0}")]
pub struct RouteParseError(pub String);

impl Route {
    /// All routes in navigation-bar order
    pub const ALL: [Route; 6] = [
        Route::Home,
        Route::Faqs,
        Route::About,
        Route::CreateCase,
        Route::TrackCase,
        Route::Login,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/home",
            Route::Faqs => "/faqs",
            Route::About => "/about",
            Route::CreateCase => "/create-case",
            Route::TrackCase => "/track-case",
            Route::Login => "/login",
        }
    }

    /// Link text shown in the navigation bar
    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Faqs => "FAQs",
            Route::About => "About",
            Route::CreateCase => "Create Case",
            Route::TrackCase => "Track Case",
            Route::Login => "Login",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = RouteParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Trailing slashes are tolerated ("/faqs/" == "/faqs"); the root is an alias of home.
        let trimmed = s.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Ok(Route::Home);
        }

        Route::ALL
            .into_iter()
            .find(|route| route.path().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| RouteParseError(s.to_string()))
    }
}
