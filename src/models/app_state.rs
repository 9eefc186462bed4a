use crate::models::Route;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Light/dark presentation mode.
///
/// Persisted as the plain strings `"light"` and `"dark"`; anything else read
/// back from the preference store is treated as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Class a renderer puts on the document root for this theme
    pub fn css_class(self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(()),
        }
    }
}

/// Shell-level UI state shared by every page of the portal.
///
/// # Thread Safety
///
/// `PortalState` is wrapped in `Arc<RwLock<PortalState>>` by [`crate::state::StateManager`].
/// Never mutate it directly - go through [`StateManager::update()`](crate::state::StateManager::update)
/// so that subscribers see a [`StateChange`](crate::state::StateChange) for every mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PortalState {
    /// Current presentation theme (the dark-mode flag)
    pub theme: Theme,

    /// Whether the collapsible navigation menu is open
    pub menu_open: bool,

    /// View the router last navigated to
    pub route: Route,
}

impl PortalState {
    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = PortalState::default();
        assert_eq!(state.theme, Theme::Light);
        assert!(!state.menu_open);
        assert_eq!(state.route, Route::Home);
        assert!(!state.is_dark());
    }

    #[test]
    fn test_theme_toggle_and_parse() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!(" light ".parse::<Theme>(), Ok(Theme::Light));
        assert!("solarized".parse::<Theme>().is_err());
    }
}
