use crate::models::{Route, Router, Theme};
use crate::state::StateManager;
use std::sync::Arc;

/// One entry in the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: Route,
}

/// Top navigation: links, collapsible mobile menu and the theme toggle.
///
/// Menu and theme live in the shared [`StateManager`]; route changes go through
/// the injected [`Router`].
pub struct NavBar {
    state_manager: StateManager,
    router: Arc<dyn Router>,
    links: Vec<NavLink>,
}

impl NavBar {
    pub fn new(state_manager: StateManager, router: Arc<dyn Router>) -> Self {
        let links = Route::ALL
            .into_iter()
            .map(|route| NavLink {
                label: route.label(),
                route,
            })
            .collect();

        Self {
            state_manager,
            router,
            links,
        }
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn is_menu_open(&self) -> bool {
        self.state_manager.read(|s| s.menu_open)
    }

    pub fn toggle_menu(&self) {
        self.state_manager.toggle_menu();
    }

    /// Follow a link: the menu collapses and the router takes over
    pub fn select(&self, route: Route) {
        self.state_manager.close_menu();
        self.router.navigate(route);
    }

    pub fn is_active(&self, route: Route) -> bool {
        self.state_manager.read(|s| s.route == route)
    }

    pub fn toggle_theme(&self) -> Theme {
        self.state_manager.toggle_theme();
        self.state_manager.read(|s| s.theme)
    }

    /// Label for the theme toggle, naming the theme it switches to
    pub fn theme_toggle_label(&self) -> &'static str {
        match self.state_manager.read(|s| s.theme) {
            Theme::Light => "Dark mode",
            Theme::Dark => "Light mode",
        }
    }
}
