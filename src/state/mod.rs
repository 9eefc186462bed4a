// State management module
//
// This module provides the StateManager which wraps PortalState with thread-safe access
// using Arc<RwLock<T>> and emits change events for every page that mirrors shell state.

use crate::config::PreferenceStore;
use crate::models::{PortalState, Route, Router, Theme};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

/// Change events emitted when shell state is modified
///
/// These events let pages react to theme, menu and route changes without
/// polling or reaching into shared state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// The dark-mode flag flipped
    ThemeChanged { theme: Theme },

    /// The navigation menu opened or closed
    MenuToggled { open: bool },

    /// The router moved to a different view
    RouteChanged { route: Route },

    /// State has been reset
    StateReset,
}

/// Where the theme preference is persisted
struct ThemePersistence {
    store: Arc<dyn PreferenceStore>,
    key: String,
}

/// Thread-safe shell state manager with event emission
///
/// This is the single owner of the portal's shell state:
/// - Provides thread-safe access to [`PortalState`] via `Arc<RwLock<T>>`
/// - Detects state changes and emits [`StateChange`] events
/// - Persists the theme to a [`PreferenceStore`] on every change
/// - Supports subscribing to state changes via tokio broadcast channels
///
/// # Related Types
///
/// - [`crate::ui::ThemeMirror`]: Subscribes to theme changes at mount
/// - [`crate::ui::NavBar`]: Issues menu and route changes
pub struct StateManager {
    /// The shell state protected by RwLock for thread-safe access
    state: Arc<RwLock<PortalState>>,

    /// Broadcast channel for emitting state change events
    state_tx: broadcast::Sender<StateChange>,

    persistence: Option<Arc<ThemePersistence>>,
}

impl StateManager {
    /// Create a new StateManager with default state and no persistence
    ///
    /// # Returns
    /// A new StateManager with a broadcast channel buffer of 100 events
    pub fn new() -> Self {
        let (state_tx, _) = broadcast::channel(100);
        Self {
            state: Arc::new(RwLock::new(PortalState::default())),
            state_tx,
            persistence: None,
        }
    }

    /// Create a StateManager whose theme is read from and written to `store`.
    ///
    /// The stored value under `key` is read once here. A missing or unreadable
    /// value falls back to `default_theme`.
    pub fn with_preferences(
        store: Arc<dyn PreferenceStore>,
        key: &str,
        default_theme: Theme,
    ) -> Self {
        let theme = match store.get(key) {
            Some(value) => value.parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring unknown stored theme {:?}", value);
                default_theme
            }),
            None => default_theme,
        };

        tracing::info!("Initial theme: {}", theme);

        let manager = Self {
            persistence: Some(Arc::new(ThemePersistence {
                store,
                key: key.to_string(),
            })),
            ..Self::new()
        };
        manager.state.write().unwrap_or_else(PoisonError::into_inner).theme = theme;
        manager
    }

    /// Get a read-only snapshot of the current state
    pub fn snapshot(&self) -> PortalState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Execute a function with read access to the state
    ///
    /// # Example
    /// ```ignore
    /// let dark = state_manager.read(|state| state.is_dark());
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&PortalState) -> R,
    {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Update the state and emit change events
    ///
    /// This is the only way to modify state. It:
    /// 1. Captures the old state
    /// 2. Applies the update function
    /// 3. Detects what changed
    /// 4. Persists a theme change while still holding the write lock
    /// 5. Emits the events
    ///
    /// # Returns
    /// A vector of StateChange events that were emitted
    pub fn update<F>(&self, update_fn: F) -> Vec<StateChange>
    where
        F: FnOnce(&mut PortalState),
    {
        let changes = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            let old_state = state.clone();
            update_fn(&mut state);
            let changes = Self::detect_changes(&old_state, &state);

            // Written under the lock so the stored theme follows state order
            if old_state.theme != state.theme {
                self.persist_theme(state.theme);
            }
            changes
        };

        for change in &changes {
            // Ignore send errors - it's OK if no one is listening
            let _ = self.state_tx.send(change.clone());
        }

        changes
    }

    /// Subscribe to state change events
    ///
    /// Returns a receiver that will get notified of all future state changes.
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.state_tx.receiver_count()
    }

    fn detect_changes(old: &PortalState, new: &PortalState) -> Vec<StateChange> {
        let mut changes = Vec::new();

        if old.theme != new.theme {
            changes.push(StateChange::ThemeChanged { theme: new.theme });
        }

        if old.menu_open != new.menu_open {
            changes.push(StateChange::MenuToggled {
                open: new.menu_open,
            });
        }

        if old.route != new.route {
            changes.push(StateChange::RouteChanged { route: new.route });
        }

        changes
    }

    fn persist_theme(&self, theme: Theme) {
        let Some(persistence) = &self.persistence else {
            return;
        };

        // A failed write only costs the preference on next startup
        if let Err(e) = persistence.store.set(&persistence.key, theme.as_str()) {
            tracing::warn!("Failed to persist theme preference: {:#}", e);
        }
    }

    // Convenience methods for common state updates

    /// Flip between light and dark
    pub fn toggle_theme(&self) -> Vec<StateChange> {
        self.update(|state| state.theme = state.theme.toggled())
    }

    pub fn set_theme(&self, theme: Theme) -> Vec<StateChange> {
        self.update(|state| state.theme = theme)
    }

    pub fn toggle_menu(&self) -> Vec<StateChange> {
        self.update(|state| state.menu_open = !state.menu_open)
    }

    pub fn close_menu(&self) -> Vec<StateChange> {
        self.update(|state| state.menu_open = false)
    }

    /// Move to `route`, collapsing the navigation menu
    pub fn navigate_to(&self, route: Route) -> Vec<StateChange> {
        tracing::debug!("Navigating to {}", route);
        self.update(|state| {
            state.route = route;
            state.menu_open = false;
        })
    }

    /// Reset menu and route; the theme is a user preference and survives
    pub fn reset(&self) -> Vec<StateChange> {
        let mut changes = self.update(|state| {
            state.menu_open = false;
            state.route = Route::default();
        });

        let reset_event = StateChange::StateReset;
        let _ = self.state_tx.send(reset_event.clone());
        changes.push(reset_event);

        changes
    }
}

impl Router for StateManager {
    fn navigate(&self, route: Route) {
        self.navigate_to(route);
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

// Make StateManager cloneable for sharing across pages
impl Clone for StateManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            state_tx: self.state_tx.clone(),
            persistence: self.persistence.clone(),
        }
    }
}
