use crate::models::Theme;
use crate::state::{StateChange, StateManager};
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::TryRecvError;

/// Local copy of the dark-mode flag for one mounted component.
///
/// Subscribes to the [`StateManager`] on attach and unsubscribes when dropped,
/// so a detached component never observes theme changes. Call
/// [`sync`](Self::sync) before rendering to apply pending changes.
pub struct ThemeMirror {
    state_manager: StateManager,
    rx: Receiver<StateChange>,
    theme: Theme,
}

impl ThemeMirror {
    pub fn attach(state_manager: &StateManager) -> Self {
        // Subscribe before reading so no change can slip between the two
        let rx = state_manager.subscribe();
        let theme = state_manager.read(|s| s.theme);

        Self {
            state_manager: state_manager.clone(),
            rx,
            theme,
        }
    }

    /// Drain pending changes. Returns true if the mirrored theme changed.
    pub fn sync(&mut self) -> bool {
        let before = self.theme;

        loop {
            match self.rx.try_recv() {
                Ok(StateChange::ThemeChanged { theme }) => self.theme = theme,
                Ok(_) => {}
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!("Theme mirror lagged by {} events, resyncing", skipped);
                    self.theme = self.state_manager.read(|s| s.theme);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        self.theme != before
    }

    /// Wait for the next theme change and apply it.
    pub async fn changed(&mut self) -> Theme {
        loop {
            match self.rx.recv().await {
                Ok(StateChange::ThemeChanged { theme }) => {
                    self.theme = theme;
                    return theme;
                }
                Ok(_) => {}
                Err(_) => {
                    self.theme = self.state_manager.read(|s| s.theme);
                    return self.theme;
                }
            }
        }
    }

    /// Mirrored theme as of the last sync
    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    /// Drop the subscription explicitly (same as dropping the mirror)
    pub fn detach(self) {}
}
