// Lifetime tokens - tie scheduled callbacks to a component's mounted lifetime
//
// A component owns one Lifetime per mount. Every timer it schedules holds a
// LifetimeToken; once the lifetime ends (explicitly or by drop) the token
// reports cancellation and the callback must not touch component state.

use std::time::Duration;
use tokio::sync::watch;

/// Owner side of a cancellation channel. Ends on drop.
#[derive(Debug)]
pub struct Lifetime {
    ended_tx: watch::Sender<bool>,
}

impl Lifetime {
    pub fn new() -> Self {
        let (ended_tx, _) = watch::channel(false);
        Self { ended_tx }
    }

    /// A token that observes this lifetime
    pub fn token(&self) -> LifetimeToken {
        LifetimeToken {
            ended_rx: self.ended_tx.subscribe(),
        }
    }

    pub fn end(&self) {
        self.ended_tx.send_replace(true);
    }

    pub fn has_ended(&self) -> bool {
        *self.ended_tx.borrow()
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Lifetime {
    fn drop(&mut self) {
        self.end();
    }
}

/// Observer side handed to scheduled tasks
#[derive(Debug, Clone)]
pub struct LifetimeToken {
    ended_rx: watch::Receiver<bool>,
}

impl LifetimeToken {
    pub fn is_cancelled(&self) -> bool {
        // A dropped owner counts as ended
        *self.ended_rx.borrow() || self.ended_rx.has_changed().is_err()
    }

    /// Resolves once the owning lifetime ends.
    pub async fn cancelled(&mut self) {
        let _ = self.ended_rx.wait_for(|ended| *ended).await;
    }

    /// Sleep for `duration` unless the lifetime ends first.
    ///
    /// Returns `true` if the full duration elapsed with the lifetime still alive.
    pub async fn sleep(&mut self, duration: Duration) -> bool {
        tokio::select! {
            biased;
            _ = self.cancelled() => false,
            _ = tokio::time::sleep(duration) => !self.is_cancelled(),
        }
    }
}
