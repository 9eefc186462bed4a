// Carousel Controller - hero slide rotation
//
// Owns the index into a fixed slide list. The auto-advance timer and user
// controls both go through `navigate`, the only writer of the index, so a
// timer tick and a click can interleave but never tear the state.

use crate::models::{CarouselSettings, SlideDescriptor};
use crate::ui::lifetime::{Lifetime, LifetimeToken};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Notify, broadcast};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Misuse of the carousel API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    #[error("Carousel needs at least one slide")]
    NoSlides,

    #[error("Slide index {index} out of range for {len} slides")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Index of the slide on screen, always in `[0, N)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CarouselState {
    pub current_index: usize,
}

/// A request to move the carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Advance,
    Retreat,
    JumpTo(usize),
}

/// Who asked for a slide change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationSource {
    Timer,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselEvent {
    SlideChanged {
        index: usize,
        source: NavigationSource,
    },
}

/// State shared between the controller and its timer task
struct CarouselCore {
    slides: Arc<[SlideDescriptor]>,
    state: Mutex<CarouselState>,
    events_tx: broadcast::Sender<CarouselEvent>,
}

impl CarouselCore {
    fn lock(&self) -> MutexGuard<'_, CarouselState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(
        &self,
        navigation: Navigation,
        source: NavigationSource,
    ) -> Result<usize, CarouselError> {
        let len = self.slides.len();
        let index = {
            let mut state = self.lock();
            let next = match navigation {
                Navigation::Advance => (state.current_index + 1) % len,
                Navigation::Retreat => (state.current_index + len - 1) % len,
                Navigation::JumpTo(index) if index < len => index,
                Navigation::JumpTo(index) => {
                    return Err(CarouselError::IndexOutOfRange { index, len });
                }
            };
            state.current_index = next;
            next
        };

        tracing::debug!("Carousel -> slide {} of {} ({:?})", index + 1, len, source);
        let _ = self
            .events_tx
            .send(CarouselEvent::SlideChanged { index, source });

        Ok(index)
    }
}

/// Timer resources that exist only while mounted
struct Mounted {
    lifetime: Lifetime,
    rearm: Arc<Notify>,
    task: JoinHandle<()>,
}

/// Presents one of N fixed slides and cycles through them.
///
/// # Example
/// ```ignore
/// let carousel = CarouselController::new(default_slides(), &config.carousel)?;
/// carousel.mount(&runtime.handle());
/// carousel.advance();
/// let slide = carousel.current_slide();
/// carousel.unmount();
/// ```
pub struct CarouselController {
    core: Arc<CarouselCore>,
    interval: Duration,
    reset_on_manual_navigation: bool,
    mounted: Mutex<Option<Mounted>>,
}

impl CarouselController {
    /// Fails fast on an empty slide list.
    pub fn new(
        slides: impl Into<Arc<[SlideDescriptor]>>,
        settings: &CarouselSettings,
    ) -> Result<Self, CarouselError> {
        let slides = slides.into();
        if slides.is_empty() {
            return Err(CarouselError::NoSlides);
        }

        let (events_tx, _) = broadcast::channel(32);

        Ok(Self {
            core: Arc::new(CarouselCore {
                slides,
                state: Mutex::new(CarouselState::default()),
                events_tx,
            }),
            interval: settings.interval(),
            reset_on_manual_navigation: settings.reset_on_manual_navigation,
            mounted: Mutex::new(None),
        })
    }

    /// Single entry point for user-driven slide changes.
    pub fn navigate(&self, navigation: Navigation) -> Result<usize, CarouselError> {
        let index = self.core.apply(navigation, NavigationSource::User)?;

        if self.reset_on_manual_navigation {
            if let Some(mounted) = self.lock_mounted().as_ref() {
                mounted.rearm.notify_one();
            }
        }

        Ok(index)
    }

    pub fn advance(&self) -> usize {
        self.navigate(Navigation::Advance)
            .unwrap_or_else(|_| self.current_index())
    }

    pub fn retreat(&self) -> usize {
        self.navigate(Navigation::Retreat)
            .unwrap_or_else(|_| self.current_index())
    }

    /// Rejects (never clamps) an index outside `[0, N)`.
    pub fn jump_to(&self, index: usize) -> Result<usize, CarouselError> {
        self.navigate(Navigation::JumpTo(index))
    }

    pub fn current_index(&self) -> usize {
        self.core.lock().current_index
    }

    pub fn state(&self) -> CarouselState {
        *self.core.lock()
    }

    pub fn current_slide(&self) -> &SlideDescriptor {
        &self.core.slides[self.current_index()]
    }

    pub fn slides(&self) -> &[SlideDescriptor] {
        &self.core.slides
    }

    pub fn len(&self) -> usize {
        self.core.slides.len()
    }

    /// Always false; construction rejects an empty slide list
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CarouselEvent> {
        self.core.events_tx.subscribe()
    }

    /// Arm the auto-advance timer on `handle`. Mounting twice is a no-op.
    pub fn mount(&self, handle: &tokio::runtime::Handle) {
        let mut mounted = self.lock_mounted();
        if mounted.is_some() {
            tracing::debug!("Carousel already mounted");
            return;
        }

        let lifetime = Lifetime::new();
        let rearm = Arc::new(Notify::new());
        let task = handle.spawn(run_timer(
            Arc::clone(&self.core),
            self.interval,
            lifetime.token(),
            Arc::clone(&rearm),
        ));

        tracing::info!(
            "Carousel mounted with {} slides, advancing every {:?}",
            self.len(),
            self.interval
        );

        *mounted = Some(Mounted {
            lifetime,
            rearm,
            task,
        });
    }

    /// Cancel the auto-advance timer. Safe to call when not mounted.
    pub fn unmount(&self) {
        if let Some(mounted) = self.lock_mounted().take() {
            mounted.lifetime.end();
            mounted.task.abort();
            tracing::info!("Carousel unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.lock_mounted().is_some()
    }

    fn lock_mounted(&self) -> MutexGuard<'_, Option<Mounted>> {
        self.mounted.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for CarouselController {
    fn drop(&mut self) {
        self.unmount();
    }
}

async fn run_timer(
    core: Arc<CarouselCore>,
    period: Duration,
    mut token: LifetimeToken,
    rearm: Arc<Notify>,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = rearm.notified() => ticker.reset(),
            _ = ticker.tick() => {
                if token.is_cancelled() {
                    break;
                }
                // Advance cannot fail: the slide list is never empty
                let _ = core.apply(Navigation::Advance, NavigationSource::Timer);
            }
        }
    }

    tracing::debug!("Carousel timer stopped");
}
