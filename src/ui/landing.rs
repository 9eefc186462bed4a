// Landing page - composes the hero carousel, navigation bar, theme mirror and
// support-service cards into one mountable unit with a render snapshot.

use crate::models::{PortalConfig, Router, SlideDescriptor, SupportService, default_services};
use crate::state::StateManager;
use crate::ui::carousel::{CarouselController, CarouselError};
use crate::ui::navbar::NavBar;
use crate::ui::theme_mirror::ThemeMirror;
use std::sync::Arc;

/// Everything a renderer needs to draw the landing page once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingView {
    pub slide: SlideDescriptor,
    pub slide_index: usize,
    pub slide_count: usize,
    pub dark: bool,
    pub menu_open: bool,
    pub services: Vec<SupportService>,
    /// Classes for the hero text block
    pub hero_class: String,
    /// Class for the document root
    pub root_class: &'static str,
}

pub struct LandingPage {
    carousel: CarouselController,
    navbar: NavBar,
    state_manager: StateManager,
    router: Arc<dyn Router>,
    theme: Option<ThemeMirror>,
    services: Vec<SupportService>,
}

impl LandingPage {
    pub fn new(
        config: &PortalConfig,
        state_manager: StateManager,
        router: Arc<dyn Router>,
    ) -> Result<Self, CarouselError> {
        let carousel = CarouselController::new(config.slides.clone(), &config.carousel)?;
        let navbar = NavBar::new(state_manager.clone(), Arc::clone(&router));

        Ok(Self {
            carousel,
            navbar,
            state_manager,
            router,
            theme: None,
            services: default_services(),
        })
    }

    /// Arm the carousel timer and start mirroring the theme.
    pub fn mount(&mut self, handle: &tokio::runtime::Handle) {
        self.carousel.mount(handle);
        if self.theme.is_none() {
            self.theme = Some(ThemeMirror::attach(&self.state_manager));
        }
        tracing::info!("Landing page mounted");
    }

    /// Cancel the timer and drop the theme subscription.
    pub fn unmount(&mut self) {
        self.carousel.unmount();
        self.theme = None;
        tracing::info!("Landing page unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.carousel.is_mounted()
    }

    pub fn carousel(&self) -> &CarouselController {
        &self.carousel
    }

    pub fn navbar(&self) -> &NavBar {
        &self.navbar
    }

    pub fn services(&self) -> &[SupportService] {
        &self.services
    }

    /// Follow a support-service card
    pub fn open_service(&self, index: usize) -> Option<&SupportService> {
        let service = self.services.get(index)?;
        self.router.navigate(service.route);
        Some(service)
    }

    /// Build a render snapshot, applying any pending theme changes first.
    pub fn view(&mut self) -> LandingView {
        let dark = match self.theme.as_mut() {
            Some(mirror) => {
                mirror.sync();
                mirror.is_dark()
            }
            // Not mounted: nothing mirrors the theme, read it once
            None => self.state_manager.read(|s| s.is_dark()),
        };

        let slide = self.carousel.current_slide().clone();
        let hero_class = format!("{} {}", slide.alignment.css_class(), slide.accent_id);
        let root_class = if dark { "dark" } else { "light" };

        LandingView {
            slide_index: self.carousel.current_index(),
            slide_count: self.carousel.len(),
            slide,
            dark,
            menu_open: self.navbar.is_menu_open(),
            services: self.services.clone(),
            hero_class,
            root_class,
        }
    }
}

impl Drop for LandingPage {
    fn drop(&mut self) {
        self.unmount();
    }
}
