// UI module - headless controllers behind the portal's pages
//
// This module contains:
// - CarouselController: Hero slide rotation with a mount-scoped timer
// - AuthFormController: Sign-in / sign-up form state, validation and simulated submit
// - ThemeMirror: Per-component subscription to the dark-mode flag
// - NavBar / LandingPage: Navigation and landing-page composition
// - Lifetime: Cancellation tokens tying timers to a component's lifetime

pub mod auth_form;
pub mod carousel;
pub mod landing;
pub mod lifetime;
pub mod navbar;
pub mod theme_mirror;

pub use auth_form::{AuthFormController, AuthFormError, AuthFormView, FormEvent, SubmitOutcome};
pub use carousel::{
    CarouselController, CarouselError, CarouselEvent, CarouselState, Navigation, NavigationSource,
};
pub use landing::{LandingPage, LandingView};
pub use lifetime::{Lifetime, LifetimeToken};
pub use navbar::{NavBar, NavLink};
pub use theme_mirror::ThemeMirror;
