//! Data models for the grievance portal.
//!
//! - [`PortalState`]: shell-level UI state (theme, navigation menu, route) owned by
//!   [`StateManager`](crate::state::StateManager)
//! - [`SlideDescriptor`] / [`SupportService`]: immutable landing-page content
//! - [`AuthMode`], [`FormFieldValues`], [`ValidationErrorSet`]: auth form data
//! - [`PortalConfig`]: settings loaded from `Portal Config.yaml`
//!
//! Config structs derive `Serialize`/`Deserialize` for YAML persistence; runtime
//! state is only ever mutated by the controller that owns it.

pub mod app_state;
pub mod config;
pub mod content;
pub mod form;
pub mod route;

pub use app_state::{PortalState, Theme};
pub use config::{
    AuthSettings, CarouselSettings, LoggingSettings, NameFields, PortalConfig, ThemeSettings,
};
pub use content::{Alignment, SlideDescriptor, SupportService, default_services, default_slides};
pub use form::{
    AuthMode, FieldValidationError, FormField, FormFieldValues, Submission, SubmissionStatus,
    ValidationErrorSet,
};
pub use route::{Route, RouteParseError, Router};
