//! Services module - framework-agnostic logic behind the portal's forms.
//!
//! # Components
//!
//! - [`SchemaValidator`] / [`Schema`]: Declarative per-mode rule sets for the sign-in and
//!   sign-up forms. Each field carries an ordered list of [`Rule`]s; the first failing
//!   rule produces the field's message. Cross-field rules (password confirmation) report
//!   on the field that holds the rule.
//!
//! - [`SubmissionSink`]: Injected capability that receives validated values once the
//!   simulated submission is accepted. [`LoggingSubmissionSink`] writes them to the log.
//!
//! Nothing here touches UI state; the controllers in [`crate::ui`] own that.

pub mod submission;
pub mod validation;

pub use submission::{LoggingSubmissionSink, SubmissionSink};
pub use validation::{Rule, Schema, SchemaValidator};
