// Auth Form Controller - sign-in / sign-up form state
//
// Two composed state dimensions:
// - Mode: SignIn <-> SignUp, switching clears values, touched markers and errors
// - Submission: Idle -> Submitting -> Success -> Idle, driven by two timed steps
//
// Validation runs on every field change. Errors are only shown for fields the
// user has touched (every field after a rejected submit), while the aggregate
// validity flag always reflects the full schema.

use crate::models::{
    AuthMode, AuthSettings, FormField, FormFieldValues, Submission, SubmissionStatus,
    ValidationErrorSet,
};
use crate::services::{Schema, SchemaValidator, SubmissionSink};
use crate::ui::lifetime::{Lifetime, LifetimeToken};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use thiserror::Error;
use tokio::sync::broadcast;

/// Misuse of the form API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthFormError {
    #[error("Field {field} is not part of the {mode:?} form")]
    FieldNotInMode { field: FormField, mode: AuthMode },
}

/// Result of pressing the submit control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Values captured and cleared; the simulated submission is running
    Accepted,
    /// At least one field fails its rule; nothing was submitted
    Rejected(ValidationErrorSet),
    /// A submission is already in flight
    Busy,
    /// The form was disposed; nothing changes
    Disposed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    ModeChanged { mode: AuthMode },
    StatusChanged { status: SubmissionStatus },
}

/// Snapshot for a renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthFormView {
    pub mode: AuthMode,
    pub fields: Vec<FormField>,
    pub values: FormFieldValues,
    pub errors: ValidationErrorSet,
    pub status: SubmissionStatus,
    pub submit_enabled: bool,
}

struct FormInner {
    mode: AuthMode,
    schema: Schema,
    values: FormFieldValues,
    touched: HashSet<FormField>,
    errors: ValidationErrorSet,
    is_valid: bool,
    status: SubmissionStatus,
    /// Bumped on every accepted submit; timed steps of older submissions are ignored
    generation: u64,
}

impl FormInner {
    fn new(mode: AuthMode, settings: &AuthSettings, validator: &SchemaValidator) -> Self {
        let schema = Schema::for_mode(mode, settings);
        let values = FormFieldValues::empty(&schema.fields());
        let is_valid = validator.validate(&schema, &values).is_empty();

        Self {
            mode,
            schema,
            values,
            touched: HashSet::new(),
            errors: ValidationErrorSet::new(),
            is_valid,
            status: SubmissionStatus::Idle,
            generation: 0,
        }
    }

    fn revalidate(&mut self, validator: &SchemaValidator) {
        let mut errors = validator.validate(&self.schema, &self.values);
        self.is_valid = errors.is_empty();

        let touched = &self.touched;
        errors.retain(|field| touched.contains(&field));
        self.errors = errors;
    }

    fn can_submit(&self) -> bool {
        self.is_valid && self.status != SubmissionStatus::Submitting
    }
}

/// Collects credentials, validates them against the mode's schema and
/// simulates an asynchronous submission.
///
/// Timed steps run on the tokio runtime passed to [`new`](Self::new). They hold
/// only a weak reference to the form plus a lifetime token, so after
/// [`dispose`](Self::dispose) or drop they finish without touching state.
pub struct AuthFormController {
    inner: Arc<Mutex<FormInner>>,
    settings: AuthSettings,
    validator: SchemaValidator,
    sink: Arc<dyn SubmissionSink>,
    events_tx: broadcast::Sender<FormEvent>,
    lifetime: Lifetime,
    handle: tokio::runtime::Handle,
}

impl AuthFormController {
    pub fn new(
        settings: AuthSettings,
        sink: Arc<dyn SubmissionSink>,
        handle: tokio::runtime::Handle,
    ) -> Self {
        let validator = SchemaValidator::new();
        let inner = FormInner::new(AuthMode::SignIn, &settings, &validator);
        let (events_tx, _) = broadcast::channel(32);

        Self {
            inner: Arc::new(Mutex::new(inner)),
            settings,
            validator,
            sink,
            events_tx,
            lifetime: Lifetime::new(),
            handle,
        }
    }

    fn lock(&self) -> MutexGuard<'_, FormInner> {
        lock_inner(&self.inner)
    }

    pub fn mode(&self) -> AuthMode {
        self.lock().mode
    }

    pub fn toggle_mode(&self) {
        let next = self.mode().toggled();
        self.set_mode(next);
    }

    /// Switch forms. All values, touched markers and errors are cleared even
    /// when `mode` is already active.
    pub fn set_mode(&self, mode: AuthMode) {
        {
            let mut inner = self.lock();
            let (status, generation) = (inner.status, inner.generation);
            *inner = FormInner::new(mode, &self.settings, &self.validator);
            inner.status = status;
            inner.generation = generation;
        }

        tracing::debug!("Auth form switched to {:?}", mode);
        let _ = self.events_tx.send(FormEvent::ModeChanged { mode });
    }

    /// Record a keystroke and revalidate the whole form, so a password edit
    /// also updates a touched confirmation field.
    pub fn set_field(&self, field: FormField, value: &str) -> Result<(), AuthFormError> {
        let mut inner = self.lock();

        if !inner.values.set(field, value) {
            return Err(AuthFormError::FieldNotInMode {
                field,
                mode: inner.mode,
            });
        }

        inner.touched.insert(field);
        inner.revalidate(&self.validator);
        Ok(())
    }

    pub fn value(&self, field: FormField) -> String {
        self.lock().values.get(field).to_string()
    }

    pub fn values(&self) -> FormFieldValues {
        self.lock().values.clone()
    }

    /// Messages for touched fields that currently fail
    pub fn errors(&self) -> ValidationErrorSet {
        self.lock().errors.clone()
    }

    pub fn error(&self, field: FormField) -> Option<String> {
        self.lock().errors.get(field).map(str::to_string)
    }

    /// Aggregate validity across every field of the current mode
    pub fn is_valid(&self) -> bool {
        self.lock().is_valid
    }

    pub fn status(&self) -> SubmissionStatus {
        self.lock().status
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        self.lock().can_submit()
    }

    pub fn fields(&self) -> Vec<FormField> {
        self.lock().schema.fields()
    }

    pub fn view(&self) -> AuthFormView {
        let inner = self.lock();
        AuthFormView {
            mode: inner.mode,
            fields: inner.schema.fields(),
            values: inner.values.clone(),
            errors: inner.errors.clone(),
            status: inner.status,
            submit_enabled: inner.can_submit(),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FormEvent> {
        self.events_tx.subscribe()
    }

    /// Press the submit control.
    ///
    /// On a valid form the values are captured, every field is cleared and the
    /// status moves to `Submitting`. After the configured delay the captured
    /// values go to the sink and the status shows `Success`, then returns to
    /// `Idle`.
    pub fn submit(&self) -> SubmitOutcome {
        if self.lifetime.has_ended() {
            return SubmitOutcome::Disposed;
        }

        let (submission, generation) = {
            let mut inner = self.lock();

            if inner.status == SubmissionStatus::Submitting {
                return SubmitOutcome::Busy;
            }

            if !inner.is_valid {
                // A submit attempt reveals every failing field
                let fields = inner.schema.fields();
                inner.touched.extend(fields);
                inner.revalidate(&self.validator);
                tracing::debug!("Submit rejected: {} invalid fields", inner.errors.len());
                return SubmitOutcome::Rejected(inner.errors.clone());
            }

            let submission = Submission {
                mode: inner.mode,
                values: inner.values.clone(),
            };

            inner.values.clear();
            inner.touched.clear();
            inner.revalidate(&self.validator);
            inner.status = SubmissionStatus::Submitting;
            inner.generation += 1;
            (submission, inner.generation)
        };

        tracing::info!("Submitting {:?} form", submission.mode);
        let _ = self.events_tx.send(FormEvent::StatusChanged {
            status: SubmissionStatus::Submitting,
        });

        self.handle.spawn(run_submission(
            Arc::downgrade(&self.inner),
            self.lifetime.token(),
            Arc::clone(&self.sink),
            self.events_tx.clone(),
            self.settings.clone(),
            submission,
            generation,
        ));

        SubmitOutcome::Accepted
    }

    /// End the form's lifetime. Pending timed steps become no-ops.
    pub fn dispose(&self) {
        if !self.lifetime.has_ended() {
            tracing::debug!("Auth form disposed");
        }
        self.lifetime.end();
    }

    pub fn is_disposed(&self) -> bool {
        self.lifetime.has_ended()
    }

    pub fn settings(&self) -> &AuthSettings {
        &self.settings
    }
}

fn lock_inner(inner: &Mutex<FormInner>) -> MutexGuard<'_, FormInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Set the status if the form is still alive and `generation` is still the
/// latest submission. Returns false otherwise.
fn transition(
    form: &Weak<Mutex<FormInner>>,
    token: &LifetimeToken,
    events_tx: &broadcast::Sender<FormEvent>,
    generation: u64,
    status: SubmissionStatus,
) -> bool {
    if token.is_cancelled() {
        return false;
    }
    let Some(inner) = form.upgrade() else {
        return false;
    };

    {
        let mut inner = lock_inner(&inner);
        if inner.generation != generation {
            tracing::debug!("Ignoring {:?} step of superseded submission", status);
            return false;
        }
        inner.status = status;
    }
    tracing::debug!("Auth form status -> {:?}", status);
    let _ = events_tx.send(FormEvent::StatusChanged { status });
    true
}

async fn run_submission(
    form: Weak<Mutex<FormInner>>,
    mut token: LifetimeToken,
    sink: Arc<dyn SubmissionSink>,
    events_tx: broadcast::Sender<FormEvent>,
    settings: AuthSettings,
    submission: Submission,
    generation: u64,
) {
    if !token.sleep(settings.submit_delay()).await {
        tracing::debug!("Submission dropped: form disposed while submitting");
        return;
    }

    if !transition(&form, &token, &events_tx, generation, SubmissionStatus::Success) {
        return;
    }
    sink.submit(submission);

    if !token.sleep(settings.success_display()).await {
        return;
    }

    transition(&form, &token, &events_tx, generation, SubmissionStatus::Idle);
}

impl Drop for AuthFormController {
    fn drop(&mut self) {
        self.dispose();
    }
}
