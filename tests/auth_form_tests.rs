//! Integration tests for the auth form controller
//!
//! These tests verify:
//! - On-change validation for the sign-in and sign-up schemas
//! - Mode switching clears values and errors
//! - The simulated submission lifecycle Idle -> Submitting -> Success -> Idle
//! - Timed steps become no-ops once the form is disposed

use grievance_portal::models::{AuthSettings, NameFields, Submission, SubmissionStatus};
use grievance_portal::services::SubmissionSink;
use grievance_portal::ui::{AuthFormController, FormEvent, SubmitOutcome};
use grievance_portal::{AuthMode, FormField};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

/// Sink that remembers every submission it receives
#[derive(Default)]
struct RecordingSink {
    received: Mutex<Vec<Submission>>,
}

impl RecordingSink {
    fn received(&self) -> Vec<Submission> {
        self.received.lock().unwrap().clone()
    }
}

impl SubmissionSink for RecordingSink {
    fn submit(&self, submission: Submission) {
        self.received.lock().unwrap().push(submission);
    }
}

fn form_with_settings(settings: AuthSettings) -> (AuthFormController, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let form = AuthFormController::new(
        settings,
        sink.clone(),
        tokio::runtime::Handle::current(),
    );
    (form, sink)
}

fn form() -> (AuthFormController, Arc<RecordingSink>) {
    form_with_settings(AuthSettings::default())
}

fn fill_valid_sign_up(form: &AuthFormController) {
    form.set_mode(AuthMode::SignUp);
    assert_ok!(form.set_field(FormField::FirstName, "Asha"));
    assert_ok!(form.set_field(FormField::LastName, "Rao"));
    assert_ok!(form.set_field(FormField::Email, "asha.rao@example.org"));
    assert_ok!(form.set_field(FormField::PhoneNumber, "9876543210"));
    assert_ok!(form.set_field(FormField::Password, "abcdefgh"));
    assert_ok!(form.set_field(FormField::ConfirmPassword, "abcdefgh"));
}

#[tokio::test]
async fn test_valid_sign_in() {
    let (form, _sink) = form();

    assert_ok!(form.set_field(FormField::Email, "a@b.com"));
    assert_ok!(form.set_field(FormField::Password, "12345678"));

    assert!(form.is_valid());
    assert!(form.errors().is_empty());
    assert!(form.can_submit());
}

#[tokio::test]
async fn test_short_password_disables_submit() {
    let (form, _sink) = form();

    assert_ok!(form.set_field(FormField::Email, "a@b.com"));
    assert_ok!(form.set_field(FormField::Password, "12345"));

    assert!(form.error(FormField::Password).is_some());
    assert!(!form.errors().contains(FormField::Email));
    assert!(!form.can_submit());
    assert!(!form.view().submit_enabled);
}

#[tokio::test]
async fn test_password_minimum_from_settings() {
    let (form, _sink) = form_with_settings(AuthSettings {
        password_min_length: 6,
        ..AuthSettings::default()
    });

    assert_ok!(form.set_field(FormField::Email, "a@b.com"));
    assert_ok!(form.set_field(FormField::Password, "123456"));

    assert!(form.is_valid());
}

#[tokio::test]
async fn test_mismatched_confirmation_flags_confirm_only() {
    let (form, _sink) = form();
    form.set_mode(AuthMode::SignUp);

    assert_ok!(form.set_field(FormField::Password, "abcdefgh"));
    assert_ok!(form.set_field(FormField::ConfirmPassword, "abcdefgx"));

    let errors = form.errors();
    assert_eq!(errors.fields(), vec![FormField::ConfirmPassword]);
    assert_eq!(errors.get(FormField::ConfirmPassword), Some("Passwords don't match"));
    assert!(!errors.contains(FormField::Password));
}

#[tokio::test]
async fn test_fixing_password_clears_confirm_error() {
    let (form, _sink) = form();
    form.set_mode(AuthMode::SignUp);

    assert_ok!(form.set_field(FormField::Password, "abcdefgh"));
    assert_ok!(form.set_field(FormField::ConfirmPassword, "abcdefgx"));
    assert_ok!(form.set_field(FormField::Password, "abcdefgx"));

    assert!(form.errors().is_empty());
}

#[tokio::test]
async fn test_mode_switch_clears_everything() {
    let (form, _sink) = form();
    assert_ok!(form.set_field(FormField::Email, "bad"));
    assert_ok!(form.set_field(FormField::Password, "123"));
    assert!(!form.errors().is_empty());

    form.toggle_mode();

    assert_eq!(form.mode(), AuthMode::SignUp);
    assert!(form.values().is_all_empty());
    assert!(form.errors().is_empty());

    form.toggle_mode();
    assert_eq!(form.mode(), AuthMode::SignIn);
    assert_eq!(form.value(FormField::Email), "");
    assert!(form.errors().is_empty());
}

#[tokio::test]
async fn test_mode_switch_event() {
    let (form, _sink) = form();
    let mut rx = form.subscribe();

    form.toggle_mode();

    assert_eq!(
        rx.try_recv().unwrap(),
        FormEvent::ModeChanged { mode: AuthMode::SignUp }
    );
}

#[tokio::test]
async fn test_single_name_field_variant() {
    let (form, _sink) = form_with_settings(AuthSettings {
        name_fields: NameFields::Single,
        ..AuthSettings::default()
    });
    form.set_mode(AuthMode::SignUp);

    assert!(form.fields().contains(&FormField::Name));
    assert_err!(form.set_field(FormField::FirstName, "Asha"));
    assert_ok!(form.set_field(FormField::Name, "Asha Rao"));
}

#[tokio::test]
async fn test_sign_in_rejects_sign_up_fields() {
    let (form, _sink) = form();
    assert_err!(form.set_field(FormField::ConfirmPassword, "abcdefgh"));
}

#[tokio::test(start_paused = true)]
async fn test_sign_up_submission_lifecycle() {
    let (form, sink) = form();
    fill_valid_sign_up(&form);
    assert!(form.can_submit());

    let mut rx = form.subscribe();
    assert_eq!(form.submit(), SubmitOutcome::Accepted);

    // Submitting: values already cleared, control disabled
    assert_eq!(form.status(), SubmissionStatus::Submitting);
    assert!(form.values().is_all_empty());
    assert!(!form.can_submit());
    assert!(sink.received().is_empty());

    tokio::time::sleep(Duration::from_millis(700)).await;
    assert_eq!(form.status(), SubmissionStatus::Submitting);
    assert!(!form.can_submit());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(form.status(), SubmissionStatus::Success);
    assert!(form.values().is_all_empty());

    let received = sink.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].mode, AuthMode::SignUp);
    assert_eq!(received[0].values.get(FormField::Email), "asha.rao@example.org");
    assert_eq!(received[0].values.get(FormField::PhoneNumber), "9876543210");

    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(form.status(), SubmissionStatus::Idle);

    let statuses: Vec<FormEvent> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
    assert_eq!(
        statuses,
        vec![
            FormEvent::StatusChanged { status: SubmissionStatus::Submitting },
            FormEvent::StatusChanged { status: SubmissionStatus::Success },
            FormEvent::StatusChanged { status: SubmissionStatus::Idle },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_invalid_submit_never_enters_submitting() {
    let (form, sink) = form();
    form.set_mode(AuthMode::SignUp);
    assert_ok!(form.set_field(FormField::Email, "a@b.com"));

    match form.submit() {
        SubmitOutcome::Rejected(errors) => {
            assert!(errors.contains(FormField::FirstName));
            assert!(errors.contains(FormField::PhoneNumber));
            assert!(!errors.contains(FormField::Email));
        }
        other => panic!("Expected rejection, got {:?}", other),
    }

    // Every failing field is now visible, values are kept
    assert!(form.errors().contains(FormField::Password));
    assert_eq!(form.value(FormField::Email), "a@b.com");

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(form.status(), SubmissionStatus::Idle);
    assert!(sink.received().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_dispose_during_submission_is_safe() {
    let (form, sink) = form();
    fill_valid_sign_up(&form);
    assert_eq!(form.submit(), SubmitOutcome::Accepted);

    tokio::time::sleep(Duration::from_millis(900)).await;
    assert_eq!(form.status(), SubmissionStatus::Success);

    form.dispose();
    assert!(form.is_disposed());

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(
        form.status(),
        SubmissionStatus::Success,
        "no stale transition after disposal"
    );
    assert_eq!(sink.received().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_drop_during_submission_is_safe() {
    let (form, sink) = form();
    fill_valid_sign_up(&form);
    assert_eq!(form.submit(), SubmitOutcome::Accepted);

    drop(form);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(sink.received().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_resubmit_during_success_keeps_new_submission_busy() {
    let (form, sink) = form();
    fill_valid_sign_up(&form);
    assert_eq!(form.submit(), SubmitOutcome::Accepted);

    // Still showing Success from the first submission
    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert_eq!(form.status(), SubmissionStatus::Success);
    fill_valid_sign_up(&form);
    assert_eq!(form.submit(), SubmitOutcome::Accepted);

    // The first submission's return to Idle (due at 2800) must not land
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(form.status(), SubmissionStatus::Submitting);
    assert!(!form.can_submit());
    fill_valid_sign_up(&form);
    assert_eq!(form.submit(), SubmitOutcome::Busy);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(form.status(), SubmissionStatus::Success);
    assert_eq!(sink.received().len(), 2);

    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(form.status(), SubmissionStatus::Idle);
}
