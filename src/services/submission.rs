use crate::models::Submission;

/// Receives validated form data once a simulated submission is accepted.
///
/// Fire-and-forget: the form never waits on or inspects the outcome.
#[cfg_attr(test, mockall::automock)]
pub trait SubmissionSink: Send + Sync {
    fn submit(&self, submission: Submission);
}

/// Sink that reports submissions to the log, masking secret fields
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSubmissionSink;

impl SubmissionSink for LoggingSubmissionSink {
    fn submit(&self, submission: Submission) {
        let fields: Vec<String> = submission
            .values
            .iter()
            .map(|(field, value)| {
                if field.is_secret() {
                    format!("{}=<redacted>", field)
                } else {
                    format!("{}={}", field, value)
                }
            })
            .collect();

        tracing::info!(
            mode = ?submission.mode,
            "Form submitted: {}",
            fields.join(", ")
        );
    }
}
