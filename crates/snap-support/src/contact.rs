/// Contact form submission.
///
/// `ContactDesk` validates the form, refuses a second submission while one is in
/// flight, and hands accepted forms to a `ContactSubmitter`. The shipped submitter
/// only simulates latency; no ticket leaves the process.
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::validation::{validate_form, ContactForm, FormReport};

pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_secs(2);

const SUCCESS_NOTICE: &str =
    "Thank you! Your message has been sent. We'll get back to you within 24 hours.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub reference: String,
    pub notice: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("contact form has invalid fields")]
    Validation(FormReport),

    #[error("a submission is already in progress")]
    Pending,

    #[error("submission failed: {0}")]
    Transport(String),
}

#[async_trait]
pub trait ContactSubmitter: Send + Sync {
    async fn submit(&self, form: &ContactForm) -> Result<SubmissionReceipt, SubmitError>;
}

/// Waits a fixed delay and acknowledges every form.
pub struct SimulatedSubmitter {
    delay: Duration,
    next_ticket: AtomicU64,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            next_ticket: AtomicU64::new(1),
        }
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

#[async_trait]
impl ContactSubmitter for SimulatedSubmitter {
    async fn submit(&self, _form: &ContactForm) -> Result<SubmissionReceipt, SubmitError> {
        tokio::time::sleep(self.delay).await;
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        Ok(SubmissionReceipt {
            reference: format!("SNAP-{ticket:06}"),
            notice: SUCCESS_NOTICE.to_string(),
        })
    }
}

pub struct ContactDesk {
    submitter: Arc<dyn ContactSubmitter>,
    in_flight: AtomicBool,
}

impl ContactDesk {
    pub fn new(submitter: Arc<dyn ContactSubmitter>) -> Self {
        Self {
            submitter,
            in_flight: AtomicBool::new(false),
        }
    }

    pub async fn submit(&self, form: &ContactForm) -> Result<SubmissionReceipt, SubmitError> {
        let report = validate_form(form);
        if !report.is_valid() {
            info!(
                focus = report.first_invalid().map(|k| k.id()),
                "contact form rejected"
            );
            return Err(SubmitError::Validation(report));
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SubmitError::Pending);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let result = self.submitter.submit(form).await;
        match &result {
            Ok(receipt) => info!(reference = %receipt.reference, "contact form submitted"),
            Err(e) => warn!(error = %e, "contact form submission failed"),
        }
        result
    }
}

/// Clears the in-flight flag even when the submission future is dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldKind;

    struct FailingSubmitter;

    #[async_trait]
    impl ContactSubmitter for FailingSubmitter {
        async fn submit(&self, _form: &ContactForm) -> Result<SubmissionReceipt, SubmitError> {
            Err(SubmitError::Transport("connection refused".to_string()))
        }
    }

    fn valid_form() -> ContactForm {
        ContactForm {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            subject: "Billing".to_string(),
            order_number: Some("12345".to_string()),
            message: "I was charged twice for one order.".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_submission_waits_then_succeeds() {
        let desk = ContactDesk::new(Arc::new(SimulatedSubmitter::default()));
        let started = tokio::time::Instant::now();
        let receipt = desk.submit(&valid_form()).await.unwrap();
        assert!(started.elapsed() >= DEFAULT_SUBMIT_DELAY);
        assert_eq!(receipt.reference, "SNAP-000001");
        assert_eq!(receipt.notice, SUCCESS_NOTICE);
    }

    #[tokio::test]
    async fn invalid_form_is_rejected_before_submitting() {
        let desk = ContactDesk::new(Arc::new(FailingSubmitter));
        let form = ContactForm {
            name: "G".to_string(),
            ..valid_form()
        };
        match desk.submit(&form).await {
            Err(SubmitError::Validation(report)) => {
                assert_eq!(report.first_invalid(), Some(FieldKind::Name));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_failures_are_distinct() {
        let desk = ContactDesk::new(Arc::new(FailingSubmitter));
        let err = desk.submit(&valid_form()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn resubmission_while_pending_is_refused() {
        let desk = Arc::new(ContactDesk::new(Arc::new(SimulatedSubmitter::default())));

        let first = {
            let desk = Arc::clone(&desk);
            tokio::spawn(async move { desk.submit(&valid_form()).await })
        };
        tokio::task::yield_now().await;

        let second = desk.submit(&valid_form()).await;
        assert!(matches!(second, Err(SubmitError::Pending)));

        assert!(first.await.unwrap().is_ok());
        assert!(desk.submit(&valid_form()).await.is_ok());
    }
}
