use biometrics::{Collector, Counter, Moments};

pub(crate) static LIVENESS_PROBES: Counter = Counter::new("buddy.client.liveness_probes");
pub(crate) static LIVENESS_FAILURES: Counter = Counter::new("buddy.client.liveness_failures");
pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("buddy.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("buddy.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("buddy.client.request_duration_seconds");

pub(crate) static SESSION_SUBMITS: Counter = Counter::new("buddy.session.submits");
pub(crate) static SESSION_REJECTED_SUBMITS: Counter =
    Counter::new("buddy.session.rejected_submits");
pub(crate) static SESSION_ERROR_REPLIES: Counter = Counter::new("buddy.session.error_replies");

pub(crate) static UPLOADS_STARTED: Counter = Counter::new("buddy.documents.uploads_started");
pub(crate) static UPLOADS_REJECTED: Counter = Counter::new("buddy.documents.uploads_rejected");
pub(crate) static UPLOADS_CANCELLED: Counter = Counter::new("buddy.documents.uploads_cancelled");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&LIVENESS_PROBES);
    collector.register_counter(&LIVENESS_FAILURES);
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&SESSION_SUBMITS);
    collector.register_counter(&SESSION_REJECTED_SUBMITS);
    collector.register_counter(&SESSION_ERROR_REPLIES);

    collector.register_counter(&UPLOADS_STARTED);
    collector.register_counter(&UPLOADS_REJECTED);
    collector.register_counter(&UPLOADS_CANCELLED);
}
