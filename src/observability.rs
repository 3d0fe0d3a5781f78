use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("fundfacts.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("fundfacts.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("fundfacts.client.request_duration_seconds");

pub(crate) static HEALTH_CHECKS: Counter = Counter::new("fundfacts.client.health_checks");
pub(crate) static HEALTH_FAILURES: Counter = Counter::new("fundfacts.client.health_failures");

pub(crate) static CONVERSATION_SUBMITS: Counter = Counter::new("fundfacts.conversation.submits");
pub(crate) static CONVERSATION_REJECTED: Counter =
    Counter::new("fundfacts.conversation.rejected_submits");
pub(crate) static CONVERSATION_FALLBACKS: Counter =
    Counter::new("fundfacts.conversation.fallback_settlements");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&HEALTH_CHECKS);
    collector.register_counter(&HEALTH_FAILURES);

    collector.register_counter(&CONVERSATION_SUBMITS);
    collector.register_counter(&CONVERSATION_REJECTED);
    collector.register_counter(&CONVERSATION_FALLBACKS);
}
