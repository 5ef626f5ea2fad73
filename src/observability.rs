use biometrics::{Collector, Counter, Moments};

pub(crate) static WEBHOOK_REQUESTS: Counter = Counter::new("animo.webhook.requests");
pub(crate) static WEBHOOK_REQUEST_ERRORS: Counter = Counter::new("animo.webhook.request_errors");
pub(crate) static WEBHOOK_REQUEST_DURATION: Moments =
    Moments::new("animo.webhook.request_duration_seconds");

pub(crate) static TURNS_REPLIED: Counter = Counter::new("animo.chat.turns_replied");
pub(crate) static TURNS_FALLBACK: Counter = Counter::new("animo.chat.turns_fallback");
pub(crate) static TURNS_FAILED: Counter = Counter::new("animo.chat.turns_failed");
pub(crate) static SENDS_SKIPPED: Counter = Counter::new("animo.chat.sends_skipped");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&WEBHOOK_REQUESTS);
    collector.register_counter(&WEBHOOK_REQUEST_ERRORS);
    collector.register_moments(&WEBHOOK_REQUEST_DURATION);

    collector.register_counter(&TURNS_REPLIED);
    collector.register_counter(&TURNS_FALLBACK);
    collector.register_counter(&TURNS_FAILED);
    collector.register_counter(&SENDS_SKIPPED);
}
