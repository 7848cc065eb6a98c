use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("geminius.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("geminius.client.request_errors");

pub(crate) static STREAM_FRAGMENTS: Counter = Counter::new("geminius.stream.fragments");
pub(crate) static STREAM_INTERRUPTIONS: Counter = Counter::new("geminius.stream.interruptions");
pub(crate) static TURN_FRAGMENT_COUNT: Moments = Moments::new("geminius.turn.fragment_count");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);

    collector.register_counter(&STREAM_FRAGMENTS);
    collector.register_counter(&STREAM_INTERRUPTIONS);
    collector.register_moments(&TURN_FRAGMENT_COUNT);
}
