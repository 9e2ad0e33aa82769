//! Generator counters reported through the `metrics` facade.
//!
//! Every counter carries a `generator` label with the generator's label
//! (its kind unless configured otherwise).

use ::metrics::counter;

/// Counter incremented when a producer task starts
pub const GENERATOR_STARTED: &str = "pullseq_generator_started_total";
/// Counter incremented for every value handed to a consumer
pub const GENERATOR_ITEMS_SENT: &str = "pullseq_generator_items_sent_total";
/// Counter incremented when a producer task exits, labelled by reason
pub const GENERATOR_STOPPED: &str = "pullseq_generator_stopped_total";

pub(crate) fn record_started(label: &str) {
    counter!(GENERATOR_STARTED, "generator" => label.to_string()).increment(1);
}

pub(crate) fn record_sent(label: &str) {
    counter!(GENERATOR_ITEMS_SENT, "generator" => label.to_string()).increment(1);
}

pub(crate) fn record_stopped(label: &str, reason: &'static str) {
    counter!(GENERATOR_STOPPED, "generator" => label.to_string(), "reason" => reason)
        .increment(1);
}
