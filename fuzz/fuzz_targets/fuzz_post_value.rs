//! Fuzz target for the form placeholder rule.
//!
//! Run with:
//! cargo +nightly fuzz run fuzz_post_value -- -max_total_time=600

#![no_main]

use libfuzzer_sys::fuzz_target;
use trellis_rest::{get_post_value, set_post_value, NULL_PLACEHOLDER};

fuzz_target!(|value: Option<&str>| {
    let sent = set_post_value(value);
    let received = get_post_value(&sent);

    match value {
        None | Some("") => assert_eq!(received, None),
        Some(v) if v == NULL_PLACEHOLDER => assert_eq!(received, None),
        Some(v) => assert_eq!(received.as_deref(), Some(v)),
    }
});
