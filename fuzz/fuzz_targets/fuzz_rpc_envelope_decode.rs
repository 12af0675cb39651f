//! Fuzz target for RPC result envelopes.
//!
//! Arbitrary bytes off the wire must either fail to decode or be consumed
//! without panicking.
//!
//! Run with:
//! cargo +nightly fuzz run fuzz_rpc_envelope_decode -- -max_total_time=600

#![no_main]

use libfuzzer_sys::fuzz_target;
use prost::Message;
use trellis_rpc::{NoDataResultMessage, ServiceResultMessage};

fuzz_target!(|data: &[u8]| {
    if let Ok(message) = NoDataResultMessage::decode(data) {
        if let Err(err) = message.clone().raise_or_return() {
            let _ = err.into_managed();
        }
        // Re-encoding a decoded message must decode to the same value.
        let again = NoDataResultMessage::decode(message.encode_to_vec().as_slice()).unwrap();
        assert_eq!(again, message);
    }

    if let Ok(message) = ServiceResultMessage::decode(data) {
        let _ = message.clone().raise_or_return::<String>();
        let _ = message.raise_or_return::<i32>();
    }
});
