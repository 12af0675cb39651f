//! Fuzz target for descriptor decoding.
//!
//! Decoding must accept any descriptor, and a decoded error must encode back
//! to a known tag with the same message.
//!
//! Run with:
//! cargo +nightly fuzz run fuzz_descriptor_decode -- -max_total_time=600

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use trellis_core::{ErrorDescriptor, ErrorKind};

#[derive(Arbitrary, Debug)]
struct DescriptorInput {
    kind: String,
    message: String,
    data_field: Option<String>,
    use_known_tag: Option<u8>,
}

fuzz_target!(|input: DescriptorInput| {
    let kind = match input.use_known_tag {
        Some(i) => ErrorKind::ALL[usize::from(i) % ErrorKind::ALL.len()]
            .tag()
            .to_string(),
        None => input.kind,
    };
    let descriptor = ErrorDescriptor::new(kind, input.message, input.data_field);

    let error = descriptor.decode();
    assert_eq!(error.message(), descriptor.message);

    match descriptor.known_kind() {
        Some(kind) => assert_eq!(error.kind(), kind),
        None => assert_eq!(error.kind(), ErrorKind::Unhandled),
    }

    let encoded = ErrorDescriptor::encode(&error);
    assert!(ErrorKind::from_tag(&encoded.kind).is_some());
    assert_eq!(encoded.decode(), error);
});
