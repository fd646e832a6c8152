use std::fmt::{self, Formatter};

use crate::{base32, Error, Ulid, PAYLOAD_BITS, PAYLOAD_MASK};

pub fn text_array(bytes: &[u8]) -> Result<&[u8; Ulid::TEXT_LENGTH], Error> {
    bytes
        .try_into()
        .map_err(|_| Error::InvalidTextLength(bytes.len()))
}

pub fn debug_ulid(ulid: u128, f: &mut Formatter<'_>) -> fmt::Result {
    struct Payload(u128);

    impl fmt::Debug for Payload {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            write!(f, "\"{:020X}\"", self.0)
        }
    }

    let mut buffer = [0; Ulid::TEXT_LENGTH];
    let string = base32::encode(ulid, &mut buffer);

    f.debug_struct("Ulid")
        .field("string", &string)
        .field("timestamp_ms", &((ulid >> PAYLOAD_BITS) as u64))
        .field("payload", &Payload(ulid & PAYLOAD_MASK))
        .finish()
}
