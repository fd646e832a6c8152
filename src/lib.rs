//! # ULIDs with lenient parsing and monotonic generation
//!
//! This crate implements ULIDs (Universally Unique Lexicographically
//! Sortable Identifiers): 128-bit identifiers composed of a 48-bit
//! Unix-millisecond timestamp and an 80-bit random payload, with a
//! 26-character Crockford Base32 text form and a 16-byte binary form that
//! is bitwise compatible with the UUID layout.
//!
//! ## Generating ULIDs
//!
//! ```
//! use ulid_kit::Ulid;
//!
//! let u = Ulid::random();
//! ```
//!
//! [`Ulid::random()`] draws from the thread-local random number generator.
//! [`Ulid::random_secure()`] draws from the operating system generator,
//! and [`Ulid::random_with()`] accepts any [`RandomSource`].
//!
//! ## Monotonic generation
//!
//! [`Ulid::monotonic()`] returns identifiers that are guaranteed to be
//! strictly increasing, even within a single millisecond, from a
//! process-wide generator. [`MonotonicUlid`] provides the same guarantee
//! for a generator instance with a caller-supplied random source:
//!
//! ```
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! use ulid_kit::Ulid;
//!
//! let u1 = Ulid::monotonic()?;
//! let u2 = Ulid::monotonic()?;
//!
//! assert!(u1 < u2);
//! # Ok(()) }
//! ```
//!
//! ## Printing and parsing
//!
//! ULIDs implement [`std::fmt::Display`] and [`std::str::FromStr`]:
//!
//! ```
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! use ulid_kit::Ulid;
//!
//! let u: Ulid = "3ZFXZQYZVZFXZQYZVZFXZQYZVZ".parse()?;
//!
//! assert_eq!(u.to_string(), "3ZFXZQYZVZFXZQYZVZFXZQYZVZ");
//! # Ok(()) }
//! ```
//!
//! Parsing is lenient, as Crockford Base32 intends: input is
//! case-insensitive and the visually confusable `I`, `L` and `O` are read
//! as `1`, `1` and `0`. Printing always emits the canonical uppercase
//! alphabet, so round-trips normalize the text.
//!
//! ## Serializing and deserializing using `Serde` (JSON)
//!
//! With the `serde` feature enabled, ULIDs serialize as their canonical
//! string form:
//!
//! ```
//! # use std::error::Error;
//! # fn main() -> Result<(), Box<dyn Error>> {
//! # #[cfg(feature = "serde")]
//! # {
//! use ulid_kit::Ulid;
//! # use serde_derive as serde;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Example {
//!     id: Ulid,
//!     data: String,
//! }
//!
//! let e1 = Example {
//!     id: Ulid::random(),
//!     data: "Hello, World!".to_string(),
//! };
//!
//! let s = serde_json::to_string(&e1)?;
//! let e2: Example = serde_json::from_str(&s)?;
//!
//! assert_eq!(e1, e2);
//! # }
//! # Ok(()) }
//! ```
//!
//! ## Feature Flags
//!
//! - **`rand`**: Uses the `rand` crate for random payloads, enabled by
//!   default. Without it, only caller-supplied [`RandomSource`]s are
//!   available.
//! - **`serde`**: Serialization and deserialization via `Serde`, optional.
//!

mod base32;
mod error;
mod generator;
#[cfg(feature = "serde")]
mod serde;
mod ulid;
mod util;

use std::borrow::Cow;

pub use error::Error;
pub use generator::{MonotonicUlid, RandomSource};
pub use ulid::Ulid;

const PAYLOAD_BITS: u32 = 80;
const PAYLOAD_MASK: u128 = (1 << PAYLOAD_BITS) - 1;

const TIMESTAMP_BITS: u32 = 48;
const TIMESTAMP_MAX: u64 = (1 << TIMESTAMP_BITS) - 1;

/// Canonicalizes a ULID string.
///
/// The letters `i`, `l` and `o` are replaced by the digits `1` and `0`,
/// and all characters are converted to uppercase. If the input is already
/// canonical, a borrowed version of the input is returned without
/// allocating.
///
/// # Errors
///
/// The input must have the correct length (26) and contain only valid
/// characters.
///
/// # Example
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let s = ulid_kit::canonicalize("olllllllllllllllllllllllll")?;
///
/// assert_eq!(s, "01111111111111111111111111");
/// # Ok(()) }
/// ```
pub fn canonicalize(ulid: &str) -> Result<Cow<'_, str>, Error> {
    let mut buffer = *util::text_array(ulid.as_bytes())?;
    let cleaned = base32::canonicalize(&mut buffer)?;

    if cleaned == ulid {
        Ok(ulid.into())
    } else {
        Ok(cleaned.to_string().into())
    }
}

/// Checks a ULID string for validity.
///
/// To be valid, the string must have the correct length (26) and contain
/// only characters accepted by the lenient decoder. It is not checked
/// whether the string is in canonical form.
///
/// # Errors
///
/// If the string is not a parseable ULID, the corresponding error is
/// returned.
///
/// # Example
///
/// ```
/// assert!(ulid_kit::validate("olllllllllllllllllllllllll").is_ok());
/// assert!(ulid_kit::validate("7ZZZZZZZZZZZZZZZZZZZZZZZZZ").is_ok());
///
/// assert!(ulid_kit::validate("uuuuuuuuuuuuuuuuuuuuuuuuuu").is_err());
/// assert!(ulid_kit::validate("too short").is_err());
/// ```
pub fn validate(ulid: &str) -> Result<(), Error> {
    let buffer = util::text_array(ulid.as_bytes())?;
    base32::validate(buffer)
}
