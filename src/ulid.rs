use std::{
    fmt,
    str::FromStr,
    time::{Duration, SystemTime},
};

use crate::{base32, util, Error, PAYLOAD_BITS, TIMESTAMP_MAX};

/// A Universally Unique Lexicographically Sortable Identifier.
///
/// A `Ulid` is an immutable 128-bit value: a 48-bit Unix-millisecond
/// timestamp followed by an 80-bit payload. The derived ordering compares
/// the underlying `u128`, which is exactly the unsigned lexicographic
/// order of the 16-byte big-endian binary form.
///
/// # Examples
///
/// Generating and printing:
///
/// ```
/// use ulid_kit::Ulid;
///
/// let u = Ulid::random();
/// println!("{u}");
/// ```
///
/// Parsing is lenient (case-insensitive, `I`/`L` read as `1`, `O` as `0`),
/// printing always emits the canonical 26-character form:
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use ulid_kit::Ulid;
///
/// let u: Ulid = "olllllllllllllllllllllllll".parse()?;
///
/// assert_eq!(u.to_string(), "01111111111111111111111111");
/// # Ok(()) }
/// ```
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Ulid(u128);

impl Ulid {
    /// Length of the canonical string form in characters.
    pub const TEXT_LENGTH: usize = 26;

    /// Length of the binary form in bytes.
    pub const BINARY_LENGTH: usize = 16;

    /// Length of the payload in bytes.
    pub const PAYLOAD_LENGTH: usize = 10;

    /// Largest representable timestamp, in milliseconds since the Unix
    /// epoch (sometime in the year 10889).
    pub const TIMESTAMP_MAX: u64 = TIMESTAMP_MAX;

    /// The all-zero ULID (`"00000000000000000000000000"`).
    pub const ZERO: Self = Self(0);

    /// The largest ULID (`"7ZZZZZZZZZZZZZZZZZZZZZZZZZ"`).
    pub const MAX: Self = Self(u128::MAX);

    /// Creates a `Ulid` from a timestamp and a payload.
    ///
    /// The timestamp is measured in milliseconds since the Unix epoch and
    /// must fit into 48 bits. The payload must be exactly 10 bytes, given
    /// in big-endian order.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTimestamp`] if the timestamp exceeds 48 bits,
    /// [`Error::InvalidPayload`] if the payload is not 10 bytes.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use ulid_kit::Ulid;
    ///
    /// let u = Ulid::from_parts(1_103_823_438_081, &[1; 10])?;
    ///
    /// assert_eq!(u.to_string(), "01040G2081040G2081040G2081");
    /// # Ok(()) }
    /// ```
    pub fn from_parts(timestamp: u64, payload: &[u8]) -> Result<Self, Error> {
        if timestamp > TIMESTAMP_MAX {
            return Err(Error::InvalidTimestamp(timestamp));
        }

        let payload: &[u8; Self::PAYLOAD_LENGTH] = payload
            .try_into()
            .map_err(|_| Error::InvalidPayload(payload.len()))?;

        Ok(Self::assemble(timestamp, payload))
    }

    /// Builds a `Ulid` from an in-range timestamp and a payload array.
    pub(crate) fn assemble(timestamp: u64, payload: &[u8; Self::PAYLOAD_LENGTH]) -> Self {
        debug_assert!(timestamp <= TIMESTAMP_MAX);

        let mut bytes = [0; Self::BINARY_LENGTH];
        bytes[..6].copy_from_slice(&timestamp.to_be_bytes()[2..]);
        bytes[6..].copy_from_slice(payload);

        Self(u128::from_be_bytes(bytes))
    }

    /// Returns the timestamp part in milliseconds since the Unix epoch.
    #[must_use]
    pub const fn timestamp(self) -> u64 {
        (self.0 >> PAYLOAD_BITS) as u64
    }

    /// Returns the 10-byte payload in big-endian order.
    #[must_use]
    pub const fn payload(self) -> [u8; Self::PAYLOAD_LENGTH] {
        let b = self.0.to_be_bytes();
        [b[6], b[7], b[8], b[9], b[10], b[11], b[12], b[13], b[14], b[15]]
    }

    /// Returns the timestamp part as a [`SystemTime`].
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::SystemTime;
    /// use ulid_kit::Ulid;
    ///
    /// let u = Ulid::random();
    ///
    /// assert!(u.datetime() <= SystemTime::now());
    /// ```
    #[must_use]
    pub fn datetime(self) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_millis(self.timestamp())
    }

    /// Converts a `Ulid` into its 16-byte binary form.
    ///
    /// The bytes are in network byte order (big endian): the 48-bit
    /// timestamp followed by the 80-bit payload.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use ulid_kit::Ulid;
    ///
    /// let u: Ulid = "01040G2081040G2081040G2081".parse()?;
    ///
    /// assert_eq!(u.to_bytes(), [1; 16]);
    /// # Ok(()) }
    /// ```
    #[must_use]
    pub const fn to_bytes(self) -> [u8; Self::BINARY_LENGTH] {
        self.0.to_be_bytes()
    }

    /// Creates a `Ulid` from its 16-byte binary form.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; Self::BINARY_LENGTH]) -> Self {
        Self(u128::from_be_bytes(bytes))
    }

    /// Creates a `Ulid` from a byte slice.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidBinaryLength`] if the slice is not exactly 16 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: &[u8; Self::BINARY_LENGTH] = bytes
            .try_into()
            .map_err(|_| Error::InvalidBinaryLength(bytes.len()))?;

        Ok(Self::from_bytes(*bytes))
    }

    /// Returns the 16 bytes of this `Ulid` in canonical UUID byte order.
    ///
    /// A ULID is bitwise compatible with the 128-bit UUID layout, so this
    /// is the identity reinterpretation of [`Ulid::to_bytes`]. Interop with
    /// UUID libraries is "copy the 16 bytes".
    #[must_use]
    pub const fn to_uuid_bytes(self) -> [u8; Self::BINARY_LENGTH] {
        self.to_bytes()
    }

    /// Creates a `Ulid` from 16 bytes in canonical UUID byte order.
    #[must_use]
    pub const fn from_uuid_bytes(bytes: [u8; Self::BINARY_LENGTH]) -> Self {
        Self::from_bytes(bytes)
    }

    /// Converts a `Ulid` into a `u128` integer.
    #[must_use]
    pub const fn to_u128(self) -> u128 {
        self.0
    }

    /// Creates a `Ulid` from a `u128` integer.
    #[must_use]
    pub const fn from_u128(n: u128) -> Self {
        Self(n)
    }
}

impl fmt::Debug for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        util::debug_ulid(self.0, f)
    }
}

impl fmt::Display for Ulid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = [0; Self::TEXT_LENGTH];
        f.write_str(base32::encode(self.0, &mut buffer))
    }
}

impl FromStr for Ulid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let buffer = util::text_array(s.as_bytes())?;
        Ok(Self(base32::decode(buffer)?))
    }
}

impl From<Ulid> for u128 {
    fn from(ulid: Ulid) -> Self {
        ulid.to_u128()
    }
}

impl From<u128> for Ulid {
    fn from(n: u128) -> Self {
        Self::from_u128(n)
    }
}

impl From<Ulid> for [u8; Ulid::BINARY_LENGTH] {
    fn from(ulid: Ulid) -> Self {
        ulid.to_bytes()
    }
}

impl From<[u8; Ulid::BINARY_LENGTH]> for Ulid {
    fn from(bytes: [u8; Ulid::BINARY_LENGTH]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&[u8]> for Ulid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}
