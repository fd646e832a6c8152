use std::{
    sync::{Mutex, PoisonError},
    time::SystemTime,
};

#[cfg(feature = "rand")]
use std::sync::LazyLock;

#[cfg(feature = "rand")]
use rand::{
    rngs::{OsRng, StdRng},
    SeedableRng as _,
};

use crate::{Error, Ulid};

/// A source of random bytes for ULID payloads.
///
/// Only byte filling is required, deliberately less than a full
/// random-number-generator contract. With the `rand` feature enabled,
/// every [`rand::RngCore`] is a `RandomSource`.
///
/// # Example
///
/// ```
/// use ulid_kit::{RandomSource, Ulid};
///
/// struct ZeroSource;
///
/// impl RandomSource for ZeroSource {
///     fn fill_bytes(&mut self, dest: &mut [u8]) {
///         dest.fill(0);
///     }
/// }
///
/// let u = Ulid::random_with(&mut ZeroSource);
///
/// assert_eq!(u.payload(), [0; 10]);
/// ```
pub trait RandomSource {
    /// Fills `dest` with random bytes.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

#[cfg(feature = "rand")]
impl<R: rand::RngCore> RandomSource for R {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand::RngCore::fill_bytes(self, dest);
    }
}

/// Current wall clock in milliseconds since the Unix epoch.
///
/// A clock before the epoch reads as zero. The current epoch stays well
/// inside 48 bits until the year 10889, so the result is not range-checked.
fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_or(0, |since_epoch| since_epoch.as_millis() as u64)
}

impl Ulid {
    /// Generates a ULID from the current wall clock and the thread-local
    /// random number generator.
    ///
    /// The thread-local generator offers lock-free draws of acceptable
    /// statistical quality. For a cryptographically strong source, see
    /// [`Ulid::random_secure`]; for strictly increasing identifiers, see
    /// [`Ulid::monotonic`] or [`MonotonicUlid`].
    #[cfg(feature = "rand")]
    #[must_use]
    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    /// Generates a ULID from the current wall clock and the operating
    /// system random number generator.
    #[cfg(feature = "rand")]
    #[must_use]
    pub fn random_secure() -> Self {
        Self::random_with(&mut OsRng)
    }

    /// Generates a ULID from the current wall clock and a caller-supplied
    /// random source.
    pub fn random_with<S: RandomSource + ?Sized>(source: &mut S) -> Self {
        let mut payload = [0; Self::PAYLOAD_LENGTH];
        source.fill_bytes(&mut payload);

        Self::assemble(now_millis(), &payload)
    }

    /// Generates a strictly increasing ULID from a process-wide generator
    /// backed by a cryptographically strong random source.
    ///
    /// # Errors
    ///
    /// [`Error::PayloadOverflow`] if 2^80 identifiers were drawn within a
    /// single millisecond.
    ///
    /// # Example
    ///
    /// ```
    /// # use std::error::Error;
    /// # fn main() -> Result<(), Box<dyn Error>> {
    /// use ulid_kit::Ulid;
    ///
    /// let u1 = Ulid::monotonic()?;
    /// let u2 = Ulid::monotonic()?;
    ///
    /// assert!(u1 < u2);
    /// # Ok(()) }
    /// ```
    #[cfg(feature = "rand")]
    pub fn monotonic() -> Result<Self, Error> {
        static GENERATOR: LazyLock<MonotonicUlid<StdRng>> =
            LazyLock::new(|| MonotonicUlid::new(StdRng::from_entropy()));

        GENERATOR.next()
    }
}

/// A stateful generator producing strictly increasing ULIDs.
///
/// Within a single millisecond the 80-bit payload is incremented as a
/// big-endian integer instead of being redrawn, so successive outputs of
/// one generator instance always compare strictly increasing. The whole
/// step runs under a mutex; concurrent callers are linearized into one
/// strictly increasing sequence.
///
/// # Example
///
/// ```
/// # use std::error::Error;
/// # fn main() -> Result<(), Box<dyn Error>> {
/// use ulid_kit::MonotonicUlid;
///
/// let generator = MonotonicUlid::new(rand::thread_rng());
///
/// let u1 = generator.next()?;
/// let u2 = generator.next()?;
///
/// assert!(u1 < u2);
/// # Ok(()) }
/// ```
pub struct MonotonicUlid<S> {
    state: Mutex<State<S>>,
}

struct State<S> {
    last_time: u64,
    last_payload: [u8; Ulid::PAYLOAD_LENGTH],
    source: S,
}

impl<S: RandomSource> MonotonicUlid<S> {
    /// Creates a generator drawing payloads from the given random source.
    pub const fn new(source: S) -> Self {
        Self {
            state: Mutex::new(State {
                last_time: 0,
                last_payload: [0; Ulid::PAYLOAD_LENGTH],
                source,
            }),
        }
    }

    /// Returns the next ULID, strictly greater than all previous outputs
    /// of this generator.
    ///
    /// # Errors
    ///
    /// [`Error::PayloadOverflow`] if 2^80 identifiers were drawn within a
    /// single millisecond. The generator state is left untouched, so a
    /// later call in a fresh millisecond succeeds.
    pub fn next(&self) -> Result<Ulid, Error> {
        self.next_at(now_millis())
    }

    pub(crate) fn next_at(&self, now: u64) -> Result<Ulid, Error> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        // A clock stepping backwards stays on the last millisecond, so
        // outputs keep increasing across clock regressions.
        let now = now.max(state.last_time);

        if now == state.last_time {
            state.last_payload = incremented(&state.last_payload).ok_or(Error::PayloadOverflow)?;
        } else {
            state.last_time = now;

            let State { source, last_payload, .. } = &mut *state;
            source.fill_bytes(last_payload);
        }

        Ok(Ulid::assemble(state.last_time, &state.last_payload))
    }
}

/// Increments a payload as a big-endian 80-bit unsigned integer.
/// Returns `None` when all 80 bits were already set.
fn incremented(payload: &[u8; Ulid::PAYLOAD_LENGTH]) -> Option<[u8; Ulid::PAYLOAD_LENGTH]> {
    let mut bumped = *payload;

    for byte in bumped.iter_mut().rev() {
        let (value, carry) = byte.overflowing_add(1);
        *byte = value;

        if !carry {
            return Some(bumped);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FillSource(u8);

    impl RandomSource for FillSource {
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(self.0);
        }
    }

    #[test]
    fn increments_within_same_millisecond() {
        let generator = MonotonicUlid::new(FillSource(0));

        let u1 = generator.next_at(5).unwrap();
        let u2 = generator.next_at(5).unwrap();
        let u3 = generator.next_at(5).unwrap();

        assert_eq!(u1.timestamp(), 5);
        assert_eq!(u1.payload(), [0; 10]);
        assert_eq!(u2.payload(), [0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(u3.payload(), [0, 0, 0, 0, 0, 0, 0, 0, 0, 2]);

        assert!(u1 < u2 && u2 < u3);
    }

    #[test]
    fn redraws_in_fresh_millisecond() {
        let generator = MonotonicUlid::new(FillSource(0x42));

        let u1 = generator.next_at(5).unwrap();
        let u2 = generator.next_at(6).unwrap();

        assert_eq!(u1.timestamp(), 5);
        assert_eq!(u2.timestamp(), 6);
        assert_eq!(u2.payload(), [0x42; 10]);
        assert!(u1 < u2);
    }

    #[test]
    fn carry_propagates_through_payload() {
        let generator = MonotonicUlid::new(FillSource(0));

        let u1 = generator.next_at(7).unwrap();
        assert_eq!(u1.payload(), [0; 10]);

        // Pre-set the low bytes to force a multi-byte carry.
        generator.state.lock().unwrap().last_payload = [0, 0, 0, 0, 0, 0, 0, 0xFF, 0xFF, 0xFF];

        let u2 = generator.next_at(7).unwrap();
        assert_eq!(u2.payload(), [0, 0, 0, 0, 0, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn overflow_is_reported_and_state_preserved() {
        let generator = MonotonicUlid::new(FillSource(0xFF));

        let u1 = generator.next_at(9).unwrap();
        assert_eq!(u1.payload(), [0xFF; 10]);

        assert_eq!(generator.next_at(9), Err(Error::PayloadOverflow));
        assert_eq!(generator.next_at(9), Err(Error::PayloadOverflow));

        // A fresh millisecond recovers with a new draw.
        let u2 = generator.next_at(10).unwrap();
        assert_eq!(u2.timestamp(), 10);
        assert_eq!(u2.payload(), [0xFF; 10]);
        assert!(u1 < u2);
    }

    #[test]
    fn clock_regression_stays_monotonic() {
        let generator = MonotonicUlid::new(FillSource(7));

        let u1 = generator.next_at(100).unwrap();
        let u2 = generator.next_at(50).unwrap();

        assert_eq!(u2.timestamp(), 100);
        assert!(u1 < u2);
    }

    #[test]
    fn incremented_carries_and_overflows() {
        assert_eq!(incremented(&[0; 10]), Some([0, 0, 0, 0, 0, 0, 0, 0, 0, 1]));
        assert_eq!(
            incremented(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 0xFF]),
            Some([0, 0, 0, 0, 0, 0, 0, 0, 1, 0])
        );
        assert_eq!(incremented(&[0xFF; 10]), None);
    }

    #[cfg(feature = "rand")]
    #[test]
    fn global_generator_is_strictly_increasing() {
        let u1 = Ulid::monotonic().unwrap();
        let u2 = Ulid::monotonic().unwrap();

        assert!(u1 < u2);
    }
}
