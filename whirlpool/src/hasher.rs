//! Streaming hasher with an explicit, checked life cycle.

use core::fmt;

use digest::core_api::{Buffer, Reset, UpdateCore};

use crate::error::{Error, InvalidStateError};
use crate::{WhirlpoolCore, DIGEST_SIZE};

/// Life-cycle phase of a [`Hasher`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Created but not initialized yet.
    Empty,
    /// Initialized and accepting input.
    Accumulating,
    /// Finalized; only the digest can be read.
    Finalized,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Empty => "empty",
            Phase::Accumulating => "accumulating",
            Phase::Finalized => "finalized",
        })
    }
}

/// Whirlpool hasher following the `init` / `add` / `finalize` / `digest`
/// protocol.
///
/// Unlike [`Whirlpool`](crate::Whirlpool), which encodes the protocol in the
/// type system by consuming itself on finalization, `Hasher` checks the
/// order of calls at runtime and reports misuse as [`InvalidStateError`].
///
/// ```rust
/// use whirlpool::{Hasher, Phase};
///
/// let mut hasher = Hasher::new();
/// hasher.init();
/// hasher.add(b"The quick brown fox ")?;
/// hasher.add(b"jumps over the lazy dog")?;
/// hasher.finalize()?;
/// assert_eq!(hasher.phase(), Phase::Finalized);
/// assert_eq!(hasher.digest()?, whirlpool::hash(b"The quick brown fox jumps over the lazy dog"));
///
/// // The computation is over.
/// assert!(hasher.add(b"more").is_err());
/// # Ok::<(), whirlpool::Error>(())
/// ```
#[derive(Clone)]
pub struct Hasher {
    core: WhirlpoolCore,
    buffer: Buffer<WhirlpoolCore>,
    phase: Phase,
    digest: [u8; DIGEST_SIZE],
}

impl Hasher {
    /// Creates a hasher in the [`Phase::Empty`] phase.
    pub fn new() -> Self {
        Self {
            core: WhirlpoolCore::default(),
            buffer: Buffer::<WhirlpoolCore>::default(),
            phase: Phase::Empty,
            digest: [0; DIGEST_SIZE],
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Starts a new computation, discarding any previous state or digest.
    pub fn init(&mut self) {
        self.core.reset();
        self.buffer.reset();
        self.digest = [0; DIGEST_SIZE];
        self.phase = Phase::Accumulating;
    }

    /// Feeds `data` into the computation.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] unless the hasher is accumulating, and
    /// [`Error::LengthOverflow`] if the total input would exceed the 256-bit
    /// length field. The hasher is left untouched in both cases.
    pub fn add(&mut self, data: &[u8]) -> Result<(), Error> {
        self.require("add", Phase::Accumulating)?;

        let pending = self.buffer.get_pos() as u128 + data.len() as u128;
        self.core.bit_len.checked_add_bytes(pending)?;

        let core = &mut self.core;
        self.buffer
            .digest_blocks(data, |blocks| core.update_blocks(blocks));
        Ok(())
    }

    /// Pads the buffered input, compresses the final block(s) and stores the
    /// digest. The chaining value is wiped afterwards.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] unless the hasher is accumulating.
    pub fn finalize(&mut self) -> Result<(), Error> {
        self.require("finalize", Phase::Accumulating)?;

        self.digest = self.core.finish(self.buffer.get_data())?;
        self.core.reset();
        self.buffer.reset();
        self.phase = Phase::Finalized;
        Ok(())
    }

    /// Returns the digest of the finished computation.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidState`] unless the hasher is finalized.
    pub fn digest(&self) -> Result<[u8; DIGEST_SIZE], Error> {
        self.require("digest", Phase::Finalized)?;
        Ok(self.digest)
    }

    fn require(&self, operation: &'static str, phase: Phase) -> Result<(), InvalidStateError> {
        if self.phase == phase {
            Ok(())
        } else {
            Err(InvalidStateError::new(operation, self.phase))
        }
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hasher")
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LengthOverflowError;
    use crate::padding::BitLength;

    #[test]
    fn phases() {
        let mut hasher = Hasher::new();
        assert_eq!(hasher.phase(), Phase::Empty);
        hasher.init();
        assert_eq!(hasher.phase(), Phase::Accumulating);
        hasher.add(b"abc").unwrap();
        assert_eq!(hasher.phase(), Phase::Accumulating);
        hasher.finalize().unwrap();
        assert_eq!(hasher.phase(), Phase::Finalized);
        hasher.init();
        assert_eq!(hasher.phase(), Phase::Accumulating);
    }

    #[test]
    fn invalid_state_reports_operation_and_phase() {
        let mut hasher = Hasher::new();
        let err = hasher.add(b"x").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidState(InvalidStateError::new("add", Phase::Empty))
        );

        hasher.init();
        match hasher.digest() {
            Err(Error::InvalidState(err)) => {
                assert_eq!(err.operation(), "digest");
                assert_eq!(err.phase(), Phase::Accumulating);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn finalize_wipes_chaining_value() {
        let mut hasher = Hasher::new();
        hasher.init();
        hasher.add(&[0x61; 200]).unwrap();
        hasher.finalize().unwrap();
        assert_eq!(hasher.core.state, [0u64; 8]);
        assert_eq!(hasher.core.bit_len, BitLength::ZERO);
        assert_eq!(hasher.buffer.get_pos(), 0);
    }

    #[test]
    fn length_overflow_leaves_state_untouched() {
        let mut hasher = Hasher::new();
        hasher.init();
        hasher.add(&[1, 2, 3]).unwrap();
        hasher.core.bit_len = BitLength::from_words([u64::MAX, u64::MAX, u64::MAX, u64::MAX - 40]);

        let err = hasher.add(&[0; 3]).unwrap_err();
        assert_eq!(err, Error::LengthOverflow(LengthOverflowError));
        assert_eq!(hasher.buffer.get_pos(), 3);
        assert_eq!(hasher.phase(), Phase::Accumulating);

        // Two more bytes still fit: 3 buffered + 2 new = 40 bits.
        hasher.add(&[0; 2]).unwrap();
        hasher.finalize().unwrap();
    }
}
