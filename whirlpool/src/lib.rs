//! An implementation of the [Whirlpool][1] cryptographic hash algorithm.
//!
//! This is the algorithm recommended by NESSIE (New European Schemes for
//! Signatures, Integrity and Encryption; an European research project).
//!
//! The constants used by Whirlpool were changed twice (2001 and 2003) - this
//! crate only implements the most recent standard, including its 256-bit
//! message length field.
//!
//! For details see <http://www.larc.usp.br/~pbarreto/WhirlpoolPage.html>.
//!
//! # Usage
//!
//! ```rust
//! use whirlpool::{Whirlpool, Digest};
//! use hex_literal::hex;
//!
//! // create a hasher object, to use it do not forget to import `Digest` trait
//! let mut hasher = Whirlpool::new();
//! // write input message
//! hasher.update(b"Hello Whirlpool");
//! // read hash digest (it will consume hasher)
//! let result = hasher.finalize();
//!
//! assert_eq!(result[..], hex!("
//!     8eaccdc136903c458ea0b1376be2a5fc9dc5b8ce8892a3b4f43366e2610c206c
//!     a373816495e63db0fff2ff25f75aa7162f332c9f518c3036456502a8414d300a
//! ")[..]);
//!
//! // one-shot hashing of a complete message
//! assert_eq!(whirlpool::hash(b"Hello Whirlpool")[..], result[..]);
//! ```
//!
//! For callers that need the explicit `init` / `add` / `finalize` life cycle
//! with runtime misuse detection, see [`Hasher`].
//!
//! Also see [RustCrypto/hashes][2] readme.
//!
//! [1]: https://en.wikipedia.org/wiki/Whirlpool_(hash_function)
//! [2]: https://github.com/RustCrypto/hashes

#![no_std]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

#[cfg(feature = "std")]
extern crate std;

pub use digest::{self, Digest};

mod compress;
mod consts;
mod error;
mod hasher;
mod padding;

pub use consts::{BLOCK_SIZE, LENGTH_SIZE, ROUNDS};
pub use error::{Error, InvalidStateError, LengthOverflowError};
pub use hasher::{Hasher, Phase};
pub use padding::pad;

use compress::compress;
use padding::{pad_tail, BitLength};

use core::fmt;
use digest::{
    block_buffer::Eager,
    core_api::{
        AlgorithmName, Block, BlockSizeUser, Buffer, BufferKindUser, CoreWrapper,
        FixedOutputCore, OutputSizeUser, Reset, UpdateCore,
    },
    typenum::U64,
    HashMarker, Output,
};

/// Size of a Whirlpool digest in bytes.
pub const DIGEST_SIZE: usize = 64;

/// Core Whirlpool hasher state.
#[derive(Clone)]
pub struct WhirlpoolCore {
    pub(crate) bit_len: BitLength,
    pub(crate) state: [u64; 8],
}

impl WhirlpoolCore {
    /// Pads `rest` (the unprocessed tail of the message) and returns the
    /// digest, leaving `self` untouched.
    pub(crate) fn finish(&self, rest: &[u8]) -> Result<[u8; DIGEST_SIZE], LengthOverflowError> {
        let bit_len = self.bit_len.checked_add_bytes(rest.len() as u128)?;

        let mut state = self.state;
        let (block, extra) = pad_tail(rest, bit_len);
        compress(&mut state, &block);
        if let Some(block) = extra {
            compress(&mut state, &block);
        }
        Ok(to_digest(&state))
    }
}

impl HashMarker for WhirlpoolCore {}

impl BlockSizeUser for WhirlpoolCore {
    type BlockSize = U64;
}

impl BufferKindUser for WhirlpoolCore {
    type BufferKind = Eager;
}

impl OutputSizeUser for WhirlpoolCore {
    type OutputSize = U64;
}

impl UpdateCore for WhirlpoolCore {
    /// # Panics
    ///
    /// If the total message length exceeds `2^256 - 1` bits.
    #[inline]
    fn update_blocks(&mut self, blocks: &[Block<Self>]) {
        let bytes = (blocks.len() * BLOCK_SIZE) as u128;
        self.bit_len = match self.bit_len.checked_add_bytes(bytes) {
            Ok(bit_len) => bit_len,
            Err(err) => panic!("{}", err),
        };
        for block in blocks {
            compress(&mut self.state, convert(block));
        }
    }
}

impl FixedOutputCore for WhirlpoolCore {
    /// # Panics
    ///
    /// If the total message length exceeds `2^256 - 1` bits.
    #[inline]
    fn finalize_fixed_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
        match self.finish(buffer.get_data()) {
            Ok(digest) => out.copy_from_slice(&digest),
            Err(err) => panic!("{}", err),
        }
    }
}

impl Default for WhirlpoolCore {
    #[inline]
    fn default() -> Self {
        Self {
            bit_len: BitLength::ZERO,
            state: [0u64; 8],
        }
    }
}

impl Reset for WhirlpoolCore {
    #[inline]
    fn reset(&mut self) {
        *self = Default::default();
    }
}

impl AlgorithmName for WhirlpoolCore {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Whirlpool")
    }
}

impl fmt::Debug for WhirlpoolCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WhirlpoolCore { ... }")
    }
}

/// Whirlpool hasher state.
pub type Whirlpool = CoreWrapper<WhirlpoolCore>;

/// Computes the Whirlpool digest of a complete message.
pub fn hash(data: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut state = [0u64; 8];
    for block in pad(data) {
        compress(&mut state, &block);
    }
    to_digest(&state)
}

/// Whirlpool compression function.
///
/// Folds every block into the chaining value `state`. No padding or length
/// accounting is applied; combine with [`pad`] to hash a complete message.
pub fn compress_blocks(state: &mut [u64; 8], blocks: &[[u8; BLOCK_SIZE]]) {
    for block in blocks {
        compress(state, block);
    }
}

fn to_digest(state: &[u64; 8]) -> [u8; DIGEST_SIZE] {
    let mut out = [0u8; DIGEST_SIZE];
    for (chunk, v) in out.chunks_exact_mut(8).zip(state.iter()) {
        chunk.copy_from_slice(&v.to_be_bytes());
    }
    out
}

#[inline(always)]
fn convert(block: &Block<WhirlpoolCore>) -> &[u8; BLOCK_SIZE] {
    // SAFETY: GenericArray<u8, U64> and [u8; 64] have
    // exactly the same memory layout
    #[allow(unsafe_code)]
    unsafe {
        &*(block.as_ptr() as *const [u8; BLOCK_SIZE])
    }
}
