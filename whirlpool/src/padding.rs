//! Message padding and the 256-bit length counter.
//!
//! A message is padded with a single `1` bit, then `0` bits until exactly
//! [`LENGTH_SIZE`] bytes of the current block remain, then its length in
//! bits as a big-endian 256-bit integer. When the delimiter leaves more than
//! `BLOCK_SIZE - LENGTH_SIZE` bytes occupied the length spills into an extra
//! all-zero block.

use core::iter;

use crate::consts::{BLOCK_SIZE, LENGTH_SIZE};
use crate::error::LengthOverflowError;

type Block = [u8; BLOCK_SIZE];

const DELIMITER: u8 = 0x80;

/// Message length in bits, stored as big-endian 64-bit words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct BitLength([u64; 4]);

impl BitLength {
    pub(crate) const ZERO: Self = Self([0; 4]);

    /// Length of a message of `bytes` bytes. Always fits the counter.
    pub(crate) const fn from_bytes(bytes: u64) -> Self {
        let bits = (bytes as u128) << 3;
        Self([0, 0, (bits >> 64) as u64, bits as u64])
    }

    #[cfg(test)]
    pub(crate) const fn from_words(words: [u64; 4]) -> Self {
        Self(words)
    }

    /// Returns the length extended by `bytes` bytes, or an error if the sum
    /// does not fit 256 bits.
    pub(crate) fn checked_add_bytes(self, bytes: u128) -> Result<Self, LengthOverflowError> {
        let bits = bytes.checked_mul(8).ok_or(LengthOverflowError)?;
        let mut words = self.0;
        let mut carry = 0;
        adc(&mut words[3], bits as u64, &mut carry);
        adc(&mut words[2], (bits >> 64) as u64, &mut carry);
        adc(&mut words[1], 0, &mut carry);
        adc(&mut words[0], 0, &mut carry);
        if carry != 0 {
            return Err(LengthOverflowError);
        }
        Ok(Self(words))
    }

    pub(crate) fn to_be_bytes(self) -> [u8; LENGTH_SIZE] {
        let mut buf = [0u8; LENGTH_SIZE];
        for (chunk, v) in buf.chunks_exact_mut(8).zip(self.0.iter()) {
            chunk.copy_from_slice(&v.to_be_bytes());
        }
        buf
    }
}

/// Builds the final block(s) for the trailing partial block `rest`.
///
/// `bit_len` is the length of the whole message, `rest` included.
/// `rest` must be shorter than a block.
pub(crate) fn pad_tail(rest: &[u8], bit_len: BitLength) -> (Block, Option<Block>) {
    debug_assert!(rest.len() < BLOCK_SIZE);
    let pos = rest.len();

    let mut block = [0u8; BLOCK_SIZE];
    block[..pos].copy_from_slice(rest);
    block[pos] = DELIMITER;

    let len = bit_len.to_be_bytes();
    if pos + 1 > BLOCK_SIZE - LENGTH_SIZE {
        let mut last = [0u8; BLOCK_SIZE];
        last[BLOCK_SIZE - LENGTH_SIZE..].copy_from_slice(&len);
        (block, Some(last))
    } else {
        block[BLOCK_SIZE - LENGTH_SIZE..].copy_from_slice(&len);
        (block, None)
    }
}

/// Splits a complete message into padded blocks ready for compression.
pub fn pad(message: &[u8]) -> impl Iterator<Item = [u8; BLOCK_SIZE]> + '_ {
    let body_len = message.len() - message.len() % BLOCK_SIZE;
    let (body, rest) = message.split_at(body_len);
    let (first, second) = pad_tail(rest, BitLength::from_bytes(message.len() as u64));

    body.chunks_exact(BLOCK_SIZE)
        .map(|chunk| {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(chunk);
            block
        })
        .chain(iter::once(first))
        .chain(second)
}

#[inline(always)]
fn adc(a: &mut u64, b: u64, carry: &mut u64) {
    let ret = (*a as u128) + (b as u128) + (*carry as u128);
    *a = ret as u64;
    *carry = (ret >> 64) as u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_field_is_big_endian() {
        let len = BitLength::from_bytes(3).to_be_bytes();
        assert_eq!(&len[..31], &[0u8; 31][..]);
        assert_eq!(len[31], 24);

        let len = BitLength::from_bytes(u64::MAX).to_be_bytes();
        assert_eq!(&len[..23], &[0u8; 23][..]);
        assert_eq!(len[23], 0x07);
        assert_eq!(&len[24..31], &[0xff; 7][..]);
        assert_eq!(len[31], 0xf8);
    }

    #[test]
    fn counter_carries_between_words() {
        let len = BitLength::from_words([0, 0, 0, u64::MAX - 7])
            .checked_add_bytes(1)
            .unwrap();
        assert_eq!(len, BitLength::from_words([0, 0, 1, 0]));

        let len = BitLength::from_words([0, u64::MAX, u64::MAX, u64::MAX])
            .checked_add_bytes(1)
            .unwrap();
        assert_eq!(len, BitLength::from_words([1, 0, 0, 7]));
    }

    #[test]
    fn counter_overflow_is_reported() {
        let full = BitLength::from_words([u64::MAX; 4]);
        assert_eq!(full.checked_add_bytes(1), Err(LengthOverflowError));
        assert_eq!(full.checked_add_bytes(0), Ok(full));
        assert_eq!(
            BitLength::ZERO.checked_add_bytes(u128::MAX),
            Err(LengthOverflowError)
        );
    }

    #[test]
    fn single_block_tail() {
        for pos in 0..BLOCK_SIZE - LENGTH_SIZE {
            let rest = &[0xaa; BLOCK_SIZE][..pos];
            let (block, extra) = pad_tail(rest, BitLength::from_bytes(pos as u64));
            assert!(extra.is_none(), "pos {}", pos);
            assert_eq!(&block[..pos], rest);
            assert_eq!(block[pos], DELIMITER);
            assert!(block[pos + 1..BLOCK_SIZE - 1].iter().all(|&b| b == 0));
            assert_eq!(block[BLOCK_SIZE - 1], (8 * pos) as u8);
        }
    }

    #[test]
    fn two_block_tail() {
        for pos in BLOCK_SIZE - LENGTH_SIZE..BLOCK_SIZE {
            let rest = &[0x55; BLOCK_SIZE][..pos];
            let bit_len = BitLength::from_bytes(64 + pos as u64);
            let (block, extra) = pad_tail(rest, bit_len);
            let extra = extra.expect("length must spill into a second block");
            assert_eq!(block[pos], DELIMITER);
            assert!(block[pos + 1..].iter().all(|&b| b == 0));
            assert!(extra[..BLOCK_SIZE - LENGTH_SIZE].iter().all(|&b| b == 0));
            assert_eq!(&extra[BLOCK_SIZE - LENGTH_SIZE..], &bit_len.to_be_bytes()[..]);
        }
    }

    #[test]
    fn pad_block_counts() {
        let message = [0u8; 96];
        for &(len, blocks) in &[(0, 1), (31, 1), (32, 2), (63, 2), (64, 2), (95, 2), (96, 3)] {
            assert_eq!(pad(&message[..len]).count(), blocks, "len {}", len);
        }
    }

    #[test]
    fn pad_keeps_message_prefix() {
        let mut message = [0u8; 100];
        for (i, b) in message.iter_mut().enumerate() {
            *b = i as u8;
        }
        // 36 tail bytes plus the delimiter leave no room for the length.
        let mut blocks = pad(&message);
        let first = blocks.next().unwrap();
        let second = blocks.next().unwrap();
        let third = blocks.next().unwrap();
        assert!(blocks.next().is_none());
        assert_eq!(&first[..], &message[..64]);
        assert_eq!(&second[..36], &message[64..]);
        assert_eq!(second[36], DELIMITER);
        assert!(second[37..].iter().all(|&b| b == 0));
        assert!(third[..62].iter().all(|&b| b == 0));
        assert_eq!(&third[62..], &[0x03, 0x20][..]);
    }

    #[test]
    fn pad_short_tail_keeps_length_in_last_block() {
        let mut message = [0u8; 90];
        for (i, b) in message.iter_mut().enumerate() {
            *b = i as u8;
        }
        let mut blocks = pad(&message);
        let first = blocks.next().unwrap();
        let second = blocks.next().unwrap();
        assert!(blocks.next().is_none());
        assert_eq!(&first[..], &message[..64]);
        assert_eq!(&second[..26], &message[64..]);
        assert_eq!(second[26], DELIMITER);
        assert!(second[27..62].iter().all(|&b| b == 0));
        assert_eq!(&second[62..], &[0x02, 0xd0][..]);
    }
}
