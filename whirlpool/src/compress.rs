use crate::consts::{Tables, BLOCK_SIZE, ROUNDS, TABLES};

/// Whirlpool compression function.
///
/// Runs the 10-round block cipher keyed by the chaining value `state` over
/// `block` and folds the result back into `state` (Miyaguchi-Preneel).
pub(crate) fn compress(state: &mut [u64; 8], block: &[u8; BLOCK_SIZE]) {
    let tables = &TABLES;

    let mut msg = [0u64; 8];
    for (word, chunk) in msg.iter_mut().zip(block.chunks_exact(8)) {
        *word = chunk.iter().fold(0, |acc, &b| (acc << 8) | u64::from(b));
    }

    let mut key = *state;
    let mut cipher = [0u64; 8];
    for i in 0..8 {
        cipher[i] = msg[i] ^ key[i];
    }

    for r in 0..ROUNDS {
        key = mix(tables, &key);
        key[0] ^= tables.rc[r];

        let mixed = mix(tables, &cipher);
        for i in 0..8 {
            cipher[i] = mixed[i] ^ key[i];
        }
    }

    for i in 0..8 {
        state[i] ^= cipher[i] ^ msg[i];
    }
}

/// Combined substitution, cyclical permutation and linear diffusion layer.
///
/// Output word `i` takes byte `t` of input word `(i - t) mod 8` for every `t`.
#[inline(always)]
fn mix(tables: &Tables, input: &[u64; 8]) -> [u64; 8] {
    let mut out = [0u64; 8];
    for (i, word) in out.iter_mut().enumerate() {
        for t in 0..8 {
            let b = (input[(i + 8 - t) & 7] >> (56 - 8 * t)) as u8;
            *word ^= tables.c[t][b as usize];
        }
    }
    out
}
