//! Line Command
//!
//! Hash a single line of text read from stdin.

use super::HexCase;
use anyhow::{Context, Result};
use std::io::BufRead;
use tracing::{debug, warn};

// =============================================================================
// LINE
// =============================================================================

/// Read one line from `reader` and return its rendered digest.
///
/// The line terminator is not hashed. End of input counts as an empty line.
/// Invalid UTF-8 is decoded lossily, so every bad sequence hashes as `?`.
pub fn hash_line<R: BufRead>(reader: &mut R, case: HexCase) -> Result<String> {
    let mut raw = Vec::new();
    let read = reader
        .read_until(b'\n', &mut raw)
        .context("Failed to read line from stdin")?;
    if read == 0 {
        debug!("stdin closed before a line was read, hashing empty input");
    }

    let line = String::from_utf8_lossy(&raw);
    let text = trim_newline(&line);
    let (bytes, replaced) = to_ascii(text);
    if replaced > 0 {
        warn!(replaced, "non-ASCII characters replaced with '?'");
    }
    debug!(len = bytes.len(), "hashing line");

    Ok(case.render(&whirlpool::hash(&bytes)))
}

/// Strip a trailing `\n` or `\r\n`.
fn trim_newline(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Encode `text` with one byte per character, replacing anything outside
/// ASCII with `?`. Returns the bytes and the number of replacements.
fn to_ascii(text: &str) -> (Vec<u8>, usize) {
    let mut replaced = 0;
    let bytes = text
        .chars()
        .map(|c| {
            if c.is_ascii() {
                c as u8
            } else {
                replaced += 1;
                b'?'
            }
        })
        .collect();
    (bytes, replaced)
}
