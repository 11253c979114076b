//! Files Command
//!
//! Streaming file hashing, one `HEX  PATH` line per file.

use super::HexCase;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;
use whirlpool::Hasher;

// =============================================================================
// FILES
// =============================================================================

/// Hash every file in `files` and print the results in order.
///
/// Failures are reported per file; the command fails if any file failed.
pub fn hash_files(files: &[PathBuf], case: HexCase) -> Result<()> {
    let mut failed = 0;

    for path in files {
        match hash_file(path) {
            Ok(digest) => println!("{}  {}", case.render(&digest), path.display()),
            Err(e) => {
                eprintln!("Error: {}: {:#}", path.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("Failed to hash {} file(s)", failed);
    }

    Ok(())
}

fn hash_file(path: &Path) -> Result<[u8; whirlpool::DIGEST_SIZE]> {
    let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    let (digest, len) = hash_reader(file)?;
    debug!(path = %path.display(), len, "hashed file");
    Ok(digest)
}

/// Drain `reader` through a [`Hasher`]. Returns the digest and byte count.
fn hash_reader<R: Read>(mut reader: R) -> Result<([u8; whirlpool::DIGEST_SIZE], u64)> {
    let mut hasher = Hasher::new();
    hasher.init();

    let mut buffer = [0u8; 128 * 1024]; // 128 KB buffer
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("Read error"),
        };
        hasher.add(&buffer[..n])?;
        total += n as u64;
    }

    hasher.finalize()?;
    Ok((hasher.digest()?, total))
}
