//! CLI Commands

mod files;
mod line;

pub use files::hash_files;
pub use line::hash_line;

/// Letter case of the rendered hex digest.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HexCase {
    Upper,
    Lower,
}

impl HexCase {
    /// Renders `digest` as hex without separators.
    pub fn render(self, digest: &[u8]) -> String {
        match self {
            HexCase::Upper => hex::encode_upper(digest),
            HexCase::Lower => hex::encode(digest),
        }
    }
}
