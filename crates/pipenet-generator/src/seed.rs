use std::{
    fmt::{self, Display},
    str::FromStr,
};

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg64Mcg;
use sha2::{Digest as _, Sha256};

/// An error from parsing a [`BoardSeed`] hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseSeedError {
    /// The string was not exactly 64 characters long.
    #[display("seed must be 64 hex characters, got {len}")]
    InvalidLength {
        /// Characters found.
        len: usize,
    },
    /// A character was not a hex digit.
    #[display("invalid hex digit {ch:?} in seed")]
    InvalidDigit {
        /// The offending character.
        ch: char,
    },
}

/// A 32-byte generation seed, printable as 64 hex characters.
///
/// A seed pins down every random choice of the generator, so a board can be
/// reproduced (in benchmarks, bug reports, or shared puzzles) from its seed
/// string alone. The internal RNG state is derived by hashing the seed
/// bytes, so related seed strings do not produce related boards.
///
/// # Examples
///
/// ```
/// use pipenet_generator::BoardSeed;
///
/// let seed = BoardSeed::random();
/// let text = seed.to_string();
/// assert_eq!(text.len(), 64);
/// assert_eq!(text.parse::<BoardSeed>()?, seed);
/// # Ok::<(), pipenet_generator::ParseSeedError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSeed([u8; 32]);

impl BoardSeed {
    /// Draws a fresh seed from the thread-local RNG.
    #[must_use]
    pub fn random() -> Self {
        let mut bytes = [0; 32];
        rand::rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Creates a seed from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw seed bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Derives the deterministic generation RNG for this seed.
    pub(crate) fn rng(&self) -> Pcg64Mcg {
        let digest = Sha256::digest(self.0);
        let mut state = [0; 16];
        state.copy_from_slice(&digest[..16]);
        Pcg64Mcg::from_seed(state)
    }
}

impl Display for BoardSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for BoardSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 64 {
            return Err(ParseSeedError::InvalidLength { len: chars.len() });
        }
        let mut bytes = [0; 32];
        for (byte, pair) in bytes.iter_mut().zip(chars.chunks_exact(2)) {
            let hi = pair[0]
                .to_digit(16)
                .ok_or(ParseSeedError::InvalidDigit { ch: pair[0] })?;
            let lo = pair[1]
                .to_digit(16)
                .ok_or(ParseSeedError::InvalidDigit { ch: pair[1] })?;
            *byte = (hi * 16 + lo) as u8;
        }
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_parse_roundtrip() {
        let seed = BoardSeed::from_bytes([0xab; 32]);
        let text = seed.to_string();
        assert_eq!(text, "ab".repeat(32));
        assert_eq!(text.parse::<BoardSeed>().unwrap(), seed);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "ab".parse::<BoardSeed>(),
            Err(ParseSeedError::InvalidLength { len: 2 })
        );
        let bad = format!("zz{}", "ab".repeat(31));
        assert_eq!(
            bad.parse::<BoardSeed>(),
            Err(ParseSeedError::InvalidDigit { ch: 'z' })
        );
    }

    #[test]
    fn test_distinct_seeds_produce_distinct_rng_streams() {
        let mut a = BoardSeed::from_bytes([0; 32]).rng();
        let mut b = BoardSeed::from_bytes([1; 32]).rng();
        let draws_a: Vec<u32> = (0..4).map(|_| a.next_u32()).collect();
        let draws_b: Vec<u32> = (0..4).map(|_| b.next_u32()).collect();
        assert_ne!(draws_a, draws_b);
    }

    #[test]
    fn test_random_seeds_differ() {
        assert_ne!(BoardSeed::random(), BoardSeed::random());
    }
}
