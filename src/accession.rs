//! Accession code normalization
//!
//! Raw identifiers arrive in mixed case, with surrounding whitespace, and
//! sometimes with a `.pdb`/`.cif` extension left over from a filename.
//! [`AccessionCode::parse`] reduces all of those to the canonical
//! 4-character lowercase form the archive is keyed by, rejecting anything
//! else before a network call is made.

use crate::error::{Error, Result};

/// Canonical 4-character lowercase accession code
///
/// Can only be constructed through [`AccessionCode::parse`], so holding one
/// guarantees the length and casing invariants.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AccessionCode(String);

impl AccessionCode {
    /// Required length of a normalized accession code
    pub const LENGTH: usize = 4;

    /// Normalize a raw identifier into a canonical accession code
    ///
    /// Strips leading/trailing whitespace, removes a literal `.pdb` or
    /// `.cif` suffix (case-sensitive match on the suffix only), and
    /// lower-cases the remainder. Fails with
    /// [`Error::InvalidAccession`] unless exactly 4 characters remain, so
    /// `"1ABC.pdb"`, `"1abc"`, and `"  1ABC  "` all normalize to `"1abc"`
    /// while `"1ABCDE"` is rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let stripped = trimmed
            .strip_suffix(".pdb")
            .or_else(|| trimmed.strip_suffix(".cif"))
            .unwrap_or(trimmed);
        let normalized = stripped.to_lowercase();

        let length = normalized.chars().count();
        if length != Self::LENGTH {
            return Err(Error::InvalidAccession {
                input: raw.to_string(),
                normalized,
                length,
            });
        }

        Ok(Self(normalized))
    }

    /// The normalized code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AccessionCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccessionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AccessionCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
