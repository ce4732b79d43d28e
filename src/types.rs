//! Core types for pdb-dl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Error;

/// Structure file format served by the archive
///
/// Selects both the remote resource suffix and the local output extension.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// Legacy PDB text format
    #[default]
    Pdb,
    /// mmCIF structured text format
    Cif,
}

impl FileFormat {
    /// Filename suffix for this format (`.pdb` or `.cif`)
    ///
    /// The remote resource is this suffix plus `.gz`; the local output file
    /// carries the suffix alone.
    pub fn suffix(&self) -> &'static str {
        match self {
            FileFormat::Pdb => ".pdb",
            FileFormat::Cif => ".cif",
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileFormat::Pdb => write!(f, "pdb"),
            FileFormat::Cif => write!(f, "cif"),
        }
    }
}

impl std::str::FromStr for FileFormat {
    type Err = Error;

    /// Parse a format selector, case-insensitively
    ///
    /// Anything other than `pdb` or `cif` is a configuration error that
    /// aborts the whole batch before any per-identifier work.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdb" => Ok(FileFormat::Pdb),
            "cif" => Ok(FileFormat::Cif),
            _ => Err(Error::InvalidFormat(s.to_string())),
        }
    }
}

/// Outcome of one identifier in a batch
///
/// Carries either the path of the uncompressed output file, or the error
/// that stopped this identifier. Expected failure modes are values here,
/// never propagated exceptions, so a batch can report them all.
#[derive(Debug)]
pub struct FetchOutcome {
    /// The raw identifier as supplied by the caller (before normalization)
    pub identifier: String,
    /// Local path of the uncompressed file, or the per-item failure
    pub result: Result<PathBuf, Error>,
}

impl FetchOutcome {
    /// Whether this identifier was retrieved and unpacked successfully
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Report for a whole batch, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Per-identifier outcomes, one per requested identifier, input order
    pub outcomes: Vec<FetchOutcome>,
}

impl BatchReport {
    /// True only if every identifier both normalized and fetched successfully
    ///
    /// Vacuously true for an empty batch.
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(FetchOutcome::is_success)
    }

    /// Number of identifiers that succeeded
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of identifiers that failed
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}
