//! Error types for pdb-dl
//!
//! Expected per-identifier failure modes (bad accession, HTTP status,
//! transport, gzip) are ordinary `Error` values folded into a batch report;
//! only configuration problems abort a whole run.

use thiserror::Error;

/// Result type alias for pdb-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pdb-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "endpoint")
        key: Option<String>,
    },

    /// Format selector was neither `pdb` nor `cif`
    ///
    /// This is a configuration error: it is raised before any
    /// per-identifier work begins and aborts the whole batch.
    #[error("invalid file format '{0}': expected \"pdb\" or \"cif\"")]
    InvalidFormat(String),

    /// Identifier did not normalize to a 4-character accession code
    #[error(
        "invalid accession code '{input}': normalized form '{normalized}' \
         is {length} characters, expected 4"
    )]
    InvalidAccession {
        /// The raw identifier as supplied by the caller
        input: String,
        /// The identifier after trimming, suffix removal, and lowercasing
        normalized: String,
        /// Character length of the normalized form
        length: usize,
    },

    /// Remote archive answered with a non-success HTTP status
    #[error("archive returned HTTP {status} for {url}")]
    HttpStatus {
        /// The HTTP status code returned by the archive
        status: reqwest::StatusCode,
        /// The remote URL that was requested
        url: String,
    },

    /// Network-level failure (connection refused, DNS, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Downloaded payload was not a well-formed gzip stream
    #[error("decompression failed: {0}")]
    Decompression(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error aborts a whole batch rather than a single item
    ///
    /// Only configuration errors (including a bad format selector) are
    /// fatal; everything else is isolated to the identifier it occurred on.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Config { .. } | Error::InvalidFormat(_))
    }
}
