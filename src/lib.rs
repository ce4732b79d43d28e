//! # pdb-dl
//!
//! Batch downloader for protein structure files from the PDB archive.
//!
//! Given one or more four-character accession codes, pdb-dl builds the
//! remote address for each entry, retrieves the gzip-compressed PDB or
//! mmCIF file over HTTPS, unpacks it, and leaves the uncompressed file on
//! disk under a predictable name (`1abc.pdb` / `1abc.cif`). The compressed
//! intermediate is removed once unpacking succeeds.
//!
//! ## Design Philosophy
//!
//! pdb-dl is designed to be:
//! - **Library-first** - the `pdb-dl` binary is a thin wrapper over
//!   [`StructureFetcher`]
//! - **Strictly sequential** - identifiers are processed one at a time, in
//!   input order, with a single in-flight request
//! - **Failure-isolated** - one bad identifier never aborts the rest of a
//!   batch; the batch report carries a typed result per identifier
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdb_dl::{Config, FileFormat, StructureFetcher};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let fetcher = StructureFetcher::new(Config::default()).await?;
//!
//!     let report = fetcher.fetch_all(["1ABC", "4hhb.pdb"], FileFormat::Pdb).await;
//!     for outcome in &report.outcomes {
//!         match &outcome.result {
//!             Ok(path) => println!("{} -> {}", outcome.identifier, path.display()),
//!             Err(e) => eprintln!("{} failed: {}", outcome.identifier, e),
//!         }
//!     }
//!
//!     assert!(report.all_succeeded());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Accession code normalization
pub mod accession;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Gzip unpacking of downloaded payloads
pub mod extraction;
/// Core structure file retrieval
pub mod fetcher;
/// Identifier input resolution (single code vs. list file)
pub mod input;
/// Core types and batch reporting
pub mod types;

// Re-export commonly used types
pub use accession::AccessionCode;
pub use config::Config;
pub use error::{Error, Result};
pub use fetcher::StructureFetcher;
pub use input::collect_identifiers;
pub use types::{BatchReport, FetchOutcome, FileFormat};
