//! Configuration types for pdb-dl

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};

/// Configuration for [`StructureFetcher`](crate::fetcher::StructureFetcher)
///
/// The endpoint is an injected value rather than a process-wide constant so
/// that embedders and tests can point the fetcher at a mirror or a mock
/// server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Archive endpoint root (default: the RCSB download service)
    ///
    /// The remote resource for an accession code is
    /// `<endpoint>/<code><suffix>.gz`, format-independent. Must be an
    /// `http` or `https` URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Directory downloaded files are written into (default: ".")
    ///
    /// Created on fetcher construction if it does not exist.
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Per-request timeout in seconds (default: 30)
    ///
    /// Bounds every GET issued by the fetcher. There are no automatic
    /// retries; a timed-out identifier is reported as a failure.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            download_dir: default_download_dir(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    /// Per-request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    ///
    /// Checks that the endpoint parses as an `http`/`https` URL and that
    /// the timeout is nonzero. Called by the fetcher on construction.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.endpoint).map_err(|e| Error::Config {
            message: format!("invalid endpoint URL '{}': {}", self.endpoint, e),
            key: Some("endpoint".to_string()),
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::Config {
                    message: format!(
                        "endpoint scheme must be http or https, got '{other}'"
                    ),
                    key: Some("endpoint".to_string()),
                });
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(Error::Config {
                message: "request_timeout_secs must be nonzero".to_string(),
                key: Some("request_timeout_secs".to_string()),
            });
        }

        Ok(())
    }
}

fn default_endpoint() -> String {
    "https://files.rcsb.org/download".to_string()
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_request_timeout_secs() -> u64 {
    30
}
