//! Core structure file retrieval
//!
//! [`StructureFetcher`] turns an accession code and a format into an
//! uncompressed file on disk: it builds the remote URL, streams the gzip
//! payload over HTTP(S), unpacks it, and removes the compressed
//! intermediate. [`StructureFetcher::fetch_all`] drives a whole batch of
//! identifiers through that path, strictly sequentially and without
//! fail-fast.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::accession::AccessionCode;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::extraction;
use crate::types::{BatchReport, FetchOutcome, FileFormat};

/// Downloads compressed structure files from the archive and unpacks them
///
/// One fetcher holds a single [`reqwest::Client`] (with the configured
/// request timeout) that is reused across identifiers. The fetcher is
/// cheaply cloneable; clones share the client and configuration.
#[derive(Clone)]
pub struct StructureFetcher {
    client: reqwest::Client,
    config: Arc<Config>,
}

impl StructureFetcher {
    /// Create a new fetcher from the given configuration
    ///
    /// Validates the configuration, creates the download directory if it
    /// does not exist, and builds the shared HTTP client.
    pub async fn new(config: Config) -> Result<Self> {
        config.validate()?;

        tokio::fs::create_dir_all(&config.download_dir)
            .await
            .map_err(|e| {
                Error::Io(std::io::Error::new(
                    e.kind(),
                    format!(
                        "failed to create download directory '{}': {}",
                        config.download_dir.display(),
                        e
                    ),
                ))
            })?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// The configuration this fetcher was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Remote URL for one accession code in the given format
    fn remote_url(&self, code: &AccessionCode, format: FileFormat) -> String {
        format!(
            "{}/{}{}.gz",
            self.config.endpoint.trim_end_matches('/'),
            code,
            format.suffix()
        )
    }

    /// Retrieve one structure file and unpack it
    ///
    /// Issues a single GET for `<endpoint>/<code><suffix>.gz`, streams the
    /// body to `<code><suffix>.gz` in the download directory, decompresses
    /// it into `<code><suffix>`, and deletes the compressed intermediate.
    /// Returns the path of the uncompressed output file.
    ///
    /// A non-success HTTP status fails before any file is created. On any
    /// failure after the download began, the compressed intermediate and a
    /// partially written output file are removed, so a failed fetch leaves
    /// no usable or half-written output behind. Repeating a successful
    /// fetch overwrites the previous output deterministically.
    pub async fn fetch(&self, code: &AccessionCode, format: FileFormat) -> Result<PathBuf> {
        let url = self.remote_url(code, format);
        let file_name = format!("{}{}", code, format.suffix());
        let compressed = self.config.download_dir.join(format!("{file_name}.gz"));
        let output = self.config.download_dir.join(&file_name);

        debug!(code = %code, %url, "requesting structure file");

        let mut response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                warn!(code = %code, %url, timeout_secs = self.config.request_timeout_secs, "request timed out");
            } else if e.is_connect() {
                warn!(code = %code, %url, "connection failed");
            }
            Error::Network(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus { status, url });
        }

        // Stream the body to the compressed intermediate, overwriting any
        // previous download of the same entry.
        let mut file = tokio::fs::File::create(&compressed).await?;
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    if let Err(e) = file.write_all(&chunk).await {
                        drop(file);
                        extraction::remove_quietly(&compressed).await;
                        return Err(Error::Io(e));
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    drop(file);
                    extraction::remove_quietly(&compressed).await;
                    return Err(Error::Network(e));
                }
            }
        }
        if let Err(e) = file.flush().await {
            drop(file);
            extraction::remove_quietly(&compressed).await;
            return Err(Error::Io(e));
        }
        drop(file);

        extraction::unpack_gzip_file(&compressed, &output).await?;

        info!(code = %code, format = %format, output = %output.display(), "structure file retrieved");
        Ok(output)
    }

    /// Fetch every identifier in the batch, in input order
    ///
    /// Each raw identifier is normalized first; a normalization failure is
    /// recorded and the batch moves on. One identifier's failure never
    /// halts processing of subsequent identifiers. The returned report
    /// carries one typed outcome per identifier, and
    /// [`BatchReport::all_succeeded`] is true only if every identifier both
    /// normalized and fetched successfully.
    pub async fn fetch_all<I, S>(&self, identifiers: I, format: FileFormat) -> BatchReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = BatchReport::default();

        for raw in identifiers {
            let raw = raw.as_ref();
            let result = match AccessionCode::parse(raw) {
                Ok(code) => self.fetch(&code, format).await,
                Err(e) => Err(e),
            };

            if let Err(ref e) = result {
                warn!(identifier = raw, error = %e, "failed to retrieve structure file");
            }

            report.outcomes.push(FetchOutcome {
                identifier: raw.to_string(),
                result,
            });
        }

        info!(
            total = report.outcomes.len(),
            succeeded = report.succeeded(),
            failed = report.failed(),
            "batch complete"
        );
        report
    }
}
