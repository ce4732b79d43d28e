//! Gzip unpacking of downloaded payloads
//!
//! Archive entries are served as single-member gzip streams. Decoding runs
//! on the blocking thread pool so a large entry does not stall the async
//! runtime.

use flate2::read::GzDecoder;
use std::io::Read;
use std::path::Path;
use tokio::task::spawn_blocking;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Decode a single-member gzip stream held in memory
fn gunzip(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed)?;
    Ok(decompressed)
}

/// Decompress `compressed` into `output`, then delete `compressed`
///
/// Cleanup policy: the compressed intermediate is removed on every path,
/// and a partially written output file is removed when decompression or
/// the final write fails. On success only the uncompressed `output`
/// remains.
pub(crate) async fn unpack_gzip_file(compressed: &Path, output: &Path) -> Result<()> {
    let data = match tokio::fs::read(compressed).await {
        Ok(data) => data,
        Err(e) => {
            remove_quietly(compressed).await;
            return Err(Error::Io(e));
        }
    };

    let decoded = spawn_blocking(move || gunzip(&data))
        .await
        .unwrap_or_else(|e| {
            Err(std::io::Error::other(format!(
                "decompression task panicked: {e}"
            )))
        });

    let decompressed = match decoded {
        Ok(bytes) => bytes,
        Err(e) => {
            remove_quietly(compressed).await;
            return Err(Error::Decompression(format!(
                "{}: {}",
                compressed.display(),
                e
            )));
        }
    };

    if let Err(e) = tokio::fs::write(output, &decompressed).await {
        remove_quietly(compressed).await;
        remove_quietly(output).await;
        return Err(Error::Io(e));
    }

    tokio::fs::remove_file(compressed).await?;

    debug!(
        compressed = %compressed.display(),
        output = %output.display(),
        bytes = decompressed.len(),
        "unpacked gzip payload"
    );

    Ok(())
}

/// Remove a file, logging instead of failing if the removal itself errors
pub(crate) async fn remove_quietly(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "failed to remove file during cleanup");
        }
    }
}
