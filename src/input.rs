//! Identifier input resolution (single code vs. list file)

use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};

/// Resolve a caller-supplied argument into raw identifier strings
///
/// If `arg` names an existing file, each non-empty line of that file is one
/// identifier (leading/trailing whitespace per line is stripped); otherwise
/// `arg` itself is treated as the sole identifier. The returned strings are
/// raw — normalization happens per identifier during the batch.
pub async fn collect_identifiers(arg: &str) -> Result<Vec<String>> {
    let path = Path::new(arg);

    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => {
            let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                Error::Io(std::io::Error::new(
                    e.kind(),
                    format!("failed to read identifier list '{}': {}", path.display(), e),
                ))
            })?;

            let identifiers: Vec<String> = content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect();

            debug!(
                path = %path.display(),
                count = identifiers.len(),
                "read identifier list from file"
            );
            Ok(identifiers)
        }
        _ => Ok(vec![arg.trim().to_string()]),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_literal_identifier_passes_through() {
        let ids = collect_identifiers("1ABC").await.unwrap();
        assert_eq!(ids, vec!["1ABC".to_string()]);
    }

    #[tokio::test]
    async fn test_literal_identifier_is_trimmed() {
        let ids = collect_identifiers("  4hhb ").await.unwrap();
        assert_eq!(ids, vec!["4hhb".to_string()]);
    }

    #[tokio::test]
    async fn test_file_of_identifiers_splits_lines() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1ABC").unwrap();
        writeln!(file, "  4hhb.pdb  ").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "2xyz").unwrap();

        let arg = file.path().to_str().unwrap();
        let ids = collect_identifiers(arg).await.unwrap();
        assert_eq!(
            ids,
            vec![
                "1ABC".to_string(),
                "4hhb.pdb".to_string(),
                "2xyz".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_file_of_only_blank_lines_yields_empty_batch() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "   ").unwrap();
        writeln!(file).unwrap();

        let arg = file.path().to_str().unwrap();
        let ids = collect_identifiers(arg).await.unwrap();
        assert!(ids.is_empty());
    }
}
