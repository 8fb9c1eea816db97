use std::path::Path;

use tracing::debug;

use crate::{Extraction, ShamirError, ShareScanner};

/// Scan `text` for `n`, `k` and share entries.
///
/// Malformed entries are collected in `Extraction::rejected` and do not stop
/// the scan.
pub fn extract_shares(text: &str) -> Result<Extraction, ShamirError> {
    let mut scanner = ShareScanner::new();
    for line in text.lines() {
        scanner.feed_line(line);
    }
    let extraction = scanner.finish()?;
    debug!(
        n = ?extraction.parameters.n,
        k = extraction.parameters.k,
        accepted = extraction.shares.len(),
        rejected = extraction.rejected.len(),
        "extracted shares"
    );
    Ok(extraction)
}

/// Read the whole file, then scan it.
pub fn extract_shares_from_file(path: impl AsRef<Path>) -> Result<Extraction, ShamirError> {
    let text = std::fs::read_to_string(path)?;
    extract_shares(&text)
}
