//! Result sink: writes the accepted set to its output file
//!
//! One `host:port` per line, newline-terminated, no header or footer.
//! The write is a full-file overwrite performed once, after validation
//! has finished, so a crash mid-run never leaves a partial file behind.

use crate::proxy::models::ProxyCandidate;
use crate::Result;
use anyhow::Context;
use std::path::Path;

/// Overwrite `path` with the accepted set, sorted for stable diffs
/// between runs (membership is a set; any order satisfies consumers).
pub fn save_accepted<P: AsRef<Path>>(path: P, accepted: &[ProxyCandidate]) -> Result<()> {
    let path = path.as_ref();

    let mut lines: Vec<String> = accepted.iter().map(|c| c.to_string()).collect();
    lines.sort();

    let mut content = lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }

    std::fs::write(path, content).with_context(|| format!("writing output file {:?}", path))?;
    Ok(())
}
