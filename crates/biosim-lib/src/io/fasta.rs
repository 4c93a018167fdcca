use std::path::Path;

use crate::error::LoadError;

/// Concatenate the sequence lines of a FASTA document, skipping `>` header lines.
pub fn parse_fasta(text: &str) -> String {
    text.lines()
        .filter(|line| !line.starts_with('>'))
        .map(str::trim)
        .collect()
}

/// Read a FASTA file from disk.
pub fn read_fasta(path: &Path) -> Result<String, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_fasta(&text))
}
