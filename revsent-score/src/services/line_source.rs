//! Line-delimited review source
//!
//! Reads the input file into raw byte lines. Decoding is left to the parser so
//! that a badly encoded line only drops that line.

use revsent_common::record::RawLine;
use revsent_common::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read every line of `path`
///
/// Missing file is [`Error::SourceNotFound`]. Trailing `\r` is stripped.
pub fn read_lines(path: &Path) -> Result<Vec<RawLine>> {
    if !path.exists() {
        return Err(Error::SourceNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut lines = Vec::new();
    for chunk in reader.split(b'\n') {
        let mut bytes = chunk?;
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        lines.push(RawLine(bytes));
    }

    tracing::debug!("Read {} lines from {}", lines.len(), path.display());
    Ok(lines)
}
