//! Serializing a [`RunResult`] to JSON, on stdout or into a file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use holehe_common::Result;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::debug;

use crate::aggregate::RunResult;

const INDENT: &[u8] = b"    ";

/// Pretty JSON with four-space indentation. Non-ASCII text is kept as is.
pub fn render(result: &RunResult) -> Result<String> {
    let mut buf: Vec<u8> = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    result.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Writes `result` to `path` when given, then reports the resolved path on `out`.
/// Without a path the JSON itself goes to `out`.
///
/// Returns the absolute path of the written file, if any.
pub fn emit<W: Write>(result: &RunResult, path: Option<&Path>, out: &mut W) -> Result<Option<PathBuf>> {
    let json: String = render(result)?;

    match path {
        Some(path) => {
            fs::write(path, json.as_bytes())?;
            let resolved: PathBuf = fs::canonicalize(path)?;
            debug!("wrote {} bytes to {}", json.len(), resolved.display());
            writeln!(out, "{}", resolved.display())?;
            Ok(Some(resolved))
        }
        None => {
            writeln!(out, "{json}")?;
            Ok(None)
        }
    }
}
