//! File-level conversion entry point
//!
//! Reads a whole S3M file, decodes its instruments, and writes the WOPL
//! bank through a temporary file in the destination directory so a failed
//! conversion never leaves a truncated bank behind. Stateless: repeated
//! invocations over identical input produce identical output, which is
//! what lets watch-mode wrappers simply call this again on every change
//! event.

use crate::{s3m_parser, wopl_writer, ConvertError, Result};
use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Convert an S3M file into a WOPL bank file.
///
/// When `dest` is `None` the destination is the source path with its
/// extension replaced by `wopl`. Returns the path actually written.
pub fn convert<P: AsRef<Path>>(source: P, dest: Option<&Path>) -> Result<PathBuf> {
    let source = source.as_ref();
    let dest = match dest {
        Some(path) => path.to_path_buf(),
        None => source.with_extension("wopl"),
    };

    let data = fs::read(source)?;
    debug!("read {} bytes from {}", data.len(), source.display());

    let module = s3m_parser::decode(&data)?;
    let bank = wopl_writer::encode(&module.instruments);

    write_atomic(&dest, &bank)?;
    info!(
        "converted {} instruments from {} to {}",
        module.instruments.len(),
        source.display(),
        dest.display()
    );
    Ok(dest)
}

/// Write `bytes` to `dest` via a temp file in the same directory, so the
/// rename stays on one filesystem and the destination is never partial
fn write_atomic(dest: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.persist(dest).map_err(|e| ConvertError::Io(e.error))?;
    Ok(())
}
