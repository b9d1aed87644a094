//! S3M Container Parsing
//!
//! Decodes the Scream Tracker 3 module header, locates the instrument
//! pointer table, and parses each AdLib (OPL2) instrument record into a
//! structured form. Pattern data is never touched beyond reading its
//! pointer table.

pub mod instrument;
pub mod module;

pub use instrument::{Instrument, Operator};
pub use module::S3mModule;

use crate::Result;

/// Convenience function to decode a fully buffered S3M module
pub fn decode(data: &[u8]) -> Result<S3mModule> {
    S3mModule::decode(data)
}

/// Read a fixed-width NUL-padded string field.
///
/// S3M strings are nominally ASCII; stray high bytes are mapped through
/// as-is rather than failing the whole conversion. Padding NULs are
/// stripped from both ends, matching Scream Tracker's own display.
pub(crate) fn padded_string(bytes: &[u8]) -> String {
    let s: String = bytes.iter().map(|&b| b as char).collect();
    s.trim_matches('\0').to_string()
}
