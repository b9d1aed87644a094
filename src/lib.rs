//! S3M to WOPL instrument-bank converter
//!
//! Extracts the AdLib (OPL2) instrument definitions from a Scream Tracker 3
//! module and re-encodes them as a WOPL3 FM bank, the format used by
//! libADLMIDI-style OPL playback engines.
//!
//! Only instrument data is converted; orders, patterns, and channel settings
//! are read just far enough to locate the instrument pointer table.
//!
//! # Program assignment
//! Instrument titles may embed placement overrides:
//! - `[n]` assigns the instrument to melodic program `n` (1-based)
//! - `<n>` assigns the instrument to percussion key `n` (0-based)
//!
//! Instruments without a `[n]` override fall back to their position in the
//! module's instrument list. A percussion bank is emitted only when at least
//! one `<n>` override is present.
//!
//! # Quick start
//! ## In-memory conversion
//! ```no_run
//! use s3m2wopl::{s3m_parser, wopl_writer};
//! let data = std::fs::read("song.s3m").unwrap();
//! let module = s3m_parser::decode(&data).unwrap();
//! let bank = wopl_writer::encode(&module.instruments);
//! std::fs::write("song.wopl", bank).unwrap();
//! ```
//!
//! ## File to file
//! ```no_run
//! use s3m2wopl::convert;
//! // Destination derived from the source: song.s3m -> song.wopl
//! let written = convert("song.s3m", None).unwrap();
//! println!("wrote {}", written.display());
//! ```

#![warn(missing_docs)]

// Domain modules
pub mod converter; // File-level conversion entry point
pub mod s3m_parser; // S3M container parsing
pub mod wopl_writer; // WOPL3 bank serialization

/// Error types for conversion operations
#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    /// Malformed source data: a field or table extends past the buffer end
    #[error("Format error: {0}")]
    Format(String),

    /// IO error from the filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<String> for ConvertError {
    /// Converts a String into `ConvertError::Format`.
    ///
    /// Parsing code reports malformed input as plain strings
    /// (`return Err("...".into())`); everything funnels into the
    /// `Format` variant.
    fn from(msg: String) -> Self {
        ConvertError::Format(msg)
    }
}

impl From<&str> for ConvertError {
    /// Converts a string slice into `ConvertError::Format`.
    fn from(msg: &str) -> Self {
        ConvertError::Format(msg.to_string())
    }
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

// Public API exports
pub use converter::convert;
pub use s3m_parser::{Instrument, Operator, S3mModule};
pub use wopl_writer::{encode, BankLayout, SlotHints};
