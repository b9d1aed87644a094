//! WOPL3 bank serializer
//!
//! File layout (multi-byte fields big-endian unless noted):
//! - Magic `WOPL3-BANK\0`, u16 LE version (3)
//! - u16 melodic bank count (1), u16 percussion bank count (0 or 1),
//!   two reserved bytes
//! - One 34-byte bank-name record per bank
//! - Per bank: 128 × (62-byte instrument record + 4 delay bytes)
//!
//! Instrument records carry the raw S3M register bytes straight through
//! (`fbconn_raw`, `Operator::raw`); nothing is re-packed from decoded
//! fields.

use super::slots::BankLayout;
use crate::s3m_parser::Instrument;

const MAGIC: &[u8; 11] = b"WOPL3-BANK\0";
const VERSION: u16 = 3;

const SLOTS_PER_BANK: usize = 128;
const BANK_NAME_SIZE: usize = 34;
const RECORD_SIZE: usize = 62;
/// Version-3 key-on/key-off delay fields, not derivable from S3M
const DELAY_FIELD_SIZE: usize = 4;

/// Record flag marking an empty slot
const FLAG_INACTIVE: u8 = 4;
/// Fixed base note for percussion-bank entries
const PERCUSSION_BASE_KEY: u8 = 24;

/// Serialize a WOPL3 bank from decoded instruments.
///
/// Infallible: all writes are fixed-size and slot selection is total
/// (empty slots get a placeholder record). Identical input always yields
/// identical output.
pub fn encode(instruments: &[Instrument]) -> Vec<u8> {
    let layout = BankLayout::assign(instruments);
    let banks = if layout.has_percussion() { 2 } else { 1 };

    let mut out = Vec::with_capacity(
        MAGIC.len() + 8 + banks * (BANK_NAME_SIZE + SLOTS_PER_BANK * (RECORD_SIZE + DELAY_FIELD_SIZE)),
    );

    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&1u16.to_be_bytes()); // melodic bank count
    out.extend_from_slice(&(layout.has_percussion() as u16).to_be_bytes());
    out.extend_from_slice(&[0, 0]); // reserved

    push_bank_name(&mut out, b"melodic");
    if layout.has_percussion() {
        push_bank_name(&mut out, b"percussion");
    }

    for slot in 0..SLOTS_PER_BANK {
        push_record(&mut out, layout.melodic_slot(slot), 0);
        out.extend_from_slice(&[0; DELAY_FIELD_SIZE]);
    }
    if layout.has_percussion() {
        for key in 0..SLOTS_PER_BANK {
            push_record(&mut out, layout.percussion_slot(key), PERCUSSION_BASE_KEY);
            out.extend_from_slice(&[0; DELAY_FIELD_SIZE]);
        }
    }

    out
}

/// 32-byte bank name plus LSB/MSB bank indices (zero, single bank)
fn push_bank_name(out: &mut Vec<u8>, name: &[u8]) {
    push_padded(out, name, 32);
    out.extend_from_slice(&[0, 0]);
}

/// Write `bytes` truncated or NUL-padded to exactly `width` bytes
fn push_padded(out: &mut Vec<u8>, bytes: &[u8], width: usize) {
    let n = bytes.len().min(width);
    out.extend_from_slice(&bytes[..n]);
    out.resize(out.len() + width - n, 0);
}

/// One 62-byte instrument record; `percussion_key` is 0 in the melodic
/// bank and the fixed base note in the percussion bank
fn push_record(out: &mut Vec<u8>, inst: Option<&Instrument>, percussion_key: u8) {
    let Some(inst) = inst else {
        push_padded(out, b"undefined", 32);
        out.extend_from_slice(&[0; 7]);
        out.push(FLAG_INACTIVE);
        out.extend_from_slice(&[0; 22]);
        return;
    };

    push_padded(out, inst.title.as_bytes(), 32);
    out.extend_from_slice(&0i16.to_be_bytes()); // first voice key offset
    out.extend_from_slice(&0i16.to_be_bytes()); // second voice key offset
    out.push(0); // velocity offset
    out.push(0); // second voice detune
    out.push(percussion_key);
    out.push(0); // flags
    out.push(inst.fbconn_raw); // first voice feedback/connection
    out.push(0); // second voice feedback/connection
    out.extend_from_slice(&inst.carrier.raw);
    out.extend_from_slice(&inst.modulator.raw);
    out.extend_from_slice(&[0; 10]); // second voice operators, unused
}
