//! S3M AdLib instrument record parser
//!
//! An S3M instrument record holds a 12-byte OPL2 parameter block at offset
//! 16: five register bytes per operator, interleaved (modulator at even
//! offsets, carrier at odd), followed by the shared feedback/connection
//! byte and a wave-select pair.
//!
//! The decoded per-field values exist for inspection and testing; the WOPL
//! writer consumes only the verbatim `raw` register bytes, so re-encoding
//! is lossless by construction.

use super::padded_string;
use crate::Result;

/// One OPL2 operator (modulator or carrier) of a 2-operator voice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    /// Amplitude modulation (tremolo) enabled
    pub tremolo: bool,
    /// Frequency vibrato enabled
    pub vibrato: bool,
    /// Sustaining envelope (hold at sustain level until key-off)
    pub sustain_sound: bool,
    /// Envelope scaling with key (KSR)
    pub scale_env: bool,
    /// Frequency multiplier, 4 bits
    pub freq_mult: u8,
    /// Key scale level, 2 bits
    pub level_scaling: u8,
    /// Output level, 0..=63; the register stores it inverted, this is the
    /// re-inverted (louder-is-larger) value
    pub volume: u8,
    /// Attack rate, 4 bits
    pub attack: u8,
    /// Decay rate, 4 bits
    pub decay: u8,
    /// Sustain level, 4 bits; re-inverted like `volume`
    pub sustain: u8,
    /// Release rate, 4 bits
    pub release: u8,
    /// Waveform select
    pub wave_select: u8,
    /// The operator's five register bytes exactly as stored in the module.
    /// This is what the WOPL writer emits; the decoded fields above are
    /// never re-packed.
    pub raw: [u8; 5],
}

impl Operator {
    /// Decode one operator from the 12-byte OPL2 block.
    ///
    /// `offset` is 0 for the modulator, 1 for the carrier; each operator's
    /// bytes sit two apart within the block.
    fn decode(opl: &[u8; 12], offset: usize) -> Operator {
        let flags = opl[offset];
        let ksl = opl[offset + 2];
        let ad = opl[offset + 4];
        let sr = opl[offset + 6];

        Operator {
            tremolo: flags & 0x80 != 0,
            vibrato: flags & 0x40 != 0,
            sustain_sound: flags & 0x20 != 0,
            scale_env: flags & 0x10 != 0,
            freq_mult: flags & 0x0f,
            level_scaling: (ksl & 0xc0) >> 6,
            volume: 63 - (ksl & 0x3f),
            attack: ad >> 4,
            decay: ad & 0x0f,
            sustain: 15 - (sr >> 4),
            release: sr & 0x0f,
            wave_select: opl[offset + 8],
            raw: [flags, ksl, ad, sr, opl[offset + 8]],
        }
    }
}

/// One decoded S3M instrument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrument {
    /// Raw type byte from the record. 2 marks an AdLib melody instrument;
    /// the converter does not branch on it and treats every record as OPL.
    pub inst_type: u8,
    /// DOS filename field, informational only
    pub filename: String,
    /// Instrument title; may embed `[n]` / `<n>` placement overrides
    pub title: String,
    /// Feedback amount, upper 3 bits of the feedback/connection byte
    pub feedback: u8,
    /// Connection bit: true for additive synthesis, false for FM
    pub connection: bool,
    /// The feedback/connection byte verbatim; this is what the WOPL writer
    /// emits, not a re-derivation from `feedback`/`connection`
    pub fbconn_raw: u8,
    /// Default playback volume, unused by the writer
    pub volume: u8,
    /// Middle-C sample rate, unused by the writer
    pub c2spd: u32,
    /// Carrier operator (second operator slot in the OPL2 block)
    pub carrier: Operator,
    /// Modulator operator (first operator slot in the OPL2 block)
    pub modulator: Operator,
}

impl Instrument {
    /// Bytes of an instrument record this parser reads (through the title)
    const RECORD_SIZE: usize = 64;

    /// Decode the instrument record starting at `pointer`
    pub fn decode(data: &[u8], pointer: usize) -> Result<Instrument> {
        let end = pointer
            .checked_add(Self::RECORD_SIZE)
            .ok_or("S3M instrument pointer overflow")?;
        if end > data.len() {
            return Err(format!(
                "S3M instrument record at offset {} extends beyond file ({} bytes)",
                pointer,
                data.len()
            )
            .into());
        }
        let rec = &data[pointer..end];

        let mut opl = [0u8; 12];
        opl.copy_from_slice(&rec[16..28]);
        let fbconn = opl[10];

        Ok(Instrument {
            inst_type: rec[0],
            filename: padded_string(&rec[1..13]),
            title: padded_string(&rec[36..64]),
            feedback: fbconn >> 1,
            connection: fbconn & 1 != 0,
            fbconn_raw: fbconn,
            volume: rec[28],
            c2spd: u32::from_le_bytes([rec[32], rec[33], rec[34], rec[35]]),
            carrier: Operator::decode(&opl, 1),
            modulator: Operator::decode(&opl, 0),
        })
    }
}
