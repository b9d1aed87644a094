//! S3M module header and pointer-table parser
//!
//! Layout of the parts this converter cares about:
//! - Header: 96 bytes (28-byte title, counters at offset 32)
//! - Order list: `num_orders` bytes
//! - Instrument pointer table: `num_instruments` u16 LE paragraph offsets
//! - Pattern pointer table: `num_patterns` u16 LE paragraph offsets
//!
//! Pointers are stored in 16-byte paragraph units and multiplied out to
//! byte offsets here. All multi-byte integers are little-endian.

use super::{padded_string, Instrument};
use crate::Result;

/// A decoded S3M module, reduced to its instrument content
#[derive(Debug, Clone)]
pub struct S3mModule {
    /// Module title from the header, display-only
    pub title: String,
    /// Number of entries in the order list
    pub num_orders: u16,
    /// Number of instrument records
    pub num_instruments: u16,
    /// Number of pattern records
    pub num_patterns: u16,
    /// Absolute byte offset of each instrument record, in file order
    pub instrument_pointers: Vec<usize>,
    /// Absolute byte offset of each pattern record; located but never read
    pub pattern_pointers: Vec<usize>,
    /// Decoded instruments, same order and count as `instrument_pointers`
    pub instruments: Vec<Instrument>,
}

impl S3mModule {
    /// Fixed header size preceding the order list
    const HEADER_SIZE: usize = 96;

    /// Decode a fully buffered S3M module
    pub fn decode(data: &[u8]) -> Result<S3mModule> {
        if data.len() < Self::HEADER_SIZE {
            return Err(format!(
                "S3M buffer too small for header: {} bytes, need {}",
                data.len(),
                Self::HEADER_SIZE
            )
            .into());
        }

        let title = padded_string(&data[0..28]);
        // Counter block at offset 32: orders, instruments, patterns,
        // flags, tracker version, sample type. Only the counts matter here.
        let num_orders = u16::from_le_bytes([data[32], data[33]]);
        let num_instruments = u16::from_le_bytes([data[34], data[35]]);
        let num_patterns = u16::from_le_bytes([data[36], data[37]]);

        let mut offset = Self::HEADER_SIZE;
        let order_end = offset + num_orders as usize;
        if order_end > data.len() {
            return Err("S3M order list extends beyond file".into());
        }
        offset = order_end;

        let instrument_pointers =
            Self::paragraph_pointers(data, offset, num_instruments, "instrument")?;
        offset += num_instruments as usize * 2;
        let pattern_pointers = Self::paragraph_pointers(data, offset, num_patterns, "pattern")?;

        let instruments = instrument_pointers
            .iter()
            .map(|&ptr| Instrument::decode(data, ptr))
            .collect::<Result<Vec<_>>>()?;

        Ok(S3mModule {
            title,
            num_orders,
            num_instruments,
            num_patterns,
            instrument_pointers,
            pattern_pointers,
            instruments,
        })
    }

    /// Read `count` u16 LE paragraph pointers and expand them to byte offsets
    fn paragraph_pointers(
        data: &[u8],
        offset: usize,
        count: u16,
        what: &str,
    ) -> Result<Vec<usize>> {
        let end = offset + count as usize * 2;
        if end > data.len() {
            return Err(format!("S3M {what} pointer table extends beyond file").into());
        }
        Ok(data[offset..end]
            .chunks_exact(2)
            .map(|p| u16::from_le_bytes([p[0], p[1]]) as usize * 16)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a minimal S3M with `n` instruments, all pointing at the same
    /// paragraph-aligned record region. Titles are written per instrument.
    fn build_minimal_s3m(titles: &[&str]) -> Vec<u8> {
        let n = titles.len();
        let mut data = vec![0u8; 96];
        data[0..9].copy_from_slice(b"test song");
        data[32..34].copy_from_slice(&4u16.to_le_bytes()); // orders
        data[34..36].copy_from_slice(&(n as u16).to_le_bytes());
        data[36..38].copy_from_slice(&1u16.to_le_bytes()); // patterns

        data.extend_from_slice(&[0, 1, 2, 255]); // order list

        // Instrument records land after the tables, paragraph-aligned
        let tables_end = 96 + 4 + n * 2 + 2;
        let first_para = tables_end.div_ceil(16) + 1;
        for i in 0..n {
            let para = (first_para + i * 4) as u16; // 64-byte records
            data.extend_from_slice(&para.to_le_bytes());
        }
        data.extend_from_slice(&0u16.to_le_bytes()); // one unused pattern ptr

        data.resize(first_para * 16, 0);
        for (i, title) in titles.iter().enumerate() {
            let mut rec = vec![0u8; 64];
            rec[0] = 2;
            rec[16 + 10] = (0x0A + i as u8) << 1; // distinct fbconn per record
            rec[36..36 + title.len()].copy_from_slice(title.as_bytes());
            data.extend_from_slice(&rec);
        }
        data
    }

    #[test]
    fn test_decode_header_counts() {
        let data = build_minimal_s3m(&["one", "two"]);
        let module = S3mModule::decode(&data).unwrap();
        assert_eq!(module.title, "test song");
        assert_eq!(module.num_orders, 4);
        assert_eq!(module.num_instruments, 2);
        assert_eq!(module.num_patterns, 1);
    }

    #[test]
    fn test_instrument_count_matches_header() {
        let data = build_minimal_s3m(&["a", "b", "c"]);
        let module = S3mModule::decode(&data).unwrap();
        assert_eq!(module.instruments.len(), module.num_instruments as usize);
        assert_eq!(
            module.instrument_pointers.len(),
            module.num_instruments as usize
        );
    }

    #[test]
    fn test_instruments_keep_file_order() {
        let data = build_minimal_s3m(&["first", "second"]);
        let module = S3mModule::decode(&data).unwrap();
        assert_eq!(module.instruments[0].title, "first");
        assert_eq!(module.instruments[1].title, "second");
        assert_eq!(module.instruments[0].fbconn_raw, 0x0A << 1);
        assert_eq!(module.instruments[1].fbconn_raw, 0x0B << 1);
    }

    #[test]
    fn test_pointers_are_paragraph_expanded() {
        let data = build_minimal_s3m(&["x"]);
        let module = S3mModule::decode(&data).unwrap();
        assert!(module.instrument_pointers[0] % 16 == 0);
        assert_eq!(data[module.instrument_pointers[0]], 2); // type byte
    }

    #[test]
    fn test_decode_zero_instruments() {
        let mut data = vec![0u8; 96];
        data[32..34].copy_from_slice(&0u16.to_le_bytes());
        let module = S3mModule::decode(&data).unwrap();
        assert!(module.instruments.is_empty());
    }

    #[test]
    fn test_buffer_too_small_for_header() {
        let result = S3mModule::decode(&[0u8; 40]);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("too small for header"));
    }

    #[test]
    fn test_order_list_past_end() {
        let mut data = vec![0u8; 96];
        data[32..34].copy_from_slice(&200u16.to_le_bytes());
        let result = S3mModule::decode(&data);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("order list"));
    }

    #[test]
    fn test_pointer_table_past_end() {
        let mut data = vec![0u8; 96];
        data[34..36].copy_from_slice(&500u16.to_le_bytes());
        let result = S3mModule::decode(&data);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("instrument pointer table"));
    }

    #[test]
    fn test_instrument_record_past_end() {
        let mut data = build_minimal_s3m(&["x"]);
        data.truncate(data.len() - 8);
        let result = S3mModule::decode(&data);
        assert!(result.is_err());
    }
}
