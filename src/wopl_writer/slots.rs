//! Program-slot assignment from instrument titles
//!
//! Instrument titles double as a placement channel: `[n]` pins an
//! instrument to melodic program `n` (1-based), `<n>` pins it to
//! percussion key `n` (0-based). Extraction lives in [`SlotHints`] so the
//! string matching stays independent of the bank-layout rules in
//! [`BankLayout`].

use crate::s3m_parser::Instrument;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Placement overrides extracted from one instrument title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotHints {
    /// Melodic program slot, already converted to 0-based
    pub melodic_slot: Option<usize>,
    /// Percussion key number, 0-based as written
    pub percussion_key: Option<usize>,
}

impl SlotHints {
    /// Extract `[n]` / `<n>` overrides from a title.
    ///
    /// Only the first occurrence of each pattern counts. `[0]` yields no
    /// melodic hint: 1-based numbering puts it below the first slot.
    pub fn from_title(title: &str) -> SlotHints {
        static MELODIC: OnceLock<Regex> = OnceLock::new();
        static PERCUSSION: OnceLock<Regex> = OnceLock::new();
        let melodic = MELODIC.get_or_init(|| Regex::new(r"\[(\d+)\]").expect("valid regex"));
        let percussion = PERCUSSION.get_or_init(|| Regex::new(r"<(\d+)>").expect("valid regex"));

        SlotHints {
            melodic_slot: Self::capture_number(melodic, title).and_then(|n| n.checked_sub(1)),
            percussion_key: Self::capture_number(percussion, title),
        }
    }

    fn capture_number(pattern: &Regex, title: &str) -> Option<usize> {
        pattern
            .captures(title)
            .and_then(|c| c[1].parse::<usize>().ok())
    }
}

/// Resolved slot assignment for one bank emission.
///
/// Built by a single pass over the instruments in input order; when two
/// instruments claim the same slot the later one wins, silently. That
/// last-write-wins rule is load-bearing: changing the tie-break would
/// change the layout of existing banks.
pub struct BankLayout<'a> {
    instruments: &'a [Instrument],
    melodic: HashMap<usize, &'a Instrument>,
    percussion: HashMap<usize, &'a Instrument>,
}

impl<'a> BankLayout<'a> {
    /// Resolve explicit placements for `instruments`
    pub fn assign(instruments: &'a [Instrument]) -> BankLayout<'a> {
        let mut melodic = HashMap::new();
        let mut percussion = HashMap::new();
        for inst in instruments {
            let hints = SlotHints::from_title(&inst.title);
            if let Some(slot) = hints.melodic_slot {
                melodic.insert(slot, inst);
            }
            if let Some(key) = hints.percussion_key {
                percussion.insert(key, inst);
            }
        }
        BankLayout {
            instruments,
            melodic,
            percussion,
        }
    }

    /// Whether any instrument claimed a percussion key
    pub fn has_percussion(&self) -> bool {
        !self.percussion.is_empty()
    }

    /// Content of a melodic program slot: an explicit `[n]` claim wins,
    /// otherwise the instrument at that input position, otherwise empty
    pub fn melodic_slot(&self, slot: usize) -> Option<&'a Instrument> {
        self.melodic
            .get(&slot)
            .copied()
            .or_else(|| self.instruments.get(slot))
    }

    /// Content of a percussion key slot; explicit `<n>` claims only
    pub fn percussion_slot(&self, key: usize) -> Option<&'a Instrument> {
        self.percussion.get(&key).copied()
    }
}
