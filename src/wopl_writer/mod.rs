//! WOPL3 Bank Serialization
//!
//! Consumes decoded S3M instruments and emits a WOPL3 bank: one melodic
//! bank of 128 programs, plus one percussion bank when any instrument
//! carries a `<n>` key override. Slot placement is resolved first
//! ([`slots`]), then the bank is serialized in one pass ([`bank`]).

pub mod bank;
pub mod slots;

pub use bank::encode;
pub use slots::{BankLayout, SlotHints};
