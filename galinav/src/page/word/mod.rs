//! I/NAV word types
//!
//! One nominal page transports one 128 bit word: 6 bit type field plus
//! 122 data bits, split across the page views rebuilt by the assembler.
//! Every field is extracted here in engineering units: power of two
//! scale factor applied, and semicircle angles converted to radians.
use crate::page::PageBits;

mod almanac;
mod ced;
mod ephemeris;
mod utility;

pub use almanac::{Almanac1, Almanac2, Almanac3, Almanac4};
pub use ced::{FecCed, ReducedCed};
pub use ephemeris::{Ephemeris1, Ephemeris2, Ephemeris3, Ephemeris4};
pub use utility::{GstUtc, IonoGst, SpareTime};

/// Decoded I/NAV word, dispatched on the 6 bit word type field.
#[derive(Debug, Clone, PartialEq)]
pub enum Word {
    /// Type 0: spare word, carries GST when its time field is set
    Spare(SpareTime),
    /// Type 1: ephemeris (1/4)
    Ephemeris1(Ephemeris1),
    /// Type 2: ephemeris (2/4)
    Ephemeris2(Ephemeris2),
    /// Type 3: ephemeris (3/4) + SISA
    Ephemeris3(Ephemeris3),
    /// Type 4: ephemeris (4/4) + clock correction
    Ephemeris4(Ephemeris4),
    /// Type 5: ionospheric correction, BGD, health, GST
    IonoGst(IonoGst),
    /// Type 6: GST-UTC conversion
    GstUtc(GstUtc),
    /// Type 7: almanac, SVID1 (1/2)
    Almanac1(Almanac1),
    /// Type 8: almanac, SVID1 (2/2) + SVID2 (1/2)
    Almanac2(Almanac2),
    /// Type 9: almanac, SVID2 (2/2) + SVID3 (1/2)
    Almanac3(Almanac3),
    /// Type 10: almanac, SVID3 (2/2) + GST-GPS conversion
    Almanac4(Almanac4),
    /// Type 16: reduced clock and ephemeris data
    ReducedCed(ReducedCed),
    /// Types 17-20: FEC2 Reed-Solomon clock and ephemeris data
    FecCed(FecCed),
    /// Type 63: dummy word
    Dummy,
}

impl Word {
    /// Decodes the word content for a given type field.
    /// Returns None on word types the I/NAV message does not define.
    pub(crate) fn decode(word_type: u8, bits: &mut PageBits) -> Option<Self> {
        match word_type {
            0 => Some(Self::Spare(SpareTime::decode(bits))),
            1 => Some(Self::Ephemeris1(Ephemeris1::decode(bits))),
            2 => Some(Self::Ephemeris2(Ephemeris2::decode(bits))),
            3 => Some(Self::Ephemeris3(Ephemeris3::decode(bits))),
            4 => Some(Self::Ephemeris4(Ephemeris4::decode(bits))),
            5 => Some(Self::IonoGst(IonoGst::decode(bits))),
            6 => Some(Self::GstUtc(GstUtc::decode(bits))),
            7 => Some(Self::Almanac1(Almanac1::decode(bits))),
            8 => Some(Self::Almanac2(Almanac2::decode(bits))),
            9 => Some(Self::Almanac3(Almanac3::decode(bits))),
            10 => Some(Self::Almanac4(Almanac4::decode(bits))),
            16 => Some(Self::ReducedCed(ReducedCed::decode(bits))),
            17..=20 => Some(Self::FecCed(FecCed::decode(word_type, bits))),
            63 => Some(Self::Dummy),
            _ => None,
        }
    }
}

/// 2^e as f64
pub(crate) fn p2(e: i32) -> f64 {
    2.0_f64.powi(e)
}

/// Semicircle quantity to radians: raw * 2^e * π
pub(crate) fn semicircles(raw: i64, e: i32) -> f64 {
    raw as f64 * p2(e) * std::f64::consts::PI
}
