//! Word types 16-20: reduced and FEC2 clock / ephemeris data
//!
//! These words support fast (re)acquisition. They are decoded for
//! completeness but never merged into navigation records, so their
//! fields are kept raw (no scale factor applied).
use crate::{
    bits::{concat, concat_unsigned},
    page::PageBits,
};

/// Word type 16: reduced clock and ephemeris data (CED)
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedCed {
    /// Difference to the nominal semi major axis
    pub delta_a: i32,
    /// Eccentricity vector component x
    pub e_x: i32,
    /// Eccentricity vector component y
    pub e_y: i32,
    /// Difference to the nominal inclination at reference time
    pub delta_i0: i32,
    /// Longitude of ascending node at weekly epoch
    pub omega_0: i32,
    /// Mean argument of latitude
    pub lambda_0: i32,
    /// Clock bias correction
    pub af0: i32,
    /// Clock drift correction
    pub af1: i32,
}

impl ReducedCed {
    pub(crate) fn decode(bits: &mut PageBits) -> Self {
        let delta_a = bits.rest.take_signed(5) as i32;
        let e_x = bits.rest.take_signed(13) as i32;
        let e_y_hi = bits.rest.take_signed(6);

        let e_y_lo = bits.w2.take(7);
        let delta_i0 = bits.w2.take_signed(17) as i32;
        let omega_0_hi = bits.w2.take_signed(8);

        let omega_0_lo = bits.w3.take(15);
        let lambda_0_hi = bits.w3.take_signed(17);

        let lambda_0_lo = bits.mid.take(6);
        let af0 = bits.mid.take_signed(22) as i32;
        let af1 = bits.mid.take_signed(6) as i32;

        Self {
            delta_a,
            e_x,
            e_y: concat(e_y_hi, e_y_lo, 7) as i32,
            delta_i0,
            omega_0: concat(omega_0_hi, omega_0_lo, 15) as i32,
            lambda_0: concat(lambda_0_hi, lambda_0_lo, 6) as i32,
            af0,
            af1,
        }
    }
}

/// Word types 17-20: FEC2 Reed-Solomon parity for the CED
#[derive(Debug, Clone, PartialEq)]
pub struct FecCed {
    /// Transporting word type (17-20)
    pub word_type: u8,
    /// First parity octet
    pub octet: u8,
    /// LSB field
    pub lsb: u8,
    /// Parity symbols, upper 64 bits
    pub symbols_hi: u64,
    /// Parity symbols, lower 48 bits
    pub symbols_lo: u64,
}

impl FecCed {
    pub(crate) fn decode(word_type: u8, bits: &mut PageBits) -> Self {
        let octet = bits.rest.take(8) as u8;
        let lsb = bits.rest.take(2) as u8;
        let hi_14 = bits.rest.take(14);

        let hi_32 = bits.w2.take(32);

        let hi_18 = bits.w3.take(18);
        let lo_14 = bits.w3.take(14);

        let lo_34 = bits.mid.take(34);

        let symbols_hi = concat_unsigned(concat_unsigned(hi_14, hi_32, 32), hi_18, 18);
        let symbols_lo = concat_unsigned(lo_14, lo_34, 34);

        Self {
            word_type,
            octet,
            lsb,
            symbols_hi,
            symbols_lo,
        }
    }
}
