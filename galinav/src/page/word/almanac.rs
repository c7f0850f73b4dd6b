//! Word types 7-10: almanac and GST-GPS conversion
//!
//! Each almanac satellite is spread over two consecutive word types;
//! three satellites fit in the 7-10 sequence. Word 10 additionally
//! carries the GST-GPS offset polynomial.
use crate::{
    bits::{concat, concat_unsigned},
    page::{word::{p2, semicircles}, PageBits},
};

/// Word type 7: almanac for SVID1 (1/2), reference time and week
#[derive(Debug, Clone, PartialEq)]
pub struct Almanac1 {
    /// Almanac issue of data
    pub iod: u8,
    /// Almanac reference week number (2 LSBs)
    pub wn_a: u8,
    /// Almanac reference time t0a [s]
    pub t0a: u32,
    /// Satellite this almanac refers to
    pub svid: u8,
    /// Difference to the nominal square root semi major axis [m^1/2]
    pub delta_sqrt_a: f64,
    /// Eccentricity
    pub e: f64,
    /// Argument of perigee ω [rad]
    pub omega: f64,
    /// Difference to the nominal inclination δi [rad]
    pub delta_i: f64,
    /// Longitude of ascending node at weekly epoch Ω0 [rad]
    pub omega_0: f64,
    /// Rate of change of right ascension Ω̇ [rad/s]
    pub omega_dot: f64,
    /// Mean anomaly at reference time M0 [rad]
    pub m0: f64,
}

impl Almanac1 {
    pub(crate) fn decode(bits: &mut PageBits) -> Self {
        let iod = bits.rest.take(4) as u8;
        let wn_a = bits.rest.take(2) as u8;
        let t0a = bits.rest.take(10) as u32 * 600;
        let svid = bits.rest.take(6) as u8;
        let delta_sqrt_a_hi = bits.rest.take_signed(2);

        let delta_sqrt_a_lo = bits.w2.take(11);
        let e = bits.w2.take(11);
        let omega_hi = bits.w2.take_signed(10);

        let omega_lo = bits.w3.take(6);
        let delta_i = bits.w3.take_signed(11);
        let omega_0_hi = bits.w3.take_signed(15);

        let omega_0_lo = bits.mid.take(1);
        let omega_dot = bits.mid.take_signed(11);
        let m0 = bits.mid.take_signed(16);

        Self {
            iod,
            wn_a,
            t0a,
            svid,
            delta_sqrt_a: concat(delta_sqrt_a_hi, delta_sqrt_a_lo, 11) as f64 * p2(-9),
            e: e as f64 * p2(-16),
            omega: semicircles(concat(omega_hi, omega_lo, 6), -15),
            delta_i: semicircles(delta_i, -14),
            omega_0: semicircles(concat(omega_0_hi, omega_0_lo, 1), -15),
            omega_dot: semicircles(omega_dot, -33),
            m0: semicircles(m0, -15),
        }
    }
}

/// Word type 8: almanac for SVID1 (2/2) and SVID2 (1/2)
#[derive(Debug, Clone, PartialEq)]
pub struct Almanac2 {
    /// Almanac issue of data
    pub iod: u8,
    /// SVID1 clock correction bias af0 [s]
    pub af0: f64,
    /// SVID1 clock correction linear term af1 [s/s]
    pub af1: f64,
    /// SVID1 E5b signal health status
    pub e5b_hs: u8,
    /// SVID1 E1-B/C signal health status
    pub e1b_hs: u8,
    /// Satellite the second half of this word refers to
    pub svid: u8,
    /// SVID2: difference to the nominal square root semi major axis [m^1/2]
    pub delta_sqrt_a: f64,
    /// SVID2 eccentricity
    pub e: f64,
    /// SVID2 argument of perigee ω [rad]
    pub omega: f64,
    /// SVID2 difference to the nominal inclination δi [rad]
    pub delta_i: f64,
    /// SVID2 longitude of ascending node at weekly epoch Ω0 [rad]
    pub omega_0: f64,
    /// SVID2 rate of change of right ascension Ω̇ [rad/s]
    pub omega_dot: f64,
}

impl Almanac2 {
    pub(crate) fn decode(bits: &mut PageBits) -> Self {
        let iod = bits.rest.take(4) as u8;
        let af0 = bits.rest.take_signed(16);
        let af1_hi = bits.rest.take_signed(4);

        let af1_lo = bits.w2.take(9);
        let e5b_hs = bits.w2.take(2) as u8;
        let e1b_hs = bits.w2.take(2) as u8;
        let svid = bits.w2.take(6) as u8;
        let delta_sqrt_a = bits.w2.take_signed(13);

        let e = bits.w3.take(11);
        let omega = bits.w3.take_signed(16);
        let delta_i_hi = bits.w3.take_signed(5);

        let delta_i_lo = bits.mid.take(6);
        let omega_0 = bits.mid.take_signed(16);
        let omega_dot = bits.mid.take_signed(11);

        Self {
            iod,
            af0: af0 as f64 * p2(-19),
            af1: concat(af1_hi, af1_lo, 9) as f64 * p2(-38),
            e5b_hs,
            e1b_hs,
            svid,
            delta_sqrt_a: delta_sqrt_a as f64 * p2(-9),
            e: e as f64 * p2(-16),
            omega: semicircles(omega, -15),
            delta_i: semicircles(concat(delta_i_hi, delta_i_lo, 6), -14),
            omega_0: semicircles(omega_0, -15),
            omega_dot: semicircles(omega_dot, -33),
        }
    }
}

/// Word type 9: almanac for SVID2 (2/2) and SVID3 (1/2)
#[derive(Debug, Clone, PartialEq)]
pub struct Almanac3 {
    /// Almanac issue of data
    pub iod: u8,
    /// Almanac reference week number (2 LSBs)
    pub wn_a: u8,
    /// Almanac reference time t0a [s]
    pub t0a: u32,
    /// SVID2 mean anomaly at reference time M0 [rad]
    pub m0: f64,
    /// SVID2 clock correction bias af0 [s]
    pub af0: f64,
    /// SVID2 clock correction linear term af1 [s/s]
    pub af1: f64,
    /// SVID2 E5b signal health status
    pub e5b_hs: u8,
    /// SVID2 E1-B/C signal health status
    pub e1b_hs: u8,
    /// Satellite the second half of this word refers to
    pub svid: u8,
    /// SVID3: difference to the nominal square root semi major axis [m^1/2]
    pub delta_sqrt_a: f64,
    /// SVID3 eccentricity
    pub e: f64,
    /// SVID3 argument of perigee ω [rad]
    pub omega: f64,
    /// SVID3 difference to the nominal inclination δi [rad]
    pub delta_i: f64,
}

impl Almanac3 {
    pub(crate) fn decode(bits: &mut PageBits) -> Self {
        let iod = bits.rest.take(4) as u8;
        let wn_a = bits.rest.take(2) as u8;
        let t0a = bits.rest.take(10) as u32 * 600;
        let m0_hi = bits.rest.take_signed(8);

        let m0_lo = bits.w2.take(8);
        let af0 = bits.w2.take_signed(16);
        let af1_hi = bits.w2.take_signed(8);

        let af1_lo = bits.w3.take(5);
        let e5b_hs = bits.w3.take(2) as u8;
        let e1b_hs = bits.w3.take(2) as u8;
        let svid = bits.w3.take(6) as u8;
        let delta_sqrt_a = bits.w3.take_signed(13);
        let e_hi = bits.w3.take(4);

        let e_lo = bits.mid.take(7);
        let omega = bits.mid.take_signed(16);
        let delta_i = bits.mid.take_signed(11);

        Self {
            iod,
            wn_a,
            t0a,
            m0: semicircles(concat(m0_hi, m0_lo, 8), -15),
            af0: af0 as f64 * p2(-19),
            af1: concat(af1_hi, af1_lo, 5) as f64 * p2(-38),
            e5b_hs,
            e1b_hs,
            svid,
            delta_sqrt_a: delta_sqrt_a as f64 * p2(-9),
            e: concat_unsigned(e_hi, e_lo, 7) as f64 * p2(-16),
            omega: semicircles(omega, -15),
            delta_i: semicircles(delta_i, -14),
        }
    }
}

/// Word type 10: almanac for SVID3 (2/2) and GST-GPS conversion
#[derive(Debug, Clone, PartialEq)]
pub struct Almanac4 {
    /// Almanac issue of data
    pub iod: u8,
    /// SVID3 longitude of ascending node at weekly epoch Ω0 [rad]
    pub omega_0: f64,
    /// SVID3 rate of change of right ascension Ω̇ [rad/s]
    pub omega_dot: f64,
    /// SVID3 mean anomaly at reference time M0 [rad]
    pub m0: f64,
    /// SVID3 clock correction bias af0 [s]
    pub af0: f64,
    /// SVID3 clock correction linear term af1 [s/s]
    pub af1: f64,
    /// SVID3 E5b signal health status
    pub e5b_hs: u8,
    /// SVID3 E1-B/C signal health status
    pub e1b_hs: u8,
    /// GST-GPS offset constant term A0G [s]
    pub a0g: f64,
    /// GST-GPS offset rate A1G [s/s]
    pub a1g: f64,
    /// GST-GPS data reference time t0G [s]
    pub t0g: u32,
    /// GST-GPS data reference week number (6 LSBs)
    pub wn0g: u8,
}

impl Almanac4 {
    pub(crate) fn decode(bits: &mut PageBits) -> Self {
        let iod = bits.rest.take(4) as u8;
        let omega_0 = bits.rest.take_signed(16);
        let omega_dot_hi = bits.rest.take_signed(4);

        let omega_dot_lo = bits.w2.take(7);
        let m0 = bits.w2.take_signed(16);
        let af0_hi = bits.w2.take_signed(9);

        let af0_lo = bits.w3.take(7);
        let af1 = bits.w3.take_signed(13);
        let e5b_hs = bits.w3.take(2) as u8;
        let e1b_hs = bits.w3.take(2) as u8;
        let a0g_hi = bits.w3.take_signed(8);

        let a0g_lo = bits.mid.take(8);
        let a1g = bits.mid.take_signed(12);
        let t0g = bits.mid.take(8) as u32 * 3600;
        let wn0g = bits.mid.take(6) as u8;

        Self {
            iod,
            omega_0: semicircles(omega_0, -15),
            omega_dot: semicircles(concat(omega_dot_hi, omega_dot_lo, 7), -33),
            m0: semicircles(m0, -15),
            af0: concat(af0_hi, af0_lo, 7) as f64 * p2(-19),
            af1: af1 as f64 * p2(-38),
            e5b_hs,
            e1b_hs,
            a0g: concat(a0g_hi, a0g_lo, 8) as f64 * p2(-35),
            a1g: a1g as f64 * p2(-51),
            t0g,
            wn0g,
        }
    }
}
