//! Word types 1-4: ephemeris and clock correction
use crate::{
    bits::{concat, concat_unsigned},
    page::{word::{p2, semicircles}, PageBits},
};

/// Word type 1: ephemeris (1/4)
#[derive(Debug, Clone, PartialEq)]
pub struct Ephemeris1 {
    /// Issue of data (IODnav)
    pub iod: u16,
    /// Ephemeris reference time t0e [s]
    pub toe: u32,
    /// Mean anomaly at reference time M0 [rad]
    pub m0: f64,
    /// Eccentricity
    pub e: f64,
    /// Square root of the semi major axis [m^1/2]
    pub sqrt_a: f64,
}

impl Ephemeris1 {
    pub(crate) fn decode(bits: &mut PageBits) -> Self {
        let iod = bits.rest.take(10) as u16;
        let toe = bits.rest.take(14) as u32 * 60;

        let m0 = semicircles(bits.w2.take_signed(32), -31);
        let e = bits.w3.take(32) as f64 * p2(-33);
        let sqrt_a = bits.mid.take(32) as f64 * p2(-19);

        Self {
            iod,
            toe,
            m0,
            e,
            sqrt_a,
        }
    }
}

/// Word type 2: ephemeris (2/4)
#[derive(Debug, Clone, PartialEq)]
pub struct Ephemeris2 {
    /// Issue of data (IODnav)
    pub iod: u16,
    /// Longitude of ascending node at weekly epoch Ω0 [rad]
    pub omega_0: f64,
    /// Inclination angle at reference time i0 [rad]
    pub i0: f64,
    /// Argument of perigee ω [rad]
    pub omega: f64,
    /// Rate of change of inclination angle [rad/s]
    pub idot: f64,
}

impl Ephemeris2 {
    pub(crate) fn decode(bits: &mut PageBits) -> Self {
        let iod = bits.rest.take(10) as u16;
        let omega_0_hi = bits.rest.take_signed(14);

        let omega_0_lo = bits.w2.take(18);
        let i0_hi = bits.w2.take_signed(14);

        let i0_lo = bits.w3.take(18);
        let omega_hi = bits.w3.take_signed(14);

        let omega_lo = bits.mid.take(18);
        let idot = bits.mid.take_signed(14);

        Self {
            iod,
            omega_0: semicircles(concat(omega_0_hi, omega_0_lo, 18), -31),
            i0: semicircles(concat(i0_hi, i0_lo, 18), -31),
            omega: semicircles(concat(omega_hi, omega_lo, 18), -31),
            idot: semicircles(idot, -43),
        }
    }
}

/// Word type 3: ephemeris (3/4) and SISA
#[derive(Debug, Clone, PartialEq)]
pub struct Ephemeris3 {
    /// Issue of data (IODnav)
    pub iod: u16,
    /// Rate of change of right ascension Ω̇ [rad/s]
    pub omega_dot: f64,
    /// Mean motion difference Δn [rad/s]
    pub delta_n: f64,
    /// Cosine harmonic correction to the argument of latitude [rad]
    pub cuc: f64,
    /// Sine harmonic correction to the argument of latitude [rad]
    pub cus: f64,
    /// Cosine harmonic correction to the orbit radius [m]
    pub crc: f64,
    /// Sine harmonic correction to the orbit radius [m]
    pub crs: f64,
    /// Signal in space accuracy index
    pub sisa: u8,
}

impl Ephemeris3 {
    pub(crate) fn decode(bits: &mut PageBits) -> Self {
        let iod = bits.rest.take(10) as u16;
        let omega_dot_hi = bits.rest.take_signed(14);

        let omega_dot_lo = bits.w2.take(10);
        let delta_n = bits.w2.take_signed(16);
        let cuc_hi = bits.w2.take_signed(6);

        let cuc_lo = bits.w3.take(10);
        let cus = bits.w3.take_signed(16);
        let crc_hi = bits.w3.take_signed(6);

        let crc_lo = bits.mid.take(10);
        let crs = bits.mid.take_signed(16);
        let sisa = bits.mid.take(8) as u8;

        Self {
            iod,
            omega_dot: semicircles(concat(omega_dot_hi, omega_dot_lo, 10), -43),
            delta_n: semicircles(delta_n, -43),
            cuc: concat(cuc_hi, cuc_lo, 10) as f64 * p2(-29),
            cus: cus as f64 * p2(-29),
            crc: concat(crc_hi, crc_lo, 10) as f64 * p2(-5),
            crs: crs as f64 * p2(-5),
            sisa,
        }
    }
}

/// Word type 4: SVID, ephemeris (4/4) and clock correction
#[derive(Debug, Clone, PartialEq)]
pub struct Ephemeris4 {
    /// Issue of data (IODnav)
    pub iod: u16,
    /// Satellite this word refers to
    pub svid: u8,
    /// Cosine harmonic correction to the inclination angle [rad]
    pub cic: f64,
    /// Sine harmonic correction to the inclination angle [rad]
    pub cis: f64,
    /// Clock correction reference time t0c [s]
    pub toc: u32,
    /// Clock bias correction af0 [s]
    pub af0: f64,
    /// Clock drift correction af1 [s/s]
    pub af1: f64,
    /// Clock drift rate correction af2 [s/s²]
    pub af2: f64,
}

impl Ephemeris4 {
    pub(crate) fn decode(bits: &mut PageBits) -> Self {
        let iod = bits.rest.take(10) as u16;
        let svid = bits.rest.take(6) as u8;
        let cic_hi = bits.rest.take_signed(8);

        let cic_lo = bits.w2.take(8);
        let cis = bits.w2.take_signed(16);
        let toc_hi = bits.w2.take(8);

        let toc_lo = bits.w3.take(6);
        let af0_hi = bits.w3.take_signed(26);

        let af0_lo = bits.mid.take(5);
        let af1 = bits.mid.take_signed(21);
        let af2 = bits.mid.take_signed(6);

        Self {
            iod,
            svid,
            cic: concat(cic_hi, cic_lo, 8) as f64 * p2(-29),
            cis: cis as f64 * p2(-29),
            toc: concat_unsigned(toc_hi, toc_lo, 6) as u32 * 60,
            af0: concat(af0_hi, af0_lo, 5) as f64 * p2(-34),
            af1: af1 as f64 * p2(-46),
            af2: af2 as f64 * p2(-59),
        }
    }
}
