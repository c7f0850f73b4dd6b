//! Word types 5, 6 and 0: ionosphere, time conversions, spare
use crate::{
    bits::{concat, concat_unsigned},
    health::{RegionFlags, SvHealth},
    page::{word::{p2, semicircles}, PageBits},
};

/// Word type 5: ionospheric correction, broadcast group delays,
/// signal health, data validity and GST.
#[derive(Debug, Clone, PartialEq)]
pub struct IonoGst {
    /// Effective ionisation level, 1st coefficient [sfu]
    pub ai0: f64,
    /// Effective ionisation level, 2nd coefficient [sfu/semicircle]
    pub ai1: f64,
    /// Effective ionisation level, 3rd coefficient [sfu/semicircle²]
    pub ai2: f64,
    /// Ionospheric disturbance flags, regions 1-5
    pub regions: RegionFlags,
    /// E1-E5a broadcast group delay [s]
    pub bgd_e1_e5a: f64,
    /// E1-E5b broadcast group delay [s]
    pub bgd_e1_e5b: f64,
    /// E5b signal health status
    pub e5b_hs: u8,
    /// E1-B/C signal health status
    pub e1b_hs: u8,
    /// E5b data validity status
    pub e5b_dvs: u8,
    /// E1-B data validity status
    pub e1b_dvs: u8,
    /// GST week number
    pub week: u16,
    /// GST time of week [s]
    pub tow: u32,
}

impl IonoGst {
    pub(crate) fn decode(bits: &mut PageBits) -> Self {
        let ai0 = bits.rest.take(11) as f64 * p2(-2);
        let ai1 = bits.rest.take_signed(11) as f64 * p2(-8);
        let ai2_hi = bits.rest.take_signed(2);

        let ai2_lo = bits.w2.take(12);
        let mut regions = RegionFlags::empty();
        for flag in [
            RegionFlags::REGION1,
            RegionFlags::REGION2,
            RegionFlags::REGION3,
            RegionFlags::REGION4,
            RegionFlags::REGION5,
        ] {
            if bits.w2.take(1) == 1 {
                regions |= flag;
            }
        }
        let bgd_e1_e5a = bits.w2.take_signed(10);
        let bgd_e1_e5b_hi = bits.w2.take_signed(5);

        let bgd_e1_e5b_lo = bits.w3.take(5);
        let e5b_hs = bits.w3.take(2) as u8;
        let e1b_hs = bits.w3.take(2) as u8;
        let e5b_dvs = bits.w3.take(1) as u8;
        let e1b_dvs = bits.w3.take(1) as u8;
        let week = bits.w3.take(12) as u16;
        let tow_hi = bits.w3.take(9);

        let tow_lo = bits.mid.take(11);

        Self {
            ai0,
            ai1,
            ai2: concat(ai2_hi, ai2_lo, 12) as f64 * p2(-15),
            regions,
            bgd_e1_e5a: bgd_e1_e5a as f64 * p2(-32),
            bgd_e1_e5b: concat(bgd_e1_e5b_hi, bgd_e1_e5b_lo, 5) as f64 * p2(-32),
            e5b_hs,
            e1b_hs,
            e5b_dvs,
            e1b_dvs,
            week,
            tow: concat_unsigned(tow_hi, tow_lo, 11) as u32,
        }
    }

    /// Health and validity bits, packed in RINEX order.
    pub fn health(&self) -> SvHealth {
        SvHealth::pack(self.e5b_hs, self.e1b_hs, self.e5b_dvs, self.e1b_dvs)
    }
}

/// Word type 6: GST-UTC conversion parameters
#[derive(Debug, Clone, PartialEq)]
pub struct GstUtc {
    /// Constant polynomial term A0 [s]
    pub a0: f64,
    /// 1st order polynomial term A1 [s/s]
    pub a1: f64,
    /// Leap second count before adjustment ΔtLS [s]
    pub dt_ls: i8,
    /// UTC data reference time of week t0t [s]
    pub t0t: u32,
    /// UTC data reference week number
    pub wn0t: u8,
    /// Week number of leap second adjustment
    pub wn_lsf: u8,
    /// Day number at the end of which the adjustment applies (1-7)
    pub dn: u8,
    /// Leap second count after adjustment ΔtLSF [s]
    pub dt_lsf: i8,
    /// GST time of week [s]
    pub tow: u32,
}

impl GstUtc {
    pub(crate) fn decode(bits: &mut PageBits) -> Self {
        let a0_hi = bits.rest.take_signed(24);

        let a0_lo = bits.w2.take(8);
        let a1 = bits.w2.take_signed(24);

        let dt_ls = bits.w3.take_signed(8) as i8;
        let t0t = bits.w3.take(8) as u32 * 3600;
        let wn0t = bits.w3.take(8) as u8;
        let wn_lsf = bits.w3.take(8) as u8;

        let dn = bits.mid.take(3) as u8;
        let dt_lsf = bits.mid.take_signed(8) as i8;
        let tow = bits.mid.take(20) as u32;

        Self {
            a0: concat(a0_hi, a0_lo, 8) as f64 * p2(-30),
            a1: a1 as f64 * p2(-50),
            dt_ls,
            t0t,
            wn0t,
            wn_lsf,
            dn,
            dt_lsf,
            tow,
        }
    }
}

/// Word type 0: spare word. Carries GST when the time field reads 2.
#[derive(Debug, Clone, PartialEq)]
pub struct SpareTime {
    /// Time status field
    pub time: u8,
    /// GST week number
    pub week: u16,
    /// GST time of week [s]
    pub tow: u32,
}

impl SpareTime {
    pub(crate) fn decode(bits: &mut PageBits) -> Self {
        let time = bits.rest.take(2) as u8;
        bits.rest.skip(22);

        bits.w2.skip(32);

        bits.w3.skip(32);

        bits.mid.skip(2);
        let week = bits.mid.take(12) as u16;
        let tow = bits.mid.take(20) as u32;

        Self { time, week, tow }
    }
}
