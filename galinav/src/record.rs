//! Emitted navigation data
use std::fmt;

use gnss::prelude::SV;
use hifitime::{Duration, Epoch, TimeScale};

use crate::health::{RegionFlags, SvHealth};

/// Element of the decoded navigation stream.
#[derive(Debug, Clone, PartialEq)]
pub enum NavFrame {
    /// Ionospheric model and time system corrections.
    /// Emitted once, strictly before the first record.
    Header(NavHeader),
    /// Complete ephemeris + clock correction set for one satellite
    Ephemeris(NavRecord),
}

/// NequickG ionospheric model coefficients, broadcast on word type 5.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NequickG {
    /// Effective ionisation level coefficients
    /// ([sfu], [sfu.semi-circle⁻¹], [sfu.semi-circle⁻²])
    pub a: (f64, f64, f64),
    /// Ionospheric disturbance region flags
    pub regions: RegionFlags,
}

/// First order time system offset polynomial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeOffset {
    /// Constant term [s]
    pub a0: f64,
    /// 1st order term [s/s]
    pub a1: f64,
    /// Data reference time of week [s]
    pub t_ref: u32,
    /// Data reference week number
    pub week: u16,
}

/// Process wide header block: latched once from the first word of each
/// kind, common to every satellite of the stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavHeader {
    /// NequickG ionospheric model (word type 5)
    pub iono: NequickG,
    /// GST to UTC conversion (word type 6)
    pub gst_utc: TimeOffset,
    /// GST to GPS conversion (word type 10)
    pub gst_gps: TimeOffset,
}

/// Complete per epoch navigation record for one satellite, in
/// engineering units: seconds, radians, dimensionless. One record is
/// emitted each time the four ephemeris words, the clock correction and
/// the health/BGD word have all been received for a new t0e.
#[derive(Debug, Clone, PartialEq)]
pub struct NavRecord {
    /// Emitting satellite
    pub sv: SV,
    /// Clock correction reference time t0c [s of Galileo week]
    pub toc: u32,
    /// GST week number
    pub week: u16,
    /// Clock bias af0 [s]
    pub clock_bias: f64,
    /// Clock drift af1 [s/s]
    pub clock_drift: f64,
    /// Clock drift rate af2 [s/s²]
    pub clock_drift_rate: f64,
    /// Issue of data (IODnav)
    pub iodnav: u16,
    /// Sine harmonic correction to the orbit radius [m]
    pub crs: f64,
    /// Mean motion difference Δn [rad/s]
    pub delta_n: f64,
    /// Mean anomaly at reference time M0 [rad]
    pub m0: f64,
    /// Cosine harmonic correction to the argument of latitude [rad]
    pub cuc: f64,
    /// Eccentricity
    pub e: f64,
    /// Sine harmonic correction to the argument of latitude [rad]
    pub cus: f64,
    /// Square root of the semi major axis [m^1/2]
    pub sqrt_a: f64,
    /// Ephemeris reference time t0e [s of Galileo week]
    pub toe: u32,
    /// Cosine harmonic correction to the inclination angle [rad]
    pub cic: f64,
    /// Longitude of ascending node at weekly epoch Ω0 [rad]
    pub omega_0: f64,
    /// Sine harmonic correction to the inclination angle [rad]
    pub cis: f64,
    /// Inclination angle at reference time i0 [rad]
    pub i0: f64,
    /// Cosine harmonic correction to the orbit radius [m]
    pub crc: f64,
    /// Argument of perigee ω [rad]
    pub omega: f64,
    /// Rate of change of right ascension Ω̇ [rad/s]
    pub omega_dot: f64,
    /// Rate of change of inclination angle [rad/s]
    pub idot: f64,
    /// Signal in space accuracy index
    pub sisa: u8,
    /// Signal health and data validity bits
    pub health: SvHealth,
    /// E1-E5a broadcast group delay [s]
    pub bgd_e1_e5a: f64,
    /// E1-E5b broadcast group delay [s]
    pub bgd_e1_e5b: f64,
}

impl NavRecord {
    /// Clock correction reference time as [Epoch], from GST week number
    /// and time of week.
    pub fn toc_epoch(&self) -> Epoch {
        let week = Duration::from_days(self.week as f64 * 7.0);
        let tow = Duration::from_seconds(self.toc as f64);
        Epoch::from_duration(week + tow, TimeScale::GST)
    }
}

impl fmt::Display for NavRecord {
    /// RINEX ready layout: satellite + epoch + clock row, followed by
    /// the orbit rows, four values each.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hh, mm) = ((self.toc % 86400) / 3600, (self.toc % 3600) / 60);
        writeln!(
            f,
            "{}\t{} {} {}\t{:.12e}\t{:.12e}\t{:.12e}",
            self.sv, self.toc, hh, mm, self.clock_bias, self.clock_drift, self.clock_drift_rate
        )?;
        writeln!(
            f,
            "  \t{:.12e}\t{:.12e}\t{:.12e}\t{:.12e}",
            self.iodnav as f64, self.crs, self.delta_n, self.m0
        )?;
        writeln!(
            f,
            "  \t{:.12e}\t{:.12e}\t{:.12e}\t{:.12e}",
            self.cuc, self.e, self.cus, self.sqrt_a
        )?;
        writeln!(
            f,
            "  \t{:.12e}\t{:.12e}\t{:.12e}\t{:.12e}",
            self.toe as f64, self.cic, self.omega_0, self.cis
        )?;
        writeln!(
            f,
            "  \t{:.12e}\t{:.12e}\t{:.12e}\t{:.12e}",
            self.i0, self.crc, self.omega, self.omega_dot
        )?;
        writeln!(
            f,
            "  \t{:.12e}\t\t\t{}\t{:.12e}",
            self.idot, self.week, 0.0
        )?;
        write!(
            f,
            "  \t{:.12e}\t{:.12e}\t{:.12e}\t{:.12e}",
            self.sisa as f64,
            self.health.bits() as f64,
            self.bgd_e1_e5a,
            self.bgd_e1_e5b
        )
    }
}

impl fmt::Display for NavHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\t\tHEADER")?;
        writeln!(
            f,
            "GAL\t{:.12e}\t{:.12e}\t{:.12e}\tIONOSPHERIC CORR",
            self.iono.a.0, self.iono.a.1, self.iono.a.2
        )?;
        writeln!(
            f,
            "GAUT\t{:.12e}\t{:.12e}\t{}\t{}\tTIME SYSTEM CORR",
            self.gst_utc.a0, self.gst_utc.a1, self.gst_utc.t_ref, self.gst_utc.week
        )?;
        write!(
            f,
            "GPGA\t{:.12e}\t{:.12e}\t{}\t{}\tTIME SYSTEM CORR",
            self.gst_gps.a0, self.gst_gps.a1, self.gst_gps.t_ref, self.gst_gps.week
        )
    }
}
