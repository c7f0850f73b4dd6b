//! Almanac accumulation
//!
//! Word types 7-10 spread three satellite almanacs over four words,
//! each satellite split across two consecutive types. The bank rebuilds
//! them in sequence and starts over whenever the almanac issue of data
//! changes mid cycle.
use log::debug;

use crate::page::word::{Almanac1, Almanac2, Almanac3, Almanac4};

/// One satellite almanac, in engineering units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Almanac {
    /// Satellite this almanac refers to
    pub svid: u8,
    /// Almanac issue of data
    pub iod: u8,
    /// Almanac reference week number (2 LSBs)
    pub wn_a: u8,
    /// Almanac reference time t0a [s]
    pub t0a: u32,
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
    /// Clock correction bias af0 [s]
    pub af0: f64,
    /// Clock correction linear term af1 [s/s]
    pub af1: f64,
    /// E5b signal health status
    pub e5b_hs: u8,
    /// E1-B/C signal health status
    pub e1b_hs: u8,
}

/// Orbit half of an almanac, staged until the word carrying its clock
/// correction half arrives.
#[derive(Debug, Clone, Copy)]
struct Staged {
    svid: u8,
    delta_sqrt_a: f64,
    e: f64,
    omega: f64,
    delta_i: f64,
    // word 8 does not repeat these for SVID2, word 9 none of them for SVID3
    omega_0: f64,
    omega_dot: f64,
    m0: f64,
}

/// Three satellite almanac accumulator for one transmission signal.
#[derive(Debug, Default)]
pub(crate) struct AlmanacBank {
    /// Issue of data of the cycle being accumulated
    iod: Option<u8>,
    /// Almanac reference week (2 LSBs)
    wn_a: u8,
    /// Almanac reference time [s]
    t0a: u32,
    /// SVID1 orbit half, from word 7
    staged1: Option<Staged>,
    /// SVID2 orbit half, from word 8
    staged2: Option<Staged>,
    /// SVID3 orbit half, from word 9
    staged3: Option<Staged>,
    /// Rebuilt almanacs of the current cycle
    complete: [Option<Almanac>; 3],
}

impl AlmanacBank {
    /// Completed almanacs of the current cycle.
    pub fn almanacs(&self) -> impl Iterator<Item = &Almanac> {
        self.complete.iter().flatten()
    }

    /// Drops any accumulated state when the issue of data moves on.
    fn retarget(&mut self, iod: u8) {
        if self.iod != Some(iod) {
            if self.iod.is_some() {
                debug!("almanac issue of data changed: restarting cycle");
            }
            *self = Self::default();
            self.iod = Some(iod);
        }
    }

    pub fn feed1(&mut self, word: &Almanac1) {
        self.retarget(word.iod);
        self.wn_a = word.wn_a;
        self.t0a = word.t0a;
        self.staged1 = Some(Staged {
            svid: word.svid,
            delta_sqrt_a: word.delta_sqrt_a,
            e: word.e,
            omega: word.omega,
            delta_i: word.delta_i,
            omega_0: word.omega_0,
            omega_dot: word.omega_dot,
            m0: word.m0,
        });
    }

    pub fn feed2(&mut self, word: &Almanac2) {
        self.retarget(word.iod);
        if let Some(orbit) = self.staged1.take() {
            self.finish(0, orbit, word.af0, word.af1, word.e5b_hs, word.e1b_hs);
        }
        self.staged2 = Some(Staged {
            svid: word.svid,
            delta_sqrt_a: word.delta_sqrt_a,
            e: word.e,
            omega: word.omega,
            delta_i: word.delta_i,
            omega_0: word.omega_0,
            omega_dot: word.omega_dot,
            m0: 0.0, // completed by word 9
        });
    }

    pub fn feed3(&mut self, word: &Almanac3) {
        self.retarget(word.iod);
        self.wn_a = word.wn_a;
        self.t0a = word.t0a;
        if let Some(mut orbit) = self.staged2.take() {
            orbit.m0 = word.m0;
            self.finish(1, orbit, word.af0, word.af1, word.e5b_hs, word.e1b_hs);
        }
        self.staged3 = Some(Staged {
            svid: word.svid,
            delta_sqrt_a: word.delta_sqrt_a,
            e: word.e,
            omega: word.omega,
            delta_i: word.delta_i,
            omega_0: 0.0, // completed by word 10
            omega_dot: 0.0,
            m0: 0.0,
        });
    }

    pub fn feed4(&mut self, word: &Almanac4) {
        self.retarget(word.iod);
        if let Some(mut orbit) = self.staged3.take() {
            orbit.omega_0 = word.omega_0;
            orbit.omega_dot = word.omega_dot;
            orbit.m0 = word.m0;
            self.finish(2, orbit, word.af0, word.af1, word.e5b_hs, word.e1b_hs);
        }
    }

    fn finish(&mut self, slot: usize, orbit: Staged, af0: f64, af1: f64, e5b_hs: u8, e1b_hs: u8) {
        if orbit.svid == 0 {
            // empty almanac slot
            return;
        }
        let almanac = Almanac {
            svid: orbit.svid,
            iod: self.iod.unwrap_or(0),
            wn_a: self.wn_a,
            t0a: self.t0a,
            delta_sqrt_a: orbit.delta_sqrt_a,
            e: orbit.e,
            omega: orbit.omega,
            delta_i: orbit.delta_i,
            omega_0: orbit.omega_0,
            omega_dot: orbit.omega_dot,
            m0: orbit.m0,
            af0,
            af1,
            e5b_hs,
            e1b_hs,
        };
        debug!(
            "almanac complete for E{:02} (iod {}, t0a {})",
            almanac.svid, almanac.iod, almanac.t0a
        );
        self.complete[slot] = Some(almanac);
    }
}
