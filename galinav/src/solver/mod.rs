//! Per satellite accumulation and record emission
mod almanac;

pub use almanac::Almanac;

pub(crate) use almanac::AlmanacBank;

use log::debug;

use gnss::prelude::{Constellation, SV};

use crate::{
    page::word::Word,
    record::{NavHeader, NavRecord, NequickG, TimeOffset},
    sfrbx::Signal,
};

/// Galileo constellation size: svId 1..=36
pub(crate) const SV_COUNT: usize = 36;

/// Process wide header block, each part latched from the first word of
/// its kind seen on the stream.
#[derive(Debug, Default)]
struct HeaderState {
    /// Ionospheric model, from word type 5
    iono: Option<NequickG>,
    /// GST-UTC conversion, from word type 6
    gst_utc: Option<TimeOffset>,
    /// GST-GPS conversion, from word type 10
    gst_gps: Option<TimeOffset>,
    /// Header emitted already
    written: bool,
}

impl HeaderState {
    fn complete(&self) -> Option<NavHeader> {
        Some(NavHeader {
            iono: self.iono?,
            gst_utc: self.gst_utc?,
            gst_gps: self.gst_gps?,
        })
    }
}

/// Mutable per satellite block. Every navigation field starts unset and
/// is filled as its word comes in; the block resets once complete.
#[derive(Debug, Default)]
pub(crate) struct SpaceVehicle {
    toc: Option<u32>,
    clock_bias: Option<f64>,
    clock_drift: Option<f64>,
    clock_drift_rate: Option<f64>,
    iodnav: Option<u16>,
    crs: Option<f64>,
    delta_n: Option<f64>,
    m0: Option<f64>,
    cuc: Option<f64>,
    e: Option<f64>,
    cus: Option<f64>,
    sqrt_a: Option<f64>,
    toe: Option<u32>,
    cic: Option<f64>,
    omega_0: Option<f64>,
    cis: Option<f64>,
    i0: Option<f64>,
    crc: Option<f64>,
    omega: Option<f64>,
    omega_dot: Option<f64>,
    idot: Option<f64>,
    week: Option<u16>,
    sisa: Option<u8>,
    health: Option<crate::health::SvHealth>,
    bgd_e1_e5a: Option<f64>,
    bgd_e1_e5b: Option<f64>,
    /// t0e of the last emitted record, for duplicate suppression
    prev_toe: Option<u32>,
    /// E1-B almanac accumulator
    alm_e1: AlmanacBank,
    /// E5b-I almanac accumulator
    alm_e5b: AlmanacBank,
}

impl SpaceVehicle {
    /// Merges one decoded word into this block.
    fn merge(&mut self, word: &Word, signal: Option<Signal>) {
        match word {
            Word::Ephemeris1(w) => {
                self.iodnav = Some(w.iod);
                self.toe = Some(w.toe);
                self.m0 = Some(w.m0);
                self.e = Some(w.e);
                self.sqrt_a = Some(w.sqrt_a);
            },
            Word::Ephemeris2(w) => {
                self.iodnav = Some(w.iod);
                self.omega_0 = Some(w.omega_0);
                self.i0 = Some(w.i0);
                self.omega = Some(w.omega);
                self.idot = Some(w.idot);
            },
            Word::Ephemeris3(w) => {
                self.iodnav = Some(w.iod);
                self.omega_dot = Some(w.omega_dot);
                self.delta_n = Some(w.delta_n);
                self.cuc = Some(w.cuc);
                self.cus = Some(w.cus);
                self.crc = Some(w.crc);
                self.crs = Some(w.crs);
                self.sisa = Some(w.sisa);
            },
            Word::Ephemeris4(w) => {
                self.iodnav = Some(w.iod);
                self.cic = Some(w.cic);
                self.cis = Some(w.cis);
                self.toc = Some(w.toc);
                self.clock_bias = Some(w.af0);
                self.clock_drift = Some(w.af1);
                self.clock_drift_rate = Some(w.af2);
            },
            Word::IonoGst(w) => {
                self.bgd_e1_e5a = Some(w.bgd_e1_e5a);
                self.bgd_e1_e5b = Some(w.bgd_e1_e5b);
                self.health = Some(w.health());
                self.week = Some(w.week);
            },
            Word::Almanac1(w) => {
                if let Some(bank) = self.bank_mut(signal) {
                    bank.feed1(w);
                }
            },
            Word::Almanac2(w) => {
                if let Some(bank) = self.bank_mut(signal) {
                    bank.feed2(w);
                }
            },
            Word::Almanac3(w) => {
                if let Some(bank) = self.bank_mut(signal) {
                    bank.feed3(w);
                }
            },
            Word::Almanac4(w) => {
                if let Some(bank) = self.bank_mut(signal) {
                    bank.feed4(w);
                }
            },
            // no per satellite content
            Word::GstUtc(_)
            | Word::Spare(_)
            | Word::ReducedCed(_)
            | Word::FecCed(_)
            | Word::Dummy => {},
        }
    }

    fn bank_mut(&mut self, signal: Option<Signal>) -> Option<&mut AlmanacBank> {
        match signal? {
            Signal::E1B => Some(&mut self.alm_e1),
            Signal::E5bI => Some(&mut self.alm_e5b),
        }
    }

    pub(crate) fn bank(&self, signal: Signal) -> &AlmanacBank {
        match signal {
            Signal::E1B => &self.alm_e1,
            Signal::E5bI => &self.alm_e5b,
        }
    }

    /// Builds the navigation record once every field is present.
    fn record(&self, prn: u8) -> Option<NavRecord> {
        Some(NavRecord {
            sv: SV::new(Constellation::Galileo, prn),
            toc: self.toc?,
            week: self.week?,
            clock_bias: self.clock_bias?,
            clock_drift: self.clock_drift?,
            clock_drift_rate: self.clock_drift_rate?,
            iodnav: self.iodnav?,
            crs: self.crs?,
            delta_n: self.delta_n?,
            m0: self.m0?,
            cuc: self.cuc?,
            e: self.e?,
            cus: self.cus?,
            sqrt_a: self.sqrt_a?,
            toe: self.toe?,
            cic: self.cic?,
            omega_0: self.omega_0?,
            cis: self.cis?,
            i0: self.i0?,
            crc: self.crc?,
            omega: self.omega?,
            omega_dot: self.omega_dot?,
            idot: self.idot?,
            sisa: self.sisa?,
            health: self.health?,
            bgd_e1_e5a: self.bgd_e1_e5a?,
            bgd_e1_e5b: self.bgd_e1_e5b?,
        })
    }

    /// Clears the navigation fields. Duplicate tracking and almanac
    /// accumulators survive the reset.
    fn reset(&mut self) {
        self.toc = None;
        self.clock_bias = None;
        self.clock_drift = None;
        self.clock_drift_rate = None;
        self.iodnav = None;
        self.crs = None;
        self.delta_n = None;
        self.m0 = None;
        self.cuc = None;
        self.e = None;
        self.cus = None;
        self.sqrt_a = None;
        self.toe = None;
        self.cic = None;
        self.omega_0 = None;
        self.cis = None;
        self.i0 = None;
        self.crc = None;
        self.omega = None;
        self.omega_dot = None;
        self.idot = None;
        self.week = None;
        self.sisa = None;
        self.health = None;
        self.bgd_e1_e5a = None;
        self.bgd_e1_e5b = None;
    }
}

/// [Solver] owns the 36 satellite table and the header block, merges
/// decoded words and produces the output stream elements.
#[derive(Debug)]
pub(crate) struct Solver {
    svs: Vec<SpaceVehicle>,
    header: HeaderState,
    /// Completed sets suppressed for re-broadcasting a known t0e
    pub duplicates: u64,
}

impl Solver {
    pub fn new() -> Self {
        Self {
            svs: (0..SV_COUNT).map(|_| SpaceVehicle::default()).collect(),
            header: HeaderState::default(),
            duplicates: 0,
        }
    }

    pub fn bank(&self, sv_id: u8, signal: Signal) -> Option<&AlmanacBank> {
        let sv = self.svs.get(sv_id.checked_sub(1)? as usize)?;
        Some(sv.bank(signal))
    }

    /// Merges one word received from `sv_id`. Returns the header block
    /// (first completion only) and/or a completed navigation record.
    pub fn feed(
        &mut self,
        sv_id: u8,
        signal: Option<Signal>,
        word: &Word,
    ) -> (Option<NavHeader>, Option<NavRecord>) {
        // process wide latches, one shot each
        match word {
            Word::IonoGst(w) => {
                if self.header.iono.is_none() {
                    debug!("ionospheric model latched (ai0 {:.3e})", w.ai0);
                    self.header.iono = Some(NequickG {
                        a: (w.ai0, w.ai1, w.ai2),
                        regions: w.regions,
                    });
                }
            },
            Word::GstUtc(w) => {
                if self.header.gst_utc.is_none() {
                    debug!("GST-UTC conversion latched (A0 {:.3e})", w.a0);
                    self.header.gst_utc = Some(TimeOffset {
                        a0: w.a0,
                        a1: w.a1,
                        t_ref: w.t0t,
                        week: w.wn0t as u16,
                    });
                }
            },
            Word::Almanac4(w) => {
                if self.header.gst_gps.is_none() {
                    debug!("GST-GPS conversion latched (A0G {:.3e})", w.a0g);
                    self.header.gst_gps = Some(TimeOffset {
                        a0: w.a0g,
                        a1: w.a1g,
                        t_ref: w.t0g,
                        week: w.wn0g as u16,
                    });
                }
            },
            _ => {},
        }

        let sv = match sv_id {
            1..=36 => &mut self.svs[sv_id as usize - 1],
            _ => return (None, None),
        };
        sv.merge(word, signal);

        // emission gate: full block, full header, new t0e
        let header = match self.header.complete() {
            Some(header) => header,
            None => return (None, None),
        };
        let record = match sv.record(sv_id) {
            Some(record) => record,
            None => return (None, None),
        };

        let toe = record.toe;
        sv.reset();

        if sv.prev_toe == Some(toe) {
            debug!("{}: t0e {} already emitted, suppressed", record.sv, toe);
            self.duplicates += 1;
            return (None, None);
        }
        sv.prev_toe = Some(toe);

        let header = if self.header.written {
            None
        } else {
            self.header.written = true;
            Some(header)
        };
        (header, Some(record))
    }
}
