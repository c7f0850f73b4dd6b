#![doc(html_logo_url = "https://raw.githubusercontent.com/georust/meta/master/logo/logo.png")]
#![doc = include_str!("../README.md")]
#![cfg_attr(docrs, feature(doc_cfg))]

extern crate gnss_rs as gnss;

use thiserror::Error;

use gnss::prelude::Constellation;

mod bits;
mod decoder;
mod navsig;
mod solver;
mod testkit;

pub mod frame;
pub mod health;
pub mod page;
pub mod record;
pub mod sfrbx;

pub mod prelude {
    pub use crate::{
        decoder::Decoder,
        frame::{Checksum, Frame, FrameId, Framer},
        health::{RegionFlags, SvHealth},
        navsig::{NavSig, SigInfo},
        page::word::Word,
        record::{NavFrame, NavHeader, NavRecord, NequickG, TimeOffset},
        sfrbx::{SfrbxMeta, Signal},
        solver::Almanac,
        Counters, Error, GnssTally,
    };
    // re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::Epoch;
}

#[derive(Error, Debug)]
pub enum Error {
    /// Input i/o failure: the only error that aborts a decoding run.
    /// Everything else is dropped, tallied and resynchronized.
    #[error("i/o error")]
    IoError(#[from] std::io::Error),
}

/// Message tally per constellation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GnssTally {
    pub gps: u64,
    pub sbas: u64,
    pub galileo: u64,
    pub beidou: u64,
    pub qzss: u64,
    pub glonass: u64,
    pub unknown: u64,
}

impl GnssTally {
    pub(crate) fn tally(&mut self, constellation: Option<Constellation>) {
        match constellation {
            Some(Constellation::GPS) => self.gps += 1,
            Some(Constellation::SBAS) => self.sbas += 1,
            Some(Constellation::Galileo) => self.galileo += 1,
            Some(Constellation::BeiDou) => self.beidou += 1,
            Some(Constellation::QZSS) => self.qzss += 1,
            Some(Constellation::Glonass) => self.glonass += 1,
            _ => self.unknown += 1,
        }
    }
}

impl std::fmt::Display for GnssTally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Galileo: {}", self.galileo)?;
        writeln!(f, "GPS: {}", self.gps)?;
        writeln!(f, "GLONASS: {}", self.glonass)?;
        writeln!(f, "BeiDou: {}", self.beidou)?;
        writeln!(f, "QZSS: {}", self.qzss)?;
        write!(f, "SBAS: {}", self.sbas)
    }
}

/// Decoding diagnostics. Dropped content never aborts the run, it only
/// shows up here: the user visible failure mode of a degraded stream is
/// fewer emitted records.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Counters {
    /// UBX frames accepted (checksum verified)
    pub frames: u64,
    /// UBX frames dropped on checksum mismatch
    pub bad_checksum: u64,
    /// SFRBX messages accepted
    pub sfrbx: u64,
    /// NAV-SIG messages accepted
    pub nav_sig: u64,
    /// SFRBX origin, per constellation
    pub sfrbx_gnss: GnssTally,
    /// NAV-SIG signal count, per constellation
    pub nav_sig_gnss: GnssTally,
    /// Payloads whose advertised and actual sizes disagree
    pub bad_length: u64,
    /// Galileo pages dropped: alert page
    pub alert_pages: u64,
    /// Galileo pages dropped: word type undefined by I/NAV
    pub unknown_words: u64,
    /// Galileo pages dropped: non zero tail
    pub bad_tail: u64,
    /// Galileo pages dropped: inconsistent even/odd half pair
    pub half_page_mismatch: u64,
    /// I/NAV words decoded
    pub words: u64,
    /// Completed sets suppressed for re-broadcasting a known t0e
    pub duplicates: u64,
}

impl std::fmt::Display for Counters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "UBX frames: {} ({} bad checksum)", self.frames, self.bad_checksum)?;
        writeln!(f, "UBX-RXM-SFRBX: {}", self.sfrbx)?;
        writeln!(f, "{}", self.sfrbx_gnss)?;
        writeln!(f, "UBX-NAV-SIG: {}", self.nav_sig)?;
        writeln!(f, "{}", self.nav_sig_gnss)?;
        writeln!(f, "I/NAV words: {}", self.words)?;
        writeln!(
            f,
            "pages dropped: {} alert, {} unknown type, {} bad tail, {} half page mismatch",
            self.alert_pages, self.unknown_words, self.bad_tail, self.half_page_mismatch
        )?;
        write!(
            f,
            "{} bad length, {} duplicate sets suppressed",
            self.bad_length, self.duplicates
        )
    }
}
