//! Stream decoder: UBX bytes in, navigation records out
use std::collections::VecDeque;
use std::io::Read;

#[cfg(feature = "flate2")]
use flate2::read::GzDecoder;

use log::{debug, trace};

use gnss::prelude::Constellation;

use crate::{
    frame::{FrameId, Framer},
    navsig::NavSig,
    page::{self, PageError},
    record::NavFrame,
    sfrbx::{SfrbxMeta, Signal, SFRBX_HEADER_LEN},
    solver::{Almanac, Solver},
    Counters, Error,
};

/// Stream read granularity
const CHUNK_SIZE: usize = 2048;

/// [Decoder] consumes a UBX byte stream in a single pass and yields the
/// Galileo navigation data it carries: a one shot [NavFrame::Header]
/// followed by one [NavFrame::Ephemeris] per completed per satellite
/// set. All decoding problems short of an input i/o error are handled
/// by dropping the affected frame or page, see [Counters].
///
/// ```no_run
/// use std::fs::File;
/// use galinav::prelude::{Decoder, NavFrame};
///
/// let fd = File::open("COM3_210730_115228.ubx")
///     .unwrap();
///
/// let mut decoder = Decoder::new(fd);
///
/// loop {
///     match decoder.next() {
///         Some(Ok(NavFrame::Header(hdr))) => {
///             println!("{}", hdr);
///         },
///         Some(Ok(NavFrame::Ephemeris(rec))) => {
///             println!("{}", rec);
///         },
///         Some(Err(e)) => {
///             // i/o errors are the only failures surfaced
///             panic!("i/o error: {}", e);
///         },
///         None => {
///             // reached end of stream
///             break;
///         },
///     }
/// }
/// ```
pub struct Decoder<R: Read> {
    /// Byte source
    reader: R,
    /// Read scratch
    chunk: [u8; CHUNK_SIZE],
    /// UBX synchronization and validation
    framer: Framer,
    /// Satellite table + header block
    solver: Solver,
    /// Completed elements not yet handed out
    pending: VecDeque<NavFrame>,
    /// Diagnostics
    counters: Counters,
}

impl<R: Read> Decoder<R> {
    /// Builds a [Decoder] over any readable interface.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            chunk: [0; CHUNK_SIZE],
            framer: Framer::new(),
            solver: Solver::new(),
            pending: VecDeque::new(),
            counters: Counters::default(),
        }
    }

    /// Diagnostics snapshot: frame, message and drop tallies so far.
    pub fn counters(&self) -> Counters {
        let mut counters = self.counters.clone();
        counters.bad_checksum = self.framer.bad_checksum();
        counters.duplicates = self.solver.duplicates;
        counters
    }

    /// Almanacs rebuilt so far from pages `sv_id` transmitted on
    /// `signal`. Almanacs describe the whole constellation and are not
    /// part of the navigation records.
    pub fn almanacs(&self, sv_id: u8, signal: Signal) -> impl Iterator<Item = &Almanac> {
        self.solver
            .bank(sv_id, signal)
            .into_iter()
            .flat_map(|bank| bank.almanacs())
    }

    /// Decodes one SFRBX frame down to the accumulator.
    fn process_sfrbx(
        counters: &mut Counters,
        solver: &mut Solver,
        pending: &mut VecDeque<NavFrame>,
        payload: &[u8],
    ) {
        counters.sfrbx += 1;

        let meta = match SfrbxMeta::decode(payload) {
            Some(meta) => meta,
            None => {
                counters.bad_length += 1;
                return;
            },
        };
        counters.sfrbx_gnss.tally(meta.constellation());

        if meta.constellation() != Some(Constellation::Galileo) {
            return;
        }

        let word = match page::decode(&meta, &payload[SFRBX_HEADER_LEN..]) {
            Ok(word) => word,
            Err(e) => {
                trace!("E{:02}: page dropped: {}", meta.sv_id, e);
                match e {
                    PageError::Alert => counters.alert_pages += 1,
                    PageError::UnknownType(_) => counters.unknown_words += 1,
                    PageError::NonZeroTail => counters.bad_tail += 1,
                    PageError::HalfPageMismatch => counters.half_page_mismatch += 1,
                    PageError::WordCount(_) => counters.bad_length += 1,
                }
                return;
            },
        };

        counters.words += 1;
        trace!("E{:02} ({:?}): {:?}", meta.sv_id, meta.signal(), word);

        let (header, record) = solver.feed(meta.sv_id, meta.signal(), &word);
        if let Some(header) = header {
            debug!("header block complete");
            pending.push_back(NavFrame::Header(header));
        }
        if let Some(record) = record {
            debug!("{}: complete set for t0e {}", record.sv, record.toe);
            pending.push_back(NavFrame::Ephemeris(record));
        }
    }

    fn process_nav_sig(counters: &mut Counters, payload: &[u8]) {
        counters.nav_sig += 1;
        match NavSig::decode(payload) {
            Some(nav_sig) => {
                for sig in &nav_sig.signals {
                    counters.nav_sig_gnss.tally(sig.constellation());
                }
            },
            None => counters.bad_length += 1,
        }
    }
}

#[cfg(feature = "flate2")]
impl<R: Read> Decoder<GzDecoder<R>> {
    /// Builds a [Decoder] over a Gzip compressed recording.
    pub fn new_gzip(reader: R) -> Self {
        Self::new(GzDecoder::new(reader))
    }
}

impl<R: Read> Iterator for Decoder<R> {
    type Item = Result<NavFrame, Error>;

    /// Pulls the next navigation element out of the stream.
    /// `None` marks a clean end of stream, truncation included.
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(frame) = self.pending.pop_front() {
                return Some(Ok(frame));
            }

            if let Some(frame) = self.framer.next_frame() {
                self.counters.frames += 1;
                match frame.frame_id() {
                    FrameId::RxmSfrbx => {
                        Self::process_sfrbx(
                            &mut self.counters,
                            &mut self.solver,
                            &mut self.pending,
                            frame.payload,
                        );
                    },
                    FrameId::NavSig => {
                        Self::process_nav_sig(&mut self.counters, frame.payload);
                    },
                    FrameId::Unknown(..) => {},
                }
                continue;
            }

            // framer exhausted: pull more bytes
            match self.reader.read(&mut self.chunk) {
                Ok(0) => return None,
                Ok(size) => self.framer.extend(&self.chunk[..size]),
                Err(e) => return Some(Err(Error::IoError(e))),
            }
        }
    }
}
