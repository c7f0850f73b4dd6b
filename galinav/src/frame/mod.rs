//! UBX frame synchronization and validation
mod checksum;

pub use checksum::Checksum;

use log::warn;

/// First UBX synchronization byte
pub const SYNC_CHAR_1: u8 = 0xb5;

/// Second UBX synchronization byte
pub const SYNC_CHAR_2: u8 = 0x62;

/// Sync pair + class + id + length, prior to the payload
const PREFIX_LEN: usize = 6;

/// Trailing checksum pair
const CHECKSUM_LEN: usize = 2;

/// Consumed message kinds, from the (class, id) pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameId {
    /// UBX-RXM-SFRBX: broadcast navigation subframe data
    RxmSfrbx,
    /// UBX-NAV-SIG: per signal information, diagnostics only
    NavSig,
    /// Any other (class, id): skipped silently
    Unknown(u8, u8),
}

impl FrameId {
    pub(crate) fn from_class_id(class: u8, id: u8) -> Self {
        match (class, id) {
            (0x02, 0x13) => Self::RxmSfrbx,
            (0x01, 0x43) => Self::NavSig,
            (class, id) => Self::Unknown(class, id),
        }
    }
}

/// One checksum validated UBX frame, borrowed from the [Framer] buffer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame<'a> {
    /// Message class
    pub class: u8,
    /// Message id, within class
    pub id: u8,
    /// Length bounded payload
    pub payload: &'a [u8],
}

impl Frame<'_> {
    /// Classifies this frame.
    pub fn frame_id(&self) -> FrameId {
        FrameId::from_class_id(self.class, self.id)
    }
}

/// [Framer] locates message boundaries in an unstructured byte stream.
/// Feed arbitrary chunks with [Framer::extend], drain validated frames
/// with [Framer::next_frame]. Invalid content is skipped byte wise,
/// frames failing the checksum are dropped and the hunt resumes at the
/// byte following their sync pair: a corrupt header length never drives
/// resynchronization.
#[derive(Debug, Default)]
pub struct Framer {
    /// Look ahead buffer
    buf: Vec<u8>,
    /// Read pointer into [Self::buf]
    rd: usize,
    /// Frames dropped on checksum mismatch
    bad_checksum: u64,
}

/// Consumed prefix kept before memmoving the look ahead buffer
const COMPACT_THRESHOLD: usize = 8192;

impl Framer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames dropped on checksum mismatch so far.
    pub fn bad_checksum(&self) -> u64 {
        self.bad_checksum
    }

    /// Appends a chunk read from the stream.
    pub fn extend(&mut self, bytes: &[u8]) {
        if self.rd > COMPACT_THRESHOLD {
            self.buf.drain(..self.rd);
            self.rd = 0;
        }
        self.buf.extend_from_slice(bytes);
    }

    /// Returns the next valid frame, or None once the buffered content
    /// is exhausted (a partially received frame is left in place and
    /// completed by the next [Framer::extend]).
    pub fn next_frame(&mut self) -> Option<Frame<'_>> {
        loop {
            let data = &self.buf[self.rd..];
            let pos = match data.iter().position(|b| *b == SYNC_CHAR_1) {
                Some(pos) => pos,
                None => {
                    // no sync byte in the entire buffer
                    self.rd = self.buf.len();
                    return None;
                },
            };

            if pos + 1 >= data.len() {
                // lone sync byte at the very end: wait for more data
                self.rd += pos;
                return None;
            }
            if data[pos + 1] != SYNC_CHAR_2 {
                self.rd += pos + 1;
                continue;
            }

            if data.len() < pos + PREFIX_LEN {
                self.rd += pos;
                return None;
            }
            let len: usize = u16::from_le_bytes([data[pos + 4], data[pos + 5]]).into();
            if data.len() < pos + PREFIX_LEN + len + CHECKSUM_LEN {
                self.rd += pos;
                return None;
            }

            let (ck_a, ck_b) = Checksum::compute(&data[pos + 2..pos + PREFIX_LEN + len]);
            let (expect_ck_a, expect_ck_b) =
                (data[pos + PREFIX_LEN + len], data[pos + PREFIX_LEN + len + 1]);
            if (ck_a, ck_b) != (expect_ck_a, expect_ck_b) {
                warn!(
                    "dropped frame (class {:#04x} id {:#04x}): checksum {:02x}{:02x} expected {:02x}{:02x}",
                    data[pos + 2],
                    data[pos + 3],
                    ck_a,
                    ck_b,
                    expect_ck_a,
                    expect_ck_b
                );
                self.bad_checksum += 1;
                self.rd += pos + 2;
                continue;
            }

            let class = data[pos + 2];
            let id = data[pos + 3];
            let start = self.rd + pos + PREFIX_LEN;
            self.rd += pos + PREFIX_LEN + len + CHECKSUM_LEN;
            return Some(Frame {
                class,
                id,
                payload: &self.buf[start..start + len],
            });
        }
    }
}
