//! UBX-RXM-SFRBX payload header
use gnss::prelude::Constellation;

/// Fixed SFRBX prefix, ahead of the data words
pub(crate) const SFRBX_HEADER_LEN: usize = 8;

/// I/NAV transmission signal, as reported by the SFRBX `sigId` field.
/// Galileo broadcasts the I/NAV message on two carriers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Signal {
    /// E1-B (sigId 1)
    E1B,
    /// E5b-I (sigId 5)
    E5bI,
}

impl Signal {
    pub(crate) fn from_sig_id(sig_id: u8) -> Option<Self> {
        match sig_id {
            1 => Some(Self::E1B),
            5 => Some(Self::E5bI),
            _ => None,
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::E1B => write!(f, "E1-B"),
            Self::E5bI => write!(f, "E5b-I"),
        }
    }
}

/// Decoded SFRBX payload header: describes the origin of the subframe
/// data words that follow.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SfrbxMeta {
    /// GNSS identifier (2: Galileo)
    pub gnss_id: u8,
    /// Satellite identifier, within constellation
    pub sv_id: u8,
    /// Signal identifier. Formerly reserved, populated on protocol
    /// versions that report the transmitting signal.
    pub sig_id: u8,
    /// GLONASS frequency slot, unused elsewhere
    pub freq_id: u8,
    /// Number of 32 bit data words in this payload
    pub num_words: u8,
    /// Tracking channel
    pub channel: u8,
    /// Message version
    pub version: u8,
}

impl SfrbxMeta {
    /// Decodes the 8 byte SFRBX header. Returns None if the payload is
    /// too short or its word count disagrees with its length.
    pub fn decode(payload: &[u8]) -> Option<Self> {
        if payload.len() < SFRBX_HEADER_LEN {
            return None;
        }
        let meta = Self {
            gnss_id: payload[0],
            sv_id: payload[1],
            sig_id: payload[2],
            freq_id: payload[3],
            num_words: payload[4],
            channel: payload[5],
            version: payload[6],
        };
        if payload.len() != SFRBX_HEADER_LEN + meta.num_words as usize * 4 {
            return None;
        }
        Some(meta)
    }

    /// Maps the `gnssId` field to a [Constellation].
    pub fn constellation(&self) -> Option<Constellation> {
        constellation(self.gnss_id)
    }

    /// Transmitting [Signal], when reported and Galileo.
    pub fn signal(&self) -> Option<Signal> {
        Signal::from_sig_id(self.sig_id)
    }
}

/// u-blox GNSS identifier mapping, common to SFRBX and NAV-SIG.
pub(crate) fn constellation(gnss_id: u8) -> Option<Constellation> {
    match gnss_id {
        0 => Some(Constellation::GPS),
        1 => Some(Constellation::SBAS),
        2 => Some(Constellation::Galileo),
        3 => Some(Constellation::BeiDou),
        5 => Some(Constellation::QZSS),
        6 => Some(Constellation::Glonass),
        _ => None,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn header() {
        let mut payload = vec![2, 11, 5, 0, 8, 3, 2, 0];
        payload.extend_from_slice(&[0; 32]);

        let meta = SfrbxMeta::decode(&payload).unwrap();
        assert_eq!(meta.constellation(), Some(Constellation::Galileo));
        assert_eq!(meta.sv_id, 11);
        assert_eq!(meta.signal(), Some(Signal::E5bI));
        assert_eq!(meta.num_words, 8);

        // truncated data words
        assert!(SfrbxMeta::decode(&payload[..12]).is_none());
        // short header
        assert!(SfrbxMeta::decode(&payload[..7]).is_none());
    }

    #[test]
    fn gnss_ids() {
        assert_eq!(constellation(0), Some(Constellation::GPS));
        assert_eq!(constellation(2), Some(Constellation::Galileo));
        assert_eq!(constellation(6), Some(Constellation::Glonass));
        assert_eq!(constellation(4), None);
        assert_eq!(constellation(7), None);
    }
}
