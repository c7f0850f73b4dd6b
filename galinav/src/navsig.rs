//! UBX-NAV-SIG: per signal information, decoded for diagnostics only
use gnss::prelude::Constellation;

use crate::sfrbx::constellation;

/// Fixed NAV-SIG prefix, ahead of the per signal blocks
const NAVSIG_HEADER_LEN: usize = 8;

/// Size of one per signal block
const SIG_INFO_LEN: usize = 16;

/// One tracked signal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SigInfo {
    /// GNSS identifier
    pub gnss_id: u8,
    /// Satellite identifier, within constellation
    pub sv_id: u8,
    /// Signal identifier
    pub sig_id: u8,
    /// GLONASS frequency slot, unused elsewhere
    pub freq_id: u8,
    /// Pseudorange residual [0.1 m]
    pub pr_res: i16,
    /// Carrier to noise density [dBHz]
    pub cno: u8,
    /// Signal quality indicator
    pub quality: u8,
    /// Correction source in use
    pub corr_source: u8,
    /// Ionospheric model in use
    pub iono_model: u8,
    /// Signal status flags
    pub flags: u16,
}

impl SigInfo {
    /// Maps this signal's `gnssId` to a [Constellation].
    pub fn constellation(&self) -> Option<Constellation> {
        constellation(self.gnss_id)
    }
}

/// Decoded NAV-SIG message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavSig {
    /// GPS time of week [ms]
    pub itow: u32,
    /// Message version
    pub version: u8,
    /// Tracked signals
    pub signals: Vec<SigInfo>,
}

impl NavSig {
    /// Decodes a NAV-SIG payload. Returns None if the advertised signal
    /// count disagrees with the payload length.
    pub fn decode(payload: &[u8]) -> Option<Self> {
        if payload.len() < NAVSIG_HEADER_LEN {
            return None;
        }
        let itow = u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);
        let version = payload[4];
        let num_sigs = payload[5] as usize;

        if payload.len() != NAVSIG_HEADER_LEN + num_sigs * SIG_INFO_LEN {
            return None;
        }

        let signals = (0..num_sigs)
            .map(|nth| {
                let block = &payload[NAVSIG_HEADER_LEN + nth * SIG_INFO_LEN..];
                SigInfo {
                    gnss_id: block[0],
                    sv_id: block[1],
                    sig_id: block[2],
                    freq_id: block[3],
                    pr_res: i16::from_le_bytes([block[4], block[5]]),
                    cno: block[6],
                    quality: block[7],
                    corr_source: block[8],
                    iono_model: block[9],
                    flags: u16::from_le_bytes([block[10], block[11]]),
                }
            })
            .collect();

        Some(Self {
            itow,
            version,
            signals,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn two_signals() {
        let mut payload = vec![0x10, 0x27, 0x00, 0x00, 0x00, 2, 0, 0];
        // Galileo E11
        payload.extend_from_slice(&[2, 11, 1, 0, 0x0a, 0x00, 45, 7, 0, 1, 0x29, 0, 0, 0, 0, 0]);
        // GPS G03
        payload.extend_from_slice(&[0, 3, 0, 0, 0xf6, 0xff, 38, 4, 0, 0, 0x01, 0, 0, 0, 0, 0]);

        let nav_sig = NavSig::decode(&payload).unwrap();
        assert_eq!(nav_sig.itow, 10000);
        assert_eq!(nav_sig.signals.len(), 2);
        assert_eq!(
            nav_sig.signals[0].constellation(),
            Some(Constellation::Galileo)
        );
        assert_eq!(nav_sig.signals[0].cno, 45);
        assert_eq!(nav_sig.signals[1].pr_res, -10);

        // truncated signal block
        assert!(NavSig::decode(&payload[..20]).is_none());
    }
}
