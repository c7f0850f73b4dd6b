//! Signal health and ionospheric disturbance flags
use bitflags::bitflags;

bitflags! {
    /// Galileo signal health and data validity indication,
    /// packed in RINEX bit order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SvHealth: u16 {
        const E1B_DVS = 0x0001;
        const E1B_HS0 = 0x0002;
        const E1B_HS1 = 0x0004;
        const E5A_DVS = 0x0008;
        const E5A_HS0 = 0x0010;
        const E5A_HS1 = 0x0020;
        const E5B_DVS = 0x0040;
        const E5B_HS0 = 0x0080;
        const E5B_HS1 = 0x0100;
    }

    /// Ionospheric disturbance flags, regions 1-5
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RegionFlags: u8 {
        const REGION5 = 0x01;
        const REGION4 = 0x02;
        const REGION3 = 0x04;
        const REGION2 = 0x08;
        const REGION1 = 0x10;
    }
}

impl SvHealth {
    /// Packs the four health/validity fields broadcast on I/NAV word
    /// type 5. E5a bits are not transmitted there and read zero.
    pub(crate) fn pack(e5b_hs: u8, e1b_hs: u8, e5b_dvs: u8, e1b_dvs: u8) -> Self {
        Self::from_bits_truncate(
            (e5b_hs as u16 & 0x3) << 7
                | (e5b_dvs as u16 & 0x1) << 6
                | (e1b_hs as u16 & 0x3) << 1
                | (e1b_dvs as u16 & 0x1),
        )
    }
}
