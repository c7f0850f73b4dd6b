//! Synthetic UBX / I/NAV stream synthesis
use galinav::prelude::Checksum;

/// I/NAV word content builder: fields pushed MSB first, in transmission
/// order, starting right after the 6 bit word type.
pub struct PageBuilder {
    bits: Vec<bool>,
}

impl PageBuilder {
    const CONTENT_BITS: usize = 128;

    pub fn new(word_type: u8) -> Self {
        let mut builder = Self { bits: Vec::new() };
        builder.push(word_type as u64, 6);
        builder
    }

    pub fn push(&mut self, value: u64, n: u32) -> &mut Self {
        assert!(self.bits.len() + n as usize <= Self::CONTENT_BITS);
        for i in (0..n).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
        self
    }

    pub fn push_signed(&mut self, value: i64, n: u32) -> &mut Self {
        self.push(value as u64, n)
    }

    /// Eight SFRBX data words (little endian bytes), zero tail,
    /// consistent odd half header.
    pub fn build(&self, even_odd: u8) -> Vec<u8> {
        let mut content = self.bits.clone();
        content.resize(Self::CONTENT_BITS, false);

        let bit = |i: usize| -> u32 { content[i] as u32 };
        let field = |range: std::ops::Range<usize>| -> u32 {
            range.fold(0, |acc, i| (acc << 1) | bit(i))
        };

        let mut words = [0_u32; 8];
        words[0] = (even_odd as u32) << 31 | field(0..30);
        words[1] = field(30..62);
        words[2] = field(62..94);
        words[3] = field(94..112) << 14;
        words[4] = ((even_odd ^ 1) as u32) << 31 | field(112..128) << 14;

        let mut out = Vec::with_capacity(32);
        for word in words {
            out.extend_from_slice(&word.to_le_bytes());
        }
        out
    }

    /// Complete UBX-RXM-SFRBX frame carrying this page.
    pub fn to_frame(&self, gnss_id: u8, sv_id: u8, sig_id: u8, even_odd: u8) -> Vec<u8> {
        let mut payload = vec![gnss_id, sv_id, sig_id, 0, 8, 0, 2, 0];
        payload.extend(self.build(even_odd));
        ubx_frame(0x02, 0x13, &payload)
    }
}

/// Wraps a payload into a valid UBX frame.
pub fn ubx_frame(class: u8, id: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![0xb5, 0x62, class, id];
    out.extend_from_slice(&(payload.len() as u16).to_le_bytes());
    out.extend_from_slice(payload);
    let (ck_a, ck_b) = Checksum::compute(&out[2..]);
    out.push(ck_a);
    out.push(ck_b);
    out
}

/// Minimal NAV-SIG frame: `signals` are (gnssId, svId) pairs.
pub fn nav_sig_frame(signals: &[(u8, u8)]) -> Vec<u8> {
    let mut payload = vec![0, 0, 0, 0, 0, signals.len() as u8, 0, 0];
    for (gnss_id, sv_id) in signals {
        let mut block = [0_u8; 16];
        block[0] = *gnss_id;
        block[1] = *sv_id;
        block[6] = 40; // plausible cno
        payload.extend_from_slice(&block);
    }
    ubx_frame(0x01, 0x43, &payload)
}

/// One ephemeris + health word sequence (types 1-6 and 10) for `sv_id`,
/// with every numeric field derived from `seed` so that two sequences
/// with different seeds never collide.
pub fn full_word_set(sv_id: u8, iod: u16, toe_minutes: u16, seed: u8) -> Vec<Vec<u8>> {
    let s = seed as u64;
    let mut frames = Vec::new();

    let mut w1 = PageBuilder::new(1);
    w1.push(iod as u64, 10)
        .push(toe_minutes as u64, 14)
        .push_signed(-(1 << 28) - s as i64, 32) // M0
        .push(1 << (20 + (s % 4)), 32) // e
        .push(0x2a000000 + (s << 8), 32); // sqrt(A)
    frames.push(w1.to_frame(2, sv_id, 1, 0));

    let mut w2 = PageBuilder::new(2);
    w2.push(iod as u64, 10)
        .push_signed(1 << 29, 32) // Ω0
        .push_signed((1 << 28) + s as i64, 32) // i0
        .push_signed(-(1 << 27), 32) // ω
        .push_signed(-4096 + s as i64, 14); // i_dot
    frames.push(w2.to_frame(2, sv_id, 1, 0));

    let mut w3 = PageBuilder::new(3);
    w3.push(iod as u64, 10)
        .push_signed(-(1 << 21), 24) // Ω_dot
        .push_signed(1 << 13, 16) // Δn
        .push_signed(-(1 << 12), 16) // C_uc
        .push_signed(1 << 12, 16) // C_us
        .push_signed((1 << 9) + s as i64, 16) // C_rc
        .push_signed(-(1 << 9), 16) // C_rs
        .push(107, 8); // SISA
    frames.push(w3.to_frame(2, sv_id, 1, 0));

    let mut w4 = PageBuilder::new(4);
    w4.push(iod as u64, 10)
        .push(sv_id as u64, 6)
        .push_signed(1 << 7, 16) // C_ic
        .push_signed(-(1 << 7), 16) // C_is
        .push(toe_minutes as u64, 14) // t0c
        .push_signed(-(1 << 19) + s as i64, 31) // af0
        .push_signed(1 << 9, 21) // af1
        .push_signed(-8, 6); // af2
    frames.push(w4.to_frame(2, sv_id, 1, 0));

    let mut w5 = PageBuilder::new(5);
    w5.push(180 + s, 11) // ai0
        .push_signed(-128, 11) // ai1
        .push_signed(2048, 14) // ai2
        .push(0, 5) // regions
        .push_signed(-256, 10) // BGD(E1,E5a)
        .push_signed(128, 10) // BGD(E1,E5b)
        .push(0, 2) // E5bHS
        .push(0, 2) // E1BHS
        .push(0, 1) // E5bDVS
        .push(0, 1) // E1BDVS
        .push(1150, 12) // WN
        .push(345600 + s, 20); // TOW
    frames.push(w5.to_frame(2, sv_id, 1, 0));

    let mut w6 = PageBuilder::new(6);
    w6.push_signed(1 << 28, 32) // A0
        .push_signed(-(1 << 19), 24) // A1
        .push_signed(18, 8) // ΔtLS
        .push(120, 8) // t0t
        .push(86, 8) // WN0t
        .push(137, 8) // WNlsf
        .push(7, 3) // DN
        .push_signed(18, 8) // ΔtLSF
        .push(345606, 20); // TOW
    frames.push(w6.to_frame(2, sv_id, 1, 0));

    let mut w10 = PageBuilder::new(10);
    w10.push(6, 4) // IODa
        .push_signed(1 << 13, 16) // Ω0
        .push_signed(-256, 11) // Ω_dot
        .push_signed(-(1 << 13), 16) // M0
        .push_signed(1 << 12, 16) // af0
        .push_signed(-(1 << 10), 13) // af1
        .push(0, 4) // health
        .push_signed(-(1 << 11), 16) // A0G
        .push_signed(128, 12) // A1G
        .push(2, 8) // t0G
        .push(62, 6); // WN0G
    frames.push(w10.to_frame(2, sv_id, 1, 0));

    frames
}
