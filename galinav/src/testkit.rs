//! Unit test helpers: synthetic I/NAV pages
#![cfg(test)]

/// Builds the eight SFRBX data words transporting one I/NAV word.
/// Fields are pushed MSB first, in transmission order, starting right
/// after the 6 bit word type. Unset content reads zero.
pub(crate) struct PageBuilder {
    bits: Vec<bool>,
}

impl PageBuilder {
    /// Word content capacity: 6 bit type + 122 data bits
    const CONTENT_BITS: usize = 128;

    pub fn new(word_type: u8) -> Self {
        let mut builder = Self { bits: Vec::new() };
        builder.push(word_type as u64, 6);
        builder
    }

    /// Appends the `n` low bits of `value`, MSB first.
    pub fn push(&mut self, value: u64, n: u32) -> &mut Self {
        assert!(self.bits.len() + n as usize <= Self::CONTENT_BITS);
        for i in (0..n).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
        self
    }

    /// Signed flavor of [Self::push]: two's complement over `n` bits.
    pub fn push_signed(&mut self, value: i64, n: u32) -> &mut Self {
        self.push(value as u64, n)
    }

    /// Lays the content out over eight 32 bit data words (little endian
    /// bytes), with a zero tail and a consistent odd half page header.
    pub fn build(&self, even_odd: u8) -> Vec<u8> {
        let mut content = self.bits.clone();
        content.resize(Self::CONTENT_BITS, false);

        let bit = |i: usize| -> u32 { content[i] as u32 };
        let field = |range: std::ops::Range<usize>| -> u32 {
            range.fold(0, |acc, i| (acc << 1) | bit(i))
        };

        let mut words = [0_u32; 8];
        // even half: header, then content bits 0..94
        words[0] = (even_odd as u32) << 31 | field(0..30);
        words[1] = field(30..62);
        words[2] = field(62..94);
        // end of the even half: 18 content bits, 6 bit tail, padding
        words[3] = field(94..112) << 14;
        // odd half: complementary header, 16 content bits, padding
        words[4] = ((even_odd ^ 1) as u32) << 31 | field(112..128) << 14;

        let mut out = Vec::with_capacity(32);
        for word in words {
            out.extend_from_slice(&word.to_le_bytes());
        }
        out
    }
}

/// Galileo SFRBX header for direct page decoding.
pub(crate) fn galileo_meta(sv_id: u8, sig_id: u8) -> crate::sfrbx::SfrbxMeta {
    crate::sfrbx::SfrbxMeta {
        gnss_id: 2,
        sv_id,
        sig_id,
        freq_id: 0,
        num_words: 8,
        channel: 0,
        version: 2,
    }
}
