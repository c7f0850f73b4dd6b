//! Galileo I/NAV nominal page assembly
//!
//! A nominal page is 2 x 120 bits (even + odd half) carrying one 128 bit
//! word. u-blox receivers deliver it over eight 32 bit data words with a
//! non contiguous layout: data - tail - data - tail. This module rebuilds
//! the contiguous views the word decoders consume.
pub mod word;

use thiserror::Error;

use crate::{bits::BitReader, page::word::Word, sfrbx::SfrbxMeta};

/// Middle block bits holding the even half tail and the odd half header
pub(crate) const MASK_UTIL: u64 = 0x00003F00_C0000000;

/// Middle block upper data bits (end of the even half)
pub(crate) const MASK_DATA_HI: u64 = 0xFFFFC000_00000000;

/// Middle block lower data bits (start of the odd half)
pub(crate) const MASK_DATA_LO: u64 = 0x00000000_3FFFC000;

/// Reasons an SFRBX payload does not yield an I/NAV word.
/// None of these abort the stream: the page is dropped and tallied.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("unexpected word count {0}")]
    WordCount(u8),
    #[error("alert page")]
    Alert,
    #[error("undefined word type {0}")]
    UnknownType(u8),
    #[error("non zero page tail")]
    NonZeroTail,
    #[error("even/odd half page mismatch")]
    HalfPageMismatch,
}

/// Contiguous bit views over one assembled nominal page, consumed in
/// order by the word decoders: 24 remaining bits of word 1, words 2 and
/// 3, then the 34 bit middle field.
pub(crate) struct PageBits {
    pub rest: BitReader,
    pub w2: BitReader,
    pub w3: BitReader,
    pub mid: BitReader,
}

/// Rebuilds one I/NAV word from the SFRBX data words.
/// `data` are the `numWords x 4` bytes following the SFRBX header,
/// little endian on the wire, MSB first once byte swapped.
pub(crate) fn decode(meta: &SfrbxMeta, data: &[u8]) -> Result<Word, PageError> {
    if !matches!(meta.num_words, 8 | 9) {
        return Err(PageError::WordCount(meta.num_words));
    }

    let word = |nth: usize| -> [u8; 4] {
        [
            data[nth * 4],
            data[nth * 4 + 1],
            data[nth * 4 + 2],
            data[nth * 4 + 3],
        ]
    };

    let mut w1 = BitReader::from_word(word(0));
    let even_odd = w1.take(1) as u8;
    let page_type = w1.take(1) as u8;
    let word_type = w1.take(6) as u8;

    if page_type == 1 {
        return Err(PageError::Alert);
    }
    if !matches!(word_type, 0..=10 | 16..=20 | 63) {
        return Err(PageError::UnknownType(word_type));
    }

    let w4 = u32::from_le_bytes(word(3)) as u64;
    let w5 = u32::from_le_bytes(word(4)) as u64;
    let w_mid = (w4 << 32) | w5;

    // even half tail + odd half header, repacked at the register MSB
    let util = w_mid & MASK_UTIL;
    let mut util = BitReader::from_aligned((util << 18) | (util << 26), 8);
    let tail = util.take(6);
    let odd_flag = util.take(1) as u8;

    if tail != 0 {
        return Err(PageError::NonZeroTail);
    }
    if odd_flag != even_odd ^ 1 {
        // the pair must form an even + odd half page
        return Err(PageError::HalfPageMismatch);
    }

    // 34 contiguous data bits resuming the word after word 3
    let mid = (w_mid & MASK_DATA_HI) | ((w_mid & MASK_DATA_LO) << 16);

    let mut bits = PageBits {
        rest: w1,
        w2: BitReader::from_word(word(1)),
        w3: BitReader::from_word(word(2)),
        mid: BitReader::from_aligned(mid, 34),
    };
    debug_assert_eq!(bits.rest.remaining(), 24);
    debug_assert_eq!(bits.mid.remaining(), 34);

    Word::decode(word_type, &mut bits).ok_or(PageError::UnknownType(word_type))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testkit::PageBuilder;

    fn meta(num_words: u8) -> SfrbxMeta {
        SfrbxMeta {
            gnss_id: 2,
            sv_id: 11,
            sig_id: 1,
            freq_id: 0,
            num_words,
            channel: 0,
            version: 2,
        }
    }

    #[test]
    fn util_mask_packing() {
        // all maskable util bits set: reader must see 8 ones
        let util = 0x3F00C0000000_u64 & MASK_UTIL;
        let mut reader = BitReader::from_aligned((util << 18) | (util << 26), 8);
        assert_eq!(reader.take(8), 0xff);
    }

    #[test]
    fn data_mask_packing() {
        // all maskable data bits set: reader must see 34 ones
        let w_mid = 0xFFFFC0003FFFC000_u64;
        let mid = (w_mid & MASK_DATA_HI) | ((w_mid & MASK_DATA_LO) << 16);
        let mut reader = BitReader::from_aligned(mid, 34);
        assert_eq!(reader.take(34), 0x3_FFFF_FFFF);
    }

    #[test]
    fn dummy_word() {
        let data = PageBuilder::new(63).build(0);
        assert_eq!(decode(&meta(8), &data), Ok(Word::Dummy));

        // odd half leading
        let data = PageBuilder::new(63).build(1);
        assert_eq!(decode(&meta(8), &data), Ok(Word::Dummy));
    }

    #[test]
    fn alert_page_dropped() {
        let mut data = PageBuilder::new(63).build(0);
        data[3] |= 0x40; // page type bit of word 1
        assert_eq!(decode(&meta(8), &data), Err(PageError::Alert));
    }

    #[test]
    fn undefined_word_types_dropped() {
        for word_type in [11, 15, 21, 42, 62] {
            let data = PageBuilder::new(word_type).build(0);
            assert_eq!(
                decode(&meta(8), &data),
                Err(PageError::UnknownType(word_type))
            );
        }
    }

    #[test]
    fn non_zero_tail_dropped() {
        let mut data = PageBuilder::new(63).build(0);
        data[12 + 1] |= 0x20; // one tail bit of word 4
        assert_eq!(decode(&meta(8), &data), Err(PageError::NonZeroTail));
    }

    #[test]
    fn half_page_mismatch_dropped() {
        let mut data = PageBuilder::new(63).build(0);
        data[16 + 3] &= !0x80; // even/odd flag of the odd half (word 5 MSB)
        assert_eq!(decode(&meta(8), &data), Err(PageError::HalfPageMismatch));
    }

    #[test]
    fn word_count_gate() {
        let data = PageBuilder::new(63).build(0);
        assert_eq!(decode(&meta(7), &data), Err(PageError::WordCount(7)));
        assert!(decode(&meta(8), &data).is_ok());
    }
}
