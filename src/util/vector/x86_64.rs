use core::arch::x86_64::*;

use crate::{matcher::permute, util::vector::Lanes};

/// Sixteen byte lanes in an SSE register, shuffled with `pshufb`.
#[derive(Clone, Copy, Debug)]
pub struct Ssse3x16(__m128i);

unsafe impl Lanes for Ssse3x16 {
    const WIDTH: usize = 16;
    const NAME: &'static str = "SSSE3";
    type Row = [u8; 16];

    fn is_available() -> bool {
        is_x86_feature_detected!("ssse3")
    }

    #[inline(always)]
    unsafe fn identity() -> Ssse3x16 {
        Ssse3x16(_mm_setr_epi8(
            0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,
        ))
    }

    #[inline(always)]
    unsafe fn load(row: &[u8; 16]) -> Ssse3x16 {
        Ssse3x16(_mm_loadu_si128(row.as_ptr() as *const __m128i))
    }

    #[inline(always)]
    unsafe fn shuffle(self, indices: Ssse3x16) -> Ssse3x16 {
        Ssse3x16(_mm_shuffle_epi8(self.0, indices.0))
    }

    #[inline(always)]
    unsafe fn extract(self, lane: u8) -> u8 {
        let mut lanes = [0u8; 16];
        _mm_storeu_si128(lanes.as_mut_ptr() as *mut __m128i, self.0);
        lanes[usize::from(lane) % 16]
    }

    unsafe fn fold(table: &[[u8; 16]; 256], input: &[u8], start: u8) -> u8 {
        fold_ssse3(table, input, start)
    }

    unsafe fn fold_sequential(
        table: &[[u8; 16]; 256],
        input: &[u8],
        start: u8,
    ) -> u8 {
        fold_sequential_ssse3(table, input, start)
    }
}

#[target_feature(enable = "ssse3")]
unsafe fn fold_ssse3(table: &[[u8; 16]; 256], input: &[u8], start: u8) -> u8 {
    permute::fold_chunked::<Ssse3x16>(table, input, start)
}

#[target_feature(enable = "ssse3")]
unsafe fn fold_sequential_ssse3(
    table: &[[u8; 16]; 256],
    input: &[u8],
    start: u8,
) -> u8 {
    permute::fold_sequential::<Ssse3x16>(table, input, start)
}

/// Thirty-two byte lanes in an AVX register.
///
/// AVX2's `vpshufb` only shuffles within each 128-bit half, so a full
/// shuffle looks every index up in both halves of the data (each broadcast
/// to the whole register) and blends the two results on whether the index
/// is above 15.
#[derive(Clone, Copy, Debug)]
pub struct Avx2x32(__m256i);

unsafe impl Lanes for Avx2x32 {
    const WIDTH: usize = 32;
    const NAME: &'static str = "AVX2";
    type Row = [u8; 32];

    fn is_available() -> bool {
        is_x86_feature_detected!("avx2")
    }

    #[inline(always)]
    unsafe fn identity() -> Avx2x32 {
        Avx2x32(_mm256_setr_epi8(
            0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18,
            19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31,
        ))
    }

    #[inline(always)]
    unsafe fn load(row: &[u8; 32]) -> Avx2x32 {
        Avx2x32(_mm256_loadu_si256(row.as_ptr() as *const __m256i))
    }

    #[inline(always)]
    unsafe fn shuffle(self, indices: Avx2x32) -> Avx2x32 {
        let low = _mm256_permute2x128_si256::<0x00>(self.0, self.0);
        let high = _mm256_permute2x128_si256::<0x11>(self.0, self.0);
        let from_low = _mm256_shuffle_epi8(low, indices.0);
        let from_high = _mm256_shuffle_epi8(high, indices.0);
        let use_high = _mm256_cmpgt_epi8(indices.0, _mm256_set1_epi8(15));
        Avx2x32(_mm256_blendv_epi8(from_low, from_high, use_high))
    }

    #[inline(always)]
    unsafe fn extract(self, lane: u8) -> u8 {
        let mut lanes = [0u8; 32];
        _mm256_storeu_si256(lanes.as_mut_ptr() as *mut __m256i, self.0);
        lanes[usize::from(lane) % 32]
    }

    unsafe fn fold(table: &[[u8; 32]; 256], input: &[u8], start: u8) -> u8 {
        fold_avx2(table, input, start)
    }

    unsafe fn fold_sequential(
        table: &[[u8; 32]; 256],
        input: &[u8],
        start: u8,
    ) -> u8 {
        fold_sequential_avx2(table, input, start)
    }
}

#[target_feature(enable = "avx2")]
unsafe fn fold_avx2(table: &[[u8; 32]; 256], input: &[u8], start: u8) -> u8 {
    permute::fold_chunked::<Avx2x32>(table, input, start)
}

#[target_feature(enable = "avx2")]
unsafe fn fold_sequential_avx2(
    table: &[[u8; 32]; 256],
    input: &[u8],
    start: u8,
) -> u8 {
    permute::fold_sequential::<Avx2x32>(table, input, start)
}
