use core::arch::aarch64::*;

use crate::{matcher::permute, util::vector::Lanes};

const IDENTITY: [u8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20,
    21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31,
];

/// Sixteen byte lanes in a NEON register, shuffled with `tbl`.
#[derive(Clone, Copy, Debug)]
pub struct Neon16(uint8x16_t);

unsafe impl Lanes for Neon16 {
    const WIDTH: usize = 16;
    const NAME: &'static str = "NEON";
    type Row = [u8; 16];

    fn is_available() -> bool {
        std::arch::is_aarch64_feature_detected!("neon")
    }

    #[inline(always)]
    unsafe fn identity() -> Neon16 {
        Neon16(vld1q_u8(IDENTITY.as_ptr()))
    }

    #[inline(always)]
    unsafe fn load(row: &[u8; 16]) -> Neon16 {
        Neon16(vld1q_u8(row.as_ptr()))
    }

    #[inline(always)]
    unsafe fn shuffle(self, indices: Neon16) -> Neon16 {
        Neon16(vqtbl1q_u8(self.0, indices.0))
    }

    #[inline(always)]
    unsafe fn extract(self, lane: u8) -> u8 {
        let mut lanes = [0u8; 16];
        vst1q_u8(lanes.as_mut_ptr(), self.0);
        lanes[usize::from(lane) % 16]
    }

    unsafe fn fold(table: &[[u8; 16]; 256], input: &[u8], start: u8) -> u8 {
        fold_neon16(table, input, start)
    }

    unsafe fn fold_sequential(
        table: &[[u8; 16]; 256],
        input: &[u8],
        start: u8,
    ) -> u8 {
        fold_sequential_neon16(table, input, start)
    }
}

#[target_feature(enable = "neon")]
unsafe fn fold_neon16(table: &[[u8; 16]; 256], input: &[u8], start: u8) -> u8 {
    permute::fold_chunked::<Neon16>(table, input, start)
}

#[target_feature(enable = "neon")]
unsafe fn fold_sequential_neon16(
    table: &[[u8; 16]; 256],
    input: &[u8],
    start: u8,
) -> u8 {
    permute::fold_sequential::<Neon16>(table, input, start)
}

/// Thirty-two byte lanes in a pair of NEON registers. `tbl` looks indices
/// up across both registers of the table at once.
#[derive(Clone, Copy, Debug)]
pub struct Neon32 {
    low: uint8x16_t,
    high: uint8x16_t,
}

unsafe impl Lanes for Neon32 {
    const WIDTH: usize = 32;
    const NAME: &'static str = "NEON";
    type Row = [u8; 32];

    fn is_available() -> bool {
        std::arch::is_aarch64_feature_detected!("neon")
    }

    #[inline(always)]
    unsafe fn identity() -> Neon32 {
        Neon32::load(&IDENTITY)
    }

    #[inline(always)]
    unsafe fn load(row: &[u8; 32]) -> Neon32 {
        Neon32 {
            low: vld1q_u8(row.as_ptr()),
            high: vld1q_u8(row.as_ptr().add(16)),
        }
    }

    #[inline(always)]
    unsafe fn shuffle(self, indices: Neon32) -> Neon32 {
        let table = uint8x16x2_t(self.low, self.high);
        Neon32 {
            low: vqtbl2q_u8(table, indices.low),
            high: vqtbl2q_u8(table, indices.high),
        }
    }

    #[inline(always)]
    unsafe fn extract(self, lane: u8) -> u8 {
        let mut lanes = [0u8; 32];
        vst1q_u8(lanes.as_mut_ptr(), self.low);
        vst1q_u8(lanes.as_mut_ptr().add(16), self.high);
        lanes[usize::from(lane) % 32]
    }

    unsafe fn fold(table: &[[u8; 32]; 256], input: &[u8], start: u8) -> u8 {
        fold_neon32(table, input, start)
    }

    unsafe fn fold_sequential(
        table: &[[u8; 32]; 256],
        input: &[u8],
        start: u8,
    ) -> u8 {
        fold_sequential_neon32(table, input, start)
    }
}

#[target_feature(enable = "neon")]
unsafe fn fold_neon32(table: &[[u8; 32]; 256], input: &[u8], start: u8) -> u8 {
    permute::fold_chunked::<Neon32>(table, input, start)
}

#[target_feature(enable = "neon")]
unsafe fn fold_sequential_neon32(
    table: &[[u8; 32]; 256],
    input: &[u8],
    start: u8,
) -> u8 {
    permute::fold_sequential::<Neon32>(table, input, start)
}
