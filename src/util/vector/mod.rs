/*!
Fixed width vectors of byte lanes, as used by
[`PermuteMatcher`](crate::matcher::PermuteMatcher).

A [`Lanes`] value holds one byte per lane. The only interesting operation is
[`Lanes::shuffle`], which builds a vector by looking up every lane of an
index vector in another vector. When both vectors hold DFA state IDs, with
lane `i` holding the state reached from state `i`, a shuffle composes the two
transition functions. Composition is associative, which is what lets a
matcher combine the transitions of several bytes independently before
folding them into its running state.

The lane types are:

* [`Portable16`] and [`Portable32`], plain arrays that work everywhere. They
  are the reference the others are tested against and are never chosen
  automatically.
* On `x86_64`, `Ssse3x16` (one `pshufb`) and `Avx2x32` (two in-lane
  `vpshufb`s and a blend).
* On `aarch64`, `Neon16` (one `tbl`) and `Neon32` (`tbl` over a pair of
  registers).
*/

use core::fmt::Debug;

#[cfg(target_arch = "aarch64")]
pub use self::aarch64::{Neon16, Neon32};
#[cfg(target_arch = "x86_64")]
pub use self::x86_64::{Avx2x32, Ssse3x16};

#[cfg(target_arch = "aarch64")]
mod aarch64;
#[cfg(target_arch = "x86_64")]
mod x86_64;

/// A vector of `WIDTH` byte lanes.
///
/// # Safety
///
/// Implementations must uphold these properties, which
/// [`PermuteMatcher`](crate::matcher::PermuteMatcher) relies on:
///
/// * `Row` is exactly `WIDTH` bytes long.
/// * `shuffle` returns, for every lane `i` with `indices[i] < WIDTH`, lane
///   `indices[i]` of `self`.
/// * `fold` and `fold_sequential` may be called whenever `is_available`
///   returned true, and compute the composition of the rows of `table`
///   selected by `input` applied to `start`.
///
/// All other methods may only be called after `is_available` returned true.
pub unsafe trait Lanes: Copy + Debug + Send + Sync + 'static {
    /// The number of lanes.
    const WIDTH: usize;

    /// The name of the instruction set these lanes use, for error messages
    /// and logs.
    const NAME: &'static str;

    /// One vector's worth of lanes in memory.
    type Row: Copy
        + Debug
        + Default
        + AsRef<[u8]>
        + AsMut<[u8]>
        + Send
        + Sync
        + 'static;

    /// Returns true if the running CPU supports these lanes.
    fn is_available() -> bool;

    /// A vector whose lane `i` holds `i`.
    unsafe fn identity() -> Self;

    /// Load a vector from memory.
    unsafe fn load(row: &Self::Row) -> Self;

    /// A vector whose lane `i` is lane `indices[i]` of `self`.
    unsafe fn shuffle(self, indices: Self) -> Self;

    /// The value of one lane. `lane` must be less than `WIDTH`.
    unsafe fn extract(self, lane: u8) -> u8;

    /// Apply the transitions of every byte of `input` to `start`, combining
    /// seven bytes at a time before touching the running state.
    unsafe fn fold(table: &[Self::Row; 256], input: &[u8], start: u8) -> u8;

    /// Apply the transitions of every byte of `input` to `start`, one byte
    /// at a time.
    unsafe fn fold_sequential(
        table: &[Self::Row; 256],
        input: &[u8],
        start: u8,
    ) -> u8;
}

macro_rules! portable_lanes {
    ($name:ident, $width:expr) => {
        /// Byte lanes stored in a plain array.
        #[derive(Clone, Copy, Debug)]
        pub struct $name([u8; $width]);

        unsafe impl Lanes for $name {
            const WIDTH: usize = $width;
            const NAME: &'static str = "portable";
            type Row = [u8; $width];

            fn is_available() -> bool {
                true
            }

            #[inline(always)]
            unsafe fn identity() -> $name {
                let mut lanes = [0; $width];
                for (i, lane) in lanes.iter_mut().enumerate() {
                    *lane = i as u8;
                }
                $name(lanes)
            }

            #[inline(always)]
            unsafe fn load(row: &[u8; $width]) -> $name {
                $name(*row)
            }

            #[inline(always)]
            unsafe fn shuffle(self, indices: $name) -> $name {
                let mut lanes = [0; $width];
                for (lane, &i) in lanes.iter_mut().zip(indices.0.iter()) {
                    *lane = self.0[usize::from(i) % $width];
                }
                $name(lanes)
            }

            #[inline(always)]
            unsafe fn extract(self, lane: u8) -> u8 {
                self.0[usize::from(lane) % $width]
            }

            unsafe fn fold(
                table: &[[u8; $width]; 256],
                input: &[u8],
                start: u8,
            ) -> u8 {
                crate::matcher::permute::fold_chunked::<$name>(
                    table, input, start,
                )
            }

            unsafe fn fold_sequential(
                table: &[[u8; $width]; 256],
                input: &[u8],
                start: u8,
            ) -> u8 {
                crate::matcher::permute::fold_sequential::<$name>(
                    table, input, start,
                )
            }
        }
    };
}

portable_lanes!(Portable16, 16);
portable_lanes!(Portable32, 32);
