/*!
Finding the first occurrence of a byte.

[`find_byte`] returns the position of the first occurrence of a byte in a
haystack, or the length of the haystack when there is none. The vector
scanners compare two vectors' worth of the haystack against the needle per
iteration, combine both comparison masks into one integer and locate the
first match by counting its trailing zeros. Whatever is left at the end of
the haystack is scanned one byte at a time.
*/

/// A way of searching for a byte.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Scanner {
    /// One byte at a time. This works everywhere and is the reference for
    /// the others.
    Naive,
    /// The `memchr` crate.
    Memchr,
    /// Two 16 byte SSE2 vectors per iteration.
    Sse2,
    /// Two 32 byte AVX2 vectors per iteration.
    Avx2,
}

impl Scanner {
    /// The fastest scanner the running CPU supports.
    pub fn detect() -> Scanner {
        if Scanner::Avx2.is_available() {
            Scanner::Avx2
        } else if Scanner::Sse2.is_available() {
            Scanner::Sse2
        } else {
            Scanner::Memchr
        }
    }

    /// Returns true if this scanner can run on this CPU.
    pub fn is_available(self) -> bool {
        match self {
            Scanner::Naive | Scanner::Memchr => true,
            #[cfg(target_arch = "x86_64")]
            Scanner::Sse2 => is_x86_feature_detected!("sse2"),
            #[cfg(target_arch = "x86_64")]
            Scanner::Avx2 => is_x86_feature_detected!("avx2"),
            #[cfg(not(target_arch = "x86_64"))]
            Scanner::Sse2 | Scanner::Avx2 => false,
        }
    }

    /// Return the position of the first occurrence of `needle` in
    /// `haystack`, or `haystack.len()` if it doesn't occur.
    ///
    /// A scanner that isn't available falls back to [`Scanner::Memchr`].
    pub fn find(self, needle: u8, haystack: &[u8]) -> usize {
        match self {
            Scanner::Naive => find_naive(needle, haystack),
            #[cfg(target_arch = "x86_64")]
            Scanner::Sse2 if self.is_available() => {
                // SAFETY: SSE2 support was just checked.
                unsafe { x86_64::find_sse2(needle, haystack) }
            }
            #[cfg(target_arch = "x86_64")]
            Scanner::Avx2 if self.is_available() => {
                // SAFETY: AVX2 support was just checked.
                unsafe { x86_64::find_avx2(needle, haystack) }
            }
            _ => memchr::memchr(needle, haystack).unwrap_or(haystack.len()),
        }
    }
}

/// Return the position of the first occurrence of `needle` in `haystack`,
/// or `haystack.len()` if it doesn't occur.
///
/// # Example
///
/// ```
/// use regex_derivative::util::scan::find_byte;
///
/// assert_eq!(3, find_byte(b'/', b"abc/def/"));
/// assert_eq!(8, find_byte(b'!', b"abc/def/"));
/// ```
pub fn find_byte(needle: u8, haystack: &[u8]) -> usize {
    Scanner::detect().find(needle, haystack)
}

fn find_naive(needle: u8, haystack: &[u8]) -> usize {
    haystack.iter().position(|&b| b == needle).unwrap_or(haystack.len())
}

#[cfg(target_arch = "x86_64")]
mod x86_64 {
    use core::arch::x86_64::*;

    use super::find_naive;

    #[target_feature(enable = "sse2")]
    pub(super) unsafe fn find_sse2(needle: u8, haystack: &[u8]) -> usize {
        let vn = _mm_set1_epi8(needle as i8);
        let mut at = 0;
        let mut chunks = haystack.chunks_exact(32);
        for chunk in &mut chunks {
            let p = chunk.as_ptr();
            let a = _mm_loadu_si128(p as *const __m128i);
            let b = _mm_loadu_si128(p.add(16) as *const __m128i);
            let m1 = _mm_movemask_epi8(_mm_cmpeq_epi8(a, vn)) as u32;
            let m2 = _mm_movemask_epi8(_mm_cmpeq_epi8(b, vn)) as u32;
            let mask = (m2 << 16) | m1;
            if mask != 0 {
                return at + mask.trailing_zeros() as usize;
            }
            at += 32;
        }
        at + find_naive(needle, chunks.remainder())
    }

    #[target_feature(enable = "avx2")]
    pub(super) unsafe fn find_avx2(needle: u8, haystack: &[u8]) -> usize {
        let vn = _mm256_set1_epi8(needle as i8);
        let mut at = 0;
        let mut chunks = haystack.chunks_exact(64);
        for chunk in &mut chunks {
            let p = chunk.as_ptr();
            let a = _mm256_loadu_si256(p as *const __m256i);
            let b = _mm256_loadu_si256(p.add(32) as *const __m256i);
            let m1 = _mm256_movemask_epi8(_mm256_cmpeq_epi8(a, vn)) as u32;
            let m2 = _mm256_movemask_epi8(_mm256_cmpeq_epi8(b, vn)) as u32;
            let mask = (u64::from(m2) << 32) | u64::from(m1);
            if mask != 0 {
                return at + mask.trailing_zeros() as usize;
            }
            at += 64;
        }
        at + find_naive(needle, chunks.remainder())
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;

    const SCANNERS: &[Scanner] =
        &[Scanner::Naive, Scanner::Memchr, Scanner::Sse2, Scanner::Avx2];

    #[test]
    fn single_needle_everywhere() {
        for len in 1..=200 {
            let mut haystack = vec![0u8; len];
            for k in 0..len {
                haystack[k] = 1;
                for &scanner in SCANNERS {
                    assert_eq!(k, scanner.find(1, &haystack), "{:?}", scanner);
                }
                haystack[k] = 0;
            }
        }
    }

    #[test]
    fn missing_needle() {
        for &scanner in SCANNERS {
            assert_eq!(0, scanner.find(b'a', b""));
            assert_eq!(100, scanner.find(b'a', &[b'b'; 100]));
        }
    }

    #[test]
    fn first_of_many() {
        let mut haystack = vec![b'.'; 300];
        for &i in &[250, 70, 63, 33] {
            haystack[i] = b'x';
            for &scanner in SCANNERS {
                assert_eq!(i, scanner.find(b'x', &haystack), "{:?}", scanner);
            }
        }
    }

    #[test]
    fn detected_is_available() {
        assert!(Scanner::detect().is_available());
        assert!(Scanner::Naive.is_available());
    }

    quickcheck! {
        fn prop_scanners_agree(needle: u8, haystack: Vec<u8>) -> bool {
            let expected = memchr::memchr(needle, &haystack)
                .unwrap_or(haystack.len());
            SCANNERS.iter().all(|s| s.find(needle, &haystack) == expected)
                && find_byte(needle, &haystack) == expected
        }
    }
}
