/*!
Supporting code for regexes and matchers: the [`Symbol`](symbol::Symbol)
bound on alphabets, the vector lane types used by
[`PermuteMatcher`](crate::matcher::PermuteMatcher), and a vectorized byte
scan.
*/

use core::{ascii, fmt};

pub mod scan;
pub mod symbol;
pub mod vector;

pub(crate) mod fnv;

/// A type that wraps a single byte with a convenient fmt::Debug impl that
/// escapes the byte.
pub(crate) struct DebugByte(pub u8);

impl fmt::Debug for DebugByte {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_byte(f, self.0)
    }
}

/// Write the byte in its escaped form (using ascii::escape_default) to the
/// given formatter without allocating.
pub(crate) fn fmt_byte(f: &mut fmt::Formatter, b: u8) -> fmt::Result {
    for (i, mut b) in ascii::escape_default(b).enumerate() {
        // capitalize \xab to \xAB
        if i >= 2 && b'a' <= b && b <= b'f' {
            b -= 32;
        }
        write!(f, "{}", b as char)?;
    }
    Ok(())
}
