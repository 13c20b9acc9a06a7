use core::fmt::{self, Debug};
use core::hash::Hash;

use crate::{config::Config, dfa::DFA, error::BuildError, matcher::Matcher};

/// The bound on every alphabet a regex can be written over.
///
/// A symbol is a plain value: it must be cheap to clone, totally ordered and
/// hashable (so that it can key the compiler's transition table) and safe to
/// share between threads (so that compiled matchers are).
///
/// This crate implements `Symbol` for `u8`, `u16`, `u32` and `char`. Other
/// alphabets, such as a token enum produced by a lexer, only need to
/// implement this trait with its default methods.
pub trait Symbol: Clone + Debug + Eq + Ord + Hash + Send + Sync + 'static {
    /// Write this symbol as it should appear in the `Display` output of a
    /// regex.
    ///
    /// The default uses the symbol's `Debug` impl.
    fn fmt_symbol(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }

    /// Returns a matcher specialized for this symbol type, if there is one
    /// that fits the given automaton and configuration.
    ///
    /// Returning `Ok(None)` makes the caller fall back to a
    /// [`GenericMatcher`](crate::matcher::GenericMatcher). Only `u8` has
    /// specialized matchers.
    #[doc(hidden)]
    fn specialize(
        dfa: &DFA<Self>,
        config: &Config,
    ) -> Result<Option<Matcher<Self>>, BuildError> {
        let _ = (dfa, config);
        Ok(None)
    }
}

impl Symbol for u8 {
    fn fmt_symbol(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            b'(' | b')' | b'*' | b'|' | b'&' | b'!' | b'.' | b'[' | b']' => {
                write!(f, "\\{}", *self as char)
            }
            b => crate::util::fmt_byte(f, b),
        }
    }

    fn specialize(
        dfa: &DFA<u8>,
        config: &Config,
    ) -> Result<Option<Matcher<u8>>, BuildError> {
        crate::matcher::select_bytes(dfa, config)
    }
}

impl Symbol for u16 {}

impl Symbol for u32 {}

impl Symbol for char {
    fn fmt_symbol(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            '(' | ')' | '*' | '|' | '&' | '!' | '.' | '\\' | '[' | ']' => {
                write!(f, "\\{}", self)
            }
            c if c.is_control() => write!(f, "{}", c.escape_default()),
            c => write!(f, "{}", c),
        }
    }
}
