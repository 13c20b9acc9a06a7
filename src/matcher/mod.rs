/*!
Matchers: compiled regexes that answer whether a whole input matches.

A [`Matcher`] is built by a [`Builder`], which compiles a regex into a
[`DFA`] and then picks the fastest backend that can run it:

1. For byte automata with a transition for every byte value, at most 16 (or
   32) states, and a CPU with the right vector instructions, a
   [`PermuteMatcher`] that composes transitions with vector shuffles. The
   narrower lane type is preferred when both fit.
2. For byte automata with a transition for every byte value and at most 256
   states, a [`LookupMatcher`] with one table lookup per byte.
3. For everything else, a [`GenericMatcher`].

Each backend can also be built directly from a DFA. A backend built that way
reports an error, instead of misbehaving, when the DFA doesn't fit it.

Every matcher is immutable, and can be shared between threads and used
concurrently without synchronization. Matching never fails.

# Example

```
use regex_derivative::{
    matcher::{Matcher, MatcherKind},
    regex::{parse, Encoding},
};

let re = parse("(a|é)+")?;
let chars = Matcher::new(&re, vec!['a', 'é'])?;
assert_eq!(MatcherKind::Generic, chars.kind());
assert!(chars.accepts(&['é', 'a']));

// The same regex over UTF-8, matched without vector instructions.
let bytes = Matcher::builder()
    .configure(Matcher::config().vectorize(false))
    .build_encoded(&re, Encoding::Utf8)?;
assert_eq!(MatcherKind::Lookup, bytes.kind());
assert!(bytes.accepts("éa".as_bytes()));
assert!(!bytes.accepts(b"\xC3"));
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use core::fmt::Debug;

use std::sync::Arc;

use crate::{
    config::Config,
    dfa::DFA,
    error::BuildError,
    regex::{Encoding, Regex},
    util::{symbol::Symbol, vector::Lanes},
};

pub use self::{
    generic::GenericMatcher, lookup::LookupMatcher, permute::PermuteMatcher,
};

mod generic;
mod lookup;
pub(crate) mod permute;

/// The interface every matcher backend implements.
pub(crate) trait Strategy<T>: Debug + Send + Sync + 'static {
    fn accepts(&self, input: &[T]) -> bool;

    fn kind(&self) -> MatcherKind;

    fn state_len(&self) -> Option<usize>;
}

impl<T: Symbol> Strategy<T> for GenericMatcher<T> {
    fn accepts(&self, input: &[T]) -> bool {
        GenericMatcher::accepts(self, input)
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::Generic
    }

    fn state_len(&self) -> Option<usize> {
        GenericMatcher::state_len(self)
    }
}

impl Strategy<u8> for LookupMatcher {
    fn accepts(&self, input: &[u8]) -> bool {
        LookupMatcher::accepts(self, input)
    }

    fn kind(&self) -> MatcherKind {
        MatcherKind::Lookup
    }

    fn state_len(&self) -> Option<usize> {
        Some(LookupMatcher::state_len(self))
    }
}

impl<V: Lanes> Strategy<u8> for PermuteMatcher<V> {
    fn accepts(&self, input: &[u8]) -> bool {
        PermuteMatcher::accepts(self, input)
    }

    fn kind(&self) -> MatcherKind {
        if V::WIDTH <= 16 {
            MatcherKind::Permute16
        } else {
            MatcherKind::Permute32
        }
    }

    fn state_len(&self) -> Option<usize> {
        Some(PermuteMatcher::state_len(self))
    }
}

/// Which backend a [`Matcher`] uses.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum MatcherKind {
    /// A [`GenericMatcher`].
    Generic,
    /// A [`LookupMatcher`].
    Lookup,
    /// A [`PermuteMatcher`] with 16 lanes.
    Permute16,
    /// A [`PermuteMatcher`] with 32 lanes.
    Permute32,
}

/// A compiled regex over symbols of type `T`.
///
/// Cloning a matcher is cheap: every clone shares the same backend.
pub struct Matcher<T> {
    imp: Arc<dyn Strategy<T>>,
}

impl<T: Symbol> Matcher<T> {
    /// Compile a regex over the given alphabet with the default
    /// configuration.
    ///
    /// Input containing a symbol outside of `alphabet` never matches.
    pub fn new<I: IntoIterator<Item = T>>(
        regex: &Regex<T>,
        alphabet: I,
    ) -> Result<Matcher<T>, BuildError> {
        Builder::new().build(regex, alphabet)
    }

    /// Returns true if and only if the compiled regex matches all of
    /// `input`.
    pub fn accepts(&self, input: &[T]) -> bool {
        self.imp.accepts(input)
    }

    /// Which backend this matcher uses.
    pub fn kind(&self) -> MatcherKind {
        self.imp.kind()
    }

    /// The number of states of the automaton this matcher runs.
    ///
    /// This is only unknown for a [`GenericMatcher`] built with
    /// [`GenericMatcher::from_fn`].
    pub fn state_len(&self) -> Option<usize> {
        self.imp.state_len()
    }
}

impl Matcher<u8> {
    /// Return a default configuration for a `Matcher`.
    ///
    /// This is a convenience routine to avoid needing to import the
    /// `Config` type when customizing the construction of a matcher.
    pub fn config() -> Config {
        Config::new()
    }

    /// Return a builder for configuring the construction of a `Matcher`.
    ///
    /// This is a convenience routine to avoid needing to import the
    /// [`Builder`] type in common cases. The builder compiles regexes over
    /// any symbol type, not just bytes.
    pub fn builder() -> Builder {
        Builder::new()
    }
}

impl<T> Clone for Matcher<T> {
    fn clone(&self) -> Matcher<T> {
        Matcher { imp: Arc::clone(&self.imp) }
    }
}

impl<T> Debug for Matcher<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Matcher").field(&self.imp).finish()
    }
}

impl<T: Symbol> From<GenericMatcher<T>> for Matcher<T> {
    fn from(m: GenericMatcher<T>) -> Matcher<T> {
        Matcher { imp: Arc::new(m) }
    }
}

impl From<LookupMatcher> for Matcher<u8> {
    fn from(m: LookupMatcher) -> Matcher<u8> {
        Matcher { imp: Arc::new(m) }
    }
}

impl<V: Lanes> From<PermuteMatcher<V>> for Matcher<u8> {
    fn from(m: PermuteMatcher<V>) -> Matcher<u8> {
        Matcher { imp: Arc::new(m) }
    }
}

/// A matcher for strings, running a byte matcher over their UTF-8
/// encoding.
///
/// # Example
///
/// ```
/// use regex_derivative::{matcher::StrMatcher, regex::parse};
///
/// let m = StrMatcher::new(&parse("(€|$)(0|1)+")?)?;
/// assert!(m.accepts("€101"));
/// assert!(!m.accepts("£101"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct StrMatcher {
    bytes: Matcher<u8>,
}

impl StrMatcher {
    /// Compile a regex over characters with the default configuration.
    pub fn new(regex: &Regex<char>) -> Result<StrMatcher, BuildError> {
        Builder::new().build_str(regex)
    }

    /// Returns true if and only if the compiled regex matches all of
    /// `haystack`.
    pub fn accepts(&self, haystack: &str) -> bool {
        self.bytes.accepts(haystack.as_bytes())
    }

    /// The byte matcher running the UTF-8 encoding of the regex.
    pub fn as_bytes(&self) -> &Matcher<u8> {
        &self.bytes
    }
}

/// A builder for compiling regexes into matchers.
///
/// The builder holds a [`Config`], which controls how big the automaton may
/// get and which backends may be selected. One builder can compile any
/// number of regexes, over any symbol type.
///
/// # Example
///
/// ```
/// use regex_derivative::{
///     matcher::{Matcher, MatcherKind},
///     regex::Literal,
/// };
///
/// let re = b"abc".literal().star();
/// let m = Matcher::builder()
///     .configure(Matcher::config().optimize(false))
///     .build_bytes(&re)?;
/// assert_eq!(MatcherKind::Generic, m.kind());
/// assert!(m.accepts(b"abcabc"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new builder with a default configuration.
    pub fn new() -> Builder {
        Builder { config: Config::default() }
    }

    /// Apply the given configuration options to this builder.
    ///
    /// Options set in `config` replace the ones set before, and options not
    /// set in `config` are left alone.
    pub fn configure(&mut self, config: Config) -> &mut Builder {
        self.config = self.config.overwrite(config);
        self
    }

    /// Compile a regex over the given alphabet into a matcher.
    pub fn build<T, I>(
        &self,
        regex: &Regex<T>,
        alphabet: I,
    ) -> Result<Matcher<T>, BuildError>
    where
        T: Symbol,
        I: IntoIterator<Item = T>,
    {
        let dfa = self.build_dfa(regex, alphabet)?;
        self.build_from_dfa(dfa)
    }

    /// Compile a regex over the given alphabet into a DFA, honoring this
    /// builder's state limit.
    pub fn build_dfa<T, I>(
        &self,
        regex: &Regex<T>,
        alphabet: I,
    ) -> Result<DFA<T>, BuildError>
    where
        T: Symbol,
        I: IntoIterator<Item = T>,
    {
        DFA::with_config(&self.config, regex, alphabet)
    }

    /// Pick a backend for an existing DFA.
    pub fn build_from_dfa<T: Symbol>(
        &self,
        dfa: DFA<T>,
    ) -> Result<Matcher<T>, BuildError> {
        if self.config.get_optimize() {
            if let Some(m) = T::specialize(&dfa, &self.config)? {
                return Ok(m);
            }
        } else {
            trace!("specialized matchers disabled");
        }
        debug!("using generic matcher with {} states", dfa.state_len());
        Ok(Matcher::from(GenericMatcher::new(dfa)))
    }

    /// Compile a regex over bytes, with every byte value in its alphabet.
    pub fn build_bytes(
        &self,
        regex: &Regex<u8>,
    ) -> Result<Matcher<u8>, BuildError> {
        self.build(regex, 0..=255)
    }

    /// Compile a regex over characters into a matcher for their encoding.
    ///
    /// The matcher accepts `encoding.encode_str(s)` exactly when `regex`
    /// matches the characters of `s`. Its verdict on bytes that are not a
    /// valid encoding is unspecified.
    pub fn build_encoded(
        &self,
        regex: &Regex<char>,
        encoding: Encoding,
    ) -> Result<Matcher<u8>, BuildError> {
        self.build_bytes(&regex.encode(encoding))
    }

    /// Compile a regex over characters into a matcher for strings.
    pub fn build_str(
        &self,
        regex: &Regex<char>,
    ) -> Result<StrMatcher, BuildError> {
        let bytes = self.build_encoded(regex, Encoding::Utf8)?;
        Ok(StrMatcher { bytes })
    }
}

impl Default for Builder {
    fn default() -> Builder {
        Builder::new()
    }
}

/// Pick a byte backend for the given DFA, or `None` if only the generic
/// matcher can run it.
pub(crate) fn select_bytes(
    dfa: &DFA<u8>,
    config: &Config,
) -> Result<Option<Matcher<u8>>, BuildError> {
    if !dfa.is_byte_complete() {
        debug!("byte matchers skipped: DFA lacks transitions for some bytes");
        return Ok(None);
    }
    if config.get_vectorize() {
        if let Some(m) = select_vector(dfa)? {
            return Ok(Some(m));
        }
    } else {
        trace!("vector matchers disabled");
    }
    if dfa.state_len() <= LookupMatcher::MAX_STATES {
        debug!("using lookup matcher with {} states", dfa.state_len());
        return Ok(Some(LookupMatcher::new(dfa)?.into()));
    }
    debug!("byte matchers skipped: {} states", dfa.state_len());
    Ok(None)
}

#[cfg(target_arch = "x86_64")]
fn select_vector(dfa: &DFA<u8>) -> Result<Option<Matcher<u8>>, BuildError> {
    use crate::util::vector::{Avx2x32, Ssse3x16};

    if let Some(m) = try_permute::<Ssse3x16>(dfa)? {
        return Ok(Some(m));
    }
    try_permute::<Avx2x32>(dfa)
}

#[cfg(target_arch = "aarch64")]
fn select_vector(dfa: &DFA<u8>) -> Result<Option<Matcher<u8>>, BuildError> {
    use crate::util::vector::{Neon16, Neon32};

    if let Some(m) = try_permute::<Neon16>(dfa)? {
        return Ok(Some(m));
    }
    try_permute::<Neon32>(dfa)
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn select_vector(_: &DFA<u8>) -> Result<Option<Matcher<u8>>, BuildError> {
    trace!("no vector matchers for this target");
    Ok(None)
}

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
fn try_permute<V: Lanes>(
    dfa: &DFA<u8>,
) -> Result<Option<Matcher<u8>>, BuildError> {
    if dfa.state_len() > V::WIDTH {
        trace!(
            "{}-lane {} matcher skipped: {} states",
            V::WIDTH,
            V::NAME,
            dfa.state_len(),
        );
        return Ok(None);
    }
    if !V::is_available() {
        trace!("{}-lane {} matcher skipped: unavailable", V::WIDTH, V::NAME);
        return Ok(None);
    }
    let m = PermuteMatcher::<V>::new(dfa)?;
    debug!(
        "using {}-lane {} matcher with {} states",
        V::WIDTH,
        V::NAME,
        dfa.state_len(),
    );
    Ok(Some(m.into()))
}
