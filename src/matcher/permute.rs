use core::fmt;

use crate::{dfa::DFA, error::BuildError, util::vector::Lanes};

/// A matcher that runs a byte DFA by composing the transitions of the input
/// as vector shuffles.
///
/// For every byte value there is a row of lanes whose lane `s` holds the
/// state reached from state `s` on that byte. Matching keeps one vector
/// whose lane `s` holds the state reached from `s` on the input consumed so
/// far, and composes it with each byte's row with a single shuffle. Since
/// composition is associative, the rows of seven consecutive bytes are
/// combined pairwise before they touch the running vector, which leaves only
/// three shuffles on the critical path per seven bytes instead of seven.
///
/// The automaton must have at most `V::WIDTH` states and a transition for
/// every byte value.
///
/// # Example
///
/// ```
/// use regex_derivative::{
///     matcher::PermuteMatcher,
///     dfa::DFA,
///     regex::Literal,
///     util::vector::Portable16,
/// };
///
/// let dfa = DFA::new(&b"ab".literal().star(), 0..=255)?;
/// let matcher = PermuteMatcher::<Portable16>::new(&dfa)?;
/// assert!(matcher.accepts(b"ababab"));
/// assert!(!matcher.accepts(b"aba"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct PermuteMatcher<V: Lanes> {
    /// One row per byte value. Lanes at or beyond `state_len` are zero.
    table: Box<[V::Row; 256]>,
    start: u8,
    /// The accepting states. Usually there are only a few, so a linear scan
    /// beats anything fancier.
    accepting: Box<[u8]>,
    state_len: usize,
}

impl<V: Lanes> PermuteMatcher<V> {
    /// Build a permutation matcher from a byte DFA.
    ///
    /// This returns an error if the DFA has more states than `V` has lanes,
    /// if it has no transition for some byte value, or if the running CPU
    /// does not support `V`.
    pub fn new(dfa: &DFA<u8>) -> Result<PermuteMatcher<V>, BuildError> {
        if dfa.state_len() > V::WIDTH {
            return Err(BuildError::capacity(
                V::NAME,
                V::WIDTH,
                dfa.state_len(),
            ));
        }
        if let Some(missing) = dfa.missing_byte() {
            return Err(BuildError::incomplete_alphabet(missing));
        }
        if !V::is_available() {
            return Err(BuildError::unavailable(V::NAME));
        }
        let mut table = Box::new([V::Row::default(); 256]);
        for (byte, row) in (0..=255u8).zip(table.iter_mut()) {
            let lanes = row.as_mut();
            for (state, lane) in lanes[..dfa.state_len()].iter_mut().enumerate()
            {
                let next = dfa
                    .next_state(state, &byte)
                    .ok_or_else(|| BuildError::incomplete_alphabet(byte))?;
                // OK because next < state_len <= WIDTH <= 32.
                *lane = next as u8;
            }
        }
        let accepting =
            dfa.accepting_states().map(|id| id as u8).collect::<Vec<u8>>();
        Ok(PermuteMatcher {
            table,
            start: dfa.start() as u8,
            accepting: accepting.into_boxed_slice(),
            state_len: dfa.state_len(),
        })
    }

    /// Returns true if and only if the automaton accepts all of `input`.
    pub fn accepts(&self, input: &[u8]) -> bool {
        self.accepting.contains(&self.final_state(input))
    }

    /// The state the automaton ends up in after reading `input` from its
    /// start state.
    pub fn final_state(&self, input: &[u8]) -> u8 {
        // SAFETY: construction checked that V is available, and every entry
        // of the table is a state ID less than WIDTH.
        unsafe { V::fold(&self.table, input, self.start) }
    }

    /// Like [`PermuteMatcher::final_state`], but composes one byte at a
    /// time. This always returns the same state and is mostly useful for
    /// testing.
    pub fn final_state_sequential(&self, input: &[u8]) -> u8 {
        // SAFETY: see final_state.
        unsafe { V::fold_sequential(&self.table, input, self.start) }
    }

    /// The number of states in the automaton.
    pub fn state_len(&self) -> usize {
        self.state_len
    }
}

impl<V: Lanes> fmt::Debug for PermuteMatcher<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermuteMatcher")
            .field("lanes", &V::NAME)
            .field("width", &V::WIDTH)
            .field("state_len", &self.state_len)
            .field("start", &self.start)
            .field("accepting", &self.accepting)
            .finish()
    }
}

/// Compose the rows of `table` selected by `input`, seven bytes at a time,
/// and return the lane for `start`.
///
/// This is generic over the lane type and always inlined, so that it gets
/// compiled with whatever target features its caller enables.
///
/// # Safety
///
/// The caller must ensure `V` is available on the running CPU.
#[inline(always)]
pub(crate) unsafe fn fold_chunked<V: Lanes>(
    table: &[V::Row; 256],
    input: &[u8],
    start: u8,
) -> u8 {
    let mut acc = V::identity();
    let mut chunks = input.chunks_exact(7);
    for chunk in &mut chunks {
        let t1 = V::load(row::<V>(table, chunk[0]));
        let t2 = V::load(row::<V>(table, chunk[1]));
        let t3 = V::load(row::<V>(table, chunk[2]));
        let t4 = V::load(row::<V>(table, chunk[3]));
        let t5 = V::load(row::<V>(table, chunk[4]));
        let t6 = V::load(row::<V>(table, chunk[5]));
        let t7 = V::load(row::<V>(table, chunk[6]));

        let t01 = t1.shuffle(acc);
        let t23 = t3.shuffle(t2);
        let t45 = t5.shuffle(t4);
        let t67 = t7.shuffle(t6);

        let t0123 = t23.shuffle(t01);
        let t4567 = t67.shuffle(t45);

        acc = t4567.shuffle(t0123);
    }
    for &byte in chunks.remainder() {
        acc = V::load(row::<V>(table, byte)).shuffle(acc);
    }
    acc.extract(start)
}

/// Compose the rows of `table` selected by `input` one byte at a time, and
/// return the lane for `start`.
///
/// # Safety
///
/// The caller must ensure `V` is available on the running CPU.
#[inline(always)]
pub(crate) unsafe fn fold_sequential<V: Lanes>(
    table: &[V::Row; 256],
    input: &[u8],
    start: u8,
) -> u8 {
    let mut acc = V::identity();
    for &byte in input {
        acc = V::load(row::<V>(table, byte)).shuffle(acc);
    }
    acc.extract(start)
}

#[inline(always)]
fn row<V: Lanes>(table: &[V::Row; 256], byte: u8) -> &V::Row {
    &table[usize::from(byte)]
}

#[cfg(test)]
mod tests {
    use quickcheck::{Arbitrary, Gen};

    use crate::{
        regex::{parse, Encoding, Literal, Regex},
        util::vector::{tests::random_table, Portable16, Portable32},
    };

    use super::*;

    /// Compose random tables with random input every way available and
    /// compare against following the table one state at a time.
    fn check_folds<V: Lanes>() {
        if !V::is_available() {
            return;
        }
        let mut g = Gen::new(64);
        for _ in 0..300 {
            let states = 1 + usize::arbitrary(&mut g) % V::WIDTH;
            let table = random_table::<V>(&mut g, states);
            let start = (usize::arbitrary(&mut g) % states) as u8;
            let input = Vec::<u8>::arbitrary(&mut g);

            let mut expected = start;
            for &b in &input {
                let row = table[usize::from(b)].as_ref();
                expected = row[usize::from(expected)];
            }
            let (chunked, sequential) = unsafe {
                (
                    V::fold(&table, &input, start),
                    V::fold_sequential(&table, &input, start),
                )
            };
            assert_eq!(expected, chunked, "{}: {:?}", V::NAME, input);
            assert_eq!(expected, sequential);
        }
    }

    #[test]
    fn folds_agree_portable() {
        check_folds::<Portable16>();
        check_folds::<Portable32>();
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn folds_agree_x86_64() {
        check_folds::<crate::util::vector::Ssse3x16>();
        check_folds::<crate::util::vector::Avx2x32>();
    }

    #[cfg(target_arch = "aarch64")]
    #[test]
    fn folds_agree_aarch64() {
        check_folds::<crate::util::vector::Neon16>();
        check_folds::<crate::util::vector::Neon32>();
    }

    fn c_comment() -> DFA<u8> {
        DFA::from_fn(
            0..=255,
            4,
            |&b, s| match (s, b) {
                (0, b'/') => 1,
                (0, _) => 0,
                (1, b'*') => 2,
                (1, b'/') => 1,
                (1, _) => 0,
                (2, b'*') => 3,
                (2, _) => 2,
                (3, b'/') => 0,
                (3, b'*') => 3,
                _ => 2,
            },
            vec![0, 1],
        )
        .unwrap()
    }

    #[test]
    fn every_input_length() {
        // Lengths around multiples of the chunk size must agree too.
        let m = PermuteMatcher::<Portable16>::new(&c_comment()).unwrap();
        for n in 0..30 {
            let mut input = b"/*".to_vec();
            input.extend(core::iter::repeat(b' ').take(n));
            assert_eq!(2, m.final_state(&input));
            assert_eq!(2, m.final_state_sequential(&input));
            input.extend_from_slice(b"*/");
            assert_eq!(0, m.final_state(&input));
            assert!(m.accepts(&input));
        }
        assert!(!m.accepts("/* unterminated".as_bytes()));
    }

    #[test]
    fn capacity() {
        let re = Regex::<u8>::any().then(&Regex::any()).star();
        let dfa = DFA::new(&b"abcdefghijklmnopq".literal(), 0..=255).unwrap();
        assert_eq!(19, dfa.state_len());
        let err = PermuteMatcher::<Portable16>::new(&dfa).unwrap_err();
        assert_eq!(
            "portable matcher supports at most 16 states, but the DFA has 19",
            err.to_string(),
        );
        assert!(PermuteMatcher::<Portable32>::new(&dfa).is_ok());

        let partial = DFA::new(&re, 0..=127).unwrap();
        let err = PermuteMatcher::<Portable16>::new(&partial).unwrap_err();
        assert_eq!(
            "byte matchers need a transition for every byte, but the DFA \
             has none for \\x80",
            err.to_string(),
        );
    }

    #[test]
    fn matches_regex() {
        let re = parse("(a|é)*b?").unwrap().encode(Encoding::Utf8);
        let dfa = DFA::new(&re, 0..=255).unwrap();
        let m = PermuteMatcher::<Portable32>::new(&dfa).unwrap();
        for s in &["", "a", "éaé", "aab", "ba", "é"] {
            let bytes = s.as_bytes();
            assert_eq!(re.accepts(bytes), m.accepts(bytes), "{:?}", s);
        }
    }
}
