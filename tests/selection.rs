use regex_derivative::{
    dfa::DFA,
    matcher::{GenericMatcher, LookupMatcher, PermuteMatcher},
    regex::Literal,
    util::vector::{Portable16, Portable32},
    Matcher, MatcherKind, Regex, Symbol,
};

use crate::Result;

/// A byte DFA with exactly `n` states, all reachable.
fn counter(n: usize) -> DFA<u8> {
    DFA::from_fn(0..=255, n, |_, s| (s + 1) % n, vec![0]).unwrap()
}

#[test]
fn byte_matchers_need_every_byte() -> Result<()> {
    let dfa = DFA::new(&b"ab".literal(), b"ab".iter().copied())?;
    assert!(!dfa.is_byte_complete());
    let err = LookupMatcher::new(&dfa).unwrap_err();
    assert_eq!(
        "byte matchers need a transition for every byte, but the DFA has \
         none for \\x00",
        err.to_string(),
    );
    assert!(PermuteMatcher::<Portable16>::new(&dfa).is_err());

    let m = Matcher::builder().build_from_dfa(dfa)?;
    assert_eq!(MatcherKind::Generic, m.kind());
    assert!(m.accepts(b"ab"));
    assert!(!m.accepts(b"abc"));
    Ok(())
}

#[test]
fn capacity() {
    let err = PermuteMatcher::<Portable16>::new(&counter(17)).unwrap_err();
    assert_eq!(
        "portable matcher supports at most 16 states, but the DFA has 17",
        err.to_string(),
    );
    assert!(PermuteMatcher::<Portable16>::new(&counter(16)).is_ok());

    let err = PermuteMatcher::<Portable32>::new(&counter(33)).unwrap_err();
    assert_eq!(
        "portable matcher supports at most 32 states, but the DFA has 33",
        err.to_string(),
    );
    assert!(PermuteMatcher::<Portable32>::new(&counter(32)).is_ok());

    let err = LookupMatcher::new(&counter(257)).unwrap_err();
    assert_eq!(
        "lookup matcher supports at most 256 states, but the DFA has 257",
        err.to_string(),
    );
    assert!(LookupMatcher::new(&counter(256)).is_ok());
}

#[test]
fn selected_kinds() -> Result<()> {
    let builder = Matcher::builder();
    for n in [1, 16, 17, 32, 33, 256, 257] {
        let m = builder.build_from_dfa(counter(n))?;
        assert_eq!(Some(n), m.state_len());
        let kind = m.kind();
        if n > 256 {
            assert_eq!(MatcherKind::Generic, kind);
        } else if n > 32 {
            assert_eq!(MatcherKind::Lookup, kind);
        } else if n > 16 {
            assert_ne!(MatcherKind::Permute16, kind);
            assert_ne!(MatcherKind::Generic, kind);
        } else {
            assert_ne!(MatcherKind::Generic, kind);
        }
        // A counter modulo n accepts exactly the multiples of n.
        let input = vec![b'x'; 2 * n];
        assert!(m.accepts(&input), "{} states, {:?}", n, kind);
        let rejected = !m.accepts(&input[1..]);
        assert_eq!(n > 1, rejected, "{} states, {:?}", n, kind);
    }
    Ok(())
}

#[test]
fn disabled_vectors_and_optimization() -> Result<()> {
    let re = b"a".literal().star();
    let m = Matcher::builder()
        .configure(Matcher::config().vectorize(false))
        .build_bytes(&re)?;
    assert_eq!(MatcherKind::Lookup, m.kind());

    let m = Matcher::builder()
        .configure(Matcher::config().optimize(false))
        .build_bytes(&re)?;
    assert_eq!(MatcherKind::Generic, m.kind());
    assert!(m.accepts(b"aaa"));
    Ok(())
}

#[test]
fn state_limit() {
    let re = Regex::<u8>::any().star() * b"abcabc".literal();
    let dfa = Matcher::builder().build_dfa(&re, 0..=255).unwrap();
    let n = dfa.state_len();
    let err = Matcher::builder()
        .configure(Matcher::config().state_limit(Some(n - 1)))
        .build_bytes(&re)
        .unwrap_err();
    assert_eq!(
        format!("number of DFA states exceeds limit of {}", n - 1),
        err.to_string(),
    );
    let m = Matcher::builder()
        .configure(Matcher::config().state_limit(Some(n)))
        .build_bytes(&re)
        .unwrap();
    assert!(m.accepts(b"xxabcabcabc"));
}

#[test]
fn invalid_states() {
    let err = DFA::from_fn(0u8..=255, 3, |_, _| 3, vec![0]).unwrap_err();
    assert_eq!(
        "state 3 does not exist in a DFA with 3 states",
        err.to_string(),
    );
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
enum Token {
    Open,
    Close,
    Word,
}

impl Symbol for Token {}

#[test]
fn custom_symbols() -> Result<()> {
    use Token::*;

    // Balanced braces, to any depth.
    let m = GenericMatcher::from_fn(
        0,
        |&tok: &Token, depth| match tok {
            Open => Some(depth + 1),
            Close => depth.checked_sub(1),
            Word => Some(depth),
        },
        vec![0],
    );
    assert!(m.accepts(&[Word, Open, Word, Open, Close, Close]));
    assert!(!m.accepts(&[Open]));
    assert!(!m.accepts(&[Close, Open]));

    // Exactly one level.
    let re = Regex::single(Open) * Regex::single(Word).star()
        * Regex::single(Close);
    let m = Matcher::new(&re, [Open, Close, Word])?;
    assert_eq!(MatcherKind::Generic, m.kind());
    assert!(m.accepts(&[Open, Word, Word, Close]));
    assert!(!m.accepts(&[Open, Open, Close, Close]));
    Ok(())
}
