use regex_derivative::{dfa::DFA, regex::Literal, Matcher, Regex};

use crate::util::{assert_all, byte_backends};

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

/// Matches input outside of C block comments: state 0 is outside, 1 saw a
/// `/`, 2 is inside a comment and 3 saw a `*` inside a comment.
fn c_comment() -> DFA<u8> {
    DFA::from_fn(
        0..=255,
        4,
        |&b, state| match (state, b) {
            (0, b'/') => 1,
            (0, _) => 0,
            (1, b'*') => 2,
            (1, b'/') => 1,
            (1, _) => 0,
            (2, b'*') => 3,
            (3, b'/') => 0,
            (3, b'*') => 3,
            _ => 2,
        },
        vec![0, 1],
    )
    .unwrap()
}

#[test]
fn literal() {
    let a = "a".literal();
    assert!(a.accepts(&chars("a")));
    assert!(!a.accepts(&chars("b")));
    assert!(!a.accepts(&chars("")));

    let m = Matcher::new(&a, chars("ab")).unwrap();
    assert!(m.accepts(&chars("a")));
    assert!(!m.accepts(&chars("b")));
    assert!(!m.accepts(&chars("")));
}

#[test]
fn concatenation() {
    let re = "a".literal() * "b".literal();
    assert!(re.accepts(&chars("ab")));
    assert!(!re.accepts(&chars("ba")));

    let m = Matcher::new(&re, chars("ab")).unwrap();
    assert!(m.accepts(&chars("ab")));
    assert!(!m.accepts(&chars("ba")));
}

#[test]
fn star() {
    let re = "a".literal().star();
    for (input, expected) in [("aaaa", true), ("", true), ("aab", false)] {
        assert_eq!(expected, re.accepts(&chars(input)), "{:?}", input);
        let m = Matcher::new(&re, chars("ab")).unwrap();
        assert_eq!(expected, m.accepts(&chars(input)), "{:?}", input);
    }
}

#[test]
fn complement() {
    // Everything up to length three over {a, b} except exactly "a".
    let re = !"a".literal();
    let m = Matcher::new(&re, chars("ab")).unwrap();
    let mut inputs = vec![String::new()];
    for _ in 0..3 {
        let longer: Vec<String> = inputs
            .iter()
            .flat_map(|s| vec![format!("{}a", s), format!("{}b", s)])
            .collect();
        inputs.extend(longer);
    }
    inputs.sort();
    inputs.dedup();
    for input in inputs {
        let expected = input != "a";
        assert_eq!(expected, re.accepts(&chars(&input)), "{:?}", input);
        assert_eq!(expected, m.accepts(&chars(&input)), "{:?}", input);
    }
}

#[test]
fn c_comment_every_backend() {
    let dfa = c_comment();
    // generic, selected, lookup and both portable permutation matchers at
    // the very least.
    assert!(byte_backends(&dfa).len() >= 5);
    for n in 0..200 {
        let mut input = b"/*".to_vec();
        input.extend(std::iter::repeat(b' ').take(n));
        input.extend_from_slice(b"*/");
        assert_all(&dfa, &input, true);
    }
    assert_all(&dfa, "/* unтерminated".as_bytes(), false);
    assert_all(&dfa, b"", true);
    assert_all(&dfa, b"x/", true);
    assert_all(&dfa, b"/**/ /* **/ /", true);
    assert_all(&dfa, b"/**/ /* *", false);
}

#[test]
fn compiled_regexes_every_backend() {
    let word = b"ab".literal().plus();
    let re = (word.clone() * b" ".literal()).star() * word;
    let dfa = DFA::new(&re, 0..=255).unwrap();
    let inputs: &[(&[u8], bool)] = &[
        (b"ab", true),
        (b"ab abab ab", true),
        (b"ab  ab", false),
        (b"ab ", false),
        (b"", false),
        (b"ab\xFFab", false),
    ];
    for &(input, expected) in inputs {
        assert_eq!(expected, re.accepts(input));
        assert_all(&dfa, input, expected);
    }
}

#[test]
fn laws() {
    let (a, b) = ("a".literal(), "bb".literal());
    let fail = Regex::<char>::fail();
    let eps = Regex::<char>::epsilon();
    let all = !fail.clone();

    assert_eq!(a.star(), a.star().star());
    assert_eq!(eps, eps.star());
    assert_eq!(eps, fail.star());
    assert_eq!(a, !!a.clone());

    assert_eq!(a, a.and(&a));
    assert_eq!(a.and(&b), b.and(&a));
    assert_eq!(fail, fail.and(&a));
    assert_eq!(a, all.and(&a));

    assert_eq!(a, a.or(&a));
    assert_eq!(a.or(&b), b.or(&a));
    assert_eq!(a, fail.or(&a));
    assert_eq!(all, all.or(&a));

    assert_eq!(a.then(&b).then(&a), a.then(&b.then(&a)));
    assert_eq!(fail, fail.then(&a));
    assert_eq!(fail, a.then(&fail));
    assert_eq!(a, eps.then(&a));
    assert_eq!(a, a.then(&eps));
}
