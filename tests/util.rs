use bstr::ByteSlice;
use regex_derivative::{
    dfa::DFA,
    matcher::{GenericMatcher, LookupMatcher, Matcher, PermuteMatcher},
    util::vector::{Lanes, Portable16, Portable32},
};

/// A matcher under test, with a name for assertion messages.
pub struct Backend {
    pub name: String,
    accepts: Box<dyn Fn(&[u8]) -> bool>,
}

impl Backend {
    pub fn accepts(&self, input: &[u8]) -> bool {
        (self.accepts)(input)
    }
}

/// Every byte matcher that can run the given DFA, built directly or through
/// the selector.
pub fn byte_backends(dfa: &DFA<u8>) -> Vec<Backend> {
    let mut backends = vec![];

    let generic = GenericMatcher::new(dfa.clone());
    backends.push(Backend {
        name: "generic".to_string(),
        accepts: Box::new(move |input| generic.accepts(input)),
    });
    let selected = Matcher::builder().build_from_dfa(dfa.clone()).unwrap();
    backends.push(Backend {
        name: format!("selected ({:?})", selected.kind()),
        accepts: Box::new(move |input| selected.accepts(input)),
    });
    if let Ok(lookup) = LookupMatcher::new(dfa) {
        backends.push(Backend {
            name: "lookup".to_string(),
            accepts: Box::new(move |input| lookup.accepts(input)),
        });
    }
    push_permute::<Portable16>(&mut backends, dfa);
    push_permute::<Portable32>(&mut backends, dfa);
    #[cfg(target_arch = "x86_64")]
    {
        use regex_derivative::util::vector::{Avx2x32, Ssse3x16};
        push_permute::<Ssse3x16>(&mut backends, dfa);
        push_permute::<Avx2x32>(&mut backends, dfa);
    }
    #[cfg(target_arch = "aarch64")]
    {
        use regex_derivative::util::vector::{Neon16, Neon32};
        push_permute::<Neon16>(&mut backends, dfa);
        push_permute::<Neon32>(&mut backends, dfa);
    }
    backends
}

fn push_permute<V: Lanes>(backends: &mut Vec<Backend>, dfa: &DFA<u8>) {
    if let Ok(m) = PermuteMatcher::<V>::new(dfa) {
        backends.push(Backend {
            name: format!("permute ({} x {})", V::NAME, V::WIDTH),
            accepts: Box::new(move |input| {
                let chunked = m.final_state(input);
                assert_eq!(
                    chunked,
                    m.final_state_sequential(input),
                    "chunked and sequential composition disagree on {:?}",
                    input.as_bstr(),
                );
                m.accepts(input)
            }),
        });
    }
}

/// Assert that every backend for `dfa` gives the expected answer.
pub fn assert_all(dfa: &DFA<u8>, input: &[u8], expected: bool) {
    for backend in byte_backends(dfa) {
        assert_eq!(
            expected,
            backend.accepts(input),
            "{} on {:?}",
            backend.name,
            input.as_bstr(),
        );
    }
}
