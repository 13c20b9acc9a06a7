use core::fmt;

use std::collections::HashSet;

use crate::{
    dfa::{StateID, DFA},
    util::symbol::Symbol,
};

type NextFn<T> = dyn Fn(&T, StateID) -> Option<StateID> + Send + Sync;

/// A matcher for any symbol type and any number of states.
///
/// It follows a transition function one symbol at a time and then checks
/// the final state against a set of accepting states. This is the slowest
/// matcher, and the one every other matcher is tested against.
pub struct GenericMatcher<T> {
    next: Box<NextFn<T>>,
    start: StateID,
    accepting: HashSet<StateID>,
    state_len: Option<usize>,
}

impl<T: Symbol> GenericMatcher<T> {
    /// Build a generic matcher that runs the given DFA.
    ///
    /// Input containing a symbol outside of the DFA's alphabet is rejected.
    pub fn new(dfa: DFA<T>) -> GenericMatcher<T> {
        let start = dfa.start();
        let accepting = dfa.accepting_states().collect();
        let state_len = Some(dfa.state_len());
        let next = move |symbol: &T, state| dfa.next_state(state, symbol);
        GenericMatcher { next: Box::new(next), start, accepting, state_len }
    }

    /// Build a generic matcher from an explicit transition function.
    ///
    /// `next(symbol, state)` returns the successor of `state` on `symbol`,
    /// or `None` to reject the input outright.
    ///
    /// # Example
    ///
    /// ```
    /// use regex_derivative::matcher::GenericMatcher;
    ///
    /// // Balanced parentheses, up to any depth.
    /// let m = GenericMatcher::from_fn(
    ///     0,
    ///     |&c: &char, depth| match c {
    ///         '(' => Some(depth + 1),
    ///         ')' => depth.checked_sub(1),
    ///         _ => None,
    ///     },
    ///     vec![0],
    /// );
    /// assert!(m.accepts(&['(', '(', ')', ')']));
    /// assert!(!m.accepts(&[')', '(']));
    /// ```
    pub fn from_fn<F, A>(
        start: StateID,
        next: F,
        accepting: A,
    ) -> GenericMatcher<T>
    where
        F: Fn(&T, StateID) -> Option<StateID> + Send + Sync + 'static,
        A: IntoIterator<Item = StateID>,
    {
        GenericMatcher {
            next: Box::new(next),
            start,
            accepting: accepting.into_iter().collect(),
            state_len: None,
        }
    }

    /// Returns true if and only if the automaton accepts all of `input`.
    pub fn accepts(&self, input: &[T]) -> bool {
        let mut state = self.start;
        for symbol in input {
            state = match (self.next)(symbol, state) {
                Some(next) => next,
                None => return false,
            };
        }
        self.accepting.contains(&state)
    }

    /// The number of states, if this matcher was built from a DFA.
    pub fn state_len(&self) -> Option<usize> {
        self.state_len
    }
}

impl<T> fmt::Debug for GenericMatcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericMatcher")
            .field("start", &self.start)
            .field("accepting", &self.accepting)
            .field("state_len", &self.state_len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::regex::parse;

    use super::*;

    #[test]
    fn runs_dfa() {
        let dfa = DFA::new(&parse("(ab|c)*").unwrap(), "abc".chars()).unwrap();
        let m = GenericMatcher::new(dfa);
        // (ab|c)*, b(ab|c)* and fail.
        assert_eq!(Some(3), m.state_len());
        assert!(m.accepts(&[]));
        assert!(m.accepts(&['c', 'a', 'b', 'c']));
        assert!(!m.accepts(&['a', 'c']));
        // Not in the alphabet.
        assert!(!m.accepts(&['d']));
    }

    #[test]
    fn from_fn() {
        let even =
            GenericMatcher::from_fn(0, |_: &u32, s| Some(1 - s), vec![0]);
        assert_eq!(None, even.state_len());
        assert!(even.accepts(&[1, 2]));
        assert!(!even.accepts(&[1, 2, 3]));
    }
}
