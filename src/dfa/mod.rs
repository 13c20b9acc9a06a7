/*!
Deterministic finite automata compiled from regexes.

A [`DFA`] is a plain transition table over a finite alphabet: state `0` is
the start state, and every state has exactly one successor per symbol of the
alphabet. It is produced by [`DFA::new`] (or
[`matcher::Builder::build_dfa`](crate::matcher::Builder::build_dfa)), which
explores the derivatives of a regex breadth first, or by [`DFA::from_fn`]
for automata written out by hand.

A `DFA` can match input by itself with [`DFA::is_match`], but the matchers in
[`crate::matcher`] are faster.

# Example

```
use regex_derivative::{dfa::DFA, regex::parse};

let re = parse("(ab)*")?;
let dfa = DFA::new(&re, vec!['a', 'b'])?;
assert_eq!(3, dfa.state_len());
assert!(dfa.is_match(&['a', 'b', 'a', 'b']));
assert!(!dfa.is_match(&['a', 'b', 'a']));
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use core::fmt;

use crate::{
    config::Config,
    error::BuildError,
    regex::Regex,
    util::{fnv::HashMap, symbol::Symbol},
};

pub(crate) mod determinize;

/// The identifier of a DFA state: its index in discovery order.
pub type StateID = usize;

/// A deterministic finite automaton over symbols of type `T`.
#[derive(Clone)]
pub struct DFA<T> {
    /// The symbols this automaton has transitions for, without duplicates,
    /// in the order they were first given. A symbol's position is its
    /// column in the transition table.
    alphabet: Vec<T>,
    /// A map from each symbol in `alphabet` to its position.
    columns: HashMap<T, usize>,
    /// The transition table in row major order: the successor of state `s`
    /// on the symbol in column `c` is at `s * alphabet.len() + c`.
    trans: Vec<StateID>,
    /// Whether each state accepts, indexed by state ID. Its length is the
    /// number of states.
    accepting: Vec<bool>,
}

impl<T: Symbol> DFA<T> {
    /// Compile a regex into a DFA over the given alphabet.
    ///
    /// Symbols that occur more than once in `alphabet` are only used once.
    /// Input containing a symbol outside of the alphabet never matches.
    ///
    /// To limit the number of states, use
    /// [`matcher::Builder::build_dfa`](crate::matcher::Builder::build_dfa)
    /// with [`Config::state_limit`].
    pub fn new<I: IntoIterator<Item = T>>(
        regex: &Regex<T>,
        alphabet: I,
    ) -> Result<DFA<T>, BuildError> {
        DFA::with_config(&Config::new(), regex, alphabet)
    }

    pub(crate) fn with_config<I: IntoIterator<Item = T>>(
        config: &Config,
        regex: &Regex<T>,
        alphabet: I,
    ) -> Result<DFA<T>, BuildError> {
        determinize::Determinizer::new(DFA::empty(alphabet))
            .state_limit(config.get_state_limit())
            .build(regex)
    }

    /// Build a DFA with `state_len` states from an explicit transition
    /// function.
    ///
    /// `next(symbol, state)` is called once for every state and every
    /// symbol of the alphabet. State `0` is the start state. This returns an
    /// error if `state_len` is zero, or if `next` or `accepting` name a
    /// state that is not less than `state_len`.
    ///
    /// # Example
    ///
    /// A DFA over bytes accepting inputs with an even number of `a`s.
    ///
    /// ```
    /// use regex_derivative::dfa::DFA;
    ///
    /// let dfa = DFA::from_fn(0..=255, 2, |&b, s| {
    ///     if b == b'a' { 1 - s } else { s }
    /// }, vec![0])?;
    /// assert!(dfa.is_match(b"xaxa"));
    /// assert!(!dfa.is_match(b"xax"));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_fn<I, F, A>(
        alphabet: I,
        state_len: usize,
        mut next: F,
        accepting: A,
    ) -> Result<DFA<T>, BuildError>
    where
        I: IntoIterator<Item = T>,
        F: FnMut(&T, StateID) -> StateID,
        A: IntoIterator<Item = StateID>,
    {
        if state_len == 0 {
            return Err(BuildError::invalid_state(0, 0));
        }
        let mut dfa = DFA::empty(alphabet);
        for _ in 0..state_len {
            dfa.add_state(false);
        }
        for from in 0..state_len {
            for column in 0..dfa.alphabet.len() {
                let to = next(&dfa.alphabet[column], from);
                if to >= state_len {
                    return Err(BuildError::invalid_state(to, state_len));
                }
                dfa.set_transition(from, column, to);
            }
        }
        for state in accepting {
            if state >= state_len {
                return Err(BuildError::invalid_state(state, state_len));
            }
            dfa.accepting[state] = true;
        }
        Ok(dfa)
    }

    /// A DFA with no states over the given alphabet.
    fn empty<I: IntoIterator<Item = T>>(alphabet: I) -> DFA<T> {
        let mut columns = HashMap::default();
        let mut unique = vec![];
        for symbol in alphabet {
            if !columns.contains_key(&symbol) {
                columns.insert(symbol.clone(), unique.len());
                unique.push(symbol);
            }
        }
        DFA { alphabet: unique, columns, trans: vec![], accepting: vec![] }
    }

    /// Add a state whose transitions all lead to the start state until set.
    fn add_state(&mut self, accepting: bool) -> StateID {
        let id = self.accepting.len();
        self.trans.extend(core::iter::repeat(0).take(self.alphabet.len()));
        self.accepting.push(accepting);
        id
    }

    fn set_transition(&mut self, from: StateID, column: usize, to: StateID) {
        let stride = self.alphabet.len();
        self.trans[from * stride + column] = to;
    }

    /// The state in which matching starts. This is always `0`.
    pub fn start(&self) -> StateID {
        0
    }

    /// The number of states in this DFA.
    pub fn state_len(&self) -> usize {
        self.accepting.len()
    }

    /// The symbols this DFA has transitions for, without duplicates.
    pub fn alphabet(&self) -> &[T] {
        &self.alphabet
    }

    /// The successor of `state` on `symbol`, or `None` if `symbol` is not
    /// in the alphabet.
    ///
    /// # Panics
    ///
    /// This panics if `state` is not a state of this DFA.
    pub fn next_state(&self, state: StateID, symbol: &T) -> Option<StateID> {
        let column = *self.columns.get(symbol)?;
        Some(self.trans[state * self.alphabet.len() + column])
    }

    /// Whether matching input that ends in `state` succeeds.
    ///
    /// # Panics
    ///
    /// This panics if `state` is not a state of this DFA.
    pub fn is_accepting(&self, state: StateID) -> bool {
        self.accepting[state]
    }

    /// The accepting states, in increasing order.
    pub fn accepting_states(&self) -> impl Iterator<Item = StateID> + '_ {
        self.accepting
            .iter()
            .enumerate()
            .filter(|&(_, &yes)| yes)
            .map(|(id, _)| id)
    }

    /// Returns true if and only if this DFA accepts the whole of `input`.
    pub fn is_match(&self, input: &[T]) -> bool {
        let mut state = self.start();
        for symbol in input {
            state = match self.next_state(state, symbol) {
                Some(next) => next,
                None => return false,
            };
        }
        self.is_accepting(state)
    }
}

impl DFA<u8> {
    /// Returns true if this DFA has a transition for every byte value.
    pub fn is_byte_complete(&self) -> bool {
        self.missing_byte().is_none()
    }

    /// The smallest byte value without a transition, if any.
    pub(crate) fn missing_byte(&self) -> Option<u8> {
        (0..=255).find(|b| !self.columns.contains_key(b))
    }
}

impl<T: Symbol> fmt::Debug for DFA<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "dfa::DFA(")?;
        for state in 0..self.state_len() {
            let accept = if self.is_accepting(state) { '*' } else { ' ' };
            let start = if state == self.start() { '>' } else { ' ' };
            write!(f, "{}{}{:06?}: ", accept, start, state)?;
            let stride = self.alphabet.len();
            for (column, symbol) in self.alphabet.iter().enumerate() {
                if column > 0 {
                    write!(f, ", ")?;
                }
                let to = self.trans[state * stride + column];
                write!(f, "{:?} => {:?}", symbol, to)?;
            }
            writeln!(f)?;
        }
        writeln!(f, ")")
    }
}
