use crate::{dfa::DFA, error::BuildError};

/// A matcher that runs a byte DFA with one table lookup per input byte.
///
/// The table has a row of `state_len` successors for every byte value, so
/// the next state is `table[byte * state_len + state]`. State IDs are stored
/// as single bytes, which limits this matcher to automata with at most 256
/// states.
#[derive(Clone, Debug)]
pub struct LookupMatcher {
    table: Box<[u8]>,
    state_len: usize,
    start: u8,
    accepting: Box<[u8]>,
}

impl LookupMatcher {
    /// The largest number of states this matcher supports.
    pub const MAX_STATES: usize = 256;

    /// Build a lookup matcher from a byte DFA.
    ///
    /// This returns an error if the DFA has more than
    /// [`LookupMatcher::MAX_STATES`] states or if it has no transition for
    /// some byte value.
    pub fn new(dfa: &DFA<u8>) -> Result<LookupMatcher, BuildError> {
        let state_len = dfa.state_len();
        if state_len > LookupMatcher::MAX_STATES {
            return Err(BuildError::capacity(
                "lookup",
                LookupMatcher::MAX_STATES,
                state_len,
            ));
        }
        let mut table = vec![0u8; 256 * state_len];
        for (byte, row) in (0..=255u8).zip(table.chunks_exact_mut(state_len))
        {
            for (state, next) in row.iter_mut().enumerate() {
                let to = dfa
                    .next_state(state, &byte)
                    .ok_or_else(|| BuildError::incomplete_alphabet(byte))?;
                *next = to as u8;
            }
        }
        Ok(LookupMatcher {
            table: table.into_boxed_slice(),
            state_len,
            start: dfa.start() as u8,
            accepting: dfa.accepting_states().map(|id| id as u8).collect(),
        })
    }

    /// Returns true if and only if the automaton accepts all of `input`.
    pub fn accepts(&self, input: &[u8]) -> bool {
        let mut state = self.start;
        for &byte in input {
            let i = usize::from(byte) * self.state_len + usize::from(state);
            state = self.table[i];
        }
        self.accepting.contains(&state)
    }

    /// The number of states in the automaton.
    pub fn state_len(&self) -> usize {
        self.state_len
    }
}
