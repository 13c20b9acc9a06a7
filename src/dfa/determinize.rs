use crate::{
    dfa::{StateID, DFA},
    error::BuildError,
    regex::Regex,
    util::{fnv::HashMap, symbol::Symbol},
};

/// Builds a DFA whose states are the distinct derivatives of a regex.
///
/// Each DFA state stands for one regex value. Starting from the regex
/// itself, every state is expanded once by taking its derivative with
/// respect to every symbol of the alphabet. A derivative that equals a regex
/// seen before reuses that state; any other gets the next state ID. Because
/// regexes are canonical, there are finitely many distinct derivatives and
/// this always terminates (unless the configured state limit stops it
/// first).
pub(crate) struct Determinizer<T> {
    /// The DFA we're building. Its alphabet is fixed up front.
    dfa: DFA<T>,
    /// The regex each DFA state stands for, indexed by state ID.
    builder_states: Vec<Regex<T>>,
    /// A cache of DFA states that already exist and can be easily looked up
    /// via their regex.
    cache: HashMap<Regex<T>, StateID>,
    /// Stop with an error once more states than this are discovered.
    state_limit: Option<usize>,
}

impl<T: Symbol> Determinizer<T> {
    pub(crate) fn new(dfa: DFA<T>) -> Determinizer<T> {
        Determinizer {
            dfa,
            builder_states: vec![],
            cache: HashMap::default(),
            state_limit: None,
        }
    }

    pub(crate) fn state_limit(
        mut self,
        limit: Option<usize>,
    ) -> Determinizer<T> {
        self.state_limit = limit;
        self
    }

    pub(crate) fn build(
        mut self,
        regex: &Regex<T>,
    ) -> Result<DFA<T>, BuildError> {
        self.add_state(regex.clone())?;
        // States are expanded in the order they were discovered, so the
        // builder states themselves serve as the work queue and IDs are
        // handed out breadth first.
        let mut next = 0;
        while next < self.builder_states.len() {
            let current = self.builder_states[next].clone();
            for column in 0..self.dfa.alphabet.len() {
                let derived = current.derivative(&self.dfa.alphabet[column]);
                let to = self.cached_state(derived)?;
                self.dfa.set_transition(next, column, to);
            }
            next += 1;
        }
        debug!(
            "compiled DFA with {} states over {} symbols",
            self.dfa.state_len(),
            self.dfa.alphabet.len(),
        );
        Ok(self.dfa)
    }

    /// Return the state for the given regex, adding one if it hasn't been
    /// seen before.
    fn cached_state(
        &mut self,
        regex: Regex<T>,
    ) -> Result<StateID, BuildError> {
        if let Some(&id) = self.cache.get(&regex) {
            return Ok(id);
        }
        self.add_state(regex)
    }

    fn add_state(&mut self, regex: Regex<T>) -> Result<StateID, BuildError> {
        let id = self.builder_states.len();
        if let Some(limit) = self.state_limit {
            if id >= limit {
                return Err(BuildError::too_many_states(limit));
            }
        }
        trace!("DFA state {} is {}", id, regex);
        let added = self.dfa.add_state(regex.accepts_empty());
        debug_assert_eq!(id, added);
        self.cache.insert(regex.clone(), id);
        self.builder_states.push(regex);
        Ok(id)
    }
}
