/// An error that occurred while compiling a regex or building a matcher.
///
/// This error does not provide many introspection capabilities. There is
/// generally only one thing you can do with it: obtain a human readable
/// message via its `std::fmt::Display` impl.
///
/// Matching never fails. Every error this crate reports happens before a
/// matcher exists.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuildError {
    kind: BuildErrorKind,
}

/// The kind of error that occurred.
#[derive(Clone, Debug, Eq, PartialEq)]
enum BuildErrorKind {
    /// Compiling discovered more states than the configured limit allows.
    TooManyStates { limit: usize },
    /// A matcher was built directly from an automaton with more states than
    /// it can represent.
    Capacity { matcher: &'static str, limit: usize, given: usize },
    /// A byte matcher was built from an automaton that has no transitions
    /// for some byte values.
    IncompleteAlphabet { missing: u8 },
    /// A vector matcher was built on a CPU that lacks the instructions it
    /// needs.
    Unavailable { lanes: &'static str },
    /// An explicitly given automaton referred to a state that does not
    /// exist.
    InvalidState { state: usize, len: usize },
}

impl BuildError {
    fn kind(&self) -> &BuildErrorKind {
        &self.kind
    }

    pub(crate) fn too_many_states(limit: usize) -> BuildError {
        BuildError { kind: BuildErrorKind::TooManyStates { limit } }
    }

    pub(crate) fn capacity(
        matcher: &'static str,
        limit: usize,
        given: usize,
    ) -> BuildError {
        BuildError { kind: BuildErrorKind::Capacity { matcher, limit, given } }
    }

    pub(crate) fn incomplete_alphabet(missing: u8) -> BuildError {
        BuildError { kind: BuildErrorKind::IncompleteAlphabet { missing } }
    }

    pub(crate) fn unavailable(lanes: &'static str) -> BuildError {
        BuildError { kind: BuildErrorKind::Unavailable { lanes } }
    }

    pub(crate) fn invalid_state(state: usize, len: usize) -> BuildError {
        BuildError { kind: BuildErrorKind::InvalidState { state, len } }
    }
}

impl std::error::Error for BuildError {}

impl core::fmt::Display for BuildError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self.kind() {
            BuildErrorKind::TooManyStates { limit } => write!(
                f,
                "number of DFA states exceeds limit of {}",
                limit,
            ),
            BuildErrorKind::Capacity { matcher, limit, given } => write!(
                f,
                "{} matcher supports at most {} states, but the DFA has {}",
                matcher, limit, given,
            ),
            BuildErrorKind::IncompleteAlphabet { missing } => write!(
                f,
                "byte matchers need a transition for every byte, but the \
                 DFA has none for {:?}",
                crate::util::DebugByte(missing),
            ),
            BuildErrorKind::Unavailable { lanes } => write!(
                f,
                "{} vector instructions are not available on this CPU",
                lanes,
            ),
            BuildErrorKind::InvalidState { state, len } => write!(
                f,
                "state {} does not exist in a DFA with {} states",
                state, len,
            ),
        }
    }
}
