/// The configuration used for compiling a regex into a matcher.
///
/// As a convenience, [`Matcher::config`](crate::matcher::Matcher::config) is
/// an alias for [`Config::new`]. The advantage of the former is that it
/// often lets you avoid importing the `Config` type directly.
///
/// Every setting is optional. Settings that were never set use their
/// defaults, and settings from one configuration can be layered over
/// another with [`Builder::configure`](crate::matcher::Builder::configure).
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    // As with other configuration types in this crate, we put all our knobs
    // in options so that we can distinguish between "default" and "not set."
    // This makes it possible to easily combine multiple configurations
    // without default values overwriting explicitly specified values.
    optimize: Option<bool>,
    vectorize: Option<bool>,
    state_limit: Option<Option<usize>>,
}

impl Config {
    /// Return a new default configuration.
    pub fn new() -> Config {
        Config::default()
    }

    /// Whether to pick a specialized matcher for the compiled automaton.
    ///
    /// When disabled, every automaton is matched by a
    /// [`GenericMatcher`](crate::matcher::GenericMatcher), which walks a
    /// hash-indexed transition function one symbol at a time. This is
    /// mostly useful for testing the specialized matchers against it.
    ///
    /// This is enabled by default.
    pub fn optimize(mut self, yes: bool) -> Config {
        self.optimize = Some(yes);
        self
    }

    /// Whether byte automata with few enough states may be matched with
    /// vector instructions.
    ///
    /// When enabled and the running CPU supports it, a byte automaton with
    /// at most 16 (or 32) states is matched by a
    /// [`PermuteMatcher`](crate::matcher::PermuteMatcher). When disabled,
    /// or when the automaton is too big, a
    /// [`LookupMatcher`](crate::matcher::LookupMatcher) is used instead if
    /// the automaton has at most 256 states.
    ///
    /// This has no effect when [`Config::optimize`] is disabled.
    ///
    /// This is enabled by default.
    pub fn vectorize(mut self, yes: bool) -> Config {
        self.vectorize = Some(yes);
        self
    }

    /// Set a limit on the number of states the compiled automaton may have.
    ///
    /// Automata compiled from regexes using intersection and complement can
    /// get very large. With a limit set, compilation stops with an error as
    /// soon as more than `limit` states have been discovered.
    ///
    /// By default there is no limit.
    ///
    /// # Example
    ///
    /// ```
    /// use regex_derivative::{matcher::Matcher, regex::parse};
    ///
    /// let re = parse("(a|b)*a(a|b)(a|b)(a|b)")?;
    /// let result = Matcher::builder()
    ///     .configure(Matcher::config().state_limit(Some(4)))
    ///     .build(&re, vec!['a', 'b']);
    /// assert!(result.is_err());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn state_limit(mut self, limit: Option<usize>) -> Config {
        self.state_limit = Some(limit);
        self
    }

    /// Returns whether specialized matchers may be selected.
    pub fn get_optimize(&self) -> bool {
        self.optimize.unwrap_or(true)
    }

    /// Returns whether vector matchers may be selected.
    pub fn get_vectorize(&self) -> bool {
        self.vectorize.unwrap_or(true)
    }

    /// Returns the limit on the number of states, if any.
    pub fn get_state_limit(&self) -> Option<usize> {
        self.state_limit.unwrap_or(None)
    }

    /// Overwrite the default configuration such that the options in `o` are
    /// always used. If an option in `o` is not set, then the corresponding
    /// option in `self` is used. If it's not set in `self` either, then it
    /// remains not set.
    pub(crate) fn overwrite(self, o: Config) -> Config {
        Config {
            optimize: o.optimize.or(self.optimize),
            vectorize: o.vectorize.or(self.vectorize),
            state_limit: o.state_limit.or(self.state_limit),
        }
    }
}
