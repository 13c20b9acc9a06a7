/*!
This crate provides regular expressions as canonical algebraic values, and
compiles them into fast matchers by way of Brzozowski derivatives.

A [`Regex`] is an immutable value over any alphabet of [`Symbol`]s, built
from literals with sequence, alternation, intersection, complement and
Kleene star. Regexes are normalized as they are built, so they can be
compared and hashed. The derivative of a regex with respect to a symbol is
again a regex, and exploring all the derivatives of a regex over a finite
alphabet yields a [`dfa::DFA`]. A [`Matcher`] then runs that DFA with
whichever backend fits best: a plain transition function for any alphabet,
a lookup table for bytes, or, for byte automata with at most 32 states,
vector shuffles that compose the transitions of several bytes at once.

Matchers answer one question: does the whole input match? There is no
searching for matches inside a longer input, and no capture groups.

# Example

```
use regex_derivative::{regex::parse, Matcher};

let re = parse("(ab|c)*")?;
let m = Matcher::builder().build_str(&re)?;
assert!(m.accepts("abcab"));
assert!(!m.accepts("abca"));
# Ok::<(), Box<dyn std::error::Error>>(())
```

Regexes can also be built directly, and combined with operators: `*` for
sequence, `|` for alternation, `&` for intersection and `!` for complement.

```
use regex_derivative::{regex::Literal, Matcher, Regex};

let any = Regex::any().star();
// Contains "ab", but doesn't end in "b".
let re = (any.clone() * "ab".literal() * any.clone())
    & !(any * 'b'.literal());
let m = Matcher::new(&re, "abc".chars())?;
assert!(m.accepts(&['a', 'b', 'c']));
assert!(!m.accepts(&['c', 'a', 'b']));
# Ok::<(), Box<dyn std::error::Error>>(())
```

# Crate features

* **logging** - When enabled, the `log` crate is used to emit messages about
  compiling automata and selecting matchers. This is useful for seeing which
  backend a matcher ended up with and why.
*/

#[cfg(not(any(
    target_pointer_width = "16",
    target_pointer_width = "32",
    target_pointer_width = "64"
)))]
compile_error!("regex-derivative currently not supported on non-{16,32,64}");

pub use crate::{
    config::Config,
    error::BuildError,
    matcher::{Builder, Matcher, MatcherKind, StrMatcher},
    regex::{Literal, Regex, SyntaxError},
    util::symbol::Symbol,
};

#[macro_use]
mod macros;

mod config;
pub mod dfa;
mod error;
pub mod matcher;
pub mod regex;
pub mod util;
