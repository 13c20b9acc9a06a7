/*!
Regular expressions as canonical values over an arbitrary alphabet.

A [`Regex`] is built only through constructors that normalize as they go, so
two regexes that differ only by the simplifications below are the same value
(equal, and with the same hash):

* `Star(Star(x)) = Star(x)` and `Star(Fail) = Epsilon`.
* `Not(Not(x)) = x`.
* Sequences associate to the right, `Fail` absorbs a sequence and `Epsilon`
  vanishes from one.
* `And`/`Or` are flattened, deduplicated and sorted. `Fail` absorbs `And`
  and vanishes from `Or`, `Success` absorbs `Or` and vanishes from `And`. A
  single remaining member stands on its own.

Matching works on Brzozowski derivatives: the derivative of a regex with
respect to a symbol is the regex that matches every suffix `w` such that the
original regex matches `symbol w`. [`Regex::accepts`] applies derivatives
directly and is the reference every compiled matcher is checked against.
Since the canonical forms above identify regexes up to associativity,
commutativity and idempotence of `Or`, a regex has finitely many distinct
derivatives, which is what lets [`crate::dfa`] turn it into an automaton.

# Example

```
use regex_derivative::regex::{Literal, Regex};

let re = "<!--".literal() * Regex::any().star() * "-->".literal();
assert!(re.accepts(&"<!-- hi -->".chars().collect::<Vec<_>>()));
assert!(!re.accepts(&"<!-- hi".chars().collect::<Vec<_>>()));

let not_empty = !Regex::<char>::epsilon();
assert!(!not_empty.accepts(&[]));
assert!(not_empty.accepts(&['x']));
```
*/

use core::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher as _},
    ops,
};

use std::sync::Arc;

use crate::util::{fnv, symbol::Symbol};

pub use self::{
    lower::Encoding,
    parse::{parse, SyntaxError},
};

mod lower;
mod parse;

/// A canonical regular expression over symbols of type `T`.
///
/// Cloning a regex is cheap: it only bumps a reference count. Every value
/// caches whether it matches the empty sequence and a structural hash, both
/// computed once at construction.
#[derive(Clone)]
pub struct Regex<T>(Arc<Inner<T>>);

struct Inner<T> {
    kind: RegexKind<T>,
    accepts_empty: bool,
    hash: u64,
}

/// A read-only view of the top node of a [`Regex`].
///
/// The variants are ordered the same way the crate orders regexes whose
/// structural hashes collide. Regexes are never built from a `RegexKind`
/// directly, so every child reachable from a kind is canonical.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum RegexKind<T> {
    /// Exactly one symbol.
    Single(T),
    /// A non-empty sequence of symbols, matched in order.
    Block(Box<[T]>),
    /// Any one symbol.
    Any,
    /// Matches nothing.
    Fail,
    /// Zero or more repetitions. `Star(Fail)` is the empty sequence.
    Star(Regex<T>),
    /// The complement of a language.
    Not(Regex<T>),
    /// Concatenation. The left side is never itself a `Seq`.
    Seq(Regex<T>, Regex<T>),
    /// Union of two or more sorted, distinct members, none of which is an
    /// `Or`.
    Or(Box<[Regex<T>]>),
    /// Intersection of two or more sorted, distinct members, none of which
    /// is an `And`.
    And(Box<[Regex<T>]>),
}

impl<T> RegexKind<T> {
    fn tag(&self) -> u8 {
        match *self {
            RegexKind::Single(_) => 0,
            RegexKind::Block(_) => 1,
            RegexKind::Any => 2,
            RegexKind::Fail => 3,
            RegexKind::Star(_) => 4,
            RegexKind::Not(_) => 5,
            RegexKind::Seq(..) => 6,
            RegexKind::Or(_) => 7,
            RegexKind::And(_) => 8,
        }
    }
}

impl<T: Symbol> Regex<T> {
    fn new(kind: RegexKind<T>) -> Regex<T> {
        let accepts_empty = match kind {
            RegexKind::Single(_)
            | RegexKind::Block(_)
            | RegexKind::Any
            | RegexKind::Fail => false,
            RegexKind::Star(_) => true,
            RegexKind::Not(ref r) => !r.accepts_empty(),
            RegexKind::Seq(ref a, ref b) => {
                a.accepts_empty() && b.accepts_empty()
            }
            RegexKind::Or(ref rs) => rs.iter().any(|r| r.accepts_empty()),
            RegexKind::And(ref rs) => rs.iter().all(|r| r.accepts_empty()),
        };
        let mut h = fnv::Hasher::default();
        h.write_u8(kind.tag());
        match kind {
            RegexKind::Single(ref c) => c.hash(&mut h),
            RegexKind::Block(ref cs) => cs.hash(&mut h),
            RegexKind::Any | RegexKind::Fail => {}
            RegexKind::Star(ref r) | RegexKind::Not(ref r) => {
                h.write_u64(r.0.hash)
            }
            RegexKind::Seq(ref a, ref b) => {
                h.write_u64(a.0.hash);
                h.write_u64(b.0.hash);
            }
            RegexKind::Or(ref rs) | RegexKind::And(ref rs) => {
                h.write_usize(rs.len());
                for r in rs.iter() {
                    h.write_u64(r.0.hash);
                }
            }
        }
        let hash = h.finish();
        Regex(Arc::new(Inner { kind, accepts_empty, hash }))
    }

    /// A regex matching exactly `symbol`.
    pub fn single(symbol: T) -> Regex<T> {
        Regex::new(RegexKind::Single(symbol))
    }

    /// A regex matching exactly the given sequence of symbols.
    ///
    /// An empty sequence gives [`Regex::epsilon`].
    pub fn block<I: IntoIterator<Item = T>>(symbols: I) -> Regex<T> {
        let symbols: Box<[T]> = symbols.into_iter().collect();
        if symbols.is_empty() {
            Regex::epsilon()
        } else {
            Regex::new(RegexKind::Block(symbols))
        }
    }

    /// A regex matching any single symbol.
    pub fn any() -> Regex<T> {
        Regex::new(RegexKind::Any)
    }

    /// A regex matching nothing, not even the empty sequence.
    pub fn fail() -> Regex<T> {
        Regex::new(RegexKind::Fail)
    }

    /// A regex matching only the empty sequence.
    pub fn epsilon() -> Regex<T> {
        Regex::new(RegexKind::Star(Regex::fail()))
    }

    /// A regex matching every sequence.
    pub fn success() -> Regex<T> {
        Regex::new(RegexKind::Not(Regex::fail()))
    }

    /// Zero or more repetitions of this regex.
    pub fn star(&self) -> Regex<T> {
        match *self.kind() {
            RegexKind::Star(_) => self.clone(),
            _ => Regex::new(RegexKind::Star(self.clone())),
        }
    }

    /// One or more repetitions of this regex.
    pub fn plus(&self) -> Regex<T> {
        self.then(&self.star())
    }

    /// Zero or one occurrence of this regex.
    pub fn optional(&self) -> Regex<T> {
        self.or(&Regex::epsilon())
    }

    /// Every sequence this regex does not match.
    pub fn complement(&self) -> Regex<T> {
        match *self.kind() {
            RegexKind::Not(ref r) => r.clone(),
            _ => Regex::new(RegexKind::Not(self.clone())),
        }
    }

    /// This regex followed by `next`.
    pub fn then(&self, next: &Regex<T>) -> Regex<T> {
        if let RegexKind::Seq(ref a, ref b) = *self.kind() {
            return a.then(&b.then(next));
        }
        if self.is_fail() || next.is_fail() {
            Regex::fail()
        } else if self.is_epsilon() {
            next.clone()
        } else if next.is_epsilon() {
            self.clone()
        } else {
            Regex::new(RegexKind::Seq(self.clone(), next.clone()))
        }
    }

    /// Sequences matched by this regex or by `other`.
    pub fn or(&self, other: &Regex<T>) -> Regex<T> {
        Regex::alternation([self.clone(), other.clone()])
    }

    /// Sequences matched by both this regex and `other`.
    pub fn and(&self, other: &Regex<T>) -> Regex<T> {
        Regex::intersection([self.clone(), other.clone()])
    }

    /// The concatenation of all the given regexes, in order.
    ///
    /// An empty iterator gives [`Regex::epsilon`].
    pub fn concat<I: IntoIterator<Item = Regex<T>>>(items: I) -> Regex<T> {
        let items: Vec<Regex<T>> = items.into_iter().collect();
        items
            .iter()
            .rev()
            .fold(Regex::epsilon(), |rest, item| item.then(&rest))
    }

    /// The union of all the given regexes.
    ///
    /// An empty iterator gives [`Regex::fail`].
    pub fn alternation<I: IntoIterator<Item = Regex<T>>>(
        members: I,
    ) -> Regex<T> {
        Regex::combine(members, false)
    }

    /// The intersection of all the given regexes.
    ///
    /// An empty iterator gives [`Regex::success`].
    pub fn intersection<I: IntoIterator<Item = Regex<T>>>(
        members: I,
    ) -> Regex<T> {
        Regex::combine(members, true)
    }

    fn combine<I: IntoIterator<Item = Regex<T>>>(
        members: I,
        conjunction: bool,
    ) -> Regex<T> {
        let mut set = vec![];
        for r in members {
            let (absorbs, vanishes) = if conjunction {
                (r.is_fail(), r.is_success())
            } else {
                (r.is_success(), r.is_fail())
            };
            if absorbs {
                return r;
            }
            if vanishes {
                continue;
            }
            match (r.kind(), conjunction) {
                (RegexKind::And(rs), true) | (RegexKind::Or(rs), false) => {
                    set.extend(rs.iter().cloned())
                }
                _ => set.push(r),
            }
        }
        set.sort();
        set.dedup();
        if set.len() <= 1 {
            return set.pop().unwrap_or_else(|| {
                if conjunction {
                    Regex::success()
                } else {
                    Regex::fail()
                }
            });
        }
        let set = set.into_boxed_slice();
        Regex::new(if conjunction {
            RegexKind::And(set)
        } else {
            RegexKind::Or(set)
        })
    }

    /// Returns the derivative of this regex with respect to `symbol`.
    ///
    /// The result matches `w` exactly when this regex matches `symbol`
    /// followed by `w`.
    pub fn derivative(&self, symbol: &T) -> Regex<T> {
        match *self.kind() {
            RegexKind::Single(ref c) => {
                if c == symbol {
                    Regex::epsilon()
                } else {
                    Regex::fail()
                }
            }
            RegexKind::Block(ref cs) => match cs.split_first() {
                Some((first, rest)) if first == symbol => {
                    Regex::block(rest.iter().cloned())
                }
                _ => Regex::fail(),
            },
            RegexKind::Any => Regex::epsilon(),
            RegexKind::Fail => self.clone(),
            RegexKind::Star(ref r) => r.derivative(symbol).then(self),
            RegexKind::Not(ref r) => r.derivative(symbol).complement(),
            RegexKind::Seq(ref a, ref b) => {
                let d = a.derivative(symbol).then(b);
                if a.accepts_empty() {
                    d.or(&b.derivative(symbol))
                } else {
                    d
                }
            }
            RegexKind::Or(ref rs) => {
                Regex::alternation(rs.iter().map(|r| r.derivative(symbol)))
            }
            RegexKind::And(ref rs) => {
                Regex::intersection(rs.iter().map(|r| r.derivative(symbol)))
            }
        }
    }

    /// Returns true if and only if this regex matches the whole of `input`.
    ///
    /// This takes one derivative per symbol and is therefore slow. It is
    /// meant as a reference: compile the regex with
    /// [`matcher::Builder`](crate::matcher::Builder) to match quickly.
    pub fn accepts(&self, input: &[T]) -> bool {
        let mut residual = self.clone();
        for symbol in input {
            if residual.is_fail() {
                return false;
            }
            residual = residual.derivative(symbol);
        }
        residual.accepts_empty()
    }
}

impl<T> Regex<T> {
    /// The top node of this regex.
    pub fn kind(&self) -> &RegexKind<T> {
        &self.0.kind
    }

    /// Returns true if this regex matches the empty sequence.
    pub fn accepts_empty(&self) -> bool {
        self.0.accepts_empty
    }

    /// Returns true if this is the regex matching nothing.
    pub fn is_fail(&self) -> bool {
        matches!(*self.kind(), RegexKind::Fail)
    }

    /// Returns true if this is the regex matching only the empty sequence.
    pub fn is_epsilon(&self) -> bool {
        matches!(*self.kind(), RegexKind::Star(ref r) if r.is_fail())
    }

    /// Returns true if this is the regex matching every sequence.
    pub fn is_success(&self) -> bool {
        matches!(*self.kind(), RegexKind::Not(ref r) if r.is_fail())
    }
}

/// A custom `Drop` impl is used for `Inner` such that it uses constant stack
/// space but heap space proportional to the depth of the regex. A long
/// parsed literal is a deeply nested `Seq`, and the default recursive drop
/// would overflow the stack on it.
impl<T> Drop for Inner<T> {
    fn drop(&mut self) {
        let mut stack = vec![];
        take_children(&mut self.kind, &mut stack);
        while let Some(Regex(arc)) = stack.pop() {
            // Shared children are someone else's to drop.
            if let Ok(mut inner) = Arc::try_unwrap(arc) {
                take_children(&mut inner.kind, &mut stack);
            }
        }
    }
}

/// Move the children of `kind` onto `stack`, leaving a leaf behind.
fn take_children<T>(kind: &mut RegexKind<T>, stack: &mut Vec<Regex<T>>) {
    match *kind {
        RegexKind::Single(_)
        | RegexKind::Block(_)
        | RegexKind::Any
        | RegexKind::Fail => return,
        _ => {}
    }
    match core::mem::replace(kind, RegexKind::Fail) {
        RegexKind::Star(r) | RegexKind::Not(r) => stack.push(r),
        RegexKind::Seq(a, b) => {
            stack.push(a);
            stack.push(b);
        }
        RegexKind::Or(rs) | RegexKind::And(rs) => stack.extend(rs.into_vec()),
        RegexKind::Single(_)
        | RegexKind::Block(_)
        | RegexKind::Any
        | RegexKind::Fail => {}
    }
}

impl<T: PartialEq> PartialEq for Regex<T> {
    fn eq(&self, other: &Regex<T>) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.hash == other.0.hash && self.0.kind == other.0.kind)
    }
}

impl<T: Eq> Eq for Regex<T> {}

impl<T: PartialOrd> PartialOrd for Regex<T> {
    fn partial_cmp(&self, other: &Regex<T>) -> Option<Ordering> {
        if Arc::ptr_eq(&self.0, &other.0) {
            return Some(Ordering::Equal);
        }
        match self.0.hash.cmp(&other.0.hash) {
            Ordering::Equal => self.0.kind.partial_cmp(&other.0.kind),
            unequal => Some(unequal),
        }
    }
}

impl<T: Ord> Ord for Regex<T> {
    fn cmp(&self, other: &Regex<T>) -> Ordering {
        if Arc::ptr_eq(&self.0, &other.0) {
            return Ordering::Equal;
        }
        self.0
            .hash
            .cmp(&other.0.hash)
            .then_with(|| self.0.kind.cmp(&other.0.kind))
    }
}

impl<T> Hash for Regex<T> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.hash);
    }
}

impl<T: fmt::Debug> fmt::Debug for Regex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind().fmt(f)
    }
}

// Binding strength, loosest first. Anything at ATOM never needs parentheses.
const OR: u8 = 0;
const AND: u8 = 1;
const SEQ: u8 = 2;
const NOT: u8 = 3;
const STAR: u8 = 4;
const ATOM: u8 = 5;

impl<T: Symbol> Regex<T> {
    fn precedence(&self) -> u8 {
        if self.is_epsilon() {
            return ATOM;
        }
        match *self.kind() {
            RegexKind::Or(_) => OR,
            RegexKind::And(_) => AND,
            RegexKind::Seq(..) | RegexKind::Block(_) => SEQ,
            RegexKind::Not(_) => NOT,
            RegexKind::Star(_) => STAR,
            _ => ATOM,
        }
    }

    fn fmt_at(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        if self.precedence() < min {
            write!(f, "(")?;
            self.fmt_at(f, OR)?;
            return write!(f, ")");
        }
        if self.is_epsilon() {
            return write!(f, "()");
        }
        match *self.kind() {
            RegexKind::Single(ref c) => c.fmt_symbol(f),
            RegexKind::Block(ref cs) => {
                for c in cs.iter() {
                    c.fmt_symbol(f)?;
                }
                Ok(())
            }
            RegexKind::Any => write!(f, "."),
            RegexKind::Fail => write!(f, "[]"),
            RegexKind::Star(ref r) => {
                r.fmt_at(f, ATOM)?;
                write!(f, "*")
            }
            RegexKind::Not(ref r) => {
                write!(f, "!")?;
                r.fmt_at(f, NOT)
            }
            RegexKind::Seq(ref a, ref b) => {
                a.fmt_at(f, SEQ)?;
                b.fmt_at(f, SEQ)
            }
            RegexKind::Or(ref rs) => fmt_joined(f, rs, "|", AND),
            RegexKind::And(ref rs) => fmt_joined(f, rs, "&", SEQ),
        }
    }
}

fn fmt_joined<T: Symbol>(
    f: &mut fmt::Formatter<'_>,
    members: &[Regex<T>],
    sep: &str,
    min: u8,
) -> fmt::Result {
    for (i, r) in members.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        r.fmt_at(f, min)?;
    }
    Ok(())
}

impl<T: Symbol> fmt::Display for Regex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_at(f, OR)
    }
}

macro_rules! impl_binary_op {
    ($op:ident, $method:ident, $via:ident) => {
        impl<T: Symbol> ops::$op for Regex<T> {
            type Output = Regex<T>;

            fn $method(self, rhs: Regex<T>) -> Regex<T> {
                self.$via(&rhs)
            }
        }

        impl<'a, T: Symbol> ops::$op<&'a Regex<T>> for &'a Regex<T> {
            type Output = Regex<T>;

            fn $method(self, rhs: &'a Regex<T>) -> Regex<T> {
                self.$via(rhs)
            }
        }
    };
}

impl_binary_op!(Mul, mul, then);
impl_binary_op!(BitOr, bitor, or);
impl_binary_op!(BitAnd, bitand, and);

impl<T: Symbol> ops::Not for Regex<T> {
    type Output = Regex<T>;

    fn not(self) -> Regex<T> {
        self.complement()
    }
}

impl<'a, T: Symbol> ops::Not for &'a Regex<T> {
    type Output = Regex<T>;

    fn not(self) -> Regex<T> {
        self.complement()
    }
}

/// Conversion of literal values into regexes matching exactly them.
pub trait Literal {
    /// The alphabet of the resulting regex.
    type Symbol: Symbol;

    /// A regex matching exactly this value.
    fn literal(&self) -> Regex<Self::Symbol>;
}

impl Literal for str {
    type Symbol = char;

    fn literal(&self) -> Regex<char> {
        Regex::block(self.chars())
    }
}

impl Literal for char {
    type Symbol = char;

    fn literal(&self) -> Regex<char> {
        Regex::single(*self)
    }
}

impl<T: Symbol> Literal for [T] {
    type Symbol = T;

    fn literal(&self) -> Regex<T> {
        Regex::block(self.iter().cloned())
    }
}
