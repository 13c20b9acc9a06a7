use crate::regex::Regex;

/// An error that occurred while parsing a pattern.
///
/// This error does not provide many introspection capabilities. Its
/// `std::fmt::Display` impl gives a human readable message, and
/// [`SyntaxError::offset`] says where in the pattern the problem was found.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyntaxError {
    kind: SyntaxErrorKind,
    offset: usize,
}

/// The kind of syntax error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum SyntaxErrorKind {
    /// The pattern has nothing in it.
    Empty,
    /// A group with nothing in it, like `()`.
    EmptyGroup,
    /// An alternation with an empty branch, like `|a`, `a|` or `a||b`.
    EmptyAlternation,
    /// A repetition operator with nothing before it to repeat.
    MissingRepetition,
    /// A `(` without a matching `)`.
    UnclosedGroup,
    /// A `)` without a matching `(`.
    UnopenedGroup,
    /// A `\` at the very end of the pattern.
    DanglingEscape,
}

impl SyntaxError {
    /// The byte offset in the pattern at which the error was detected.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn new(kind: SyntaxErrorKind, offset: usize) -> SyntaxError {
        SyntaxError { kind, offset }
    }
}

impl std::error::Error for SyntaxError {}

impl core::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self.kind {
            SyntaxErrorKind::Empty => "empty pattern",
            SyntaxErrorKind::EmptyGroup => "empty group",
            SyntaxErrorKind::EmptyAlternation => {
                "alternation branch must not be empty"
            }
            SyntaxErrorKind::MissingRepetition => {
                "repetition operator missing expression"
            }
            SyntaxErrorKind::UnclosedGroup => "unclosed group",
            SyntaxErrorKind::UnopenedGroup => "unopened group",
            SyntaxErrorKind::DanglingEscape => "incomplete escape sequence",
        };
        write!(f, "regex parse error at offset {}: {}", self.offset, msg)
    }
}

/// Parse a pattern into a regex over `char`.
///
/// The syntax is deliberately small: juxtaposition concatenates, `|`
/// separates alternatives, `*`, `+` and `?` repeat the preceding atom, and
/// parentheses group. A backslash makes the character after it literal.
/// Every other character, including `.`, stands for itself.
///
/// # Example
///
/// ```
/// use regex_derivative::regex::{parse, Literal};
///
/// let re = parse("a(bc)*")?;
/// assert_eq!(re, 'a'.literal() * ('b'.literal() * 'c'.literal()).star());
/// assert!(parse("a|").is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse(pattern: &str) -> Result<Regex<char>, SyntaxError> {
    let mut parser = Parser { pattern, pos: 0 };
    let re = parser.parse_alternation()?;
    if parser.peek().is_some() {
        // The only thing that stops an alternation before the end is a `)`.
        let kind = SyntaxErrorKind::UnopenedGroup;
        return Err(SyntaxError::new(kind, parser.pos));
    }
    re.ok_or_else(|| SyntaxError::new(SyntaxErrorKind::Empty, 0))
}

struct Parser<'p> {
    pattern: &'p str,
    pos: usize,
}

impl<'p> Parser<'p> {
    fn peek(&self) -> Option<char> {
        self.pattern[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Parse alternatives up to the end of the pattern or an unconsumed `)`.
    /// Returns `None` if there was nothing to parse at all.
    fn parse_alternation(
        &mut self,
    ) -> Result<Option<Regex<char>>, SyntaxError> {
        let mut branches = vec![];
        loop {
            let branch = self.parse_concat()?;
            if self.peek() == Some('|') {
                let kind = SyntaxErrorKind::EmptyAlternation;
                let branch = branch
                    .ok_or_else(|| SyntaxError::new(kind, self.pos))?;
                branches.push(branch);
                self.bump();
                continue;
            }
            match branch {
                Some(branch) => branches.push(branch),
                None if branches.is_empty() => return Ok(None),
                None => {
                    return Err(SyntaxError::new(
                        SyntaxErrorKind::EmptyAlternation,
                        self.pos,
                    ))
                }
            }
            return Ok(Some(Regex::alternation(branches)));
        }
    }

    /// Parse atoms and their repetitions up to a `|`, an unconsumed `)` or
    /// the end of the pattern.
    fn parse_concat(&mut self) -> Result<Option<Regex<char>>, SyntaxError> {
        let mut items: Vec<Regex<char>> = vec![];
        while let Some(c) = self.peek() {
            let at = self.pos;
            match c {
                '|' | ')' => break,
                '*' | '+' | '?' => {
                    self.bump();
                    let kind = SyntaxErrorKind::MissingRepetition;
                    let last = items
                        .pop()
                        .ok_or_else(|| SyntaxError::new(kind, at))?;
                    items.push(match c {
                        '*' => last.star(),
                        '+' => last.plus(),
                        _ => last.optional(),
                    });
                }
                '(' => {
                    self.bump();
                    let inner = self.parse_alternation()?;
                    if self.bump() != Some(')') {
                        return Err(SyntaxError::new(
                            SyntaxErrorKind::UnclosedGroup,
                            at,
                        ));
                    }
                    items.push(inner.ok_or_else(|| {
                        SyntaxError::new(SyntaxErrorKind::EmptyGroup, at)
                    })?);
                }
                '\\' => {
                    self.bump();
                    let literal = self.bump().ok_or_else(|| {
                        SyntaxError::new(SyntaxErrorKind::DanglingEscape, at)
                    })?;
                    items.push(Regex::single(literal));
                }
                _ => {
                    self.bump();
                    items.push(Regex::single(c));
                }
            }
        }
        if items.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Regex::concat(items)))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::regex::Literal;

    use super::*;

    fn err(pattern: &str) -> SyntaxError {
        match parse(pattern) {
            Ok(re) => panic!("expected {:?} to fail, got {}", pattern, re),
            Err(err) => err,
        }
    }

    #[test]
    fn concatenation() {
        let expected = 'a'.literal() * 'b'.literal();
        assert_eq!(expected, parse("ab").unwrap());
    }

    #[test]
    fn repetition() {
        let a = 'a'.literal();
        assert_eq!(a.star(), parse("a*").unwrap());
        assert_eq!(a.or(&Regex::epsilon()), parse("a?").unwrap());
        assert_eq!(a.then(&a.star()), parse("a+").unwrap());
        assert_eq!(a.star(), parse("a**").unwrap());
    }

    #[test]
    fn groups() {
        let (a, b, c) = ('a'.literal(), 'b'.literal(), 'c'.literal());
        assert_eq!(&a * &(&b * &c).star(), parse("a(bc)*").unwrap());
        assert_eq!(a.or(&b).then(&c), parse("(a|b)c").unwrap());
        assert_eq!(a.clone(), parse("((a))").unwrap());
    }

    #[test]
    fn alternation() {
        let (a, b, c) = ('a'.literal(), 'b'.literal(), 'c'.literal());
        assert_eq!(a.or(&b).or(&c), parse("a|b|c").unwrap());
        assert_eq!(parse("c|b|a").unwrap(), parse("a|b|c").unwrap());
        assert_eq!(a.or(&b.then(&c)), parse("a|bc").unwrap());
    }

    #[test]
    fn escapes_and_literals() {
        assert_eq!('*'.literal(), parse("\\*").unwrap());
        assert_eq!('a'.literal() * '.'.literal(), parse("a.").unwrap());
        assert!(parse("é€").unwrap().accepts(&['é', '€']));
    }

    #[test]
    fn errors() {
        assert_eq!(0, err("").offset());
        assert_eq!(0, err("|a").offset());
        assert_eq!(2, err("a|").offset());
        assert_eq!(2, err("a||b").offset());
        assert_eq!(0, err("*a").offset());
        assert_eq!(2, err("a|*").offset());
        assert_eq!(1, err("a()").offset());
        assert_eq!(0, err("(a").offset());
        assert_eq!(1, err("a)").offset());
        assert_eq!(3, err("(a|)").offset());
        assert_eq!(1, err("a\\").offset());
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            "regex parse error at offset 0: unclosed group",
            err("(ab").to_string(),
        );
        assert_eq!(
            "regex parse error at offset 0: repetition operator missing \
             expression",
            err("+").to_string(),
        );
    }
}
