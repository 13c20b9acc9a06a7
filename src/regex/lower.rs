use crate::{
    regex::{Regex, RegexKind},
    util::symbol::Symbol,
};

/// What `Any` and `Not` turn into when a regex is lowered into a code whose
/// words have different lengths.
struct Within<U> {
    /// Matches one encoded symbol (and possibly some sequences that are not
    /// encodings, as long as factorizations stay aligned to symbols).
    piece: Regex<U>,
    /// `piece*`, computed once.
    pieces: Regex<U>,
}

impl<T: Symbol> Regex<T> {
    /// Rewrite this regex over another alphabet by replacing every symbol
    /// with the sequence `map` returns for it.
    ///
    /// Symbols mapped to an empty sequence become `Epsilon`. Every other
    /// node keeps its shape, including `Any` (any one symbol of the new
    /// alphabet) and `Not` (complement over the new alphabet).
    ///
    /// When every symbol maps to exactly one symbol the lowered regex
    /// matches `map(w)` exactly when this one matches `w`. For codes with
    /// words of different lengths, such as UTF-8, use
    /// [`Regex::lower_within`] instead: taking complements over raw code
    /// units lets a match split an encoded symbol in the middle.
    ///
    /// # Example
    ///
    /// ```
    /// use regex_derivative::regex::{Literal, Regex};
    ///
    /// let re = "ab".literal().star();
    /// let upper = re.lower(|c: &char| c.to_uppercase().collect::<Vec<_>>());
    /// assert!(upper.accepts(&['A', 'B', 'A', 'B']));
    /// ```
    pub fn lower<U, I, F>(&self, mut map: F) -> Regex<U>
    where
        U: Symbol,
        I: IntoIterator<Item = U>,
        F: FnMut(&T) -> I,
    {
        self.lower_imp(&mut map, None)
    }

    /// Like [`Regex::lower`], but `Any` becomes `piece` and every `Not(r)`
    /// becomes `Not(r') & piece*`.
    ///
    /// `piece` must match the image of every symbol, and any way of cutting
    /// an encoded sequence into words of `piece*` must cut it between
    /// encoded symbols. Under that condition the result matches `map(w)`
    /// exactly when this regex matches `w`, for every `w`.
    /// [`Encoding::piece`] provides such a regex for the text encodings.
    pub fn lower_within<U, I, F>(
        &self,
        mut map: F,
        piece: &Regex<U>,
    ) -> Regex<U>
    where
        U: Symbol,
        I: IntoIterator<Item = U>,
        F: FnMut(&T) -> I,
    {
        let within = Within { piece: piece.clone(), pieces: piece.star() };
        self.lower_imp(&mut map, Some(&within))
    }

    fn lower_imp<U, I, F>(
        &self,
        map: &mut F,
        within: Option<&Within<U>>,
    ) -> Regex<U>
    where
        U: Symbol,
        I: IntoIterator<Item = U>,
        F: FnMut(&T) -> I,
    {
        match *self.kind() {
            RegexKind::Single(ref c) => Regex::block(map(c)),
            RegexKind::Block(ref cs) => {
                let mut symbols = vec![];
                for c in cs.iter() {
                    symbols.extend(map(c));
                }
                Regex::block(symbols)
            }
            RegexKind::Any => match within {
                None => Regex::any(),
                Some(w) => w.piece.clone(),
            },
            RegexKind::Fail => Regex::fail(),
            RegexKind::Star(ref r) => r.lower_imp(map, within).star(),
            RegexKind::Not(ref r) => {
                let not = r.lower_imp(map, within).complement();
                match within {
                    None => not,
                    Some(w) => not.and(&w.pieces),
                }
            }
            RegexKind::Seq(ref a, ref b) => {
                let a = a.lower_imp(map, within);
                a.then(&b.lower_imp(map, within))
            }
            RegexKind::Or(ref rs) => {
                let mut members = Vec::with_capacity(rs.len());
                for r in rs.iter() {
                    members.push(r.lower_imp(map, within));
                }
                Regex::alternation(members)
            }
            RegexKind::And(ref rs) => {
                let mut members = Vec::with_capacity(rs.len());
                for r in rs.iter() {
                    members.push(r.lower_imp(map, within));
                }
                Regex::intersection(members)
            }
        }
    }
}

impl Regex<char> {
    /// Lower this regex to bytes in the given text encoding.
    ///
    /// The result matches `encoding.encode_str(s)` exactly when this regex
    /// matches the characters of `s`.
    pub fn encode(&self, encoding: Encoding) -> Regex<u8> {
        self.lower_within(|&c| encoding.encode_char(c), &encoding.piece())
    }
}

/// A way of writing characters as bytes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Encoding {
    /// UTF-8.
    Utf8,
    /// UTF-16 with each code unit written least significant byte first.
    Utf16Le,
    /// UTF-16 with each code unit written most significant byte first.
    Utf16Be,
}

impl Encoding {
    /// The bytes of one character.
    pub fn encode_char(self, c: char) -> Vec<u8> {
        match self {
            Encoding::Utf8 => {
                let mut buf = [0; 4];
                c.encode_utf8(&mut buf).as_bytes().to_vec()
            }
            Encoding::Utf16Le => {
                let mut buf = [0; 2];
                c.encode_utf16(&mut buf)
                    .iter()
                    .flat_map(|unit| unit.to_le_bytes())
                    .collect()
            }
            Encoding::Utf16Be => {
                let mut buf = [0; 2];
                c.encode_utf16(&mut buf)
                    .iter()
                    .flat_map(|unit| unit.to_be_bytes())
                    .collect()
            }
        }
    }

    /// The bytes of a whole string.
    pub fn encode_str(self, s: &str) -> Vec<u8> {
        match self {
            Encoding::Utf8 => s.as_bytes().to_vec(),
            Encoding::Utf16Le => {
                s.encode_utf16().flat_map(|unit| unit.to_le_bytes()).collect()
            }
            Encoding::Utf16Be => {
                s.encode_utf16().flat_map(|unit| unit.to_be_bytes()).collect()
            }
        }
    }

    /// A regex over bytes matching one encoded character, suitable as the
    /// `piece` of [`Regex::lower_within`].
    ///
    /// On well formed input this matches exactly one character. It also
    /// matches some malformed sequences, which does not matter because it
    /// only ever has to agree with the character regex on encoded strings.
    pub fn piece(self) -> Regex<u8> {
        let any = Regex::<u8>::any;
        match self {
            Encoding::Utf8 => {
                // A byte that does not continue a character, followed by all
                // the continuation bytes after it.
                let cont = byte_range(0x80, 0xBF);
                any().and(&cont.complement()).then(&cont.star())
            }
            Encoding::Utf16Le => {
                // A code unit that is not a low surrogate, followed by all
                // the low surrogates after it. Each unit is two bytes, so
                // cuts between pieces land on unit boundaries.
                let low = byte_range(0xDC, 0xDF);
                let first = any().then(&any().and(&low.complement()));
                first.then(&any().then(&low).star())
            }
            Encoding::Utf16Be => {
                let low = byte_range(0xDC, 0xDF);
                let first = any().and(&low.complement()).then(&any());
                first.then(&low.then(&any()).star())
            }
        }
    }
}

fn byte_range(start: u8, end: u8) -> Regex<u8> {
    Regex::alternation((start..=end).map(Regex::single))
}
