use bstr::ByteSlice;
use regex_derivative::{
    regex::{parse, Encoding, Literal, Regex},
    Matcher, StrMatcher,
};

use crate::Result;

const ENCODINGS: &[Encoding] =
    &[Encoding::Utf8, Encoding::Utf16Le, Encoding::Utf16Be];

fn check(re: &Regex<char>, yes: &[&str], no: &[&str]) -> Result<()> {
    for &enc in ENCODINGS {
        for config in [
            Matcher::config(),
            Matcher::config().vectorize(false),
            Matcher::config().optimize(false),
        ] {
            let m = Matcher::builder()
                .configure(config)
                .build_encoded(re, enc)?;
            for s in yes {
                let bytes = enc.encode_str(s);
                assert!(
                    m.accepts(&bytes),
                    "{:?} {:?} should match {:?}",
                    m.kind(),
                    enc,
                    bytes.as_bstr(),
                );
            }
            for s in no {
                let bytes = enc.encode_str(s);
                assert!(
                    !m.accepts(&bytes),
                    "{:?} {:?} should not match {:?}",
                    m.kind(),
                    enc,
                    bytes.as_bstr(),
                );
            }
        }
    }
    Ok(())
}

#[test]
fn literals() -> Result<()> {
    check(&parse("é€😀")?, &["é€😀"], &["", "é€", "e€😀", "é€😀😀"])
}

#[test]
fn any_character() -> Result<()> {
    let re = "<".literal() * Regex::any() * ">".literal();
    check(&re, &["<a>", "<é>", "<€>", "<😀>"], &["<>", "<ab>", "<é€>"])
}

#[test]
fn complement_respects_characters() -> Result<()> {
    // Two non-empty pieces can't be cut out of a single character.
    let nonempty = !Regex::<char>::epsilon();
    let re = nonempty.clone() * nonempty;
    check(&re, &["ab", "é😀", "€€€"], &["", "é", "😀"])
}

#[test]
fn intersection() -> Result<()> {
    let any = Regex::any().star();
    let re = (any.clone() * "€".literal() * any.clone())
        & (any.clone() * "😀".literal() * any)
        & !"€😀".literal();
    check(&re, &["😀€", "€a😀", "€😀€"], &["€😀", "€", "😀", "a"])
}

#[test]
fn str_matcher() -> Result<()> {
    let m = StrMatcher::new(&parse("(caf(e|é))+")?)?;
    assert!(m.accepts("café"));
    assert!(m.accepts("cafecafé"));
    assert!(!m.accepts("cafè"));
    assert!(m.as_bytes().accepts("café".as_bytes()));
    Ok(())
}
