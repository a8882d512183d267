//! Regex composition as the scanner uses it.

use pretty_assertions::assert_eq;
use qpg::{compose, Context, FullMatch, Interp, RegexTemplate, IDENT, NUMBER};
use regex::Regex;

#[test]
fn close_bracket_stays_inside_the_class() {
    static PARTS: &[&str] = &[r"\A[a", r"]+\z"];
    let template = RegexTemplate::new(PARTS).unwrap();
    assert_eq!(template.contexts(), [Context::Charset]);

    let re = template.make(&[Interp::Text("]")]).unwrap();
    assert!(re.is_match("a]a"));
    assert!(!re.is_match("b"));
}

#[test]
fn block_pattern_is_grouped() {
    let word = Regex::new("cat|dog").unwrap();
    let re = compose(&[r"\Ahot", r"\z"], &[Interp::Pattern(&word)]).unwrap();
    assert_eq!(re.as_str(), r"\Ahot(?:cat|dog)\z");
    assert!(re.is_match("hotdog"));
    assert!(!re.is_match("dog"));
}

#[test]
fn token_classes_compose_into_an_alternation() {
    static TOKEN: &[&str] = &[r"\A(?:", "|", ")"];
    let number = Regex::new(NUMBER).unwrap();
    let ident = Regex::new(IDENT).unwrap();
    let token = compose(TOKEN, &[(&number).into(), (&ident).into()]).unwrap();

    // Declared order decides, not match length.
    assert_eq!(token.find("12ab").unwrap().as_str(), "12");
    assert_eq!(token.find("ab12").unwrap().as_str(), "ab12");
    assert!(token.find("+").is_none());
}

#[test]
fn full_match_never_accepts_a_prefix() {
    let number = FullMatch::from_source(NUMBER).unwrap();
    assert!(number.is_match("1.5e3"));
    assert!(!number.is_match("1.5e3x"));
    assert!(!number.is_match("x1"));
}

#[test]
fn repeat_counts_are_sanitised() {
    static PARTS: &[&str] = &[r"\Ax{", r"}\z"];
    let template = RegexTemplate::new(PARTS).unwrap();
    assert_eq!(template.contexts(), [Context::Count]);
    let re = template.make(&["2".into()]).unwrap();
    assert!(re.is_match("xx"));
    assert!(!re.is_match("x"));
    assert_eq!(template.source(&["1}|.*".into()]).unwrap(), r"\Ax{0}\z");
}
