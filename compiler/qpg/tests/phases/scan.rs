//! Token lists built from grammar and program text.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use qpg::{Entry, LexError, Scanner, Template, Value};

use crate::common::json;

fn holes(entries: &[Entry]) -> Vec<(usize, usize)> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(at, entry)| entry.as_hole().map(|hole| (at, hole)))
        .collect()
}

#[test]
fn program_scanner_reserves_grammar_words() {
    let grammar = json();
    let mut keywords: Vec<&str> = grammar.scanner().keywords().collect();
    keywords.sort_unstable();
    assert_eq!(keywords, ["false", "null", "true"]);
    assert_eq!(grammar.scanner().operators(), [",", ":", "[", "]", "{", "}"]);
}

#[test]
fn program_holes_sit_between_segment_tokens() {
    let grammar = json();
    let tokens = grammar.scanner().scan(&qpg::program("[${}, 1, ${}]")).unwrap();
    assert_eq!(tokens.texts(), ["[", "${0}", ",", "1", ",", "${1}", "]"]);
    assert_eq!(holes(tokens.entries()), [(1, 0), (5, 1)]);
}

#[test]
fn grammar_operator_shadows_comment_marker() {
    let grammar = qpg::grammar(r##"start ::= NUMBER "#" NUMBER / NUMBER;"##, vec![]).unwrap();
    let tokens = grammar.scanner().scan_str("1 # trailing comment\n").unwrap();
    assert_eq!(tokens.texts(), ["1", "#", "trailing", "comment"]);

    let parsed = grammar.parse(&Template::literal("1 # 2"), vec![]).unwrap();
    assert_eq!(parsed.value, Value::list(["1", "#", "2"].map(Value::from)));
}

#[test]
fn lexical_errors_name_the_segment() {
    let scanner = Scanner::new(["+"]).unwrap();
    let err = scanner.scan(&Template::new(["1 +", " 'x'"])).unwrap_err();
    assert!(!err.is_internal());
    match err {
        LexError::Lexical { remainder, pos } => {
            assert_eq!(remainder, "'x'");
            assert_eq!((pos.segment, pos.start), (1, 1));
        }
        other => panic!("unexpected error: {other}"),
    }
}

proptest! {
    /// Two action holes keep their indices and land right after the tokens
    /// of the text before them, however much padding surrounds them.
    #[test]
    fn action_holes_keep_their_positions(
        pad_a in "[ \t\n]{0,4}",
        pad_b in "[ \t\n]{0,4}",
        pad_c in "[ \t\n]{0,4}",
        words in 0usize..4,
    ) {
        let filler = " x".repeat(words);
        let text = Template::new([
            format!("{pad_a}a ::= b{filler}{pad_b}"),
            format!("{pad_c}/ c{filler} "),
            format!("{pad_a};{pad_c}"),
        ]);
        let tokens = Scanner::new(["::=", "/", ";"]).unwrap().scan(&text).unwrap();
        let first = 3 + words;
        let second = first + 1 + 2 + words;
        prop_assert_eq!(holes(tokens.entries()), vec![(first, 0), (second, 1)]);
    }

    #[test]
    fn whitespace_and_numbers_scan_to_numbers(numbers in proptest::collection::vec(0u32..1000, 0..8)) {
        let text: String = numbers.iter().map(|n| format!(" {n}\n")).collect();
        let tokens = Scanner::new(std::iter::empty::<&str>()).unwrap().scan_str(&text).unwrap();
        let expected: Vec<String> = numbers.iter().map(u32::to_string).collect();
        prop_assert_eq!(tokens.texts(), expected);
    }
}
