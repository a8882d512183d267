//! Single-grammar semantics.

use pretty_assertions::assert_eq;
use qpg::{Action, GrammarError, ParseError, Template, Value};

use crate::common::{data, json, parse};

#[test]
fn ordered_choice_takes_the_first_match() {
    let g = qpg::grammar(r#"A ::= "x" / "x" "y";"#, vec![]).unwrap();
    let p = g.parse_rule("A", &Template::literal("x y"), vec![]).unwrap();
    assert_eq!(p.value, Value::from("x"));
    assert_eq!(p.consumed, 1);
    assert!(!p.is_complete());
}

#[test]
fn separated_items_drop_their_separators() {
    let g = json();
    let array = |items: Vec<Value>| Value::node("array", [Value::list(items)]);

    assert_eq!(
        parse(&g, "[1,2,3]"),
        Some(array(vec![data(1.0), data(2.0), data(3.0)]))
    );
    assert_eq!(parse(&g, "[]"), Some(array(vec![])));
    assert_eq!(parse(&g, "[1,]"), None);
}

#[test]
fn start_requires_end_of_input() {
    let g = json();
    let err = g.parse(&Template::literal("1 2"), vec![]).unwrap_err();
    assert_eq!(err.to_string(), "no alternative of `start` matched at \"2\" at #0@2:3");
}

#[test]
fn data_literals_decode() {
    let g = json();
    assert_eq!(parse(&g, "null"), Some(Value::node("data", [Value::Null])));
    assert_eq!(parse(&g, "true"), Some(Value::node("data", [Value::Bool(true)])));
    assert_eq!(
        parse(&g, r#""a\nb""#),
        Some(Value::node("data", [Value::from("a\nb")]))
    );
}

#[test]
fn definition_errors_fail_fast() {
    let err = qpg::grammar("start ::= value;", vec![]).unwrap_err();
    assert!(matches!(err, GrammarError::UndefinedRule { .. }));

    let err = qpg::grammar("start ::= NEWLINE;", vec![]).unwrap_err();
    assert_eq!(err.to_string(), "rule `start` refers to unknown terminal `NEWLINE`");

    let err = qpg::grammar("start ::= ${};", vec![]).unwrap_err();
    assert!(matches!(err, GrammarError::ActionCount { holes: 1, actions: 0 }));

    let err = qpg::grammar("start ::= \"a\" ${} \"b\";", vec![Action::fail()]).unwrap_err();
    assert!(matches!(err, GrammarError::Syntax { .. }));
}

#[test]
fn program_holes_pair_with_values() {
    let g = json();
    let p = g
        .parse(&qpg::program("[${}, 2]"), vec![Value::from("first")])
        .unwrap();
    let expected = Value::node(
        "array",
        [Value::list([Value::node("exprHole", [Value::Hole(0)]), data(2.0)])],
    );
    assert_eq!(p.value, expected);
    assert_eq!(p.hole(0), Some(&Value::from("first")));

    let err = g.parse(&qpg::program("[${}]"), vec![]).unwrap_err();
    assert!(matches!(err, ParseError::HoleCount { expected: 1, found: 0 }));
}
