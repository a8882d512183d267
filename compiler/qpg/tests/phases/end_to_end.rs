//! Fixture languages parsed and then interpreted.

use pretty_assertions::assert_eq;
use qpg::{ensure, visit, Node, Panic, ReplaceVisitor, Template, Value, Visitor};
use rustc_hash::FxHashMap;

use crate::common::{data, json, layers, parse};

#[test]
fn json_document_parses_to_tagged_lists() {
    qpg::init_tracing();
    let ast = parse(&json(), r#"[{"a": 5}, 88]"#).unwrap();
    let expected = Value::node(
        "array",
        [Value::list([
            Value::node(
                "record",
                [Value::list([Value::node("prop", [Value::from("a"), data(5.0)])])],
            ),
            data(88.0),
        ])],
    );
    assert_eq!(ast, expected);
    assert_eq!(
        ast.to_string(),
        r#"["array",[["record",[["prop","a",["data",5]]]],["data",88]]]"#
    );
}

/// Evaluates `calc`/`cond` trees to numbers.
struct Calc<'a> {
    env: &'a FxHashMap<&'a str, f64>,
    holes: &'a [Value],
}

impl Calc<'_> {
    fn number(&mut self, value: &Value) -> Result<f64, Panic> {
        match visit(value, self)? {
            Value::Number(n) => Ok(n),
            other => Err(Panic::new(format!("number expected, got {other}"))),
        }
    }

    fn field(node: &Node, i: usize) -> Result<&Value, Panic> {
        node.field(i)
            .ok_or_else(|| Panic::new(format!("{} has no field {i}", node.kind())))
    }
}

impl Visitor for Calc<'_> {
    type Output = Value;

    fn visit_node(&mut self, node: &Node) -> Result<Value, Panic> {
        let n = match node.kind() {
            "data" => return Ok(Self::field(node, 0)?.clone()),
            "use" => {
                let name = Self::field(node, 0)?.as_str().unwrap_or_default();
                let value = self.env.get(name).copied();
                ensure(value.is_some(), || format!("unbound {name}"))?;
                value.unwrap_or_default()
            }
            "exprHole" => {
                let index = Self::field(node, 0)?.as_hole().unwrap_or(usize::MAX);
                let hole = self
                    .holes
                    .get(index)
                    .ok_or_else(|| Panic::new(format!("no hole {index}")))?;
                return Ok(hole.clone());
            }
            "neg" => -self.number(Self::field(node, 0)?)?,
            "+" | "-" | "*" | "/" | "<" | ">" | "<=" | ">=" => {
                let left = self.number(Self::field(node, 0)?)?;
                let right = self.number(Self::field(node, 1)?)?;
                match node.kind() {
                    "+" => left + right,
                    "-" => left - right,
                    "*" => left * right,
                    "/" => left / right,
                    "<" => f64::from(u8::from(left < right)),
                    ">" => f64::from(u8::from(left > right)),
                    "<=" => f64::from(u8::from(left <= right)),
                    _ => f64::from(u8::from(left >= right)),
                }
            }
            "cond" => {
                let test = self.number(Self::field(node, 0)?)?;
                let branch = if test == 0.0 { 2 } else { 1 };
                return visit(Self::field(node, branch)?, self);
            }
            _ => return self.visit_ast(node),
        };
        Ok(Value::Number(n))
    }
}

fn evaluate(text: &str, holes: Vec<Value>) -> Result<Value, Panic> {
    let [_, _, cond] = layers();
    let parsed = cond.parse(&qpg::program(text), holes).unwrap();
    let env: FxHashMap<&str, f64> = [("x", 10.0), ("y", 4.0)].into_iter().collect();
    let mut calc = Calc {
        env: &env,
        holes: &parsed.holes,
    };
    visit(&parsed.value, &mut calc)
}

#[test]
fn interpreter_evaluates_layered_language() {
    assert_eq!(evaluate("1 + 2 * 3", vec![]).unwrap(), Value::Number(7.0));
    assert_eq!(evaluate("(1 + 2) * 3", vec![]).unwrap(), Value::Number(9.0));
    assert_eq!(evaluate("x - y - 1", vec![]).unwrap(), Value::Number(5.0));
    assert_eq!(evaluate("x < y ? 1 : -1", vec![]).unwrap(), Value::Number(-1.0));
    assert_eq!(
        evaluate("${} * 2", vec![Value::Number(21.0)]).unwrap(),
        Value::Number(42.0)
    );
}

#[test]
fn interpreter_panics_on_unknown_shapes() {
    let err = evaluate("z", vec![]).unwrap_err();
    assert_eq!(err.message(), "unbound z");

    // Arrays are valid syntax but the interpreter has no arm for them.
    let err = evaluate("[1]", vec![]).unwrap_err();
    assert_eq!(err.message(), "unrecognized ast kind array");
}

#[test]
fn replace_visitor_copies_a_parsed_tree() {
    let ast = parse(&json(), r#"{"k": [true, null]}"#).unwrap();
    let copy = visit(&ast, &mut ReplaceVisitor).unwrap();
    assert_eq!(copy, ast);
}

#[test]
fn grammar_and_program_share_the_hole_shape() {
    // The same literal-plus-hole shape serves grammar text and program text.
    let g = qpg::grammar("start ::= HOLE \"=\" HOLE ${};", vec![qpg::Action::new(|values| {
        Value::node("bind", values.into_iter().step_by(2))
    })])
    .unwrap();
    let p = g
        .parse(&Template::new(["", " = ", ""]), vec![Value::from("k"), Value::Number(1.0)])
        .unwrap();
    assert_eq!(p.value, Value::node("bind", [Value::Hole(0), Value::Hole(1)]));
    assert_eq!(p.holes, [Value::from("k"), Value::Number(1.0)]);
}
