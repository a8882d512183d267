//! Shared fixture grammars.
//!
//! Three layers, each extending the one before:
//!
//! - `json`: data literals, arrays, records, program holes
//! - `calc`: arithmetic with identifiers, overriding `assignExpr`
//! - `cond`: comparisons and `?:`, calling `calc`'s `assignExpr` as `super`

use std::sync::Arc;

use qpg::{fold_binary, Action, Grammar, Template, Value};

pub const JSON: &str = r#"
    # to be overridden or inherited
    start ::= assignExpr EOF ${};

    # to be extended
    primaryExpr ::=
      dataLiteral ${}
    / array
    / record
    / HOLE ${};

    dataLiteral ::= "null" / "false" / "true" / NUMBER / STRING;

    array ::= "[" element ** "," "]" ${};

    # to be extended
    element ::= assignExpr;

    record ::= "{" propDef ** "," "}" ${};

    propDef ::= propName ":" assignExpr ${};

    propName ::= STRING ${};

    # to be overridden
    assignExpr ::= primaryExpr;
"#;

pub const CALC: &str = r#"
    start ::= super.start;

    assignExpr ::= addExpr;

    addExpr ::= mulExpr (("+" / "-") mulExpr)* ${};
    mulExpr ::= unaryExpr (("*" / "/") unaryExpr)* ${};

    unaryExpr ::= "-" unaryExpr ${} / primaryExpr;

    primaryExpr ::=
      super.primaryExpr
    / "(" assignExpr ")" ${}
    / IDENT ${};
"#;

pub const COND: &str = r#"
    assignExpr ::= condExpr;

    condExpr ::=
      relExpr "?" assignExpr ":" assignExpr ${}
    / relExpr;

    relExpr ::= super.assignExpr (("<=" / ">=" / "<" / ">") super.assignExpr)* ${};
"#;

/// Factor `i` of an action's input, or null.
pub fn arg(values: &[Value], i: usize) -> Value {
    values.get(i).cloned().unwrap_or(Value::Null)
}

fn binary() -> Action {
    Action::fallible(|values| fold_binary(arg(&values, 0), arg(&values, 1).into_list()?).ok())
}

pub fn json() -> Arc<Grammar> {
    let actions = vec![
        // start
        Action::new(|values| arg(&values, 0)),
        // primaryExpr
        Action::fallible(|values| {
            let data = Value::from_json_literal(arg(&values, 0).as_str()?)?;
            Some(Value::node("data", [data]))
        }),
        Action::new(|values| Value::node("exprHole", [arg(&values, 0)])),
        // array
        Action::new(|values| Value::node("array", [arg(&values, 1)])),
        // record
        Action::new(|values| Value::node("record", [arg(&values, 1)])),
        // propDef
        Action::new(|values| Value::node("prop", [arg(&values, 0), arg(&values, 2)])),
        // propName
        Action::fallible(|values| Value::from_json_literal(arg(&values, 0).as_str()?)),
    ];
    qpg::grammar(JSON, actions).unwrap()
}

pub fn calc(parent: &Arc<Grammar>) -> Arc<Grammar> {
    let actions = vec![
        binary(),
        binary(),
        Action::new(|values| Value::node("neg", [arg(&values, 1)])),
        Action::new(|values| arg(&values, 1)),
        Action::new(|values| Value::node("use", [arg(&values, 0)])),
    ];
    qpg::extend(parent, CALC, actions).unwrap()
}

pub fn cond(parent: &Arc<Grammar>) -> Arc<Grammar> {
    let actions = vec![
        Action::new(|values| Value::node("cond", [arg(&values, 0), arg(&values, 2), arg(&values, 4)])),
        binary(),
    ];
    qpg::extend(parent, COND, actions).unwrap()
}

/// `[json, calc, cond]`.
pub fn layers() -> [Arc<Grammar>; 3] {
    let json = json();
    let calc = calc(&json);
    let cond = cond(&calc);
    [json, calc, cond]
}

/// Parse hole-free `text` from `start`, keeping only the value.
pub fn parse(grammar: &Grammar, text: &str) -> Option<Value> {
    grammar.parse(&Template::literal(text), Vec::new()).ok().map(|p| p.value)
}

pub fn data(n: f64) -> Value {
    Value::node("data", [Value::Number(n)])
}
