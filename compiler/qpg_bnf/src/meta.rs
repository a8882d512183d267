//! Parser for the grammar notation itself.
//!
//! ```text
//! grammar  ::= rule* EOF
//! rule     ::= IDENT "::=" choice ";"
//! choice   ::= sequence ("/" sequence)*
//! sequence ::= factor* HOLE?
//! factor   ::= atom ("?" / "*" / "+" / "**" atom / "++" atom)?
//! atom     ::= STRING / "super" "." IDENT / IDENT / "(" choice ")"
//! ```

use qpg_ir::Template;
use qpg_lexer::{Cursor, Scanner, Token};

use crate::syntax::{Atom, Choice, Factor, Repeat, RuleDef, Sequence, Terminal};
use crate::GrammarError;

/// Reserved tokens of the notation.
const META_TOKENS: &[&str] = &["::=", "/", ";", "*", "+", "?", "**", "++", "(", ")", ".", "super"];

/// Parse grammar text into rule definitions, in source order.
pub(crate) fn parse_rules(text: &Template) -> Result<Vec<RuleDef>, GrammarError> {
    let tokens = Scanner::new(META_TOKENS)?.scan(text)?;
    let mut parser = MetaParser {
        cursor: tokens.cursor(),
    };
    let mut rules = Vec::new();
    while !parser.cursor.is_at_end() {
        rules.push(parser.rule()?);
    }
    Ok(rules)
}

struct MetaParser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> MetaParser<'a> {
    fn rule(&mut self) -> Result<RuleDef, GrammarError> {
        let name = self.expect_ident("rule name")?.text.clone();
        self.expect("::=", "`::=`")?;
        let body = self.choice()?;
        self.expect(";", "`;`")?;
        Ok(RuleDef { name, body })
    }

    fn choice(&mut self) -> Result<Choice, GrammarError> {
        let mut alternatives = vec![self.sequence()?];
        while self.cursor.eat_literal("/").is_some() {
            alternatives.push(self.sequence()?);
        }
        Ok(Choice { alternatives })
    }

    fn sequence(&mut self) -> Result<Sequence, GrammarError> {
        let mut factors = Vec::new();
        while let Some(factor) = self.factor()? {
            factors.push(factor);
        }
        let action = self.cursor.eat_hole();
        Ok(Sequence { factors, action })
    }

    fn factor(&mut self) -> Result<Option<Factor>, GrammarError> {
        let Some(atom) = self.atom()? else {
            return Ok(None);
        };
        let repeat = if self.cursor.eat_literal("?").is_some() {
            Repeat::Optional
        } else if self.cursor.eat_literal("*").is_some() {
            Repeat::Many
        } else if self.cursor.eat_literal("+").is_some() {
            Repeat::Many1
        } else if self.cursor.eat_literal("**").is_some() {
            Repeat::SepBy(self.separator()?)
        } else if self.cursor.eat_literal("++").is_some() {
            Repeat::SepBy1(self.separator()?)
        } else {
            Repeat::Once
        };
        Ok(Some(Factor { atom, repeat }))
    }

    fn separator(&mut self) -> Result<Atom, GrammarError> {
        match self.atom()? {
            Some(atom) => Ok(atom),
            None => Err(self.unexpected("separator after `**` or `++`")),
        }
    }

    fn atom(&mut self) -> Result<Option<Atom>, GrammarError> {
        if let Some(token) = self.cursor.eat_string() {
            return decode_literal(&token.text).map(|text| Some(Atom::Literal(text)));
        }
        if self.cursor.eat_literal("super").is_some() {
            self.expect(".", "`.` after `super`")?;
            let name = self.expect_ident("rule name after `super.`")?;
            return Ok(Some(Atom::Super(name.text.clone())));
        }
        if let Some(token) = self.cursor.eat_ident() {
            return Ok(Some(match Terminal::from_name(&token.text) {
                Some(terminal) => Atom::Terminal(terminal),
                None => Atom::Rule(token.text.clone()),
            }));
        }
        if self.cursor.eat_literal("(").is_some() {
            let choice = self.choice()?;
            self.expect(")", "`)`")?;
            return Ok(Some(Atom::Group(choice)));
        }
        Ok(None)
    }

    fn expect(&mut self, text: &str, expected: &'static str) -> Result<(), GrammarError> {
        match self.cursor.eat_literal(text) {
            Some(_) => Ok(()),
            None => Err(self.unexpected(expected)),
        }
    }

    fn expect_ident(&mut self, expected: &'static str) -> Result<&'a Token, GrammarError> {
        match self.cursor.eat_ident() {
            Some(token) => Ok(token),
            None => Err(self.unexpected(expected)),
        }
    }

    fn unexpected(&self, expected: &'static str) -> GrammarError {
        let found = match self.cursor.current() {
            Some(entry) => entry.to_string(),
            None => "end of grammar".to_owned(),
        };
        GrammarError::Syntax { expected, found }
    }
}

fn decode_literal(text: &str) -> Result<String, GrammarError> {
    serde_json::from_str(text).map_err(|err| GrammarError::BadLiteral {
        text: text.to_owned(),
        message: err.to_string(),
    })
}
