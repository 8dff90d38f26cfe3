//! Lexer and recursive-descent parser for prefix GDL.
//!
//! The grammar is deliberately small: a statement is either an atomic term,
//! a compound term `(functor arg…)`, or a rule `(<= head body…)`. A leading
//! `?` marks a variable; bare integers are distinguished from atoms by a
//! successful `i64` parse. The grammar has no operator precedence and no
//! ambiguity, so a hand-written recursive descent parser is all this needs;
//! there is no grammar-generator dependency pulled in for it.

use crate::gdl::error::GdlError;
use crate::term::{Interner, Term};

/* DEFINITIONS */

/// A single body element: a positive literal or its negation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    Pos(Term),
    Neg(Term),
}

impl Literal {
    pub fn atom(&self) -> &Term {
        match self {
            Literal::Pos(t) | Literal::Neg(t) => t,
        }
    }
}

/// One GDL clause: a fact (`body` empty) or a rule (`<= head body…`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause {
    pub head: Term,
    pub body: Vec<Literal>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token<'a> {
    LParen,
    RParen,
    Word(&'a str),
}

/* LEXER */

fn lex(source: &str) -> Result<Vec<(Token<'_>, usize)>, GdlError> {
    let mut tokens = Vec::new();
    let bytes = source.as_bytes();
    let mut i = 0usize;
    while i < bytes.len() {
        let c = bytes[i];
        match c {
            b' ' | b'\t' | b'\r' | b'\n' => i += 1,
            b';' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            },
            b'(' => {
                tokens.push((Token::LParen, i));
                i += 1;
            },
            b')' => {
                tokens.push((Token::RParen, i));
                i += 1;
            },
            _ => {
                let start = i;
                while i < bytes.len()
                    && !matches!(bytes[i], b' ' | b'\t' | b'\r' | b'\n' | b'(' | b')' | b';')
                {
                    i += 1;
                }
                tokens.push((Token::Word(&source[start..i]), start));
            },
        }
    }
    Ok(tokens)
}

/* PARSER */

struct Parser<'a, 'b> {
    tokens: Vec<(Token<'a>, usize)>,
    pos: usize,
    interner: &'b mut Interner,
}

impl<'a, 'b> Parser<'a, 'b> {
    fn peek(&self) -> Option<(Token<'a>, usize)> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<(Token<'a>, usize)> {
        let tok = self.peek();
        self.pos += 1;
        tok
    }

    fn error(offset: usize, message: impl Into<String>) -> GdlError {
        GdlError::Malformed { offset, message: message.into() }
    }

    /// Parses every top-level statement in the token stream.
    fn parse_statements(&mut self) -> Result<Vec<Clause>, GdlError> {
        let mut clauses = Vec::new();
        while self.peek().is_some() {
            clauses.push(self.parse_statement()?);
        }
        Ok(clauses)
    }

    fn parse_statement(&mut self) -> Result<Clause, GdlError> {
        let term = self.parse_term()?;
        Ok(self.statement_from_term(term))
    }

    /// A statement term is either a rule head `(<= H B…)` or a bare fact.
    fn statement_from_term(&mut self, term: Term) -> Clause {
        if let Term::Compound(functor, args) = &term {
            if self.interner.resolve(*functor) == "<=" && !args.is_empty() {
                let head = args[0].clone();
                let body = args[1..].iter().cloned().map(|t| self.literal_from_term(t)).collect();
                return Clause { head, body };
            }
        }
        Clause { head: term, body: Vec::new() }
    }

    fn literal_from_term(&self, term: Term) -> Literal {
        match &term {
            Term::Compound(functor, args) if args.len() == 1 && self.interner.resolve(*functor) == "not" => {
                Literal::Neg(args[0].clone())
            },
            _ => Literal::Pos(term),
        }
    }

    /// Parses one term: an atom, integer, variable, or compound.
    fn parse_term(&mut self) -> Result<Term, GdlError> {
        match self.advance() {
            Some((Token::LParen, offset)) => self.parse_compound(offset),
            Some((Token::Word(word), offset)) => self.parse_word(word, offset),
            Some((Token::RParen, offset)) => {
                Err(Self::error(offset, "unexpected ')'"))
            },
            None => Err(Self::error(0, "unexpected end of input")),
        }
    }

    fn parse_compound(&mut self, open_offset: usize) -> Result<Term, GdlError> {
        let (name, name_offset) = match self.advance() {
            Some((Token::Word(w), off)) => (w, off),
            Some((_, off)) => return Err(Self::error(off, "expected a functor name")),
            None => return Err(Self::error(open_offset, "unterminated '('")),
        };
        if name.starts_with('?') {
            return Err(Self::error(name_offset, "a variable cannot be used as a functor"));
        }
        let mut args = Vec::new();
        loop {
            match self.peek() {
                Some((Token::RParen, _)) => {
                    self.advance();
                    break;
                },
                Some(_) => args.push(self.parse_term()?),
                None => return Err(Self::error(open_offset, "unterminated '('")),
            }
        }
        if args.is_empty() {
            Ok(Term::atom(self.interner, name))
        } else {
            Ok(Term::compound(self.interner, name, args))
        }
    }

    fn parse_word(&mut self, word: &str, offset: usize) -> Result<Term, GdlError> {
        if let Some(rest) = word.strip_prefix('?') {
            if rest.is_empty() {
                return Err(Self::error(offset, "'?' must be followed by a variable name"));
            }
            return Ok(Term::Variable(self.interner.intern(rest)));
        }
        if let Ok(n) = word.parse::<i64>() {
            return Ok(Term::Integer(n));
        }
        Ok(Term::atom(self.interner, word))
    }
}

/// Parses `source` as a sequence of GDL statements, interning all atom,
/// functor, and variable names against `interner`.
pub fn parse(interner: &mut Interner, source: &str) -> Result<Vec<Clause>, GdlError> {
    let tokens = lex(source)?;
    let mut parser = Parser { tokens, pos: 0, interner };
    parser.parse_statements()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_fact() {
        let mut interner = Interner::new();
        let clauses = parse(&mut interner, "(role robot)").unwrap();
        assert_eq!(clauses.len(), 1);
        assert!(clauses[0].body.is_empty());
        assert_eq!(format!("{}", clauses[0].head.display(&interner)), "(role robot)");
    }

    #[test]
    fn parses_rule_with_negation() {
        let mut interner = Interner::new();
        let clauses = parse(
            &mut interner,
            "(<= (legal robot noop) (true (step 1)) (not (true (closed))))",
        )
        .unwrap();
        assert_eq!(clauses.len(), 1);
        let clause = &clauses[0];
        assert_eq!(clause.body.len(), 2);
        assert!(matches!(clause.body[0], Literal::Pos(_)));
        assert!(matches!(clause.body[1], Literal::Neg(_)));
    }

    #[test]
    fn parses_variable() {
        let mut interner = Interner::new();
        let clauses = parse(&mut interner, "(<= (legal ?r noop) (role ?r))").unwrap();
        let head_args = clauses[0].head.args();
        assert!(matches!(head_args[0], Term::Variable(_)));
    }

    #[test]
    fn rejects_unterminated_input() {
        let mut interner = Interner::new();
        let err = parse(&mut interner, "(role robot").unwrap_err();
        assert!(matches!(err, GdlError::Malformed { .. }));
    }

    #[test]
    fn rejects_variable_functor() {
        let mut interner = Interner::new();
        let err = parse(&mut interner, "(?x a b)").unwrap_err();
        assert!(matches!(err, GdlError::Malformed { .. }));
    }
}
