//! A generic, untyped s-expression reader for the wire envelope
//! (`(start id role rules start_clk play_clk)` and friends). This is
//! deliberately separate from [`crate::gdl::parser`]: that parser turns
//! text into `Clause`/`Literal` GDL semantics, but the envelope nests plain
//! token lists (a game id, a role name, a whole embedded rule set, raw
//! integers) with no GDL meaning of its own.

use crate::protocol::error::ProtocolError;

#[derive(Clone, Debug, PartialEq)]
pub enum SExpr {
    Atom(String),
    List(Vec<SExpr>),
}

impl SExpr {
    pub fn atom(&self) -> Option<&str> {
        match self {
            SExpr::Atom(s) => Some(s),
            SExpr::List(_) => None,
        }
    }

    pub fn list(&self) -> Option<&[SExpr]> {
        match self {
            SExpr::List(items) => Some(items),
            SExpr::Atom(_) => None,
        }
    }

    /// Renders this expression back to prefix text, e.g. so an embedded rule
    /// list can be handed to [`crate::gdl::parser::parse`] as a sequence of
    /// top-level statements.
    pub fn to_source(&self) -> String {
        match self {
            SExpr::Atom(s) => s.clone(),
            SExpr::List(items) => items.iter().map(SExpr::to_source).collect::<Vec<_>>().join(" "),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token<'a> {
    LParen,
    RParen,
    Word(&'a str),
}

fn lex(source: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let bytes = source.as_bytes();
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' | b'\r' | b'\n' => i += 1,
            b'(' => {
                tokens.push(Token::LParen);
                i += 1;
            },
            b')' => {
                tokens.push(Token::RParen);
                i += 1;
            },
            _ => {
                let start = i;
                while i < bytes.len() && !matches!(bytes[i], b' ' | b'\t' | b'\r' | b'\n' | b'(' | b')') {
                    i += 1;
                }
                tokens.push(Token::Word(&source[start..i]));
            },
        }
    }
    tokens
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn parse_expr(&mut self) -> Result<SExpr, ProtocolError> {
        match self.tokens.get(self.pos) {
            Some(Token::Word(w)) => {
                self.pos += 1;
                Ok(SExpr::Atom((*w).to_string()))
            },
            Some(Token::LParen) => {
                self.pos += 1;
                let mut items = Vec::new();
                loop {
                    match self.tokens.get(self.pos) {
                        Some(Token::RParen) => {
                            self.pos += 1;
                            break;
                        },
                        Some(_) => items.push(self.parse_expr()?),
                        None => return Err(ProtocolError::Malformed("unterminated '('".to_string())),
                    }
                }
                Ok(SExpr::List(items))
            },
            Some(Token::RParen) => Err(ProtocolError::Malformed("unexpected ')'".to_string())),
            None => Err(ProtocolError::Malformed("unexpected end of input".to_string())),
        }
    }
}

/// Parses `source` as exactly one s-expression, rejecting trailing tokens.
pub fn parse_one(source: &str) -> Result<SExpr, ProtocolError> {
    let tokens = lex(source);
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(ProtocolError::Malformed("message must contain exactly one s-expression".to_string()));
    }
    Ok(expr)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_nested_lists() {
        let parsed = parse_one("(start g1 robot ((role robot) (base p)) 10 5)").unwrap();
        let items = parsed.list().unwrap();
        assert_eq!(items[0].atom(), Some("start"));
        assert_eq!(items[1].atom(), Some("g1"));
        let rules = items[3].list().unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].to_source(), "(role robot)");
    }

    #[test]
    fn rejects_trailing_tokens() {
        assert!(parse_one("(info) (info)").is_err());
    }

    #[test]
    fn rejects_unbalanced_parens() {
        assert!(parse_one("(info").is_err());
    }
}
