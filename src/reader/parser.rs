//! Recursive-descent reader from tokens to located syntax.

use super::lexer::Lexer;
use super::token::{Token, TokenKind};
use super::Location;
use crate::error::{Error, LResult};
use crate::symbol::Symbol;
use crate::syntax::{Syntax, SyntaxKind};
use std::rc::Rc;

/// Deepest accepted nesting of lists, vectors and quote forms. Reading,
/// analysis and code generation all recurse on it.
pub const MAX_NESTING: usize = 512;

pub struct Parser<I: Iterator<Item = char>> {
    lexer: Lexer<I>,
    depth: usize,
}

fn read_error(message: impl Into<String>, loc: &Location) -> Error {
    Error::syntax("read", message).with_location(loc.clone())
}

impl<I: Iterator<Item = char>> Parser<I> {
    pub fn new(lexer: Lexer<I>) -> Self {
        Parser { lexer, depth: 0 }
    }

    /// Read the next top-level form. `Ok(None)` means the input ended
    /// cleanly between forms.
    pub fn parse(&mut self) -> LResult<Option<Syntax>> {
        let token = self.lexer.next_token();
        if token.is_eof() {
            return Ok(None);
        }
        self.datum(token).map(Some)
    }

    fn datum(&mut self, token: Token) -> LResult<Syntax> {
        let loc = token.loc.clone();
        let kind = match token.kind {
            TokenKind::Integer | TokenKind::HexInteger => match token.int_value() {
                Some(n) => SyntaxKind::Int(n),
                None => return Err(lexical(&token)),
            },
            TokenKind::Float => match token.float_value() {
                Some(f) => SyntaxKind::Float(f),
                None => return Err(lexical(&token)),
            },
            TokenKind::Boolean => match token.bool_value() {
                Some(b) => SyntaxKind::Bool(b),
                None => return Err(lexical(&token)),
            },
            TokenKind::Character => match token.char_value() {
                Some(c) => SyntaxKind::Char(c),
                None => return Err(lexical(&token)),
            },
            TokenKind::String => SyntaxKind::Str(Rc::from(token.text.as_str())),
            TokenKind::Symbol => SyntaxKind::Symbol(Symbol::intern(&token.text)),
            TokenKind::Quote => return self.nested(|p| p.quoted("quote", loc)),
            TokenKind::Quasiquote => return self.nested(|p| p.quoted("quasiquote", loc)),
            TokenKind::Unquote => return self.nested(|p| p.quoted("unquote", loc)),
            TokenKind::UnquoteSplicing => {
                return self.nested(|p| p.quoted("unquote-splicing", loc))
            }
            TokenKind::QuoteSyntax => return self.nested(|p| p.quoted("quote-syntax", loc)),
            TokenKind::OpenList => return self.nested(|p| p.list(loc)),
            TokenKind::OpenVector => return self.nested(|p| p.vector(loc)),
            TokenKind::CloseList => return Err(read_error("unexpected `)`", &loc)),
            TokenKind::Dot => return Err(read_error("illegal use of `.`", &loc)),
            TokenKind::EndOfStream => return Err(read_error("unexpected end of input", &loc)),
            TokenKind::Error(_) => return Err(lexical(&token)),
        };
        Ok(Syntax::new(kind, loc))
    }

    fn nested(&mut self, read: impl FnOnce(&mut Self) -> LResult<Syntax>) -> LResult<Syntax> {
        if self.depth >= MAX_NESTING {
            let loc = self.lexer.location();
            return Err(read_error(
                format!("nesting deeper than {} levels", MAX_NESTING),
                &loc,
            ));
        }
        self.depth += 1;
        let result = read(self);
        self.depth -= 1;
        result
    }

    /// `'x` and friends become `(quote x)`; the head symbol carries the
    /// location of the quote character.
    fn quoted(&mut self, name: &str, loc: Location) -> LResult<Syntax> {
        let next = self.lexer.next_token();
        match next.kind {
            TokenKind::EndOfStream | TokenKind::CloseList | TokenKind::Dot => Err(read_error(
                format!("expected an element for quoting `{}`", name),
                &next.loc,
            )),
            _ => {
                let inner = self.datum(next)?;
                let head = Syntax::new(SyntaxKind::Symbol(Symbol::intern(name)), loc.clone());
                Ok(Syntax::new(SyntaxKind::List(vec![head, inner]), loc))
            }
        }
    }

    fn list(&mut self, open: Location) -> LResult<Syntax> {
        let mut items = Vec::new();
        loop {
            let token = self.lexer.next_token();
            match token.kind {
                TokenKind::CloseList => return Ok(Syntax::new(SyntaxKind::List(items), open)),
                TokenKind::EndOfStream => {
                    return Err(read_error("expected a `)` to close `(`", &open))
                }
                TokenKind::Dot => {
                    if items.is_empty() {
                        return Err(read_error("illegal use of `.`", &token.loc));
                    }
                    let tail_token = self.lexer.next_token();
                    if matches!(tail_token.kind, TokenKind::CloseList | TokenKind::EndOfStream) {
                        return Err(read_error("illegal use of `.`", &token.loc));
                    }
                    let tail = self.datum(tail_token)?;
                    let close = self.lexer.next_token();
                    return match close.kind {
                        TokenKind::CloseList => Ok(Syntax::dotted(items, tail, open)),
                        TokenKind::EndOfStream => {
                            Err(read_error("expected a `)` to close `(`", &open))
                        }
                        _ => Err(read_error(
                            "illegal use of `.`: more than one datum after dot",
                            &close.loc,
                        )),
                    };
                }
                _ => items.push(self.datum(token)?),
            }
        }
    }

    fn vector(&mut self, open: Location) -> LResult<Syntax> {
        let mut items = Vec::new();
        loop {
            let token = self.lexer.next_token();
            match token.kind {
                TokenKind::CloseList => {
                    return Ok(Syntax::new(SyntaxKind::Vector(items), open))
                }
                TokenKind::EndOfStream => {
                    return Err(read_error("expected a `)` to close `#(`", &open))
                }
                TokenKind::Dot => {
                    return Err(read_error("illegal use of `.` in a vector", &token.loc))
                }
                _ => items.push(self.datum(token)?),
            }
        }
    }
}

fn lexical(token: &Token) -> Error {
    let message = match token.kind {
        TokenKind::Error(kind) => format!("{} `{}`", kind.describe(), token.text),
        _ => format!("malformed literal `{}`", token.text),
    };
    Error::lexical(message).with_location(token.loc.clone())
}

impl<I: Iterator<Item = char>> Iterator for Parser<I> {
    type Item = LResult<Syntax>;

    fn next(&mut self) -> Option<LResult<Syntax>> {
        self.parse().transpose()
    }
}
