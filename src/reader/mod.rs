//! Reader: characters to tokens to located [`Syntax`].

mod lexer;
mod location;
mod parser;
pub mod token;

pub use lexer::Lexer;
pub use location::Location;
pub use parser::Parser;
pub use token::{LexErrorKind, Token, TokenKind};

use crate::error::LResult;
use crate::syntax::Syntax;

/// Parser over an in-memory string.
pub fn parser<'a>(file: &str, source: &'a str) -> Parser<std::str::Chars<'a>> {
    Parser::new(Lexer::new(file, source))
}

/// Read every form in `source`.
pub fn read_str(file: &str, source: &str) -> LResult<Vec<Syntax>> {
    parser(file, source).collect()
}

/// Read the first form in `source`, if any.
pub fn read_one(file: &str, source: &str) -> LResult<Option<Syntax>> {
    parser(file, source).parse()
}
