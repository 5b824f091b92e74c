use super::token::{char_from_name, parse_float, LexErrorKind, Token, TokenKind};
use super::Location;
use std::iter::Peekable;
use std::str::Chars;
use std::sync::Arc;

/// Characters that end an atom.
#[inline]
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '"' | ';' | '\'' | '`' | ',')
}

/// Whether an atom should be read as a number rather than a symbol.
fn looks_numeric(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('+' | '-') => match chars.next() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => chars.next().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        },
        Some('.') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Single-pass tokenizer over any character stream, one character of
/// lookahead. Tokens are produced on demand and never buffered.
pub struct Lexer<I: Iterator<Item = char>> {
    chars: Peekable<I>,
    file: Arc<str>,
    line: usize,
    col: usize,
    offset: usize,
}

impl<'a> Lexer<Chars<'a>> {
    pub fn new(file: &str, source: &'a str) -> Self {
        Lexer::from_chars(file, source.chars())
    }
}

impl<I: Iterator<Item = char>> Lexer<I> {
    pub fn from_chars(file: &str, chars: I) -> Self {
        Lexer {
            chars: chars.peekable(),
            file: Arc::from(file),
            line: 1,
            col: 1,
            offset: 0,
        }
    }

    /// Position of the next unread character.
    pub fn location(&self) -> Location {
        Location {
            file: self.file.clone(),
            line: self.line,
            col: self.col,
            offset: self.offset,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.offset += 1;
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn skip_whitespace_and_line_comments(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else if c == ';' {
                while let Some(c) = self.advance() {
                    if c == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    /// Produce the next token. Once the stream is exhausted every call
    /// returns `EndOfStream`.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace_and_line_comments();
            let loc = self.location();
            let c = match self.advance() {
                Some(c) => c,
                None => return Token::new(TokenKind::EndOfStream, "", loc),
            };

            let kind = match c {
                '(' => TokenKind::OpenList,
                ')' => TokenKind::CloseList,
                '\'' => TokenKind::Quote,
                '`' => TokenKind::Quasiquote,
                ',' => {
                    if self.peek() == Some('@') {
                        self.advance();
                        return Token::new(TokenKind::UnquoteSplicing, ",@", loc);
                    }
                    TokenKind::Unquote
                }
                '"' => return self.string(loc),
                '#' => {
                    if self.peek() == Some('|') {
                        self.advance();
                        if let Some(err) = self.block_comment(&loc) {
                            return err;
                        }
                        continue;
                    }
                    return self.hash(loc);
                }
                _ => return self.atom(c, loc),
            };
            return Token::new(kind, c.to_string(), loc);
        }
    }

    /// Skip a nested `#| ... |#` comment whose opener was consumed.
    fn block_comment(&mut self, start: &Location) -> Option<Token> {
        let mut depth = 1;
        while depth > 0 {
            match self.advance() {
                Some('|') if self.peek() == Some('#') => {
                    self.advance();
                    depth -= 1;
                }
                Some('#') if self.peek() == Some('|') => {
                    self.advance();
                    depth += 1;
                }
                Some(_) => {}
                None => {
                    return Some(Token::new(
                        TokenKind::Error(LexErrorKind::UnterminatedComment),
                        "#|",
                        start.clone(),
                    ))
                }
            }
        }
        None
    }

    fn take_atom_chars(&mut self, text: &mut String) {
        while let Some(c) = self.peek() {
            if is_delimiter(c) {
                break;
            }
            text.push(c);
            self.advance();
        }
    }

    fn atom(&mut self, first: char, loc: Location) -> Token {
        let mut text = first.to_string();
        self.take_atom_chars(&mut text);

        let kind = if text == "." {
            TokenKind::Dot
        } else if looks_numeric(&text) {
            classify_number(&text)
        } else if matches!(text.as_str(), "+inf.0" | "-inf.0" | "+nan.0" | "-nan.0") {
            TokenKind::Float
        } else {
            TokenKind::Symbol
        };
        Token::new(kind, text, loc)
    }

    fn hash(&mut self, loc: Location) -> Token {
        match self.peek() {
            Some('(') => {
                self.advance();
                Token::new(TokenKind::OpenVector, "#(", loc)
            }
            Some('\'') => {
                self.advance();
                Token::new(TokenKind::QuoteSyntax, "#'", loc)
            }
            Some('\\') => {
                self.advance();
                self.character(loc)
            }
            _ => {
                let mut text = String::from("#");
                self.take_atom_chars(&mut text);
                let kind = match text.as_str() {
                    "#t" | "#true" | "#f" | "#false" => TokenKind::Boolean,
                    t if t.starts_with("#x") || t.starts_with("#X") => {
                        let digits = &t[2..];
                        let valid = !digits.is_empty()
                            && digits.chars().all(|c| c.is_ascii_hexdigit())
                            && u64::from_str_radix(digits, 16).is_ok();
                        if valid {
                            TokenKind::HexInteger
                        } else {
                            TokenKind::Error(LexErrorKind::BadNumber)
                        }
                    }
                    _ => TokenKind::Error(LexErrorKind::BadHash),
                };
                Token::new(kind, text, loc)
            }
        }
    }

    fn character(&mut self, loc: Location) -> Token {
        let mut text = String::from("#\\");
        let first = match self.advance() {
            Some(c) => c,
            None => {
                return Token::new(TokenKind::Error(LexErrorKind::BadCharacter), text, loc)
            }
        };
        text.push(first);
        if first.is_alphanumeric() {
            self.take_atom_chars(&mut text);
        }
        let kind = if char_from_name(&text[2..]).is_some() {
            TokenKind::Character
        } else {
            TokenKind::Error(LexErrorKind::BadCharacter)
        };
        Token::new(kind, text, loc)
    }

    /// Read a string whose opening quote was consumed. Escapes: `\n \t \r
    /// \0 \a \\ \"` and `\x<hex>;`. A bad escape still scans to the closing
    /// quote so lexing can resume after it.
    fn string(&mut self, loc: Location) -> Token {
        let mut buf = String::new();
        let mut bad_escape: Option<String> = None;
        loop {
            let c = match self.advance() {
                Some(c) => c,
                None => {
                    let mut text = String::from("\"");
                    text.extend(buf.chars().take(20));
                    return Token::new(
                        TokenKind::Error(LexErrorKind::UnterminatedString),
                        text,
                        loc,
                    );
                }
            };
            match c {
                '"' => break,
                '\\' => match self.escape() {
                    Ok(decoded) => buf.push(decoded),
                    Err(text) => {
                        if bad_escape.is_none() {
                            bad_escape = Some(text);
                        }
                    }
                },
                _ => buf.push(c),
            }
        }
        match bad_escape {
            Some(text) => Token::new(TokenKind::Error(LexErrorKind::BadEscape), text, loc),
            None => Token::new(TokenKind::String, buf, loc),
        }
    }

    fn escape(&mut self) -> Result<char, String> {
        let c = match self.peek() {
            Some(c) => c,
            None => return Err("\\".to_string()),
        };
        self.advance();
        match c {
            'n' => Ok('\n'),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            '0' => Ok('\0'),
            'a' => Ok('\u{7}'),
            '\\' => Ok('\\'),
            '"' => Ok('"'),
            'x' => {
                let mut digits = String::new();
                while let Some(d) = self.peek() {
                    if !d.is_ascii_hexdigit() {
                        break;
                    }
                    digits.push(d);
                    self.advance();
                }
                let terminated = self.peek() == Some(';');
                if terminated {
                    self.advance();
                }
                let decoded = u32::from_str_radix(&digits, 16)
                    .ok()
                    .and_then(char::from_u32);
                match decoded {
                    Some(ch) if terminated => Ok(ch),
                    _ => Err(format!("\\x{}", digits)),
                }
            }
            other => Err(format!("\\{}", other)),
        }
    }
}

fn classify_number(text: &str) -> TokenKind {
    let floating = text.contains(['.', 'e', 'E']);
    let ok = if floating {
        parse_float(text).is_some()
    } else {
        text.parse::<i64>().is_ok()
    };
    match (ok, floating) {
        (true, true) => TokenKind::Float,
        (true, false) => TokenKind::Integer,
        (false, _) => TokenKind::Error(LexErrorKind::BadNumber),
    }
}

impl<I: Iterator<Item = char>> Iterator for Lexer<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}
