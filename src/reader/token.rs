use super::Location;

/// Why the lexer could not produce a well-formed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// `#` followed by something the reader does not know.
    BadHash,
    /// Digits that do not form an integer or float, or overflow.
    BadNumber,
    UnterminatedString,
    UnterminatedComment,
    /// `#\` with an unknown character name.
    BadCharacter,
    /// Backslash escape outside the string escape grammar.
    BadEscape,
}

impl LexErrorKind {
    pub fn describe(self) -> &'static str {
        match self {
            LexErrorKind::BadHash => "bad syntax",
            LexErrorKind::BadNumber => "bad number",
            LexErrorKind::UnterminatedString => "unterminated string starting with",
            LexErrorKind::UnterminatedComment => "unterminated block comment",
            LexErrorKind::BadCharacter => "bad character constant",
            LexErrorKind::BadEscape => "unknown escape sequence in string",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    OpenList,
    CloseList,
    OpenVector,
    Symbol,
    Integer,
    /// `#x` literal; the text keeps its prefix.
    HexInteger,
    Float,
    String,
    Boolean,
    Character,
    Quote,
    Quasiquote,
    Unquote,
    UnquoteSplicing,
    /// `#'`, reads as `(quote-syntax form)`.
    QuoteSyntax,
    Dot,
    EndOfStream,
    Error(LexErrorKind),
}

/// One lexeme with the position of its first character.
///
/// `text` is the source spelling, except for strings where it holds the
/// decoded contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub loc: Location,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, loc: Location) -> Self {
        Token {
            kind,
            text: text.into(),
            loc,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfStream
    }

    /// Numeric value of an integer-class token.
    pub fn int_value(&self) -> Option<i64> {
        match self.kind {
            TokenKind::Integer => self.text.parse().ok(),
            TokenKind::HexInteger => {
                let digits = self.text.get(2..)?;
                u64::from_str_radix(digits, 16).ok().map(|v| v as i64)
            }
            _ => None,
        }
    }

    pub fn float_value(&self) -> Option<f64> {
        match self.kind {
            TokenKind::Float => parse_float(&self.text),
            _ => None,
        }
    }

    pub fn bool_value(&self) -> Option<bool> {
        match (self.kind, self.text.as_str()) {
            (TokenKind::Boolean, "#t" | "#true") => Some(true),
            (TokenKind::Boolean, "#f" | "#false") => Some(false),
            _ => None,
        }
    }

    pub fn char_value(&self) -> Option<char> {
        match self.kind {
            TokenKind::Character => char_from_name(self.text.get(2..)?),
            _ => None,
        }
    }
}

/// Parse float spellings, including the `+inf.0` family.
pub(crate) fn parse_float(text: &str) -> Option<f64> {
    match text {
        "+inf.0" => Some(f64::INFINITY),
        "-inf.0" => Some(f64::NEG_INFINITY),
        "+nan.0" | "-nan.0" => Some(f64::NAN),
        _ => text.parse().ok(),
    }
}

const CHAR_NAMES: &[(&str, char)] = &[
    ("space", ' '),
    ("newline", '\n'),
    ("linefeed", '\n'),
    ("tab", '\t'),
    ("return", '\r'),
    ("nul", '\0'),
    ("null", '\0'),
    ("alarm", '\u{7}'),
    ("backspace", '\u{8}'),
    ("delete", '\u{7f}'),
    ("escape", '\u{1b}'),
];

/// Decode the part of a character literal after `#\`.
pub(crate) fn char_from_name(name: &str) -> Option<char> {
    let mut chars = name.chars();
    let first = chars.next()?;
    if chars.next().is_none() {
        return Some(first);
    }
    if let Some(&(_, c)) = CHAR_NAMES.iter().find(|(n, _)| *n == name) {
        return Some(c);
    }
    let hex = name.strip_prefix('x').or_else(|| name.strip_prefix('u'))?;
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

/// The name used when printing a character literal, if it has one.
pub(crate) fn char_name(c: char) -> Option<&'static str> {
    match c {
        ' ' => Some("space"),
        '\n' => Some("newline"),
        '\t' => Some("tab"),
        '\r' => Some("return"),
        '\0' => Some("nul"),
        '\u{7}' => Some("alarm"),
        '\u{8}' => Some("backspace"),
        '\u{7f}' => Some("delete"),
        '\u{1b}' => Some("escape"),
        _ => None,
    }
}
