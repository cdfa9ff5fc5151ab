//! Lexical scanner for C#-style source text.
//!
//! The scanner knows just enough of the language to delimit string literals,
//! character literals and comments, and to report the handful of punctuation
//! tokens the extractor cares about. Everything else is [`TokenKind::Other`].
//!
//! Tokens are produced on demand by a small explicit state machine. Line breaks
//! (`\r\n`, `\r` and `\n`) are normalized to `\n` and each counts as exactly one
//! line, so token line numbers match what an editor shows.

use std::fmt::Write;
use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

/// Classification of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A `"quoted"` or `@"verbatim"` string literal; text is the decoded value.
    String,
    Identifier,
    Period,
    OpenParen,
    CloseParen,
    /// A `//` or `/* */` comment; text is the raw comment body.
    Comment,
    /// Anything else, including character literals.
    Other,
    EndOfInput,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based line on which the token starts.
    pub line: usize,
}

impl Token {
    fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }
}

/// Fatal error while scanning a source file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("Invalid escape sequence in string literal: '\\{ch}' (line {line})")]
    InvalidEscape { ch: char, line: usize },
    #[error("Invalid unicode escape sequence in string literal: '\\u{digits}' (line {line})")]
    InvalidUnicodeEscape { digits: String, line: usize },
    #[error("Unterminated escape sequence at end of input (line {line})")]
    UnterminatedEscape { line: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    InString { delimiter: char },
    InRawString,
    InLineComment,
    InBlockComment,
    InEscape { delimiter: char },
}

pub struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    finished: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            finished: false,
        }
    }

    /// Produce the next token.
    ///
    /// Once [`TokenKind::EndOfInput`] has been returned every further call
    /// returns it again without reading input.
    pub fn next_token(&mut self) -> Result<Token, ScanError> {
        if self.finished {
            return Ok(Token::new(TokenKind::EndOfInput, "", self.line));
        }

        let mut state = State::Normal;
        let mut text = String::new();
        let mut start_line = self.line;

        loop {
            match state {
                State::Normal => {
                    while self.peek().is_some_and(char::is_whitespace) {
                        self.bump();
                    }
                    start_line = self.line;

                    let Some(c) = self.bump() else {
                        self.finished = true;
                        return Ok(Token::new(TokenKind::EndOfInput, "", start_line));
                    };

                    match c {
                        '/' => match self.peek() {
                            Some('/') => {
                                self.bump();
                                state = State::InLineComment;
                            }
                            Some('*') => {
                                self.bump();
                                state = State::InBlockComment;
                            }
                            _ => return Ok(Token::new(TokenKind::Other, "/", start_line)),
                        },
                        '@' if self.peek() == Some('"') => {
                            self.bump();
                            state = State::InRawString;
                        }
                        '"' | '\'' => state = State::InString { delimiter: c },
                        '.' => return Ok(Token::new(TokenKind::Period, ".", start_line)),
                        '(' => return Ok(Token::new(TokenKind::OpenParen, "(", start_line)),
                        ')' => return Ok(Token::new(TokenKind::CloseParen, ")", start_line)),
                        c if c.is_alphabetic() || c == '_' => {
                            return Ok(self.identifier(c, start_line));
                        }
                        c => return Ok(Token::new(TokenKind::Other, c, start_line)),
                    }
                }
                State::InString { delimiter } => match self.bump() {
                    Some('\\') => state = State::InEscape { delimiter },
                    Some(c) if c == delimiter => {
                        return Ok(string_token(delimiter, text, start_line));
                    }
                    Some(c) => text.push(c),
                    // Unterminated literal: take what we have.
                    None => return Ok(string_token(delimiter, text, start_line)),
                },
                State::InEscape { delimiter } => {
                    self.decode_escape(&mut text)?;
                    state = State::InString { delimiter };
                }
                State::InRawString => match self.bump() {
                    Some('"') if self.peek() == Some('"') => {
                        self.bump();
                        text.push('"');
                    }
                    Some('"') | None => return Ok(Token::new(TokenKind::String, text, start_line)),
                    Some(c) => text.push(c),
                },
                State::InLineComment => match self.peek() {
                    Some('\n') | None => {
                        return Ok(Token::new(TokenKind::Comment, text, start_line));
                    }
                    Some(_) => {
                        if let Some(c) = self.bump() {
                            text.push(c);
                        }
                    }
                },
                State::InBlockComment => match self.bump() {
                    Some('*') if self.peek() == Some('/') => {
                        self.bump();
                        return Ok(Token::new(TokenKind::Comment, text, start_line));
                    }
                    Some(c) => text.push(c),
                    None => return Ok(Token::new(TokenKind::Comment, text, start_line)),
                },
            }
        }
    }

    fn identifier(&mut self, first: char, line: usize) -> Token {
        let mut text = String::from(first);
        while let Some(c) = self.peek().filter(|c| c.is_alphanumeric() || *c == '_') {
            self.bump();
            text.push(c);
        }
        Token::new(TokenKind::Identifier, text, line)
    }

    fn decode_escape(&mut self, text: &mut String) -> Result<(), ScanError> {
        let line = self.line;
        let Some(c) = self.bump() else {
            return Err(ScanError::UnterminatedEscape { line });
        };
        let decoded = match c {
            '0' => '\0',
            '\'' => '\'',
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => self.decode_unicode()?,
            ch => return Err(ScanError::InvalidEscape { ch, line }),
        };
        text.push(decoded);
        Ok(())
    }

    /// Decode the digits of a `\uXXXX` escape, joining UTF-16 surrogate pairs.
    fn decode_unicode(&mut self) -> Result<char, ScanError> {
        let line = self.line;
        let unit = self.hex_unit()?;
        let invalid = || ScanError::InvalidUnicodeEscape {
            digits: format!("{unit:04x}"),
            line,
        };

        if !(0xD800..0xDC00).contains(&unit) {
            return char::from_u32(u32::from(unit)).ok_or_else(invalid);
        }

        // High surrogate: the low half must follow as another \u escape.
        if self.peek() != Some('\\') {
            return Err(invalid());
        }
        self.bump();
        if self.bump() != Some('u') {
            return Err(invalid());
        }
        let low = self.hex_unit()?;
        char::decode_utf16([unit, low])
            .next()
            .and_then(Result::ok)
            .ok_or_else(invalid)
    }

    fn hex_unit(&mut self) -> Result<u16, ScanError> {
        let line = self.line;
        let mut digits = String::with_capacity(4);
        for _ in 0..4 {
            match self.bump() {
                Some(c) => digits.push(c),
                None => break,
            }
        }
        if digits.len() == 4 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
            u16::from_str_radix(&digits, 16)
                .map_err(|_| ScanError::InvalidUnicodeEscape { digits, line })
        } else {
            Err(ScanError::InvalidUnicodeEscape { digits, line })
        }
    }

    fn bump(&mut self) -> Option<char> {
        match self.chars.next()? {
            '\r' => {
                if self.chars.peek() == Some(&'\n') {
                    self.chars.next();
                }
                self.line += 1;
                Some('\n')
            }
            '\n' => {
                self.line += 1;
                Some('\n')
            }
            c => Some(c),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars
            .peek()
            .copied()
            .map(|c| if c == '\r' { '\n' } else { c })
    }
}

/// Character literals are lexed like strings but must never reach extraction.
fn string_token(delimiter: char, text: String, line: usize) -> Token {
    let kind = if delimiter == '\'' {
        TokenKind::Other
    } else {
        TokenKind::String
    };
    Token::new(kind, text, line)
}

/// Yields every token up to and including [`TokenKind::EndOfInput`], or up to
/// the first error, then stops.
impl Iterator for Scanner<'_> {
    type Item = Result<Token, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let result = self.next_token();
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}

/// Decode a single quoted literal such as `"a\tb"`.
///
/// Returns `None` if the input does not start with a string literal.
pub fn decode(literal: &str) -> Result<Option<String>, ScanError> {
    let token = Scanner::new(literal).next_token()?;
    Ok((token.kind == TokenKind::String).then_some(token.text))
}

/// Quote and escape a string using C#/JSON literal syntax.
///
/// Everything outside printable ASCII is written as `\uXXXX` UTF-16 units, so
/// [`decode`] always reproduces the input.
pub fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\0' => out.push_str("\\0"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '/' => out.push_str("\\/"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if u32::from(c) < 0x20 || u32::from(c) >= 0x7f => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, "\\u{unit:04x}");
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
