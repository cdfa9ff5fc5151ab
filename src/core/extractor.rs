//! Recognition of translatable call sites in a token stream.
//!
//! A translatable phrase is a string literal immediately followed by
//! `.<verb>()` or `.<verb>("context")`, optionally with a comment before the
//! closing parenthesis carrying a note for translators:
//!
//! ```text
//! "Block".T("obstruct" /* as in "get in the way" */)
//! ```

use std::collections::VecDeque;

use super::scanner::{ScanError, Scanner, Token, TokenKind};

/// Which strings the extractor yields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    /// Strings used as the receiver of a translatable call.
    pub translatable: bool,
    /// Every other non-blank string.
    pub non_translatable: bool,
}

impl Selection {
    pub fn any(self) -> bool {
        self.translatable || self.non_translatable
    }
}

/// One observed use of a phrase in a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub phrase: String,
    pub context: Option<String>,
    pub comment: Option<String>,
    pub file: String,
    /// 1-based line of the phrase literal.
    pub line: usize,
}

/// A matched `.<verb>(...)` suffix.
struct Call {
    context: Option<String>,
    comment: Option<String>,
    /// Number of look-ahead tokens making up the call.
    len: usize,
}

/// Lazily yields the occurrences of one source file.
///
/// The sequence is finite and not restartable. After a scan error it yields
/// that error once and then ends.
pub struct Extractor<'a> {
    scanner: Scanner<'a>,
    lookahead: VecDeque<Token>,
    selection: Selection,
    verb: &'a str,
    file: &'a str,
    done: bool,
}

impl<'a> Extractor<'a> {
    pub fn new(source: &'a str, file: &'a str, verb: &'a str, selection: Selection) -> Self {
        Self {
            scanner: Scanner::new(source),
            lookahead: VecDeque::new(),
            selection,
            verb,
            file,
            done: false,
        }
    }

    fn next_token(&mut self) -> Result<Token, ScanError> {
        match self.lookahead.pop_front() {
            Some(token) => Ok(token),
            None => self.scanner.next_token(),
        }
    }

    /// Look at the `n`th upcoming token without consuming it.
    fn peek(&mut self, n: usize) -> Result<&Token, ScanError> {
        while self.lookahead.len() <= n {
            let token = self.scanner.next_token()?;
            self.lookahead.push_back(token);
        }
        Ok(&self.lookahead[n])
    }

    fn match_call(&mut self) -> Result<Option<Call>, ScanError> {
        let verb = self.verb;

        if self.peek(0)?.kind != TokenKind::Period {
            return Ok(None);
        }
        let name = self.peek(1)?;
        if name.kind != TokenKind::Identifier || name.text != verb {
            return Ok(None);
        }
        if self.peek(2)?.kind != TokenKind::OpenParen {
            return Ok(None);
        }

        let mut index = 3;
        let mut context = None;
        let mut comment = None;

        let token = self.peek(index)?;
        if token.kind == TokenKind::String {
            context = Some(token.text.clone());
            index += 1;
        }
        let token = self.peek(index)?;
        if token.kind == TokenKind::Comment {
            comment = Some(token.text.trim().to_string()).filter(|c| !c.is_empty());
            index += 1;
        }
        if self.peek(index)?.kind != TokenKind::CloseParen {
            return Ok(None);
        }

        Ok(Some(Call {
            context,
            comment,
            len: index + 1,
        }))
    }

    fn classify(&mut self, token: Token) -> Result<Option<Occurrence>, ScanError> {
        let occurrence = match self.match_call()? {
            Some(call) => {
                // A matched call is consumed whole so its context string is
                // never reported as a string of its own.
                self.lookahead.drain(..call.len);
                self.selection.translatable.then(|| Occurrence {
                    phrase: token.text,
                    context: call.context,
                    comment: call.comment,
                    file: self.file.to_string(),
                    line: token.line,
                })
            }
            None => self.selection.non_translatable.then(|| Occurrence {
                phrase: token.text,
                context: None,
                comment: None,
                file: self.file.to_string(),
                line: token.line,
            }),
        };
        Ok(occurrence)
    }

    fn step(&mut self) -> Result<Option<Occurrence>, ScanError> {
        let token = self.next_token()?;
        match token.kind {
            TokenKind::EndOfInput => {
                self.done = true;
                Ok(None)
            }
            TokenKind::String if !token.text.trim().is_empty() && self.selection.any() => {
                self.classify(token)
            }
            _ => Ok(None),
        }
    }
}

impl Iterator for Extractor<'_> {
    type Item = Result<Occurrence, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            match self.step() {
                Ok(Some(occurrence)) => return Some(Ok(occurrence)),
                Ok(None) => {}
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}
