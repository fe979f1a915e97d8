use std::fmt;
use std::iter::FusedIterator;

use crate::token::{Span, Token, TokenKind, is_blank, is_var_char};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Input ended inside a double-quoted string.
    UnterminatedString,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString => {
                write!(f, "unterminated string literal")
            }
        }
    }
}

/// Error produced during lexing.
///
/// The span starts at the offending opening quote and runs to the
/// end of the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at offset {}", .span.start)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// Tokenize a whole line, including the trailing
/// [`TokenKind::EndOfInput`] token.
///
/// # Errors
///
/// Returns `LexError` on the first lexical error; tokens produced
/// before it are discarded.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Base,
    WhiteSpace,
    VariableName,
    String,
}

/// Pull-based tokenizer over a single line of input.
///
/// Each call to [`Iterator::next`] runs the state machine just far
/// enough to produce one token. The run ends after the
/// `EndOfInput` token or after the first error; the lexer cannot
/// be restarted.
///
/// ```
/// use gosh::{Lexer, TokenKind};
///
/// let kinds: Vec<_> = Lexer::new("ls -la")
///     .map(|t| t.map(|t| t.kind))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(
///     kinds,
///     [
///         TokenKind::Identifier,
///         TokenKind::Whitespace,
///         TokenKind::Identifier,
///         TokenKind::EndOfInput,
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    // start <= pos <= input.len()
    start: usize,
    pos: usize,
    width: usize,
    state: Option<State>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            start: 0,
            pos: 0,
            width: 0,
            state: Some(State::Base),
            finished: false,
        }
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.input[self.pos..].chars().next();
        self.width = ch.map_or(0, char::len_utf8);
        self.pos += self.width;
        ch
    }

    const fn backup(&mut self) {
        self.pos -= self.width;
        self.width = 0;
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    const fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        self.width = 0;
    }

    const fn ignore(&mut self) {
        self.start = self.pos;
        self.width = 0;
    }

    fn emit(&mut self, kind: TokenKind) -> Option<Token> {
        if self.start == self.pos {
            return None;
        }
        let token = Token::new(
            kind,
            &self.input[self.start..self.pos],
            Span::new(self.start, self.pos),
        );
        self.start = self.pos;
        Some(token)
    }

    /// Emits the pending run as an identifier, then skips the
    /// delimiter just read and switches to `next`.
    fn cut_at_delimiter(&mut self, next: State) -> Option<Token> {
        self.backup();
        let token = self.emit(TokenKind::Identifier);
        self.next_char();
        self.ignore();
        self.state = Some(next);
        token
    }

    fn lex_base(&mut self) -> Option<Token> {
        loop {
            match self.next_char() {
                None => {
                    self.state = None;
                    return self.emit(TokenKind::Identifier);
                }
                Some('"') => return self.cut_at_delimiter(State::String),
                Some('$') => return self.cut_at_delimiter(State::VariableName),
                Some(ch) if is_blank(ch) => {
                    self.backup();
                    self.state = Some(State::WhiteSpace);
                    return self.emit(TokenKind::Identifier);
                }
                Some(_) => {}
            }
        }
    }

    fn lex_run(&mut self, pred: impl Fn(char) -> bool, kind: TokenKind) -> Option<Token> {
        self.take_while(pred);
        self.state = if self.at_end() {
            None
        } else {
            Some(State::Base)
        };
        self.emit(kind)
    }

    fn lex_string(&mut self) -> Result<Option<Token>, LexError> {
        loop {
            match self.next_char() {
                None => {
                    return Err(LexError {
                        kind: LexErrorKind::UnterminatedString,
                        // start sits just past the opening quote
                        span: Span::new(self.start - 1, self.input.len()),
                    });
                }
                Some('\\') => {
                    self.next_char();
                }
                Some('"') => return Ok(self.cut_string()),
                Some(_) => {}
            }
        }
    }

    fn cut_string(&mut self) -> Option<Token> {
        self.backup();
        let token = self.emit(TokenKind::StringLiteral);
        self.next_char();
        self.ignore();
        self.state = Some(State::Base);
        token
    }

    fn step(&mut self, state: State) -> Result<Option<Token>, LexError> {
        match state {
            State::Base => Ok(self.lex_base()),
            State::WhiteSpace => Ok(self.lex_run(is_blank, TokenKind::Whitespace)),
            State::VariableName => Ok(self.lex_run(is_var_char, TokenKind::VariableReference)),
            State::String => self.lex_string(),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(state) = self.state {
            match self.step(state) {
                Ok(Some(token)) => {
                    log::trace!("lexed {token}");
                    return Some(Ok(token));
                }
                Ok(None) => {}
                Err(err) => {
                    self.state = None;
                    self.finished = true;
                    return Some(Err(err));
                }
            }
        }

        if self.finished {
            return None;
        }
        self.finished = true;
        let end = self.input.len();
        Some(Ok(Token::new(
            TokenKind::EndOfInput,
            "",
            Span::new(end, end),
        )))
    }
}

impl FusedIterator for Lexer<'_> {}
