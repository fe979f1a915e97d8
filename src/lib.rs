//! Input tokenizer and `$VAR` substitution for a small interactive
//! shell.
//!
//! A line goes through two independent passes: [`substitute`]
//! expands variable references and backslash escapes against a
//! [`VarStore`], then the [`Lexer`] splits the result into typed
//! [`Token`]s. The [`shell`] module wires both into a read-eval
//! loop.
//!
//! # Quick start
//!
//! ```
//! use gosh::{MapVarStore, substitute, tokenize};
//!
//! let store: MapVarStore = [("DIR", "/tmp")].into_iter().collect();
//! let line = substitute("ls -la $DIR", &store);
//! let rendered: Vec<_> = tokenize(&line)
//!     .unwrap()
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect();
//! assert_eq!(rendered, ["IDENT(ls)", "WS", "IDENT(-la)", "WS", "IDENT(/tmp)", "EOF"]);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod lexer;
pub mod shell;
pub mod subst;
pub mod token;
pub mod vars;

pub use lexer::{LexError, LexErrorKind, Lexer, tokenize};
pub use shell::{Outcome, Shell, ShellError};
pub use subst::substitute;
pub use token::{Span, Token, TokenKind, is_blank, is_var_char};
pub use vars::{EnvVarStore, MapVarStore, VarError, VarStore};

/// Unified error type covering lexing and variable binding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A variable store refused a binding.
    #[error("{0}")]
    Var(#[from] VarError),
}

/// Substitute variables in `line` and tokenize the result in one
/// step.
pub fn expand_str<S: VarStore + ?Sized>(line: &str, store: &S) -> Result<Vec<Token>, Error> {
    Ok(tokenize(&substitute(line, store))?)
}
