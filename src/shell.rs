//! Read-eval glue: turns one input line into a built-in call or a
//! child process.

use std::env;
use std::io::{self, Write};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::lexer::{LexError, tokenize};
use crate::subst::substitute;
use crate::token::{Token, TokenKind};
use crate::vars::VarStore;

/// Status recorded when a program cannot be started.
pub const NOT_FOUND_STATUS: i32 = 127;

/// Error produced while executing a line.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("exit: invalid status {arg:?}: {source}")]
    InvalidExitCode {
        arg: String,
        #[source]
        source: ParseIntError,
    },
    #[error("cd: {}: {source}", .path.display())]
    ChangeDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// What the caller should do after a line ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit(i32),
}

/// Split the tokens of `input` into command words.
///
/// Whitespace separates words; adjacent identifiers, string
/// literals and variable references join into one word. A
/// variable reference renders as `$name` because substitution has
/// already run by the time the line is tokenized. A `$` that starts
/// no variable name produces no token; it is recovered from the gap
/// between token spans and kept as a literal `$`.
#[must_use]
pub fn words(input: &str, tokens: &[Token]) -> Vec<String> {
    let mut words = Vec::new();
    let mut current: Option<String> = None;
    let mut prev_end = 0;

    for token in tokens {
        let gap = input.get(prev_end..token.span.start).unwrap_or_default();
        push_lone_dollars(&mut current, gap, token.kind);
        prev_end = token.span.end;

        match token.kind {
            TokenKind::Whitespace | TokenKind::Separator | TokenKind::EndOfInput => {
                words.extend(current.take());
            }
            TokenKind::Identifier => {
                current
                    .get_or_insert_with(String::new)
                    .push_str(&token.text);
            }
            TokenKind::VariableReference => {
                let word = current.get_or_insert_with(String::new);
                word.push('$');
                word.push_str(&token.text);
            }
            TokenKind::StringLiteral => {
                unescape_into(current.get_or_insert_with(String::new), &token.text);
            }
        }
    }

    words.extend(current);
    words
}

// A gap holds only skipped delimiters: quotes and `$`. The last `$`
// before a variable reference belongs to that reference.
fn push_lone_dollars(current: &mut Option<String>, gap: &str, next: TokenKind) {
    let owned = usize::from(next == TokenKind::VariableReference && gap.ends_with('$'));
    let lone = gap.matches('$').count() - owned;
    if lone > 0 {
        current
            .get_or_insert_with(String::new)
            .push_str(&"$".repeat(lone));
    }
}

fn unescape_into(word: &mut String, text: &str) {
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            word.extend(chars.next());
        } else {
            word.push(ch);
        }
    }
}

/// Render the prompt for `cwd`, abbreviating `home` to `~`.
#[must_use]
pub fn prompt(cwd: &Path, home: &Path) -> String {
    let dir = match cwd.strip_prefix(home) {
        Ok(rest) if home != Path::new("/") => {
            if rest.as_os_str().is_empty() {
                "~".to_string()
            } else {
                format!("~/{}", rest.display())
            }
        }
        _ => cwd.display().to_string(),
    };
    format!("{dir} $ ")
}

/// Interactive shell state that outlives a single line.
#[derive(Debug)]
pub struct Shell<S> {
    store: S,
    home: PathBuf,
    last_exit: i32,
}

impl<S: VarStore> Shell<S> {
    /// Create a shell whose home directory is the store's `HOME`,
    /// or `/` when that is empty.
    #[must_use]
    pub fn new(store: S) -> Self {
        let home = match store.get("HOME") {
            h if h.is_empty() => PathBuf::from("/"),
            h => PathBuf::from(h),
        };
        Self::with_home(store, home)
    }

    #[must_use]
    pub fn with_home(store: S, home: impl Into<PathBuf>) -> Self {
        Self {
            store,
            home: home.into(),
            last_exit: 0,
        }
    }

    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    #[must_use]
    pub const fn last_exit(&self) -> i32 {
        self.last_exit
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Prompt for the current working directory.
    #[must_use]
    pub fn prompt(&self) -> String {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("?"));
        prompt(&cwd, &self.home)
    }

    /// Execute one input line.
    ///
    /// Built-in output goes to `out`; child processes inherit the
    /// standard streams of the shell.
    ///
    /// # Errors
    ///
    /// Returns `ShellError` when the line does not tokenize, a
    /// built-in rejects its arguments, or a program cannot be
    /// started. The shell stays usable afterwards.
    pub fn execute(&mut self, line: &str, out: &mut impl Write) -> Result<Outcome, ShellError> {
        let expanded = substitute(line, &self.store);
        let tokens = tokenize(&expanded)?;
        let words = words(&expanded, &tokens);
        let Some((name, args)) = words.split_first() else {
            return Ok(Outcome::Continue);
        };

        log::debug!("dispatching {name:?} with {} argument(s)", args.len());
        match name.as_str() {
            "exit" => Self::exit(args),
            "cd" => {
                self.cd(args)?;
                Ok(Outcome::Continue)
            }
            "lastexit" => {
                writeln!(out, "{}", self.last_exit)?;
                Ok(Outcome::Continue)
            }
            _ => {
                self.run_program(name, args)?;
                Ok(Outcome::Continue)
            }
        }
    }

    fn exit(args: &[String]) -> Result<Outcome, ShellError> {
        let Some(arg) = args.first() else {
            return Ok(Outcome::Exit(0));
        };
        arg.parse()
            .map(Outcome::Exit)
            .map_err(|source| ShellError::InvalidExitCode {
                arg: arg.clone(),
                source,
            })
    }

    fn cd(&mut self, args: &[String]) -> Result<(), ShellError> {
        let target = args
            .first()
            .map_or_else(|| self.home.clone(), PathBuf::from);
        if let Err(source) = env::set_current_dir(&target) {
            self.last_exit = 1;
            return Err(ShellError::ChangeDir {
                path: target,
                source,
            });
        }
        log::debug!("changed directory to {}", target.display());
        self.last_exit = 0;
        Ok(())
    }

    fn run_program(&mut self, program: &str, args: &[String]) -> Result<(), ShellError> {
        match Command::new(program).args(args).status() {
            Ok(status) => {
                self.last_exit = exit_code(status);
                log::debug!("{program} exited with status {}", self.last_exit);
                Ok(())
            }
            Err(source) => {
                self.last_exit = NOT_FOUND_STATUS;
                Err(ShellError::Spawn {
                    program: program.to_string(),
                    source,
                })
            }
        }
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
