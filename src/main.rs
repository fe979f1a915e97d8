//! Interactive shell with `$VAR` substitution.

use std::io;
use std::process::ExitCode;

use gosh::{EnvVarStore, Lexer, Outcome, Shell, substitute};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

fn usage() {
    eprintln!("Usage: gosh [-c LINE | --tokens LINE]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -c LINE        Execute LINE and exit with its status");
    eprintln!("  --tokens LINE  Print the tokens of LINE after substitution");
    eprintln!("  -h, --help     Show this help");
    eprintln!();
    eprintln!("Without options, gosh reads commands interactively.");
    eprintln!("Built-ins: cd [DIR], exit [STATUS], lastexit");
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        None => repl(),
        Some("-h" | "--help") => {
            usage();
            ExitCode::from(2)
        }
        Some(flag @ ("-c" | "--tokens")) => {
            let Some(line) = args.get(2) else {
                eprintln!("Error: {flag} requires a command line");
                return ExitCode::from(2);
            };
            if flag == "-c" {
                run_line(line)
            } else {
                print_tokens(line)
            }
        }
        Some(other) => {
            eprintln!("Unknown option: {other}");
            usage();
            ExitCode::from(2)
        }
    }
}

fn status(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code.rem_euclid(256)).unwrap_or(u8::MAX))
}

fn repl() -> ExitCode {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("gosh: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut shell = Shell::new(EnvVarStore);
    let mut stdout = io::stdout();

    loop {
        match editor.readline(&shell.prompt()) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = editor.add_history_entry(line.as_str()) {
                        log::warn!("failed to record history: {e}");
                    }
                }
                match shell.execute(&line, &mut stdout) {
                    Ok(Outcome::Continue) => {}
                    Ok(Outcome::Exit(code)) => return status(code),
                    Err(e) => eprintln!("gosh: {e}"),
                }
            }
            // Ctrl-C abandons the current line only.
            Err(ReadlineError::Interrupted) => {}
            Err(ReadlineError::Eof) => return status(shell.last_exit()),
            Err(e) => {
                eprintln!("gosh: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
}

fn run_line(line: &str) -> ExitCode {
    let mut shell = Shell::new(EnvVarStore);
    match shell.execute(line, &mut io::stdout()) {
        Ok(Outcome::Exit(code)) => status(code),
        Ok(Outcome::Continue) => status(shell.last_exit()),
        Err(e) => {
            eprintln!("gosh: {e}");
            status(shell.last_exit().max(1))
        }
    }
}

fn print_tokens(line: &str) -> ExitCode {
    let expanded = substitute(line, &EnvVarStore);
    for token in Lexer::new(&expanded) {
        match token {
            Ok(token) => println!("{token}"),
            Err(e) => {
                eprintln!("gosh: {e}");
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
