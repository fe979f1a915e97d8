//! Tokenizer behaviour and error tests.

mod common;

use common::{rejoin, render};
use gosh::{LexErrorKind, Lexer, Span, TokenKind, tokenize};

// -----------------------------------------------------------
// Basic splitting.
// -----------------------------------------------------------

#[test]
fn lex_basic_split() {
    assert_eq!(render("ls -la"), ["IDENT(ls)", "WS", "IDENT(-la)", "EOF"]);
}

#[test]
fn lex_empty_input() {
    let tokens = tokenize("").expect("tokenize");
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_eof());
    assert_eq!(tokens[0].text, "");
}

#[test]
fn lex_only_whitespace() {
    assert_eq!(render(" \t\r\n"), ["WS", "EOF"]);
}

#[test]
fn lex_trailing_newline() {
    assert_eq!(
        render("echo hi\n"),
        ["IDENT(echo)", "WS", "IDENT(hi)", "WS", "EOF"]
    );
}

#[test]
fn lex_whitespace_runs_are_folded() {
    let tokens = tokenize("a \t  b").expect("tokenize");
    assert_eq!(tokens[1].kind, TokenKind::Whitespace);
    assert_eq!(tokens[1].text, " \t  ");
    assert_eq!(tokens[1].span, Span::new(1, 5));
}

#[test]
fn lex_eof_span_is_end_of_input() {
    let tokens = tokenize("abc").expect("tokenize");
    assert_eq!(tokens.last().map(|t| t.span), Some(Span::new(3, 3)));
}

// -----------------------------------------------------------
// Variables and strings.
// -----------------------------------------------------------

#[test]
fn lex_variable_terminated_by_punctuation() {
    assert_eq!(
        render("$HOME/bin:$PATH"),
        ["VAR(HOME)", "IDENT(/bin:)", "VAR(PATH)", "EOF"]
    );
}

#[test]
fn lex_adjacent_variables() {
    assert_eq!(render("$a$b"), ["VAR(a)", "VAR(b)", "EOF"]);
}

#[test]
fn lex_variable_with_digits_and_underscore() {
    assert_eq!(render("$MY_VAR2"), ["VAR(MY_VAR2)", "EOF"]);
}

#[test]
fn lex_string_literal() {
    let tokens = tokenize("echo \"hi there\"").expect("tokenize");
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].kind, TokenKind::Whitespace);
    assert_eq!(tokens[2].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[2].text, "hi there");
    assert!(tokens[3].is_eof());
}

#[test]
fn lex_string_keeps_dollar_and_blanks() {
    assert_eq!(render("\"$x  y\""), ["STRING($x  y)", "EOF"]);
}

#[test]
fn lex_empty_string_emits_nothing() {
    assert_eq!(render("a \"\" b"), ["IDENT(a)", "WS", "WS", "IDENT(b)", "EOF"]);
}

#[test]
fn lex_string_followed_by_word() {
    assert_eq!(render("\"a\"b"), ["STRING(a)", "IDENT(b)", "EOF"]);
}

// -----------------------------------------------------------
// Errors.
// -----------------------------------------------------------

#[test]
fn lex_unterminated_string() {
    let err = tokenize("echo \"oops").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.span.start, 5);
}

#[test]
fn lex_unterminated_after_escaped_quote() {
    let err = tokenize(r#""abc\""#).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
}

#[test]
fn lex_no_tokens_after_error() {
    let results: Vec<_> = Lexer::new("echo \"oops").collect();
    assert_eq!(results.len(), 3);
    assert!(results[..2].iter().all(Result::is_ok));
    assert!(results[2].is_err());
}

#[test]
fn lex_consumer_may_stop_early() {
    let mut lexer = Lexer::new("a b c d");
    let first = lexer.next().expect("token").expect("ok");
    assert_eq!(first.text, "a");
    drop(lexer);
}

// -----------------------------------------------------------
// Invariants.
// -----------------------------------------------------------

#[test]
fn lex_rejoin_reproduces_plain_input() {
    let input = "git commit -m   msg\t--amend\n";
    let tokens = tokenize(input).expect("tokenize");
    assert_eq!(rejoin(&tokens), input);
}

#[test]
fn lex_rejoin_drops_only_delimiters() {
    let tokens = tokenize("cp $SRC \"my file\" x").expect("tokenize");
    assert_eq!(rejoin(&tokens), "cp SRC my file x");
}

#[test]
fn lex_never_produces_separator() {
    let tokens = tokenize("a; b;c").expect("tokenize");
    assert!(tokens.iter().all(|t| t.kind != TokenKind::Separator));
    assert_eq!(tokens[0].text, "a;");
}

#[test]
fn lex_spans_index_the_input() {
    let input = "cd $HOME \"x y\"";
    for token in tokenize(input).expect("tokenize") {
        assert_eq!(&input[token.span.start..token.span.end], token.text);
    }
}
