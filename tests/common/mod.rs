#![allow(dead_code)]

use gosh::{MapVarStore, Token, TokenKind, tokenize};

/// Tokenize and render every token with its diagnostic label.
pub fn render(input: &str) -> Vec<String> {
    tokenize(input)
        .expect("tokenize failed")
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Concatenate the text of every token except `EndOfInput`.
pub fn rejoin(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter(|t| t.kind != TokenKind::EndOfInput)
        .map(|t| t.text.as_str())
        .collect()
}

pub fn store(pairs: &[(&str, &str)]) -> MapVarStore {
    pairs.iter().copied().collect()
}
