use super::token_kind::TokenKind;

/// A single lexical token.
///
/// `STRING` tokens that contain interpolation carry an ordered sub-token
/// stream in `interpolation`, terminated by its own `EOF`. Uninterpolated
/// strings (and every other token kind) leave it `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub interpolation: Option<Vec<Token>>,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            interpolation: None,
        }
    }

    pub fn with_interpolation(lexeme: impl Into<String>, line: usize, sub_tokens: Vec<Token>) -> Self {
        Self {
            kind: TokenKind::String,
            lexeme: lexeme.into(),
            line,
            interpolation: Some(sub_tokens),
        }
    }

    /// A human-readable description of where this token sits, used in
    /// `"[<line>] <where>: <message>"` style diagnostics.
    pub fn describe(&self) -> String {
        if self.kind == TokenKind::Eof {
            "at end".to_owned()
        } else {
            format!("at '{}'", self.lexeme)
        }
    }
}
