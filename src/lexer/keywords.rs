use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::token_kind::TokenKind;

/// Fixed keyword table. Any identifier lexeme found here becomes that
/// keyword's token kind instead of `IDENTIFIER`.
static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("else", TokenKind::Else);
    m.insert("false", TokenKind::False);
    m.insert("for", TokenKind::For);
    m.insert("fun", TokenKind::Fun);
    m.insert("if", TokenKind::If);
    m.insert("null", TokenKind::Null);
    m.insert("return", TokenKind::Return);
    m.insert("true", TokenKind::True);
    m.insert("var", TokenKind::Var);
    m.insert("while", TokenKind::While);
    m.insert("varargs", TokenKind::Varargs);
    m
});

/// Look up an identifier lexeme, returning its keyword kind if it is one.
pub fn lookup(lexeme: &str) -> Option<TokenKind> {
    KEYWORDS.get(lexeme).copied()
}
