//! Lexer for the Sox language.
//!
//! Converts a source string into a flat token stream. The only nontrivial
//! feature is string interpolation: a `STRING` token whose source text
//! contains `$name` or `${ expr }` carries its own sub-token stream,
//! produced by re-entering this same scanner over the interpolated
//! region.

mod keywords;
mod token;
mod token_kind;

pub use token::Token;
pub use token_kind::TokenKind;

use crate::error::LexError;

fn is_legal_identifier_prefix(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_legal_identifier_char(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

pub struct Lexer {
    chars: Vec<char>,
    start: usize,
    current: usize,
    line: usize,
    errors: Vec<LexError>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            errors: Vec::new(),
        }
    }

    /// Scan the whole source, returning every token produced plus any
    /// lexical errors encountered along the way. Scanning never aborts
    /// early: a bad character is skipped and scanning continues, matching
    /// the "lexing continues" contract.
    pub fn tokenize(mut self) -> (Vec<Token>, Vec<LexError>) {
        let mut tokens = Vec::new();
        while !self.is_at_end() {
            self.start = self.current;
            if let Some(token) = self.scan_token() {
                tokens.push(token);
            }
        }
        tokens.push(Token::new(TokenKind::Eof, "", self.line));
        (tokens, self.errors)
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        if c == '\n' {
            self.line += 1;
        }
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.current]
        }
    }

    fn peek_next(&self) -> char {
        if self.current + 1 >= self.chars.len() {
            '\0'
        } else {
            self.chars[self.current + 1]
        }
    }

    fn matches(&mut self, expected: char) -> bool {
        if self.peek() != expected {
            return false;
        }
        self.advance();
        true
    }

    fn lexeme(&self) -> String {
        self.chars[self.start..self.current].iter().collect()
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(LexError::new(self.line, message));
    }

    /// Scan exactly one token starting at `self.start` (already set by the
    /// caller). Returns `None` for input that produces no token: consumed
    /// whitespace, a comment, or a skipped bad character.
    fn scan_token(&mut self) -> Option<Token> {
        let c = self.advance();
        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semicolon,
            '*' => TokenKind::Star,
            '?' => TokenKind::QuestionMark,
            '\\' => TokenKind::Backslash,
            '/' => TokenKind::Slash,
            '+' => {
                if self.matches('+') {
                    TokenKind::PlusPlus
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                if self.matches('-') {
                    TokenKind::MinusMinus
                } else {
                    TokenKind::Minus
                }
            }
            '!' => {
                if self.matches('=') {
                    TokenKind::BangEqual
                } else {
                    TokenKind::Bang
                }
            }
            '=' => {
                if self.matches('=') {
                    TokenKind::EqualEqual
                } else {
                    TokenKind::Equal
                }
            }
            '>' => {
                if self.matches('=') {
                    TokenKind::GreaterEqual
                } else {
                    TokenKind::Greater
                }
            }
            '<' => {
                if self.matches('=') {
                    TokenKind::LessEqual
                } else {
                    TokenKind::Less
                }
            }
            '|' => {
                if self.matches('|') {
                    TokenKind::Or
                } else {
                    TokenKind::VerticalBar
                }
            }
            '&' => {
                if self.matches('&') {
                    TokenKind::And
                } else {
                    self.error("Unexpected character '&'");
                    return None;
                }
            }
            '#' => {
                while self.peek() != '\n' && !self.is_at_end() {
                    self.advance();
                }
                return None;
            }
            ' ' | '\r' | '\t' | '\n' => return None,
            '"' => return Some(self.scan_string()),
            c if is_legal_identifier_prefix(c) => return Some(self.scan_identifier()),
            c if c.is_ascii_digit() => return Some(self.scan_number(c)),
            c => {
                self.error(format!("Unexpected character '{c}'"));
                return None;
            }
        };
        Some(Token::new(kind, self.lexeme(), self.line))
    }

    fn scan_identifier(&mut self) -> Token {
        while is_legal_identifier_char(self.peek()) {
            self.advance();
        }
        let text = self.lexeme();
        let kind = keywords::lookup(&text).unwrap_or(TokenKind::Identifier);
        Token::new(kind, text, self.line)
    }

    fn scan_number(&mut self, first: char) -> Token {
        if first == '0' {
            match self.peek() {
                'x' => {
                    self.advance();
                    let mut any = false;
                    while self.peek().is_ascii_hexdigit() {
                        self.advance();
                        any = true;
                    }
                    if !any {
                        self.error("Expected at least one hexadecimal digit after '0x'");
                    }
                    return Token::new(TokenKind::Int, self.lexeme(), self.line);
                }
                'b' => {
                    self.advance();
                    let mut any = false;
                    while matches!(self.peek(), '0' | '1') {
                        self.advance();
                        any = true;
                    }
                    if !any {
                        self.error("Expected at least one binary digit after '0b'");
                    }
                    return Token::new(TokenKind::Int, self.lexeme(), self.line);
                }
                c if ('0'..='7').contains(&c) => {
                    while matches!(self.peek(), '0'..='7') {
                        self.advance();
                    }
                    return Token::new(TokenKind::Int, self.lexeme(), self.line);
                }
                _ => return Token::new(TokenKind::Int, self.lexeme(), self.line),
            }
        }

        while self.peek().is_ascii_digit() {
            self.advance();
        }

        let mut is_double = false;
        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            is_double = true;
            self.advance();
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        Token::new(
            if is_double { TokenKind::Double } else { TokenKind::Int },
            self.lexeme(),
            self.line,
        )
    }

    fn scan_string(&mut self) -> Token {
        let token_line = self.line;
        let mut raw = String::new();
        let mut sub_tokens = Vec::new();
        let mut segment = String::new();
        let mut segment_line = self.line;

        loop {
            if self.is_at_end() {
                self.error("Unterminated string literal");
                break;
            }
            match self.peek() {
                '"' => {
                    self.advance();
                    break;
                }
                '\\' if self.peek_next() == '$' => {
                    self.advance();
                    self.advance();
                    raw.push('$');
                    segment.push('$');
                }
                '$' => {
                    self.advance();
                    if !segment.is_empty() {
                        sub_tokens.push(Token::new(
                            TokenKind::String,
                            std::mem::take(&mut segment),
                            segment_line,
                        ));
                    }
                    if self.peek() == '{' {
                        self.advance();
                        let inner = self.scan_interpolation_expr();
                        raw.push_str("${");
                        for t in &inner {
                            if t.kind != TokenKind::Eof {
                                raw.push_str(&t.lexeme);
                            }
                        }
                        raw.push('}');
                        sub_tokens.extend(inner);
                    } else if is_legal_identifier_prefix(self.peek()) {
                        let name_start = self.current;
                        while is_legal_identifier_char(self.peek()) {
                            self.advance();
                        }
                        let name: String = self.chars[name_start..self.current].iter().collect();
                        raw.push('$');
                        raw.push_str(&name);
                        sub_tokens.push(Token::new(TokenKind::Identifier, name, self.line));
                    } else {
                        self.error("Expected identifier or '{' after '$' in string interpolation");
                    }
                    segment_line = self.line;
                }
                c => {
                    self.advance();
                    raw.push(c);
                    segment.push(c);
                }
            }
        }

        if !segment.is_empty() || sub_tokens.is_empty() {
            sub_tokens.push(Token::new(TokenKind::String, segment, segment_line));
        }
        sub_tokens.push(Token::new(TokenKind::Eof, "", self.line));

        Token::with_interpolation(raw, token_line, sub_tokens)
    }

    /// Restricted re-entrant scan over the body of a `${ ... }` form.
    /// Braces are still emitted as ordinary tokens (so a map literal can
    /// appear inside an interpolation), but the region ends at the brace
    /// that brings the nesting depth back to zero.
    fn scan_interpolation_expr(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut depth = 1usize;
        loop {
            if self.is_at_end() {
                self.error("Unterminated '${' interpolation");
                break;
            }
            self.start = self.current;
            match self.peek() {
                '"' => {
                    self.error("Nested string literals are not supported inside string interpolation");
                    self.advance();
                    continue;
                }
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        self.advance();
                        break;
                    }
                }
                _ => {}
            }
            if let Some(token) = self.scan_token() {
                tokens.push(token);
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let (tokens, errors) = Lexer::new(src).tokenize();
        assert!(errors.is_empty(), "unexpected lex errors: {errors:?}");
        tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn single_and_double_char_tokens() {
        assert_eq!(
            kinds("+ - ++ -- == != >= <= && || ? [ ]"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::PlusPlus,
                TokenKind::MinusMinus,
                TokenKind::EqualEqual,
                TokenKind::BangEqual,
                TokenKind::GreaterEqual,
                TokenKind::LessEqual,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::QuestionMark,
                TokenKind::LBracket,
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lone_ampersand_is_an_error() {
        let (_, errors) = Lexer::new("&").tokenize();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn numeric_literal_bases_keep_raw_lexeme() {
        let (tokens, errors) = Lexer::new("0x1F 0b101 017 10 10.5").tokenize();
        assert!(errors.is_empty());
        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes[0], "0x1F");
        assert_eq!(lexemes[1], "0b101");
        assert_eq!(lexemes[2], "017");
        assert_eq!(tokens[3].kind, TokenKind::Int);
        assert_eq!(tokens[4].kind, TokenKind::Double);
    }

    #[test]
    fn keywords_are_recognized() {
        assert_eq!(
            kinds("var fun if else while for return null true false varargs"),
            vec![
                TokenKind::Var,
                TokenKind::Fun,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::While,
                TokenKind::For,
                TokenKind::Return,
                TokenKind::Null,
                TokenKind::True,
                TokenKind::False,
                TokenKind::Varargs,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        assert_eq!(kinds("1 # comment\n2"), vec![TokenKind::Int, TokenKind::Int, TokenKind::Eof]);
    }

    #[test]
    fn simple_string_has_single_segment() {
        let (tokens, errors) = Lexer::new("\"hello\"").tokenize();
        assert!(errors.is_empty());
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "hello");
        let sub = tokens[0].interpolation.as_ref().unwrap();
        assert_eq!(sub.len(), 2);
        assert_eq!(sub[0].lexeme, "hello");
        assert_eq!(sub[1].kind, TokenKind::Eof);
    }

    #[test]
    fn dollar_name_interpolation() {
        let (tokens, errors) = Lexer::new("\"hi $name!\"").tokenize();
        assert!(errors.is_empty());
        let sub = tokens[0].interpolation.as_ref().unwrap();
        assert_eq!(sub[0].kind, TokenKind::String);
        assert_eq!(sub[0].lexeme, "hi ");
        assert_eq!(sub[1].kind, TokenKind::Identifier);
        assert_eq!(sub[1].lexeme, "name");
        assert_eq!(sub[2].kind, TokenKind::String);
        assert_eq!(sub[2].lexeme, "!");
    }

    #[test]
    fn brace_interpolation_emits_full_expr() {
        let (tokens, errors) = Lexer::new("\"${1 + 2}\"").tokenize();
        assert!(errors.is_empty());
        let sub = tokens[0].interpolation.as_ref().unwrap();
        let kinds: Vec<TokenKind> = sub.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Int, TokenKind::Plus, TokenKind::Int, TokenKind::Eof]
        );
    }

    #[test]
    fn escaped_dollar_is_literal() {
        let (tokens, errors) = Lexer::new("\"\\$5\"").tokenize();
        assert!(errors.is_empty());
        assert_eq!(tokens[0].lexeme, "$5");
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let (_, errors) = Lexer::new("\"abc").tokenize();
        assert_eq!(errors.len(), 1);
    }
}
