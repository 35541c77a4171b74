//! Recursive-descent parser. Builds the statement and expression trees
//! straight off the lexer's token stream; precedence is handled by a
//! ladder of mutually recursive methods, one level of binding power per
//! method, from `assignment` (loosest) down to `primary` (tightest).

pub use crate::ast::NodeId;
use crate::ast::{
    ArrayLit, Assign, Binary, Block, Call, Expr, Function, Grouping, If, Index, IndexAssign, Literal, Logical, MapLit,
    Param, ReturnStmt, Stmt, Ternary, Unary, VarDecl, Variable, WhileLoop,
};
use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};

const MAX_ARGS: usize = 255;

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    next_id: NodeId,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_next_id(tokens, 0)
    }

    pub fn with_next_id(tokens: Vec<Token>, next_id: NodeId) -> Self {
        Self {
            tokens,
            current: 0,
            next_id,
        }
    }

    /// Parses every top-level declaration, collecting rather than
    /// aborting on the first error: after a bad statement the parser
    /// synchronizes to the next statement boundary and keeps going, so a
    /// single run can report every syntax error in the source, not just
    /// the first.
    pub fn parse(mut self) -> (Vec<Stmt>, Vec<ParseError>, NodeId) {
        let mut statements = Vec::new();
        let mut errors = Vec::new();
        while !self.is_at_end() {
            match self.declaration() {
                Ok(stmt) => statements.push(stmt),
                Err(e) => {
                    errors.push(e);
                    self.synchronize();
                }
            }
        }
        (statements, errors, self.next_id)
    }

    fn fresh_id(&mut self) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ---- token stream helpers ----

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> Token {
        self.tokens[self.current - 1].clone()
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        for &kind in kinds {
            if self.check(kind) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(self.peek().clone(), message))
        }
    }

    fn error(&self, token: Token, message: &str) -> ParseError {
        ParseError::new(token.line, token.describe(), message.to_owned())
    }

    /// Discards tokens until the start of the next statement, so one bad
    /// statement doesn't cascade into spurious follow-on errors.
    fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            if self.tokens[self.current - 1].kind == TokenKind::Semicolon {
                return;
            }
            match self.peek().kind {
                TokenKind::Var
                | TokenKind::Fun
                | TokenKind::If
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Return => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    // ---- statements ----

    fn declaration(&mut self) -> Result<Stmt, ParseError> {
        if self.match_any(&[TokenKind::Var]) {
            self.finish_var_decl()
        } else if self.match_any(&[TokenKind::Fun]) {
            self.finish_fun_decl()
        } else {
            self.statement()
        }
    }

    fn finish_var_decl(&mut self) -> Result<Stmt, ParseError> {
        let name = self.consume(TokenKind::Identifier, "Expect variable name.")?;
        let initializer = if self.match_any(&[TokenKind::Equal]) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after variable declaration.")?;
        Ok(Stmt::VarDecl(VarDecl { name, initializer }))
    }

    fn finish_fun_decl(&mut self) -> Result<Stmt, ParseError> {
        let name = self.consume(TokenKind::Identifier, "Expect function name.")?;
        self.consume(TokenKind::LParen, "Expect '(' after function name.")?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                if params.len() >= MAX_ARGS {
                    return Err(self.error(self.peek().clone(), "Can't have more than 255 parameters."));
                }
                let is_vararg = self.match_any(&[TokenKind::Varargs]);
                let pname = self.consume(TokenKind::Identifier, "Expect parameter name.")?;
                if params.iter().any(|p: &Param| p.is_vararg) {
                    return Err(self.error(pname, "Varargs parameter must be the last parameter."));
                }
                params.push(Param { name: pname, is_vararg });
                if !self.match_any(&[TokenKind::Comma]) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RParen, "Expect ')' after parameters.")?;
        self.consume(TokenKind::LBrace, "Expect '{' before function body.")?;
        let body = self.finish_block()?;
        Ok(Stmt::Function(Function {
            name,
            params,
            body: Block { statements: body },
        }))
    }

    fn statement(&mut self) -> Result<Stmt, ParseError> {
        if self.match_any(&[TokenKind::If]) {
            self.finish_if()
        } else if self.match_any(&[TokenKind::While]) {
            self.finish_while()
        } else if self.match_any(&[TokenKind::For]) {
            self.finish_for()
        } else if self.match_any(&[TokenKind::Return]) {
            self.finish_return()
        } else if self.match_any(&[TokenKind::LBrace]) {
            Ok(Stmt::Block(Block {
                statements: self.finish_block()?,
            }))
        } else {
            self.expression_statement()
        }
    }

    fn finish_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.declaration()?);
        }
        self.consume(TokenKind::RBrace, "Expect '}' after block.")?;
        Ok(statements)
    }

    fn finish_if(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::LParen, "Expect '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RParen, "Expect ')' after if condition.")?;
        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.match_any(&[TokenKind::Else]) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };
        Ok(Stmt::If(If {
            condition,
            then_branch,
            else_branch,
        }))
    }

    fn finish_while(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::LParen, "Expect '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RParen, "Expect ')' after while condition.")?;
        let body = Box::new(self.statement()?);
        Ok(Stmt::While(WhileLoop { condition, body }))
    }

    /// `for` has no dedicated evaluator case: it is desugared here into
    /// the `while` loop it's equivalent to, wrapped in a block that scopes
    /// the initializer.
    fn finish_for(&mut self) -> Result<Stmt, ParseError> {
        self.consume(TokenKind::LParen, "Expect '(' after 'for'.")?;

        let initializer = if self.match_any(&[TokenKind::Semicolon]) {
            None
        } else if self.match_any(&[TokenKind::Var]) {
            Some(self.finish_var_decl()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if !self.check(TokenKind::Semicolon) {
            self.expression()?
        } else {
            Expr::Literal(Literal {
                token: Token::new(TokenKind::True, "true", self.peek().line),
            })
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after loop condition.")?;

        let increment = if !self.check(TokenKind::RParen) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::RParen, "Expect ')' after for clauses.")?;

        let mut body = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block(Block {
                statements: vec![body, Stmt::Expr(increment)],
            });
        }

        body = Stmt::While(WhileLoop {
            condition,
            body: Box::new(body),
        });

        if let Some(initializer) = initializer {
            body = Stmt::Block(Block {
                statements: vec![initializer, body],
            });
        }

        Ok(body)
    }

    fn finish_return(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.previous();
        let value = if !self.check(TokenKind::Semicolon) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "Expect ';' after return value.")?;
        Ok(Stmt::Return(ReturnStmt { keyword, value }))
    }

    fn expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "Expect ';' after expression.")?;
        Ok(Stmt::Expr(expr))
    }

    // ---- expressions, loosest to tightest ----

    fn expression(&mut self) -> Result<Expr, ParseError> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<Expr, ParseError> {
        let expr = self.or_expr()?;

        if self.match_any(&[TokenKind::Equal]) {
            let equals = self.previous();
            let value = self.assignment()?;
            return match expr {
                Expr::Variable(v) => Ok(Expr::Assign(Assign {
                    id: v.id,
                    name: v.name,
                    right: Box::new(value),
                })),
                Expr::Index(idx) => Ok(Expr::IndexAssign(IndexAssign {
                    target: idx.callee,
                    index: idx.index,
                    value: Box::new(value),
                    bracket: idx.bracket,
                })),
                _ => Err(self.error(equals, "Invalid assignment target.")),
            };
        }

        Ok(expr)
    }

    fn or_expr(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.and_expr()?;
        while self.match_any(&[TokenKind::Or]) {
            let operator = self.previous();
            let right = self.and_expr()?;
            expr = Expr::Logical(Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }
        Ok(expr)
    }

    fn and_expr(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.ternary()?;
        while self.match_any(&[TokenKind::And]) {
            let operator = self.previous();
            let right = self.ternary()?;
            expr = Expr::Logical(Logical {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }
        Ok(expr)
    }

    /// `cond ? a : b`. The loop (rather than a recursive call on the
    /// else-branch) is deliberate: chained ternaries group
    /// left-associatively, `(c1 ? a : c2) ? b : c`, matching the grouping
    /// the original interpreter produced rather than the right-nesting a
    /// C-style grammar usually gives this operator.
    fn ternary(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.equality()?;
        while self.match_any(&[TokenKind::QuestionMark]) {
            let then_branch = self.expression()?;
            self.consume(TokenKind::Colon, "Expect ':' in ternary expression.")?;
            let else_branch = self.equality()?;
            expr = Expr::Ternary(Ternary {
                condition: Box::new(expr),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            });
        }
        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.comparison()?;
        while self.match_any(&[TokenKind::BangEqual, TokenKind::EqualEqual]) {
            let operator = self.previous();
            let right = self.comparison()?;
            expr = Expr::Binary(Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.term()?;
        while self.match_any(&[
            TokenKind::Greater,
            TokenKind::GreaterEqual,
            TokenKind::Less,
            TokenKind::LessEqual,
        ]) {
            let operator = self.previous();
            let right = self.term()?;
            expr = Expr::Binary(Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.factor()?;
        while self.match_any(&[TokenKind::Plus, TokenKind::Minus]) {
            let operator = self.previous();
            let right = self.factor()?;
            expr = Expr::Binary(Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.unary()?;
        while self.match_any(&[TokenKind::Star, TokenKind::Slash]) {
            let operator = self.previous();
            let right = self.unary()?;
            expr = Expr::Binary(Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            });
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        if self.match_any(&[TokenKind::Bang, TokenKind::Minus, TokenKind::Plus]) {
            let operator = self.previous();
            let right = self.unary()?;
            return Ok(Expr::Unary(Unary {
                operator,
                right: Box::new(right),
            }));
        }
        self.call()
    }

    fn call(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.primary()?;
        loop {
            if self.match_any(&[TokenKind::LParen]) {
                expr = self.finish_call(expr)?;
            } else if self.match_any(&[TokenKind::LBracket]) {
                let bracket = self.previous();
                let index = self.expression()?;
                self.consume(TokenKind::RBracket, "Expect ']' after index.")?;
                expr = Expr::Index(Index {
                    callee: Box::new(expr),
                    index: Box::new(index),
                    bracket,
                });
            } else if self.match_any(&[TokenKind::PlusPlus, TokenKind::MinusMinus]) {
                let operator = self.previous();
                expr = self.desugar_postfix(expr, operator)?;
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> Result<Expr, ParseError> {
        let mut arguments = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                if arguments.len() >= MAX_ARGS {
                    return Err(self.error(self.peek().clone(), "Can't have more than 255 arguments."));
                }
                arguments.push(self.expression()?);
                if !self.match_any(&[TokenKind::Comma]) {
                    break;
                }
            }
        }
        let paren = self.consume(TokenKind::RParen, "Expect ')' after arguments.")?;
        Ok(Expr::Call(Call {
            callee: Box::new(callee),
            arguments,
            paren,
        }))
    }

    /// `x++` / `x--` desugar into an assignment of `x <op> 1` and
    /// evaluate to the updated value — there is no separate pre/post
    /// form, only this one increment-and-yield-the-new-value expression.
    fn desugar_postfix(&mut self, target: Expr, operator: Token) -> Result<Expr, ParseError> {
        let line = operator.line;
        let one = Expr::Literal(Literal {
            token: Token::new(TokenKind::Int, "1", line),
        });
        let bin_kind = if operator.kind == TokenKind::PlusPlus {
            TokenKind::Plus
        } else {
            TokenKind::Minus
        };
        let bin_lexeme = if bin_kind == TokenKind::Plus { "+" } else { "-" };
        let bin_op = Token::new(bin_kind, bin_lexeme, line);

        match target {
            Expr::Variable(v) => {
                let updated = Expr::Binary(Binary {
                    left: Box::new(Expr::Variable(v.clone())),
                    operator: bin_op,
                    right: Box::new(one),
                });
                Ok(Expr::Assign(Assign {
                    id: v.id,
                    name: v.name,
                    right: Box::new(updated),
                }))
            }
            Expr::Index(idx) => {
                let updated = Expr::Binary(Binary {
                    left: Box::new(Expr::Index(idx.clone())),
                    operator: bin_op,
                    right: Box::new(one),
                });
                Ok(Expr::IndexAssign(IndexAssign {
                    target: idx.callee,
                    index: idx.index,
                    value: Box::new(updated),
                    bracket: idx.bracket,
                }))
            }
            _ => Err(self.error(operator, "Invalid increment/decrement target.")),
        }
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        if self.match_any(&[TokenKind::False, TokenKind::True, TokenKind::Null, TokenKind::Int, TokenKind::Double]) {
            return Ok(Expr::Literal(Literal { token: self.previous() }));
        }
        if self.match_any(&[TokenKind::String]) {
            return self.finish_string_literal(self.previous());
        }
        if self.match_any(&[TokenKind::Identifier]) {
            let name = self.previous();
            return Ok(Expr::Variable(Variable {
                id: self.fresh_id(),
                name,
            }));
        }
        if self.match_any(&[TokenKind::LParen]) {
            let inner = self.expression()?;
            self.consume(TokenKind::RParen, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping(Grouping { inner: Box::new(inner) }));
        }
        if self.match_any(&[TokenKind::LBracket]) {
            let bracket = self.previous();
            let mut elements = Vec::new();
            if !self.check(TokenKind::RBracket) {
                loop {
                    elements.push(self.expression()?);
                    if !self.match_any(&[TokenKind::Comma]) {
                        break;
                    }
                }
            }
            self.consume(TokenKind::RBracket, "Expect ']' after array elements.")?;
            return Ok(Expr::Array(ArrayLit { bracket, elements }));
        }
        if self.match_any(&[TokenKind::LBrace]) {
            let brace = self.previous();
            let mut entries = Vec::new();
            if !self.check(TokenKind::RBrace) {
                loop {
                    let key = self.expression()?;
                    self.consume(TokenKind::Colon, "Expect ':' after map key.")?;
                    let value = self.expression()?;
                    entries.push((key, value));
                    if !self.match_any(&[TokenKind::Comma]) {
                        break;
                    }
                }
            }
            self.consume(TokenKind::RBrace, "Expect '}' after map entries.")?;
            return Ok(Expr::Map(MapLit { brace, entries }));
        }

        Err(self.error(self.peek().clone(), "Expect expression."))
    }

    /// Rebuilds a string literal's sub-token stream into a concatenation
    /// expression: literal segments become `Literal` nodes, and each
    /// embedded `$name` / `${ expr }` run is parsed (via a nested parser
    /// seeded with this parser's `NodeId` counter) into its own
    /// expression, joined left-to-right with `+`.
    fn finish_string_literal(&mut self, token: Token) -> Result<Expr, ParseError> {
        let line = token.line;
        let sub_tokens = token.interpolation.unwrap_or_default();
        let mut parts = Vec::new();
        let mut i = 0;
        while i < sub_tokens.len() {
            match sub_tokens[i].kind {
                TokenKind::Eof => break,
                TokenKind::String => {
                    parts.push(Expr::Literal(Literal {
                        token: sub_tokens[i].clone(),
                    }));
                    i += 1;
                }
                _ => {
                    let mut run = Vec::new();
                    while i < sub_tokens.len()
                        && sub_tokens[i].kind != TokenKind::String
                        && sub_tokens[i].kind != TokenKind::Eof
                    {
                        run.push(sub_tokens[i].clone());
                        i += 1;
                    }
                    run.push(Token::new(TokenKind::Eof, "", line));
                    let mut nested = Parser::with_next_id(run, self.next_id);
                    let expr = nested.expression()?;
                    self.next_id = nested.next_id;
                    parts.push(expr);
                }
            }
        }

        // Seeded with an empty string literal rather than the first part
        // itself: `+` only stringifies when one side is already a `Str`,
        // so a literal like `"$a"` or `"${1}${2}"` with no literal text of
        // its own would otherwise evaluate to `a`'s raw value, or to
        // `Int(3)`, instead of a string.
        let mut acc = Expr::Literal(Literal {
            token: Token::new(TokenKind::String, String::new(), line),
        });
        for part in parts {
            acc = Expr::Binary(Binary {
                left: Box::new(acc),
                operator: Token::new(TokenKind::Plus, "+", line),
                right: Box::new(part),
            });
        }
        Ok(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(src: &str) -> Vec<Stmt> {
        let (tokens, errors) = Lexer::new(src).tokenize();
        assert!(errors.is_empty(), "unexpected lex errors: {errors:?}");
        let (statements, errors, _next_id) = Parser::new(tokens).parse();
        assert!(errors.is_empty(), "unexpected parse errors: {errors:?}");
        statements
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let statements = parse("1 + 2 * 3;");
        let Stmt::Expr(Expr::Binary(outer)) = &statements[0] else {
            panic!("expected a top-level binary expression");
        };
        assert_eq!(outer.operator.kind, TokenKind::Plus);
        assert!(matches!(*outer.right, Expr::Binary(_)), "the right operand should be the '2 * 3' group");
    }

    #[test]
    fn chained_ternaries_group_left_associatively() {
        let statements = parse("a ? 1 : b ? 2 : 3;");
        let Stmt::Expr(Expr::Ternary(outer)) = &statements[0] else {
            panic!("expected a top-level ternary expression");
        };
        assert!(
            matches!(*outer.condition, Expr::Ternary(_)),
            "the condition should itself be the first ternary, not the else-branch"
        );
    }

    #[test]
    fn for_loop_desugars_into_a_block_wrapping_a_while_loop() {
        let statements = parse("for (var i = 0; i < 10; i = i + 1) { println(i); }");
        let Stmt::Block(block) = &statements[0] else {
            panic!("expected the for-loop to desugar into a block");
        };
        assert!(matches!(block.statements[0], Stmt::VarDecl(_)));
        assert!(matches!(block.statements[1], Stmt::While(_)));
    }

    #[test]
    fn postfix_increment_desugars_into_an_assignment() {
        let statements = parse("i++;");
        assert!(matches!(statements[0], Stmt::Expr(Expr::Assign(_))));
    }

    #[test]
    fn assigning_to_a_non_lvalue_is_a_parse_error() {
        let (tokens, _) = Lexer::new("1 + 1 = 2;").tokenize();
        let (_statements, errors, _next_id) = Parser::new(tokens).parse();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn interpolation_with_no_literal_text_is_still_seeded_as_a_string_concatenation() {
        // "$a" has no literal segment of its own; the fold that rebuilds
        // it into a `Binary` chain must still start from an empty string
        // literal so the result concatenates (and thus stringifies)
        // instead of evaluating to `a`'s raw value.
        let statements = parse("\"$a\";");
        let Stmt::Expr(Expr::Binary(outer)) = &statements[0] else {
            panic!("expected the interpolated string to desugar into a binary '+' chain");
        };
        assert_eq!(outer.operator.kind, TokenKind::Plus);
        let Expr::Literal(seed) = outer.left.as_ref() else {
            panic!("expected the left-hand seed to be a literal");
        };
        assert_eq!(seed.token.kind, TokenKind::String);
        assert_eq!(seed.token.lexeme, "");
    }
}
