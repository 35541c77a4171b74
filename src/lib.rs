pub mod ast;
pub mod builtins;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod scope;
pub mod value;

use error::{LexError, ParseError, ResolveError, RuntimeError};
use interpreter::Interpreter;
use lexer::Lexer;
use parser::Parser;
use resolver::Resolver;

/// Every way a program can fail, from the first lexical error to a
/// runtime panic. Each stage stops the pipeline before the next one
/// starts: there is no point parsing a token stream a failed scan left
/// incomplete, nor evaluating an AST the resolver rejected.
#[derive(Debug)]
pub enum PipelineError {
    Lex(Vec<LexError>),
    Parse(Vec<ParseError>),
    Resolve(Vec<ResolveError>),
    Runtime(RuntimeError),
}

/// Runs one program end to end: lex, parse, resolve, evaluate. `interp`
/// carries the global scope across calls, so a REPL can feed it one
/// line at a time and have earlier declarations still be visible.
pub fn run(source: &str, interp: &mut Interpreter) -> Result<(), PipelineError> {
    let (tokens, lex_errors) = Lexer::new(source).tokenize();
    if !lex_errors.is_empty() {
        return Err(PipelineError::Lex(lex_errors));
    }

    let (statements, parse_errors, _next_id) = Parser::new(tokens).parse();
    if !parse_errors.is_empty() {
        return Err(PipelineError::Parse(parse_errors));
    }

    let (depths, resolve_errors) = Resolver::new().resolve(&statements);
    if !resolve_errors.is_empty() {
        return Err(PipelineError::Resolve(resolve_errors));
    }

    interp.run(&statements, depths).map_err(PipelineError::Runtime)
}
