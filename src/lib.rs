//! Crate root: wires together the translation pipeline.
//!
//! The stages are intentionally small and composable so they can be evolved
//! independently:
//! - `tokenizer` performs lexical analysis and produces a flat token stream.
//! - `parser` owns all syntactic knowledge and returns the program AST.
//! - `codegen` lowers the AST into indented Python source.
//! - `error` centralises the error type shared by the other modules.

pub mod error;
pub mod parser;
pub mod tokenizer;
pub mod ty;

mod codegen;

pub use error::{TranslateError, TranslateResult};

/// Translate a source string into Python source.
pub fn transpile(source: &str) -> TranslateResult<String> {
  let tokens = tokenizer::tokenize(source);
  let program = parser::parse(tokens)?;
  Ok(codegen::generate(&program))
}
