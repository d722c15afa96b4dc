//! Shared error utilities used across the translation pipeline.
//!
//! Diagnostics are kept lightweight on purpose: a parse error names what
//! the parser expected and the kind of token it found instead. Byte
//! offsets are not tracked, so the messages stay position-free.

use snafu::Snafu;

use crate::tokenizer::TokenKind;

pub type TranslateResult<T> = Result<T, TranslateError>;

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum TranslateError {
  #[snafu(display("expected {expected}, but got {found}"))]
  UnexpectedToken { expected: String, found: TokenKind },

  #[snafu(display("expected an expression, but got {found}"))]
  ExpectedExpression { found: TokenKind },

  #[snafu(display("expected a statement, but got {found}"))]
  ExpectedStatement { found: TokenKind },
}
