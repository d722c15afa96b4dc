//! Recursive-descent parser producing a statement list and expression AST.
//!
//! One token of lookahead and no recovery: the first failed expectation
//! aborts the parse. Operator precedence comes from the call chain
//! comparison → expression → term → factor → atom, so no separate
//! precedence table is needed.

use crate::error::{TranslateError, TranslateResult};
use crate::tokenizer::{Token, TokenKind};
use crate::ty::TypeKind;

/// Binary operators recognised by the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  Lt,
  Le,
  Gt,
  Ge,
  Eq,
  Ne,
}

impl BinaryOp {
  /// Source spelling, reused verbatim by the emitter.
  pub fn symbol(self) -> &'static str {
    match self {
      BinaryOp::Add => "+",
      BinaryOp::Sub => "-",
      BinaryOp::Mul => "*",
      BinaryOp::Div => "/",
      BinaryOp::Lt => "<",
      BinaryOp::Le => "<=",
      BinaryOp::Gt => ">",
      BinaryOp::Ge => ">=",
      BinaryOp::Eq => "==",
      BinaryOp::Ne => "!=",
    }
  }
}

/// Expression tree produced by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
  /// Numeric literal, lexeme kept verbatim.
  Number(String),
  Variable(String),
  /// Raw characters between the quotes, quotes excluded.
  Str(String),
  Binary {
    op: BinaryOp,
    lhs: Box<Expr>,
    rhs: Box<Expr>,
  },
}

impl Expr {
  pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
    Self::Binary {
      op,
      lhs: Box::new(lhs),
      rhs: Box::new(rhs),
    }
  }
}

/// One `else if` clause of an if-chain, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct ElseIf {
  pub cond: Expr,
  pub body: Vec<Stmt>,
}

/// Statements produced by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
  VarDecl {
    ty: TypeKind,
    name: String,
    init: Option<Expr>,
  },
  Assign {
    name: String,
    value: Expr,
  },
  Cout {
    parts: Vec<Expr>,
    newline: bool,
  },
  If {
    cond: Expr,
    then_body: Vec<Stmt>,
    else_ifs: Vec<ElseIf>,
    else_body: Vec<Stmt>,
  },
  /// The three header fragments stay raw text: the loop header admits
  /// constructs (`int i = 0`, `i++`) that are not expressions anywhere
  /// else, so the emitter re-interprets them instead.
  For {
    init: String,
    cond: String,
    step: String,
    body: Vec<Stmt>,
  },
  While {
    cond: Expr,
    body: Vec<Stmt>,
  },
}

/// A translation unit: the ordered top-level statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
  pub stmts: Vec<Stmt>,
}

/// Parse the token stream into a program.
// Parse procedure overview:
// - `parse` wraps the tokens in a cursor and loops statements until EOF.
// - statements dispatch on the current token kind.
// - expressions descend the usual precedence ladder.
pub fn parse(tokens: Vec<Token>) -> TranslateResult<Program> {
  let mut stream = TokenStream::new(tokens);

  let mut stmts = Vec::new();
  while stream.peek_kind() != TokenKind::Eof {
    stmts.push(parse_stmt(&mut stream)?);
  }

  Ok(Program { stmts })
}

// ----- Statement parsing -----
fn parse_stmt(stream: &mut TokenStream) -> TranslateResult<Stmt> {
  match stream.peek_kind() {
    TokenKind::KwInt | TokenKind::KwFloat => parse_var_decl(stream),
    TokenKind::Ident => parse_assignment(stream),
    TokenKind::KwCout => parse_cout(stream),
    TokenKind::KwIf => parse_if(stream),
    TokenKind::KwFor => parse_for(stream),
    TokenKind::KwWhile => parse_while(stream),
    found => Err(TranslateError::ExpectedStatement { found }),
  }
}

fn parse_var_decl(stream: &mut TokenStream) -> TranslateResult<Stmt> {
  let ty = parse_type(stream)?;
  let name = stream.expect(TokenKind::Ident, "a variable name")?.lexeme;

  let init = if stream.eat(TokenKind::Assign) {
    Some(parse_expression(stream)?)
  } else {
    None
  };
  stream.expect(TokenKind::Semicolon, "';'")?;

  Ok(Stmt::VarDecl { ty, name, init })
}

fn parse_type(stream: &mut TokenStream) -> TranslateResult<TypeKind> {
  let found = stream.peek_kind();
  match TypeKind::from_token(found) {
    Some(ty) => {
      stream.bump();
      Ok(ty)
    }
    None => Err(TranslateError::UnexpectedToken {
      expected: "a type keyword".to_string(),
      found,
    }),
  }
}

fn parse_assignment(stream: &mut TokenStream) -> TranslateResult<Stmt> {
  let name = stream.expect(TokenKind::Ident, "a variable name")?.lexeme;
  stream.expect(TokenKind::Assign, "'='")?;
  let value = parse_expression(stream)?;
  stream.expect(TokenKind::Semicolon, "';'")?;

  Ok(Stmt::Assign { name, value })
}

fn parse_cout(stream: &mut TokenStream) -> TranslateResult<Stmt> {
  stream.expect(TokenKind::KwCout, "'cout'")?;

  let mut parts = Vec::new();
  let mut newline = false;

  // At least one `<<` is required; further `endl`s are idempotent.
  stream.expect(TokenKind::Shl, "'<<'")?;
  loop {
    if stream.eat(TokenKind::KwEndl) {
      newline = true;
    } else {
      parts.push(parse_expression(stream)?);
    }
    if !stream.eat(TokenKind::Shl) {
      break;
    }
  }
  stream.expect(TokenKind::Semicolon, "';'")?;

  Ok(Stmt::Cout { parts, newline })
}

fn parse_if(stream: &mut TokenStream) -> TranslateResult<Stmt> {
  stream.expect(TokenKind::KwIf, "'if'")?;
  stream.expect(TokenKind::LParen, "'('")?;
  let cond = parse_comparison(stream)?;
  stream.expect(TokenKind::RParen, "')'")?;
  let then_body = parse_block(stream)?;

  let mut else_ifs = Vec::new();
  let mut else_body = Vec::new();
  while stream.eat(TokenKind::KwElse) {
    if stream.eat(TokenKind::KwIf) {
      stream.expect(TokenKind::LParen, "'('")?;
      let cond = parse_comparison(stream)?;
      stream.expect(TokenKind::RParen, "')'")?;
      let body = parse_block(stream)?;
      else_ifs.push(ElseIf { cond, body });
    } else {
      else_body = parse_block(stream)?;
      break;
    }
  }

  Ok(Stmt::If {
    cond,
    then_body,
    else_ifs,
    else_body,
  })
}

fn parse_for(stream: &mut TokenStream) -> TranslateResult<Stmt> {
  stream.expect(TokenKind::KwFor, "'for'")?;
  stream.expect(TokenKind::LParen, "'('")?;
  let init = capture_until(stream, TokenKind::Semicolon, "';'")?;
  let cond = capture_until(stream, TokenKind::Semicolon, "';'")?;
  let step = capture_until(stream, TokenKind::RParen, "')'")?;
  let body = parse_block(stream)?;

  Ok(Stmt::For {
    init,
    cond,
    step,
    body,
  })
}

/// Collect raw lexemes, each followed by a single space, up to (and
/// consuming) `terminator`.
fn capture_until(
  stream: &mut TokenStream,
  terminator: TokenKind,
  expected: &str,
) -> TranslateResult<String> {
  let mut text = String::new();
  while stream.peek_kind() != terminator && stream.peek_kind() != TokenKind::Eof {
    text.push_str(&stream.bump().lexeme);
    text.push(' ');
  }
  stream.expect(terminator, expected)?;
  Ok(text)
}

fn parse_while(stream: &mut TokenStream) -> TranslateResult<Stmt> {
  stream.expect(TokenKind::KwWhile, "'while'")?;
  stream.expect(TokenKind::LParen, "'('")?;
  let cond = parse_comparison(stream)?;
  stream.expect(TokenKind::RParen, "')'")?;
  let body = parse_block(stream)?;

  Ok(Stmt::While { cond, body })
}

fn parse_block(stream: &mut TokenStream) -> TranslateResult<Vec<Stmt>> {
  stream.expect(TokenKind::LBrace, "'{'")?;
  let mut body = Vec::new();
  while stream.peek_kind() != TokenKind::RBrace && stream.peek_kind() != TokenKind::Eof {
    body.push(parse_stmt(stream)?);
  }
  stream.expect(TokenKind::RBrace, "'}'")?;
  Ok(body)
}

// ----- Expression parsing -----
fn parse_comparison(stream: &mut TokenStream) -> TranslateResult<Expr> {
  let mut node = parse_expression(stream)?;

  loop {
    let op = match stream.peek_kind() {
      TokenKind::Lt => BinaryOp::Lt,
      TokenKind::Le => BinaryOp::Le,
      TokenKind::Gt => BinaryOp::Gt,
      TokenKind::Ge => BinaryOp::Ge,
      TokenKind::Eq => BinaryOp::Eq,
      TokenKind::Ne => BinaryOp::Ne,
      _ => break,
    };
    stream.bump();
    let rhs = parse_expression(stream)?;
    node = Expr::binary(op, node, rhs);
  }

  Ok(node)
}

fn parse_expression(stream: &mut TokenStream) -> TranslateResult<Expr> {
  let mut node = parse_term(stream)?;

  loop {
    let op = match stream.peek_kind() {
      TokenKind::Plus => BinaryOp::Add,
      TokenKind::Minus => BinaryOp::Sub,
      _ => break,
    };
    stream.bump();
    let rhs = parse_term(stream)?;
    node = Expr::binary(op, node, rhs);
  }

  Ok(node)
}

fn parse_term(stream: &mut TokenStream) -> TranslateResult<Expr> {
  let mut node = parse_factor(stream)?;

  loop {
    let op = match stream.peek_kind() {
      TokenKind::Star => BinaryOp::Mul,
      TokenKind::Slash => BinaryOp::Div,
      _ => break,
    };
    stream.bump();
    let rhs = parse_factor(stream)?;
    node = Expr::binary(op, node, rhs);
  }

  Ok(node)
}

fn parse_factor(stream: &mut TokenStream) -> TranslateResult<Expr> {
  if stream.eat(TokenKind::LParen) {
    // Parentheses re-enter at the comparison level so any mix parses.
    let node = parse_comparison(stream)?;
    stream.expect(TokenKind::RParen, "')'")?;
    return Ok(node);
  }
  parse_atom(stream)
}

fn parse_atom(stream: &mut TokenStream) -> TranslateResult<Expr> {
  match stream.peek_kind() {
    TokenKind::Number => Ok(Expr::Number(stream.bump().lexeme)),
    TokenKind::Ident => Ok(Expr::Variable(stream.bump().lexeme)),
    TokenKind::Str => Ok(Expr::Str(stream.bump().lexeme)),
    found => Err(TranslateError::ExpectedExpression { found }),
  }
}

/// Lightweight cursor over the token vector.
struct TokenStream {
  tokens: Vec<Token>,
  pos: usize,
}

impl TokenStream {
  fn new(tokens: Vec<Token>) -> Self {
    Self { tokens, pos: 0 }
  }

  fn peek_kind(&self) -> TokenKind {
    self
      .tokens
      .get(self.pos)
      .map_or(TokenKind::Eof, |token| token.kind)
  }

  /// Consume and return the current token. The cursor never advances
  /// past the end-of-input sentinel.
  fn bump(&mut self) -> Token {
    match self.tokens.get(self.pos) {
      Some(token) => {
        let token = token.clone();
        if token.kind != TokenKind::Eof {
          self.pos += 1;
        }
        token
      }
      None => Token::new(TokenKind::Eof, ""),
    }
  }

  /// Consume the current token if it matches the given kind.
  fn eat(&mut self, kind: TokenKind) -> bool {
    if self.peek_kind() == kind {
      self.bump();
      true
    } else {
      false
    }
  }

  fn expect(&mut self, kind: TokenKind, expected: &str) -> TranslateResult<Token> {
    if self.peek_kind() == kind {
      Ok(self.bump())
    } else {
      Err(TranslateError::UnexpectedToken {
        expected: expected.to_string(),
        found: self.peek_kind(),
      })
    }
  }
}
