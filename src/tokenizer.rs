//! Lexical analysis: turns the raw input string into a vector of tokens.
//!
//! The tokenizer is total – it never rejects input. Anything it cannot
//! recognise becomes an `Unknown` token and is left for the parser to
//! reject once it reaches a grammatical position. Multi-character
//! operators are matched before single-character ones to avoid ambiguity.

use std::fmt;

/// Kinds of tokens recognised by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  // Keywords
  KwInt,
  KwFloat,
  KwIf,
  KwElse,
  KwFor,
  KwWhile,
  KwCout,
  KwEndl,
  KwMain,
  // Literals
  Ident,
  Number,
  Str,
  // Operators
  Assign,
  Eq,
  Plus,
  PlusPlus,
  Minus,
  Star,
  Slash,
  Percent,
  Lt,
  Le,
  Gt,
  Ge,
  Ne,
  Shl,
  // Punctuation
  LParen,
  RParen,
  LBrace,
  RBrace,
  Semicolon,
  // Control
  Eof,
  Unknown,
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let text = match self {
      TokenKind::KwInt => "'int'",
      TokenKind::KwFloat => "'float'",
      TokenKind::KwIf => "'if'",
      TokenKind::KwElse => "'else'",
      TokenKind::KwFor => "'for'",
      TokenKind::KwWhile => "'while'",
      TokenKind::KwCout => "'cout'",
      TokenKind::KwEndl => "'endl'",
      TokenKind::KwMain => "'main'",
      TokenKind::Ident => "an identifier",
      TokenKind::Number => "a number literal",
      TokenKind::Str => "a string literal",
      TokenKind::Assign => "'='",
      TokenKind::Eq => "'=='",
      TokenKind::Plus => "'+'",
      TokenKind::PlusPlus => "'++'",
      TokenKind::Minus => "'-'",
      TokenKind::Star => "'*'",
      TokenKind::Slash => "'/'",
      TokenKind::Percent => "'%'",
      TokenKind::Lt => "'<'",
      TokenKind::Le => "'<='",
      TokenKind::Gt => "'>'",
      TokenKind::Ge => "'>='",
      TokenKind::Ne => "'!='",
      TokenKind::Shl => "'<<'",
      TokenKind::LParen => "'('",
      TokenKind::RParen => "')'",
      TokenKind::LBrace => "'{'",
      TokenKind::RBrace => "'}'",
      TokenKind::Semicolon => "';'",
      TokenKind::Eof => "end of input",
      TokenKind::Unknown => "an unrecognised character",
    };
    f.write_str(text)
  }
}

/// Thin wrapper pairing a kind with the exact text that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub lexeme: String,
}

impl Token {
  /// Convenience constructor to keep the `tokenize` loop readable.
  pub fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
    Self {
      kind,
      lexeme: lexeme.into(),
    }
  }
}

fn keyword_kind(ident: &str) -> Option<TokenKind> {
  let kind = match ident {
    "int" => TokenKind::KwInt,
    "float" => TokenKind::KwFloat,
    "if" => TokenKind::KwIf,
    "else" => TokenKind::KwElse,
    "for" => TokenKind::KwFor,
    "while" => TokenKind::KwWhile,
    "cout" => TokenKind::KwCout,
    "endl" => TokenKind::KwEndl,
    "main" => TokenKind::KwMain,
    _ => return None,
  };
  Some(kind)
}

// `is_ascii_whitespace` leaves out vertical tab, which the source
// language treats as whitespace.
fn is_space(c: u8) -> bool {
  c.is_ascii_whitespace() || c == b'\x0B'
}

/// Lex the input into a flat vector of tokens terminated by an `Eof`
/// marker. Never fails: lexical anomalies flow through as `Unknown`.
pub fn tokenize(input: &str) -> Vec<Token> {
  let bytes = input.as_bytes();
  let mut tokens = Vec::new();
  let mut i = 0;

  while i < bytes.len() {
    let c = bytes[i];

    if is_space(c) {
      i += 1;
      continue;
    }

    // Line comment: discard up to the newline, which the whitespace
    // skip then consumes.
    if c == b'/' && bytes.get(i + 1) == Some(&b'/') {
      while i < bytes.len() && bytes[i] != b'\n' {
        i += 1;
      }
      continue;
    }

    if c.is_ascii_alphabetic() || c == b'_' {
      let start = i;
      i += 1;
      while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
        i += 1;
      }
      let text = &input[start..i];
      let kind = keyword_kind(text).unwrap_or(TokenKind::Ident);
      tokens.push(Token::new(kind, text));
      continue;
    }

    if c.is_ascii_digit() {
      let start = i;
      let mut seen_dot = false;
      while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        if bytes[i] == b'.' {
          if seen_dot {
            // Second dot: the next token begins here.
            break;
          }
          seen_dot = true;
        }
        i += 1;
      }
      tokens.push(Token::new(TokenKind::Number, &input[start..i]));
      continue;
    }

    if c == b'"' {
      i += 1;
      let start = i;
      while i < bytes.len() && bytes[i] != b'"' {
        i += 1;
      }
      // No escape processing; an unterminated string is silently closed
      // at end of input.
      tokens.push(Token::new(TokenKind::Str, &input[start..i]));
      if i < bytes.len() {
        i += 1;
      }
      continue;
    }

    let (kind, len) = match (c, bytes.get(i + 1).copied()) {
      (b'=', Some(b'=')) => (TokenKind::Eq, 2),
      (b'=', _) => (TokenKind::Assign, 1),
      (b'+', Some(b'+')) => (TokenKind::PlusPlus, 2),
      (b'+', _) => (TokenKind::Plus, 1),
      (b'<', Some(b'<')) => (TokenKind::Shl, 2),
      (b'<', Some(b'=')) => (TokenKind::Le, 2),
      (b'<', _) => (TokenKind::Lt, 1),
      (b'>', Some(b'=')) => (TokenKind::Ge, 2),
      (b'>', _) => (TokenKind::Gt, 1),
      (b'!', Some(b'=')) => (TokenKind::Ne, 2),
      (b'-', _) => (TokenKind::Minus, 1),
      (b'*', _) => (TokenKind::Star, 1),
      (b'/', _) => (TokenKind::Slash, 1),
      (b'%', _) => (TokenKind::Percent, 1),
      (b'(', _) => (TokenKind::LParen, 1),
      (b')', _) => (TokenKind::RParen, 1),
      (b'{', _) => (TokenKind::LBrace, 1),
      (b'}', _) => (TokenKind::RBrace, 1),
      (b';', _) => (TokenKind::Semicolon, 1),
      _ => {
        // Whole char, so a multi-byte code point never gets split.
        let ch = input[i..].chars().next().unwrap_or('\0');
        tokens.push(Token::new(TokenKind::Unknown, ch.to_string()));
        i += ch.len_utf8();
        continue;
      }
    };
    tokens.push(Token::new(kind, &input[i..i + len]));
    i += len;
  }

  tokens.push(Token::new(TokenKind::Eof, ""));
  tokens
}

#[cfg(test)]
mod tests {
  use super::*;

  fn kinds(input: &str) -> Vec<TokenKind> {
    tokenize(input).iter().map(|token| token.kind).collect()
  }

  #[test]
  fn keywords_and_identifiers() {
    assert_eq!(
      kinds("int float if else for while cout endl main counter _x"),
      vec![
        TokenKind::KwInt,
        TokenKind::KwFloat,
        TokenKind::KwIf,
        TokenKind::KwElse,
        TokenKind::KwFor,
        TokenKind::KwWhile,
        TokenKind::KwCout,
        TokenKind::KwEndl,
        TokenKind::KwMain,
        TokenKind::Ident,
        TokenKind::Ident,
        TokenKind::Eof,
      ]
    );
  }

  #[test]
  fn operator_disambiguation() {
    assert_eq!(
      kinds("= == + ++ < << <= > >= != !"),
      vec![
        TokenKind::Assign,
        TokenKind::Eq,
        TokenKind::Plus,
        TokenKind::PlusPlus,
        TokenKind::Lt,
        TokenKind::Shl,
        TokenKind::Le,
        TokenKind::Gt,
        TokenKind::Ge,
        TokenKind::Ne,
        TokenKind::Unknown,
        TokenKind::Eof,
      ]
    );
  }

  #[test]
  fn bare_bang_keeps_its_character() {
    let tokens = tokenize("!");
    assert_eq!(tokens[0], Token::new(TokenKind::Unknown, "!"));
  }

  #[test]
  fn number_scan_stops_at_second_dot() {
    let tokens = tokenize("1.2.3");
    assert_eq!(tokens[0], Token::new(TokenKind::Number, "1.2"));
    assert_eq!(tokens[1], Token::new(TokenKind::Unknown, "."));
    assert_eq!(tokens[2], Token::new(TokenKind::Number, "3"));
  }

  #[test]
  fn string_content_excludes_quotes() {
    let tokens = tokenize(r#"cout << "hello world";"#);
    assert_eq!(tokens[2], Token::new(TokenKind::Str, "hello world"));
  }

  #[test]
  fn string_keeps_backslashes_verbatim() {
    let tokens = tokenize(r#""a\nb""#);
    assert_eq!(tokens[0], Token::new(TokenKind::Str, r"a\nb"));
  }

  #[test]
  fn unterminated_string_is_silently_closed() {
    let tokens = tokenize("\"abc");
    assert_eq!(tokens[0], Token::new(TokenKind::Str, "abc"));
    assert_eq!(tokens[1].kind, TokenKind::Eof);
  }

  #[test]
  fn line_comments_are_discarded() {
    assert_eq!(
      kinds("x = 1; // the rest is gone = = =\ny = 2;"),
      vec![
        TokenKind::Ident,
        TokenKind::Assign,
        TokenKind::Number,
        TokenKind::Semicolon,
        TokenKind::Ident,
        TokenKind::Assign,
        TokenKind::Number,
        TokenKind::Semicolon,
        TokenKind::Eof,
      ]
    );
  }

  #[test]
  fn division_is_not_a_comment() {
    assert_eq!(
      kinds("a / b"),
      vec![
        TokenKind::Ident,
        TokenKind::Slash,
        TokenKind::Ident,
        TokenKind::Eof,
      ]
    );
  }

  #[test]
  fn empty_input_yields_only_the_sentinel() {
    assert_eq!(tokenize(""), vec![Token::new(TokenKind::Eof, "")]);
  }
}
