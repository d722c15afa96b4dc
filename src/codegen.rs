//! Code emission: lower the parsed AST into indented Python source.
//!
//! The emitter is total – any well-formed tree produces text. Binary
//! expressions are always parenthesized, so output precedence is carried
//! by structure and the emitter never reasons about target-language
//! precedence. Indentation is four spaces per nesting level.

use crate::parser::{Expr, Program, Stmt};

const INDENT_STEP: usize = 4;

/// Emit Python source for a whole program. Every top-level statement is
/// followed by one newline; compound statements already end with their
/// own, which leaves a blank line after each block.
pub fn generate(program: &Program) -> String {
  let mut out = String::new();
  for stmt in &program.stmts {
    emit_stmt(stmt, 0, &mut out);
    out.push('\n');
  }
  out
}

fn emit_stmt(stmt: &Stmt, indent: usize, out: &mut String) {
  match stmt {
    Stmt::VarDecl { name, init, .. } => {
      push_indent(out, indent);
      match init {
        Some(value) => out.push_str(&format!("{name} = {}", emit_expr(value))),
        None => out.push_str(&format!("{name} = None")),
      }
    }
    Stmt::Assign { name, value } => {
      push_indent(out, indent);
      out.push_str(&format!("{name} = {}", emit_expr(value)));
    }
    Stmt::Cout { parts, .. } => {
      // `print` appends its own newline, so the endl flag changes nothing.
      push_indent(out, indent);
      let parts: Vec<String> = parts.iter().map(emit_expr).collect();
      out.push_str(&format!("print({})", parts.join(", ")));
    }
    Stmt::If {
      cond,
      then_body,
      else_ifs,
      else_body,
    } => {
      push_indent(out, indent);
      out.push_str(&format!("if {}:\n", emit_expr(cond)));
      emit_body(then_body, indent + INDENT_STEP, out);
      for clause in else_ifs {
        push_indent(out, indent);
        out.push_str(&format!("elif {}:\n", emit_expr(&clause.cond)));
        emit_body(&clause.body, indent + INDENT_STEP, out);
      }
      if !else_body.is_empty() {
        push_indent(out, indent);
        out.push_str("else:\n");
        emit_body(else_body, indent + INDENT_STEP, out);
      }
    }
    Stmt::For {
      init,
      cond,
      step,
      body,
    } => {
      let header = ForHeader::from_raw(init, cond, step);
      push_indent(out, indent);
      out.push_str(&format!(
        "for {} in range({}, {}",
        header.var, header.start, header.end
      ));
      if header.step != 1 {
        out.push_str(&format!(", {}", header.step));
      }
      out.push_str("):\n");
      emit_body(body, indent + INDENT_STEP, out);
    }
    Stmt::While { cond, body } => {
      push_indent(out, indent);
      out.push_str(&format!("while {}:\n", emit_expr(cond)));
      emit_body(body, indent + INDENT_STEP, out);
    }
  }
}

fn emit_body(body: &[Stmt], indent: usize, out: &mut String) {
  for stmt in body {
    emit_stmt(stmt, indent, out);
    out.push('\n');
  }
}

fn emit_expr(expr: &Expr) -> String {
  match expr {
    Expr::Number(text) => text.clone(),
    Expr::Variable(name) => name.clone(),
    // Fresh quotes, no escape processing.
    Expr::Str(content) => format!("\"{content}\""),
    Expr::Binary { op, lhs, rhs } => {
      format!("({}{}{})", emit_expr(lhs), op.symbol(), emit_expr(rhs))
    }
  }
}

fn push_indent(out: &mut String, width: usize) {
  for _ in 0..width {
    out.push(' ');
  }
}

/// Loop header fields recovered from the raw `for` capture.
struct ForHeader {
  var: String,
  start: String,
  end: String,
  step: i64,
}

impl ForHeader {
  fn from_raw(init: &str, cond: &str, inc: &str) -> Self {
    let init = init.trim();
    let cond = cond.trim();
    let inc = inc.trim();

    // `int i = 0` → variable "i", start "0". Without an `=` both fields
    // stay empty and the output is regular but meaningless.
    let (var, start) = match init.find('=') {
      Some(eq) => {
        let left = init[..eq].trim();
        let left = left
          .strip_prefix("int ")
          .or_else(|| left.strip_prefix("float "))
          .unwrap_or(left);
        (left.trim().to_string(), init[eq + 1..].trim().to_string())
      }
      None => (String::new(), String::new()),
    };

    // The bound is whatever follows the comparison: `<` wins over `>`.
    let end = match cond.find('<').or_else(|| cond.find('>')) {
      Some(pos) => cond[pos + 1..].trim().to_string(),
      None => "/*cond*/".to_string(),
    };

    // The capture spells `k--` as `k - - `, so scan with spacing removed.
    let despaced: String = inc.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let step = if despaced.contains("--") { -1 } else { 1 };

    Self {
      var,
      start,
      end,
      step,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parser::parse;
  use crate::tokenizer::tokenize;

  fn py(source: &str) -> String {
    generate(&parse(tokenize(source)).expect("program should parse"))
  }

  #[test]
  fn arithmetic_is_fully_parenthesized() {
    assert_eq!(py("int x = 1 + 2 * 3;"), "x = (1+(2*3))\n");
  }

  #[test]
  fn declaration_without_initializer_becomes_none() {
    assert_eq!(py("float y;"), "y = None\n");
  }

  #[test]
  fn declared_types_are_discarded() {
    assert_eq!(py("int x = 1;"), py("float x = 1;"));
  }

  #[test]
  fn counting_up_loop_uses_range() {
    assert_eq!(
      py("for (int i = 0; i < 3; i++) { cout << i << endl; }"),
      "for i in range(0, 3):\n    print(i)\n\n"
    );
  }

  #[test]
  fn counting_down_loop_appends_negative_step() {
    assert_eq!(
      py("for (int k = 10; k > 0; k--) { cout << k << endl; }"),
      "for k in range(10, 0, -1):\n    print(k)\n\n"
    );
  }

  #[test]
  fn expressions_round_trip_through_emission() {
    let first = py("x = ((1 + 2) * (3 - 4));");
    let again = py(&format!("{};", first.trim_end()));
    assert_eq!(first, again);
  }

  #[test]
  fn endl_only_cout_prints_nothing() {
    assert_eq!(py("cout << endl;"), "print()\n");
  }

  #[test]
  fn empty_else_is_omitted() {
    assert_eq!(
      py("if (x > 1) { x = 2; } else { }"),
      "if (x>1):\n    x = 2\n\n"
    );
  }

  #[test]
  fn string_literals_are_requoted_verbatim() {
    assert_eq!(py(r#"cout << "a\nb";"#), "print(\"a\\nb\")\n");
  }

  #[test]
  fn for_header_extraction() {
    let header = ForHeader::from_raw("int i = 0 ", "i < 3 ", "i ++ ");
    assert_eq!(header.var, "i");
    assert_eq!(header.start, "0");
    assert_eq!(header.end, "3");
    assert_eq!(header.step, 1);
  }

  #[test]
  fn for_header_strips_float_prefix() {
    let header = ForHeader::from_raw("float f = 0.5 ", "f < 2.5 ", "f ++ ");
    assert_eq!(header.var, "f");
    assert_eq!(header.start, "0.5");
    assert_eq!(header.end, "2.5");
  }

  #[test]
  fn for_header_detects_spaced_decrement() {
    let header = ForHeader::from_raw("k = 10 ", "k > 0 ", "k - - ");
    assert_eq!(header.step, -1);
  }

  #[test]
  fn for_header_without_assignment_defaults_to_empty() {
    let header = ForHeader::from_raw("i ", "i < 3 ", "i ++ ");
    assert_eq!(header.var, "");
    assert_eq!(header.start, "");
  }

  #[test]
  fn for_header_without_bound_uses_placeholder() {
    let header = ForHeader::from_raw("int i = 0 ", "i != 3 ", "i ++ ");
    assert_eq!(header.end, "/*cond*/");
  }
}
