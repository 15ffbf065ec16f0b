//! The `graphblas` dialect.

use crate::ops;
use anyhow::Result;
use xrcf::Dialect;

/// Dialect for GraphBLAS-style sparse linear algebra.
///
/// The dialect owns the `graphblas` namespace. Which operations exist in
/// that namespace is decided by [ops::OPERATIONS].
#[derive(Clone, Copy, Debug, Default)]
pub struct GraphBLAS;

impl Dialect for GraphBLAS {
    fn name(&self) -> &'static str {
        GraphBLAS::NAMESPACE
    }
    fn description(&self) -> &'static str {
        "GraphBLAS-style sparse linear algebra"
    }
}

/// Characters that can appear in an operation name after the namespace.
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '$'
}

/// Characters that, when directly in front of `graphblas.`, mean that the
/// text is not an operation name (e.g., `%graphblas.x`, `!graphblas.type`).
fn is_prefix_char(c: char) -> bool {
    is_name_char(c) || matches!(c, '!' | '#' | '@' | '%' | '^')
}

/// Point to `column` on line `n` of `lines`.
///
/// Uses the same layout as the diagnostics of the xrcf scanner.
fn diagnostic(lines: &[&str], n: usize, column: usize, msg: &str) -> String {
    let prev_line = if n > 0 {
        let prev_n = n - 1;
        format!("\n{prev_n}  | {}", lines[prev_n])
    } else {
        "".to_string()
    };
    let line_num_width = 4 + n.to_string().len();
    let err_indent = " ".repeat(column + line_num_width);
    format!("```{prev_line}\n{n}  | {}\n{err_indent}^ {msg}\n```", lines[n])
}

/// Operation name in the dialect namespace that starts at `start` in `line`.
fn op_name_at(line: &str, start: usize) -> &str {
    let end = line[start..]
        .char_indices()
        .find(|(_, c)| !is_name_char(*c))
        .map(|(i, _)| start + i)
        .unwrap_or(line.len());
    &line[start..end]
}

impl GraphBLAS {
    pub const NAMESPACE: &'static str = "graphblas";

    /// Whether `name` is an operation name in the dialect namespace.
    pub fn is_dialect_op(name: &str) -> bool {
        name.strip_prefix(GraphBLAS::NAMESPACE)
            .and_then(|rest| rest.strip_prefix('.'))
            .is_some_and(|mnemonic| !mnemonic.is_empty())
    }
    /// Return the position and name of every dialect operation in `src`.
    ///
    /// Both the custom form (`%0 = graphblas.foo`) and the generic form
    /// (`"graphblas.foo"()`) are found. Comments are skipped, and so are
    /// string literals that are not followed by `(`.
    pub fn find_ops(src: &str) -> Vec<(usize, usize, String)> {
        let prefix = format!("{}.", GraphBLAS::NAMESPACE);
        let mut found = vec![];
        for (n, line) in src.lines().enumerate() {
            let mut in_string = false;
            let mut prev: Option<char> = None;
            let mut column = 0;
            let mut chars = line.char_indices().peekable();
            while let Some((i, c)) = chars.next() {
                if !in_string && c == '/' && chars.peek().map(|(_, c)| *c) == Some('/') {
                    break;
                }
                if line[i..].starts_with(&prefix) {
                    let name = op_name_at(line, i);
                    let starts_name = if in_string {
                        // Generic form: `"graphblas.foo"(`.
                        prev == Some('"') && line[i + name.len()..].starts_with("\"(")
                    } else {
                        !prev.is_some_and(is_prefix_char)
                    };
                    if starts_name && GraphBLAS::is_dialect_op(name) {
                        found.push((n, column, name.to_string()));
                    }
                }
                if c == '"' && prev != Some('\\') {
                    in_string = !in_string;
                }
                prev = Some(c);
                column += 1;
            }
        }
        found
    }
    /// Check that every dialect operation in `src` is declared.
    ///
    /// Returns an error pointing at the first operation that is not in
    /// [ops::OPERATIONS].
    pub fn verify_source(src: &str) -> Result<()> {
        let lines = src.lines().collect::<Vec<&str>>();
        for (n, column, name) in GraphBLAS::find_ops(src) {
            if ops::lookup(&name).is_none() {
                let msg = format!(
                    "operation '{name}' is not registered in the {} dialect",
                    GraphBLAS::NAMESPACE
                );
                let msg = diagnostic(&lines, n, column, &msg);
                return Err(anyhow::anyhow!("Unregistered operation:\n\n{msg}\n"));
            }
        }
        Ok(())
    }
}
