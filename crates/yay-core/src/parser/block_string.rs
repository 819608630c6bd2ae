//! Block string parsing (spec.md §4.3.5).

use crate::error::{DecodeError, ErrorKind};
use crate::value::Value;

use super::{Cursor, Line};
use crate::lexer::TokenKind;

enum ContentLine {
    Text(u32, String),
    Blank,
}

/// Collects every token whose indent is strictly greater than
/// `base_indent`, treating `Break` as a blank line that doesn't by itself
/// end the block (spec.md §4.3.5). Trailing blank lines are dropped.
fn collect(cur: &mut Cursor<'_>, base_indent: u32) -> Vec<ContentLine> {
    let mut out = Vec::new();
    loop {
        match cur.peek() {
            None => break,
            Some(tok) => match &tok.kind {
                TokenKind::Break => {
                    out.push(ContentLine::Blank);
                    cur.bump();
                }
                TokenKind::Start | TokenKind::Stop => {
                    if tok.indent > base_indent {
                        cur.bump();
                    } else {
                        break;
                    }
                }
                TokenKind::Text(s) => {
                    if tok.indent > base_indent {
                        out.push(ContentLine::Text(tok.indent, s.clone()));
                        cur.bump();
                    } else {
                        break;
                    }
                }
            },
        }
    }
    while matches!(out.last(), Some(ContentLine::Blank)) {
        out.pop();
    }
    out
}

fn normalize(lines: &[ContentLine]) -> Vec<String> {
    let min_indent = lines
        .iter()
        .filter_map(|l| match l {
            ContentLine::Text(indent, _) => Some(*indent),
            ContentLine::Blank => None,
        })
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|l| match l {
            ContentLine::Text(indent, payload) => {
                " ".repeat((indent - min_indent) as usize) + payload
            }
            ContentLine::Blank => String::new(),
        })
        .collect()
}

fn assemble(
    same_line: Option<String>,
    collected: Vec<ContentLine>,
    leading_newline: bool,
    err_at: impl Fn(ErrorKind) -> DecodeError,
) -> Result<String, DecodeError> {
    let mut lines = Vec::new();
    if let Some(first) = same_line {
        lines.push(first);
    }
    lines.extend(normalize(&collected));

    if lines.is_empty() {
        return Err(err_at(ErrorKind::EmptyBlockStringNotAllowed));
    }

    let mut out = String::new();
    if leading_newline {
        out.push('\n');
    }
    out.push_str(&lines.join("\n"));
    out.push('\n');
    Ok(out)
}

/// Root/list-context block string (spec.md §4.3.5). `line` is the
/// backtick token's full payload; `indent` is that token's own indent.
pub(crate) fn parse_root_block_string(
    cur: &mut Cursor<'_>,
    line: &Line<'_>,
    indent: u32,
    origin: Option<&str>,
) -> Result<Value, DecodeError> {
    let chars_len = line.len();
    if chars_len > 1 && line.get(1) != Some(' ') {
        return Err(line.err(ErrorKind::UnexpectedCharacter('`'), 0, origin));
    }
    let same_line = if chars_len > 1 {
        Some((2..chars_len).map(|i| line.get(i).unwrap()).collect::<String>())
    } else {
        None
    };

    let collected = collect(cur, indent);
    let leading_newline = same_line.is_none();
    let text = assemble(same_line, collected, leading_newline, |kind| {
        line.err(kind, 0, origin)
    })?;
    Ok(Value::String(text))
}

/// Property-context block string (spec.md §4.3.5). The backtick must be
/// alone on its line, optionally followed by a `#` comment.
pub(crate) fn parse_property_block_string(
    cur: &mut Cursor<'_>,
    line: &Line<'_>,
    indent: u32,
    origin: Option<&str>,
) -> Result<String, DecodeError> {
    let rest: String = (1..line.len()).map(|i| line.get(i).unwrap()).collect();
    let trimmed = rest.trim_start();
    if !trimmed.is_empty() && !trimmed.starts_with('#') {
        return Err(line.err(ErrorKind::ExpectedNewlineAfterBlockLeaderInProperty, 1, origin));
    }

    let collected = collect(cur, indent);
    assemble(None, collected, false, |kind| line.err(kind, 0, origin))
}
