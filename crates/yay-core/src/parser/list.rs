//! List parsing: inline `[...]` (spec.md §4.3.8) and multiline `- `
//! blocks (spec.md §4.3.6).

use crate::error::{DecodeError, ErrorKind};
use crate::lexer::TokenKind;
use crate::value::Value;

use super::{inline, map, single_value, Cursor, Line};

/// Parses `[...]` starting at `chars[start]` (the `[`).
pub(crate) fn parse_inline_list(
    line: &Line<'_>,
    start: usize,
    origin: Option<&str>,
) -> Result<(Value, usize), DecodeError> {
    if line.get(start + 1) == Some(' ') {
        return Err(line.err(ErrorKind::UnexpectedSpaceAfterOpen('['), start + 1, origin));
    }

    let mut idx = start + 1;
    let mut items = Vec::new();

    if line.get(idx) == Some(']') {
        return Ok((Value::List(items), idx + 1));
    }

    loop {
        let (value, next) = inline::parse_value(line, idx, origin)?;
        items.push(value);
        idx = next;

        match line.get(idx) {
            Some(',') => {
                match line.get(idx + 1) {
                    Some(']') => {
                        idx += 2;
                        break;
                    }
                    Some(' ') => {
                        if line.get(idx + 2) == Some(' ') {
                            return Err(line.err(ErrorKind::UnexpectedSpaceAfterComma, idx + 2, origin));
                        }
                        idx += 2;
                    }
                    _ => return Err(line.err(ErrorKind::ExpectedSpaceAfterComma, idx, origin)),
                }
            }
            Some(']') => {
                idx += 1;
                break;
            }
            Some(' ') => {
                match line.get(idx + 1) {
                    Some(']') => return Err(line.err(ErrorKind::UnexpectedSpaceBeforeClose(']'), idx, origin)),
                    Some(',') => return Err(line.err(ErrorKind::UnexpectedSpaceBeforeComma, idx, origin)),
                    _ => return Err(line.err(ErrorKind::UnexpectedCharacter(' '), idx, origin)),
                }
            }
            None => return Err(line.err(ErrorKind::UnexpectedNewlineInInlineArray, idx, origin)),
            Some(c) => return Err(line.err(ErrorKind::UnexpectedCharacter(c), idx, origin)),
        }
    }

    Ok((Value::List(items), idx))
}

/// Parses a multiline list entered at a `Start` token (spec.md §4.3.6).
/// `cur` must be positioned at that `Start`. `min_indent`, when set, is
/// unused by the termination check itself (termination is driven by the
/// lexer's own Stop/Start pairing) but documents the caller's intent that
/// this list must not swallow a sibling at a shallower column.
pub(crate) fn parse_multiline_list(
    cur: &mut Cursor<'_>,
    list_indent: u32,
    _min_indent: Option<u32>,
    origin: Option<&str>,
) -> Result<Value, DecodeError> {
    let start_tok = cur
        .bump()
        .expect("caller verified a Start token is present");
    debug_assert!(matches!(start_tok.kind, TokenKind::Start));

    let mut items = Vec::new();

    loop {
        cur.skip_breaks();
        let item = parse_list_item(cur, list_indent, origin)?;
        items.push(item);
        cur.skip_breaks();

        let continues = matches!(
            cur.peek(),
            Some(tok) if matches!(tok.kind, TokenKind::Stop) && tok.indent == list_indent
        ) && matches!(
            cur.peek_at(1),
            Some(next) if matches!(next.kind, TokenKind::Start) && next.indent == list_indent
        );

        if continues {
            cur.bump();
            cur.bump();
        } else {
            break;
        }
    }

    Ok(Value::List(items))
}

fn parse_list_item(
    cur: &mut Cursor<'_>,
    list_indent: u32,
    origin: Option<&str>,
) -> Result<Value, DecodeError> {
    if let Some(tok) = cur.peek() {
        if matches!(tok.kind, TokenKind::Start) {
            let nested_indent = tok.indent;
            return parse_multiline_list(cur, nested_indent, Some(list_indent), origin);
        }
        if let TokenKind::Text(s) = &tok.kind {
            if let Some(rest) = s.strip_prefix("- ") {
                let line_no = tok.line_no;
                let col = tok.col;
                if rest.starts_with(' ') {
                    return Err(ErrorKind::UnexpectedSpaceAfterDash.at(
                        line_no as usize,
                        (col + 1) as usize,
                        origin,
                    ));
                }
                let value = parse_inline_bullet(rest, line_no, col + 2, origin)?;
                cur.bump();
                return Ok(Value::List(vec![value]));
            }
        }
    }

    let mut value = single_value(cur, origin)?;

    if let Value::Map(ref mut map_value) = value {
        merge_sibling_properties(cur, list_indent, map_value, origin)?;
    }

    group_trailing_nested_list(cur, list_indent, value, origin)
}

/// After a list item's own value, a sibling `Start("- ")` at a deeper
/// indent doesn't start a new top-level item — it continues the current
/// one, folding the value and the nested bullets into one inner list
/// (spec.md §4.3.6 step 4, the `- a \n  - b` nesting pattern).
fn group_trailing_nested_list(
    cur: &mut Cursor<'_>,
    list_indent: u32,
    value: Value,
    origin: Option<&str>,
) -> Result<Value, DecodeError> {
    let mut lookahead = 0;
    while matches!(cur.peek_at(lookahead).map(|t| &t.kind), Some(TokenKind::Break)) {
        lookahead += 1;
    }
    let nests = matches!(
        cur.peek_at(lookahead),
        Some(tok) if matches!(tok.kind, TokenKind::Start) && tok.indent > list_indent
    );
    if !nests {
        return Ok(value);
    }

    cur.skip_breaks();
    let nested_indent = cur.peek().expect("checked above").indent;
    let nested = parse_multiline_list(cur, nested_indent, Some(list_indent), origin)?;

    let mut items = vec![value];
    if let Value::List(inner) = nested {
        items.extend(inner);
    }
    Ok(Value::List(items))
}

fn merge_sibling_properties(
    cur: &mut Cursor<'_>,
    list_indent: u32,
    map_value: &mut crate::value::Map,
    origin: Option<&str>,
) -> Result<(), DecodeError> {
    loop {
        let matches_extra_property = match cur.peek() {
            Some(tok) if tok.indent > list_indent => match &tok.kind {
                TokenKind::Text(s) => {
                    let chars: Vec<char> = s.chars().collect();
                    super::find_top_level_colon(&chars).is_some()
                }
                _ => false,
            },
            _ => false,
        };
        if !matches_extra_property {
            break;
        }
        let tok = cur.peek().expect("checked above");
        let chars: Vec<char> = match &tok.kind {
            TokenKind::Text(s) => s.chars().collect(),
            _ => unreachable!(),
        };
        let line = Line::new(&chars, tok.line_no, tok.col);
        let key_indent = tok.indent;
        let (key, val) = map::parse_property(cur, &line, key_indent, origin)?;
        map_value.insert(key, val);
    }
    Ok(())
}

/// Recursively parses an inline nested bullet such as `- - a` (spec.md
/// §4.3.6).
fn parse_inline_bullet(s: &str, line_no: u32, col: u32, origin: Option<&str>) -> Result<Value, DecodeError> {
    if let Some(rest) = s.strip_prefix("- ") {
        if rest.starts_with(' ') {
            return Err(ErrorKind::UnexpectedSpaceAfterDash.at(
                line_no as usize,
                (col + 1) as usize,
                origin,
            ));
        }
        let inner = parse_inline_bullet(rest, line_no, col + 2, origin)?;
        return Ok(Value::List(vec![inner]));
    }

    let chars: Vec<char> = s.chars().collect();
    let line = Line::new(&chars, line_no, col);
    let (value, next) = inline::parse_value(&line, 0, origin)?;
    if next != chars.len() {
        return Err(line.err(ErrorKind::UnexpectedCharacter(chars[next]), next, origin));
    }
    Ok(value)
}
