//! Map parsing: root/nested maps (spec.md §4.3.7) and inline `{...}`
//! (spec.md §4.3.9).

use crate::error::{DecodeError, ErrorKind};
use crate::lexer::TokenKind;
use crate::value::{Map, Value};

use super::{block_string, bytes, inline, list, strings, Cursor, Line};

/// Parses every top-level `key: value` line into one map (spec.md §4.3.1,
/// §4.3.7 root map).
pub(crate) fn parse_root_map(cur: &mut Cursor<'_>, origin: Option<&str>) -> Result<Value, DecodeError> {
    let mut map_value = Map::new();
    loop {
        cur.skip_stops_and_breaks();
        let Some(tok) = cur.peek() else { break };
        if tok.indent != 0 {
            break;
        }
        let TokenKind::Text(s) = &tok.kind else { break };
        let chars: Vec<char> = s.chars().collect();
        if chars.first() == Some(&'{') || super::find_top_level_colon(&chars).is_none() {
            break;
        }
        let line = Line::new(&chars, tok.line_no, tok.col);
        let (key, val) = parse_property(cur, &line, 0, origin)?;
        map_value.insert(key, val);
    }
    Ok(Value::Map(map_value))
}

/// Parses one `key: value` line, including any nested content on
/// following indented lines. `cur` must be positioned at the key's `Text`
/// token; `line` is that token's payload and `key_indent` its indent.
/// Used for root-map entries, nested-map entries, and the single-property
/// map a list item's bare `key: value` line produces (spec.md §4.3.6 step
/// 3, §4.3.7).
pub(crate) fn parse_property(
    cur: &mut Cursor<'_>,
    line: &Line<'_>,
    key_indent: u32,
    origin: Option<&str>,
) -> Result<(String, Value), DecodeError> {
    cur.bump();

    let colon_idx = super::find_top_level_colon(line.chars())
        .expect("caller verified a top-level colon is present");
    let key = parse_key(line, 0, colon_idx, origin)?;
    let value_start = validate_separator(line, colon_idx, origin)?;

    let value = if value_start >= line.len() {
        parse_nested_property_value(cur, key_indent, line, colon_idx, origin)?
    } else {
        match line.get(value_start) {
            Some('`') => {
                let sub = line.subline(value_start);
                let s = block_string::parse_property_block_string(cur, &sub, key_indent, origin)?;
                Value::String(s)
            }
            Some('>') => {
                let sub = line.subline(value_start);
                let b = bytes::parse_property_block_bytes(cur, &sub, key_indent, origin)?;
                Value::Bytes(b)
            }
            _ => {
                let (value, next) = inline::parse_value(line, value_start, origin)?;
                if next != line.len() {
                    return Err(line.err(
                        ErrorKind::UnexpectedCharacter(line.get(next).expect("checked above")),
                        next,
                        origin,
                    ));
                }
                value
            }
        }
    };

    Ok((key, value))
}

fn parse_key(
    line: &Line<'_>,
    start: usize,
    colon_idx: usize,
    origin: Option<&str>,
) -> Result<String, DecodeError> {
    if colon_idx > start && line.get(colon_idx - 1) == Some(' ') {
        return Err(line.err(ErrorKind::UnexpectedSpaceBeforeColon, colon_idx - 1, origin));
    }
    match line.get(start) {
        Some(q @ ('"' | '\'')) => {
            let (s, next) = strings::parse_quoted(line, start, q, origin)?;
            if next != colon_idx {
                return Err(line.err(ErrorKind::UnexpectedSpaceBeforeColon, next, origin));
            }
            Ok(s)
        }
        None => Err(line.err(ErrorKind::MissingKey, start, origin)),
        _ => {
            if colon_idx == start {
                return Err(line.err(ErrorKind::MissingKey, start, origin));
            }
            for i in start..colon_idx {
                let c = line.get(i).expect("within key range");
                let valid = c.is_ascii_alphanumeric() || c == '_' || c == '-';
                if !valid {
                    let kind = if i == start {
                        ErrorKind::InvalidKey
                    } else {
                        ErrorKind::InvalidKeyCharacter
                    };
                    return Err(line.err(kind, i, origin));
                }
            }
            Ok((start..colon_idx).map(|i| line.get(i).expect("within key range")).collect())
        }
    }
}

fn validate_separator(line: &Line<'_>, colon_idx: usize, origin: Option<&str>) -> Result<usize, DecodeError> {
    match line.get(colon_idx + 1) {
        None => Ok(colon_idx + 1),
        Some(' ') => {
            if line.get(colon_idx + 2) == Some(' ') {
                return Err(line.err(ErrorKind::UnexpectedSpaceAfterColon, colon_idx + 2, origin));
            }
            Ok(colon_idx + 2)
        }
        Some(_) => Err(line.err(ErrorKind::ExpectedSpaceAfterColon, colon_idx, origin)),
    }
}

fn parse_nested_property_value(
    cur: &mut Cursor<'_>,
    key_indent: u32,
    key_line: &Line<'_>,
    colon_idx: usize,
    origin: Option<&str>,
) -> Result<Value, DecodeError> {
    cur.skip_breaks();

    match cur.peek() {
        Some(tok) if matches!(tok.kind, TokenKind::Start) && tok.indent > key_indent => {
            let list_indent = tok.indent;
            list::parse_multiline_list(cur, list_indent, Some(key_indent), origin)
        }
        Some(tok) if matches!(tok.kind, TokenKind::Text(_)) && tok.indent > key_indent => {
            let (s, line_no, col, indent) = match &tok.kind {
                TokenKind::Text(s) => (s.clone(), tok.line_no, tok.col, tok.indent),
                _ => unreachable!("matched above"),
            };
            let chars: Vec<char> = s.chars().collect();
            if matches!(
                chars.first(),
                Some('{') | Some('[') | Some('<') | Some('`') | Some('>')
            ) {
                return Err(ErrorKind::UnexpectedIndent.at(line_no as usize, col as usize, origin));
            }
            if matches!(chars.first(), Some('"') | Some('\'')) {
                return parse_concatenated_strings(cur, indent, (line_no, col), origin);
            }
            if super::find_top_level_colon(&chars).is_some() {
                return parse_nested_map(cur, origin);
            }
            Err(ErrorKind::UnexpectedIndent.at(line_no as usize, col as usize, origin))
        }
        _ => Err(key_line.err(ErrorKind::ExpectedValueAfterProperty, colon_idx, origin)),
    }
}

fn parse_nested_map(cur: &mut Cursor<'_>, origin: Option<&str>) -> Result<Value, DecodeError> {
    let first_indent = cur.peek().expect("caller verified a Text token is present").indent;
    let mut map_value = Map::new();
    loop {
        cur.skip_breaks();
        let Some(tok) = cur.peek() else { break };
        if tok.indent != first_indent {
            break;
        }
        let TokenKind::Text(s) = &tok.kind else { break };
        let chars: Vec<char> = s.chars().collect();
        if super::find_top_level_colon(&chars).is_none() {
            break;
        }
        let line = Line::new(&chars, tok.line_no, tok.col);
        let (key, val) = parse_property(cur, &line, first_indent, origin)?;
        map_value.insert(key, val);
    }
    Ok(Value::Map(map_value))
}

fn parse_concatenated_strings(
    cur: &mut Cursor<'_>,
    first_indent: u32,
    fallback_loc: (u32, u32),
    origin: Option<&str>,
) -> Result<Value, DecodeError> {
    let mut parts = Vec::new();
    loop {
        cur.skip_breaks();
        let matched = match cur.peek() {
            Some(tok) if matches!(tok.kind, TokenKind::Text(_)) && tok.indent == first_indent => {
                let s = match &tok.kind {
                    TokenKind::Text(s) => s.clone(),
                    _ => unreachable!("matched above"),
                };
                let chars: Vec<char> = s.chars().collect();
                match chars.first().copied() {
                    Some(q @ ('"' | '\'')) => {
                        let line = Line::new(&chars, tok.line_no, tok.col);
                        match strings::parse_quoted(&line, 0, q, origin) {
                            Ok((decoded, next)) if next == chars.len() => {
                                parts.push(decoded);
                                cur.bump();
                                true
                            }
                            _ => false,
                        }
                    }
                    _ => false,
                }
            }
            _ => false,
        };
        if !matched {
            break;
        }
    }
    if parts.len() < 2 {
        return Err(ErrorKind::UnexpectedIndent.at(fallback_loc.0 as usize, fallback_loc.1 as usize, origin));
    }
    Ok(Value::String(parts.concat()))
}

/// Parses `{key: val, ...}` starting at `chars[start]` (the `{`) (spec.md
/// §4.3.9).
pub(crate) fn parse_inline_map(
    line: &Line<'_>,
    start: usize,
    origin: Option<&str>,
) -> Result<(Value, usize), DecodeError> {
    if line.get(start + 1) == Some(' ') {
        return Err(line.err(ErrorKind::UnexpectedSpaceAfterOpen('{'), start + 1, origin));
    }

    let mut idx = start + 1;
    let mut map_value = Map::new();

    if line.get(idx) == Some('}') {
        return Ok((Value::Map(map_value), idx + 1));
    }

    loop {
        let key_start = idx;
        let colon_idx = find_colon_in_range(line, key_start).ok_or_else(|| {
            line.err(ErrorKind::MissingKey, key_start, origin)
        })?;
        let key = match parse_key(line, key_start, colon_idx, origin) {
            Ok(k) => k,
            Err(e) if key_start == start + 1 && e.kind == ErrorKind::InvalidKey => {
                return Err(ErrorKind::InvalidKey.at(e.line, line.col(start) as usize, origin));
            }
            Err(e) => return Err(e),
        };
        let value_start = validate_separator(line, colon_idx, origin)?;
        let (value, next) = inline::parse_value(line, value_start, origin)?;
        map_value.insert(key, value);
        idx = next;

        match line.get(idx) {
            Some(',') => {
                match line.get(idx + 1) {
                    Some('}') => {
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
            Some('}') => {
                idx += 1;
                break;
            }
            Some(' ') => {
                match line.get(idx + 1) {
                    Some('}') => return Err(line.err(ErrorKind::UnexpectedSpaceBeforeClose('}'), idx, origin)),
                    Some(',') => return Err(line.err(ErrorKind::UnexpectedSpaceBeforeComma, idx, origin)),
                    _ => return Err(line.err(ErrorKind::UnexpectedCharacter(' '), idx, origin)),
                }
            }
            None => return Err(line.err(ErrorKind::UnterminatedInlineObject, idx, origin)),
            Some(c) => return Err(line.err(ErrorKind::UnexpectedCharacter(c), idx, origin)),
        }
    }

    Ok((Value::Map(map_value), idx))
}

fn find_colon_in_range(line: &Line<'_>, start: usize) -> Option<usize> {
    let mut i = start;
    let mut quote: Option<char> = None;
    while let Some(c) = line.get(i) {
        match quote {
            Some(q) => {
                if c == '\\' {
                    i += 1;
                } else if c == q {
                    quote = None;
                }
            }
            None => match c {
                '"' | '\'' => quote = Some(c),
                ':' => return Some(i),
                '}' | ',' => return None,
                _ => {}
            },
        }
        i += 1;
    }
    None
}
