//! Byte-literal parsing: inline `<hex>` and block `>` forms (spec.md
//! §4.3.10, §4.3.11).

use crate::error::{DecodeError, ErrorKind};
use crate::value::Value;

use super::{Cursor, Line};
use crate::lexer::TokenKind;

/// Parses `<hex>` starting at `chars[start]` (the `<`). Returns the
/// decoded bytes and the index just past the closing `>`.
pub(crate) fn parse_inline_bytes(
    line: &Line<'_>,
    start: usize,
    origin: Option<&str>,
) -> Result<(Value, usize), DecodeError> {
    if line.get(start + 1) == Some(' ') {
        return Err(line.err(ErrorKind::UnexpectedSpaceAfterOpen('<'), start + 1, origin));
    }

    let mut close = None;
    let mut i = start + 1;
    while let Some(c) = line.get(i) {
        if c == '>' {
            close = Some(i);
            break;
        }
        i += 1;
    }
    let close = close.ok_or_else(|| line.err(ErrorKind::UnmatchedAngleBracket, start, origin))?;

    if close > start + 1 && line.get(close - 1) == Some(' ') {
        return Err(line.err(ErrorKind::UnexpectedSpaceBeforeClose('>'), close - 1, origin));
    }

    let bytes = decode_hex_run(line, start + 1, close, origin)?;
    Ok((Value::Bytes(bytes), close + 1))
}

fn decode_hex_run(
    line: &Line<'_>,
    start: usize,
    end: usize,
    origin: Option<&str>,
) -> Result<Vec<u8>, DecodeError> {
    let mut digits = String::new();
    for i in start..end {
        let c = line.get(i).expect("range within line bounds");
        if c == ' ' {
            continue;
        }
        if c.is_ascii_digit() || ('a'..='f').contains(&c) {
            digits.push(c);
        } else if ('A'..='F').contains(&c) {
            return Err(line.err(ErrorKind::UppercaseHexDigit, i, origin));
        } else {
            return Err(line.err(ErrorKind::InvalidHexDigit, i, origin));
        }
    }
    if digits.len() % 2 != 0 {
        return Err(line.err(ErrorKind::OddHexDigits, end, origin));
    }
    let mut out = Vec::with_capacity(digits.len() / 2);
    let chars: Vec<char> = digits.chars().collect();
    for pair in chars.chunks(2) {
        let s: String = pair.iter().collect();
        let byte = u8::from_str_radix(&s, 16).expect("validated hex digits");
        out.push(byte);
    }
    Ok(out)
}

/// Root/list-context block bytes (spec.md §4.3.11). `line` is the `>`
/// token's full payload; `indent` is that token's own indent.
pub(crate) fn parse_root_block_bytes(
    cur: &mut Cursor<'_>,
    line: &Line<'_>,
    indent: u32,
    origin: Option<&str>,
) -> Result<Value, DecodeError> {
    let first_line_hex = strip_comment(line, 1);
    if first_line_hex.trim().is_empty() && line.len() <= 1 {
        return Err(line.err(ErrorKind::ExpectedHexOrCommentInHexBlock, 0, origin));
    }

    let mut digits = first_line_hex.chars().filter(|c| *c != ' ').collect::<String>();
    collect_hex_lines(cur, indent, &mut digits);

    let bytes = decode_digit_string(&digits, line, origin)?;
    Ok(Value::Bytes(bytes))
}

/// Property-context block bytes (spec.md §4.3.11). The `>` must be alone
/// on the key line, optionally with a `#` comment.
pub(crate) fn parse_property_block_bytes(
    cur: &mut Cursor<'_>,
    line: &Line<'_>,
    indent: u32,
    origin: Option<&str>,
) -> Result<Vec<u8>, DecodeError> {
    let rest = strip_comment(line, 1);
    if !rest.trim().is_empty() {
        return Err(line.err(
            ErrorKind::ExpectedNewlineAfterBlockLeaderInProperty,
            1,
            origin,
        ));
    }

    let mut digits = String::new();
    collect_hex_lines(cur, indent, &mut digits);
    decode_digit_string(&digits, line, origin)
}

fn strip_comment(line: &Line<'_>, start: usize) -> String {
    let mut out = String::new();
    for i in start..line.len() {
        let c = line.get(i).unwrap();
        if c == '#' {
            break;
        }
        out.push(c);
    }
    out
}

fn collect_hex_lines(cur: &mut Cursor<'_>, base_indent: u32, digits: &mut String) {
    loop {
        match cur.peek() {
            None => break,
            Some(tok) => match &tok.kind {
                TokenKind::Break => {
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
                        let stripped: String = match s.split_once('#') {
                            Some((before, _)) => before.to_string(),
                            None => s.clone(),
                        };
                        digits.extend(stripped.chars().filter(|c| *c != ' '));
                        cur.bump();
                    } else {
                        break;
                    }
                }
            },
        }
    }
}

fn decode_digit_string(
    digits: &str,
    line: &Line<'_>,
    origin: Option<&str>,
) -> Result<Vec<u8>, DecodeError> {
    for (i, c) in digits.chars().enumerate() {
        if ('A'..='F').contains(&c) {
            return Err(line.err(ErrorKind::UppercaseHexDigit, i, origin));
        }
        if !(c.is_ascii_digit() || ('a'..='f').contains(&c)) {
            return Err(line.err(ErrorKind::InvalidHexDigit, i, origin));
        }
    }
    if digits.len() % 2 != 0 {
        return Err(line.err(ErrorKind::OddHexDigits, digits.len(), origin));
    }
    let chars: Vec<char> = digits.chars().collect();
    let mut out = Vec::with_capacity(digits.len() / 2);
    for pair in chars.chunks(2) {
        let s: String = pair.iter().collect();
        out.push(u8::from_str_radix(&s, 16).expect("validated hex digits"));
    }
    Ok(out)
}
