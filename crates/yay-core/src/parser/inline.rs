//! Inline value dispatch, used for list items, map values, and anything
//! nested inside `[...]`/`{...}` (spec.md §4.3.2, bounded variant).

use crate::error::{DecodeError, ErrorKind};
use crate::value::Value;

use super::{bytes, list, map, numbers, strings, Line};

/// Parses one inline value starting at `chars[idx]` and returns it along
/// with the index just past it. Unlike [`super::single_value`], this never
/// consumes a whole `Text` token — callers (inline lists, inline maps,
/// property values) are responsible for checking what follows.
pub(crate) fn parse_value(line: &Line<'_>, idx: usize, origin: Option<&str>) -> Result<(Value, usize), DecodeError> {
    match line.get(idx) {
        None => Err(line.err(ErrorKind::NoValue, idx, origin)),
        Some(' ') => Err(line.err(ErrorKind::UnexpectedLeadingSpace, idx, origin)),
        Some(q @ ('"' | '\'')) => {
            let (s, next) = strings::parse_quoted(line, idx, q, origin)?;
            Ok((Value::String(s), next))
        }
        Some('[') => list::parse_inline_list(line, idx, origin),
        Some('{') => map::parse_inline_map(line, idx, origin),
        Some('<') => {
            if has_closing_angle(line, idx) {
                bytes::parse_inline_bytes(line, idx, origin)
            } else {
                Err(line.err(ErrorKind::UnmatchedAngleBracket, idx, origin))
            }
        }
        Some(c) => {
            if let Some((value, next)) = try_keyword(line, idx) {
                return Ok((value, next));
            }
            if is_number_start(line, idx) {
                return numbers::parse_number_bounded(line, idx, origin);
            }
            Err(line.err(ErrorKind::UnexpectedCharacter(c), idx, origin))
        }
    }
}

fn try_keyword(line: &Line<'_>, idx: usize) -> Option<(Value, usize)> {
    for (word, value) in [
        ("null", Value::Null),
        ("true", Value::Bool(true)),
        ("false", Value::Bool(false)),
        ("nan", Value::Float(f64::NAN)),
        ("infinity", Value::Float(f64::INFINITY)),
        ("-infinity", Value::Float(f64::NEG_INFINITY)),
    ] {
        let word_chars: Vec<char> = word.chars().collect();
        if matches_word(line, idx, &word_chars) {
            return Some((value, idx + word_chars.len()));
        }
    }
    None
}

fn matches_word(line: &Line<'_>, idx: usize, word: &[char]) -> bool {
    for (offset, &wc) in word.iter().enumerate() {
        if line.get(idx + offset) != Some(wc) {
            return false;
        }
    }
    !matches!(line.get(idx + word.len()), Some(c) if c.is_ascii_alphanumeric() || c == '_')
}

fn is_number_start(line: &Line<'_>, idx: usize) -> bool {
    match line.get(idx) {
        Some(c) if c.is_ascii_digit() => true,
        Some('-') => matches!(line.get(idx + 1), Some(c) if c.is_ascii_digit() || c == '.'),
        Some('.') => matches!(line.get(idx + 1), Some(c) if c.is_ascii_digit()),
        _ => false,
    }
}

fn has_closing_angle(line: &Line<'_>, idx: usize) -> bool {
    let mut i = idx + 1;
    while let Some(c) = line.get(i) {
        if c == '>' {
            return true;
        }
        i += 1;
    }
    false
}
