//! Number parsing (spec.md §4.3.3).

use num_bigint::BigInt;
use num_traits::Num;

use crate::error::{DecodeError, ErrorKind};
use crate::value::Value;

use super::Line;

/// Parses the rest of the current payload, from `start` to its end, as a
/// complete number. Used at the top level, where a number always runs to
/// end of line.
pub(crate) fn parse_number(line: &Line<'_>, start: usize, origin: Option<&str>) -> Result<Value, DecodeError> {
    parse_range(line, start, line.len(), origin)
}

/// Parses a number starting at `start`, consuming only as far as number
/// syntax extends, and returns the index just past it. Used when a number
/// sits inside an inline list/object and must stop before a `,`/`]`/`}`
/// the caller still needs to see (spec.md §4.3.3, §4.3.8, §4.3.9).
pub(crate) fn parse_number_bounded(
    line: &Line<'_>,
    start: usize,
    origin: Option<&str>,
) -> Result<(Value, usize), DecodeError> {
    let mut end = start;
    while let Some(c) = line.get(end) {
        let extends = c.is_ascii_digit()
            || matches!(c, '.' | 'e' | 'E' | '+' | '-')
            || (c == ' ' && matches!(line.get(end + 1), Some(d) if d.is_ascii_digit()));
        if !extends {
            break;
        }
        end += 1;
    }
    let value = parse_range(line, start, end, origin)?;
    Ok((value, end))
}

fn parse_range(line: &Line<'_>, start: usize, end: usize, origin: Option<&str>) -> Result<Value, DecodeError> {
    let chars: Vec<char> = (start..end).map(|i| line.get(i).expect("within range")).collect();

    // Whitespace rules checked *before* space removal (spec.md §4.3.3).
    for (i, &c) in chars.iter().enumerate() {
        if c == 'E' {
            return Err(line.err(ErrorKind::UppercaseExponent, start + i, origin));
        }
        if c == '.' {
            let before_space = i > 0 && chars[i - 1] == ' ';
            let after_space = i + 1 < chars.len() && chars[i + 1] == ' ';
            if before_space {
                return Err(line.err(ErrorKind::UnexpectedSpaceInNumber, start + i - 1, origin));
            }
            if after_space {
                return Err(line.err(ErrorKind::UnexpectedSpaceInNumber, start + i + 1, origin));
            }
        }
    }

    let digits: String = chars.iter().filter(|c| **c != ' ').collect();

    if is_integer(&digits) {
        let value = BigInt::from_str_radix(&digits, 10)
            .map_err(|_| line.err(ErrorKind::UnexpectedCharacter(digits_char(&digits)), start, origin))?;
        return Ok(Value::Int(value));
    }

    if is_float(&digits) {
        let value: f64 = digits
            .parse()
            .map_err(|_| line.err(ErrorKind::UnexpectedCharacter(digits_char(&digits)), start, origin))?;
        return Ok(Value::Float(value));
    }

    Err(line.err(ErrorKind::UnexpectedCharacter(digits_char(&digits)), start, origin))
}

fn digits_char(s: &str) -> char {
    s.chars().next().unwrap_or('?')
}

fn is_integer(s: &str) -> bool {
    let s = s.strip_prefix('-').unwrap_or(s);
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// `-? digit* . digit* ( e [+-]? digit+ )?`, excluding the bare `.`/`-.`
/// the spec calls out, and the no-dot scientific form (spec.md §4.3.3).
fn is_float(s: &str) -> bool {
    let rest = s.strip_prefix('-').unwrap_or(s);
    if rest == "." {
        return false;
    }

    let (mantissa, exponent) = match rest.split_once('e') {
        Some((m, e)) => (m, Some(e)),
        None => (rest, None),
    };

    let mantissa_ok = if let Some((int_part, frac_part)) = mantissa.split_once('.') {
        (!int_part.is_empty() || !frac_part.is_empty())
            && int_part.chars().all(|c| c.is_ascii_digit())
            && frac_part.chars().all(|c| c.is_ascii_digit())
    } else {
        // No decimal point: only valid as a float when there's an exponent
        // (the no-dot scientific form); otherwise it's the integer form.
        exponent.is_some() && !mantissa.is_empty() && mantissa.chars().all(|c| c.is_ascii_digit())
    };

    if !mantissa_ok {
        return false;
    }

    match exponent {
        None => mantissa.contains('.'),
        Some(e) => {
            let e = e.strip_prefix(['+', '-']).unwrap_or(e);
            !e.is_empty() && e.chars().all(|c| c.is_ascii_digit())
        }
    }
}
