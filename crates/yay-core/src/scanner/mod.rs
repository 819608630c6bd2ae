//! Scanner: UTF-8 legality and scan-line splitting (spec.md §4.1).
//!
//! The scanner is the first of the decoder's three stages. It rejects a
//! byte buffer outright (BOM, bad UTF-8, forbidden code points, tabs) before
//! anything downstream ever sees a `char`, then splits what remains into
//! [`ScanLine`]s: `(indent, leader, payload, line_no)` tuples with the
//! indentation and list-marker bookkeeping already stripped out (spec.md
//! §3.2).


use crate::error::{DecodeError, ErrorKind};

/// Whether a scan line opens a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Leader {
    None,
    /// The two-character `- ` marker (spec.md Glossary).
    Dash,
}

/// One physical line of source, with indent and leader already stripped
/// from `payload` (spec.md §3.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScanLine {
    pub payload: String,
    pub indent: u32,
    pub leader: Leader,
    pub line_no: u32,
    /// One-based column of `payload`'s first character on the original
    /// line (spec.md I-2): `indent + 1`, or `indent + 3` when `leader` is
    /// `Dash` (past the two-character marker).
    pub payload_col: u32,
}

fn err(kind: ErrorKind, line: u32, col: u32, origin: Option<&str>) -> DecodeError {
    kind.at(line as usize, col as usize, origin)
}

/// Runs the Scanner stage over a raw byte buffer (spec.md §4.1).
pub(crate) fn scan(source: &[u8], origin: Option<&str>) -> Result<Vec<ScanLine>, DecodeError> {
    if source.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return Err(err(ErrorKind::IllegalBom, 1, 1, origin));
    }

    if let Some(offset) = find_surrogate_encoding(source) {
        let (line, col) = locate_byte_offset(source, offset);
        return Err(err(ErrorKind::IllegalSurrogate, line, col, origin));
    }

    let text = std::str::from_utf8(source).map_err(|e| {
        let (line, col) = locate_byte_offset(source, e.valid_up_to());
        err(ErrorKind::InvalidUtf8, line, col, origin)
    })?;

    validate_code_points(text, origin)?;

    let mut lines = Vec::new();
    let mut line_no: u32 = 0;
    for raw in text.split_inclusive('\n') {
        line_no += 1;
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        if let Some(scan_line) = scan_one_line(line, line_no, origin)? {
            lines.push(scan_line);
        }
    }
    Ok(lines)
}

/// Converts a byte offset into the 1-based `(line, col)` of the character
/// it falls within, counting columns in `char`s rather than bytes.
fn locate_byte_offset(source: &[u8], offset: usize) -> (u32, u32) {
    let mut line = 1u32;
    let mut col = 1u32;
    let mut seen = 0usize;
    // `source[..offset]` is guaranteed valid UTF-8 by `Utf8Error::valid_up_to`.
    let valid = std::str::from_utf8(&source[..offset]).unwrap_or_default();
    for ch in valid.chars() {
        seen += ch.len_utf8();
        if seen > offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

fn validate_code_points(text: &str, origin: Option<&str>) -> Result<(), DecodeError> {
    let mut line = 1u32;
    let mut col = 1u32;
    for ch in text.chars() {
        if ch == '\n' {
            line += 1;
            col = 1;
            continue;
        }
        if ch == '\t' {
            return Err(err(ErrorKind::TabNotAllowed, line, col, origin));
        }
        if !is_allowed_code_point(ch) {
            return Err(err(
                ErrorKind::ForbiddenCodePoint(format_code_point(ch)),
                line,
                col,
                origin,
            ));
        }
        col += 1;
    }
    Ok(())
}

/// Scans raw bytes for a WTF-8/CESU-8 lone-surrogate encoding (`ED A0-BF
/// 80-BF`, the three-byte form a well-formed UTF-8 decoder never produces
/// but that a byte buffer can still contain) and returns the offset of its
/// first byte. This runs before [`std::str::from_utf8`] so such input is
/// reported as `IllegalSurrogate` rather than the more generic
/// `InvalidUtf8` (spec.md §8 scenario 13).
fn find_surrogate_encoding(source: &[u8]) -> Option<usize> {
    let mut i = 0;
    while i + 3 <= source.len() {
        if source[i] == 0xED
            && (0xA0..=0xBF).contains(&source[i + 1])
            && (0x80..=0xBF).contains(&source[i + 2])
        {
            return Some(i);
        }
        i += 1;
    }
    None
}

/// spec.md §4.1's allowed-code-point predicate. Lone surrogates reaching
/// here (via `\u{D800}` escapes inside quoted strings, validated
/// separately in `parser::strings`) are the one `IllegalSurrogate` source
/// this predicate itself doesn't need to special-case — raw-byte
/// surrogate encodings are already rejected earlier, by
/// `find_surrogate_encoding`.
fn is_allowed_code_point(ch: char) -> bool {
    let cp = ch as u32;
    cp == 0x0A
        || (0x20..=0x7E).contains(&cp)
        || (0xA0..=0xD7FF).contains(&cp)
        || ((0xE000..=0xFFFD).contains(&cp) && !(0xFDD0..=0xFDEF).contains(&cp))
        || (cp >= 0x10000 && cp <= 0x10FFFF && (cp & 0xFFFF) < 0xFFFE)
}

fn format_code_point(ch: char) -> String {
    format!("U+{:04X}", ch as u32)
}

/// Splits one already-validated line into indent/leader/payload, or `None`
/// if the line is a top-level (`indent == 0`) comment and should be
/// dropped entirely (spec.md §4.1).
fn scan_one_line(
    line: &str,
    line_no: u32,
    origin: Option<&str>,
) -> Result<Option<ScanLine>, DecodeError> {
    if line.ends_with(' ') {
        let col = line.chars().count() as u32;
        return Err(err(ErrorKind::UnexpectedTrailingSpace, line_no, col, origin));
    }

    let indent = line.chars().take_while(|c| *c == ' ').count() as u32;
    let rest: String = line.chars().skip(indent as usize).collect();

    if indent == 0 && rest.starts_with('#') {
        return Ok(None);
    }

    let (leader, payload) = split_leader(&rest, indent, line_no, origin)?;
    let payload_col = indent + if leader == Leader::Dash { 3 } else { 1 };

    Ok(Some(ScanLine {
        payload,
        indent,
        leader,
        line_no,
        payload_col,
    }))
}

fn split_leader(
    s: &str,
    indent: u32,
    line_no: u32,
    origin: Option<&str>,
) -> Result<(Leader, String), DecodeError> {
    if let Some(rest) = s.strip_prefix("- ") {
        if rest.starts_with(' ') {
            return Err(err(
                ErrorKind::UnexpectedSpaceAfterDash,
                line_no,
                indent + 3,
                origin,
            ));
        }
        return Ok((Leader::Dash, rest.to_owned()));
    }

    if s == "-" {
        return Err(err(
            ErrorKind::ExpectedSpaceAfterDash,
            line_no,
            indent + 2,
            origin,
        ));
    }

    if let Some(after_dash) = s.strip_prefix('-') {
        if s == "-infinity" {
            return Ok((Leader::None, s.to_owned()));
        }
        let next = after_dash.chars().next();
        let ok = matches!(next, Some(c) if c.is_ascii_digit() || c == '.');
        if !ok {
            return Err(err(
                ErrorKind::ExpectedSpaceAfterDash,
                line_no,
                indent + 2,
                origin,
            ));
        }
        return Ok((Leader::None, s.to_owned()));
    }

    if s == "*" || s.starts_with("* ") {
        return Err(err(
            ErrorKind::UnexpectedAsterisk,
            line_no,
            indent + 1,
            origin,
        ));
    }

    Ok((Leader::None, s.to_owned()))
}
