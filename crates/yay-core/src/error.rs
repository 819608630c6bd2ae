//! The decoder's closed error taxonomy (spec.md §7).
//!
//! [`DecodeError`] pairs an [`ErrorKind`] with the one-based `line:column`
//! of the offending character and an optional `origin` string. Its
//! [`Display`](core::fmt::Display) impl renders `"<kind message> at
//! <line>:<col> of <origin>"`, or just `"<kind message>"` when `origin` is
//! absent, matching spec.md §4.4.

use std::fmt;

/// A decode failure: what went wrong, and where.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    pub kind: ErrorKind,
    pub line: usize,
    pub column: usize,
    pub origin: Option<String>,
}

impl DecodeError {
    pub(crate) fn new(kind: ErrorKind, line: usize, column: usize, origin: Option<&str>) -> Self {
        Self {
            kind,
            line,
            column,
            origin: origin.map(str::to_owned),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}:{}", self.kind, self.line, self.column)?;
        if let Some(origin) = &self.origin {
            write!(f, " of {origin}")?;
        }
        Ok(())
    }
}

impl std::error::Error for DecodeError {}

/// One member of the decoder's closed error taxonomy (spec.md §7).
///
/// Every variant's [`Display`](core::fmt::Display) renders exactly the
/// message prefix fixtures expect, with no trailing location — the
/// location is attached by [`DecodeError`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    // -- Encoding --------------------------------------------------------
    #[error("Illegal BOM")]
    IllegalBom,
    #[error("Illegal surrogate")]
    IllegalSurrogate,
    #[error("Forbidden code point {0}")]
    ForbiddenCodePoint(String),
    #[error("Tab not allowed (use spaces)")]
    TabNotAllowed,
    #[error("Invalid UTF-8")]
    InvalidUtf8,

    // -- Whitespace --------------------------------------------------------
    #[error("Unexpected trailing space")]
    UnexpectedTrailingSpace,
    #[error("Unexpected leading space")]
    UnexpectedLeadingSpace,
    #[error("Unexpected indent")]
    UnexpectedIndent,
    #[error("Unexpected space before ':'")]
    UnexpectedSpaceBeforeColon,
    #[error("Expected space after ':'")]
    ExpectedSpaceAfterColon,
    #[error("Unexpected space after ':'")]
    UnexpectedSpaceAfterColon,
    #[error("Unexpected space before ','")]
    UnexpectedSpaceBeforeComma,
    #[error("Expected space after ','")]
    ExpectedSpaceAfterComma,
    #[error("Unexpected space after ','")]
    UnexpectedSpaceAfterComma,
    #[error("Unexpected space after '{0}'")]
    UnexpectedSpaceAfterOpen(char),
    #[error("Unexpected space before '{0}'")]
    UnexpectedSpaceBeforeClose(char),
    #[error("Unexpected space in number")]
    UnexpectedSpaceInNumber,
    #[error("Expected space after dash")]
    ExpectedSpaceAfterDash,
    #[error("Unexpected space after dash")]
    UnexpectedSpaceAfterDash,

    // -- Structure --------------------------------------------------------
    #[error("No value")]
    NoValue,
    #[error("Unexpected extra content")]
    UnexpectedExtraContent,
    #[error("Expected value after property")]
    ExpectedValueAfterProperty,
    #[error("Unexpected newline in inline array")]
    UnexpectedNewlineInInlineArray,
    #[error("Unexpected newline in inline object")]
    UnexpectedNewlineInInlineObject,
    #[error("Unterminated inline array")]
    UnterminatedInlineArray,
    #[error("Unterminated inline object")]
    UnterminatedInlineObject,
    #[error("Unmatched angle bracket")]
    UnmatchedAngleBracket,
    #[error("Missing key")]
    MissingKey,
    #[error("Expected colon after key")]
    ExpectedColonAfterKey,

    // -- Lexical --------------------------------------------------------
    #[error("Unexpected character \"{0}\"")]
    UnexpectedCharacter(char),
    #[error("Unexpected dollar")]
    UnexpectedDollar,
    #[error("Unexpected asterisk")]
    UnexpectedAsterisk,
    #[error("Invalid key")]
    InvalidKey,
    #[error("Invalid key character")]
    InvalidKeyCharacter,

    // -- Strings --------------------------------------------------------
    #[error("Unterminated string")]
    UnterminatedString,
    #[error("Bad character in string")]
    BadCharacterInString,
    #[error("Bad escaped character")]
    BadEscapedCharacter,
    #[error("Bad unicode escape")]
    BadUnicodeEscape,
    #[error("Unicode out of range")]
    UnicodeOutOfRange,
    #[error("Empty block string not allowed")]
    EmptyBlockStringNotAllowed,
    #[error("Expected newline after block leader in property")]
    ExpectedNewlineAfterBlockLeaderInProperty,

    // -- Numbers --------------------------------------------------------
    #[error("Uppercase exponent")]
    UppercaseExponent,

    // -- Bytes --------------------------------------------------------
    #[error("Uppercase hex digit")]
    UppercaseHexDigit,
    #[error("Odd number of hex digits in byte literal")]
    OddHexDigits,
    #[error("Invalid hex digit")]
    InvalidHexDigit,
    #[error("Expected hex or comment in hex block")]
    ExpectedHexOrCommentInHexBlock,
}

impl ErrorKind {
    /// Attaches a location, producing the [`DecodeError`] that `decode`
    /// returns.
    pub(crate) fn at(self, line: usize, column: usize, origin: Option<&str>) -> DecodeError {
        DecodeError::new(self, line, column, origin)
    }
}
