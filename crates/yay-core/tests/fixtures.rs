//! Table-driven fixture tests covering valid and invalid documents (spec.md
//! §8 P-4), plus a determinism/disjointness property test (§8 P-3, P-6).

use num_bigint::BigInt;
use quickcheck_macros::quickcheck;
use rstest::rstest;
use yay_core::{decode, ErrorKind, Value};

fn ok(src: &str) -> Value {
    decode(src.as_bytes(), None).unwrap_or_else(|e| panic!("expected ok, got {e}: {src:?}"))
}

fn fails(src: &str) -> ErrorKind {
    decode(src.as_bytes(), None)
        .err()
        .unwrap_or_else(|| panic!("expected error for {src:?}"))
        .kind
}

#[rstest]
#[case::null("null\n", Value::Null)]
#[case::bool_true("true\n", Value::Bool(true))]
#[case::bool_false("false\n", Value::Bool(false))]
#[case::nan_is_nan("nan\n", Value::Float(f64::NAN))]
#[case::infinity("infinity\n", Value::Float(f64::INFINITY))]
#[case::neg_infinity("-infinity\n", Value::Float(f64::NEG_INFINITY))]
#[case::int("42\n", Value::Int(BigInt::from(42)))]
#[case::neg_int("-7\n", Value::Int(BigInt::from(-7)))]
#[case::float("42.0\n", Value::Float(42.0))]
#[case::neg_zero("-0.0\n", Value::Float(-0.0))]
#[case::sci_float_no_dot("1e10\n", Value::Float(1e10))]
#[case::string("\"hi\"\n", Value::String("hi".to_string()))]
#[case::single_quoted("'hi'\n", Value::String("hi".to_string()))]
#[case::empty_list("[]\n", Value::List(vec![]))]
#[case::empty_map("{}\n", Value::Map(Default::default()))]
fn valid_scalars(#[case] src: &str, #[case] expected: Value) {
    assert_eq!(ok(src), expected);
}

#[rstest]
#[case::trailing_space("a \n", ErrorKind::UnexpectedTrailingSpace)]
#[case::tab("a\tb\n", ErrorKind::TabNotAllowed)]
#[case::bom("\u{feff}a\n", ErrorKind::IllegalBom)]
#[case::asterisk("*\n", ErrorKind::UnexpectedAsterisk)]
#[case::no_value("", ErrorKind::NoValue)]
#[case::unterminated_string("\"abc\n", ErrorKind::UnterminatedString)]
#[case::bad_escape("\"\\x\"\n", ErrorKind::BadEscapedCharacter)]
#[case::legacy_unicode_escape("\"\\u0041\"\n", ErrorKind::BadEscapedCharacter)]
#[case::unexpected_dollar("$\n", ErrorKind::UnexpectedDollar)]
#[case::unmatched_angle("<abcd\n", ErrorKind::UnmatchedAngleBracket)]
#[case::odd_hex("<abc>\n", ErrorKind::OddHexDigits)]
#[case::uppercase_hex("<AB>\n", ErrorKind::UppercaseHexDigit)]
#[case::uppercase_exponent("1E10\n", ErrorKind::UppercaseExponent)]
#[case::space_after_open_bracket("[ 1]\n", ErrorKind::UnexpectedSpaceAfterOpen('['))]
#[case::space_before_close_bracket("[1 ]\n", ErrorKind::UnexpectedSpaceBeforeClose(']'))]
#[case::empty_block_string("`\n", ErrorKind::EmptyBlockStringNotAllowed)]
fn invalid_documents(#[case] src: &str, #[case] expected: ErrorKind) {
    assert_eq!(fails(src), expected);
}

#[test]
fn rose_violet_map_scenario() {
    let v = ok("roses-are-red: true\nviolets-are-blue: false\n");
    let m = v.as_map().unwrap();
    assert_eq!(m.len(), 2);
    assert_eq!(m.get("roses-are-red"), Some(&Value::Bool(true)));
}

#[test]
fn duplicate_keys_last_wins() {
    let v = ok("a: 1\na: 2\n");
    let m = v.as_map().unwrap();
    assert_eq!(m.get("a"), Some(&Value::Int(BigInt::from(2))));
    assert_eq!(m.len(), 1);

    let v = ok("{a: 1, a: 2}\n");
    let m = v.as_map().unwrap();
    assert_eq!(m.get("a"), Some(&Value::Int(BigInt::from(2))));
    assert_eq!(m.len(), 1);
}

#[test]
fn invalid_utf8_is_rejected() {
    let bytes: &[u8] = &[b'a', 0xff, b'\n'];
    let err = decode(bytes, None).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidUtf8);
}

#[test]
fn raw_surrogate_bytes_are_rejected_as_illegal_surrogate() {
    let bytes: &[u8] = &[b'a', 0xed, 0xa0, 0x80, b'\n'];
    let err = decode(bytes, None).unwrap_err();
    assert_eq!(err.kind, ErrorKind::IllegalSurrogate);
}

#[test]
fn negative_zero_is_bit_distinct_from_positive_zero() {
    let neg = ok("-0.0\n");
    let pos = ok("0.0\n");
    assert_eq!(neg, Value::Float(-0.0));
    assert_ne!(neg, pos);
    match (neg, pos) {
        (Value::Float(a), Value::Float(b)) => {
            assert!(a.is_sign_negative());
            assert!(b.is_sign_positive());
            assert_ne!(a.to_bits(), b.to_bits());
        }
        _ => panic!("expected floats"),
    }
}

#[test]
fn origin_is_included_in_display_when_present() {
    let err = decode(b"hello\n", Some("input.yay")).unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.ends_with("of input.yay"), "{rendered}");

    let err = decode(b"hello\n", None).unwrap_err();
    assert!(!err.to_string().contains(" of "));
}

/// Decoding is a pure function of its bytes (spec.md §8 P-3): the same
/// input never produces different results across calls.
#[quickcheck]
fn decode_is_deterministic(bytes: Vec<u8>) -> bool {
    decode(&bytes, None) == decode(&bytes, None)
}

/// `Int` and `Float` are disjoint kinds regardless of numeric value
/// (spec.md §8 P-6).
#[quickcheck]
fn int_and_float_never_compare_equal(n: i64) -> bool {
    let int_doc = format!("{n}\n");
    let float_doc = format!("{n}.0\n");
    match (decode(int_doc.as_bytes(), None), decode(float_doc.as_bytes(), None)) {
        (Ok(i), Ok(f)) => i.is_int() && f.is_float() && i != f,
        _ => true,
    }
}
