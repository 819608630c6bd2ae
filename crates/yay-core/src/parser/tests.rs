//! End-to-end parser tests against the concrete scenarios in spec.md §8.

use num_bigint::BigInt;

use crate::value::Value;
use crate::ErrorKind;

fn dec(src: &str) -> Value {
    crate::decode(src.as_bytes(), None).expect("expected successful decode")
}

fn err(src: &str) -> crate::DecodeError {
    crate::decode(src.as_bytes(), None).expect_err("expected decode error")
}

#[test]
fn root_map_basic() {
    let v = dec("roses-are-red: true\nviolets-are-blue: false\n");
    let m = v.as_map().unwrap();
    assert_eq!(m.get("roses-are-red"), Some(&Value::Bool(true)));
    assert_eq!(m.get("violets-are-blue"), Some(&Value::Bool(false)));
}

#[test]
fn multiline_list_of_ints() {
    let v = dec("- 5\n- 3\n");
    assert_eq!(
        v,
        Value::List(vec![Value::Int(BigInt::from(5)), Value::Int(BigInt::from(3))])
    );
}

#[test]
fn multiline_list_item_folds_in_deeper_nested_bullets() {
    let v = dec("- 1\n  - 2\n");
    assert_eq!(
        v,
        Value::List(vec![Value::List(vec![
            Value::Int(BigInt::from(1)),
            Value::Int(BigInt::from(2)),
        ])])
    );
}

#[test]
fn inline_bytes_in_property() {
    let v = dec("data: <b0b5c0ffeefacade>\n");
    let m = v.as_map().unwrap();
    assert_eq!(
        m.get("data"),
        Some(&Value::Bytes(vec![0xb0, 0xb5, 0xc0, 0xff, 0xee, 0xfa, 0xca, 0xde]))
    );
}

#[test]
fn block_string_root_has_leading_newline() {
    let v = dec("`\n  hello\n  world\n");
    assert_eq!(v, Value::String("\nhello\nworld\n".to_string()));
}

#[test]
fn block_string_root_same_line_form_requires_space() {
    let v = dec("` hi\n");
    assert_eq!(v, Value::String("hi\n".to_string()));

    let e = err("`hi\n");
    assert_eq!(e.kind, ErrorKind::UnexpectedCharacter('`'));
}

#[test]
fn block_string_property_has_no_leading_newline() {
    let v = dec("message: `\n  hello\n");
    let m = v.as_map().unwrap();
    assert_eq!(m.get("message"), Some(&Value::String("hello\n".to_string())));
}

#[test]
fn digit_grouping_in_numbers() {
    assert_eq!(dec("867 5309\n"), Value::Int(BigInt::from(8_675_309)));
    match dec("6.283 185 307 179 586\n") {
        Value::Float(f) => assert!((f - 6.283_185_307_179_586).abs() < 1e-12),
        other => panic!("expected float, got {other:?}"),
    }
}

#[test]
fn tab_after_colon_is_rejected() {
    let e = err("a:\tb\n");
    assert_eq!(e.kind, ErrorKind::TabNotAllowed);
    assert_eq!((e.line, e.column), (1, 3));
}

#[test]
fn bare_word_is_unexpected_character() {
    let e = err("hello\n");
    assert_eq!(e.kind, ErrorKind::UnexpectedCharacter('h'));
    assert_eq!((e.line, e.column), (1, 1));
}

#[test]
fn inline_list_missing_space_after_comma() {
    let e = err("[1,2]\n");
    assert_eq!(e.kind, ErrorKind::ExpectedSpaceAfterComma);
    assert_eq!((e.line, e.column), (1, 3));
}

#[test]
fn bare_dash_expects_space() {
    let e = err("-\n");
    assert_eq!(e.kind, ErrorKind::ExpectedSpaceAfterDash);
    assert_eq!((e.line, e.column), (1, 2));

    let e2 = err("-a\n");
    assert_eq!(e2.kind, ErrorKind::ExpectedSpaceAfterDash);
    assert_eq!((e2.line, e2.column), (1, 2));
}

#[test]
fn extra_content_after_root_value() {
    let e = err("42\nextra\n");
    assert_eq!(e.kind, ErrorKind::UnexpectedExtraContent);
    assert_eq!((e.line, e.column), (2, 1));
}

#[test]
fn missing_space_after_colon() {
    let e = err("key:value\n");
    assert_eq!(e.kind, ErrorKind::ExpectedSpaceAfterColon);
    assert_eq!((e.line, e.column), (1, 4));
}

#[test]
fn int_and_float_are_disjoint() {
    assert!(dec("42\n").is_int());
    assert!(dec("42.0\n").is_float());
}

#[test]
fn inline_list_and_map_round_trip() {
    let v = dec("[1, 2, 3]\n");
    assert_eq!(
        v,
        Value::List(vec![
            Value::Int(BigInt::from(1)),
            Value::Int(BigInt::from(2)),
            Value::Int(BigInt::from(3)),
        ])
    );

    let v = dec("{a: 1, b: 2}\n");
    let m = v.as_map().unwrap();
    assert_eq!(m.get("a"), Some(&Value::Int(BigInt::from(1))));
    assert_eq!(m.get("b"), Some(&Value::Int(BigInt::from(2))));
}

#[test]
fn nested_map_under_property() {
    let v = dec("outer:\n  inner: 1\n  other: 2\n");
    let outer = v.as_map().unwrap().get("outer").unwrap().as_map().unwrap();
    assert_eq!(outer.get("inner"), Some(&Value::Int(BigInt::from(1))));
    assert_eq!(outer.get("other"), Some(&Value::Int(BigInt::from(2))));
}

#[test]
fn named_list_under_property() {
    let v = dec("items:\n  - 1\n  - 2\n");
    let items = v.as_map().unwrap().get("items").unwrap();
    assert_eq!(
        items,
        &Value::List(vec![Value::Int(BigInt::from(1)), Value::Int(BigInt::from(2))])
    );
}

#[test]
fn quoted_string_escapes() {
    let v = dec("\"a\\nb\\u{1f600}\"\n");
    assert_eq!(v, Value::String("a\nb\u{1f600}".to_string()));
}

#[test]
fn single_quoted_string_only_unescapes_quote_and_backslash() {
    let v = dec("'it\\'s \\\\ok'\n");
    assert_eq!(v, Value::String("it's \\ok".to_string()));
}
