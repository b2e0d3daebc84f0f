use crate::proto::{Numeric, format_double, parse_numeric_str, parse_signed_decimal, parse_unsigned_decimal};

#[test]
fn unsigned_accepts_full_u64_range() {
	assert_eq!(parse_unsigned_decimal(b"0"), Some(0));
	assert_eq!(parse_unsigned_decimal(b"18446744073709551615"), Some(u64::MAX));
}

#[test]
fn unsigned_rejects_overflow() {
	assert_eq!(parse_unsigned_decimal(b"18446744073709551616"), None);
	assert_eq!(parse_unsigned_decimal(b"99999999999999999999"), None);
}

#[test]
fn truncates_at_decimal_point() {
	assert_eq!(parse_unsigned_decimal(b"12.75"), Some(12));
	assert_eq!(parse_unsigned_decimal(b"12."), Some(12));
	assert_eq!(parse_signed_decimal(b"1.999"), Some(1));
	assert_eq!(parse_signed_decimal(b"-1.999"), Some(-1));
}

#[test]
fn rejects_exponent_and_trailing_content() {
	assert_eq!(parse_signed_decimal(b"1e2"), None);
	assert_eq!(parse_signed_decimal(b"1.5e2"), None);
	assert_eq!(parse_signed_decimal(b"1.2.3"), None);
	assert_eq!(parse_signed_decimal(b"12abc"), None);
	assert_eq!(parse_signed_decimal(b" 12"), None);
	assert_eq!(parse_signed_decimal(b"+12"), None);
}

#[test]
fn requires_leading_digits() {
	assert_eq!(parse_unsigned_decimal(b""), None);
	assert_eq!(parse_signed_decimal(b""), None);
	assert_eq!(parse_signed_decimal(b"-"), None);
	assert_eq!(parse_signed_decimal(b".5"), None);
}

#[test]
fn signed_bounds() {
	assert_eq!(parse_signed_decimal(b"9223372036854775807"), Some(i64::MAX));
	assert_eq!(parse_signed_decimal(b"9223372036854775808"), None);
	assert_eq!(parse_signed_decimal(b"-9223372036854775808"), Some(i64::MIN));
	assert_eq!(parse_signed_decimal(b"-9223372036854775809"), None);
}

#[test]
fn signed_round_trips_decimal_text() {
	for value in [0_i64, 1, -1, 42, -42, 1_000_000_007, i64::MAX, i64::MIN, i64::MIN + 1] {
		let text = value.to_string();
		assert_eq!(parse_signed_decimal(text.as_bytes()), Some(value), "round trip of {text}");
	}
}

#[test]
fn numeric_str_classifies_integers_and_floats() {
	assert_eq!(parse_numeric_str(b"-7"), Some(Numeric::Int(-7)));
	assert_eq!(parse_numeric_str(b"+7"), Some(Numeric::Int(7)));
	assert_eq!(parse_numeric_str(b" 1.5e3 "), Some(Numeric::Float(1500.0)));
	assert_eq!(parse_numeric_str(b".5"), Some(Numeric::Float(0.5)));
	assert_eq!(parse_numeric_str(b"1."), Some(Numeric::Float(1.0)));
	assert_eq!(parse_numeric_str(b"1e2"), Some(Numeric::Float(100.0)));
	assert_eq!(parse_numeric_str(b"\t\n42"), Some(Numeric::Int(42)));
}

#[test]
fn numeric_str_promotes_integer_overflow_to_float() {
	let Some(Numeric::Float(value)) = parse_numeric_str(b"99999999999999999999") else {
		panic!("expected float promotion");
	};
	assert_eq!(value, 1e20);
}

#[test]
fn numeric_str_rejects_non_numeric_text() {
	for text in [&b""[..], b"   ", b"abc", b"1e", b"1e+", b"0x1A", b"inf", b"nan", b"1.2.3", b"12abc", b".", b"-", b"1 2"] {
		assert_eq!(parse_numeric_str(text), None, "{:?}", String::from_utf8_lossy(text));
	}
}

#[test]
fn formats_doubles_like_host_string_cast() {
	assert_eq!(format_double(0.1), "0.1");
	assert_eq!(format_double(1.0), "1");
	assert_eq!(format_double(-2.5), "-2.5");
	assert_eq!(format_double(123.456), "123.456");
	assert_eq!(format_double(0.0001), "0.0001");
	assert_eq!(format_double(0.00001), "1.0E-5");
	assert_eq!(format_double(1.5e-7), "1.5E-7");
	assert_eq!(format_double(1e13), "10000000000000");
	assert_eq!(format_double(1e14), "1.0E+14");
	assert_eq!(format_double(1e25), "1.0E+25");
	assert_eq!(format_double(1.0 / 3.0), "0.33333333333333");
}

#[test]
fn formats_special_doubles() {
	assert_eq!(format_double(0.0), "0");
	assert_eq!(format_double(-0.0), "-0");
	assert_eq!(format_double(f64::INFINITY), "INF");
	assert_eq!(format_double(f64::NEG_INFINITY), "-INF");
	assert_eq!(format_double(f64::NAN), "NAN");
}
