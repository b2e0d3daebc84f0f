/// Result of classifying a numeric host string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
	/// Integer lexical form that fits in `i64`.
	Int(i64),
	/// Float lexical form, or an integer form too large for `i64`.
	Float(f64),
}

impl Numeric {
	/// Widen to `f64`.
	pub fn as_f64(self) -> f64 {
		match self {
			Self::Int(value) => value as f64,
			Self::Float(value) => value,
		}
	}
}

/// Significant digits used when printing floats as host strings.
const DOUBLE_PRECISION: usize = 14;

/// Parse leading decimal digits into `u64`, truncating at a decimal point.
///
/// `"1.999"` parses as `1`. Exponent markers and any other trailing content fail,
/// as does input without at least one leading digit.
pub fn parse_unsigned_decimal(text: &[u8]) -> Option<u64> {
	let digits = text.iter().take_while(|byte| byte.is_ascii_digit()).count();
	if digits == 0 {
		return None;
	}

	let mut value = 0_u64;
	for byte in &text[..digits] {
		let digit = u64::from(byte - b'0');
		if value > u64::MAX / 10 || value * 10 > u64::MAX - digit {
			return None;
		}
		value = value * 10 + digit;
	}

	let rest = &text[digits..];
	if let Some((first, fraction)) = rest.split_first() {
		if *first != b'.' || !fraction.iter().all(u8::is_ascii_digit) {
			return None;
		}
	}

	Some(value)
}

/// Parse an optionally negative decimal into `i64` with the same truncation rules.
pub fn parse_signed_decimal(text: &[u8]) -> Option<i64> {
	let (negative, magnitude) = match text.split_first() {
		Some((b'-', rest)) => (true, rest),
		_ => (false, text),
	};

	let magnitude = parse_unsigned_decimal(magnitude)?;
	let limit = i64::MAX as u64 + u64::from(negative);
	if magnitude > limit {
		return None;
	}

	if negative {
		Some((magnitude as i64).wrapping_neg())
	} else {
		Some(magnitude as i64)
	}
}

/// Classify a host numeric string.
///
/// Accepts surrounding whitespace, an optional sign, and either an integer form or a
/// decimal form with an optional exponent. Hex, `inf`/`nan`, and trailing garbage are
/// rejected.
pub fn parse_numeric_str(text: &[u8]) -> Option<Numeric> {
	let start = text.iter().position(|byte| !is_host_whitespace(*byte))?;
	let end = text.iter().rposition(|byte| !is_host_whitespace(*byte))? + 1;
	let body = &text[start..end];

	let unsigned = match body.first() {
		Some(b'+' | b'-') => &body[1..],
		_ => body,
	};

	let int_digits = unsigned.iter().take_while(|byte| byte.is_ascii_digit()).count();
	let mut pos = int_digits;
	let mut is_float = false;

	let mut frac_digits = 0;
	if unsigned.get(pos) == Some(&b'.') {
		is_float = true;
		pos += 1;
		frac_digits = unsigned[pos..].iter().take_while(|byte| byte.is_ascii_digit()).count();
		pos += frac_digits;
	}
	if int_digits + frac_digits == 0 {
		return None;
	}

	if matches!(unsigned.get(pos), Some(b'e' | b'E')) {
		let mut exp_pos = pos + 1;
		if matches!(unsigned.get(exp_pos), Some(b'+' | b'-')) {
			exp_pos += 1;
		}
		let exp_digits = unsigned[exp_pos.min(unsigned.len())..].iter().take_while(|byte| byte.is_ascii_digit()).count();
		if exp_digits == 0 {
			return None;
		}
		is_float = true;
		pos = exp_pos + exp_digits;
	}

	if pos != unsigned.len() {
		return None;
	}

	// The body is pure ASCII at this point.
	let body = std::str::from_utf8(body).ok()?;
	if !is_float && let Ok(value) = body.parse::<i64>() {
		return Some(Numeric::Int(value));
	}
	body.parse::<f64>().ok().map(Numeric::Float)
}

/// Render a float the way the host prints it when casting to string.
pub fn format_double(value: f64) -> String {
	if value.is_nan() {
		return "NAN".to_owned();
	}
	if value.is_infinite() {
		return if value > 0.0 { "INF".to_owned() } else { "-INF".to_owned() };
	}
	if value == 0.0 {
		return if value.is_sign_negative() { "-0".to_owned() } else { "0".to_owned() };
	}

	let scientific = format!("{:.*e}", DOUBLE_PRECISION - 1, value.abs());
	let Some((mantissa, exponent)) = scientific.split_once('e') else {
		return scientific;
	};
	let exponent: i32 = exponent.parse().unwrap_or(0);
	let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
	let digits = digits.trim_end_matches('0');
	let digits = if digits.is_empty() { "0" } else { digits };

	let mut out = String::new();
	if value.is_sign_negative() {
		out.push('-');
	}

	if exponent < -4 || exponent >= DOUBLE_PRECISION as i32 {
		let (lead, tail) = digits.split_at(1);
		out.push_str(lead);
		out.push('.');
		out.push_str(if tail.is_empty() { "0" } else { tail });
		out.push('E');
		out.push(if exponent < 0 { '-' } else { '+' });
		out.push_str(&exponent.unsigned_abs().to_string());
		return out;
	}

	if exponent < 0 {
		out.push_str("0.");
		for _ in 0..(-exponent - 1) {
			out.push('0');
		}
		out.push_str(digits);
		return out;
	}

	let int_len = exponent as usize + 1;
	if digits.len() <= int_len {
		out.push_str(digits);
		for _ in digits.len()..int_len {
			out.push('0');
		}
	} else {
		out.push_str(&digits[..int_len]);
		out.push('.');
		out.push_str(&digits[int_len..]);
	}
	out
}

fn is_host_whitespace(byte: u8) -> bool {
	matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

#[cfg(test)]
mod tests;
