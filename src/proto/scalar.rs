use std::borrow::Cow;

use crate::proto::{ConvertError, DynamicValue, Result, Slot, format_double, parse_numeric_str, parse_signed_decimal};

/// Largest double that still truncates into `i64` without overflow.
const INT64_MAX_AS_DOUBLE: f64 = 9223372036854774784.0;
/// Smallest double accepted for `i64` truncation.
const INT64_MIN_AS_DOUBLE: f64 = -9223372036854775808.0;

/// Coerce a host value into a 64-bit signed integer.
///
/// Strings must be plain decimal integers (a fractional part is truncated); exponent
/// notation is rejected. Floats are range-checked and truncated toward zero.
pub fn coerce_to_int64(value: &DynamicValue) -> Result<i64> {
	match value {
		DynamicValue::Integer(value) => Ok(*value),
		DynamicValue::Float(value) => float_to_int64(*value),
		DynamicValue::String(bytes) => parse_signed_decimal(bytes).ok_or_else(|| conversion_error("integer", value)),
		DynamicValue::Reference(slot) => coerce_to_int64(&slot.borrow()),
		DynamicValue::Null | DynamicValue::Bool(_) | DynamicValue::Object(_) => Err(conversion_error("integer", value)),
	}
}

/// Coerce a host value into a double using host numeric-string rules.
pub fn coerce_to_double(value: &DynamicValue) -> Result<f64> {
	match value {
		DynamicValue::Integer(value) => Ok(*value as f64),
		DynamicValue::Float(value) => Ok(*value),
		DynamicValue::String(bytes) => parse_numeric_str(bytes).map(|numeric| numeric.as_f64()).ok_or_else(|| conversion_error("double", value)),
		DynamicValue::Reference(slot) => coerce_to_double(&slot.borrow()),
		DynamicValue::Null | DynamicValue::Bool(_) | DynamicValue::Object(_) => Err(conversion_error("double", value)),
	}
}

/// Coerce a host value into a boolean using host truthiness.
///
/// Only the empty string and the exact string `"0"` are false among strings.
pub fn coerce_to_bool(value: &DynamicValue) -> Result<bool> {
	match value {
		DynamicValue::Bool(value) => Ok(*value),
		DynamicValue::Integer(value) => Ok(*value != 0),
		DynamicValue::Float(value) => Ok(*value != 0.0),
		DynamicValue::String(bytes) => Ok(!(bytes.is_empty() || bytes.as_slice() == b"0")),
		DynamicValue::Reference(slot) => coerce_to_bool(&slot.borrow()),
		DynamicValue::Null | DynamicValue::Object(_) => Err(conversion_error("bool", value)),
	}
}

/// Coerce a host value into its printable string bytes without touching the source.
pub fn coerce_to_string(value: &DynamicValue) -> Result<Cow<'_, [u8]>> {
	match value {
		DynamicValue::String(bytes) => Ok(Cow::Borrowed(bytes)),
		DynamicValue::Reference(slot) => coerce_to_string(&slot.borrow()).map(|bytes| Cow::Owned(bytes.into_owned())),
		other => printable_scalar(other).map(|text| Cow::Owned(text.into_bytes())).ok_or_else(|| conversion_error("string", other)),
	}
}

/// Rewrite a reference slot in place with the printable string form of its value.
///
/// Holders of the same slot observe the rewritten string afterwards.
pub fn coerce_slot_to_string(slot: &Slot) -> Result<()> {
	let nested = match &*slot.borrow() {
		DynamicValue::String(_) => return Ok(()),
		DynamicValue::Reference(inner) => Some(inner.clone()),
		_ => None,
	};
	if let Some(inner) = nested {
		return coerce_slot_to_string(&inner);
	}

	let mut current = slot.borrow_mut();
	let text = printable_scalar(&current).ok_or_else(|| conversion_error("string", &current))?;
	*current = DynamicValue::String(text.into_bytes());
	Ok(())
}

fn float_to_int64(value: f64) -> Result<i64> {
	if value.is_nan() || value > INT64_MAX_AS_DOUBLE || value < INT64_MIN_AS_DOUBLE {
		tracing::debug!(value, "float out of int64 range");
		return Err(ConvertError::OutOfRange { value });
	}
	Ok(value as i64)
}

fn printable_scalar(value: &DynamicValue) -> Option<String> {
	match value {
		DynamicValue::Bool(true) => Some("1".to_owned()),
		DynamicValue::Bool(false) => Some(String::new()),
		DynamicValue::Integer(value) => Some(value.to_string()),
		DynamicValue::Float(value) => Some(format_double(*value)),
		_ => None,
	}
}

fn conversion_error(target: &'static str, value: &DynamicValue) -> ConvertError {
	let value = value.printable();
	tracing::debug!(target_type = target, %value, "conversion failed");
	ConvertError::Conversion { target, value }
}
