use std::cell::Ref;

use bumpalo::Bump;

use crate::proto::{
	ConvertError, DynamicValue, FieldType, FieldValue, Message, MessageDescriptor, Payload, Result, Slot, UnwrapMessage, WrapMessage, coerce_slot_to_string,
	coerce_to_bool, coerce_to_double, coerce_to_int64, coerce_to_string,
};

/// Options controlling field-to-host conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
	/// Render 64-bit integer fields as decimal strings for hosts whose native integer is 32-bit.
	pub narrow_host_integers: bool,
}

impl ConvertOptions {
	/// Preset matching hosts without native 64-bit integers.
	pub fn legacy_narrow_host() -> Self {
		Self { narrow_host_integers: true }
	}
}

/// Convert a host value into a field value, copying string/bytes payloads into `arena`.
///
/// Integer targets narrower than 64 bits truncate silently. A reference holding a
/// non-string value is rewritten to its string form when the target is string/bytes.
pub fn to_field<'a, B>(value: &DynamicValue, field_type: FieldType, descriptor: Option<&MessageDescriptor>, arena: &'a Bump, unwrap: &B) -> Result<FieldValue<'a>>
where
	B: UnwrapMessage<'a> + ?Sized,
{
	convert_with(value, field_type, descriptor, unwrap, || arena_payload(value, arena))
}

/// Convert a host value into a field value that borrows string/bytes data from `value`.
///
/// Text that only exists after coercion (numbers, booleans) comes back as an owned payload.
pub fn to_field_borrowed<'v, B>(value: &'v DynamicValue, field_type: FieldType, descriptor: Option<&MessageDescriptor>, unwrap: &B) -> Result<FieldValue<'v>>
where
	B: UnwrapMessage<'v> + ?Sized,
{
	convert_with(value, field_type, descriptor, unwrap, || borrowed_payload(value))
}

/// Convert a field value back into a host value.
pub fn to_dynamic_value<'a, W>(field: &FieldValue<'a>, field_type: FieldType, descriptor: Option<&MessageDescriptor>, options: &ConvertOptions, wrap: &W) -> DynamicValue
where
	W: WrapMessage<'a> + ?Sized,
{
	debug_assert!(field.matches(field_type), "{field:?} does not hold a {field_type} value");

	match field {
		FieldValue::Int64(value) if options.narrow_host_integers => DynamicValue::string(value.to_string()),
		FieldValue::UInt64(value) if options.narrow_host_integers => DynamicValue::string((*value as i64).to_string()),
		FieldValue::Int64(value) => DynamicValue::Integer(*value),
		FieldValue::UInt64(value) => DynamicValue::Integer(*value as i64),
		FieldValue::Int32(value) => DynamicValue::Integer(i64::from(*value)),
		FieldValue::UInt32(value) => DynamicValue::Integer(i64::from(*value as i32)),
		FieldValue::Float(value) => DynamicValue::Float(f64::from(*value)),
		FieldValue::Double(value) => DynamicValue::Float(*value),
		FieldValue::Bool(value) => DynamicValue::Bool(*value),
		FieldValue::Str(payload) => DynamicValue::String(payload.to_vec()),
		FieldValue::Message(message) => {
			let descriptor = descriptor.unwrap_or(message.descriptor());
			wrap.wrap_message(*message, descriptor)
		}
	}
}

fn convert_with<'a, B, S>(value: &DynamicValue, field_type: FieldType, descriptor: Option<&MessageDescriptor>, unwrap: &B, string: S) -> Result<FieldValue<'a>>
where
	B: UnwrapMessage<'a> + ?Sized,
	S: FnOnce() -> Result<Payload<'a>>,
{
	let field = match field_type {
		FieldType::Int32 | FieldType::Enum => FieldValue::Int32(coerce_to_int64(value)? as i32),
		FieldType::Int64 => FieldValue::Int64(coerce_to_int64(value)?),
		FieldType::UInt32 => FieldValue::UInt32(coerce_to_int64(value)? as u32),
		FieldType::UInt64 => FieldValue::UInt64(coerce_to_int64(value)? as u64),
		FieldType::Double => FieldValue::Double(coerce_to_double(value)?),
		FieldType::Float => FieldValue::Float(coerce_to_double(value)? as f32),
		FieldType::Bool => FieldValue::Bool(coerce_to_bool(value)?),
		FieldType::String | FieldType::Bytes => FieldValue::Str(string()?),
		FieldType::Message => FieldValue::Message(field_message(value, descriptor, unwrap)?),
	};
	Ok(field)
}

fn field_message<'a, B>(value: &DynamicValue, descriptor: Option<&MessageDescriptor>, unwrap: &B) -> Result<&'a Message<'a>>
where
	B: UnwrapMessage<'a> + ?Sized,
{
	let Some(descriptor) = descriptor else {
		let value = value.printable();
		tracing::debug!(%value, "message field without descriptor");
		return Err(ConvertError::Conversion { target: "message", value });
	};
	unwrap.unwrap_message(value, descriptor)
}

fn arena_payload<'a>(value: &DynamicValue, arena: &'a Bump) -> Result<Payload<'a>> {
	if let DynamicValue::Reference(slot) = value {
		coerce_slot_to_string(slot)?;
	}
	let bytes = coerce_to_string(value)?;
	Ok(Payload::Arena(arena.alloc_slice_copy(&bytes)))
}

fn borrowed_payload(value: &DynamicValue) -> Result<Payload<'_>> {
	match value {
		DynamicValue::String(bytes) => Ok(Payload::Borrowed(bytes)),
		DynamicValue::Reference(slot) => {
			coerce_slot_to_string(slot)?;
			slot_payload(slot)
		}
		other => owned_payload(other),
	}
}

fn slot_payload(slot: &Slot) -> Result<Payload<'_>> {
	match Ref::filter_map(slot.borrow(), DynamicValue::as_bytes) {
		Ok(bytes) => Ok(Payload::Slot(bytes)),
		// Nested slot: its guard cannot outlive this frame.
		Err(current) => owned_payload(&current),
	}
}

fn owned_payload<'a>(value: &DynamicValue) -> Result<Payload<'a>> {
	coerce_to_string(value).map(|bytes| Payload::Owned(bytes.into_owned().into_boxed_slice()))
}

#[cfg(test)]
mod tests;
