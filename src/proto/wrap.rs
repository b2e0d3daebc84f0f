use bumpalo::Bump;

use crate::proto::{DynamicValue, FieldType, FieldValue, Message, MessageDescriptor, Result, UnwrapMessage, to_field};

/// Convert like [`to_field`], but build a wrapper message around plain values.
///
/// When the target is a well-known wrapper message and `value` is not an object, the
/// value is converted to the wrapper's `value` field type and a new wrapper message is
/// allocated in `arena`. Every other case goes through [`to_field`] unchanged.
pub fn to_field_auto_wrap<'a, B>(value: &DynamicValue, field_type: FieldType, descriptor: Option<&'a MessageDescriptor>, arena: &'a Bump, unwrap: &B) -> Result<FieldValue<'a>>
where
	B: UnwrapMessage<'a> + ?Sized,
{
	if field_type == FieldType::Message
		&& let Some(descriptor) = descriptor
		&& let Some(value_field) = descriptor.wrapper_value_field()
		&& !value.is_object()
	{
		tracing::trace!(wrapper = %descriptor.full_name, value_type = %value_field.field_type, "auto-wrapping plain value");
		let inner = to_field(value, value_field.field_type, None, arena, unwrap)?;
		let message = Message::new_in(arena, descriptor, [(value_field.number, inner)]);
		return Ok(FieldValue::Message(message));
	}

	to_field(value, field_type, descriptor, arena, unwrap)
}
