use bumpalo::Bump;

use crate::proto::{
	ConvertError, ConvertOptions, DynamicValue, FieldType, FieldValue, HostObject, MessageDescriptor, ObjectStore, Payload, WrapperKind, to_dynamic_value, to_field,
	to_field_borrowed,
};

#[test]
fn integer_targets_truncate_silently() {
	let arena = Bump::new();
	let store = ObjectStore::new(&arena);

	let value = DynamicValue::Integer(4_294_967_297);
	assert_eq!(to_field(&value, FieldType::Int32, None, &arena, &store), Ok(FieldValue::Int32(1)));
	assert_eq!(to_field(&value, FieldType::UInt32, None, &arena, &store), Ok(FieldValue::UInt32(1)));
	assert_eq!(to_field(&value, FieldType::Enum, None, &arena, &store), Ok(FieldValue::Int32(1)));

	let negative = DynamicValue::Integer(-1);
	assert_eq!(to_field(&negative, FieldType::UInt64, None, &arena, &store), Ok(FieldValue::UInt64(u64::MAX)));
	assert_eq!(to_field(&negative, FieldType::UInt32, None, &arena, &store), Ok(FieldValue::UInt32(u32::MAX)));
}

#[test]
fn float_targets_narrow_from_double() {
	let arena = Bump::new();
	let store = ObjectStore::new(&arena);

	let value = DynamicValue::string("0.1");
	assert_eq!(to_field(&value, FieldType::Double, None, &arena, &store), Ok(FieldValue::Double(0.1)));
	assert_eq!(to_field(&value, FieldType::Float, None, &arena, &store), Ok(FieldValue::Float(0.1_f32)));
	assert_eq!(to_field(&DynamicValue::Integer(3), FieldType::Float, None, &arena, &store), Ok(FieldValue::Float(3.0)));
}

#[test]
fn int64_float_range_is_enforced_through_field_conversion() {
	let arena = Bump::new();
	let store = ObjectStore::new(&arena);

	let err = to_field(&DynamicValue::Float(1e19), FieldType::Int32, None, &arena, &store).expect_err("out of range");
	assert!(matches!(err, ConvertError::OutOfRange { .. }));
	assert_eq!(err.to_string(), "Out of range");
}

#[test]
fn bool_field_follows_host_truthiness() {
	let arena = Bump::new();
	let store = ObjectStore::new(&arena);

	assert_eq!(to_field(&DynamicValue::string("0"), FieldType::Bool, None, &arena, &store), Ok(FieldValue::Bool(false)));
	assert_eq!(to_field(&DynamicValue::string("0.0"), FieldType::Bool, None, &arena, &store), Ok(FieldValue::Bool(true)));
	assert!(to_field(&DynamicValue::Null, FieldType::Bool, None, &arena, &store).is_err());
}

#[test]
fn string_fields_are_copied_into_arena() {
	let arena = Bump::new();
	let store = ObjectStore::new(&arena);

	let value = DynamicValue::string("hello");
	let field = to_field(&value, FieldType::String, None, &arena, &store).expect("string converts");
	let payload = field.as_payload().expect("string payload");
	assert!(matches!(payload, Payload::Arena(_)));
	assert_eq!(payload.as_bytes(), b"hello");
	assert_ne!(payload.as_ptr(), value.as_bytes().expect("string value").as_ptr());

	let number = to_field(&DynamicValue::Float(2.5), FieldType::Bytes, None, &arena, &store).expect("float converts");
	assert_eq!(number.as_payload().map(|payload| payload.as_bytes()), Some(&b"2.5"[..]));
}

#[test]
fn borrowed_string_aliases_source() {
	let arena = Bump::new();
	let store = ObjectStore::new(&arena);
	let value = DynamicValue::string("shared");

	let field = to_field_borrowed(&value, FieldType::Bytes, None, &store).expect("string converts");
	let payload = field.as_payload().expect("bytes payload");
	assert!(matches!(payload, Payload::Borrowed(_)));
	assert!(payload.is_borrowed());
	assert_eq!(payload.as_ptr(), value.as_bytes().expect("string value").as_ptr());
}

#[test]
fn borrowed_coercion_text_is_owned() {
	let arena = Bump::new();
	let store = ObjectStore::new(&arena);
	let value = DynamicValue::Integer(-42);

	let field = to_field_borrowed(&value, FieldType::String, None, &store).expect("integer converts");
	let payload = field.as_payload().expect("string payload");
	assert!(matches!(payload, Payload::Owned(_)));
	assert_eq!(payload.as_bytes(), b"-42");
	assert_eq!(value, DynamicValue::Integer(-42));
}

#[test]
fn string_target_rewrites_reference_slot() {
	let arena = Bump::new();
	let store = ObjectStore::new(&arena);
	let value = DynamicValue::reference(DynamicValue::Integer(7));

	let field = to_field(&value, FieldType::String, None, &arena, &store).expect("reference converts");
	assert_eq!(field.as_payload().map(|payload| payload.as_bytes()), Some(&b"7"[..]));
	assert_eq!(value, DynamicValue::string("7"));
}

#[test]
fn borrowed_reference_keeps_slot_locked() {
	let arena = Bump::new();
	let store = ObjectStore::new(&arena);
	let value = DynamicValue::reference(DynamicValue::Bool(true));
	let DynamicValue::Reference(slot) = &value else {
		panic!("expected reference");
	};

	let field = to_field_borrowed(&value, FieldType::String, None, &store).expect("reference converts");
	let payload = field.as_payload().expect("string payload");
	assert!(matches!(payload, Payload::Slot(_)));
	assert_eq!(payload.as_bytes(), b"1");
	assert!(slot.try_borrow_mut().is_err(), "slot must stay read-locked while the payload lives");

	drop(field);
	assert!(slot.try_borrow_mut().is_ok());
}

#[test]
fn non_string_targets_leave_references_untouched() {
	let arena = Bump::new();
	let store = ObjectStore::new(&arena);
	let value = DynamicValue::reference(DynamicValue::string("12"));

	assert_eq!(to_field(&value, FieldType::Int64, None, &arena, &store), Ok(FieldValue::Int64(12)));
	assert_eq!(value, DynamicValue::string("12"));

	let float_ref = DynamicValue::reference(DynamicValue::Float(1.5));
	assert_eq!(to_field(&float_ref, FieldType::Double, None, &arena, &store), Ok(FieldValue::Double(1.5)));
	assert_eq!(float_ref, DynamicValue::Float(1.5));
}

#[test]
fn message_field_requires_descriptor() {
	let arena = Bump::new();
	let store = ObjectStore::new(&arena);

	let err = to_field(&DynamicValue::Integer(1), FieldType::Message, None, &arena, &store).expect_err("descriptor required");
	assert!(matches!(err, ConvertError::Conversion { target: "message", .. }));
}

#[test]
fn message_field_unwraps_store_objects() {
	let arena = Bump::new();
	let descriptor = MessageDescriptor::new("demo.Point", Vec::new());
	let store = ObjectStore::new(&arena);
	let object = store.new_message(&descriptor, []);

	let field = to_field(&object, FieldType::Message, Some(&descriptor), &arena, &store).expect("object converts");
	let message = field.as_message().expect("message value");
	assert_eq!(&*message.descriptor().full_name, "demo.Point");

	let plain = DynamicValue::Object(HostObject::plain("demo.Point"));
	let err = to_field(&plain, FieldType::Message, Some(&descriptor), &arena, &store).expect_err("plain object fails");
	assert!(matches!(err, ConvertError::TypeMismatch { .. }));

	let err = to_field(&DynamicValue::Integer(5), FieldType::Message, Some(&descriptor), &arena, &store).expect_err("plain value fails");
	assert!(matches!(err, ConvertError::Conversion { target: "message", .. }));
}

#[test]
fn host_values_from_integer_fields() {
	let arena = Bump::new();
	let store = ObjectStore::new(&arena);
	let options = ConvertOptions::default();

	assert_eq!(to_dynamic_value(&FieldValue::Int32(-3), FieldType::Int32, None, &options, &store), DynamicValue::Integer(-3));
	assert_eq!(to_dynamic_value(&FieldValue::Int32(9), FieldType::Enum, None, &options, &store), DynamicValue::Integer(9));
	assert_eq!(to_dynamic_value(&FieldValue::UInt32(u32::MAX), FieldType::UInt32, None, &options, &store), DynamicValue::Integer(-1));
	assert_eq!(to_dynamic_value(&FieldValue::UInt64(u64::MAX), FieldType::UInt64, None, &options, &store), DynamicValue::Integer(-1));
	assert_eq!(to_dynamic_value(&FieldValue::Int64(i64::MIN), FieldType::Int64, None, &options, &store), DynamicValue::Integer(i64::MIN));
}

#[test]
fn legacy_narrow_host_stringifies_64_bit_fields() {
	let arena = Bump::new();
	let store = ObjectStore::new(&arena);
	let options = ConvertOptions::legacy_narrow_host();

	assert_eq!(to_dynamic_value(&FieldValue::UInt64(u64::MAX), FieldType::UInt64, None, &options, &store), DynamicValue::string("-1"));
	assert_eq!(to_dynamic_value(&FieldValue::Int64(1 << 40), FieldType::Int64, None, &options, &store), DynamicValue::string("1099511627776"));
	assert_eq!(to_dynamic_value(&FieldValue::Int32(5), FieldType::Int32, None, &options, &store), DynamicValue::Integer(5));
}

#[test]
fn host_values_from_float_bool_and_string_fields() {
	let arena = Bump::new();
	let store = ObjectStore::new(&arena);
	let options = ConvertOptions::default();

	assert_eq!(to_dynamic_value(&FieldValue::Float(0.5), FieldType::Float, None, &options, &store), DynamicValue::Float(0.5));
	assert_eq!(to_dynamic_value(&FieldValue::Double(-2.25), FieldType::Double, None, &options, &store), DynamicValue::Float(-2.25));
	assert_eq!(to_dynamic_value(&FieldValue::Bool(true), FieldType::Bool, None, &options, &store), DynamicValue::Bool(true));

	let payload = FieldValue::Str(Payload::Arena(arena.alloc_slice_copy(b"abc")));
	assert_eq!(to_dynamic_value(&payload, FieldType::String, None, &options, &store), DynamicValue::string("abc"));
}

#[test]
fn message_fields_round_trip_through_the_store() {
	let arena = Bump::new();
	let descriptor = WrapperKind::Int64.descriptor();
	let store = ObjectStore::new(&arena);
	let object = store.new_message(&descriptor, [(1, FieldValue::Int64(77))]);

	let field = to_field(&object, FieldType::Message, Some(&descriptor), &arena, &store).expect("object converts");
	let back = to_dynamic_value(&field, FieldType::Message, Some(&descriptor), &ConvertOptions::default(), &store);

	assert_eq!(back, object);
	assert_eq!(store.len(), 1);
}

#[test]
fn scalar_round_trip_preserves_in_range_values() {
	let arena = Bump::new();
	let store = ObjectStore::new(&arena);
	let options = ConvertOptions::default();

	for (value, field_type) in [
		(DynamicValue::Integer(-2_147_483_648), FieldType::Int32),
		(DynamicValue::Integer(i64::MAX), FieldType::Int64),
		(DynamicValue::Integer(2_147_483_647), FieldType::UInt32),
		(DynamicValue::Integer(123), FieldType::UInt64),
		(DynamicValue::Integer(3), FieldType::Enum),
		(DynamicValue::Float(1e300), FieldType::Double),
		(DynamicValue::string("text"), FieldType::String),
		(DynamicValue::Float(0.125), FieldType::Float),
		(DynamicValue::Bool(false), FieldType::Bool),
		(DynamicValue::string("bytes\0here"), FieldType::Bytes),
	] {
		let field = to_field(&value, field_type, None, &arena, &store).expect("value converts");
		assert!(field.matches(field_type));
		assert_eq!(to_dynamic_value(&field, field_type, None, &options, &store), value);
	}
}
