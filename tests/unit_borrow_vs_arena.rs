#![allow(missing_docs)]

use bumpalo::Bump;
use protoconv::proto::{DynamicValue, FieldType, ObjectStore, Payload, to_field, to_field_borrowed};

#[test]
fn arena_payload_survives_source_drop() {
	let arena = Bump::new();
	let store = ObjectStore::new(&arena);

	let field = {
		let source = DynamicValue::string("transient");
		to_field(&source, FieldType::String, None, &arena, &store).expect("string converts")
	};

	assert_eq!(field.as_payload().map(Payload::as_bytes), Some(&b"transient"[..]));
}

#[test]
fn borrowed_payload_reads_source_bytes() {
	let source = DynamicValue::string("persistent");
	let arena = Bump::new();
	let store = ObjectStore::new(&arena);

	let field = to_field_borrowed(&source, FieldType::String, None, &store).expect("string converts");
	let payload = field.as_payload().expect("string payload");

	assert!(payload.is_borrowed());
	assert_eq!(payload.as_bytes(), b"persistent");
}

#[test]
fn borrowed_payload_moves_into_arena_on_demand() {
	let arena = Bump::new();
	let store = ObjectStore::new(&arena);
	let source = DynamicValue::string("copy me");

	let borrowed = to_field_borrowed(&source, FieldType::Bytes, None, &store).expect("bytes converts");
	let copied = borrowed.clone().into_arena(&arena);

	let copied_payload = copied.as_payload().expect("bytes payload");
	assert!(matches!(copied_payload, Payload::Arena(_)));
	assert_eq!(copied, borrowed);
	assert_ne!(copied_payload.as_ptr(), source.as_bytes().expect("string source").as_ptr());
}

#[test]
fn shared_slot_sees_string_rewrite() {
	let arena = Bump::new();
	let store = ObjectStore::new(&arena);
	let original = DynamicValue::reference(DynamicValue::Bool(false));
	let DynamicValue::Reference(slot) = &original else {
		panic!("expected reference");
	};
	let alias = DynamicValue::from_slot(slot);

	let field = to_field(&original, FieldType::String, None, &arena, &store).expect("bool converts");

	assert_eq!(field.as_payload().map(Payload::as_bytes), Some(&b""[..]));
	assert_eq!(alias, DynamicValue::string(""));
}

#[test]
fn arena_payload_is_isolated_from_source_mutation() {
	let arena = Bump::new();
	let store = ObjectStore::new(&arena);
	let source = DynamicValue::reference(DynamicValue::string("before"));
	let DynamicValue::Reference(slot) = &source else {
		panic!("expected reference");
	};

	let field = to_field(&source, FieldType::Bytes, None, &arena, &store).expect("bytes converts");
	*slot.borrow_mut() = DynamicValue::string("after");

	assert_eq!(field.as_payload().map(Payload::as_bytes), Some(&b"before"[..]));
	assert_eq!(source, DynamicValue::string("after"));
}
