use bumpalo::Bump;

use crate::proto::{FieldValue, MessageDescriptor};

/// Immutable message allocated in an arena.
///
/// Every string/bytes payload stored here is arena-backed, so a message never pins a
/// source value or a reference slot.
#[derive(Debug)]
pub struct Message<'a> {
	descriptor: &'a MessageDescriptor,
	fields: &'a [(u32, FieldValue<'a>)],
}

impl<'a> Message<'a> {
	/// Allocate a message in `arena` with the given field values.
	pub fn new_in(arena: &'a Bump, descriptor: &'a MessageDescriptor, fields: impl IntoIterator<Item = (u32, FieldValue<'a>)>) -> &'a Message<'a> {
		let fields: Vec<_> = fields.into_iter().map(|(number, value)| (number, value.into_arena(arena))).collect();
		let fields = arena.alloc_slice_fill_iter(fields);
		arena.alloc(Message { descriptor, fields })
	}

	/// Allocate a message with no fields set.
	pub fn empty_in(arena: &'a Bump, descriptor: &'a MessageDescriptor) -> &'a Message<'a> {
		Self::new_in(arena, descriptor, std::iter::empty())
	}

	/// Message schema.
	pub fn descriptor(&self) -> &'a MessageDescriptor {
		self.descriptor
	}

	/// Value of field `number`, if set.
	pub fn get(&self, number: u32) -> Option<&FieldValue<'a>> {
		self.fields.iter().find(|(item, _)| *item == number).map(|(_, value)| value)
	}

	/// Set fields in storage order.
	pub fn fields(&self) -> impl Iterator<Item = (u32, &FieldValue<'a>)> {
		self.fields.iter().map(|(number, value)| (*number, value))
	}
}
