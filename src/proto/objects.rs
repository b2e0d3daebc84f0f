use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use bumpalo::Bump;

use crate::proto::{ConvertError, DynamicValue, FieldValue, HostObject, Message, MessageDescriptor, ObjectHandle, Result};

/// Resolve host objects to the native messages they wrap.
pub trait UnwrapMessage<'a> {
	/// Return the message wrapped by `value`.
	///
	/// Fails when `value` is not an object instance of `descriptor`'s message type.
	fn unwrap_message(&self, value: &DynamicValue, descriptor: &MessageDescriptor) -> Result<&'a Message<'a>>;
}

/// Produce host objects for native messages.
pub trait WrapMessage<'a> {
	/// Return a host object wrapping `message`, reusing one already created for it.
	fn wrap_message(&self, message: &'a Message<'a>, descriptor: &MessageDescriptor) -> DynamicValue;
}

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(1);

/// Host object registry over one arena.
///
/// Objects handed out by a store carry its identity; objects from other stores are
/// never resolved.
#[derive(Debug)]
pub struct ObjectStore<'a> {
	id: u64,
	arena: &'a Bump,
	messages: RefCell<Vec<&'a Message<'a>>>,
	by_address: RefCell<HashMap<usize, usize>>,
}

impl<'a> ObjectStore<'a> {
	/// Create an empty store whose messages live in `arena`.
	pub fn new(arena: &'a Bump) -> Self {
		Self {
			id: NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed),
			arena,
			messages: RefCell::new(Vec::new()),
			by_address: RefCell::new(HashMap::new()),
		}
	}

	/// Arena backing this store.
	pub fn arena(&self) -> &'a Bump {
		self.arena
	}

	/// Number of distinct messages wrapped so far.
	pub fn len(&self) -> usize {
		self.messages.borrow().len()
	}

	/// Whether no message has been wrapped yet.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Register `message` and return its host object (cached per message identity).
	pub fn register(&self, message: &'a Message<'a>) -> DynamicValue {
		let address = message as *const Message<'a> as usize;
		let class_name = &message.descriptor().full_name;

		if let Some(index) = self.by_address.borrow().get(&address).copied() {
			tracing::trace!(store = self.id, index, class = %class_name, "wrapper cache hit");
			return DynamicValue::Object(HostObject::message(class_name, ObjectHandle { store: self.id, index }));
		}

		let mut messages = self.messages.borrow_mut();
		let index = messages.len();
		messages.push(message);
		self.by_address.borrow_mut().insert(address, index);
		DynamicValue::Object(HostObject::message(class_name, ObjectHandle { store: self.id, index }))
	}

	/// Allocate a new message in the store arena and return its host object.
	pub fn new_message(&self, descriptor: &'a MessageDescriptor, fields: impl IntoIterator<Item = (u32, FieldValue<'a>)>) -> DynamicValue {
		self.register(Message::new_in(self.arena, descriptor, fields))
	}

	/// Message behind a host object handle issued by this store.
	pub fn get(&self, handle: ObjectHandle) -> Option<&'a Message<'a>> {
		if handle.store != self.id {
			return None;
		}
		self.messages.borrow().get(handle.index).copied()
	}
}

impl<'s: 'a, 'a> UnwrapMessage<'a> for ObjectStore<'s> {
	fn unwrap_message(&self, value: &DynamicValue, descriptor: &MessageDescriptor) -> Result<&'a Message<'a>> {
		let object = match value {
			DynamicValue::Object(object) => object,
			DynamicValue::Reference(slot) => return self.unwrap_message(&slot.borrow(), descriptor),
			other => {
				return Err(ConvertError::Conversion {
					target: "message",
					value: other.printable(),
				});
			}
		};

		let mismatch = || ConvertError::TypeMismatch {
			expected: descriptor.full_name.to_string(),
			got: object.class_name().to_owned(),
		};

		let message = object.handle().and_then(|handle| self.get(handle)).ok_or_else(mismatch)?;
		if message.descriptor().full_name != descriptor.full_name {
			return Err(mismatch());
		}
		Ok(message)
	}
}

impl<'a> WrapMessage<'a> for ObjectStore<'a> {
	fn wrap_message(&self, message: &'a Message<'a>, _descriptor: &MessageDescriptor) -> DynamicValue {
		self.register(message)
	}
}
