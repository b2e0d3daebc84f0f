use std::cell::RefCell;
use std::rc::Rc;

use crate::proto::format_double;

/// Shared mutable host slot targeted by a [`DynamicValue::Reference`].
pub type Slot = Rc<RefCell<DynamicValue>>;

/// Dynamically typed host value.
#[derive(Debug, Clone)]
pub enum DynamicValue {
	/// Host null.
	Null,
	/// Host boolean.
	Bool(bool),
	/// Host native integer (always 64-bit).
	Integer(i64),
	/// Host double.
	Float(f64),
	/// Host byte string (not necessarily UTF-8).
	String(Vec<u8>),
	/// Host object instance.
	Object(HostObject),
	/// Reference to a shared slot; dereferenced before conversion.
	Reference(Slot),
}

impl DynamicValue {
	/// Build a string value from text or bytes.
	pub fn string(value: impl Into<Vec<u8>>) -> Self {
		Self::String(value.into())
	}

	/// Wrap a value in a fresh reference slot.
	///
	/// References to references collapse into the existing slot.
	pub fn reference(value: DynamicValue) -> Self {
		match value {
			Self::Reference(slot) => Self::Reference(slot),
			other => Self::Reference(Rc::new(RefCell::new(other))),
		}
	}

	/// Create a reference that shares an existing slot.
	pub fn from_slot(slot: &Slot) -> Self {
		Self::Reference(Rc::clone(slot))
	}

	/// Stable lowercase label of the runtime tag.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Integer(_) => "integer",
			Self::Float(_) => "float",
			Self::String(_) => "string",
			Self::Object(_) => "object",
			Self::Reference(_) => "reference",
		}
	}

	/// Whether the value, after dereferencing, is an object.
	pub fn is_object(&self) -> bool {
		match self {
			Self::Object(_) => true,
			Self::Reference(slot) => slot.borrow().is_object(),
			_ => false,
		}
	}

	/// Borrow string bytes when the value is directly a string.
	pub fn as_bytes(&self) -> Option<&[u8]> {
		match self {
			Self::String(bytes) => Some(bytes),
			_ => None,
		}
	}

	/// Printable form used in conversion error messages.
	pub fn printable(&self) -> String {
		match self {
			Self::Null => String::new(),
			Self::Bool(true) => "1".to_owned(),
			Self::Bool(false) => String::new(),
			Self::Integer(value) => value.to_string(),
			Self::Float(value) => format_double(*value),
			Self::String(bytes) => String::from_utf8_lossy(bytes).into_owned(),
			Self::Object(object) => object.class_name().to_owned(),
			Self::Reference(slot) => slot.borrow().printable(),
		}
	}
}

impl PartialEq for DynamicValue {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Reference(left), Self::Reference(right)) if Rc::ptr_eq(left, right) => true,
			(Self::Reference(left), _) => *left.borrow() == *other,
			(_, Self::Reference(right)) => *self == *right.borrow(),
			(Self::Null, Self::Null) => true,
			(Self::Bool(left), Self::Bool(right)) => left == right,
			(Self::Integer(left), Self::Integer(right)) => left == right,
			(Self::Float(left), Self::Float(right)) => left == right,
			(Self::String(left), Self::String(right)) => left == right,
			(Self::Object(left), Self::Object(right)) => left == right,
			_ => false,
		}
	}
}

/// Handle locating a message inside the object store that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle {
	/// Identity of the owning store.
	pub store: u64,
	/// Index of the message within that store.
	pub index: usize,
}

/// Host object instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostObject {
	class_name: Box<str>,
	handle: Option<ObjectHandle>,
}

impl HostObject {
	/// Plain host object that wraps no message.
	pub fn plain(class_name: &str) -> Self {
		Self {
			class_name: class_name.into(),
			handle: None,
		}
	}

	/// Object wrapping a stored message.
	pub fn message(class_name: &str, handle: ObjectHandle) -> Self {
		Self {
			class_name: class_name.into(),
			handle: Some(handle),
		}
	}

	/// Host class name.
	pub fn class_name(&self) -> &str {
		&self.class_name
	}

	/// Store handle when the object wraps a message.
	pub fn handle(&self) -> Option<ObjectHandle> {
		self.handle
	}
}
