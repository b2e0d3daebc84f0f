use std::cell::Ref;
use std::fmt;
use std::ops::Deref;

use bumpalo::Bump;

use crate::proto::{ConvertError, Message, Result};

/// Scalar or composite kind of a field slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
	/// Signed 32-bit integer.
	Int32,
	/// Signed 64-bit integer.
	Int64,
	/// Unsigned 32-bit integer.
	UInt32,
	/// Unsigned 64-bit integer.
	UInt64,
	/// 32-bit float.
	Float,
	/// 64-bit float.
	Double,
	/// Boolean.
	Bool,
	/// UTF-8 text (not validated here).
	String,
	/// Raw bytes.
	Bytes,
	/// Enum number, stored like `Int32`.
	Enum,
	/// Sub-message.
	Message,
}

impl FieldType {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Int32 => "int32",
			Self::Int64 => "int64",
			Self::UInt32 => "uint32",
			Self::UInt64 => "uint64",
			Self::Float => "float",
			Self::Double => "double",
			Self::Bool => "bool",
			Self::String => "string",
			Self::Bytes => "bytes",
			Self::Enum => "enum",
			Self::Message => "message",
		}
	}
}

impl fmt::Display for FieldType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Declared descriptor type, including wire-encoding variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorType {
	/// `double` (tag 1).
	Double,
	/// `float` (tag 2).
	Float,
	/// `int64` (tag 3).
	Int64,
	/// `uint64` (tag 4).
	UInt64,
	/// `int32` (tag 5).
	Int32,
	/// `fixed64` (tag 6).
	Fixed64,
	/// `fixed32` (tag 7).
	Fixed32,
	/// `bool` (tag 8).
	Bool,
	/// `string` (tag 9).
	String,
	/// `group` (tag 10).
	Group,
	/// `message` (tag 11).
	Message,
	/// `bytes` (tag 12).
	Bytes,
	/// `uint32` (tag 13).
	UInt32,
	/// `enum` (tag 14).
	Enum,
	/// `sfixed32` (tag 15).
	SFixed32,
	/// `sfixed64` (tag 16).
	SFixed64,
	/// `sint32` (tag 17).
	SInt32,
	/// `sint64` (tag 18).
	SInt64,
}

impl DescriptorType {
	/// Value kind this descriptor type is stored as.
	pub fn field_type(self) -> FieldType {
		match self {
			Self::Float => FieldType::Float,
			Self::Double => FieldType::Double,
			Self::Bool => FieldType::Bool,
			Self::String => FieldType::String,
			Self::Bytes => FieldType::Bytes,
			Self::Message | Self::Group => FieldType::Message,
			Self::Enum => FieldType::Enum,
			Self::Int32 | Self::SInt32 | Self::SFixed32 => FieldType::Int32,
			Self::Int64 | Self::SInt64 | Self::SFixed64 => FieldType::Int64,
			Self::UInt32 | Self::Fixed32 => FieldType::UInt32,
			Self::UInt64 | Self::Fixed64 => FieldType::UInt64,
		}
	}
}

impl TryFrom<i32> for DescriptorType {
	type Error = ConvertError;

	fn try_from(tag: i32) -> Result<Self> {
		Ok(match tag {
			1 => Self::Double,
			2 => Self::Float,
			3 => Self::Int64,
			4 => Self::UInt64,
			5 => Self::Int32,
			6 => Self::Fixed64,
			7 => Self::Fixed32,
			8 => Self::Bool,
			9 => Self::String,
			10 => Self::Group,
			11 => Self::Message,
			12 => Self::Bytes,
			13 => Self::UInt32,
			14 => Self::Enum,
			15 => Self::SFixed32,
			16 => Self::SFixed64,
			17 => Self::SInt32,
			18 => Self::SInt64,
			_ => return Err(ConvertError::UnknownFieldType { tag }),
		})
	}
}

impl From<DescriptorType> for FieldType {
	fn from(value: DescriptorType) -> Self {
		value.field_type()
	}
}

/// Resolve a raw descriptor type tag straight to its stored value kind.
pub fn field_type_for_tag(tag: i32) -> Result<FieldType> {
	DescriptorType::try_from(tag).map(FieldType::from)
}

/// String/bytes payload with explicit ownership.
pub enum Payload<'a> {
	/// Copied into the destination arena; independent of the source value.
	Arena(&'a [u8]),
	/// Text produced by coercion; the source had no string storage to borrow.
	Owned(Box<[u8]>),
	/// Borrowed from a plain string value.
	Borrowed(&'a [u8]),
	/// Borrowed from a string held in a reference slot; the slot stays read-locked.
	Slot(Ref<'a, [u8]>),
}

impl<'a> Payload<'a> {
	/// Payload bytes.
	pub fn as_bytes(&self) -> &[u8] {
		match self {
			Self::Arena(bytes) | Self::Borrowed(bytes) => *bytes,
			Self::Owned(bytes) => &bytes[..],
			Self::Slot(bytes) => &bytes[..],
		}
	}

	/// Whether the payload aliases the source value's storage.
	pub fn is_borrowed(&self) -> bool {
		matches!(self, Self::Borrowed(_) | Self::Slot(_))
	}

	/// Copy the payload into `arena` unless it already lives there.
	pub fn into_arena(self, arena: &'a Bump) -> Payload<'a> {
		match self {
			Self::Arena(bytes) => Self::Arena(bytes),
			other => Self::Arena(arena.alloc_slice_copy(other.as_bytes())),
		}
	}

	/// Stable lowercase storage label.
	pub fn storage_label(&self) -> &'static str {
		match self {
			Self::Arena(_) => "arena",
			Self::Owned(_) => "owned",
			Self::Borrowed(_) => "borrowed",
			Self::Slot(_) => "slot",
		}
	}
}

impl Deref for Payload<'_> {
	type Target = [u8];

	fn deref(&self) -> &[u8] {
		self.as_bytes()
	}
}

impl Clone for Payload<'_> {
	fn clone(&self) -> Self {
		match self {
			Self::Arena(bytes) => Self::Arena(*bytes),
			Self::Owned(bytes) => Self::Owned(bytes.clone()),
			Self::Borrowed(bytes) => Self::Borrowed(*bytes),
			Self::Slot(bytes) => Self::Slot(Ref::clone(bytes)),
		}
	}
}

impl fmt::Debug for Payload<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Payload")
			.field("storage", &self.storage_label())
			.field("bytes", &String::from_utf8_lossy(self.as_bytes()))
			.finish()
	}
}

impl PartialEq for Payload<'_> {
	fn eq(&self, other: &Self) -> bool {
		self.as_bytes() == other.as_bytes()
	}
}

/// Typed field value; the active variant always matches the field type that produced it.
#[derive(Debug, Clone)]
pub enum FieldValue<'a> {
	/// `Int32` and `Enum` fields.
	Int32(i32),
	/// `Int64` fields.
	Int64(i64),
	/// `UInt32` fields.
	UInt32(u32),
	/// `UInt64` fields.
	UInt64(u64),
	/// `Float` fields.
	Float(f32),
	/// `Double` fields.
	Double(f64),
	/// `Bool` fields.
	Bool(bool),
	/// `String` and `Bytes` fields.
	Str(Payload<'a>),
	/// `Message` fields.
	Message(&'a Message<'a>),
}

impl<'a> FieldValue<'a> {
	/// Whether the active variant is the one produced for `field_type`.
	pub fn matches(&self, field_type: FieldType) -> bool {
		matches!(
			(self, field_type),
			(Self::Int32(_), FieldType::Int32 | FieldType::Enum)
				| (Self::Int64(_), FieldType::Int64)
				| (Self::UInt32(_), FieldType::UInt32)
				| (Self::UInt64(_), FieldType::UInt64)
				| (Self::Float(_), FieldType::Float)
				| (Self::Double(_), FieldType::Double)
				| (Self::Bool(_), FieldType::Bool)
				| (Self::Str(_), FieldType::String | FieldType::Bytes)
				| (Self::Message(_), FieldType::Message)
		)
	}

	/// Move any borrowed or owned payload into `arena`.
	pub fn into_arena(self, arena: &'a Bump) -> FieldValue<'a> {
		match self {
			Self::Str(payload) => Self::Str(payload.into_arena(arena)),
			other => other,
		}
	}

	/// Payload for string/bytes values.
	pub fn as_payload(&self) -> Option<&Payload<'a>> {
		match self {
			Self::Str(payload) => Some(payload),
			_ => None,
		}
	}

	/// Sub-message for message values.
	pub fn as_message(&self) -> Option<&'a Message<'a>> {
		match self {
			Self::Message(message) => Some(*message),
			_ => None,
		}
	}
}

impl PartialEq for FieldValue<'_> {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Int32(left), Self::Int32(right)) => left == right,
			(Self::Int64(left), Self::Int64(right)) => left == right,
			(Self::UInt32(left), Self::UInt32(right)) => left == right,
			(Self::UInt64(left), Self::UInt64(right)) => left == right,
			(Self::Float(left), Self::Float(right)) => left == right,
			(Self::Double(left), Self::Double(right)) => left == right,
			(Self::Bool(left), Self::Bool(right)) => left == right,
			(Self::Str(left), Self::Str(right)) => left == right,
			(Self::Message(left), Self::Message(right)) => std::ptr::eq(*left, *right),
			_ => false,
		}
	}
}
