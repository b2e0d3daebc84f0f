use std::sync::Arc;

use crate::proto::FieldType;

/// Prefix of `Any` type URLs.
pub const TYPE_URL_PREFIX: &str = "type.googleapis.com/";

/// Field number carried by every wrapper message.
pub const WRAPPER_VALUE_FIELD: u32 = 1;

/// Message schema used by message-typed conversions.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageDescriptor {
	/// Fully-qualified message name (for example `google.protobuf.Int32Value`).
	pub full_name: Box<str>,
	/// Declared fields in declaration order.
	pub fields: Vec<FieldDescriptor>,
}

/// One declared field of a message.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
	/// Field name.
	pub name: Box<str>,
	/// Field number.
	pub number: u32,
	/// Field value kind.
	pub field_type: FieldType,
	/// Sub-message schema for message-typed fields.
	pub message_type: Option<Arc<MessageDescriptor>>,
}

impl FieldDescriptor {
	/// Scalar (non-message) field.
	pub fn scalar(name: &str, number: u32, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			number,
			field_type,
			message_type: None,
		}
	}

	/// Message-typed field.
	pub fn message(name: &str, number: u32, message_type: Arc<MessageDescriptor>) -> Self {
		Self {
			name: name.into(),
			number,
			field_type: FieldType::Message,
			message_type: Some(message_type),
		}
	}
}

impl MessageDescriptor {
	/// Build a descriptor from a name and fields.
	pub fn new(full_name: &str, fields: Vec<FieldDescriptor>) -> Self {
		Self {
			full_name: full_name.into(),
			fields,
		}
	}

	/// Look up a field by number.
	pub fn field_by_number(&self, number: u32) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|field| field.number == number)
	}

	/// Look up a field by name.
	pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|field| &*field.name == name)
	}

	/// Wrapper kind when this is a well-known wrapper message.
	pub fn wrapper_kind(&self) -> Option<WrapperKind> {
		WrapperKind::from_full_name(&self.full_name)
	}

	/// Whether this is a well-known single-field wrapper message.
	pub fn is_wrapper(&self) -> bool {
		self.wrapper_kind().is_some()
	}

	/// Value field of a wrapper message.
	pub fn wrapper_value_field(&self) -> Option<&FieldDescriptor> {
		if !self.is_wrapper() {
			return None;
		}
		self.field_by_number(WRAPPER_VALUE_FIELD)
	}

	/// `Any` type URL for this message.
	pub fn type_url(&self) -> String {
		format!("{TYPE_URL_PREFIX}{}", self.full_name)
	}
}

/// Well-known wrapper messages (`google.protobuf.*Value`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapperKind {
	/// `google.protobuf.DoubleValue`.
	Double,
	/// `google.protobuf.FloatValue`.
	Float,
	/// `google.protobuf.Int64Value`.
	Int64,
	/// `google.protobuf.UInt64Value`.
	UInt64,
	/// `google.protobuf.Int32Value`.
	Int32,
	/// `google.protobuf.UInt32Value`.
	UInt32,
	/// `google.protobuf.BoolValue`.
	Bool,
	/// `google.protobuf.StringValue`.
	String,
	/// `google.protobuf.BytesValue`.
	Bytes,
}

impl WrapperKind {
	/// All wrapper kinds.
	pub const ALL: [WrapperKind; 9] = [
		Self::Double,
		Self::Float,
		Self::Int64,
		Self::UInt64,
		Self::Int32,
		Self::UInt32,
		Self::Bool,
		Self::String,
		Self::Bytes,
	];

	/// Fully-qualified message name.
	pub fn full_name(self) -> &'static str {
		match self {
			Self::Double => "google.protobuf.DoubleValue",
			Self::Float => "google.protobuf.FloatValue",
			Self::Int64 => "google.protobuf.Int64Value",
			Self::UInt64 => "google.protobuf.UInt64Value",
			Self::Int32 => "google.protobuf.Int32Value",
			Self::UInt32 => "google.protobuf.UInt32Value",
			Self::Bool => "google.protobuf.BoolValue",
			Self::String => "google.protobuf.StringValue",
			Self::Bytes => "google.protobuf.BytesValue",
		}
	}

	/// Type of the wrapped `value` field.
	pub fn value_type(self) -> FieldType {
		match self {
			Self::Double => FieldType::Double,
			Self::Float => FieldType::Float,
			Self::Int64 => FieldType::Int64,
			Self::UInt64 => FieldType::UInt64,
			Self::Int32 => FieldType::Int32,
			Self::UInt32 => FieldType::UInt32,
			Self::Bool => FieldType::Bool,
			Self::String => FieldType::String,
			Self::Bytes => FieldType::Bytes,
		}
	}

	/// Resolve a wrapper kind from a message full name.
	pub fn from_full_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.full_name() == name)
	}

	/// Build the wrapper message descriptor.
	pub fn descriptor(self) -> MessageDescriptor {
		MessageDescriptor::new(self.full_name(), vec![FieldDescriptor::scalar("value", WRAPPER_VALUE_FIELD, self.value_type())])
	}
}
