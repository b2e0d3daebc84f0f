use protoconv::proto::{DescriptorType, DynamicValue, FieldType, FieldValue, HostObject, Payload, WrapperKind, field_type_for_tag, format_double};

use crate::cmd::{CliError, Result};

/// Parse a host value literal.
///
/// `null`, `true`, `false`, integers, and float literals map to their host tags;
/// `'text'`/`"text"` are strings, `@Class` is a plain host object, and anything else
/// is taken verbatim as a string. A leading `&` wraps the rest in a reference slot.
pub(crate) fn parse_value_literal(text: &str) -> DynamicValue {
	if let Some(rest) = text.strip_prefix('&') {
		return DynamicValue::reference(parse_value_literal(rest));
	}

	match text {
		"null" => return DynamicValue::Null,
		"true" => return DynamicValue::Bool(true),
		"false" => return DynamicValue::Bool(false),
		_ => {}
	}

	if let Some(inner) = unquote(text) {
		return DynamicValue::string(inner);
	}
	if let Some(class_name) = text.strip_prefix('@')
		&& !class_name.is_empty()
	{
		return DynamicValue::Object(HostObject::plain(class_name));
	}
	if let Ok(value) = text.parse::<i64>() {
		return DynamicValue::Integer(value);
	}
	if is_float_literal(text)
		&& let Ok(value) = text.parse::<f64>()
	{
		return DynamicValue::Float(value);
	}

	DynamicValue::string(text)
}

fn unquote(text: &str) -> Option<&str> {
	['\'', '"'].into_iter().find_map(|quote| text.strip_prefix(quote)?.strip_suffix(quote))
}

fn is_float_literal(text: &str) -> bool {
	text.bytes().any(|byte| byte.is_ascii_digit()) && text.bytes().all(|byte| byte.is_ascii_digit() || matches!(byte, b'+' | b'-' | b'.' | b'e' | b'E'))
}

/// Resolve a field type from a label, a descriptor type name, or a numeric descriptor tag.
pub(crate) fn parse_field_type(name: &str) -> Result<FieldType> {
	if let Ok(tag) = name.parse::<i32>() {
		return Ok(field_type_for_tag(tag)?);
	}

	let descriptor_type = match name.to_ascii_lowercase().as_str() {
		"double" => DescriptorType::Double,
		"float" => DescriptorType::Float,
		"int64" => DescriptorType::Int64,
		"uint64" => DescriptorType::UInt64,
		"int32" => DescriptorType::Int32,
		"fixed64" => DescriptorType::Fixed64,
		"fixed32" => DescriptorType::Fixed32,
		"bool" => DescriptorType::Bool,
		"string" => DescriptorType::String,
		"group" => DescriptorType::Group,
		"message" => DescriptorType::Message,
		"bytes" => DescriptorType::Bytes,
		"uint32" => DescriptorType::UInt32,
		"enum" => DescriptorType::Enum,
		"sfixed32" => DescriptorType::SFixed32,
		"sfixed64" => DescriptorType::SFixed64,
		"sint32" => DescriptorType::SInt32,
		"sint64" => DescriptorType::SInt64,
		_ => return Err(CliError::UnknownTypeName { name: name.to_owned() }),
	};
	Ok(descriptor_type.field_type())
}

/// Resolve a wrapper kind from `int32`, `Int32Value`, or `google.protobuf.Int32Value`.
pub(crate) fn parse_wrapper_kind(name: &str) -> Result<WrapperKind> {
	let short = name.strip_prefix("google.protobuf.").unwrap_or(name);
	let short = short.strip_suffix("Value").unwrap_or(short);
	WrapperKind::ALL
		.into_iter()
		.find(|kind| kind.value_type().as_str().eq_ignore_ascii_case(short))
		.ok_or_else(|| CliError::UnknownWrapper { name: name.to_owned() })
}

/// JSON form of a host value.
#[derive(serde::Serialize)]
pub(crate) struct HostValueJson {
	pub kind: &'static str,
	pub reference: bool,
	pub value: serde_json::Value,
}

/// Describe a host value, seeing through reference slots.
pub(crate) fn host_value_json(value: &DynamicValue) -> HostValueJson {
	match value {
		DynamicValue::Reference(slot) => HostValueJson {
			reference: true,
			..host_value_json(&slot.borrow())
		},
		other => HostValueJson {
			kind: other.kind(),
			reference: false,
			value: scalar_json(other),
		},
	}
}

fn scalar_json(value: &DynamicValue) -> serde_json::Value {
	match value {
		DynamicValue::Null => serde_json::Value::Null,
		DynamicValue::Bool(value) => serde_json::json!(value),
		DynamicValue::Integer(value) => serde_json::json!(value),
		DynamicValue::Float(value) => float_json(*value),
		DynamicValue::String(bytes) => serde_json::json!(String::from_utf8_lossy(bytes)),
		DynamicValue::Object(object) => serde_json::json!(object.class_name()),
		DynamicValue::Reference(slot) => scalar_json(&slot.borrow()),
	}
}

fn float_json(value: f64) -> serde_json::Value {
	serde_json::Number::from_f64(value)
		.map(serde_json::Value::Number)
		.unwrap_or_else(|| serde_json::json!(format_double(value)))
}

/// Render a host value for text output.
pub(crate) fn render_host_value(value: &DynamicValue) -> String {
	match value {
		DynamicValue::Null => "null".to_owned(),
		DynamicValue::Bool(value) => value.to_string(),
		DynamicValue::Integer(value) => value.to_string(),
		DynamicValue::Float(value) => format_double(*value),
		DynamicValue::String(bytes) => format!("{:?}", String::from_utf8_lossy(bytes)),
		DynamicValue::Object(object) => format!("object({})", object.class_name()),
		DynamicValue::Reference(slot) => format!("&{}", render_host_value(&slot.borrow())),
	}
}

/// JSON form of a typed field value.
#[derive(serde::Serialize)]
pub(crate) struct FieldValueJson {
	pub variant: &'static str,
	pub value: serde_json::Value,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub storage: Option<&'static str>,
}

/// Describe a typed field value.
pub(crate) fn field_value_json(field: &FieldValue<'_>) -> FieldValueJson {
	let (variant, value) = match field {
		FieldValue::Int32(value) => ("int32", serde_json::json!(value)),
		FieldValue::Int64(value) => ("int64", serde_json::json!(value)),
		FieldValue::UInt32(value) => ("uint32", serde_json::json!(value)),
		FieldValue::UInt64(value) => ("uint64", serde_json::json!(value)),
		FieldValue::Float(value) => ("float", float_json(f64::from(*value))),
		FieldValue::Double(value) => ("double", float_json(*value)),
		FieldValue::Bool(value) => ("bool", serde_json::json!(value)),
		FieldValue::Str(payload) => ("str", serde_json::json!(String::from_utf8_lossy(payload.as_bytes()))),
		FieldValue::Message(message) => ("message", serde_json::json!(&*message.descriptor().full_name)),
	};
	FieldValueJson {
		variant,
		value,
		storage: field.as_payload().map(Payload::storage_label),
	}
}

/// Render a typed field value for text output.
pub(crate) fn render_field_value(field: &FieldValue<'_>) -> String {
	match field {
		FieldValue::Int32(value) => format!("int32 {value}"),
		FieldValue::Int64(value) => format!("int64 {value}"),
		FieldValue::UInt32(value) => format!("uint32 {value}"),
		FieldValue::UInt64(value) => format!("uint64 {value}"),
		FieldValue::Float(value) => format!("float {value}"),
		FieldValue::Double(value) => format!("double {value}"),
		FieldValue::Bool(value) => format!("bool {value}"),
		FieldValue::Str(payload) => format!("str {:?} ({})", String::from_utf8_lossy(payload.as_bytes()), payload.storage_label()),
		FieldValue::Message(message) => format!("message {}", message.descriptor().full_name),
	}
}

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}
