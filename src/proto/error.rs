use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Errors produced while coercing host values into typed field values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
	/// Value could not be coerced to the requested type.
	#[error("Cannot convert '{value}' to {target}")]
	Conversion {
		/// Target type label (`integer`, `double`, `bool`, `string`, `message`).
		target: &'static str,
		/// Printable form of the offending value.
		value: String,
	},
	/// Float value does not fit the 64-bit integer range.
	#[error("Out of range")]
	OutOfRange {
		/// Offending float value.
		value: f64,
	},
	/// Object is not an instance of the expected message type.
	#[error("Given value is not an instance of {expected} (got {got})")]
	TypeMismatch {
		/// Expected message full name.
		expected: String,
		/// Class name of the supplied value.
		got: String,
	},
	/// Descriptor type tag outside the known set.
	#[error("unknown field type {tag}")]
	UnknownFieldType {
		/// Raw descriptor type tag.
		tag: i32,
	},
}

impl ConvertError {
	/// Whether the error reports a broken invariant rather than bad input.
	pub fn is_fatal(&self) -> bool {
		matches!(self, Self::UnknownFieldType { .. })
	}
}
