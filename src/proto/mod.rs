mod convert;
mod descriptor;
mod error;
mod field;
mod message;
mod numeric;
mod objects;
mod scalar;
mod value;
mod wrap;

/// Field conversion entry points and options.
pub use convert::{ConvertOptions, to_dynamic_value, to_field, to_field_borrowed};
/// Message schema types and well-known wrappers.
pub use descriptor::{FieldDescriptor, MessageDescriptor, TYPE_URL_PREFIX, WRAPPER_VALUE_FIELD, WrapperKind};
/// Error and result aliases.
pub use error::{ConvertError, Result};
/// Field kinds, typed values, and payload ownership.
pub use field::{DescriptorType, FieldType, FieldValue, Payload, field_type_for_tag};
/// Arena-allocated message.
pub use message::Message;
/// Host numeric-string parsing and float formatting.
pub use numeric::{Numeric, format_double, parse_numeric_str, parse_signed_decimal, parse_unsigned_decimal};
/// Host object collaborators and the in-process object store.
pub use objects::{ObjectStore, UnwrapMessage, WrapMessage};
/// Scalar coercions of host values.
pub use scalar::{coerce_slot_to_string, coerce_to_bool, coerce_to_double, coerce_to_int64, coerce_to_string};
/// Dynamic host value model.
pub use value::{DynamicValue, HostObject, ObjectHandle, Slot};
/// Wrapper-aware conversion.
pub use wrap::to_field_auto_wrap;
