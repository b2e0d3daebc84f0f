//! Public library API for converting dynamic host values into typed protobuf field values and back.

/// Numeric parsing, scalar coercion, field conversion, and wrapper auto-construction.
pub mod proto;
