use protoconv::proto::ConvertError;
use thiserror::Error;

/// Host value to field conversion command.
pub mod convert;
/// Byte-level numeric string parsing command.
pub mod parse;
/// Wrapper message auto-construction command.
pub mod wrap;

pub(crate) mod util;

#[cfg(test)]
pub(crate) mod test_support;

/// CLI result alias.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors reported by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
	#[error(transparent)]
	Convert(#[from] ConvertError),
	#[error("unknown field type name '{name}'")]
	UnknownTypeName { name: String },
	#[error("unknown wrapper kind '{name}'")]
	UnknownWrapper { name: String },
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
}

impl CliError {
	/// Whether the failure reports a broken invariant rather than bad input.
	pub fn is_fatal(&self) -> bool {
		matches!(self, Self::Convert(err) if err.is_fatal())
	}
}
