use protoconv::proto::{Numeric, format_double, parse_numeric_str, parse_signed_decimal, parse_unsigned_decimal};

use crate::cmd::Result;
use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	#[arg(allow_hyphen_values = true)]
	pub text: String,
	#[arg(long, conflicts_with = "numeric")]
	pub unsigned: bool,
	#[arg(long)]
	pub numeric: bool,
	#[arg(long)]
	pub json: bool,
}

/// Run one of the host numeric-string parsers over raw text.
pub fn run(args: Args) -> Result<()> {
	let Args { text, unsigned, numeric, json } = args;

	let bytes = text.as_bytes();
	let (mode, parsed) = if unsigned {
		("unsigned", parse_unsigned_decimal(bytes).map(Parsed::Unsigned))
	} else if numeric {
		("numeric", parse_numeric_str(bytes).map(Parsed::Numeric))
	} else {
		("signed", parse_signed_decimal(bytes).map(Parsed::Signed))
	};
	tracing::debug!(mode, valid = parsed.is_some(), "parsed");

	if json {
		let payload = ParseJson {
			input: text,
			mode,
			valid: parsed.is_some(),
			kind: parsed.map(Parsed::kind),
			value: parsed.map_or(serde_json::Value::Null, Parsed::json),
			printed: parsed.map(Parsed::printed),
		};
		return emit_json(&payload);
	}

	println!("input: {text:?}");
	println!("mode: {mode}");
	match parsed {
		Some(parsed) => {
			println!("kind: {}", parsed.kind());
			println!("value: {}", parsed.printed());
		}
		None => println!("value: invalid"),
	}

	Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Parsed {
	Unsigned(u64),
	Signed(i64),
	Numeric(Numeric),
}

impl Parsed {
	fn kind(self) -> &'static str {
		match self {
			Self::Unsigned(_) => "uint64",
			Self::Signed(_) | Self::Numeric(Numeric::Int(_)) => "int64",
			Self::Numeric(Numeric::Float(_)) => "double",
		}
	}

	fn json(self) -> serde_json::Value {
		match self {
			Self::Unsigned(value) => serde_json::json!(value),
			Self::Signed(value) | Self::Numeric(Numeric::Int(value)) => serde_json::json!(value),
			Self::Numeric(Numeric::Float(value)) => serde_json::Number::from_f64(value).map_or(serde_json::Value::Null, serde_json::Value::Number),
		}
	}

	/// Host string form of the parsed value.
	fn printed(self) -> String {
		match self {
			Self::Unsigned(value) => value.to_string(),
			Self::Signed(value) | Self::Numeric(Numeric::Int(value)) => value.to_string(),
			Self::Numeric(Numeric::Float(value)) => format_double(value),
		}
	}
}

#[derive(serde::Serialize)]
struct ParseJson {
	input: String,
	mode: &'static str,
	valid: bool,
	kind: Option<&'static str>,
	value: serde_json::Value,
	printed: Option<String>,
}
