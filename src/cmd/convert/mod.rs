use bumpalo::Bump;
use protoconv::proto::{ConvertOptions, FieldType, MessageDescriptor, ObjectStore, to_dynamic_value, to_field, to_field_borrowed};

use crate::cmd::Result;
use crate::cmd::util::{
	FieldValueJson, HostValueJson, emit_json, field_value_json, host_value_json, parse_field_type, parse_value_literal, parse_wrapper_kind, render_field_value,
	render_host_value,
};

#[derive(clap::Args)]
pub struct Args {
	#[arg(allow_hyphen_values = true)]
	pub value: String,
	#[arg(long = "type")]
	pub field_type: String,
	/// Message full name (or wrapper kind) for message-typed conversions.
	#[arg(long)]
	pub message: Option<String>,
	#[arg(long)]
	pub borrow: bool,
	#[arg(long = "narrow-host")]
	pub narrow_host: bool,
	#[arg(long)]
	pub json: bool,
}

/// Convert a host value literal into a typed field and back.
pub fn run(args: Args) -> Result<()> {
	let Args {
		value: literal,
		field_type,
		message,
		borrow,
		narrow_host,
		json,
	} = args;

	let source = parse_value_literal(&literal);
	let input = host_value_json(&source);
	let input_text = render_host_value(&source);
	let field_type = parse_field_type(&field_type)?;
	let descriptor = message.as_deref().map(resolve_descriptor);
	let options = if narrow_host { ConvertOptions::legacy_narrow_host() } else { ConvertOptions::default() };

	let arena = Bump::new();
	let store = ObjectStore::new(&arena);
	let field = if borrow {
		to_field_borrowed(&source, field_type, descriptor.as_ref(), &store)?
	} else {
		to_field(&source, field_type, descriptor.as_ref(), &arena, &store)?
	};
	let host = to_dynamic_value(&field, field_type, descriptor.as_ref(), &options, &store);
	tracing::debug!(%field_type, borrow, narrow_host, "converted");

	if json {
		let payload = ConvertJson {
			literal,
			field_type: field_type.as_str(),
			mode: if borrow { "borrow" } else { "arena" },
			input,
			field: field_value_json(&field),
			host: host_value_json(&host),
			source_after: host_value_json(&source),
		};
		return emit_json(&payload);
	}

	println!("input: {input_text}");
	println!("type: {field_type}");
	println!("mode: {}", if borrow { "borrow" } else { "arena" });
	println!("field: {}", render_field_value(&field));
	println!("host: {}", render_host_value(&host));
	println!("source_after: {}", render_host_value(&source));

	Ok(())
}

fn resolve_descriptor(name: &str) -> MessageDescriptor {
	match parse_wrapper_kind(name) {
		Ok(kind) => kind.descriptor(),
		Err(_) => MessageDescriptor::new(name, Vec::new()),
	}
}

#[derive(serde::Serialize)]
struct ConvertJson {
	literal: String,
	field_type: &'static str,
	mode: &'static str,
	input: HostValueJson,
	field: FieldValueJson,
	host: HostValueJson,
	source_after: HostValueJson,
}
