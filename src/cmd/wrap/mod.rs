use bumpalo::Bump;
use protoconv::proto::{ConvertOptions, FieldType, ObjectStore, WRAPPER_VALUE_FIELD, to_dynamic_value, to_field_auto_wrap};

use crate::cmd::Result;
use crate::cmd::util::{FieldValueJson, HostValueJson, emit_json, field_value_json, host_value_json, parse_value_literal, parse_wrapper_kind, render_field_value, render_host_value};

#[derive(clap::Args)]
pub struct Args {
	#[arg(allow_hyphen_values = true)]
	pub value: String,
	#[arg(long)]
	pub wrapper: String,
	#[arg(long)]
	pub json: bool,
}

/// Build a well-known wrapper message around a host value literal.
pub fn run(args: Args) -> Result<()> {
	let Args { value: literal, wrapper, json } = args;

	let source = parse_value_literal(&literal);
	let kind = parse_wrapper_kind(&wrapper)?;
	let descriptor = kind.descriptor();
	let options = ConvertOptions::default();

	let arena = Bump::new();
	let store = ObjectStore::new(&arena);
	let field = to_field_auto_wrap(&source, FieldType::Message, Some(&descriptor), &arena, &store)?;
	let object = to_dynamic_value(&field, FieldType::Message, Some(&descriptor), &options, &store);
	let inner = field.as_message().and_then(|message| message.get(WRAPPER_VALUE_FIELD));
	let unwrapped = inner.map(|inner| to_dynamic_value(inner, kind.value_type(), None, &options, &store));

	if json {
		let payload = WrapJson {
			literal,
			wrapper: kind.full_name(),
			type_url: descriptor.type_url(),
			value_type: kind.value_type().as_str(),
			input: host_value_json(&source),
			value: inner.map(field_value_json),
			object: host_value_json(&object),
			unwrapped: unwrapped.as_ref().map(host_value_json),
		};
		return emit_json(&payload);
	}

	println!("input: {}", render_host_value(&source));
	println!("wrapper: {}", kind.full_name());
	println!("type_url: {}", descriptor.type_url());
	match inner {
		Some(inner) => println!("value: {}", render_field_value(inner)),
		None => println!("value: <unset>"),
	}
	println!("object: {}", render_host_value(&object));
	if let Some(unwrapped) = &unwrapped {
		println!("unwrapped: {}", render_host_value(unwrapped));
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct WrapJson {
	literal: String,
	wrapper: &'static str,
	type_url: String,
	value_type: &'static str,
	input: HostValueJson,
	value: Option<FieldValueJson>,
	object: HostValueJson,
	unwrapped: Option<HostValueJson>,
}
