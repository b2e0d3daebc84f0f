use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

static PROTOCONV_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn run_protoconv(args: &[&str]) -> Output {
	Command::new(protoconv_bin()).args(args).output().expect("protoconv command executes")
}

pub(crate) fn run_protoconv_json(args: &[&str]) -> serde_json::Value {
	let output = run_protoconv(args);
	assert!(
		output.status.success(),
		"protoconv command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn protoconv_bin() -> &'static PathBuf {
	PROTOCONV_BIN.get_or_init(resolve_protoconv_bin)
}

fn resolve_protoconv_bin() -> PathBuf {
	if let Some(path) = option_env!("CARGO_BIN_EXE_protoconv") {
		return PathBuf::from(path);
	}
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_protoconv") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let target_dir = std::env::var_os("CARGO_TARGET_DIR")
		.map(PathBuf::from)
		.unwrap_or_else(|| manifest_dir.join("target"));

	let mut bin = target_dir.join("debug");
	bin.push(if cfg!(windows) { "protoconv.exe" } else { "protoconv" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "protoconv"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build protoconv binary at {}", bin.display());

	bin
}
