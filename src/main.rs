#![allow(missing_docs)]

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

mod cmd;

#[derive(Parser)]
#[command(name = "protoconv", about = "Host value to protobuf field conversion tools")]
struct Cli {
	/// Increase log verbosity (-v debug, -vv trace).
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Convert(cmd::convert::Args),
	Wrap(cmd::wrap::Args),
	Parse(cmd::parse::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(if err.is_fatal() { 2 } else { 1 });
	}
}

fn run(command: Commands) -> cmd::Result<()> {
	match command {
		Commands::Convert(args) => cmd::convert::run(args),
		Commands::Wrap(args) => cmd::wrap::run(args),
		Commands::Parse(args) => cmd::parse::run(args),
	}
}

fn init_tracing(verbose: u8) {
	let level = match verbose {
		0 => Level::WARN,
		1 => Level::DEBUG,
		_ => Level::TRACE,
	};

	tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).with_target(false).init();
}
