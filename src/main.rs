use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cmd_add::swatch_add;
use crate::cmd_delete::swatch_delete;
use crate::cmd_edit::swatch_edit;
use crate::cmd_import::swatch_import;
use crate::cmd_list::swatch_list;
use crate::cmd_lookup::swatch_lookup;
use crate::cmd_shell::swatch_shell;
use crate::commands::{Cli, Commands};

mod cmd_add;
mod cmd_delete;
mod cmd_edit;
mod cmd_import;
mod cmd_list;
mod cmd_lookup;
mod cmd_shell;
mod commands;
mod common;

fn init_logging(debug: bool) {
	// --debug wins over RUST_LOG, which wins over the quiet default
	let filter = if debug {
		EnvFilter::new("swatch_rs=debug,swatch=debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.debug);

	let result = match &cli.command {
		Some(Commands::List(args)) => swatch_list(&cli, args),
		Some(Commands::Add(args)) => swatch_add(&cli, args),
		Some(Commands::Edit(args)) => swatch_edit(&cli, args),
		Some(Commands::Delete(args)) => swatch_delete(&cli, args),
		Some(Commands::Import(args)) => swatch_import(&cli, args),
		Some(Commands::Lookup(args)) => swatch_lookup(&cli, args),
		Some(Commands::Shell) => swatch_shell(&cli),
		None => {
			eprintln!("No command given, see --help");
			return ExitCode::FAILURE;
		}
	};

	match result {
		Ok(_) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("execution failed: {e:#}");
			ExitCode::FAILURE
		}
	}
}
