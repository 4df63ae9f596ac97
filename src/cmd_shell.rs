use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use colored::Colorize;

use swatch_rs::colors::{ColorRecord, Listing, RecordPatch};
use swatch_rs::config::Config;
use swatch_rs::error::StoreError;
use swatch_rs::store::ColorStore;

use crate::commands::Cli;
use crate::common::{fill_from_lookup, open_store, print_color_info, print_table, report_saved, split_words};

const HELP: &str = "\
Commands:
  list                          show all colors and remember their positions
  add field=value… [--lookup]   add a color (fields: name, pantone, hex, rgb, notes)
  edit POS field=value…         change fields of the color at POS
  delete POS                    delete the color at POS
  load [FILE]                   reload from the backend, or from FILE
  save                          write the working table to the backend again
  status                        show the backend and whether everything is saved
  lookup HEX                    ask The Color API about a hex code
  help, quit

Positions refer to the last list output, so after loading a file or deleting,
run list again before addressing colors by position.";

enum Flow {
	Continue,
	Quit,
}

struct Session {
	config: Config,
	store: ColorStore,
	listing: Listing,
}

pub(crate) fn swatch_shell(cli: &Cli) -> Result<()> {
	let (config, store) = open_store(cli)?;
	let listing = store.listing();
	let mut session = Session { config, store, listing };

	println!("{} colors loaded. Type help for a list of commands.", session.store.len());

	let stdin = io::stdin();
	let mut stdout = io::stdout();
	let mut line = String::new();
	loop {
		write!(stdout, "{} ", "swatch>".bold())?;
		stdout.flush()?;

		line.clear();
		if stdin.lock().read_line(&mut line)? == 0 {
			println!();
			break;
		}

		let words = match split_words(&line) {
			Ok(words) => words,
			Err(e) => {
				eprintln!("{} {e}", "error:".red());
				continue;
			}
		};
		let Some((command, args)) = words.split_first() else {
			continue;
		};

		match session.run(command, args) {
			Ok(Flow::Continue) => {}
			Ok(Flow::Quit) => break,
			Err(e) => eprintln!("{} {e:#}", "error:".red()),
		}
	}

	if !session.store.is_synced() {
		eprintln!("NOTE: {} does not hold the colors of this session, they were never saved.", session.store.backend().describe());
	}

	Ok(())
}

fn parse_position(args: &[String]) -> Result<(usize, &[String])> {
	let (position, rest) = args.split_first().context("Expected a position")?;
	let position = position.parse::<usize>().with_context(|| format!("\"{position}\" is not a position"))?;
	Ok((position, rest))
}

impl Session {
	fn run(&mut self, command: &str, args: &[String]) -> Result<Flow> {
		match command {
			"list" | "ls" => {
				print_table(&self.store);
				self.listing = self.store.listing();
			}
			"add" => self.add(args)?,
			"edit" => self.edit(args)?,
			"delete" | "rm" => self.delete(args)?,
			"load" => {
				let upload = args.first().map(PathBuf::from);
				let count = self.store.load(upload.as_deref())?;
				match &upload {
					Some(path) => println!("Loaded {count} colors from {}", path.display()),
					None => println!("Loaded {count} colors from {}", self.store.backend().describe()),
				}
			}
			"save" => {
				self.store.save()?;
				report_saved(&self.store);
			}
			"status" => {
				let state = if self.store.is_synced() { "saved".green() } else { "not saved".yellow() };
				println!("{} colors in {}, {state}", self.store.len(), self.store.backend().describe());
			}
			"lookup" => {
				let hex = args.first().context("Usage: lookup HEX")?;
				let client = self.config.lookup_client().context("The color lookup is disabled in the config")?;
				match client.lookup(hex) {
					Some(info) => print_color_info(&info),
					None => println!("No data for \"{hex}\"."),
				}
			}
			"help" | "?" => println!("{HELP}"),
			"quit" | "exit" | "q" => return Ok(Flow::Quit),
			other => anyhow::bail!("Unknown command \"{other}\", type help for a list of commands"),
		}

		Ok(Flow::Continue)
	}

	fn add(&mut self, args: &[String]) -> Result<()> {
		let lookup = args.iter().any(|a| a == "--lookup");
		let patch = RecordPatch::from_assignments(args.iter().filter(|a| a.as_str() != "--lookup"))?;

		let mut record = patch.apply(&ColorRecord::default());
		if lookup {
			fill_from_lookup(&self.config, &mut record);
		}

		let done = format!("Added {}", record.name);
		let result = self.store.add(record).map(|_| ());
		self.finish(result, done)
	}

	fn edit(&mut self, args: &[String]) -> Result<()> {
		let (position, fields) = parse_position(args)?;
		let patch = RecordPatch::from_assignments(fields)?;
		if patch.is_empty() {
			anyhow::bail!("Nothing to change, pass field=value pairs");
		}

		let id = self.listing.resolve(position)?;
		let current = self.store.get(id).ok_or(StoreError::StaleRecord(id))?;
		let updated = patch.apply(current);

		let done = format!("Updated {}", updated.name);
		let result = self.store.edit(id, updated);
		self.finish(result, done)
	}

	fn delete(&mut self, args: &[String]) -> Result<()> {
		let (position, _) = parse_position(args)?;
		let id = self.listing.resolve(position)?;
		let name = self.store.get(id).ok_or(StoreError::StaleRecord(id))?.name.clone();

		let result = self.store.delete(id).map(|_| ());
		self.finish(result, format!("Deleted {name}"))
	}

	/// A failed save still leaves the change in the working table, so say both.
	fn finish(&self, result: Result<(), StoreError>, done: String) -> Result<()> {
		match result {
			Ok(()) => {
				println!("{done}");
				report_saved(&self.store);
				Ok(())
			}
			Err(e @ StoreError::Persistence { .. }) => {
				println!("{done} in this session");
				Err(anyhow!(e).context("Not saved, run save to try again"))
			}
			Err(e) => Err(e.into()),
		}
	}
}
