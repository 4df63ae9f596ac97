use anyhow::{Context, Result};
use colored::Colorize;
use humansize::DECIMAL;
use serde::Serialize;

use swatch_rs::colors::ColorRecord;
use swatch_rs::config::Config;
use swatch_rs::lookup::ColorInfo;
use swatch_rs::store::ColorStore;

use crate::commands::Cli;

/// Loads the config and the working table the way every command starts.
pub(crate) fn open_store(cli: &Cli) -> Result<(Config, ColorStore)> {
	let config = Config::discover(cli.config.as_deref())?;
	let backend = config.open_backend()?;
	let mut store = ColorStore::open(backend);

	let source = match &cli.from {
		Some(path) => path.display().to_string(),
		None => store.backend().describe(),
	};
	store.load(cli.from.as_deref()).with_context(|| format!("Couldn't load colors from {source}"))?;

	Ok((config, store))
}

/// For commands that never load the catalog, where `--from` would silently do nothing.
pub(crate) fn reject_from(cli: &Cli, command: &str) -> Result<()> {
	if let Some(path) = &cli.from {
		anyhow::bail!("{command} does not read the catalog, drop --from {}", path.display());
	}
	Ok(())
}

/// A two-character block in the record's color, or blanks if it has none we can read.
pub(crate) fn swatch(record: &ColorRecord) -> String {
	match record.swatch() {
		Some(rgb) => "  ".on_truecolor(rgb.r, rgb.g, rgb.b).to_string(),
		None => "  ".to_string(),
	}
}

pub(crate) fn print_record(position: usize, record: &ColorRecord) {
	let title = if record.pantone_number.is_empty() {
		record.name.bold().to_string()
	} else {
		format!("{} ({})", record.name.bold(), record.pantone_number)
	};

	println!("{:>3}. {} {title}", position, swatch(record));
	println!("     Hex Code:   {}", record.hex_code);
	println!("     RGB Values: {}", record.rgb_values);
	if !record.notes.is_empty() {
		println!("     Notes:      {}", record.notes);
	}
}

pub(crate) fn print_table(store: &ColorStore) {
	if store.is_empty() {
		println!("No colors yet.");
		return;
	}

	for (i, (_, record)) in store.records().enumerate() {
		print_record(i + 1, record);
	}
}

#[derive(Serialize)]
struct JsonRow<'a> {
	position: usize,
	#[serde(flatten)]
	record: &'a ColorRecord,
}

pub(crate) fn table_json(store: &ColorStore) -> Result<String> {
	let rows = store.records()
		.enumerate()
		.map(|(i, (_, record))| JsonRow { position: i + 1, record })
		.collect::<Vec<JsonRow>>();
	Ok(serde_json::to_string_pretty(&rows)?)
}

pub(crate) fn print_color_info(info: &ColorInfo) {
	let swatch = "  ".on_truecolor(info.rgb.r, info.rgb.g, info.rgb.b);
	println!("{swatch} {}", info.name.bold());
	println!("   Hex: {}", info.hex);
	println!("   RGB: {}", info.rgb.triplet());
	println!("   HSL: {}°, {}%, {}%", info.hsl.h, info.hsl.s, info.hsl.l);
}

/// Fills an empty name or RGB value from the lookup API.
pub(crate) fn fill_from_lookup(config: &Config, record: &mut ColorRecord) {
	let Some(client) = config.lookup_client() else {
		eprintln!("NOTE: The color lookup is disabled in the config.");
		return;
	};

	match client.lookup(&record.hex_code) {
		Some(info) => {
			if record.name.trim().is_empty() {
				record.name = info.name;
			}
			if record.rgb_values.trim().is_empty() {
				record.rgb_values = info.rgb.triplet();
			}
		}
		None => eprintln!("NOTE: The color lookup returned no data for \"{}\".", record.hex_code),
	}
}

pub(crate) fn report_saved(store: &ColorStore) {
	let backend = store.backend();
	match backend.stored_size() {
		Some(size) => println!("Saved to {} ({})", backend.describe(), humansize::format_size(size, DECIMAL)),
		None => println!("Saved to {}", backend.describe()),
	}
}

/// Splits a shell line into words. Double quotes group words, a backslash escapes the
/// next character.
pub(crate) fn split_words(line: &str) -> Result<Vec<String>> {
	let mut words = Vec::new();
	let mut current = String::new();
	let mut in_word = false;
	let mut quoted = false;
	let mut chars = line.chars();

	while let Some(c) = chars.next() {
		match c {
			'\\' => {
				let escaped = chars.next().context("Dangling backslash")?;
				current.push(escaped);
				in_word = true;
			}
			'"' => {
				quoted = !quoted;
				in_word = true;
			}
			c if c.is_whitespace() && !quoted => {
				if in_word {
					words.push(std::mem::take(&mut current));
					in_word = false;
				}
			}
			c => {
				current.push(c);
				in_word = true;
			}
		}
	}

	if quoted {
		anyhow::bail!("Unterminated quote");
	}
	if in_word {
		words.push(current);
	}

	Ok(words)
}
