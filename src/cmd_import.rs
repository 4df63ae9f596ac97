use anyhow::{Context, Result};

use swatch_rs::config::Config;
use swatch_rs::store::ColorStore;

use crate::commands::{Cli, ImportArgs};
use crate::common::{reject_from, report_saved};

pub(crate) fn swatch_import(cli: &Cli, args: &ImportArgs) -> Result<()> {
	reject_from(cli, "import")?;

	let config = Config::discover(cli.config.as_deref())?;
	let mut store = ColorStore::open(config.open_backend()?);

	let count = store.load(Some(&args.input))
		.with_context(|| format!("Couldn't import {}", args.input.display()))?;
	store.save()?;

	println!("Imported {count} colors from {}", args.input.display());
	report_saved(&store);
	Ok(())
}
