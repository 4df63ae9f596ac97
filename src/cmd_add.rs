use anyhow::{Context, Result};

use swatch_rs::colors::ColorRecord;

use crate::commands::{AddArgs, Cli};
use crate::common::{fill_from_lookup, open_store, report_saved};

pub(crate) fn swatch_add(cli: &Cli, args: &AddArgs) -> Result<()> {
	let (config, mut store) = open_store(cli)?;

	let mut record = args.fields.to_patch().apply(&ColorRecord::default());
	if args.lookup {
		fill_from_lookup(&config, &mut record);
	}

	let name = record.name.clone();
	store.add(record).with_context(|| format!("Couldn't add {name}"))?;

	println!("Added {name}");
	report_saved(&store);
	Ok(())
}
