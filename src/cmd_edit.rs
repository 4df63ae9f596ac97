use anyhow::{Context, Result};

use swatch_rs::error::StoreError;

use crate::commands::{Cli, EditArgs};
use crate::common::{open_store, report_saved};

pub(crate) fn swatch_edit(cli: &Cli, args: &EditArgs) -> Result<()> {
	let patch = args.fields.to_patch();
	if patch.is_empty() {
		anyhow::bail!("Nothing to change, pass at least one field");
	}

	let (_, mut store) = open_store(cli)?;

	let id = store.listing().resolve(args.position)?;
	let current = store.get(id).ok_or(StoreError::StaleRecord(id))?;
	let updated = patch.apply(current);

	let name = updated.name.clone();
	store.edit(id, updated).with_context(|| format!("Couldn't update {name}"))?;

	println!("Updated {name}");
	report_saved(&store);
	Ok(())
}
