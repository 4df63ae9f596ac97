use anyhow::{Context, Result};

use crate::commands::{Cli, DeleteArgs};
use crate::common::{open_store, report_saved};

pub(crate) fn swatch_delete(cli: &Cli, args: &DeleteArgs) -> Result<()> {
	let (_, mut store) = open_store(cli)?;

	let id = store.listing().resolve(args.position)?;
	let removed = store.delete(id).with_context(|| format!("Couldn't delete color #{}", args.position))?;

	println!("Deleted {}", removed.name);
	report_saved(&store);
	Ok(())
}
