use anyhow::Result;

use crate::commands::{Cli, ListArgs};
use crate::common::{open_store, print_table, table_json};

pub(crate) fn swatch_list(cli: &Cli, args: &ListArgs) -> Result<()> {
	let (_, store) = open_store(cli)?;

	if args.json {
		println!("{}", table_json(&store)?);
	} else {
		print_table(&store);
	}

	Ok(())
}
