use anyhow::Result;

use swatch_rs::config::Config;

use crate::commands::{Cli, LookupArgs};
use crate::common::{print_color_info, reject_from};

pub(crate) fn swatch_lookup(cli: &Cli, args: &LookupArgs) -> Result<()> {
	reject_from(cli, "lookup")?;

	let config = Config::discover(cli.config.as_deref())?;
	let Some(client) = config.lookup_client() else {
		anyhow::bail!("The color lookup is disabled in the config");
	};

	match client.lookup(&args.hex) {
		Some(info) if args.json => println!("{}", serde_json::to_string_pretty(&info)?),
		Some(info) => print_color_info(&info),
		None => eprintln!("NOTE: The color lookup returned no data for \"{}\".", args.hex),
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use clap::Parser;

	use super::*;
	use crate::commands::Commands;

	#[test]
	fn from_is_rejected() {
		let cli = Cli::try_parse_from(["swatch", "lookup", "#7EC8E3", "-f", "old.xlsx"]).unwrap();
		let Some(Commands::Lookup(args)) = &cli.command else {
			panic!("expected lookup, got {:?}", cli.command);
		};

		let err = swatch_lookup(&cli, args).unwrap_err();
		assert_eq!(err.to_string(), "lookup does not read the catalog, drop --from old.xlsx");
	}
}
