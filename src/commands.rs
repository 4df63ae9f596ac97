use clap::Parser;
use clap::Subcommand;
use const_format::formatcp;
use std::path::PathBuf;

use swatch_rs::colors::RecordPatch;

const GIT_HASH: &str = env!("GIT_HASH");
const GIT_BRANCH: &str = env!("GIT_BRANCH");
const GIT_VERSION: &str = env!("GIT_VERSION");
const BUILD_DATE: &str = env!("BUILD_DATE");

const CLAP_VERSION: &str = formatcp!("{GIT_VERSION} [{GIT_BRANCH}, {GIT_HASH}, {BUILD_DATE}]");

#[derive(Parser, Debug, Clone)]
#[command(version = CLAP_VERSION, about = "Manages a catalog of named colors stored in a spreadsheet", arg_required_else_help = true)]
pub(crate) struct Cli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	#[arg(short, long, global = true, help = "The config file. Defaults to swatch.toml in the working directory, if present.")]
	pub config: Option<PathBuf>,

	#[arg(short, long, global = true, help = "Reads the catalog from this spreadsheet instead of the configured backend. Changes are still saved to the backend. Not accepted by import and lookup.")]
	pub from: Option<PathBuf>,

	#[arg(long, global = true, help = "Prints debug logging.")]
	pub debug: bool,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct FieldArgs {
	#[arg(short, long, help = "The color name.")]
	pub name: Option<String>,
	#[arg(short, long, help = "The Pantone number.")]
	pub pantone: Option<String>,
	#[arg(short = 'x', long, help = "The hex code, e.g. #7EC8E3.")]
	pub hex: Option<String>,
	#[arg(short, long, help = "The RGB values, e.g. 126,200,227.")]
	pub rgb: Option<String>,
	#[arg(short = 'N', long, help = "Free-form notes.")]
	pub notes: Option<String>,
}

impl FieldArgs {
	pub(crate) fn to_patch(&self) -> RecordPatch {
		RecordPatch {
			name: self.name.clone(),
			pantone_number: self.pantone.clone(),
			hex_code: self.hex.clone(),
			rgb_values: self.rgb.clone(),
			notes: self.notes.clone(),
		}
	}
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct ListArgs {
	#[arg(long, help = "Prints the catalog as JSON.")]
	pub json: bool,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct AddArgs {
	#[command(flatten)]
	pub fields: FieldArgs,

	#[arg(short, long, help = "Fills an empty name or RGB value from the color lookup API, using the hex code.")]
	pub lookup: bool,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct EditArgs {
	#[arg(help = "The position of the color, as shown by list.")]
	pub position: usize,

	#[command(flatten)]
	pub fields: FieldArgs,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct DeleteArgs {
	#[arg(help = "The position of the color, as shown by list.")]
	pub position: usize,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct ImportArgs {
	#[arg(help = "The spreadsheet to import. Needs a sheet named Colors.")]
	pub input: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct LookupArgs {
	#[arg(help = "The hex code to look up.")]
	pub hex: String,

	#[arg(long, help = "Prints the answer as JSON.")]
	pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Commands {
	#[command(about = "Lists all colors")]
	List(ListArgs),

	#[command(about = "Adds a color")]
	Add(AddArgs),

	#[command(about = "Changes fields of a color")]
	Edit(EditArgs),

	#[command(about = "Deletes a color")]
	Delete(DeleteArgs),

	#[command(about = "Replaces the catalog with the contents of a spreadsheet")]
	Import(ImportArgs),

	#[command(about = "Asks The Color API about a hex code")]
	Lookup(LookupArgs),

	#[command(about = "Starts an interactive session")]
	Shell,
}
