//! The xlsx container holding the catalog.
//!
//! Only the parts needed to find and read one worksheet are understood: the workbook,
//! its relationships, the shared string table and the worksheet itself. Written
//! workbooks contain exactly one sheet, named [`SHEET_NAME`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::colors::record::ColorTable;
use crate::error::SheetError;

mod cell_ref;
mod reader;
mod writer;

pub use reader::read_table;
pub use writer::write_table;

pub const SHEET_NAME: &str = "Colors";
pub const COLUMNS: [&str; 5] = ["Color Name", "Pantone Number", "Hex Code", "RGB Values", "Notes"];
pub const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

pub fn read_table_file<P: AsRef<Path>>(path: P) -> Result<ColorTable, SheetError> {
	let f = File::open(path)?;
	read_table(BufReader::new(f))
}
