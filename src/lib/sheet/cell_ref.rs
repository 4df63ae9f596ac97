use std::sync::LazyLock;

use regex::Regex;

use crate::error::SheetError;

static CELL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\$?(?P<col>[A-Za-z]{1,3})\$?(?P<row>\d+)$").unwrap());

/// Splits an A1-style reference into a 0-based column and a 1-based row.
pub(crate) fn parse_cell_ref(cell: &str) -> Result<(usize, usize), SheetError> {
	let invalid = |msg: &str| SheetError::InvalidCell { cell: cell.to_string(), msg: msg.to_string() };

	let groups = CELL_RE.captures(cell).ok_or_else(|| invalid("Not an A1-style reference"))?;
	let (Some(col), Some(row)) = (groups.name("col"), groups.name("row")) else {
		return Err(invalid("Not an A1-style reference"));
	};

	let col = col.as_str()
		.bytes()
		.fold(0_usize, |acc, c| acc * 26 + (c.to_ascii_uppercase() - b'A' + 1) as usize);
	let row = row.as_str().parse::<usize>().map_err(|_| invalid("Invalid row number"))?;
	if row == 0 {
		return Err(invalid("Row numbers start at 1"));
	}

	Ok((col - 1, row))
}

/// Column letters for a 0-based column index.
pub(crate) fn column_name(mut col: usize) -> String {
	let mut name = Vec::new();
	loop {
		name.push(b'A' + (col % 26) as u8);
		if col < 26 {
			break;
		}
		col = col / 26 - 1;
	}
	name.reverse();
	String::from_utf8_lossy(&name).into_owned()
}
