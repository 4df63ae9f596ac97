use std::collections::HashMap;
use std::io::{Read, Seek};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::colors::record::{ColorRecord, ColorTable};
use crate::error::SheetError;
use crate::sheet::cell_ref::{column_name, parse_cell_ref};
use crate::sheet::{COLUMNS, SHARED_STRINGS_PART, SHEET_NAME, WORKBOOK_PART, WORKBOOK_RELS_PART};

// ECMA-376 Part 1, §18.3 (worksheets) and §18.4 (shared strings)

type Row = Vec<(usize, String)>;

/// Reads the `Colors` sheet of an xlsx workbook.
///
/// The first row holding any value is the header; columns are matched to record fields
/// by header text, so their order in the sheet does not matter and extra columns are
/// ignored. Rows without any cell values are skipped.
pub fn read_table<R: Read + Seek>(reader: R) -> Result<ColorTable, SheetError> {
	let mut archive = ZipArchive::new(reader)?;

	let workbook = read_part(&mut archive, WORKBOOK_PART)?
		.ok_or_else(|| SheetError::MissingPart(WORKBOOK_PART.to_string()))?;
	let rel_id = find_sheet_rel_id(&workbook, SHEET_NAME)?
		.ok_or_else(|| SheetError::MissingSheet(SHEET_NAME.to_string()))?;

	let rels = read_part(&mut archive, WORKBOOK_RELS_PART)?
		.ok_or_else(|| SheetError::MissingPart(WORKBOOK_RELS_PART.to_string()))?;
	let target = find_rel_target(&rels, &rel_id)?
		.ok_or_else(|| SheetError::MissingPart(format!("{WORKBOOK_RELS_PART}#{rel_id}")))?;
	let sheet_part = resolve_target(&target);

	let shared_strings = match read_part(&mut archive, SHARED_STRINGS_PART)? {
		Some(xml) => parse_shared_strings(&xml)?,
		None => Vec::new(),
	};

	let sheet = read_part(&mut archive, &sheet_part)?
		.ok_or_else(|| SheetError::MissingPart(sheet_part.clone()))?;
	let table = table_from_rows(parse_rows(&sheet, &shared_strings)?)?;

	debug!("read {} records from {sheet_part} ({} shared strings)", table.len(), shared_strings.len());
	Ok(table)
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>, SheetError> {
	match archive.by_name(name) {
		Ok(mut file) => {
			let mut xml = String::new();
			file.read_to_string(&mut xml)?;
			Ok(Some(xml))
		}
		Err(ZipError::FileNotFound) => Ok(None),
		Err(e) => Err(e.into()),
	}
}

fn attr_value(e: &BytesStart, local_name: &[u8]) -> Result<Option<String>, SheetError> {
	for attr in e.attributes() {
		let attr = attr?;
		if attr.key.local_name().as_ref() == local_name {
			return Ok(Some(attr.unescape_value()?.into_owned()));
		}
	}
	Ok(None)
}

fn find_sheet_rel_id(workbook: &str, sheet_name: &str) -> Result<Option<String>, SheetError> {
	let mut reader = Reader::from_str(workbook);
	loop {
		match reader.read_event()? {
			Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
				if attr_value(&e, b"name")?.as_deref() == Some(sheet_name) {
					// r:id, as opposed to sheetId
					return attr_value(&e, b"id");
				}
			}
			Event::Eof => return Ok(None),
			_ => {}
		}
	}
}

fn find_rel_target(rels: &str, rel_id: &str) -> Result<Option<String>, SheetError> {
	let mut reader = Reader::from_str(rels);
	loop {
		match reader.read_event()? {
			Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
				if attr_value(&e, b"Id")?.as_deref() == Some(rel_id) {
					return attr_value(&e, b"Target");
				}
			}
			Event::Eof => return Ok(None),
			_ => {}
		}
	}
}

/// Turns a relationship target into a part name. Targets are relative to `xl/` unless
/// they start with a slash.
fn resolve_target(target: &str) -> String {
	let joined = match target.strip_prefix('/') {
		Some(absolute) => absolute.to_string(),
		None => format!("xl/{target}"),
	};

	let mut segments: Vec<&str> = Vec::new();
	for segment in joined.split('/') {
		match segment {
			"" | "." => {}
			".." => {
				segments.pop();
			}
			s => segments.push(s),
		}
	}
	segments.join("/")
}

fn parse_shared_strings(xml: &str) -> Result<Vec<String>, SheetError> {
	let mut reader = Reader::from_str(xml);

	let mut strings = Vec::new();
	let mut current = String::new();
	let mut in_text = false;
	// phonetic runs carry their own <t> elements that aren't part of the value
	let mut phonetic_depth = 0_usize;

	loop {
		match reader.read_event()? {
			Event::Start(e) => match e.local_name().as_ref() {
				b"si" => current.clear(),
				b"t" if phonetic_depth == 0 => in_text = true,
				b"rPh" => phonetic_depth += 1,
				_ => {}
			},
			Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
			Event::Text(e) if in_text => current.push_str(&e.unescape()?),
			Event::CData(e) if in_text => current.push_str(&String::from_utf8_lossy(&e)),
			Event::End(e) => match e.local_name().as_ref() {
				b"t" => in_text = false,
				b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
				b"si" => strings.push(std::mem::take(&mut current)),
				_ => {}
			},
			Event::Eof => break,
			_ => {}
		}
	}

	Ok(strings)
}

#[derive(Clone, Copy, PartialEq)]
enum Capture {
	Nothing,
	Value,
	Inline,
}

struct Cell {
	reference: String,
	col: usize,
	kind: Option<String>,
	value: String,
	inline: String,
	has_value: bool,
}

impl Cell {
	fn open(e: &BytesStart, next_col: usize) -> Result<Self, SheetError> {
		let (reference, col) = match attr_value(e, b"r")? {
			Some(reference) => {
				let (col, _) = parse_cell_ref(&reference)?;
				(reference, col)
			}
			None => (column_name(next_col), next_col),
		};

		Ok(Self {
			reference,
			col,
			kind: attr_value(e, b"t")?,
			value: String::new(),
			inline: String::new(),
			has_value: false,
		})
	}

	fn resolve(self, shared_strings: &[String]) -> Result<String, SheetError> {
		match self.kind.as_deref() {
			Some("s") => {
				let index = self.value.trim().parse::<usize>().map_err(|_| SheetError::InvalidCell {
					cell: self.reference.clone(),
					msg: format!("\"{}\" is not a shared string index", self.value),
				})?;
				shared_strings.get(index).cloned().ok_or_else(|| SheetError::InvalidCell {
					cell: self.reference,
					msg: format!("Shared string {index} does not exist"),
				})
			}
			Some("inlineStr") => Ok(self.inline),
			Some("b") => Ok(match self.value.trim() {
				"1" => "TRUE".to_string(),
				"0" => "FALSE".to_string(),
				other => other.to_string(),
			}),
			Some("n") | None => Ok(format_number(&self.value)),
			// str (formula result), e (error), d (ISO date)
			Some(_) => Ok(self.value),
		}
	}
}

/// Whole numbers lose their fractional zeros, everything else keeps its stored text.
fn format_number(raw: &str) -> String {
	let trimmed = raw.trim();
	match trimmed.parse::<f64>() {
		Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", v as i64),
		_ => trimmed.to_string(),
	}
}

fn parse_rows(xml: &str, shared_strings: &[String]) -> Result<Vec<Row>, SheetError> {
	let mut reader = Reader::from_str(xml);

	let mut rows = Vec::new();
	let mut row: Option<Row> = None;
	let mut cell: Option<Cell> = None;
	let mut next_col = 0;
	let mut capture = Capture::Nothing;
	let mut phonetic_depth = 0_usize;

	loop {
		match reader.read_event()? {
			Event::Start(e) => match e.local_name().as_ref() {
				b"row" => {
					row = Some(Vec::new());
					next_col = 0;
				}
				b"c" => cell = Some(Cell::open(&e, next_col)?),
				b"v" => {
					if let Some(c) = cell.as_mut() {
						c.has_value = true;
						capture = Capture::Value;
					}
				}
				b"is" => {
					if let Some(c) = cell.as_mut() {
						c.has_value = true;
					}
				}
				b"t" if phonetic_depth == 0 && cell.is_some() => capture = Capture::Inline,
				b"rPh" => phonetic_depth += 1,
				_ => {}
			},
			Event::Empty(e) => match e.local_name().as_ref() {
				// <c r="B2" s="1"/> only carries formatting
				b"c" => next_col = Cell::open(&e, next_col)?.col + 1,
				b"is" => {
					if let Some(c) = cell.as_mut() {
						c.has_value = true;
					}
				}
				_ => {}
			},
			Event::Text(e) => {
				if let Some(c) = cell.as_mut() {
					match capture {
						Capture::Value => c.value.push_str(&e.unescape()?),
						Capture::Inline => c.inline.push_str(&e.unescape()?),
						Capture::Nothing => {}
					}
				}
			}
			Event::CData(e) => {
				if let (Some(c), Capture::Inline) = (cell.as_mut(), capture) {
					c.inline.push_str(&String::from_utf8_lossy(&e));
				}
			}
			Event::End(e) => match e.local_name().as_ref() {
				b"v" | b"t" => capture = Capture::Nothing,
				b"rPh" => phonetic_depth = phonetic_depth.saturating_sub(1),
				b"c" => {
					if let Some(c) = cell.take() {
						next_col = c.col + 1;
						if c.has_value {
							let col = c.col;
							let text = c.resolve(shared_strings)?;
							if let Some(r) = row.as_mut() {
								r.push((col, text));
							}
						}
					}
				}
				b"row" => {
					if let Some(r) = row.take()
						&& !r.is_empty()
					{
						rows.push(r);
					}
				}
				_ => {}
			},
			Event::Eof => break,
			_ => {}
		}
	}

	Ok(rows)
}

/// Maps sheet columns to record field indices using the header row.
fn map_columns(header: &[(usize, String)]) -> Result<HashMap<usize, usize>, SheetError> {
	let mut columns = HashMap::new();
	for (field, name) in COLUMNS.iter().enumerate() {
		let col = header.iter()
			.find(|(_, text)| text.trim().eq_ignore_ascii_case(name))
			.map(|(col, _)| *col)
			.ok_or_else(|| SheetError::MissingColumn(name.to_string()))?;
		columns.insert(col, field);
	}
	Ok(columns)
}

fn table_from_rows(rows: Vec<Row>) -> Result<ColorTable, SheetError> {
	let mut rows = rows.into_iter();
	let Some(header) = rows.next() else {
		return Ok(ColorTable::default());
	};
	let columns = map_columns(&header)?;

	let table = rows
		.map(|row| {
			let mut fields: [String; 5] = Default::default();
			for (col, text) in row {
				if let Some(&field) = columns.get(&col) {
					fields[field] = text;
				}
			}
			ColorRecord::from_fields(fields)
		})
		.collect();

	Ok(table)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn relationship_targets() {
		assert_eq!(resolve_target("worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
		assert_eq!(resolve_target("/xl/worksheets/sheet2.xml"), "xl/worksheets/sheet2.xml");
		assert_eq!(resolve_target("./worksheets/../worksheets/sheet3.xml"), "xl/worksheets/sheet3.xml");
	}

	#[test]
	fn numbers() {
		assert_eq!(format_number("12"), "12");
		assert_eq!(format_number("12.0"), "12");
		assert_eq!(format_number("1.5"), "1.5");
		assert_eq!(format_number("-3"), "-3");
		assert_eq!(format_number(""), "");
	}

	#[test]
	fn shared_strings_with_runs() {
		let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="3" uniqueCount="3">
	<si><t>Sky Blue</t></si>
	<si><r><rPr><b/></rPr><t>Bold</t></r><r><t xml:space="preserve"> part</t></r></si>
	<si><t>カ</t><rPh sb="0" eb="1"><t>ka</t></rPh></si>
	<si/>
	<si><t>A &amp; B</t></si>
</sst>"#;

		let strings = parse_shared_strings(xml).unwrap();
		assert_eq!(strings, vec!["Sky Blue", "Bold part", "カ", "", "A & B"]);
	}

	#[test]
	fn header_order_does_not_matter() {
		let rows = vec![
			vec![
				(0, "Notes".to_string()),
				(1, "Hex Code".to_string()),
				(2, "Color Name".to_string()),
				(3, "RGB Values".to_string()),
				(4, "Pantone Number".to_string()),
				(5, "Extra".to_string()),
			],
			vec![(0, "calm".to_string()), (2, "Sky Blue".to_string()), (5, "ignored".to_string())],
		];

		let table = table_from_rows(rows).unwrap();
		assert_eq!(table.records, vec![ColorRecord::new("Sky Blue", "", "", "", "calm")]);
	}

	#[test]
	fn header_needs_every_column() {
		let rows = vec![vec![(0, "Color Name".to_string()), (1, "Hex Code".to_string())]];
		assert!(matches!(table_from_rows(rows), Err(SheetError::MissingColumn(c)) if c == "Pantone Number"));
	}
}
