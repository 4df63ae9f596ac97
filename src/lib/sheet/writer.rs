use std::io::{Cursor, Write};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::colors::record::ColorTable;
use crate::error::SheetError;
use crate::sheet::cell_ref::column_name;
use crate::sheet::{COLUMNS, SHEET_NAME, WORKBOOK_PART, WORKBOOK_RELS_PART};

const SHEET_PART: &str = "xl/worksheets/sheet1.xml";
const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

// the smallest stylesheet Excel accepts without a repair prompt
const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs></styleSheet>"#;

/// Serializes `table` into a single-sheet xlsx workbook.
///
/// Every record becomes one row of five inline-string cells under the header row, empty
/// fields included, so a record with nothing filled in still survives a reload.
pub fn write_table(table: &ColorTable) -> Result<Vec<u8>, SheetError> {
	let parts: [(&str, Vec<u8>); 6] = [
		("[Content_Types].xml", CONTENT_TYPES.as_bytes().to_vec()),
		("_rels/.rels", ROOT_RELS.as_bytes().to_vec()),
		(WORKBOOK_PART, workbook_xml()?),
		(WORKBOOK_RELS_PART, WORKBOOK_RELS.as_bytes().to_vec()),
		("xl/styles.xml", STYLES.as_bytes().to_vec()),
		(SHEET_PART, sheet_xml(table)?),
	];

	let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
	let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
	for (name, data) in parts {
		zip.start_file(name, options)?;
		zip.write_all(&data)?;
	}

	Ok(zip.finish()?.into_inner())
}

fn workbook_xml() -> Result<Vec<u8>, SheetError> {
	let mut writer = Writer::new(Vec::new());
	writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

	let mut workbook = BytesStart::new("workbook");
	workbook.push_attribute(("xmlns", MAIN_NS));
	workbook.push_attribute(("xmlns:r", "http://schemas.openxmlformats.org/officeDocument/2006/relationships"));
	writer.write_event(Event::Start(workbook))?;
	writer.write_event(Event::Start(BytesStart::new("sheets")))?;

	let mut sheet = BytesStart::new("sheet");
	sheet.push_attribute(("name", SHEET_NAME));
	sheet.push_attribute(("sheetId", "1"));
	sheet.push_attribute(("r:id", "rId1"));
	writer.write_event(Event::Empty(sheet))?;

	writer.write_event(Event::End(BytesEnd::new("sheets")))?;
	writer.write_event(Event::End(BytesEnd::new("workbook")))?;

	Ok(writer.into_inner())
}

fn sheet_xml(table: &ColorTable) -> Result<Vec<u8>, SheetError> {
	let mut writer = Writer::new(Vec::new());
	writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;

	let mut worksheet = BytesStart::new("worksheet");
	worksheet.push_attribute(("xmlns", MAIN_NS));
	writer.write_event(Event::Start(worksheet))?;
	writer.write_event(Event::Start(BytesStart::new("sheetData")))?;

	write_row(&mut writer, 1, &COLUMNS)?;
	for (i, record) in table.iter().enumerate() {
		write_row(&mut writer, i + 2, &record.fields())?;
	}

	writer.write_event(Event::End(BytesEnd::new("sheetData")))?;
	writer.write_event(Event::End(BytesEnd::new("worksheet")))?;

	Ok(writer.into_inner())
}

fn write_row<W: Write>(writer: &mut Writer<W>, row_number: usize, values: &[&str]) -> Result<(), SheetError> {
	let row_ref = row_number.to_string();
	let mut row = BytesStart::new("row");
	row.push_attribute(("r", row_ref.as_str()));
	writer.write_event(Event::Start(row))?;

	for (col, value) in values.iter().enumerate() {
		let cell_ref = format!("{}{row_number}", column_name(col));
		let mut cell = BytesStart::new("c");
		cell.push_attribute(("r", cell_ref.as_str()));
		cell.push_attribute(("t", "inlineStr"));
		writer.write_event(Event::Start(cell))?;
		writer.write_event(Event::Start(BytesStart::new("is")))?;

		let mut text = BytesStart::new("t");
		text.push_attribute(("xml:space", "preserve"));
		writer.write_event(Event::Start(text))?;
		writer.write_event(Event::Text(BytesText::new(&xml_safe(value))))?;
		writer.write_event(Event::End(BytesEnd::new("t")))?;

		writer.write_event(Event::End(BytesEnd::new("is")))?;
		writer.write_event(Event::End(BytesEnd::new("c")))?;
	}

	writer.write_event(Event::End(BytesEnd::new("row")))?;
	Ok(())
}

/// Drops characters outside XML 1.0's `Char` production, which can't be written even
/// escaped.
fn xml_safe(value: &str) -> String {
	value.chars().filter(|&c| is_xml_char(c)).collect()
}

fn is_xml_char(c: char) -> bool {
	matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..)
}
