use std::io::{Cursor, Write};

use pretty_assertions::assert_eq;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use swatch_rs::colors::{ColorRecord, ColorTable};
use swatch_rs::error::SheetError;
use swatch_rs::sheet::{read_table, read_table_file, write_table};

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

fn zip_parts(parts: &[(&str, String)]) -> Vec<u8> {
	let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
	for (name, data) in parts {
		zip.start_file(*name, SimpleFileOptions::default()).unwrap();
		zip.write_all(data.as_bytes()).unwrap();
	}
	zip.finish().unwrap().into_inner()
}

fn workbook_xml(sheets: &[&str]) -> String {
	let sheets = sheets.iter()
		.enumerate()
		.map(|(i, name)| format!(r#"<sheet name="{name}" sheetId="{}" r:id="rId{}"/>"#, i + 1, i + 1))
		.collect::<String>();
	format!(
		r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="{MAIN_NS}" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{sheets}</sheets></workbook>"#
	)
}

fn rels_xml(targets: &[&str]) -> String {
	let rels = targets.iter()
		.enumerate()
		.map(|(i, target)| {
			format!(
				r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="{target}"/>"#,
				i + 1
			)
		})
		.collect::<String>();
	format!(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#)
}

fn sheet_xml(rows: &str) -> String {
	format!(r#"<?xml version="1.0" encoding="UTF-8"?><worksheet xmlns="{MAIN_NS}"><sheetData>{rows}</sheetData></worksheet>"#)
}

fn header_row() -> &'static str {
	r#"<row r="1"><c r="A1" t="inlineStr"><is><t>Color Name</t></is></c><c r="B1" t="inlineStr"><is><t>Pantone Number</t></is></c><c r="C1" t="inlineStr"><is><t>Hex Code</t></is></c><c r="D1" t="inlineStr"><is><t>RGB Values</t></is></c><c r="E1" t="inlineStr"><is><t>Notes</t></is></c></row>"#
}

fn sample_table() -> ColorTable {
	ColorTable::from(vec![
		ColorRecord::new("Sky Blue", "14-4318", "#7EC8E3", "126,200,227", "calm"),
		ColorRecord::new("Ultramarine & Co <old>", "2728 C", "#3F00FF", "63, 0, 255", "line one\nline two"),
		ColorRecord::new("", "", "", "", ""),
		ColorRecord::new("  padded  ", "", "#fff", "", "\"quoted\" 'single'"),
		ColorRecord::new("Rotbraun ÄÖÜ 赤", "18-1442 TCX", "", "", "émoji 🎨"),
	])
}

#[test]
fn round_trip() {
	let table = sample_table();
	let bytes = write_table(&table).unwrap();
	let loaded = read_table(Cursor::new(bytes)).unwrap();

	assert_eq!(loaded, table);
}

#[test]
fn round_trip_empty_table() {
	let bytes = write_table(&ColorTable::default()).unwrap();
	let loaded = read_table(Cursor::new(bytes)).unwrap();

	assert!(loaded.is_empty());
}

#[test]
fn round_trip_through_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("colors.xlsx");
	std::fs::write(&path, write_table(&sample_table()).unwrap()).unwrap();

	assert_eq!(read_table_file(&path).unwrap(), sample_table());
}

#[test]
fn control_characters_are_dropped() {
	let table = ColorTable::from(vec![
		ColorRecord::new("bell\u{7}", "x\u{FFFE}y", "", "", "tab\tkept"),
		ColorRecord::new("caf\u{85}e", "a\u{9F}b", "", "", ""),
	]);
	let loaded = read_table(Cursor::new(write_table(&table).unwrap())).unwrap();

	assert_eq!(loaded.records[0].name, "bell");
	assert_eq!(loaded.records[0].pantone_number, "xy");
	assert_eq!(loaded.records[0].notes, "tab\tkept");

	// C1 controls are legal XML 1.0 and must survive
	assert_eq!(loaded.records[1], table.records[1]);
}

#[test]
fn excel_style_workbook() {
	let shared_strings = format!(
		r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="{MAIN_NS}" count="12" uniqueCount="12"><si><t>Color Name</t></si><si><t>Pantone Number</t></si><si><t>Hex Code</t></si><si><t>RGB Values</t></si><si><t>Notes</t></si><si><t>Sky Blue</t></si><si><t>14-4318</t></si><si><t>#7EC8E3</t></si><si><t>126,200,227</t></si><si><t>calm</t></si><si><t>Ultramarine &amp; Co</t></si><si><t>#3F00FF</t></si></sst>"#
	);

	let colors = sheet_xml(
		r#"<row r="1" spans="1:5"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c><c r="C1" t="s"><v>2</v></c><c r="D1" t="s"><v>3</v></c><c r="E1" t="s"><v>4</v></c></row>
<row r="2" spans="1:5"><c r="A2" t="s"><v>5</v></c><c r="B2" t="s"><v>6</v></c><c r="C2" t="s"><v>7</v></c><c r="D2" t="s"><v>8</v></c><c r="E2" t="s"><v>9</v></c></row>
<row r="3"><c r="A3" s="1"/><c r="B3" s="1"/></row>
<row r="5"><c r="A5" t="s"><v>10</v></c><c r="B5"><v>2728.0</v></c><c r="C5" t="s"><v>11</v></c><c r="E5" t="inlineStr"><is><t>deep, "electric"</t></is></c></row>"#,
	);

	let summary = sheet_xml(r#"<row r="1"><c r="A1" t="inlineStr"><is><t>not the catalog</t></is></c></row>"#);

	let bytes = zip_parts(&[
		("xl/workbook.xml", workbook_xml(&["Summary", "Colors"])),
		("xl/_rels/workbook.xml.rels", rels_xml(&["worksheets/sheet1.xml", "/xl/worksheets/sheet2.xml"])),
		("xl/sharedStrings.xml", shared_strings),
		("xl/worksheets/sheet1.xml", summary),
		("xl/worksheets/sheet2.xml", colors),
	]);

	let table = read_table(Cursor::new(bytes)).unwrap();
	assert_eq!(
		table.records,
		vec![
			ColorRecord::new("Sky Blue", "14-4318", "#7EC8E3", "126,200,227", "calm"),
			ColorRecord::new("Ultramarine & Co", "2728", "#3F00FF", "", "deep, \"electric\""),
		]
	);
}

#[test]
fn cells_without_references() {
	let rows = r#"<row><c t="inlineStr"><is><t>Color Name</t></is></c><c t="inlineStr"><is><t>Pantone Number</t></is></c><c t="inlineStr"><is><t>Hex Code</t></is></c><c t="inlineStr"><is><t>RGB Values</t></is></c><c t="inlineStr"><is><t>Notes</t></is></c></row>
<row><c t="inlineStr"><is><t>Coral</t></is></c><c/><c t="str"><v>#FF7F50</v></c><c t="b"><v>1</v></c></row>"#;

	let bytes = zip_parts(&[
		("xl/workbook.xml", workbook_xml(&["Colors"])),
		("xl/_rels/workbook.xml.rels", rels_xml(&["worksheets/sheet1.xml"])),
		("xl/worksheets/sheet1.xml", sheet_xml(rows)),
	]);

	let table = read_table(Cursor::new(bytes)).unwrap();
	assert_eq!(table.records, vec![ColorRecord::new("Coral", "", "#FF7F50", "TRUE", "")]);
}

#[test]
fn sheet_without_rows_is_empty() {
	let bytes = zip_parts(&[
		("xl/workbook.xml", workbook_xml(&["Colors"])),
		("xl/_rels/workbook.xml.rels", rels_xml(&["worksheets/sheet1.xml"])),
		("xl/worksheets/sheet1.xml", sheet_xml("")),
	]);

	assert!(read_table(Cursor::new(bytes)).unwrap().is_empty());
}

#[test]
#[should_panic(expected = "MissingSheet(\"Colors\")")]
fn wrong_sheet_name() {
	let bytes = zip_parts(&[
		("xl/workbook.xml", workbook_xml(&["Sheet1"])),
		("xl/_rels/workbook.xml.rels", rels_xml(&["worksheets/sheet1.xml"])),
		("xl/worksheets/sheet1.xml", sheet_xml(header_row())),
	]);

	read_table(Cursor::new(bytes)).unwrap();
}

#[test]
#[should_panic(expected = "MissingColumn(\"Notes\")")]
fn missing_column() {
	let rows = r#"<row r="1"><c r="A1" t="inlineStr"><is><t>Color Name</t></is></c><c r="B1" t="inlineStr"><is><t>Pantone Number</t></is></c><c r="C1" t="inlineStr"><is><t>Hex Code</t></is></c><c r="D1" t="inlineStr"><is><t>RGB Values</t></is></c></row>"#;
	let bytes = zip_parts(&[
		("xl/workbook.xml", workbook_xml(&["Colors"])),
		("xl/_rels/workbook.xml.rels", rels_xml(&["worksheets/sheet1.xml"])),
		("xl/worksheets/sheet1.xml", sheet_xml(rows)),
	]);

	read_table(Cursor::new(bytes)).unwrap();
}

#[test]
#[should_panic(expected = "MissingPart(\"xl/worksheets/sheet1.xml\")")]
fn missing_worksheet_part() {
	let bytes = zip_parts(&[
		("xl/workbook.xml", workbook_xml(&["Colors"])),
		("xl/_rels/workbook.xml.rels", rels_xml(&["worksheets/sheet1.xml"])),
	]);

	read_table(Cursor::new(bytes)).unwrap();
}

#[test]
fn dangling_shared_string() {
	let rows = format!(r#"{}<row r="2"><c r="A2" t="s"><v>7</v></c></row>"#, header_row());
	let bytes = zip_parts(&[
		("xl/workbook.xml", workbook_xml(&["Colors"])),
		("xl/_rels/workbook.xml.rels", rels_xml(&["worksheets/sheet1.xml"])),
		("xl/worksheets/sheet1.xml", sheet_xml(&rows)),
	]);

	let err = read_table(Cursor::new(bytes)).unwrap_err();
	assert!(matches!(err, SheetError::InvalidCell { ref cell, .. } if cell == "A2"), "{err}");
}

#[test]
fn not_a_workbook() {
	let err = read_table(Cursor::new(b"Color Name,Pantone Number\nSky Blue,14-4318\n".to_vec())).unwrap_err();
	assert!(matches!(err, SheetError::Zip(_)), "{err}");
}
