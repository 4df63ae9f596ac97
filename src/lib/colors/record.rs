use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::colors::rgb::Rgb;

/// One catalog entry. All fields are free-form text, nothing is validated.
#[derive(Clone, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRecord {
	pub name: String,
	pub pantone_number: String,
	pub hex_code: String,
	pub rgb_values: String,
	pub notes: String,
}

impl ColorRecord {
	pub fn new<S: Into<String>>(name: S, pantone_number: S, hex_code: S, rgb_values: S, notes: S) -> Self {
		Self {
			name: name.into(),
			pantone_number: pantone_number.into(),
			hex_code: hex_code.into(),
			rgb_values: rgb_values.into(),
			notes: notes.into(),
		}
	}

	/// Fields in sheet column order.
	pub fn fields(&self) -> [&str; 5] {
		[
			self.name.as_str(),
			self.pantone_number.as_str(),
			self.hex_code.as_str(),
			self.rgb_values.as_str(),
			self.notes.as_str(),
		]
	}

	pub(crate) fn from_fields(fields: [String; 5]) -> Self {
		let [name, pantone_number, hex_code, rgb_values, notes] = fields;
		Self { name, pantone_number, hex_code, rgb_values, notes }
	}

	/// The color to draw for this record, preferring the hex code over the RGB text.
	pub fn swatch(&self) -> Option<Rgb> {
		Rgb::parse_hex(&self.hex_code).or_else(|| Rgb::parse_triplet(&self.rgb_values))
	}
}

/// Identifies a row of the working table for the lifetime of a session.
///
/// Ids are never written to the spreadsheet; loading a table hands out fresh ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecordId(Uuid);

impl RecordId {
	pub(crate) fn new() -> Self {
		Self(Uuid::new_v4())
	}
}

impl Display for RecordId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let simple = self.0.simple().to_string();
		write!(f, "{}", &simple[..8])
	}
}

/// An ordered list of records, as stored in the `Colors` sheet.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct ColorTable {
	pub records: Vec<ColorRecord>,
}

impl ColorTable {
	pub fn push(&mut self, record: ColorRecord) {
		self.records.push(record);
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	pub fn iter(&self) -> std::slice::Iter<'_, ColorRecord> {
		self.records.iter()
	}
}

impl From<Vec<ColorRecord>> for ColorTable {
	fn from(records: Vec<ColorRecord>) -> Self {
		Self { records }
	}
}

impl FromIterator<ColorRecord> for ColorTable {
	fn from_iter<I: IntoIterator<Item = ColorRecord>>(iter: I) -> Self {
		Self { records: iter.into_iter().collect() }
	}
}

impl IntoIterator for ColorTable {
	type Item = ColorRecord;
	type IntoIter = std::vec::IntoIter<ColorRecord>;

	fn into_iter(self) -> Self::IntoIter {
		self.records.into_iter()
	}
}

impl<'a> IntoIterator for &'a ColorTable {
	type Item = &'a ColorRecord;
	type IntoIter = std::slice::Iter<'a, ColorRecord>;

	fn into_iter(self) -> Self::IntoIter {
		self.records.iter()
	}
}
