use std::str::FromStr;

use crate::colors::record::ColorRecord;
use crate::error::PatchError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
	Name,
	Pantone,
	Hex,
	Rgb,
	Notes,
}

impl FromStr for Field {
	type Err = PatchError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"name" => Ok(Field::Name),
			"pantone" | "pantone_number" => Ok(Field::Pantone),
			"hex" | "hex_code" => Ok(Field::Hex),
			"rgb" | "rgb_values" => Ok(Field::Rgb),
			"notes" | "note" => Ok(Field::Notes),
			_ => Err(PatchError::UnknownField(s.to_string())),
		}
	}
}

/// A partial set of field values layered over an existing record.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct RecordPatch {
	pub name: Option<String>,
	pub pantone_number: Option<String>,
	pub hex_code: Option<String>,
	pub rgb_values: Option<String>,
	pub notes: Option<String>,
}

impl RecordPatch {
	/// Builds a patch from words like `name="Sky Blue"` (quotes already removed).
	pub fn from_assignments<I, S>(words: I) -> Result<Self, PatchError>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut patch = Self::default();
		for word in words {
			let word = word.as_ref();
			let (field, value) = word.split_once('=')
				.ok_or_else(|| PatchError::NotAnAssignment(word.to_string()))?;
			patch.set(field.parse()?, value);
		}
		Ok(patch)
	}

	pub fn set<S: Into<String>>(&mut self, field: Field, value: S) {
		let value = Some(value.into());
		match field {
			Field::Name => self.name = value,
			Field::Pantone => self.pantone_number = value,
			Field::Hex => self.hex_code = value,
			Field::Rgb => self.rgb_values = value,
			Field::Notes => self.notes = value,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.name.is_none()
			&& self.pantone_number.is_none()
			&& self.hex_code.is_none()
			&& self.rgb_values.is_none()
			&& self.notes.is_none()
	}

	/// Returns `base` with every field this patch sets replaced.
	pub fn apply(&self, base: &ColorRecord) -> ColorRecord {
		ColorRecord {
			name: self.name.clone().unwrap_or_else(|| base.name.clone()),
			pantone_number: self.pantone_number.clone().unwrap_or_else(|| base.pantone_number.clone()),
			hex_code: self.hex_code.clone().unwrap_or_else(|| base.hex_code.clone()),
			rgb_values: self.rgb_values.clone().unwrap_or_else(|| base.rgb_values.clone()),
			notes: self.notes.clone().unwrap_or_else(|| base.notes.clone()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn assignments() {
		let patch = RecordPatch::from_assignments(["name=Sky Blue", "HEX=#7EC8E3", "notes="]).unwrap();
		assert_eq!(patch.name.as_deref(), Some("Sky Blue"));
		assert_eq!(patch.hex_code.as_deref(), Some("#7EC8E3"));
		assert_eq!(patch.notes.as_deref(), Some(""));
		assert_eq!(patch.pantone_number, None);

		let base = ColorRecord::new("Old", "14-4318", "#000000", "0,0,0", "calm");
		let updated = patch.apply(&base);
		assert_eq!(updated, ColorRecord::new("Sky Blue", "14-4318", "#7EC8E3", "0,0,0", ""));
	}

	#[test]
	fn bad_assignments() {
		assert_eq!(
			RecordPatch::from_assignments(["colour=red"]),
			Err(PatchError::UnknownField("colour".to_string()))
		);
		assert_eq!(
			RecordPatch::from_assignments(["name"]),
			Err(PatchError::NotAnAssignment("name".to_string()))
		);
	}
}
