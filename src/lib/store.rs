//! The working table and its synchronization with a backend.
//!
//! A [`ColorStore`] holds the session's table in memory. Every mutation is applied to
//! the working table first and then written to the backend in full; a failed write is
//! reported but not rolled back, so the two stay apart until the next successful save.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use tracing::{info, warn};

use crate::backends::Backend;
use crate::colors::listing::Listing;
use crate::colors::record::{ColorRecord, ColorTable, RecordId};
use crate::error::StoreError;
use crate::sheet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreState {
	Uninitialized,
	Loaded,
}

#[derive(Clone, Debug, PartialEq)]
struct Row {
	id: RecordId,
	record: ColorRecord,
}

pub struct ColorStore {
	backend: Box<dyn Backend>,
	rows: Vec<Row>,
	state: StoreState,
	synced: bool,
}

impl ColorStore {
	pub fn open(backend: Box<dyn Backend>) -> Self {
		Self {
			backend,
			rows: Vec::new(),
			state: StoreState::Uninitialized,
			synced: false,
		}
	}

	pub fn backend(&self) -> &dyn Backend {
		self.backend.as_ref()
	}

	pub fn state(&self) -> StoreState {
		self.state
	}

	/// Whether the backend held exactly the working table after the last load or save.
	pub fn is_synced(&self) -> bool {
		self.synced
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	pub fn get(&self, id: RecordId) -> Option<&ColorRecord> {
		self.rows.iter().find(|r| r.id == id).map(|r| &r.record)
	}

	pub fn records(&self) -> impl Iterator<Item = (RecordId, &ColorRecord)> {
		self.rows.iter().map(|r| (r.id, &r.record))
	}

	pub fn id_at(&self, index: usize) -> Option<RecordId> {
		self.rows.get(index).map(|r| r.id)
	}

	pub fn position_of(&self, id: RecordId) -> Option<usize> {
		self.rows.iter().position(|r| r.id == id)
	}

	/// A copy of the working table in display order.
	pub fn table(&self) -> ColorTable {
		self.rows.iter().map(|r| r.record.clone()).collect()
	}

	/// Captures the current display order for resolving positions later.
	pub fn listing(&self) -> Listing {
		Listing::new(self.rows.iter().map(|r| r.id).collect())
	}

	/// Replaces the working table, either from `upload` or from the backend.
	///
	/// An upload is a one-time source: later saves still go to the backend. Nothing is
	/// replaced if reading or parsing fails. Returns the number of loaded records.
	pub fn load(&mut self, upload: Option<&Path>) -> Result<usize, StoreError> {
		match upload {
			Some(path) => {
				let bytes = fs::read(path).map_err(|source| StoreError::Upload { path: path.to_path_buf(), source })?;
				let table = sheet::read_table(Cursor::new(bytes))?;
				info!("loaded {} colors from {}", table.len(), path.display());
				self.install(table, false);
			}
			None => {
				let table = self.backend.load()?;
				info!("loaded {} colors from {}", table.len(), self.backend.describe());
				self.install(table, true);
			}
		}

		Ok(self.rows.len())
	}

	/// Replaces the working table with an uploaded workbook held in memory.
	pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<usize, StoreError> {
		let table = sheet::read_table(Cursor::new(bytes))?;
		info!("loaded {} colors from an uploaded workbook", table.len());
		self.install(table, false);
		Ok(self.rows.len())
	}

	fn install(&mut self, table: ColorTable, from_backend: bool) {
		self.rows = table.into_iter().map(|record| Row { id: RecordId::new(), record }).collect();
		self.state = StoreState::Loaded;
		self.synced = from_backend;
	}

	/// Writes the whole working table to the backend.
	pub fn save(&mut self) -> Result<(), StoreError> {
		match self.backend.save(&self.table()) {
			Ok(()) => {
				self.synced = true;
				info!("saved {} colors to {}", self.rows.len(), self.backend.describe());
				Ok(())
			}
			Err(e) => {
				self.synced = false;
				warn!("working table no longer matches {}: {e}", self.backend.describe());
				Err(e)
			}
		}
	}

	fn touch(&mut self) {
		// mutating before the first load starts from an empty table
		self.state = StoreState::Loaded;
		self.synced = false;
	}

	/// Appends `record` and saves. The record stays in the table even if saving fails.
	pub fn add(&mut self, record: ColorRecord) -> Result<RecordId, StoreError> {
		self.touch();
		let id = RecordId::new();
		self.rows.push(Row { id, record });
		self.save()?;
		Ok(id)
	}

	/// Replaces every field of the record `id` and saves.
	pub fn edit(&mut self, id: RecordId, record: ColorRecord) -> Result<(), StoreError> {
		let index = self.position_of(id).ok_or(StoreError::StaleRecord(id))?;
		self.touch();
		self.rows[index].record = record;
		self.save()
	}

	/// Removes the record `id`, shifting later records up, and saves.
	pub fn delete(&mut self, id: RecordId) -> Result<ColorRecord, StoreError> {
		let index = self.position_of(id).ok_or(StoreError::StaleRecord(id))?;
		self.touch();
		let removed = self.rows.remove(index);
		self.save()?;
		Ok(removed.record)
	}
}
