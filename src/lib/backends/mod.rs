//! Durable homes for the catalog spreadsheet.
//!
//! A [`Backend`] only moves bytes; the provided [`Backend::load`] and [`Backend::save`]
//! put the sheet codec on top, so every backend treats "nothing stored yet" the same way.

use std::io::Cursor;

use tracing::{debug, info};

use crate::colors::record::ColorTable;
use crate::error::{BackendError, StoreError};
use crate::sheet;

pub mod bucket;
pub mod local;
pub mod memory;

pub use bucket::BucketBackend;
pub use local::LocalBackend;
pub use memory::MemoryBackend;

pub trait Backend {
	/// Human-readable location, used in messages.
	fn describe(&self) -> String;

	/// Fetches the stored workbook, or `None` if nothing has been stored yet.
	fn read(&self) -> Result<Option<Vec<u8>>, BackendError>;

	/// Replaces the stored workbook with `bytes`.
	fn write(&self, bytes: &[u8]) -> Result<(), BackendError>;

	/// Size of the stored workbook, for backends that can tell cheaply.
	fn stored_size(&self) -> Option<u64> {
		None
	}

	fn load(&self) -> Result<ColorTable, StoreError> {
		match self.read() {
			Ok(Some(bytes)) => {
				debug!("read {} bytes from {}", bytes.len(), self.describe());
				Ok(sheet::read_table(Cursor::new(bytes))?)
			}
			Ok(None) => {
				info!("{} does not exist yet, starting with an empty table", self.describe());
				Ok(ColorTable::default())
			}
			Err(source) => Err(StoreError::Unavailable { backend: self.describe(), source }),
		}
	}

	fn save(&self, table: &ColorTable) -> Result<(), StoreError> {
		let bytes = sheet::write_table(table).map_err(StoreError::Encode)?;
		self.write(&bytes)
			.map_err(|source| StoreError::Persistence { backend: self.describe(), source })?;
		debug!("wrote {} bytes to {}", bytes.len(), self.describe());
		Ok(())
	}
}
