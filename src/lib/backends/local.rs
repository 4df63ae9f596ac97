use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::Builder;

use crate::backends::Backend;
use crate::error::BackendError;

/// A workbook on the local filesystem.
#[derive(Clone, Debug)]
pub struct LocalBackend {
	path: PathBuf,
}

impl LocalBackend {
	pub fn new<P: Into<PathBuf>>(path: P) -> Self {
		Self { path: path.into() }
	}

	fn io_err(&self, source: std::io::Error) -> BackendError {
		BackendError::Io { path: self.path.clone(), source }
	}
}

impl Backend for LocalBackend {
	fn describe(&self) -> String {
		self.path.display().to_string()
	}

	fn read(&self) -> Result<Option<Vec<u8>>, BackendError> {
		match fs::read(&self.path) {
			Ok(bytes) => Ok(Some(bytes)),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
			Err(e) => Err(self.io_err(e)),
		}
	}

	/// Writes next to the target and renames over it, so a failed save leaves the
	/// previous workbook intact.
	fn write(&self, bytes: &[u8]) -> Result<(), BackendError> {
		let dir = match self.path.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => parent,
			_ => Path::new("."),
		};

		let mut temp_file = Builder::new()
			.prefix(".swatch")
			.suffix(".xlsx")
			.tempfile_in(dir)
			.map_err(|e| self.io_err(e))?;

		temp_file.write_all(bytes).map_err(|e| self.io_err(e))?;
		temp_file.as_file().sync_all().map_err(|e| self.io_err(e))?;

		// temp files are created owner-only
		if let Ok(meta) = fs::metadata(&self.path) {
			fs::set_permissions(temp_file.path(), meta.permissions()).map_err(|e| self.io_err(e))?;
		}

		temp_file.persist(&self.path).map_err(|e| self.io_err(e.error))?;

		Ok(())
	}

	fn stored_size(&self) -> Option<u64> {
		fs::metadata(&self.path).ok().map(|m| m.len())
	}
}
