//! Error types shared by the sheet codec, the storage backends and the store.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::colors::record::RecordId;

/// Errors raised while reading or writing the xlsx container.
#[derive(Error, Debug)]
pub enum SheetError {
	#[error("not a readable xlsx file: {0}")]
	Zip(#[from] zip::result::ZipError),

	#[error("XML error: {0}")]
	Xml(#[from] quick_xml::Error),

	#[error("XML attribute error: {0}")]
	Attr(#[from] quick_xml::events::attributes::AttrError),

	#[error("workbook is missing part {0}")]
	MissingPart(String),

	#[error("workbook has no sheet named \"{0}\"")]
	MissingSheet(String),

	#[error("sheet has no \"{0}\" column")]
	MissingColumn(String),

	#[error("invalid cell {cell}: {msg}")]
	InvalidCell { cell: String, msg: String },

	#[error("IO error: {0}")]
	Io(#[from] io::Error),
}

/// Errors raised by a [`Backend`](crate::backends::Backend) while moving bytes.
#[derive(Error, Debug)]
pub enum BackendError {
	#[error("IO error on {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("{url} answered with HTTP {status}")]
	Status { url: String, status: u16 },

	#[error("request to {url} failed: {msg}")]
	Transport { url: String, msg: String },

	#[error("backend is offline")]
	Offline,
}

/// Errors reported by [`ColorStore`](crate::store::ColorStore) operations.
#[derive(Error, Debug)]
pub enum StoreError {
	#[error("could not parse spreadsheet: {0}")]
	Parse(#[from] SheetError),

	#[error("could not encode spreadsheet: {0}")]
	Encode(#[source] SheetError),

	#[error("could not open {}: {source}", path.display())]
	Upload {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("could not read {backend}: {source}")]
	Unavailable {
		backend: String,
		#[source]
		source: BackendError,
	},

	#[error("could not save to {backend}: {source}")]
	Persistence {
		backend: String,
		#[source]
		source: BackendError,
	},

	#[error("record {0} is no longer in the table, list the colors again")]
	StaleRecord(RecordId),

	#[error("there is no color #{position} (the listing has {len})")]
	OutOfRange { position: usize, len: usize },
}

/// Errors raised while turning `field=value` words into a record patch.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PatchError {
	#[error("unknown field \"{0}\" (expected name, pantone, hex, rgb or notes)")]
	UnknownField(String),

	#[error("\"{0}\" is not a field=value pair")]
	NotAnAssignment(String),
}
