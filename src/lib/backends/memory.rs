use std::cell::RefCell;
use std::rc::Rc;

use crate::backends::Backend;
use crate::error::BackendError;

#[derive(Default, Debug)]
struct Slot {
	bytes: Option<Vec<u8>>,
	offline: bool,
	writes: usize,
}

/// Keeps the workbook in memory. Clones share the same slot, so a caller can hand one
/// clone to a store and inspect or sabotage it through another.
#[derive(Clone, Default, Debug)]
pub struct MemoryBackend {
	slot: Rc<RefCell<Slot>>,
}

impl MemoryBackend {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_bytes(bytes: Vec<u8>) -> Self {
		let backend = Self::default();
		backend.slot.borrow_mut().bytes = Some(bytes);
		backend
	}

	/// While offline, every read and write fails.
	pub fn set_offline(&self, offline: bool) {
		self.slot.borrow_mut().offline = offline;
	}

	/// Number of successful writes so far.
	pub fn writes(&self) -> usize {
		self.slot.borrow().writes
	}
}

impl Backend for MemoryBackend {
	fn describe(&self) -> String {
		"in-memory workbook".to_string()
	}

	fn read(&self) -> Result<Option<Vec<u8>>, BackendError> {
		let slot = self.slot.borrow();
		if slot.offline {
			return Err(BackendError::Offline);
		}
		Ok(slot.bytes.clone())
	}

	fn write(&self, bytes: &[u8]) -> Result<(), BackendError> {
		let mut slot = self.slot.borrow_mut();
		if slot.offline {
			return Err(BackendError::Offline);
		}
		slot.bytes = Some(bytes.to_vec());
		slot.writes += 1;
		Ok(())
	}

	fn stored_size(&self) -> Option<u64> {
		self.slot.borrow().bytes.as_ref().map(|b| b.len() as u64)
	}
}
