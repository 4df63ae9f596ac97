use crate::colors::record::RecordId;
use crate::error::StoreError;

/// The record ids behind the numbers of a printed listing.
///
/// Positions are the 1-based numbers shown to the user. Resolving through a listing
/// instead of the live table means a position keeps pointing at the record the user
/// saw, and a record that has since disappeared is reported as stale by the store.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Listing {
	ids: Vec<RecordId>,
}

impl Listing {
	pub(crate) fn new(ids: Vec<RecordId>) -> Self {
		Self { ids }
	}

	pub fn resolve(&self, position: usize) -> Result<RecordId, StoreError> {
		position
			.checked_sub(1)
			.and_then(|i| self.ids.get(i))
			.copied()
			.ok_or(StoreError::OutOfRange { position, len: self.ids.len() })
	}
}
