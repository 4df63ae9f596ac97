pub mod listing;
pub mod patch;
pub mod record;
pub mod rgb;

pub use listing::Listing;
pub use patch::{Field, RecordPatch};
pub use record::{ColorRecord, ColorTable, RecordId};
pub use rgb::Rgb;
