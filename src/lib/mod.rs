pub mod backends;
pub mod colors;
pub mod config;
pub mod error;
pub mod lookup;
pub mod sheet;
pub mod store;
