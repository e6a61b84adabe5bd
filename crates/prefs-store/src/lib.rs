#![doc = include_str!("../README.md")]

mod configuration;
mod memory;
mod sqlite;
mod standard;
mod store;
mod value;

pub use configuration::{open_store, StoreConfiguration};
pub use memory::MemoryPrefsStore;
pub use sqlite::SqlitePrefsStore;
pub use standard::{initialize_standard, standard};
pub use store::{PrefsStore, StoreError};
pub use value::NativeValue;
