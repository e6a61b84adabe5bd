#![doc = include_str!("../README.md")]

mod codable;
mod error;
mod key;
mod native;
mod native_type;

pub use codable::CodableBacked;
pub use error::BackedError;
pub use key::Key;
pub use native::NativeBacked;
pub use native_type::NativeType;
