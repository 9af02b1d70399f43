#![doc = include_str!("../README.md")]

pub mod error;
pub mod ffi;
pub mod ids;
pub mod types;

// Re-export core public API at crate root.
pub use error::{Error, Result};
pub use ffi::{RawArrayFns, RawIdArray};
pub use ids::{Id, IdArray, IdSource};
pub use types::WindowOptions;
