//! Configuration adapters

mod json;

pub use json::{AdapterError, JsonAdapter};
