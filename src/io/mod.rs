//! Instance loading.

mod reader;

pub use reader::{parse_instance, read_instance, LoadError};
