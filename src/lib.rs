pub mod amalgamate;
pub mod config;
pub mod document;
pub mod error;
pub mod markers;
pub mod ui;
pub mod version;

pub use error::{HeaderPackError, Result};
