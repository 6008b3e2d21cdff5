mod api;
mod boundary;

pub use api::{Client, Error, Result, DEFAULT_MODEL};
