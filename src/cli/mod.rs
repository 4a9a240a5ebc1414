//! Command-line interface.

mod commands;
mod render;

pub use commands::{is_verbose, run};
