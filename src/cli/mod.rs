/// CLI layer: argument parsing and output rendering.
pub mod args;
pub mod output;

pub use args::{Cli, OutputFormat};
pub use output::{Writers, write_error};
