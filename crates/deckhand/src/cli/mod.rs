//! Command-line interface module.

mod commands;
mod generate;
mod list;
mod serve;

pub use commands::{Cli, Commands, OutputFormat};
pub use generate::generate_once;
pub use list::list_presentations;
pub use serve::run_server;
