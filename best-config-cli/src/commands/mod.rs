//! CLI command implementations.
//!
//! - `show`: Resolve and print the global and project configuration
//! - `locate`: Print the configuration source for a path

pub mod locate;
pub mod show;

pub use locate::LocateCommand;
pub use show::ShowCommand;
