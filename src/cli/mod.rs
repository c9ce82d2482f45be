//! Command-line surface: argument parsing and the terminal console.

#[cfg(feature = "cli")]
mod args;
pub mod console;

#[cfg(feature = "cli")]
pub use args::{ChatArgs, Cli, Commands, ServeArgs};
pub use console::{Console, LineConsole, StdioConsole};
