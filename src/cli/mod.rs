//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes defining commands, parsing arguments, rendering API results as tables
//! and the interactive prompts used by the menu loop in `main`.

mod commands;
mod prompts;
mod render;

pub use commands::*;
pub use prompts::*;
pub use render::*;
