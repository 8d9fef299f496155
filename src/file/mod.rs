//! Document loading for the command-line tool.

pub mod loader;
