//! Interactive and scriptable command shell over the tracker core.

pub mod chart;
pub mod commands;
pub mod core;
pub mod help;
pub mod output;
mod prompt;
pub mod registry;
mod shell;
pub mod shell_context;
pub mod table;

pub use shell::run_cli;
