//! Command handlers for dimwish CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod configure;
pub mod create;
pub mod validate;
