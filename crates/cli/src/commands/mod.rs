//! CLI subcommand implementations.

pub mod admins;
pub mod check;
