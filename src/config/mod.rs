// src/config/mod.rs
mod cli;
mod models;

pub use cli::{normalize_args, Cli};
pub use models::*;

/// Parse command line arguments, accepting Go-style single-dash long flags.
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString>,
{
    use clap::Parser;

    Cli::try_parse_from(normalize_args(args))
}
