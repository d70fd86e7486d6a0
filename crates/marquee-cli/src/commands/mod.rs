use anyhow::Result;
use serde::Serialize;

pub mod artist;
pub mod config;
pub mod show;
pub mod status;
pub mod venue;

/// Print `value` to stdout as pretty JSON.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
