//! Subcommand implementations.

pub mod cart;
pub mod discount;
pub mod lists;
pub mod theme;

use thiserror::Error;

/// Errors raised by the command layer itself.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Neither an id nor a title was given.
    #[error("either an id or --title is required")]
    MissingCompareTarget,
}
