//! Command handlers for the Searchlight CLI.

mod embed;
mod index;
mod query;

pub use embed::EmbedCommand;
pub use index::IndexCommand;
pub use query::QueryCommand;
