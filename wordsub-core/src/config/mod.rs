//! Dictionary configuration files
//!
//! Two formats are supported: a TOML document with an `[entries]` table and
//! a plain word list with one `key replacement` pair per line.

mod loader;
mod types;

pub use loader::DictionaryFormat;
pub use types::{DictionaryConfig, MetadataConfig};
