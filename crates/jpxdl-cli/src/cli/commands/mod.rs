//! CLI command handlers, one per file.

mod checksum;
mod feeds;
mod resolve;
mod run;

pub use checksum::run_checksum;
pub use feeds::run_list_feeds;
pub use resolve::run_resolve;
pub use run::run_feeds;
