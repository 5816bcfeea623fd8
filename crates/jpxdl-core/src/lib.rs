pub mod config;
pub mod logging;

pub mod checksum;
pub mod error;
pub mod feed;
pub mod fetcher;
pub mod filename;
pub mod http;
pub mod resolver;
