//! Tests for resolve, feeds and checksum subcommands.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_resolve() {
    match parse(&["jpxdl", "resolve", "irs-settlement-rates"]) {
        CliCommand::Resolve { name } => assert_eq!(name, "irs-settlement-rates"),
        _ => panic!("expected Resolve"),
    }
}

#[test]
fn cli_parse_resolve_requires_name() {
    assert!(Cli::try_parse_from(["jpxdl", "resolve"]).is_err());
}

#[test]
fn cli_parse_feeds() {
    match parse(&["jpxdl", "feeds"]) {
        CliCommand::Feeds => {}
        _ => panic!("expected Feeds"),
    }
}

#[test]
fn cli_parse_checksum() {
    match parse(&["jpxdl", "checksum", "jpx_data/jpx_settlement_prices_20240607.csv"]) {
        CliCommand::Checksum { path } => {
            assert_eq!(path, "jpx_data/jpx_settlement_prices_20240607.csv")
        }
        _ => panic!("expected Checksum"),
    }
}

#[test]
fn cli_parse_unknown_subcommand() {
    assert!(Cli::try_parse_from(["jpxdl", "pause", "1"]).is_err());
}
