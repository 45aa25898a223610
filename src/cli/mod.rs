//! Command-line parsing for the real-wage comparison tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! loading/engine code.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::{ENV_BASE_URL, ENV_DATA_DIR};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "rw", version, about = "Real wages, inflation and cross-country comparisons")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct GlobalArgs {
    /// Directory containing `<resource>.csv` files.
    #[arg(long, global = true, env = ENV_DATA_DIR)]
    pub data_dir: Option<PathBuf>,

    /// Base URL serving `<resource>.csv` files (used when no data dir is set).
    #[arg(long, global = true, env = ENV_BASE_URL)]
    pub base_url: Option<String>,

    /// Resource catalog JSON replacing the built-in one.
    #[arg(long, global = true, value_name = "JSON")]
    pub catalog: Option<PathBuf>,

    /// Country-name table CSV (`canonical,localized,english,display`).
    #[arg(long, global = true, value_name = "CSV")]
    pub names: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load one resource and summarize its categories.
    Series(SeriesArgs),
    /// Nominal and real wages for a country.
    Wages(WagesArgs),
    /// Latest inflation/wage snapshot for a country.
    Snapshot(SnapshotArgs),
    /// Compare two countries on a shared base year.
    Compare(CompareArgs),
    /// Year-over-year income-share and inflation variations.
    Variations(VariationsArgs),
}

#[derive(Debug, Args, Clone)]
pub struct SeriesArgs {
    /// Resource id from the catalog.
    #[arg(long)]
    pub resource: String,

    /// Limit rows to one country (any known spelling).
    #[arg(long)]
    pub country: Option<String>,

    /// Write the dataset as JSON.
    #[arg(long, value_name = "JSON")]
    pub json: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct WagesArgs {
    #[arg(long)]
    pub country: String,

    /// Base year (default: 2012 if observed, else the earliest year).
    #[arg(long)]
    pub base_year: Option<i32>,

    /// Export the real-wage table to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SnapshotArgs {
    #[arg(long)]
    pub country: String,

    /// Write the snapshot as JSON.
    #[arg(long, value_name = "JSON")]
    pub json: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct CompareArgs {
    /// First country.
    pub a: String,

    /// Second country.
    pub b: String,

    /// Write the comparison as JSON.
    #[arg(long, value_name = "JSON")]
    pub json: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct VariationsArgs {
    #[arg(long)]
    pub country: String,

    /// Export the variation table to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["rw", "compare", "Spain", "France", "--data-dir", "data", "-vv"]);
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.global.data_dir, Some(PathBuf::from("data")));
        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.b, "France");
    }
}
