//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - resolves the row source, catalog and name table
//! - runs the requested workflow
//! - prints reports and writes optional exports

use clap::Parser;
use tracing::debug;

use crate::cli::{Cli, Command, CompareArgs, GlobalArgs, SeriesArgs, SnapshotArgs, VariationsArgs, WagesArgs};
use crate::config::{Catalog, SourceConfig};
use crate::data::SeriesLoader;
use crate::error::AppError;
use crate::io::source::RowSource;
use crate::names::CountryNames;
use crate::snapshot::{Dispatch, SnapshotBuilder, SnapshotCache};

pub mod pipeline;

type BoxedSource = Box<dyn RowSource + Send>;

/// Entry point for the `rw` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    crate::logging::init(cli.global.verbose);

    let loader = build_loader(&cli.global)?;

    match cli.command {
        Command::Series(args) => handle_series(&loader, args),
        Command::Wages(args) => handle_wages(&loader, args),
        Command::Snapshot(args) => handle_snapshot(loader, args),
        Command::Compare(args) => handle_compare(loader, args),
        Command::Variations(args) => handle_variations(&loader, args),
    }
}

fn build_loader(global: &GlobalArgs) -> Result<SeriesLoader<BoxedSource>, AppError> {
    let source = SourceConfig::resolve(global.data_dir.clone(), global.base_url.clone())?;
    debug!(?source, "resolved row source");

    let catalog = match &global.catalog {
        Some(path) => Catalog::from_json_path(path)?,
        None => Catalog::default(),
    };
    let names = match &global.names {
        Some(path) => CountryNames::from_csv_path(path)?,
        None => CountryNames::builtin(),
    };

    Ok(SeriesLoader::new(source.into_source(), catalog, names))
}

fn handle_series(loader: &SeriesLoader<BoxedSource>, args: SeriesArgs) -> Result<(), AppError> {
    let grouped = loader.load_grouped(&args.resource, args.country.as_deref())?;
    println!("{}", crate::report::format_dataset(&args.resource, &grouped));

    if let Some(path) = &args.json {
        crate::io::export::write_json(path, &grouped.dataset)?;
    }
    Ok(())
}

fn handle_wages(loader: &SeriesLoader<BoxedSource>, args: WagesArgs) -> Result<(), AppError> {
    let run = pipeline::run_real_wages(loader, &args.country, args.base_year)?;
    println!("{}", crate::report::format_real_wages(&run.country, &run.rows));

    if let Some(path) = &args.export {
        crate::io::export::write_real_wages_csv(path, &run.rows)?;
    }
    Ok(())
}

fn handle_snapshot(loader: SeriesLoader<BoxedSource>, args: SnapshotArgs) -> Result<(), AppError> {
    let mut builder = SnapshotBuilder::new(loader, SnapshotCache::default());
    let snapshot = builder
        .build_snapshot(&args.country)
        .ok_or_else(|| AppError::new(2, "Country name must not be blank."))?;
    println!("{}", crate::report::format_snapshot(&snapshot));

    if let Some(path) = &args.json {
        crate::io::export::write_json(path, snapshot.as_ref())?;
    }
    Ok(())
}

fn handle_compare(loader: SeriesLoader<BoxedSource>, args: CompareArgs) -> Result<(), AppError> {
    if args.a.trim().is_empty() || args.b.trim().is_empty() {
        return Err(AppError::new(2, "Country names must not be blank."));
    }
    let builder = SnapshotBuilder::new(loader, SnapshotCache::default());
    let mut session = pipeline::ComparisonSession::new(builder);

    // The counterpart is chosen before the anchor exists, so it is parked
    // and handed back once the anchor snapshot is ready.
    let parked = session.select_counterpart(&args.b);
    let ticket = match (parked, session.set_anchor(&args.a)) {
        (_, Some(ticket)) | (Dispatch::Run(ticket), None) => ticket,
        (Dispatch::Deferred, None) => return Err(AppError::new(4, "Comparison target was lost.")),
    };

    let comparison = session
        .complete(&ticket)
        .ok_or_else(|| AppError::new(4, "Comparison was superseded."))?;
    println!("{}", crate::report::format_comparison(&comparison));

    if let Some(path) = &args.json {
        crate::io::export::write_json(path, &comparison)?;
    }
    Ok(())
}

fn handle_variations(loader: &SeriesLoader<BoxedSource>, args: VariationsArgs) -> Result<(), AppError> {
    let run = pipeline::run_variations(loader, &args.country)?;
    println!("{}", crate::report::format_variations(&run.country, &run.rows));

    if let Some(path) = &args.export {
        crate::io::export::write_variations_csv(path, &run.rows)?;
    }
    Ok(())
}
