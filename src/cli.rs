use crate::{
    config::{Config, FailurePolicy},
    driver, gateways,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geoenrich_core::usecases::GeoEnricher;
use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

const STDIO: &str = "-";

#[derive(Debug, Parser)]
#[command(version, about = "Enrich business location records with geographic coordinates")]
struct Args {
    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Geocode the address of every record and add its latitude and longitude
    Enrich {
        /// JSON lines with one entity per line ('-' for stdin)
        #[arg(short, long, default_value = STDIO)]
        input: PathBuf,
        /// Destination of the enriched records ('-' for stdout)
        #[arg(short, long, default_value = STDIO)]
        output: PathBuf,
        /// Number of worker threads (defaults to the number of CPUs)
        #[arg(short, long)]
        jobs: Option<usize>,
        /// Overrides `enrichment.on-failure` of the configuration
        #[arg(long, value_enum)]
        on_failure: Option<FailurePolicy>,
        /// Number of records that are enriched before they are written
        #[arg(long, default_value_t = driver::DEFAULT_BATCH_SIZE)]
        batch_size: usize,
    },
    /// Print the address of every record without geocoding it
    Address {
        /// JSON lines with one entity per line ('-' for stdin)
        #[arg(short, long, default_value = STDIO)]
        input: PathBuf,
    },
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let cfg = Config::try_load_from_file_or_default(args.config.as_deref())?;

    match args.command {
        Command::Enrich {
            input,
            output,
            jobs,
            on_failure,
            batch_size,
        } => {
            let geo_gw = gateways::geocoding_gateway(&cfg.geocoding)?;
            let enricher = GeoEnricher::new(geo_gw, cfg.datastore);
            let target = enricher.target();
            log::info!(
                "Enriching records of kind '{}' (project '{}', namespace {:?})",
                target.kind,
                target.project_id,
                target.namespace
            );
            let on_failure = on_failure.unwrap_or(cfg.enrichment.on_failure);
            let reader = open_input(&input)?;
            let writer = open_output(&output)?;
            match driver::run_enrichment(
                &enricher, reader, writer, on_failure, jobs, batch_size,
            ) {
                Ok(summary) => {
                    log::info!("Finished: {summary}");
                    Ok(())
                }
                Err(err) => {
                    log::error!("Enrichment aborted: {err:#}");
                    Err(err)
                }
            }
        }
        Command::Address { input } => {
            driver::print_addresses(open_input(&input)?, BufWriter::new(io::stdout()))
        }
    }
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path == Path::new(STDIO) {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn open_output(path: &Path) -> Result<Box<dyn Write>> {
    if path == Path::new(STDIO) {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}
