use std::error::Error;
use std::io::{self, BufRead};

use rollingio::cli::OutputArgs;
use rollingio::{RollingFileConfig, RotatingWriterBuilder};
use sarge::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_BATCH: usize = 64;

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  rollingio_tee --output <token> [--output <token> ...] [--batch <n>]");
    eprintln!("  rollingio_tee --config <file.toml> [--batch <n>]");
    eprintln!();
    eprintln!("Reads lines from stdin and writes each one to every destination.");
    eprintln!();
    eprintln!("Output tokens:");
    eprintln!("  - | stdout         Write to stdout");
    eprintln!("  <template>         File path, may contain strftime directives (UTC)");
    eprintln!("  @<path>            Force treating value as a file path");
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut reader = ArgumentReader::new();

    let output_ref = reader.add::<OutputArgs>(tag::both('o', "output"));
    let config_ref = reader.add::<String>(tag::both('c', "config"));
    let batch_ref = reader.add::<u64>(tag::both('b', "batch"));

    let args = reader.parse()?;

    let output = match output_ref.get(&args) {
        Some(Ok(v)) => v,
        Some(Err(_)) => unreachable!("OutputArgs parsing is infallible"),
        None => OutputArgs::default(),
    };

    let batch = match batch_ref.get(&args) {
        Some(Ok(0)) => return Err("--batch must be at least 1".into()),
        Some(Ok(n)) => usize::try_from(n)?,
        Some(Err(e)) => return Err(format!("invalid --batch: {e:?}").into()),
        None => DEFAULT_BATCH,
    };

    let builder = match config_ref.get(&args) {
        Some(Ok(path)) => {
            let config = RollingFileConfig::from_path(&path)?;
            RotatingWriterBuilder::new().destinations_from_args(&output.merged_with(&config))
        }
        Some(Err(e)) => return Err(format!("invalid --config: {e:?}").into()),
        None if output.is_empty() => return Err("missing --output/--config".into()),
        None => RotatingWriterBuilder::new().with_output_args(&output),
    };

    let mut writer = builder.build();
    info!(destinations = ?writer.templates(), batch, "starting");

    if let Err(e) = writer.reconcile() {
        warn!("{e}");
    }

    let stdin = io::stdin();
    let mut lines = Vec::with_capacity(batch);
    let mut written = 0usize;
    for line in stdin.lock().lines() {
        lines.push(line?);
        if lines.len() == batch {
            writer.write_lines(&lines)?;
            written += lines.len();
            lines.clear();
        }
    }
    writer.write_lines(&lines)?;
    written += lines.len();

    writer.shutdown()?;
    info!(written, "done");
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("rollingio_tee error: {e}");
        print_usage();
        std::process::exit(1);
    }
}
