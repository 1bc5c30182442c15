extern crate hanzi_substructure;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hanzi_substructure::StrokeRepository;

#[derive(Parser, Debug)]
#[command(about = "Converts the stroke-info JSON dictionary into a binary stroke repository")]
struct Args {
    #[arg(long, default_value = "./data/strokeInfo.json")]
    input: PathBuf,

    #[arg(long, default_value = "./data/strokeInfo.bin")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let file = File::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;
    let repo = StrokeRepository::from_json_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse {}", args.input.display()))?;

    let out = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let mut writer = BufWriter::new(out);
    repo.to_bincode_writer(&mut writer)?;
    writer.flush()?;
    info!(
        characters = repo.len(),
        output = %args.output.display(),
        "wrote binary stroke repository"
    );
    Ok(())
}
