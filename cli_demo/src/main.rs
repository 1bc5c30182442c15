extern crate hanzi_substructure;

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use hanzi_substructure::{Matcher, SearchConfig, StrokeRepository};

#[derive(Parser, Debug)]
#[command(about = "Replays substructure queries against a stroke repository and times them")]
struct Args {
    /// Stroke repository: bincode (.bin) or stroke-info JSON (.json)
    #[arg(long, default_value = "data/strokeInfo.bin")]
    repository: PathBuf,

    /// Query file; one query per line: reference character, then comma-separated stroke positions
    #[arg(long, default_value = "debug/queries.txt")]
    queries: PathBuf,

    /// Search configuration as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 100)]
    iters: usize,
}

struct Query {
    reference: char,
    positions: Vec<usize>,
}

fn load_repository(path: &Path) -> Result<StrokeRepository> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let repo = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => StrokeRepository::from_json_reader(reader)?,
        _ => StrokeRepository::from_bincode_reader(reader)?,
    };
    Ok(repo)
}

// Lines look like "日 0,1,3"; blank lines and lines starting with '#' are skipped
fn parse_query(line: &str) -> Result<Query> {
    let mut parts = line.split_whitespace();
    let reference = match parts.next().map(|s| s.chars().collect::<Vec<char>>()) {
        Some(chars) if chars.len() == 1 => chars[0],
        _ => bail!("expected a single reference character in {:?}", line),
    };
    let positions = parts
        .next()
        .unwrap_or("")
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| s.trim().parse::<usize>().with_context(|| format!("bad position {:?}", s)))
        .collect::<Result<Vec<usize>>>()?;
    Ok(Query { reference, positions })
}

fn read_queries(path: &Path) -> Result<Vec<Query>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut res: Vec<Query> = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        res.push(parse_query(line)?);
    }
    Ok(res)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            SearchConfig::from_json_reader(BufReader::new(file))?
        }
        None => SearchConfig::default(),
    };

    info!(path = %args.repository.display(), "loading stroke repository");
    let repo = load_repository(&args.repository)?;
    let queries = read_queries(&args.queries)?;
    info!(
        characters = repo.len(),
        queries = queries.len(),
        iters = args.iters,
        "starting evaluation"
    );

    let matcher = Matcher::with_config(&repo, config)?;
    let start = Instant::now();
    let mut potential_total = 0;
    let mut failed = 0;
    for _ in 0..args.iters {
        for query in &queries {
            match matcher.search(query.reference, &query.positions) {
                Ok(outcome) => potential_total += outcome.potential.len(),
                Err(err) => {
                    warn!(reference = %query.reference, error = %err, "query failed");
                    failed += 1;
                }
            }
        }
    }
    let duration = start.elapsed();
    println!(
        "Finished in {:?}. Potential matches: {}. Failed queries: {}.",
        duration, potential_total, failed
    );
    Ok(())
}
