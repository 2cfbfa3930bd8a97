//! synthetic: end-to-end run of the trace-features pipeline.
//!
//! Loads an embedded network and population, replays the car trips those
//! plans imply, extracts the standard plan features plus per-window driven
//! distances, and writes them to `output/synthetic/features.tsv`.
//!
//! An optional first argument names a JSON `ExtractConfig`; missing fields
//! keep their defaults:
//!
//! ```json
//! { "strategy": { "binned": { "bin_size_secs": 3600.0 } },
//!   "error_policy": "fail_fast",
//!   "distance_windows_hours": [[8.0, 9.0]] }
//! ```
//!
//! Set `RUST_LOG=debug` for per-event diagnostics.

mod scenario;

use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};

use tf_core::{AgentId, ExtractConfig};
use tf_features::{FeatureSet, plan_features};
use tf_output::{DelimitedWriter, write_table};
use tf_plan::load_plans_reader;
use tf_trace::{TrajectoryAggregator, load_links_reader};

const OUTPUT_DIR: &str = "output/synthetic";

fn load_config() -> Result<ExtractConfig> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?
        }
        None => ExtractConfig {
            distance_windows_hours: vec![(7.0, 8.0), (8.0, 9.0), (17.0, 18.0)],
            ..ExtractConfig::default()
        },
    };
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();

    println!("=== synthetic: trace features ===");
    let config = load_config()?;
    println!(
        "Strategy: {:?}  |  Policy: {:?}  |  Windows: {:?}",
        config.strategy, config.error_policy, config.distance_windows_hours
    );
    println!();

    // 1. Inputs.
    let links = load_links_reader(Cursor::new(scenario::LINKS_CSV))?;
    let population = load_plans_reader(Cursor::new(scenario::PLANS_CSV))?;
    let events = scenario::events(&population, &links)?;
    println!("Network: {} links  |  Population: {} agents  |  Events: {}", links.len(), population.len(), events.len());

    // 2. Replay, restricted to the population.
    let t0 = Instant::now();
    let studied: HashSet<AgentId> = population.agents().collect();
    let mut aggregator = TrajectoryAggregator::with_filter(config.strategy, links, studied);
    aggregator.replay(events)?;
    let traces = Arc::new(aggregator.finish());
    println!("Replay: {} traced agents in {:.3} ms", traces.len(), t0.elapsed().as_secs_f64() * 1e3);

    // 3. Features.
    let t1 = Instant::now();
    let parked = config.stop_range()?;
    let (h0, h1) = config.stop_range_hours;
    let features = FeatureSet::standard(&config)?
        .with_flag(format!("parked_{h0}_{h1}"), move |i| {
            plan_features::is_activity_ongoing_during(i.plan, parked.start, parked.end)
        })
        .with_trace_distances(Arc::clone(&traces), &config.distance_windows_hours)?;
    let table = features.extract(&population, config.error_policy)?;
    println!("Extraction: {} rows, {} failures in {:.3} ms", table.len(), table.failures.len(), t1.elapsed().as_secs_f64() * 1e3);
    for failure in &table.failures {
        eprintln!("  {} / {}: {}", failure.agent, failure.feature, failure.error);
    }

    // 4. Output.  Writers never overwrite, so clear the previous run first.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let path = Path::new(OUTPUT_DIR).join("features.tsv");
    if path.exists() {
        std::fs::remove_file(&path)?;
    }
    let mut writer = DelimitedWriter::create(&path)?;
    write_table(&mut writer, &table)?;
    log::info!("feature table written to {}", path.display());
    println!("Wrote {}", path.display());
    println!();

    // 5. Summary table.
    print!("{:<8}", "Agent");
    for name in &table.names {
        print!(" {name:>20}");
    }
    println!();
    println!("{}", "-".repeat(8 + 21 * table.names.len()));
    for row in &table.rows {
        print!("{:<8}", row.agent.raw());
        for value in &row.values {
            print!(" {:>20}", value.to_string());
        }
        println!();
    }

    Ok(())
}
