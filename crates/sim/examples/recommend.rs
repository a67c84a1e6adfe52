// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// ```bash
// $ cargo r --release --example recommend -- AS AD AC AH KS KD 2C
// ```
use anyhow::{Result, bail};
use clap::Parser;
use log::info;

use asiapoker_sim::{CancelToken, Config, Ranked, Request, RunStatus, Simulator};

#[derive(Debug, Parser)]
struct Cli {
    /// The seven player cards, like AS 10H XJ.
    #[clap(num_args = 7, required = true)]
    cards: Vec<String>,
    /// Number of dealer hands to sample.
    #[clap(long, short, default_value_t = 100_000)]
    samples: u64,
    /// Number of worker threads.
    #[clap(long, short)]
    workers: Option<usize>,
    /// Fixed seed for reproducible results.
    #[clap(long)]
    seed: Option<u64>,
    /// Confidence level of the probability intervals.
    #[clap(long, default_value_t = 0.95)]
    confidence: f64,
    /// Number of settings to show.
    #[clap(long, default_value_t = 5)]
    top: usize,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    config.confidence = cli.confidence;
    config.top_k = cli.top;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let sim = Simulator::new(config)?;
    let mut request = Request::parse(&cli.cards, cli.samples)?;
    if let Some(workers) = cli.workers {
        request = request.with_workers(workers);
    }

    let mut next_report = 0.1;
    let rec = sim.recommend(&request, &CancelToken::new(), |p| {
        if p >= next_report {
            info!("Progress {:.0}%", p * 100.0);
            while next_report <= p {
                next_report += 0.1;
            }
        }
    })?;

    if rec.status != RunStatus::Completed {
        bail!("simulation stopped after {} samples", rec.samples);
    }

    println!("Samples: {}", rec.samples);
    println!("Recommended:");
    print_ranked(&rec.recommended);

    if !rec.alternatives.is_empty() {
        println!("Alternatives:");
        for r in &rec.alternatives {
            print_ranked(r);
        }
    }

    Ok(())
}

fn print_ranked(r: &Ranked) {
    let p = r.partition;
    let high = p.high().map(|c| c.label()).join(" ");
    let mid = p.mid().map(|c| c.label()).join(" ");
    println!(
        "  {high:<16} | {mid:<8} | {:<6} {:.4} [{:.4}, {:.4}]",
        p.low().label(),
        r.probability,
        r.interval.low,
        r.interval.high
    );
}
