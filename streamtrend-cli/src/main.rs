//! StreamTrend CLI — drive the streaming engine from file or synthetic feeds.
//!
//! Commands:
//! - `replay` — feed ticks from a CSV file into one engine and print the
//!   signal tape
//! - `synth` — feed a seeded random-walk tick stream, for demos and smoke
//!   runs without market data
//!
//! The CLI plays the transport role: it owns the feed loop and the config
//! file, and talks to the engine only through ticks in and signals out.

use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use streamtrend_core::domain::{SignalOrigin, Tick};
use streamtrend_core::engine::{Engine, EngineConfig, FeedEvent};
use streamtrend_core::sink::ChannelSink;

#[derive(Parser)]
#[command(
    name = "streamtrend",
    about = "StreamTrend CLI — streaming trend-signal engine"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed ticks from a CSV file (timestamp,open,high,low,close,last_price).
    Replay {
        /// Path to the tick CSV.
        file: PathBuf,

        #[command(flatten)]
        params: EngineParams,
    },
    /// Feed a seeded random-walk tick stream.
    Synth {
        /// Number of ticks to generate.
        #[arg(long, default_value_t = 500)]
        ticks: usize,

        /// RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Starting price.
        #[arg(long, default_value_t = 100.0)]
        start_price: f64,

        /// Per-tick drift.
        #[arg(long, default_value_t = 0.0002)]
        drift: f64,

        /// Per-tick volatility.
        #[arg(long, default_value_t = 0.004)]
        volatility: f64,

        #[command(flatten)]
        params: EngineParams,
    },
}

/// Engine parameters: a TOML config file, individually overridable by flag.
#[derive(Args)]
struct EngineParams {
    /// Path to a TOML engine config (window_capacity, atr_period,
    /// multiplier, sma_period). Missing keys fall back to defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Candle window capacity. Overrides the config file.
    #[arg(long)]
    window: Option<usize>,

    /// ATR period. Overrides the config file.
    #[arg(long)]
    atr_period: Option<usize>,

    /// Supertrend band multiplier. Overrides the config file.
    #[arg(long)]
    multiplier: Option<f64>,

    /// Stance SMA period. Overrides the config file.
    #[arg(long)]
    sma_period: Option<usize>,
}

impl EngineParams {
    fn resolve(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => EngineConfig::default(),
        };
        if let Some(window) = self.window {
            config.window_capacity = window;
        }
        if let Some(period) = self.atr_period {
            config.atr_period = period;
        }
        if let Some(multiplier) = self.multiplier {
            config.multiplier = multiplier;
        }
        if let Some(period) = self.sma_period {
            config.sma_period = period;
        }
        Ok(config)
    }
}

/// One CSV row of tick data.
#[derive(Debug, serde::Deserialize)]
struct TickRecord {
    timestamp: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    last_price: f64,
}

impl From<TickRecord> for Tick {
    fn from(record: TickRecord) -> Self {
        Tick {
            timestamp: record.timestamp,
            open: record.open,
            high: record.high,
            low: record.low,
            close: record.close,
            last_price: record.last_price,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Replay { file, params } => {
            let ticks = load_ticks(&file)?;
            info!(count = ticks.len(), file = %file.display(), "replaying ticks");
            run_feed(params.resolve()?, ticks)
        }
        Commands::Synth {
            ticks,
            seed,
            start_price,
            drift,
            volatility,
            params,
        } => {
            let ticks = random_walk(ticks, seed, start_price, drift, volatility);
            info!(count = ticks.len(), seed, "feeding synthetic ticks");
            run_feed(params.resolve()?, ticks)
        }
    }
}

fn load_ticks(path: &Path) -> Result<Vec<Tick>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening tick file {}", path.display()))?;
    let mut ticks = Vec::new();
    for record in reader.deserialize() {
        let record: TickRecord = record.context("malformed tick row")?;
        ticks.push(Tick::from(record));
    }
    Ok(ticks)
}

/// Seeded random walk with drift and uniform noise. Deterministic per seed,
/// one tick per second from a fixed session open.
fn random_walk(n: usize, seed: u64, start_price: f64, drift: f64, volatility: f64) -> Vec<Tick> {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 9, 15, 0).unwrap();
    let mut price = start_price;

    (0..n)
        .map(|i| {
            let open = price;
            let noise: f64 = rng.gen_range(-1.0..1.0);
            price *= 1.0 + drift + volatility * noise;
            let close = price;
            let high = open.max(close) * (1.0 + rng.gen_range(0.0..volatility));
            let low = open.min(close) * (1.0 - rng.gen_range(0.0..volatility));
            Tick {
                timestamp: base + chrono::Duration::seconds(i as i64),
                open,
                high,
                low,
                close,
                last_price: close,
            }
        })
        .collect()
}

fn origin_label(origin: SignalOrigin) -> &'static str {
    match origin {
        SignalOrigin::Supertrend => "supertrend",
        SignalOrigin::SmaCross => "sma-cross",
    }
}

fn run_feed(config: EngineConfig, ticks: Vec<Tick>) -> Result<()> {
    let (sink, rx) = ChannelSink::new(256);
    let mut engine = Engine::new(config, sink);

    // The tape printer drains the bounded queue off-thread; a slow terminal
    // never stalls the feed loop.
    let printer = thread::spawn(move || {
        let mut printed = 0usize;
        for signal in rx {
            println!(
                "{}  {:>4} @ {:.2}  [{}]",
                signal.timestamp.format("%Y-%m-%d %H:%M:%S"),
                signal.kind.to_string(),
                signal.price,
                origin_label(signal.origin),
            );
            printed += 1;
        }
        printed
    });

    engine.on_event(FeedEvent::Connected);
    for tick in ticks {
        match engine.on_tick(tick) {
            Ok(snap) => {
                debug!(
                    window = snap.window_len,
                    band = snap.band,
                    sma = snap.sma,
                    stance = ?snap.stance,
                    "tick absorbed"
                );
            }
            Err(e) => warn!(error = %e, "tick rejected"),
        }
    }

    let accepted = engine.ticks_accepted();
    let rejected = engine.ticks_rejected();
    let emitted = engine.signals_emitted();
    let stance = engine.stance();
    let sink = engine.into_sink();
    let dropped = sink.dropped();
    drop(sink); // closes the queue; the printer drains and exits
    let printed = printer
        .join()
        .map_err(|_| anyhow::anyhow!("signal printer thread panicked"))?;

    println!();
    println!("=== Feed Summary ===");
    println!("Ticks accepted: {accepted}");
    println!("Ticks rejected: {rejected}");
    println!("Signals:        {emitted} ({printed} printed, {dropped} dropped)");
    println!("Final stance:   {stance:?}");
    Ok(())
}
