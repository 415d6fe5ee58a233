//! store_floor: run one sensor variant and export what it produced.
//!
//! ```text
//! store_floor --variant tracking --steps 200 --seed 7 --out output/tracking
//! store_floor --live --interval-ms 250 --steps 20
//! store_floor --config run.json
//! ```
//!
//! Writes `readings.csv` (and `heatmap.png` when positions are tracked) to
//! `--out`, then prints the run summary and column correlations.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ips_core::{SimConfig, Tick, TickUnit};
use ips_heatmap::HeatmapGrid;
use ips_output::{CsvWriter, SimOutputObserver};
use ips_output::writer::OutputWriter;
use ips_sensor::{CustomerSuite, Record, SensorSuite, StoreFloorSuite, TrackingSuite};
use ips_sim::{LoggingObserver, Row, SimBuilder, SimObserver, TimeSeriesStore, correlation, describe};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Variant {
    /// Rotation, foot traffic, item pickup, motion.
    StoreFloor,
    /// Gyroscope, RFID, camera, tracked position and beacon RSSI.
    Tracking,
    /// Browsing time, purchases, returning customer.
    Customer,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum TickUnitArg {
    Seconds,
    Minutes,
}

impl From<TickUnitArg> for TickUnit {
    fn from(arg: TickUnitArg) -> Self {
        match arg {
            TickUnitArg::Seconds => TickUnit::Seconds,
            TickUnitArg::Minutes => TickUnit::Minutes,
        }
    }
}

/// Indoor positioning sensor simulator
#[derive(Parser, Debug)]
#[command(name = "store_floor")]
#[command(about = "Simulate in-store sensors, export readings and a position heatmap", long_about = None)]
struct Args {
    /// Sensor variant to simulate
    #[arg(short = 'V', long, value_enum, default_value = "store-floor")]
    variant: Variant,

    /// JSON file with a full or partial SimConfig; flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of steps (1..=1000)
    #[arg(short = 'n', long)]
    steps: Option<u64>,

    /// Duration of one step
    #[arg(short, long, value_enum)]
    tick_unit: Option<TickUnitArg>,

    /// Run seed; omitted means a fresh one is drawn and reported
    #[arg(short, long)]
    seed: Option<u64>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<u32>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<u32>,

    /// Disable position tracking (no heatmap)
    #[arg(long)]
    no_track: bool,

    /// Print rows as they are produced, pausing between them
    #[arg(long)]
    live: bool,

    /// Pause between live rows, in milliseconds
    #[arg(long, default_value = "1000")]
    interval_ms: u64,

    /// Output directory
    #[arg(short, long, default_value = "output/store_floor")]
    out: PathBuf,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn sim_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("opening config {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => SimConfig::default(),
        };

        if let Some(steps) = self.steps {
            config.total_steps = steps;
        }
        if let Some(unit) = self.tick_unit {
            config.tick_duration_secs = TickUnit::from(unit).secs();
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if self.no_track {
            config.track_positions = false;
        }
        if self.live {
            config.update_interval_ms = Some(self.interval_ms);
        }
        config.validate()?;
        Ok(config)
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Streams rows to the CSV writer while logging progress.
struct DemoObserver<W: OutputWriter> {
    output: SimOutputObserver<W>,
    log:    LoggingObserver,
}

impl<R: Record, W: OutputWriter> SimObserver<R> for DemoObserver<W> {
    fn on_row(&mut self, row: &Row<R>) {
        self.output.on_row(row);
        self.log.on_row(row);
    }

    fn on_run_end(&mut self, final_tick: Tick, heatmap: Option<&HeatmapGrid>) {
        SimObserver::<R>::on_run_end(&mut self.output, final_tick, heatmap);
        SimObserver::<R>::on_run_end(&mut self.log, final_tick, heatmap);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = args.sim_config()?;
    match args.variant {
        Variant::StoreFloor => run(&args, config, StoreFloorSuite::default()),
        Variant::Tracking => {
            let suite = TrackingSuite::for_grid(config.grid_size()?)?;
            run(&args, config, suite)
        }
        Variant::Customer => run(&args, config, CustomerSuite::default()),
    }
}

fn run<S: SensorSuite>(args: &Args, config: SimConfig, suite: S) -> Result<()> {
    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    let total_steps = config.total_steps;
    let mut sim = SimBuilder::new(config, suite).build()?;
    info!(seed = sim.seed, "replay this run with --seed {}", sim.seed);

    let csv_path = args.out.join("readings.csv");
    let writer = CsvWriter::create(&csv_path, <S::Record as Record>::COLUMNS)?;
    let mut obs = DemoObserver {
        output: SimOutputObserver::new(writer),
        log:    LoggingObserver::new((total_steps / 10).max(1)),
    };

    let t0 = Instant::now();
    if args.live {
        for row in sim.live() {
            let row = row?;
            print_row(&row);
            obs.on_row(&row);
        }
        SimObserver::<S::Record>::on_run_end(&mut obs, sim.clock.current_tick, sim.heatmap.as_ref());
    } else {
        sim.run(&mut obs)?;
    }
    let elapsed = t0.elapsed();

    if let Some(e) = obs.output.take_error() {
        bail!("writing {}: {e}", csv_path.display());
    }

    let out = sim.finish();
    println!();
    println!("Simulation complete in {:.3} s (seed {})", elapsed.as_secs_f64(), out.seed);
    println!("  {}: {} rows", csv_path.display(), out.store.len());

    if let Some(grid) = &out.heatmap {
        let png = args.out.join("heatmap.png");
        ips_heatmap::save(&grid.snapshot(), &png)?;
        println!(
            "  {}: {}, {} samples, peak cell {}",
            png.display(),
            grid.size(),
            grid.total(),
            grid.max()
        );
    }

    print_summary(&out.store);
    Ok(())
}

// ── Printing ──────────────────────────────────────────────────────────────────

fn print_row<R: Record>(row: &Row<R>) {
    let readings: Vec<String> = row
        .record
        .readings()
        .into_iter()
        .map(|(name, reading)| format!("{name}={reading}"))
        .collect();
    println!("{} t={} {}", row.tick, row.unix_time_secs, readings.join(" "));
}

fn print_summary<R: Record>(store: &TimeSeriesStore<R>) {
    println!();
    println!(
        "{:<20} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
    );
    println!("{}", "-".repeat(108));
    for summary in describe(store) {
        println!("{summary}");
    }

    let matrix = correlation(store);
    if matrix.is_empty() {
        return;
    }
    println!();
    print!("{:<20}", "correlation");
    for name in matrix.columns() {
        print!(" {:>8}", abbreviate(name));
    }
    println!();
    for (i, name) in matrix.columns().iter().enumerate() {
        print!("{name:<20}");
        for j in 0..matrix.len() {
            match matrix.at(i, j) {
                Some(r) => print!(" {r:>8.3}"),
                None => print!(" {:>8}", "-"),
            }
        }
        println!();
    }
}

fn abbreviate(name: &str) -> &str {
    name.get(..8).unwrap_or(name)
}
