use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use matrix_reduce::config::{
    clamp_setting, DEFAULT_SEED, DEFAULT_SIZE, DEFAULT_SLICE_SIZE, MAX_SIZE, MAX_WORKERS,
};
use matrix_reduce::implementations::rayon::rayon_reduce;
use matrix_reduce::implementations::single::single_reduce;
use matrix_reduce::{GlobalResult, Grid, ReduceError, Reducer, Strategy};

/// Sum, minimum and maximum of a random matrix, computed by a pool of
/// worker threads under the chosen synchronization strategy
#[derive(Parser, Debug)]
#[command(name = "matrix_reduce", version, about)]
struct Args {
    /// Side of the square matrix (clamped to 10000)
    #[arg(default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Number of worker threads (clamped to 10)
    #[arg(default_value_t = MAX_WORKERS)]
    workers: usize,

    /// Override the number of rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override the number of columns
    #[arg(long)]
    cols: Option<usize>,

    /// Strategy to run
    #[arg(long, value_enum, default_value_t = StrategyArg::All)]
    strategy: StrategyArg,

    /// Rows claimed per step by the dynamic bag
    #[arg(long, default_value_t = DEFAULT_SLICE_SIZE)]
    slice_size: usize,

    /// Seed for the matrix generator
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Print the matrix before reducing it
    #[arg(long)]
    print_matrix: bool,

    /// Benchmark mode: number of measured runs per strategy
    #[arg(long)]
    bench: Option<usize>,

    /// Warmup runs before measuring in benchmark mode
    #[arg(long, default_value_t = 3)]
    warmup: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Barrier,
    GlobalLock,
    DynamicBag,
    All,
}

impl StrategyArg {
    fn strategies(self) -> Vec<Strategy> {
        match self {
            StrategyArg::Barrier => vec![Strategy::Barrier],
            StrategyArg::GlobalLock => vec![Strategy::GlobalLock],
            StrategyArg::DynamicBag => vec![Strategy::DynamicBag],
            StrategyArg::All => Strategy::ALL.to_vec(),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let size = clamp_setting("size", args.size, MAX_SIZE);
    let rows = clamp_setting("rows", args.rows.unwrap_or(size), MAX_SIZE);
    let cols = clamp_setting("cols", args.cols.unwrap_or(size), MAX_SIZE);
    let workers = clamp_setting("workers", args.workers, MAX_WORKERS);

    let grid = Grid::random(rows, cols, args.seed);
    if args.print_matrix {
        grid.print();
    }

    let reducers = args
        .strategy
        .strategies()
        .into_iter()
        .map(|strategy| Reducer::new(workers, strategy)?.with_slice_size(args.slice_size))
        .collect::<Result<Vec<_>, ReduceError>>()
        .context("invalid reduction settings")?;

    match args.bench {
        Some(iterations) => bench(&grid, &reducers, iterations, args.warmup),
        None => {
            for reducer in &reducers {
                run_once(&grid, reducer)?;
            }
            Ok(())
        }
    }
}

fn run_once(grid: &Grid, reducer: &Reducer) -> Result<()> {
    println!("=== {} ({} workers) ===", reducer.strategy(), reducer.workers());

    let start = Instant::now();
    let result = reducer
        .reduce(grid)
        .with_context(|| format!("{} reduction failed", reducer.strategy()))?;
    let elapsed = start.elapsed();

    println!("{}", result);
    println!("The execution time is {} sec", elapsed.as_secs_f64());
    println!();
    Ok(())
}

fn bench(grid: &Grid, reducers: &[Reducer], iterations: usize, warmup: usize) -> Result<()> {
    if iterations == 0 {
        anyhow::bail!("--bench needs at least one measured run");
    }

    println!("=== matrix reduction benchmark ===");
    println!(
        "matrix: {}x{}, runs: {}, warmup: {}\n",
        grid.rows(),
        grid.cols(),
        iterations,
        warmup
    );

    let expected = single_reduce(grid).context("single-thread reference failed")?;

    run_benchmark("Single Thread", iterations, warmup, || single_reduce(grid))?;
    run_benchmark("Rayon", iterations, warmup, || rayon_reduce(grid))?;
    for reducer in reducers {
        let name = format!("{} ({} workers)", reducer.strategy(), reducer.workers());
        let result = run_benchmark(&name, iterations, warmup, || reducer.reduce(grid))?;
        if (result.sum, result.min.value, result.max.value)
            != (expected.sum, expected.min.value, expected.max.value)
        {
            anyhow::bail!("{} disagrees with the single-thread result", reducer.strategy());
        }
    }

    println!("=== benchmark finished ===");
    Ok(())
}

fn run_benchmark<F>(name: &str, iterations: usize, warmup: usize, mut reduce_fn: F) -> Result<GlobalResult>
where
    F: FnMut() -> Result<GlobalResult, ReduceError>,
{
    println!("{}:", name);

    for _ in 0..warmup {
        reduce_fn()?;
        std::thread::sleep(Duration::from_millis(100));
    }

    let mut times = Vec::with_capacity(iterations);
    let mut last = None;
    for i in 0..iterations {
        // evict the matrix from cache between runs (roughly)
        let _dummy: Vec<u8> = vec![0; 5 * 1024 * 1024];

        let start = Instant::now();
        let result = reduce_fn()?;
        let duration = start.elapsed();
        times.push(duration);
        last = Some(result);
        println!("  run {:2}: {:?}", i + 1, duration);

        std::thread::sleep(Duration::from_millis(50));
    }

    times.sort();
    let median = times[iterations / 2];
    let avg = times.iter().sum::<Duration>() / iterations as u32;
    let min = times[0];
    let max = times[iterations - 1];

    println!("  ---");
    println!("  min:    {:?}", min);
    println!("  median: {:?}", median);
    println!("  avg:    {:?}", avg);
    println!("  max:    {:?}", max);
    println!();

    last.context("no measured run")
}
