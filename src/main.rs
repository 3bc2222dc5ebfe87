//! XelisHash CLI
//!
//! A command-line tool for computing and benchmarking XelisHash digests.
//!
//! # Commands
//!
//! - `hash` - Hash one input with a chosen generation
//! - `benchmark` - Run performance benchmark over a scratch-pad pool
//! - `verify` - Check the built-in known-answer vectors

use clap::{Parser, Subcommand};
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;
use std::time::Instant;

use tracing_subscriber::EnvFilter;
use xelishash::input::{self, InputFormat};
use xelishash::algorithm::{
    SCRATCHPAD_BYTES, SCRATCHPAD_BYTES_V2, SCRATCHPAD_ITERS, SCRATCHPAD_ITERS_V2, STAGE_1_MAX,
};
use xelishash::{vectors, Algorithm, Hasher, ScratchPool};

#[derive(Parser)]
#[command(name = "xelishash")]
#[command(author = "Xelis")]
#[command(version = "0.2.0")]
#[command(about = "XelisHash proof-of-work hasher")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash a single input
    Hash {
        /// Algorithm tag: xel/0 (v1) or xel/1 (v2)
        #[arg(short, long, default_value = "xel/1")]
        algorithm: String,

        /// Treat the input as UTF-8 text instead of hex
        #[arg(long)]
        text: bool,

        /// Zero-extend short inputs to the algorithm minimum
        #[arg(long)]
        pad: bool,

        /// The input bytes
        input: String,
    },

    /// Run performance benchmark
    Benchmark {
        /// Algorithm tag: xel/0 (v1) or xel/1 (v2)
        #[arg(short, long, default_value = "xel/1")]
        algorithm: String,

        /// Number of threads to use (default: number of CPU cores)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Number of hashes to compute
        #[arg(short, long, default_value = "100")]
        count: u32,
    },

    /// Recompute the known-answer vectors
    Verify,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Hash {
            algorithm,
            text,
            pad,
            input,
        } => cmd_hash(&algorithm, text, pad, &input),
        Commands::Benchmark {
            algorithm,
            threads,
            count,
        } => cmd_benchmark(&algorithm, threads, count),
        Commands::Verify => cmd_verify(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_hash(algorithm: &str, text: bool, pad: bool, raw: &str) -> anyhow::Result<()> {
    let algorithm: Algorithm = algorithm.parse()?;
    let format = if text {
        InputFormat::Text
    } else {
        InputFormat::Hex
    };

    let mut data = input::decode(raw, format)?;
    if pad {
        data = input::zero_extend(data, algorithm.minimum_input_len());
    }
    tracing::debug!(%algorithm, len = data.len(), "hashing input");

    let digest = Hasher::new().hash(algorithm, &data)?;
    println!("{}", hex::encode(digest));

    Ok(())
}

fn cmd_benchmark(algorithm: &str, threads: Option<usize>, count: u32) -> anyhow::Result<()> {
    let algorithm: Algorithm = algorithm.parse()?;
    let num_threads = threads.unwrap_or_else(num_cpus::get).max(1);

    println!(
        "Running {} benchmark with {} hashes on {} threads...",
        algorithm, count, num_threads
    );

    let pool = ScratchPool::new(num_threads);
    let next = AtomicU32::new(0);
    let input_len = algorithm.minimum_input_len().max(112);

    let start = Instant::now();

    thread::scope(|scope| -> anyhow::Result<()> {
        let workers: Vec<_> = (0..num_threads)
            .map(|_| {
                scope.spawn(|| -> anyhow::Result<()> {
                    let mut data = vec![0u8; input_len];
                    loop {
                        let i = next.fetch_add(1, Ordering::Relaxed);
                        if i >= count {
                            return Ok(());
                        }
                        data[..4].copy_from_slice(&i.to_le_bytes());
                        pool.hash(algorithm, &data)?;
                    }
                })
            })
            .collect();

        for worker in workers {
            worker
                .join()
                .map_err(|_| anyhow::anyhow!("benchmark worker panicked"))??;
        }
        Ok(())
    })?;

    let elapsed = start.elapsed();
    let hashrate = count as f64 / elapsed.as_secs_f64();

    println!("\nResults:");
    println!("  Total hashes: {}", count);
    println!("  Time elapsed: {:.2}s", elapsed.as_secs_f64());
    println!("  Hashrate: {:.2} H/s", hashrate);

    println!("\nAlgorithm parameters:");
    match algorithm {
        Algorithm::V1 => {
            println!("  Scratch pad: {} KB", SCRATCHPAD_BYTES / 1024);
            println!("  Keccak passes: {}", STAGE_1_MAX);
            println!("  AES iterations: {}", SCRATCHPAD_ITERS);
        }
        Algorithm::V2 => {
            println!("  Scratch pad: {} KB", SCRATCHPAD_BYTES_V2 / 1024);
            println!("  Mixing passes: {}", SCRATCHPAD_ITERS_V2);
        }
    }
    println!("  Pool pads: {}", pool.capacity());

    Ok(())
}

fn cmd_verify() -> anyhow::Result<()> {
    let mut hasher = Hasher::new();
    let reports = vectors::verify_all(&mut hasher)?;

    let mut failed = 0;
    for report in &reports {
        let status = if report.passed() { "ok" } else { "FAILED" };
        println!("  {:<18} {:<6} {}", report.vector.name, status, report.actual_hex);
        if !report.passed() {
            tracing::warn!(
                vector = report.vector.name,
                expected = report.vector.expected_hex,
                actual = %report.actual_hex,
                "known-answer mismatch"
            );
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} vectors failed", failed, reports.len());
    }

    println!("\nAll {} vectors passed", reports.len());
    Ok(())
}
