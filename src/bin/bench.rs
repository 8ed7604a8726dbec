//! Performance benchmarks for Huffman compression.
//!
//! Measures compression and decompression throughput on generated inputs for
//! regression testing during development. Use for relative comparisons only.
//!
//! Usage:
//!   cargo run --release --features bench --bin bench          # 100 iterations
//!   cargo run --release --features bench --bin bench -- 1000  # custom count

#![allow(clippy::cast_precision_loss)]

use std::env;
use std::time::Instant;

use huffpack::{compress, decompress};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEFAULT_ITERATIONS: usize = 100;
const INPUT_SIZE: usize = 256 * 1024;
const SEED: u64 = 0x4855_4646;

struct BenchConfig {
    name: &'static str,
    generate: fn(&mut StdRng) -> Vec<u8>,
}

const BENCHMARKS: &[BenchConfig] = &[
    BenchConfig {
        name: "uniform",
        generate: uniform,
    },
    BenchConfig {
        name: "text",
        generate: text,
    },
    BenchConfig {
        name: "skewed",
        generate: skewed,
    },
    BenchConfig {
        name: "single-symbol",
        generate: single_symbol,
    },
];

fn uniform(rng: &mut StdRng) -> Vec<u8> {
    (0..INPUT_SIZE).map(|_| rng.gen()).collect()
}

fn text(rng: &mut StdRng) -> Vec<u8> {
    const ALPHABET: &[u8] = b"eeeeeeeeeeeetttttttttaaaaaaaaooooooooiiiiiiinnnnnnnsssssshhhhhrrrrrddddlllcccuummwwffggyyppbbvk          \n.,";
    (0..INPUT_SIZE)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

fn single_symbol(_: &mut StdRng) -> Vec<u8> {
    vec![b'z'; INPUT_SIZE]
}

/// Geometric distribution over bytes, producing long codes for rare symbols.
fn skewed(rng: &mut StdRng) -> Vec<u8> {
    (0..INPUT_SIZE)
        .map(|_| {
            let mut symbol = 0u8;
            while symbol < u8::MAX && rng.gen_bool(0.5) {
                symbol += 1;
            }
            symbol
        })
        .collect()
}

fn report(name: &str, bytes: usize, elapsed_us: f64, iterations: usize) {
    let per_iter_us = elapsed_us / iterations as f64;
    let throughput_mbps = bytes as f64 / per_iter_us;
    println!("{name:<20} {per_iter_us:>10.2} µs/iter  {throughput_mbps:>8.1} MB/s");
}

fn bench_compress(config: &BenchConfig, input: &[u8], iterations: usize) {
    // Warmup run
    let _ = compress(input);

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = compress(input);
    }
    let elapsed_us = start.elapsed().as_secs_f64() * 1_000_000.0;

    report(config.name, input.len(), elapsed_us, iterations);
}

fn bench_decompress(config: &BenchConfig, input: &[u8], iterations: usize) {
    let compressed = match compress(input) {
        Ok(data) => data,
        Err(e) => {
            println!("{:<20} SKIP (compression failed: {e})", config.name);
            return;
        }
    };

    // Warmup run
    let _ = decompress(&compressed);

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = decompress(&compressed);
    }
    let elapsed_us = start.elapsed().as_secs_f64() * 1_000_000.0;

    report(config.name, input.len(), elapsed_us, iterations);
}

fn main() {
    let iterations = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_ITERATIONS);

    let mut rng = StdRng::seed_from_u64(SEED);
    let inputs: Vec<Vec<u8>> = BENCHMARKS
        .iter()
        .map(|config| (config.generate)(&mut rng))
        .collect();

    println!("huffpack Benchmarks");
    println!("===================");
    println!("Iterations: {iterations}");
    println!("Input size: {INPUT_SIZE} bytes\n");

    println!("Compression:");
    for (config, input) in BENCHMARKS.iter().zip(&inputs) {
        bench_compress(config, input, iterations);
    }

    println!("\nDecompression:");
    for (config, input) in BENCHMARKS.iter().zip(&inputs) {
        bench_decompress(config, input, iterations);
    }
}
