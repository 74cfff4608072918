//! Number processing chain demonstrating lazy filtering and aggregation
//!
//! Pipeline:
//! 1. Source: numbers 1-100
//! 2. Filter: keep only even numbers
//! 3. Transform: multiply by 10
//! 4. Aggregate: sum
//!
//! Usage: cargo run --example filter_chain --release

use seqpipe::IntPipeline;

fn main() {
    println!("Number Processing Pipeline");
    println!("==========================");
    println!("Numbers 1-100, filtering evens, multiplying by 10, and summing");
    println!();

    let mut observed = 0u64;
    let sum = IntPipeline::range_closed(1, 100)
        .filter(|v| v % 2 == 0)
        .map(|v| v * 10)
        .inspect(move |v| {
            observed += 1;
            if observed % 10 == 0 {
                println!("  ...{observed} elements through, latest: {v}");
            }
        })
        .sum();

    println!();
    println!("=== Final Results ===");
    println!("Sum of all numbers: {sum}");

    // The same chain, cut short: nothing past the first match is pulled.
    let first = IntPipeline::range_closed(1, 100)
        .filter(|v| v % 2 == 0)
        .map(|v| v * 10)
        .find_first();
    println!("First transformed element: {first:?}");
}
