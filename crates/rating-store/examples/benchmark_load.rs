//! Time loading a ratings file into a RatingStore.
//!
//! Run with: cargo run --package rating-store --example benchmark_load -- data/ratings.dat

use rating_store::{RatingScale, RatingStore};
use std::path::PathBuf;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("debug").init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/ratings.dat"));

    println!("Loading ratings from {}...\n", path.display());

    let start = Instant::now();
    let store = RatingStore::load_from_file(&path, RatingScale::default())?;
    let elapsed = start.elapsed();

    let (users, items, ratings) = store.counts();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Users: {}", users);
    println!("Items: {}", items);
    println!("Ratings: {}", ratings);
    println!(
        "\nPerformance: {:.0} ratings/second",
        ratings as f64 / elapsed.as_secs_f64()
    );
    Ok(())
}
