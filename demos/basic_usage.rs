//! Basic usage example for belfiore-rs
//!
//! This example demonstrates how to:
//! - Build a connector from a dataset
//! - Look places up by Belfiore code
//! - Search and find places by name
//! - List every place of a view

use belfiore_rs::demo_connector;
use belfiore_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== Belfiore-RS Basic Usage Example ===\n");

    let db = demo_connector()?;
    let stats = db.stats()?;
    println!(
        "✓ Dataset loaded: {} cities, {} countries in {} sources\n",
        stats.cities, stats.countries, stats.sources
    );

    // Example 1: Lookup by code
    println!("--- Example 1: Lookup by Belfiore code ---");
    for code in ["H501", "z404", "A000"] {
        match db.lookup_by_code(code)? {
            Some(place) => println!("  {code}: {} ({})", place.name(), place.region_code()),
            None => println!("  {code}: not found"),
        }
    }
    println!();

    // Example 2: Pattern search
    println!("--- Example 2: Names matching ^m|^t ---");
    for place in db.search_by_name("^m|^t")? {
        println!("  {} {}", place.code(), place.name());
    }
    println!();

    // Example 3: Unique match
    println!("--- Example 3: Find by exact name ---");
    if let Some(turin) = db.find_by_name("torino")? {
        println!("  Found: {} in province {:?}", turin.name(), turin.province());
        println!("  License: {}", turin.license().unwrap_or("unknown"));
    }
    println!();

    // Example 4: Lazy iteration
    println!("--- Example 4: First three places ---");
    for place in db.iter().take(3) {
        let place = place?;
        let kind = if place.is_city() { "city" } else { "country" };
        println!("  {} {} [{kind}]", place.code(), place.name());
    }

    Ok(())
}
