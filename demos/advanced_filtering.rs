//! Advanced filtering example for belfiore-rs
//!
//! Views are immutable: every narrowing call returns a new connector that
//! shares the packed data with the view it came from.

use belfiore_rs::demo_connector;
use belfiore_rs::prelude::*;
use chrono::NaiveDate;

fn main() -> Result<()> {
    println!("=== Belfiore-RS Advanced Filtering Example ===\n");

    let db = demo_connector()?;

    println!("--- Example 1: Cities versus countries ---");
    println!("  Cities: {}", db.cities()?.to_vec()?.len());
    for country in db.countries()?.iter() {
        let country = country?;
        println!("  {} {} ({:?})", country.code(), country.name(), country.iso3166());
    }
    println!();

    println!("--- Example 2: Province view ---");
    for place in db.by_province("rm")?.iter() {
        println!("  {}", place?.name());
    }
    println!();

    println!("--- Example 3: Active on a date ---");
    let before = NaiveDate::from_ymd_opt(1940, 1, 1).expect("valid date");
    let after = NaiveDate::from_ymd_opt(1950, 1, 1).expect("valid date");
    for (label, view) in [("1940", db.active(before)), ("1950", db.active(after))] {
        let found = view.lookup_by_code("B639")?.map(|p| p.name);
        println!("  Capodistria in {label}: {found:?}");
    }
    println!("  Cities active today: {}", db.active_today().cities()?.to_vec()?.len());
    println!();

    println!("--- Example 4: Accent-insensitive search ---");
    for place in db.search_by_folded_name("FORLI")? {
        println!("  {} matches 'FORLI'", place.name());
    }
    if let Some(forli) = db.find_by_folded_name("forli")? {
        println!("  unique: {} ({})", forli.name(), forli.code());
    }
    println!();

    println!("--- Example 5: Custom filter configuration ---");
    let filter = FilterConfig::builder()
        .province("MI")
        .active_date(after)
        .build()?;
    for place in db.with_filter(filter).iter() {
        println!("  {}", place?.name());
    }

    Ok(())
}
