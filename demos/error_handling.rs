//! Error handling example for belfiore-rs
//!
//! Malformed input is an error; a well-formed query that matches nothing is
//! simply `None` or an empty list.

use belfiore_rs::demo_connector;
use belfiore_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== Belfiore-RS Error Handling Example ===\n");

    println!("--- Example 1: Loading a missing dataset ---");
    match Dataset::load_from_path("does/not/exist.json.gz") {
        Ok(_) => println!("  unexpectedly loaded"),
        Err(e) => println!("  ✗ {e}"),
    }
    println!();

    let db = demo_connector()?;

    println!("--- Example 2: Malformed versus absent codes ---");
    for code in ["Z999", "H5O1", "", "AB12"] {
        match db.lookup_by_code(code) {
            Ok(Some(place)) => println!("  {code:?}: {}", place.name()),
            Ok(None) => println!("  {code:?}: not in dataset"),
            Err(e) => println!("  {code:?}: {e}"),
        }
    }
    println!();

    println!("--- Example 3: Invalid name patterns ---");
    if let Err(e) = db.search_by_name("roma(") {
        println!("  {e}");
    }
    println!();

    println!("--- Example 4: Conflicting filters ---");
    let results = [
        db.countries().and_then(|v| v.by_province("RM")),
        db.cities().and_then(|v| v.countries()),
        db.by_province("R0"),
    ];
    for result in results {
        match result {
            Ok(view) => println!("  view: {:?}", view.filter()),
            Err(BelfioreError::Config(msg)) => println!("  config: {msg}"),
            Err(e) => println!("  other: {e}"),
        }
    }

    Ok(())
}
