//! belfiore-cli: Command-line interface for belfiore-core
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ belfiore-cli --input belfiore.json.gz stats
//!
//! - Lookup a code, optionally as of a date
//!   $ belfiore-cli -i belfiore.json.gz lookup h501
//!   $ belfiore-cli -i belfiore.json.gz --active 1920-01-01 lookup A001
//!
//! - Cities of a province, as JSON
//!   $ belfiore-cli -i belfiore.json.gz --province RM --json list
//!
//! - Partition files from a directory
//!   $ belfiore-cli --dir data/ --license CC-BY-4.0 --license IODL-2.0 find roma
//!
//! Set `RUST_LOG=debug` to trace lookups.
mod args;

use crate::args::{ActiveOn, CliArgs, Commands, PlaceType};
use anyhow::{bail, Context};
use belfiore_core::{Connector, Dataset, Place};
use clap::Parser;
use log::debug;
use regex::Regex;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    let db = narrow(open(&args)?, &args)?;
    debug!("view filter: {:?}", db.filter());

    match &args.command {
        Commands::Stats => {
            let stats = db.stats()?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Dataset statistics:");
                println!("  Sources: {}", stats.sources);
                println!("  Cities: {}", stats.cities);
                println!("  Countries: {}", stats.countries);
                println!("  Licenses: {}", db.licenses().join(", "));
            }
        }

        Commands::Lookup { code } => match db.lookup_by_code(code)? {
            Some(place) => print_one(&place, args.json)?,
            None => eprintln!("No place found for code: {code}"),
        },

        Commands::Search { pattern } => print_many(&db.search_by_name(pattern)?, args.json)?,

        Commands::Find { name } => match db.find_by_name(name)? {
            Some(place) => print_one(&place, args.json)?,
            None => eprintln!("No unique place named: {name}"),
        },

        Commands::Folded { text } => print_many(&db.search_by_folded_name(text)?, args.json)?,

        Commands::List => print_many(&db.to_vec()?, args.json)?,
    }

    Ok(())
}

fn open(args: &CliArgs) -> anyhow::Result<Connector> {
    let dataset = match (&args.input, &args.dir) {
        (Some(path), _) => Dataset::load_from_path(path)
            .with_context(|| format!("loading dataset {}", path.display()))?,
        (None, Some(dir)) => {
            let pattern = Regex::new(&args.pattern)
                .with_context(|| format!("invalid --pattern {}", args.pattern))?;
            Dataset::load_from_dir(dir, &pattern, args.licenses.clone())
                .with_context(|| format!("loading partitions from {}", dir.display()))?
        }
        (None, None) => bail!("no dataset given: pass --input FILE or --dir DIR"),
    };
    Ok(Connector::from_dataset(dataset))
}

fn narrow(db: Connector, args: &CliArgs) -> anyhow::Result<Connector> {
    let db = match args.active {
        Some(ActiveOn::Today) => db.active_today(),
        Some(ActiveOn::Date(date)) => db.active(date),
        None => db,
    };
    let db = match args.kind {
        Some(PlaceType::City) => db.cities()?,
        Some(PlaceType::Country) => db.countries()?,
        None => db,
    };
    match &args.province {
        Some(province) => Ok(db.by_province(province)?),
        None => Ok(db),
    }
}

fn print_one(place: &Place, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(place)?);
        return Ok(());
    }
    let kind = if place.is_city() { "City" } else { "Country" };
    println!("{kind}: {}", place.name());
    println!("Code: {}", place.code());
    match place.province() {
        Some(province) => println!("Province: {province}"),
        None => println!("ISO 3166: {}", place.region_code()),
    }
    println!("Created: {}", place.creation_date);
    println!("Expires: {}", place.expiration_date);
    println!("License: {}", place.license().unwrap_or("unknown"));
    Ok(())
}

fn print_many(places: &[Place], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(places)?);
    } else if places.is_empty() {
        eprintln!("No places found");
    } else {
        for place in places {
            println!("{} {} ({})", place.code(), place.name(), place.region_code());
        }
    }
    Ok(())
}
