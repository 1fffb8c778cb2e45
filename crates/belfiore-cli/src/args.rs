use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for belfiore-cli
#[derive(Debug, Parser)]
#[command(
    name = "belfiore",
    version,
    about = "CLI for querying the Belfiore code dataset of Italian cities and foreign countries"
)]
pub struct CliArgs {
    /// Path to a dataset document (.json or .json.gz)
    #[arg(short = 'i', long = "input", global = true, conflicts_with = "dir")]
    pub input: Option<PathBuf>,

    /// Directory holding one partition file per source
    #[arg(short = 'd', long = "dir", global = true)]
    pub dir: Option<PathBuf>,

    /// File name pattern selecting the partition files in --dir
    #[arg(long = "pattern", global = true, default_value = r"\.json(\.gz)?$")]
    pub pattern: String,

    /// License table for --dir datasets, in index order (repeatable)
    #[arg(short = 'l', long = "license", global = true)]
    pub licenses: Vec<String>,

    /// Only places active on this date (YYYY-MM-DD, or "today")
    #[arg(short = 'a', long = "active", global = true, value_parser = parse_active)]
    pub active: Option<ActiveOn>,

    /// Only cities of this province (e.g. RM)
    #[arg(short = 'p', long = "province", global = true, conflicts_with = "kind")]
    pub province: Option<String>,

    /// Only cities or only countries
    #[arg(short = 't', long = "type", global = true, value_enum)]
    pub kind: Option<PlaceType>,

    /// Print results as JSON
    #[arg(long = "json", global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveOn {
    Today,
    Date(NaiveDate),
}

fn parse_active(value: &str) -> Result<ActiveOn, String> {
    if value.eq_ignore_ascii_case("today") {
        return Ok(ActiveOn::Today);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(ActiveOn::Date)
        .map_err(|e| format!("'{value}' is not a YYYY-MM-DD date: {e}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlaceType {
    City,
    Country,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the dataset contents
    Stats,

    /// Lookup a place by Belfiore code
    Lookup {
        /// Belfiore code, case-insensitive (e.g. H501, Z110)
        code: String,
    },

    /// Search places whose name matches a pattern
    Search {
        /// Regular expression, case-insensitive (e.g. "^san ")
        pattern: String,
    },

    /// Find the single place with this exact name
    Find {
        /// Whole-name pattern, case-insensitive (e.g. roma)
        name: String,
    },

    /// Search names ignoring accents and case
    Folded {
        /// Text to look for (e.g. "forli" finds "Forlì")
        text: String,
    },

    /// List every place of the current view
    List,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_the_command() {
        let args = CliArgs::try_parse_from([
            "belfiore", "lookup", "H501", "--input", "data.json.gz", "--active", "2000-01-01",
        ])
        .unwrap();
        assert!(matches!(args.command, Commands::Lookup { ref code } if code == "H501"));
        assert_eq!(
            args.active,
            Some(ActiveOn::Date(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()))
        );
    }

    #[test]
    fn province_and_type_are_exclusive() {
        let parsed = CliArgs::try_parse_from([
            "belfiore", "--province", "RM", "--type", "country", "list",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn rejects_bad_dates() {
        assert!(CliArgs::try_parse_from(["belfiore", "--active", "31/12/2000", "list"]).is_err());
        let today = CliArgs::try_parse_from(["belfiore", "--active", "today", "list"]).unwrap();
        assert_eq!(today.active, Some(ActiveOn::Today));
    }
}
