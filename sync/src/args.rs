use atlas_engine::{ContinentFilter, CountryId, CountrySort, LanguageFilter, SortOrder};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the atlas binary
#[derive(Debug, Parser)]
#[command(
    name = "atlas",
    version,
    about = "Synchronize and browse a local cache of country reference data"
)]
pub struct CliArgs {
    /// Case-insensitive substring of the country name
    #[arg(short = 'q', long = "query", default_value = "")]
    pub query: String,

    /// Order of the listed countries
    #[arg(short = 's', long = "sort", value_enum, default_value_t = SortArg::Desc)]
    pub sort: SortArg,

    /// Continent to keep (e.g. Europe, "north america", sam)
    #[arg(short = 'c', long = "continent", value_parser = parse_continent)]
    pub continent: Option<ContinentFilter>,

    /// Language to keep (case-insensitive substring)
    #[arg(short = 'l', long = "language")]
    pub language: Option<String>,

    /// Print a single cached country by id
    #[arg(
        long = "show",
        value_name = "ID",
        conflicts_with = "languages",
        allow_negative_numbers = true
    )]
    pub show: Option<CountryId>,

    /// Print the languages spoken across the cache
    #[arg(long = "languages")]
    pub languages: bool,

    /// Read the country list from a JSON file instead of the remote API
    #[arg(long = "payload", value_name = "FILE")]
    pub payload: Option<PathBuf>,

    /// Skip synchronization and use the cache as is
    #[arg(long = "no-sync")]
    pub no_sync: bool,

    /// Overrides DATABASE_URL
    #[arg(long = "database", value_name = "URL")]
    pub database: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Asc,
    Desc,
    None,
}

impl From<SortArg> for CountrySort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Asc => CountrySort::ByName(SortOrder::Ascending),
            SortArg::Desc => CountrySort::ByName(SortOrder::Descending),
            SortArg::None => CountrySort::None,
        }
    }
}

impl CliArgs {
    pub fn language_filter(&self) -> LanguageFilter {
        match &self.language {
            Some(name) => LanguageFilter::language(name.clone()),
            None => LanguageFilter::None,
        }
    }
}

fn parse_continent(value: &str) -> Result<ContinentFilter, String> {
    ContinentFilter::parse(value).ok_or_else(|| {
        let known: Vec<_> = ContinentFilter::ALL
            .iter()
            .map(|c| c.display_name())
            .collect();
        format!("unknown continent '{}', expected one of: {}", value, known.join(", "))
    })
}
