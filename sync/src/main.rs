//! Atlas - synchronize and browse a local cache of country reference data.
//!
//! Refreshes the SQLite cache from the remote API, then prints the filtered
//! country list, a single country, or the languages in the cache.

mod args;

use std::sync::Arc;

use atlas_engine::{BrowseState, Country, Phase, Report};
use atlas_sync::{Config, CountryFetcher, FileFetcher, HttpFetcher, SqliteStore, Synchronizer};
use clap::Parser;
use futures::StreamExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::CliArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atlas_sync=info,atlas=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let args = CliArgs::parse();
    let mut config = Config::from_env()?;
    if let Some(database) = &args.database {
        config.database_url = database.clone();
    }

    tracing::info!("Opening cache at {}", config.database_url);
    let store = SqliteStore::connect(&config.database_url).await?;

    let fetcher: Arc<dyn CountryFetcher> = match &args.payload {
        Some(path) => {
            tracing::info!("Reading countries from {}", path.display());
            Arc::new(FileFetcher::new(path))
        }
        None => {
            tracing::info!("Fetching countries from {}", config.api_url);
            Arc::new(HttpFetcher::from_config(&config)?)
        }
    };

    let sync = Synchronizer::new(Arc::new(store), fetcher);

    let mut state = BrowseState::new();
    state.set_query(args.query.clone());
    state.set_sort(args.sort.into());
    if let Some(continent) = args.continent {
        state.set_continent(continent);
    }
    state.set_language(args.language_filter());

    if !args.no_sync {
        let mut phases = Box::pin(sync.synchronize());
        while let Some(phase) = phases.next().await {
            log_phase(&phase);
            state.apply_countries_phase(phase);
        }
        print_messages(&mut state);
    }

    if let Some(id) = args.show {
        let mut phases = Box::pin(sync.get_by_id(id));
        while let Some(phase) = phases.next().await {
            match phase {
                Phase::Data(country) => print_country_details(&country),
                Phase::Report(report) => print_report(&report),
                Phase::Loading(_) => {}
            }
        }
        return Ok(());
    }

    if args.languages {
        let mut phases = Box::pin(sync.language_options());
        while let Some(phase) = phases.next().await {
            state.apply_languages_phase(phase);
        }
        print_messages(&mut state);
        for language in &state.languages {
            println!("{}", language.name);
        }
        return Ok(());
    }

    if args.no_sync {
        let mut phases = Box::pin(sync.cached());
        while let Some(phase) = phases.next().await {
            state.apply_countries_phase(phase);
        }
        print_messages(&mut state);
    }

    for country in &state.filtered {
        print_country_line(country);
    }
    tracing::info!(
        "{} of {} countries match",
        state.filtered.len(),
        state.countries.len()
    );

    Ok(())
}

fn log_phase(phase: &Phase<Vec<Country>>) {
    match phase {
        Phase::Loading(progress) => tracing::debug!("Synchronizer is {:?}", progress),
        Phase::Data(countries) => tracing::info!("Received {} countries", countries.len()),
        Phase::Report(report) => tracing::warn!("{}: {}", report.title, report.description),
    }
}

fn print_messages(state: &mut BrowseState) {
    while let Some(report) = state.pop_message() {
        print_report(&report);
    }
}

fn print_report(report: &Report) {
    eprintln!("{}: {}", report.title, report.description);
}

fn print_country_line(country: &Country) {
    println!(
        "{:>20}  {}  [{}]",
        country.id,
        country.name,
        country.continents.join(", ")
    );
}

fn print_country_details(country: &Country) {
    println!("{}", country.name);
    println!("  id:           {}", country.id);
    println!("  continents:   {}", country.continents.join(", "));
    println!("  languages:    {}", country.languages.join(", "));
    println!("  population:   {}", country.population);
    println!("  area:         {} km²", country.area);
    println!("  UN member:    {}", country.un_member);
    println!("  status:       {}", country.status);
    println!("  flag:         {}", country.flag);
    if let Some(coat_of_arms) = &country.coat_of_arms {
        println!("  coat of arms: {}", coat_of_arms);
    }
}
