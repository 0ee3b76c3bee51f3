//! Filtering and ordering of cached countries.
//!
//! [`apply_filters`] is a pure pipeline. Stages run in a fixed order:
//!
//! 1. name filter (case-insensitive containment, empty query keeps everything)
//! 2. sort by name (stable, so ties keep their input order)
//! 3. continent filter
//! 4. language filter
//!
//! The input slice is only borrowed; every call returns a fresh `Vec`.

use crate::Country;
use serde::{Deserialize, Serialize};

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// How the country list is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "order", rename_all = "camelCase")]
pub enum CountrySort {
    /// Keep the input order
    None,
    /// Order by official name
    ByName(SortOrder),
}

impl Default for CountrySort {
    fn default() -> Self {
        CountrySort::ByName(SortOrder::Descending)
    }
}

/// Continent selection. `None` lets every country through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContinentFilter {
    #[default]
    None,
    Europe,
    NorthAmerica,
    SouthAmerica,
    Asia,
    Africa,
    Oceania,
}

impl ContinentFilter {
    /// Every selectable continent, in menu order.
    pub const ALL: [ContinentFilter; 6] = [
        ContinentFilter::Europe,
        ContinentFilter::NorthAmerica,
        ContinentFilter::SouthAmerica,
        ContinentFilter::Asia,
        ContinentFilter::Africa,
        ContinentFilter::Oceania,
    ];

    /// Name as it appears in country data and menus.
    pub fn display_name(&self) -> &'static str {
        match self {
            ContinentFilter::None => "None",
            ContinentFilter::Europe => "Europe",
            ContinentFilter::NorthAmerica => "North America",
            ContinentFilter::SouthAmerica => "South America",
            ContinentFilter::Asia => "Asia",
            ContinentFilter::Africa => "Africa",
            ContinentFilter::Oceania => "Oceania",
        }
    }

    pub fn shorthand(&self) -> &'static str {
        match self {
            ContinentFilter::None => "n/a",
            ContinentFilter::Europe => "eu",
            ContinentFilter::NorthAmerica => "nam",
            ContinentFilter::SouthAmerica => "sam",
            ContinentFilter::Asia => "asi",
            ContinentFilter::Africa => "afr",
            ContinentFilter::Oceania => "oce",
        }
    }

    /// Look up a continent by display name or shorthand, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        std::iter::once(ContinentFilter::None)
            .chain(Self::ALL)
            .find(|c| c.display_name().to_lowercase() == value || c.shorthand() == value)
    }
}

/// Language selection. `None` lets every country through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "camelCase")]
pub enum LanguageFilter {
    #[default]
    None,
    Language(String),
}

impl LanguageFilter {
    pub fn language(name: impl Into<String>) -> Self {
        LanguageFilter::Language(name.into())
    }

    pub fn display_name(&self) -> &str {
        match self {
            LanguageFilter::None => "None",
            LanguageFilter::Language(name) => name,
        }
    }
}

/// Filter selections held by the caller between calls.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub query: String,
    pub sort: CountrySort,
    pub continent: ContinentFilter,
    pub language: LanguageFilter,
}

impl FilterState {
    /// Run [`apply_filters`] with these selections.
    pub fn apply(&self, countries: &[Country]) -> Vec<Country> {
        apply_filters(
            countries,
            &self.query,
            self.sort,
            self.continent,
            &self.language,
        )
    }
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Filter and order `countries`.
pub fn apply_filters(
    countries: &[Country],
    query: &str,
    sort: CountrySort,
    continent: ContinentFilter,
    language: &LanguageFilter,
) -> Vec<Country> {
    let query = query.to_lowercase();
    let mut filtered: Vec<Country> = countries
        .iter()
        .filter(|c| contains_ignore_case(&c.name, &query))
        .cloned()
        .collect();

    match sort {
        CountrySort::None => {}
        CountrySort::ByName(SortOrder::Ascending) => {
            filtered.sort_by(|a, b| a.name.cmp(&b.name));
        }
        CountrySort::ByName(SortOrder::Descending) => {
            filtered.sort_by(|a, b| b.name.cmp(&a.name));
        }
    }

    match continent {
        ContinentFilter::None => {}
        selected => {
            let wanted = selected.display_name().to_lowercase();
            filtered.retain(|c| c.continents.iter().any(|n| contains_ignore_case(n, &wanted)));
        }
    }

    match language {
        LanguageFilter::None => {}
        LanguageFilter::Language(name) => {
            let wanted = name.to_lowercase();
            filtered.retain(|c| c.languages.iter().any(|l| contains_ignore_case(l, &wanted)));
        }
    }

    filtered
}
