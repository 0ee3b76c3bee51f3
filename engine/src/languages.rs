//! Language choices derived from the cached countries.

use crate::{error::Result, Country, Error, LanguageFilter};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One selectable language.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageOption {
    pub name: String,
}

impl LanguageOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The filter that selects this language.
    pub fn to_filter(&self) -> LanguageFilter {
        LanguageFilter::Language(self.name.clone())
    }
}

/// Distinct, non-blank languages across `countries`, sorted ascending.
///
/// Deduplication is by exact value and ordering is plain string ordering,
/// so `"Zulu"` sorts before `"afrikaans"`.
pub fn distinct_languages(countries: &[Country]) -> Result<Vec<LanguageOption>> {
    if countries.is_empty() {
        return Err(Error::EmptyCache);
    }

    let names: BTreeSet<&str> = countries
        .iter()
        .flat_map(|c| c.languages.iter())
        .map(String::as_str)
        .filter(|l| !l.trim().is_empty())
        .collect();

    Ok(names.into_iter().map(LanguageOption::new).collect())
}
