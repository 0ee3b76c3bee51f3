//! Browse state for a country list screen.
//!
//! [`BrowseState`] is what a presentation layer keeps between events. Phase
//! results and filter changes are folded into it; after every change the
//! visible list is recomputed from the full list with
//! [`apply_filters`](crate::apply_filters).

use crate::{
    distinct_languages, ContinentFilter, Country, CountrySort, FilterState, LanguageFilter,
    LanguageOption, Phase, Progress, Report,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseState {
    /// Everything the last data phase delivered
    pub countries: Vec<Country>,
    /// `countries` after the current filters
    pub filtered: Vec<Country>,
    pub filters: FilterState,
    /// Languages that can be selected as a filter
    pub languages: Vec<LanguageOption>,
    pub progress: Progress,
    /// Reports waiting to be shown, oldest first
    pub messages: VecDeque<Report>,
}

impl Default for BrowseState {
    fn default() -> Self {
        Self {
            countries: Vec::new(),
            filtered: Vec::new(),
            filters: FilterState::default(),
            languages: Vec::new(),
            progress: Progress::Idle,
            messages: VecDeque::new(),
        }
    }
}

impl BrowseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.progress == Progress::Loading
    }

    /// Fold one phase of a country list stream into the state.
    pub fn apply_countries_phase(&mut self, phase: Phase<Vec<Country>>) {
        match phase {
            Phase::Loading(progress) => self.progress = progress,
            Phase::Data(countries) => {
                self.countries = countries;
                // An empty list simply has no languages to offer.
                self.languages = distinct_languages(&self.countries).unwrap_or_default();
                self.refilter();
            }
            Phase::Report(report) => self.messages.push_back(report),
        }
    }

    /// Fold one phase of a language options stream into the state.
    pub fn apply_languages_phase(&mut self, phase: Phase<Vec<LanguageOption>>) {
        match phase {
            Phase::Loading(progress) => self.progress = progress,
            Phase::Data(languages) => {
                self.languages = languages;
                self.refilter();
            }
            Phase::Report(report) => self.messages.push_back(report),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filters.query = query.into();
        self.refilter();
    }

    pub fn set_sort(&mut self, sort: CountrySort) {
        self.filters.sort = sort;
        self.refilter();
    }

    pub fn set_continent(&mut self, continent: ContinentFilter) {
        self.filters.continent = continent;
        self.refilter();
    }

    pub fn set_language(&mut self, language: LanguageFilter) {
        self.filters.language = language;
        self.refilter();
    }

    /// Dismiss the oldest report.
    pub fn pop_message(&mut self) -> Option<Report> {
        self.messages.pop_front()
    }

    /// The report currently on screen.
    pub fn current_message(&self) -> Option<&Report> {
        self.messages.front()
    }

    fn refilter(&mut self) {
        self.filtered = self.filters.apply(&self.countries);
    }
}
