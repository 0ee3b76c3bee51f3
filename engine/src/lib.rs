//! # Atlas Engine
//!
//! The pure core of a local-first country reference-data browser.
//!
//! This crate holds everything that does not touch a network or a disk: the
//! country model, decoding of the remote payload, the filter/sort pipeline,
//! the language aggregator and the phase types that IO layers emit while they
//! work.
//!
//! ## Design Principles
//!
//! - **No IO**: Engine has no knowledge of files, network, or platform
//! - **Deterministic**: Same inputs always produce same outputs
//! - **Testable**: Pure logic, no mocks needed
//! - **Portable**: Runs anywhere Rust runs (native, WASM, mobile via FFI)
//!
//! ## Core Concepts
//!
//! ### Countries
//!
//! A [`Country`] is keyed by an id derived from its official name with
//! [`country_id`]. Equal names always produce equal ids.
//!
//! ### Filtering
//!
//! [`apply_filters`] narrows and orders a borrowed slice of countries:
//! - name query (case-insensitive)
//! - [`CountrySort`] by name, ascending or descending
//! - [`ContinentFilter`]
//! - [`LanguageFilter`]
//!
//! ### Phases
//!
//! Long-running operations report progress as a sequence of [`Phase`]
//! values: loading, data, [`Report`]s, and finally idle.
//!
//! ## Quick Start
//!
//! ```rust
//! use atlas_engine::{
//!     apply_filters, decode_countries_str, distinct_languages,
//!     ContinentFilter, CountrySort, LanguageFilter, SortOrder,
//! };
//!
//! // 1. Decode a payload from the remote source
//! let countries = decode_countries_str(r#"[{
//!     "name": {"official": "Portuguese Republic"},
//!     "continents": ["Europe"],
//!     "languages": {"por": "Portuguese"},
//!     "flags": {"png": "https://flagcdn.com/w320/pt.png"},
//!     "area": 92090.0,
//!     "population": 10305564,
//!     "unMember": true,
//!     "status": "officially-assigned"
//! }]"#).unwrap();
//!
//! // 2. Filter and sort
//! let european = apply_filters(
//!     &countries,
//!     "portug",
//!     CountrySort::ByName(SortOrder::Ascending),
//!     ContinentFilter::Europe,
//!     &LanguageFilter::None,
//! );
//! assert_eq!(european.len(), 1);
//!
//! // 3. Offer language choices
//! let languages = distinct_languages(&countries).unwrap();
//! assert_eq!(languages[0].name, "Portuguese");
//! ```
//!
//! ## FFI
//!
//! The [`ffi`] module provides C-compatible functions for use from other
//! languages. All data is exchanged as JSON strings.

pub mod browse;
pub mod country;
pub mod error;
pub mod ffi;
pub mod filter;
pub mod languages;
pub mod payload;
pub mod phase;
pub mod snapshot;

// Re-export main types at crate root
pub use browse::BrowseState;
pub use country::{country_id, AssignedStatus, Country};
pub use error::Error;
pub use filter::{
    apply_filters, ContinentFilter, CountrySort, FilterState, LanguageFilter, SortOrder,
};
pub use languages::{distinct_languages, LanguageOption};
pub use payload::{decode_countries, decode_countries_str, CountryDto};
pub use phase::{Phase, Progress, Report, ERROR_TITLE, NETWORK_ERROR_TITLE};
pub use snapshot::{CountrySnapshot, SNAPSHOT_FORMAT_VERSION};

/// Key of a cached country.
pub type CountryId = i64;
