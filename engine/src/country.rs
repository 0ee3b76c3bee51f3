//! Country records and their derived keys.

use crate::CountryId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO assignment status of a country code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssignedStatus {
    /// `officially-assigned`
    OfficiallyAssigned,
    /// `user-assigned`
    UserAssigned,
    /// Anything the source does not recognise
    #[default]
    #[serde(other)]
    Unknown,
}

impl AssignedStatus {
    /// Wire/storage form of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignedStatus::OfficiallyAssigned => "officially-assigned",
            AssignedStatus::UserAssigned => "user-assigned",
            AssignedStatus::Unknown => "unknown",
        }
    }

    /// Parse a status string. Unrecognised values map to [`AssignedStatus::Unknown`].
    pub fn from_wire(value: &str) -> Self {
        match value {
            "officially-assigned" => AssignedStatus::OfficiallyAssigned,
            "user-assigned" => AssignedStatus::UserAssigned,
            _ => AssignedStatus::Unknown,
        }
    }
}

impl fmt::Display for AssignedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the stable key of a country from its official name.
///
/// The key is the first eight bytes of the BLAKE3 digest of the name,
/// read little endian. Two different names may collide; that risk is
/// accepted and not resolved here.
pub fn country_id(official_name: &str) -> CountryId {
    let digest = blake3::hash(official_name.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest.as_bytes()[..8]);
    CountryId::from_le_bytes(bytes)
}

/// A country as cached locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// Key derived from the official name
    pub id: CountryId,
    /// Official name
    pub name: String,
    /// Continents, in source order
    pub continents: Vec<String>,
    /// Language display names, in source order
    pub languages: Vec<String>,
    /// Flag image URI
    pub flag: String,
    /// Coat-of-arms image URI
    pub coat_of_arms: Option<String>,
    /// Area in square kilometers
    pub area: f64,
    pub population: u64,
    pub un_member: bool,
    pub status: AssignedStatus,
}

impl Country {
    /// Create a country with its id derived from `name`.
    ///
    /// Optional fields start empty; use the `with_*` builders to fill them.
    pub fn new(name: impl Into<String>, flag: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: country_id(&name),
            name,
            continents: Vec::new(),
            languages: Vec::new(),
            flag: flag.into(),
            coat_of_arms: None,
            area: 0.0,
            population: 0,
            un_member: false,
            status: AssignedStatus::Unknown,
        }
    }

    pub fn with_continents<I, S>(mut self, continents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.continents = continents.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_coat_of_arms(mut self, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        self.coat_of_arms = if uri.is_empty() { None } else { Some(uri) };
        self
    }

    pub fn with_area(mut self, area: f64) -> Self {
        self.area = area;
        self
    }

    pub fn with_population(mut self, population: u64) -> Self {
        self.population = population;
        self
    }

    pub fn with_un_member(mut self, un_member: bool) -> Self {
        self.un_member = un_member;
        self
    }

    pub fn with_status(mut self, status: AssignedStatus) -> Self {
        self.status = status;
        self
    }

    /// Override the derived id. Test fixtures use this to force collisions.
    pub fn with_id(mut self, id: CountryId) -> Self {
        self.id = id;
        self
    }

    /// Whether any continent equals `continent` exactly.
    pub fn has_continent(&self, continent: &str) -> bool {
        self.continents.iter().any(|c| c == continent)
    }

    /// Whether any language equals `language` exactly.
    pub fn has_language(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }
}
