//! Remote payload decoding.
//!
//! The remote source returns a JSON array of country objects. Only the fields
//! below are read; anything else in the payload is ignored so that new fields
//! on the server never break decoding.

use crate::{error::Result, AssignedStatus, Country};
use serde::Deserialize;
use std::collections::BTreeMap;

/// One country as sent by the remote source.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryDto {
    pub name: NameDto,
    pub continents: Vec<String>,
    /// Language code to display name
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
    pub flags: FlagDto,
    #[serde(default)]
    pub coat_of_arms: CoatOfArmsDto,
    pub area: f64,
    pub population: u64,
    pub un_member: bool,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NameDto {
    #[serde(default)]
    pub common: Option<String>,
    pub official: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlagDto {
    pub png: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoatOfArmsDto {
    #[serde(default)]
    pub png: Option<String>,
}

impl CountryDto {
    /// Map the wire shape onto the domain record.
    ///
    /// Language codes are dropped; only display names are kept.
    pub fn into_country(self) -> Country {
        let mut country = Country::new(self.name.official, self.flags.png)
            .with_continents(self.continents)
            .with_languages(self.languages.into_values())
            .with_area(self.area)
            .with_population(self.population)
            .with_un_member(self.un_member)
            .with_status(AssignedStatus::from_wire(&self.status));
        if let Some(png) = self.coat_of_arms.png {
            country = country.with_coat_of_arms(png);
        }
        country
    }
}

/// Decode a full payload into countries.
pub fn decode_countries(bytes: &[u8]) -> Result<Vec<Country>> {
    let dtos: Vec<CountryDto> = serde_json::from_slice(bytes)?;
    Ok(dtos.into_iter().map(CountryDto::into_country).collect())
}

/// Decode a payload held as a string.
pub fn decode_countries_str(payload: &str) -> Result<Vec<Country>> {
    decode_countries(payload.as_bytes())
}
