//! C ABI for embedding the engine in a mobile shell.
//!
//! Every argument and every return value is a JSON string. Returned strings
//! are owned by the engine and must be released with [`atlas_string_free`].
//!
//! Responses are envelopes: `{"ok": <value>}` when the call succeeded and
//! `{"error": "<message>"}` when it did not.

use crate::{
    apply_filters, country_id, decode_countries_str, distinct_languages, Country, FilterState,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::ffi::{c_char, CStr, CString};

/// Wrap `result` in an envelope and hand ownership of the JSON to the caller.
fn respond<T: Serialize>(result: Result<T, String>) -> *mut c_char {
    let value = result.and_then(|value| serde_json::to_value(value).map_err(|e| e.to_string()));
    let envelope = match value {
        Ok(value) => json!({ "ok": value }),
        Err(message) => json!({ "error": message }),
    };

    // serde_json escapes control characters, so the output has no interior NUL.
    CString::new(envelope.to_string())
        .unwrap_or_default()
        .into_raw()
}

/// Borrow a C string argument as UTF-8. `what` names the argument in errors.
unsafe fn read_str<'a>(ptr: *const c_char, what: &str) -> Result<&'a str, String> {
    if ptr.is_null() {
        return Err(format!("invalid {}", what));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| format!("invalid {}", what))
}

/// Parse a JSON argument.
unsafe fn read_json<T: DeserializeOwned>(ptr: *const c_char, what: &str) -> Result<T, String> {
    let raw = read_str(ptr, what)?;
    serde_json::from_str(raw).map_err(|e| format!("parse error: {}", e))
}

/// Free a string returned by any `atlas_*` function.
///
/// # Safety
/// `s` must come from an `atlas_*` function and must not be freed twice.
#[no_mangle]
pub unsafe extern "C" fn atlas_string_free(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Decode a raw remote payload. Responds with the list of countries.
///
/// # Safety
/// `payload` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn atlas_decode_countries(payload: *const c_char) -> *mut c_char {
    respond(
        read_str(payload, "payload")
            .and_then(|payload| decode_countries_str(payload).map_err(|e| e.to_string())),
    )
}

/// Derive the id of an official country name.
///
/// # Safety
/// `name` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn atlas_country_id(name: *const c_char) -> *mut c_char {
    respond(read_str(name, "name").map(country_id))
}

/// Filter and sort a list of countries.
///
/// `filters_json` is a `FilterState`; missing fields take their defaults.
///
/// # Safety
/// Both arguments must be null or valid NUL-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn atlas_apply_filters(
    countries_json: *const c_char,
    filters_json: *const c_char,
) -> *mut c_char {
    let countries: Result<Vec<Country>, String> = read_json(countries_json, "countries JSON");
    let filters: Result<FilterState, String> = read_json(filters_json, "filters JSON");

    respond(countries.and_then(|countries| {
        let filters = filters?;
        Ok(apply_filters(
            &countries,
            &filters.query,
            filters.sort,
            filters.continent,
            &filters.language,
        ))
    }))
}

/// Distinct languages of a list of countries.
///
/// # Safety
/// `countries_json` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn atlas_distinct_languages(countries_json: *const c_char) -> *mut c_char {
    let countries: Result<Vec<Country>, String> = read_json(countries_json, "countries JSON");
    respond(countries.and_then(|countries| {
        distinct_languages(&countries).map_err(|e| e.to_string())
    }))
}
