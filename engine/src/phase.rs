//! Phases emitted by long-running operations.
//!
//! A caller consumes an ordered sequence of [`Phase`] values: a busy marker,
//! zero or more data/report results, and a final idle marker.

use serde::{Deserialize, Serialize};

/// Title used for reports caused by the remote source.
pub const NETWORK_ERROR_TITLE: &str = "Network Data Error";
/// Title used for every other report.
pub const ERROR_TITLE: &str = "Error";
/// Description used when an error carries no message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Busy indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Progress {
    Loading,
    Idle,
}

/// A user-facing, dismissible notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub title: String,
    pub description: String,
}

impl Report {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        let description = description.into();
        Self {
            title: title.into(),
            description: if description.is_empty() {
                UNKNOWN_ERROR.to_string()
            } else {
                description
            },
        }
    }

    /// Report for a failed fetch or undecodable payload.
    pub fn network(description: impl Into<String>) -> Self {
        Self::new(NETWORK_ERROR_TITLE, description)
    }

    /// Report for any other failure.
    pub fn error(description: impl Into<String>) -> Self {
        Self::new(ERROR_TITLE, description)
    }

    pub fn is_network(&self) -> bool {
        self.title == NETWORK_ERROR_TITLE
    }
}

/// One step of a phase stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Phase<T> {
    Loading(Progress),
    Data(T),
    Report(Report),
}

impl<T> Phase<T> {
    pub fn loading() -> Self {
        Phase::Loading(Progress::Loading)
    }

    pub fn idle() -> Self {
        Phase::Loading(Progress::Idle)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Phase::Loading(Progress::Idle))
    }

    /// Borrow the data payload, if this is a data phase.
    pub fn data(&self) -> Option<&T> {
        match self {
            Phase::Data(value) => Some(value),
            Phase::Loading(_) | Phase::Report(_) => None,
        }
    }

    pub fn report(&self) -> Option<&Report> {
        match self {
            Phase::Report(report) => Some(report),
            Phase::Loading(_) | Phase::Data(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Phase<U> {
        match self {
            Phase::Loading(progress) => Phase::Loading(progress),
            Phase::Data(value) => Phase::Data(f(value)),
            Phase::Report(report) => Phase::Report(report),
        }
    }
}
