use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Coordinate;

/// Reporters keyed by document identifier
pub type ReporterMap = BTreeMap<String, Reporter>;

/// A person who submits incident reports.
///
/// Identity is the `document` field. Reporters are never updated once
/// registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Reporter {
    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "documento")]
    pub document: String,

    pub email: String,

    #[serde(rename = "telefone")]
    pub phone: String,

    #[serde(rename = "localizacao")]
    pub location: Coordinate,
}

impl Reporter {
    pub fn new(
        name: impl Into<String>,
        document: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        location: Coordinate,
    ) -> Self {
        Self {
            name: name.into(),
            document: document.into(),
            email: email.into(),
            phone: phone.into(),
            location,
        }
    }

    /// Copy of the reporter fields, as embedded in a report
    pub fn snapshot(&self) -> ReporterSnapshot {
        ReporterSnapshot::from(self)
    }
}

/// Reporter fields copied into a report at registration time.
///
/// Has the same wire shape as a [`Reporter`] record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReporterSnapshot {
    #[serde(rename = "nome")]
    pub name: String,

    #[serde(rename = "documento")]
    pub document: String,

    pub email: String,

    #[serde(rename = "telefone")]
    pub phone: String,

    #[serde(rename = "localizacao")]
    pub location: Coordinate,
}

impl From<&Reporter> for ReporterSnapshot {
    fn from(reporter: &Reporter) -> Self {
        Self {
            name: reporter.name.clone(),
            document: reporter.document.clone(),
            email: reporter.email.clone(),
            phone: reporter.phone.clone(),
            location: reporter.location,
        }
    }
}
