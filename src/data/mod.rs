use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque alert identifier.
///
/// The feed serves ids as either JSON strings or integers; both are
/// normalized to the string form here and never interpreted further. The
/// string form is also what the seen-set file persists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AlertId(String);

impl AlertId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AlertId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Str(String),
            Int(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Str(s) => AlertId(s),
            Raw::Int(n) => AlertId(n.to_string()),
        })
    }
}

/// One upcoming satellite-contact opportunity, as served by the feed.
///
/// Alerts are immutable snapshots; a fresh set is fetched every run and
/// nothing here is ever mutated or persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    #[serde(default = "unknown_callsign")]
    pub callsign: String,
    #[serde(default)]
    pub satellite: Option<Satellite>,
    #[serde(default)]
    pub grids: Vec<String>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub mhz: Option<f64>,
    /// Acquisition-of-signal time as an ISO-8601 instant string.
    #[serde(default)]
    pub aos_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Satellite {
    pub name: String,
}

fn unknown_callsign() -> String {
    "Unknown".to_string()
}
