// Pollutant domain model
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Pollutant {
    Co,
    No2,
    C6h6,
}

impl Pollutant {
    pub const ALL: [Pollutant; 3] = [Pollutant::Co, Pollutant::No2, Pollutant::C6h6];

    pub fn symbol(&self) -> &'static str {
        match self {
            Pollutant::Co => "CO",
            Pollutant::No2 => "NO2",
            Pollutant::C6h6 => "C6H6",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Pollutant::Co => "mg/m³",
            Pollutant::No2 | Pollutant::C6h6 => "µg/m³",
        }
    }

    /// Resolve a reading key. Accepts the plain symbol ("CO") and the
    /// ground-truth column name of the sensor dataset ("CO(GT)").
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        let symbol = key.strip_suffix("(GT)").unwrap_or(key);
        Self::ALL.into_iter().find(|p| p.symbol() == symbol)
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown pollutant: {0}")]
pub struct UnknownPollutant(pub String);

impl FromStr for Pollutant {
    type Err = UnknownPollutant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| UnknownPollutant(s.to_string()))
    }
}
