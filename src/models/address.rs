//! Addresses and coordinates used by route planning.

use serde::{Deserialize, Serialize};

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    /// First street line.
    #[serde(default)]
    pub street_address_1: String,
    /// Second street line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_address_2: Option<String>,
    /// City.
    #[serde(default)]
    pub city: String,
    /// Two-letter state code.
    #[serde(default)]
    pub state: String,
    /// ZIP or ZIP+4 code.
    #[serde(default)]
    pub postal_code: String,
}

impl Address {
    /// Returns `true` for the zero-value address.
    pub fn is_empty(&self) -> bool {
        *self == Address::default()
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.street_address_1)?;
        if let Some(line_2) = &self.street_address_2 {
            write!(f, " {}", line_2)?;
        }
        write!(f, ", {}, {} {}", self.city, self.state, self.postal_code)
    }
}

/// A geocoded position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLong {
    /// Latitude in degrees.
    pub latitude: f32,
    /// Longitude in degrees.
    pub longitude: f32,
}

impl std::fmt::Display for LatLong {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

/// Which end of a route an address is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressRole {
    /// Where the move starts.
    Source,
    /// Where the move ends.
    Destination,
}

impl std::fmt::Display for AddressRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressRole::Source => write!(f, "source"),
            AddressRole::Destination => write!(f, "destination"),
        }
    }
}
