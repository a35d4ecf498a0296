use crate::error::{Result, StorefrontError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A latitude/longitude pair, written as `"lat,lng"` in order records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Where the map opens when the customer's position is unknown.
    pub const DEFAULT_CENTER: Coordinates = Coordinates {
        lat: 4.9214,
        lng: -75.0626,
    };

    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(StorefrontError::Validation(format!(
                "Coordinates out of range: {lat},{lng}"
            )));
        }
        Ok(Self { lat, lng })
    }
}

impl FromStr for Coordinates {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || StorefrontError::Validation(format!("Invalid coordinates: {s:?}"));
        let (lat, lng) = s.split_once(',').ok_or_else(invalid)?;
        let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;
        Self::new(lat, lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}
