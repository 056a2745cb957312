//! Beach model: a user-owned surf spot with coordinates and facing

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Result, SurfcastError};

/// Compass direction a beach faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "W")]
    West,
}

impl Position {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::North => "N",
            Position::South => "S",
            Position::East => "E",
            Position::West => "W",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = SurfcastError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "N" => Ok(Position::North),
            "S" => Ok(Position::South),
            "E" => Ok(Position::East),
            "W" => Ok(Position::West),
            other => Err(SurfcastError::validation(format!(
                "position must be one of N, S, E, W (got '{other}')"
            ))),
        }
    }
}

/// A beach registered by a user
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Beach {
    pub name: String,
    pub position: Position,
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
    /// Opaque reference to the owning user
    #[serde(rename = "user", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl Beach {
    /// Create a new beach without an owner
    #[must_use]
    pub fn new(name: impl Into<String>, position: Position, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            position,
            lat,
            lng,
            owner: None,
        }
    }

    /// Attach the owning user
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Format beach as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }

    /// Check the fields a stored beach must satisfy.
    ///
    /// Meant for the layer that accepts beaches from users; the forecast
    /// pipeline does not call it.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SurfcastError::validation("beach name is required"));
        }
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(SurfcastError::validation(format!(
                "lat must be a number between -90 and 90 (got {})",
                self.lat
            )));
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(SurfcastError::validation(format!(
                "lng must be a number between -180 and 180 (got {})",
                self.lng
            )));
        }
        Ok(())
    }
}
