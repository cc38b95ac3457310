// Copyright 2025 Cowboy AI, LLC.

//! Vehicle identity and categories

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::identifiers::LicensePlate;
use crate::spot::SpotCategory;

/// Size class of a vehicle, determining which spot categories it may occupy
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum VehicleCategory {
    /// Two-wheeler
    Motorcycle,
    /// Standard passenger car
    Car,
    /// Bus or other oversized vehicle
    Bus,
}

impl VehicleCategory {
    /// Spot categories this vehicle may occupy, in search order
    /// (best fit first, largest fit last)
    pub fn eligible_spot_categories(&self) -> &'static [SpotCategory] {
        match self {
            VehicleCategory::Motorcycle => &[
                SpotCategory::Motorcycle,
                SpotCategory::Compact,
                SpotCategory::Large,
            ],
            VehicleCategory::Car => &[SpotCategory::Compact, SpotCategory::Large],
            VehicleCategory::Bus => &[SpotCategory::Large],
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VehicleCategory::Motorcycle => write!(f, "MOTORCYCLE"),
            VehicleCategory::Car => write!(f, "CAR"),
            VehicleCategory::Bus => write!(f, "BUS"),
        }
    }
}

/// A vehicle known to the lot
///
/// Created on first entry and retained across visits; historical identity
/// persists even after the vehicle exits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Vehicle {
    /// Normalized license plate, the vehicle's identity
    pub plate: LicensePlate,
    /// Size class
    pub category: VehicleCategory,
    /// Owner name, if provided at entry
    pub owner_name: Option<String>,
    /// When this vehicle was first seen
    pub registered_at: DateTime<Utc>,
}

impl Vehicle {
    /// Register a vehicle seen for the first time
    pub fn new(
        plate: LicensePlate,
        category: VehicleCategory,
        owner_name: Option<String>,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            plate,
            category,
            owner_name,
            registered_at,
        }
    }
}
