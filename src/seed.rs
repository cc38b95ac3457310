// Copyright 2025 Cowboy AI, LLC.

//! Default lot layout
//!
//! Startup seeding for deployments without provisioning data: a
//! three-floor lot with twenty spots per floor, skewed toward motorcycle
//! spots on the lower floors and large spots on the top one.

use tracing::info;

use crate::errors::DomainResult;
use crate::identifiers::FloorNumber;
use crate::lot::ParkingLot;

/// Spot complement per floor for the default layout:
/// (floor, motorcycle, compact, large)
pub const DEFAULT_LAYOUT: [(u16, u16, u16, u16); 3] =
    [(1, 10, 8, 2), (2, 8, 10, 2), (3, 5, 10, 5)];

/// Provision the default three-floor layout if the catalog is empty.
///
/// Returns `true` when seeding ran, `false` when the lot already had
/// spots and was left untouched.
pub fn seed_default_layout(lot: &ParkingLot) -> DomainResult<bool> {
    if lot.status()?.total_spots > 0 {
        return Ok(false);
    }

    for (floor, motorcycle, compact, large) in DEFAULT_LAYOUT {
        lot.add_floor(FloorNumber(floor), motorcycle, compact, large)?;
    }
    info!("default parking layout seeded");
    Ok(true)
}
