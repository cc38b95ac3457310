// Copyright 2025 Cowboy AI, LLC.

//! # Parking Domain
//!
//! Core domain model for a multi-floor parking lot: spot allocation,
//! ticket lifecycle, fee computation, and floor maintenance gating.
//!
//! The crate provides the building blocks and their composition:
//! - **Spot Registry**: catalog of spots with deterministic candidate
//!   ordering and exclusive ownership of occupancy
//! - **Floor Registry**: floor existence and maintenance state, one record
//!   per floor as the single source of truth
//! - **Allocation Engine**: first-fit, category-fallback spot selection;
//!   find and mark are one critical section
//! - **Ticket Ledger**: ticket lifecycle (`Active` → `Paid`) with at most
//!   one active ticket per vehicle, enforced under one lock
//! - **Fee Calculator**: pure hours-ceiling fee rule with a flat minimum
//! - **Parking Orchestrator**: [`ParkingLot`], the facade composing the
//!   above into park, exit, status, and floor management
//!
//! ## Design Principles
//!
//! 1. **Typed identity**: floors, spots, vehicles, and tickets are keyed
//!    by domain-meaningful newtypes, never raw strings
//! 2. **Single writers**: each piece of mutable state has exactly one
//!    owning component
//! 3. **Fail fast**: operations complete synchronously; a full lot is a
//!    [`DomainError::NoCapacity`] result, not a queue
//! 4. **Business vs internal failures**: expected conditions are ordinary
//!    results; internal faults are a separate error category
//!
//! ## Example
//!
//! ```rust
//! use parking_domain::{ParkingLot, FloorNumber, VehicleCategory};
//!
//! let lot = ParkingLot::new();
//! lot.add_floor(FloorNumber(1), 2, 2, 1).unwrap();
//!
//! let receipt = lot.park("KA01AB1234", VehicleCategory::Car, None).unwrap();
//! assert_eq!(receipt.spot_code.as_str(), "1-C-01");
//!
//! let exit = lot.exit("ka01ab1234").unwrap(); // plates are case-normalized
//! assert_eq!(exit.ticket_number, receipt.ticket_number);
//! ```

#![warn(missing_docs)]

mod allocation;
mod catalog;
mod errors;
mod fees;
mod floor;
mod identifiers;
mod ledger;
mod lot;
mod registry;
mod responses;
mod seed;
mod spot;
mod ticket;
mod vehicle;

pub mod persistence;

// Re-export core types
pub use allocation::AllocationEngine;
pub use catalog::LotCatalog;
pub use errors::{DomainError, DomainResult, ErrorKind};
pub use fees::{
    compute_fee, hourly_rate, FeeBreakdown, Money, MINIMUM_FEE, MINIMUM_FEE_WINDOW_MINUTES,
};
pub use floor::{Floor, FloorRegistry};
pub use identifiers::{FloorNumber, LicensePlate, SpotCode, TicketNumber};
pub use ledger::{LedgerState, TicketLedger};
pub use lot::ParkingLot;
pub use registry::SpotRegistry;
pub use responses::{CategoryAvailability, ExitReceipt, FloorStatus, LotStatus, ParkReceipt};
pub use seed::{seed_default_layout, DEFAULT_LAYOUT};
pub use spot::{Spot, SpotCategory};
pub use ticket::{Ticket, TicketStatus};
pub use vehicle::{Vehicle, VehicleCategory};
