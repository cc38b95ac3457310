// Copyright 2025 Cowboy AI, LLC.

//! Typed identifiers for parking domain entities
//!
//! Every entity is keyed by a domain-meaningful identity rather than a
//! surrogate id: floors by number, spots by their human-readable code,
//! vehicles by normalized license plate, tickets by generated ticket number.
//! The newtypes keep these from being mixed up at the API boundary.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::spot::SpotCategory;

/// Floor number, unique per lot
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct FloorNumber(pub u16);

impl fmt::Display for FloorNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for FloorNumber {
    fn from(n: u16) -> Self {
        FloorNumber(n)
    }
}

/// Unique spot code, derived from floor, spot category, and sequence
/// number, e.g. `"2-C-07"`
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct SpotCode(String);

impl SpotCode {
    /// Compose a spot code from its parts
    pub fn new(floor: FloorNumber, category: SpotCategory, sequence: u16) -> Self {
        SpotCode(format!("{}-{}-{:02}", floor, category.prefix(), sequence))
    }

    /// The code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `"{floor}-{prefix}-"` prefix shared by all spots of one
    /// category on one floor
    pub fn prefix_for(floor: FloorNumber, category: SpotCategory) -> String {
        format!("{}-{}-", floor, category.prefix())
    }
}

impl fmt::Display for SpotCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpotCode {
    fn from(s: &str) -> Self {
        SpotCode(s.to_string())
    }
}

/// Case-normalized vehicle license plate
///
/// Plates are compared and stored uppercase with surrounding whitespace
/// removed, so `" ka01ab1234 "` and `"KA01AB1234"` identify the same
/// vehicle.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct LicensePlate(String);

impl LicensePlate {
    /// Normalize and wrap a raw plate string
    pub fn new(raw: impl AsRef<str>) -> Self {
        LicensePlate(raw.as_ref().trim().to_uppercase())
    }

    /// The normalized plate as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LicensePlate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LicensePlate {
    fn from(s: &str) -> Self {
        LicensePlate::new(s)
    }
}

/// Globally unique ticket number, `PKT-<timestamp>-<random suffix>`
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct TicketNumber(String);

impl TicketNumber {
    /// Generate a ticket number for the given issuance time.
    ///
    /// Combines a second-resolution timestamp with 8 characters of random
    /// entropy; the timestamp keeps numbers roughly sortable, the suffix
    /// makes them unique within a second.
    pub fn generate(at: DateTime<Utc>) -> Self {
        let suffix: String = Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(8)
            .collect::<String>()
            .to_uppercase();
        TicketNumber(format!("PKT-{}-{}", at.format("%Y%m%d%H%M%S"), suffix))
    }

    /// The ticket number as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TicketNumber {
    fn from(s: &str) -> Self {
        TicketNumber(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn spot_codes_are_zero_padded() {
        let code = SpotCode::new(FloorNumber(2), SpotCategory::Compact, 7);
        assert_eq!(code.as_str(), "2-C-07");

        let code = SpotCode::new(FloorNumber(3), SpotCategory::Large, 12);
        assert_eq!(code.as_str(), "3-L-12");
    }

    #[test]
    fn license_plates_normalize_case_and_whitespace() {
        assert_eq!(LicensePlate::new(" ka01ab1234 "), LicensePlate::new("KA01AB1234"));
        assert_eq!(LicensePlate::new("mh12cd99").as_str(), "MH12CD99");
    }

    #[test]
    fn ticket_numbers_embed_the_issuance_timestamp() {
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
        let number = TicketNumber::generate(at);
        assert!(number.as_str().starts_with("PKT-20250314092653-"));
        assert_eq!(number.as_str().len(), "PKT-20250314092653-".len() + 8);
    }

    #[test]
    fn ticket_numbers_are_unique() {
        let at = Utc::now();
        let a = TicketNumber::generate(at);
        let b = TicketNumber::generate(at);
        assert_ne!(a, b);
    }
}
