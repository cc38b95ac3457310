// Copyright 2025 Cowboy AI, LLC.

//! Property tests for the lot-wide invariants

use parking_domain::{FloorNumber, ParkingLot, TicketStatus, VehicleCategory};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Park(u8, VehicleCategory),
    Exit(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..6, category_strategy()).prop_map(|(p, c)| Op::Park(p, c)),
        (0u8..6).prop_map(Op::Exit),
    ]
}

fn category_strategy() -> impl Strategy<Value = VehicleCategory> {
    prop_oneof![
        Just(VehicleCategory::Motorcycle),
        Just(VehicleCategory::Car),
        Just(VehicleCategory::Bus),
    ]
}

proptest! {
    /// available + occupied == effective at every step, and no plate ever
    /// holds two active tickets
    #[test]
    fn capacity_and_single_ticket_invariants_hold(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let lot = ParkingLot::new();
        lot.add_floor(FloorNumber(1), 1, 2, 1).unwrap();
        lot.add_floor(FloorNumber(2), 1, 1, 1).unwrap();

        let mut receipts = Vec::new();
        for op in ops {
            match op {
                Op::Park(p, category) => {
                    if let Ok(receipt) = lot.park(&format!("PLATE{p}"), category, None) {
                        receipts.push(receipt);
                    }
                }
                Op::Exit(p) => {
                    let _ = lot.exit(&format!("PLATE{p}"));
                }
            }

            let status = lot.status().unwrap();
            prop_assert_eq!(status.total_spots, 7);
            prop_assert_eq!(status.occupied_spots, status.active_tickets);
            prop_assert_eq!(
                status.available_spots + status.occupied_spots,
                status.effective_spots
            );
        }

        // At most one active ticket per plate, across the whole history
        for p in 0u8..6 {
            let plate = format!("PLATE{p}");
            let active = receipts
                .iter()
                .filter(|r| {
                    lot.ticket(&r.ticket_number)
                        .unwrap()
                        .is_some_and(|t| t.status == TicketStatus::Active && t.plate.as_str() == plate)
                })
                .count();
            prop_assert!(active <= 1);
        }
    }

    /// Allocation never selects a spot on a maintenance floor
    #[test]
    fn maintenance_exclusion_holds(parks in prop::collection::vec(category_strategy(), 1..12)) {
        let lot = ParkingLot::new();
        lot.add_floor(FloorNumber(1), 2, 2, 2).unwrap();
        lot.add_floor(FloorNumber(2), 2, 2, 2).unwrap();
        lot.set_floor_maintenance(FloorNumber(1), true, Some("closed".into())).unwrap();

        for (i, category) in parks.into_iter().enumerate() {
            if let Ok(receipt) = lot.park(&format!("P{i}"), category, None) {
                prop_assert!(receipt.spot_code.as_str().starts_with("2-"));
            }
        }
    }
}
