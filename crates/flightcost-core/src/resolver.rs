// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::config::ValidationMode;
use crate::flight::BookingRequest;
use crate::reference::{AircraftRecord, AircraftTable, AirportTable, HomeBase};
use crate::{ReferenceData, Violation};
use serde::Serialize;

/// Route distance, running cost and capacities for one booking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSpecification {
    pub distance: f64,
    pub running_cost_per_seat: f64,
    pub max_range: f64,
    pub total_capacity: u64,
    pub economy_capacity: u32,
    pub business_capacity: u32,
    pub first_class_capacity: u32,
}

impl ResolvedSpecification {
    pub fn new(distance: f64, aircraft: &AircraftRecord) -> Self {
        Self {
            distance,
            running_cost_per_seat: aircraft.cost_per_seat_per_hundred,
            max_range: aircraft.max_range,
            total_capacity: aircraft.total_capacity(),
            economy_capacity: aircraft.economy_capacity,
            business_capacity: aircraft.business_capacity,
            first_class_capacity: aircraft.first_class_capacity,
        }
    }
}

pub fn resolve_distance(
    home_base: HomeBase,
    overseas_code: &str,
    airports: &AirportTable,
) -> Result<f64, Violation> {
    airports
        .get(overseas_code)
        .map(|airport| airport.distance_from(home_base))
        .ok_or_else(|| Violation::UnknownAirport {
            code: overseas_code.trim().to_string(),
        })
}

pub fn resolve_aircraft<'a>(
    aircraft_type: &str,
    aircraft: &'a AircraftTable,
) -> Result<&'a AircraftRecord, Violation> {
    aircraft
        .get(aircraft_type)
        .ok_or_else(|| Violation::UnknownAircraft {
            aircraft_type: aircraft_type.trim().to_string(),
        })
}

/// Runs the airport and aircraft lookups. The airport is always checked first;
/// in `CollectAll` mode an unknown airport does not stop the aircraft lookup.
pub fn resolve(
    request: &BookingRequest,
    data: &ReferenceData,
    mode: ValidationMode,
) -> Result<ResolvedSpecification, Vec<Violation>> {
    let distance = resolve_distance(
        request.home_base(),
        request.overseas_airport_code(),
        &data.airports,
    );

    if mode == ValidationMode::FirstFailure {
        if let Err(v) = &distance {
            return Err(vec![v.clone()]);
        }
    }

    let aircraft = resolve_aircraft(request.aircraft_type(), &data.aircraft);

    match (distance, aircraft) {
        (Ok(distance), Ok(aircraft)) => Ok(ResolvedSpecification::new(distance, aircraft)),
        (distance, aircraft) => {
            let violations: Vec<Violation> = distance
                .err()
                .into_iter()
                .chain(aircraft.err())
                .collect();
            log::debug!(
                "Lookup failed — overseas={} aircraft={} failures={}",
                request.overseas_airport_code(),
                request.aircraft_type(),
                violations.len()
            );
            Err(violations)
        }
    }
}
