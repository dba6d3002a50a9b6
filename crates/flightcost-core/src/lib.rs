// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

pub mod config;
pub mod flight;
pub mod loader;
pub mod reference;
pub mod resolver;
pub mod validator;
pub mod valuation;

use serde::Serialize;
use std::fmt;
use thiserror::Error;

pub use config::{EvaluationConfig, ValidationMode};
pub use flight::{BookingRequest, Flight};
pub use reference::{AircraftRecord, AircraftTable, AirportRecord, AirportTable, HomeBase};
pub use resolver::ResolvedSpecification;
pub use valuation::FlightResult;

/// Cabin classes in the order capacity rules are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CabinClass {
    Economy,
    Business,
    FirstClass,
}

impl CabinClass {
    pub const ALL: [CabinClass; 3] = [
        CabinClass::Economy,
        CabinClass::Business,
        CabinClass::FirstClass,
    ];
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CabinClass::Economy => "economy",
            CabinClass::Business => "business",
            CabinClass::FirstClass => "first class",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ViolationKind {
    LookupFailure,
    RangeInfeasible,
    OverbookingTotal,
    OverbookingClass,
}

/// A single reason a booking cannot be flown.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum Violation {
    #[error("Unknown overseas airport: '{code}'")]
    UnknownAirport { code: String },
    #[error("Unknown aircraft type: '{aircraft_type}'")]
    UnknownAircraft { aircraft_type: String },
    #[error(
        "Aircraft '{aircraft_type}' cannot fly {origin} -> {destination}: \
         distance {distance} exceeds max range {max_range}"
    )]
    RangeInfeasible {
        aircraft_type: String,
        origin: String,
        destination: String,
        distance: f64,
        max_range: f64,
    },
    #[error("Flight overbooked: {booked} seats booked, capacity is {capacity}")]
    OverbookingTotal { booked: u64, capacity: u64 },
    #[error("{class} overbooked: {booked} seats booked, capacity is {capacity}")]
    OverbookingClass {
        class: CabinClass,
        booked: u32,
        capacity: u32,
    },
}

impl Violation {
    pub fn kind(&self) -> ViolationKind {
        match self {
            Violation::UnknownAirport { .. } | Violation::UnknownAircraft { .. } => {
                ViolationKind::LookupFailure
            }
            Violation::RangeInfeasible { .. } => ViolationKind::RangeInfeasible,
            Violation::OverbookingTotal { .. } => ViolationKind::OverbookingTotal,
            Violation::OverbookingClass { .. } => ViolationKind::OverbookingClass,
        }
    }
}

/// Why a flight could not be constructed. Always holds at least one violation,
/// the first being the earliest failing rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    violations: Vec<Violation>,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first())
    }
}

impl std::error::Error for Rejection {}

impl Rejection {
    pub(crate) fn new(violations: Vec<Violation>) -> Self {
        debug_assert!(!violations.is_empty());
        Self { violations }
    }

    pub fn first(&self) -> &Violation {
        &self.violations[0]
    }

    pub fn kind(&self) -> ViolationKind {
        self.first().kind()
    }

    pub fn reason(&self) -> String {
        self.first().to_string()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

/// Malformed reference data. Kept apart from `Violation`: a bad table is a data
/// problem, not an infeasible flight.
#[derive(Error, Debug)]
pub enum ReferenceDataError {
    #[error("{table} row {row}: expected at least {expected} fields, found {found}")]
    TooFewFields {
        table: &'static str,
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("{table} row {row}: field '{field}' is not a valid number: '{value}'")]
    InvalidNumber {
        table: &'static str,
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("{table} row {row}: empty key")]
    EmptyKey { table: &'static str, row: usize },
    #[error("{table} row {row}: duplicate key '{key}'")]
    DuplicateKey {
        table: &'static str,
        row: usize,
        key: String,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

#[derive(Error, Debug, PartialEq)]
pub enum BookingError {
    #[error("{class} price must be a non-negative number, got {value}")]
    InvalidPrice { class: CabinClass, value: f64 },
    #[error("field '{field}' is not a valid seat count: '{value}'")]
    InvalidCount { field: &'static str, value: String },
    #[error("field '{field}' is not a valid price: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Unknown home base '{0}' (expected MAN or LGW)")]
    UnknownHomeBase(String),
    #[error("booking row has {found} fields, expected {expected}")]
    TooFewFields { expected: usize, found: usize },
}

/// Both reference tables behind one read-only handle. Flights hold it through
/// an `Arc` and never mutate it.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub airports: AirportTable,
    pub aircraft: AircraftTable,
}

impl ReferenceData {
    pub fn new(airports: AirportTable, aircraft: AircraftTable) -> Self {
        Self { airports, aircraft }
    }

    /// Builds both tables from already-split rows.
    pub fn from_rows<A, B, S, T>(airport_rows: A, aircraft_rows: B) -> Result<Self, ReferenceDataError>
    where
        A: IntoIterator<Item = Vec<S>>,
        B: IntoIterator<Item = Vec<T>>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let config = EvaluationConfig::default();
        Ok(Self {
            airports: AirportTable::from_rows(airport_rows)?,
            aircraft: AircraftTable::from_rows(aircraft_rows, &config.currency_symbol)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_reports_first_violation() {
        let rejection = Rejection::new(vec![
            Violation::OverbookingTotal {
                booked: 300,
                capacity: 200,
            },
            Violation::OverbookingClass {
                class: CabinClass::Economy,
                booked: 280,
                capacity: 160,
            },
        ]);

        assert_eq!(rejection.kind(), ViolationKind::OverbookingTotal);
        assert_eq!(rejection.violations().len(), 2);
        assert_eq!(
            rejection.to_string(),
            "Flight overbooked: 300 seats booked, capacity is 200"
        );
        assert_eq!(rejection.reason(), rejection.to_string());
    }

    #[test]
    fn test_lookup_violations_share_kind() {
        let airport = Violation::UnknownAirport {
            code: "XXX".to_string(),
        };
        let aircraft = Violation::UnknownAircraft {
            aircraft_type: "Blimp".to_string(),
        };
        assert_eq!(airport.kind(), ViolationKind::LookupFailure);
        assert_eq!(aircraft.kind(), ViolationKind::LookupFailure);
    }

    #[test]
    fn test_class_violation_message_names_class() {
        let v = Violation::OverbookingClass {
            class: CabinClass::FirstClass,
            booked: 5,
            capacity: 4,
        };
        assert_eq!(
            v.to_string(),
            "first class overbooked: 5 seats booked, capacity is 4"
        );
    }
}
