// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::config::EvaluationConfig;
use crate::reference::HomeBase;
use crate::resolver::{self, ResolvedSpecification};
use crate::validator::{FeasibilityValidator, ValidationResult};
use crate::valuation::{self, FlightResult};
use crate::{BookingError, CabinClass, ReferenceData, Rejection};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Seats booked and prices charged for one flight, indexed economy, business, first class.
/// Fixed once built; deserializing goes through [`BookingRequest::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBookingRequest")]
pub struct BookingRequest {
    home_base: HomeBase,
    overseas_airport_code: String,
    aircraft_type: String,
    booked: [u32; 3],
    prices: [f64; 3],
}

#[derive(Deserialize)]
struct RawBookingRequest {
    home_base: HomeBase,
    overseas_airport_code: String,
    aircraft_type: String,
    booked: [u32; 3],
    prices: [f64; 3],
}

impl TryFrom<RawBookingRequest> for BookingRequest {
    type Error = BookingError;

    fn try_from(raw: RawBookingRequest) -> Result<Self, Self::Error> {
        Self::new(
            raw.home_base,
            raw.overseas_airport_code,
            raw.aircraft_type,
            raw.booked,
            raw.prices,
        )
    }
}

impl BookingRequest {
    pub fn new(
        home_base: HomeBase,
        overseas_airport_code: impl Into<String>,
        aircraft_type: impl Into<String>,
        booked: [u32; 3],
        prices: [f64; 3],
    ) -> Result<Self, BookingError> {
        for (class, &value) in CabinClass::ALL.iter().zip(prices.iter()) {
            if !value.is_finite() || value < 0.0 {
                return Err(BookingError::InvalidPrice {
                    class: *class,
                    value,
                });
            }
        }

        Ok(Self {
            home_base,
            overseas_airport_code: overseas_airport_code.into(),
            aircraft_type: aircraft_type.into(),
            booked,
            prices,
        })
    }

    /// Parses a bookings-file row:
    /// `[home_base, overseas, aircraft, economy, business, first, economy_price, business_price, first_price]`.
    pub fn from_row<S: AsRef<str>>(row: &[S]) -> Result<Self, BookingError> {
        const FIELDS: usize = 9;
        if row.len() < FIELDS {
            return Err(BookingError::TooFewFields {
                expected: FIELDS,
                found: row.len(),
            });
        }

        let field = |i: usize| row[i].as_ref().trim();
        let home_base =
            HomeBase::from_code(field(0)).ok_or_else(|| BookingError::UnknownHomeBase(field(0).to_string()))?;

        let count = |i: usize, name: &'static str| {
            field(i).parse::<u32>().map_err(|_| BookingError::InvalidCount {
                field: name,
                value: field(i).to_string(),
            })
        };
        let price = |i: usize, name: &'static str| {
            field(i).parse::<f64>().map_err(|_| BookingError::InvalidNumber {
                field: name,
                value: field(i).to_string(),
            })
        };

        Self::new(
            home_base,
            field(1),
            field(2),
            [
                count(3, "economy_booked")?,
                count(4, "business_booked")?,
                count(5, "first_class_booked")?,
            ],
            [
                price(6, "economy_price")?,
                price(7, "business_price")?,
                price(8, "first_class_price")?,
            ],
        )
    }

    pub fn home_base(&self) -> HomeBase {
        self.home_base
    }

    pub fn overseas_airport_code(&self) -> &str {
        &self.overseas_airport_code
    }

    pub fn aircraft_type(&self) -> &str {
        &self.aircraft_type
    }

    pub fn booked(&self, class: CabinClass) -> u32 {
        self.booked[class_index(class)]
    }

    pub fn price(&self, class: CabinClass) -> f64 {
        self.prices[class_index(class)]
    }

    pub fn total_booked(&self) -> u64 {
        self.booked.iter().map(|&n| n as u64).sum()
    }
}

fn class_index(class: CabinClass) -> usize {
    match class {
        CabinClass::Economy => 0,
        CabinClass::Business => 1,
        CabinClass::FirstClass => 2,
    }
}

/// A booking that has been resolved against the reference tables, passed every
/// feasibility rule and been valued. Only obtainable through [`Flight::new`] or
/// [`Flight::with_config`].
#[derive(Debug, Clone)]
pub struct Flight {
    request: BookingRequest,
    specification: ResolvedSpecification,
    result: FlightResult,
    reference: Arc<ReferenceData>,
}

impl Flight {
    pub fn new(request: BookingRequest, reference: Arc<ReferenceData>) -> Result<Self, Rejection> {
        Self::with_config(request, reference, &EvaluationConfig::default())
    }

    pub fn with_config(
        request: BookingRequest,
        reference: Arc<ReferenceData>,
        config: &EvaluationConfig,
    ) -> Result<Self, Rejection> {
        let mode = config.validation_mode;

        let specification = resolver::resolve(&request, &reference, mode).map_err(|violations| {
            log::warn!(
                "Flight rejected at lookup — route={}->{} reason={}",
                request.home_base(),
                request.overseas_airport_code(),
                violations[0]
            );
            Rejection::new(violations)
        })?;

        if let ValidationResult::Invalid(violations) =
            FeasibilityValidator::validate(&specification, &request, mode)
        {
            log::warn!(
                "Flight rejected — route={}->{} aircraft={} reason={}",
                request.home_base(),
                request.overseas_airport_code(),
                request.aircraft_type(),
                violations[0]
            );
            return Err(Rejection::new(violations));
        }

        let result = valuation::evaluate(&specification, &request);
        log::debug!(
            "Flight valued — route={}->{} income={} cost={} profit={}",
            request.home_base(),
            request.overseas_airport_code(),
            result.income,
            result.cost,
            result.profit
        );

        Ok(Self {
            request,
            specification,
            result,
            reference,
        })
    }

    pub fn income(&self) -> f64 {
        self.result.income
    }

    pub fn cost(&self) -> f64 {
        self.result.cost
    }

    pub fn profit(&self) -> f64 {
        self.result.profit
    }

    pub fn distance(&self) -> f64 {
        self.specification.distance
    }

    /// Running cost per seat per 100 distance units.
    pub fn running_cost(&self) -> f64 {
        self.specification.running_cost_per_seat
    }

    /// Seats booked across all cabins.
    pub fn total_seats(&self) -> u64 {
        self.request.total_booked()
    }

    pub fn total_capacity(&self) -> u64 {
        self.specification.total_capacity
    }

    pub fn request(&self) -> &BookingRequest {
        &self.request
    }

    pub fn specification(&self) -> &ResolvedSpecification {
        &self.specification
    }

    pub fn result(&self) -> FlightResult {
        self.result
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{AircraftTable, AirportTable};
    use crate::ViolationKind;

    fn reference() -> Arc<ReferenceData> {
        let airports = AirportTable::from_rows(vec![
            vec!["JFK", "John F Kennedy International", "5376", "5583"],
            vec!["ORY", "Paris-Orly", "610", "325"],
        ])
        .unwrap();
        let aircraft = AircraftTable::from_rows(
            vec![
                vec!["Medium narrow body", "£8", "2650", "160", "12", "0"],
                vec!["Large narrow body", "£7", "5600", "180", "20", "4"],
            ],
            "£",
        )
        .unwrap();
        Arc::new(ReferenceData::new(airports, aircraft))
    }

    #[test]
    fn test_accessors_are_stable() {
        let request = BookingRequest::new(
            HomeBase::B,
            "ORY",
            "Medium narrow body",
            [120, 10, 0],
            [89.0, 349.0, 0.0],
        )
        .unwrap();
        let flight = Flight::new(request, reference()).unwrap();

        assert_eq!(flight.distance(), 325.0);
        assert_eq!(flight.running_cost(), 8.0);
        assert_eq!(flight.total_seats(), 130);
        assert_eq!(flight.total_capacity(), 172);
        assert_eq!(flight.profit(), flight.profit());
        assert_eq!(flight.result(), flight.result());
        assert_eq!(flight.reference().airports.len(), 2);
    }

    #[test]
    fn test_reference_is_shared_not_copied() {
        let data = reference();
        let request =
            BookingRequest::new(HomeBase::A, "JFK", "Large narrow body", [1, 0, 0], [1.0, 0.0, 0.0])
                .unwrap();
        let flight = Flight::new(request, Arc::clone(&data)).unwrap();
        assert_eq!(Arc::strong_count(&data), 2);
        drop(flight);
        assert_eq!(Arc::strong_count(&data), 1);
    }

    #[test]
    fn test_negative_price_rejected_at_request() {
        let err = BookingRequest::new(HomeBase::A, "JFK", "Large narrow body", [1, 1, 1], [10.0, -1.0, 0.0])
            .unwrap_err();
        assert_eq!(
            err,
            BookingError::InvalidPrice {
                class: CabinClass::Business,
                value: -1.0
            }
        );
    }

    #[test]
    fn test_deserialize_runs_price_checks() {
        let json = r#"{
            "home_base": "A",
            "overseas_airport_code": "JFK",
            "aircraft_type": "Large narrow body",
            "booked": [1, 0, 0],
            "prices": [-500.0, 0.0, 0.0]
        }"#;
        let err = serde_json::from_str::<BookingRequest>(json).unwrap_err();
        assert!(err.to_string().contains("economy price must be a non-negative number"));
    }

    #[test]
    fn test_deserialize_valid_request() {
        let request = BookingRequest::new(
            HomeBase::B,
            "ORY",
            "Medium narrow body",
            [120, 10, 0],
            [89.0, 349.0, 0.0],
        )
        .unwrap();
        let json = serde_json::to_string(&request).unwrap();
        let back: BookingRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
        assert_eq!(back.overseas_airport_code(), "ORY");
    }

    #[test]
    fn test_from_row_parses_text_booking() {
        let request = BookingRequest::from_row(&[
            "MAN", "JFK", "Large narrow body", "150", "12", "2", "399", "999", "1899",
        ])
        .unwrap();
        assert_eq!(request.home_base(), HomeBase::A);
        assert_eq!(request.booked(CabinClass::FirstClass), 2);
        assert_eq!(request.price(CabinClass::Business), 999.0);
    }

    #[test]
    fn test_from_row_errors() {
        assert_eq!(
            BookingRequest::from_row(&["LHR", "JFK", "x", "1", "1", "1", "1", "1", "1"]),
            Err(BookingError::UnknownHomeBase("LHR".to_string()))
        );
        assert!(matches!(
            BookingRequest::from_row(&["MAN", "JFK", "x", "-1", "1", "1", "1", "1", "1"]),
            Err(BookingError::InvalidCount {
                field: "economy_booked",
                ..
            })
        ));
        assert!(matches!(
            BookingRequest::from_row(&["MAN", "JFK"]),
            Err(BookingError::TooFewFields { found: 2, .. })
        ));
    }

    #[test]
    fn test_unknown_airport_is_lookup_failure() {
        let request =
            BookingRequest::new(HomeBase::A, "XXX", "Large narrow body", [1, 0, 0], [1.0, 0.0, 0.0])
                .unwrap();
        let err = Flight::new(request, reference()).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::LookupFailure);
    }
}
