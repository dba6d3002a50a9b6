// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::flight::BookingRequest;
use crate::resolver::ResolvedSpecification;
use crate::CabinClass;
use serde::Serialize;

/// Running costs are quoted per seat per this many distance units.
pub const COST_DISTANCE_UNIT: f64 = 100.0;

/// Financial outcome of one flight, at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightResult {
    pub income: f64,
    pub cost: f64,
    pub profit: f64,
}

impl FlightResult {
    /// Rounded to two decimal places for display. Never feed this back into a calculation.
    pub fn rounded(&self) -> Self {
        Self {
            income: round_currency(self.income),
            cost: round_currency(self.cost),
            profit: round_currency(self.profit),
        }
    }
}

pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn compute_income(request: &BookingRequest) -> f64 {
    CabinClass::ALL
        .iter()
        .map(|&class| request.booked(class) as f64 * request.price(class))
        .sum()
}

pub fn compute_cost(resolved: &ResolvedSpecification, request: &BookingRequest) -> f64 {
    (resolved.running_cost_per_seat / COST_DISTANCE_UNIT)
        * resolved.distance
        * request.total_booked() as f64
}

pub fn compute_profit(income: f64, cost: f64) -> f64 {
    income - cost
}

pub fn evaluate(resolved: &ResolvedSpecification, request: &BookingRequest) -> FlightResult {
    let income = compute_income(request);
    let cost = compute_cost(resolved, request);
    FlightResult {
        income,
        cost,
        profit: compute_profit(income, cost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::HomeBase;

    fn spec() -> ResolvedSpecification {
        // Large narrow body on MAN -> JFK
        ResolvedSpecification {
            distance: 5376.0,
            running_cost_per_seat: 7.0,
            max_range: 5600.0,
            total_capacity: 204,
            economy_capacity: 180,
            business_capacity: 20,
            first_class_capacity: 4,
        }
    }

    fn booking(booked: [u32; 3], prices: [f64; 3]) -> BookingRequest {
        BookingRequest::new(HomeBase::A, "JFK", "Large narrow body", booked, prices).unwrap()
    }

    #[test]
    fn test_income_sums_classes() {
        let request = booking([150, 12, 2], [399.0, 999.0, 1899.0]);
        assert_eq!(compute_income(&request), 150.0 * 399.0 + 12.0 * 999.0 + 2.0 * 1899.0);
    }

    #[test]
    fn test_cost_uses_hundred_unit_scale() {
        let request = booking([150, 12, 2], [399.0, 999.0, 1899.0]);
        let cost = compute_cost(&spec(), &request);
        assert!((cost - 0.07 * 5376.0 * 164.0).abs() < 1e-9);
    }

    #[test]
    fn test_profit_can_be_negative() {
        let request = booking([10, 0, 0], [1.0, 0.0, 0.0]);
        let result = evaluate(&spec(), &request);
        assert!(result.profit < 0.0);
        assert_eq!(result.profit, result.income - result.cost);
    }

    #[test]
    fn test_empty_flight_costs_nothing() {
        let result = evaluate(&spec(), &booking([0, 0, 0], [399.0, 999.0, 1899.0]));
        assert_eq!(result.income, 0.0);
        assert_eq!(result.cost, 0.0);
        assert_eq!(result.profit, 0.0);
    }

    #[test]
    fn test_rounding_is_presentation_only() {
        let result = FlightResult {
            income: 10.005,
            cost: 3.3333333,
            profit: 10.005 - 3.3333333,
        };
        let shown = result.rounded();
        assert_eq!(shown.cost, 3.33);
        assert_eq!(result.cost, 3.3333333);
    }
}
