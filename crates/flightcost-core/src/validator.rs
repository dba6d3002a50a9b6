// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::config::ValidationMode;
use crate::flight::BookingRequest;
use crate::resolver::ResolvedSpecification;
use crate::{CabinClass, Violation};

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Valid,
    /// Never empty; violations appear in rule order.
    Invalid(Vec<Violation>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

/// Range and capacity rules for a resolved booking. Airport and aircraft
/// validity are settled earlier by the resolver.
pub struct FeasibilityValidator;

impl FeasibilityValidator {
    pub fn validate(
        resolved: &ResolvedSpecification,
        request: &BookingRequest,
        mode: ValidationMode,
    ) -> ValidationResult {
        let mut violations = Vec::new();
        let stop_early = mode == ValidationMode::FirstFailure;

        // Range
        Self::check_range(resolved, request, &mut violations);
        if stop_early && !violations.is_empty() {
            return ValidationResult::Invalid(violations);
        }

        // Total seats before individual cabins
        Self::check_total_capacity(resolved, request, &mut violations);
        if stop_early && !violations.is_empty() {
            return ValidationResult::Invalid(violations);
        }

        Self::check_class_capacity(resolved, request, stop_early, &mut violations);

        if violations.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(violations)
        }
    }

    fn check_range(
        resolved: &ResolvedSpecification,
        request: &BookingRequest,
        violations: &mut Vec<Violation>,
    ) {
        // Written so a NaN range never passes
        if !(resolved.distance <= resolved.max_range) {
            violations.push(Violation::RangeInfeasible {
                aircraft_type: request.aircraft_type().trim().to_string(),
                origin: request.home_base().code().to_string(),
                destination: request.overseas_airport_code().trim().to_string(),
                distance: resolved.distance,
                max_range: resolved.max_range,
            });
        }
    }

    fn check_total_capacity(
        resolved: &ResolvedSpecification,
        request: &BookingRequest,
        violations: &mut Vec<Violation>,
    ) {
        let booked = request.total_booked();
        if booked > resolved.total_capacity {
            violations.push(Violation::OverbookingTotal {
                booked,
                capacity: resolved.total_capacity,
            });
        }
    }

    fn check_class_capacity(
        resolved: &ResolvedSpecification,
        request: &BookingRequest,
        stop_early: bool,
        violations: &mut Vec<Violation>,
    ) {
        for class in CabinClass::ALL {
            let booked = request.booked(class);
            let capacity = match class {
                CabinClass::Economy => resolved.economy_capacity,
                CabinClass::Business => resolved.business_capacity,
                CabinClass::FirstClass => resolved.first_class_capacity,
            };
            if booked > capacity {
                violations.push(Violation::OverbookingClass {
                    class,
                    booked,
                    capacity,
                });
                if stop_early {
                    return;
                }
            }
        }
    }
}
