// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::ReferenceDataError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

const AIRPORTS: &str = "airports";
const AIRCRAFT: &str = "aircraft";

/// The two domestic airports every flight departs from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HomeBase {
    /// Manchester; distances come from the first distance column.
    A,
    /// London Gatwick; distances come from the second distance column.
    B,
}

impl HomeBase {
    pub fn code(self) -> &'static str {
        match self {
            HomeBase::A => "MAN",
            HomeBase::B => "LGW",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "MAN" => Some(HomeBase::A),
            "LGW" => Some(HomeBase::B),
            _ => None,
        }
    }
}

impl fmt::Display for HomeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    pub code: String,
    pub name: String,
    pub distance_from_base_a: f64,
    pub distance_from_base_b: f64,
}

impl AirportRecord {
    pub fn distance_from(&self, base: HomeBase) -> f64 {
        match base {
            HomeBase::A => self.distance_from_base_a,
            HomeBase::B => self.distance_from_base_b,
        }
    }

    /// Row layout: `[code, name, distance_from_a, distance_from_b, ...]`.
    fn from_row<S: AsRef<str>>(row: &[S], row_no: usize) -> Result<Self, ReferenceDataError> {
        require_fields(AIRPORTS, row, row_no, 4)?;
        let code = require_key(AIRPORTS, row[0].as_ref(), row_no)?;

        Ok(Self {
            code,
            name: row[1].as_ref().trim().to_string(),
            distance_from_base_a: parse_quantity(AIRPORTS, row_no, "distance_from_base_a", row[2].as_ref())?,
            distance_from_base_b: parse_quantity(AIRPORTS, row_no, "distance_from_base_b", row[3].as_ref())?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftRecord {
    pub aircraft_type: String,
    /// Running cost per seat per 100 distance units.
    pub cost_per_seat_per_hundred: f64,
    pub max_range: f64,
    pub economy_capacity: u32,
    pub business_capacity: u32,
    pub first_class_capacity: u32,
}

impl AircraftRecord {
    pub fn total_capacity(&self) -> u64 {
        self.economy_capacity as u64 + self.business_capacity as u64 + self.first_class_capacity as u64
    }

    /// Row layout: `[type, cost ("£8"), max_range, economy, business, first, ...]`.
    fn from_row<S: AsRef<str>>(
        row: &[S],
        row_no: usize,
        currency_symbol: &str,
    ) -> Result<Self, ReferenceDataError> {
        require_fields(AIRCRAFT, row, row_no, 6)?;
        let aircraft_type = require_key(AIRCRAFT, row[0].as_ref(), row_no)?;

        let raw_cost = row[1].as_ref().trim();
        let cost = if currency_symbol.is_empty() {
            raw_cost
        } else {
            raw_cost.trim_start_matches(currency_symbol).trim_start()
        };

        Ok(Self {
            aircraft_type,
            cost_per_seat_per_hundred: parse_quantity(AIRCRAFT, row_no, "cost_per_seat", cost)?,
            max_range: parse_quantity(AIRCRAFT, row_no, "max_range", row[2].as_ref())?,
            economy_capacity: parse_number(AIRCRAFT, row_no, "economy_capacity", row[3].as_ref())?,
            business_capacity: parse_number(AIRCRAFT, row_no, "business_capacity", row[4].as_ref())?,
            first_class_capacity: parse_number(AIRCRAFT, row_no, "first_class_capacity", row[5].as_ref())?,
        })
    }
}

/// Overseas airports keyed by trimmed code, kept in load order.
#[derive(Debug, Clone, Default)]
pub struct AirportTable {
    records: Vec<AirportRecord>,
    index: HashMap<String, usize>,
}

impl AirportTable {
    pub fn new(records: Vec<AirportRecord>) -> Result<Self, ReferenceDataError> {
        let mut table = Self::default();
        for (row_no, record) in records.into_iter().enumerate() {
            table.insert(record, row_no + 1)?;
        }
        Ok(table)
    }

    pub fn from_rows<I, S>(rows: I) -> Result<Self, ReferenceDataError>
    where
        I: IntoIterator<Item = Vec<S>>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for (i, row) in rows.into_iter().enumerate() {
            let row_no = i + 1;
            table.insert(AirportRecord::from_row(&row, row_no)?, row_no)?;
        }
        log::info!("Loaded airport table — airports={}", table.len());
        Ok(table)
    }

    fn insert(&mut self, mut record: AirportRecord, row_no: usize) -> Result<(), ReferenceDataError> {
        record.code = require_key(AIRPORTS, &record.code, row_no)?;
        check_quantity(AIRPORTS, row_no, "distance_from_base_a", record.distance_from_base_a)?;
        check_quantity(AIRPORTS, row_no, "distance_from_base_b", record.distance_from_base_b)?;
        if self.index.contains_key(&record.code) {
            return Err(ReferenceDataError::DuplicateKey {
                table: AIRPORTS,
                row: row_no,
                key: record.code,
            });
        }
        self.index.insert(record.code.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    /// Exact match on the trimmed code; no case folding.
    pub fn get(&self, code: &str) -> Option<&AirportRecord> {
        self.index.get(code.trim()).map(|&i| &self.records[i])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AirportRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Aircraft types keyed by trimmed type name, kept in load order.
#[derive(Debug, Clone, Default)]
pub struct AircraftTable {
    records: Vec<AircraftRecord>,
    index: HashMap<String, usize>,
}

impl AircraftTable {
    pub fn new(records: Vec<AircraftRecord>) -> Result<Self, ReferenceDataError> {
        let mut table = Self::default();
        for (row_no, record) in records.into_iter().enumerate() {
            table.insert(record, row_no + 1)?;
        }
        Ok(table)
    }

    pub fn from_rows<I, S>(rows: I, currency_symbol: &str) -> Result<Self, ReferenceDataError>
    where
        I: IntoIterator<Item = Vec<S>>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        for (i, row) in rows.into_iter().enumerate() {
            let row_no = i + 1;
            table.insert(AircraftRecord::from_row(&row, row_no, currency_symbol)?, row_no)?;
        }
        log::info!("Loaded aircraft table — types={}", table.len());
        Ok(table)
    }

    fn insert(&mut self, mut record: AircraftRecord, row_no: usize) -> Result<(), ReferenceDataError> {
        record.aircraft_type = require_key(AIRCRAFT, &record.aircraft_type, row_no)?;
        check_quantity(AIRCRAFT, row_no, "cost_per_seat", record.cost_per_seat_per_hundred)?;
        check_quantity(AIRCRAFT, row_no, "max_range", record.max_range)?;
        if self.index.contains_key(&record.aircraft_type) {
            return Err(ReferenceDataError::DuplicateKey {
                table: AIRCRAFT,
                row: row_no,
                key: record.aircraft_type,
            });
        }
        self.index
            .insert(record.aircraft_type.clone(), self.records.len());
        self.records.push(record);
        Ok(())
    }

    /// Exact match on the trimmed type name; no case folding.
    pub fn get(&self, aircraft_type: &str) -> Option<&AircraftRecord> {
        self.index
            .get(aircraft_type.trim())
            .map(|&i| &self.records[i])
    }

    pub fn contains(&self, aircraft_type: &str) -> bool {
        self.get(aircraft_type).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AircraftRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn require_fields<S: AsRef<str>>(
    table: &'static str,
    row: &[S],
    row_no: usize,
    expected: usize,
) -> Result<(), ReferenceDataError> {
    if row.len() < expected {
        return Err(ReferenceDataError::TooFewFields {
            table,
            row: row_no,
            expected,
            found: row.len(),
        });
    }
    Ok(())
}

fn require_key(table: &'static str, raw: &str, row_no: usize) -> Result<String, ReferenceDataError> {
    let key = raw.trim();
    if key.is_empty() {
        return Err(ReferenceDataError::EmptyKey { table, row: row_no });
    }
    Ok(key.to_string())
}

fn parse_number<T: FromStr>(
    table: &'static str,
    row_no: usize,
    field: &'static str,
    raw: &str,
) -> Result<T, ReferenceDataError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| ReferenceDataError::InvalidNumber {
            table,
            row: row_no,
            field,
            value: raw.to_string(),
        })
}

fn parse_quantity(
    table: &'static str,
    row_no: usize,
    field: &'static str,
    raw: &str,
) -> Result<f64, ReferenceDataError> {
    let value: f64 = parse_number(table, row_no, field, raw)?;
    check_quantity(table, row_no, field, value)?;
    Ok(value)
}

/// Distances, ranges and costs: finite and non-negative, whichever way the
/// record was built.
fn check_quantity(
    table: &'static str,
    row_no: usize,
    field: &'static str,
    value: f64,
) -> Result<(), ReferenceDataError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ReferenceDataError::InvalidNumber {
            table,
            row: row_no,
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
