// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Delimited-text ingestion for the reference tables and bookings files.
//!
//! Every file starts with a header line, which is skipped. Blank lines are
//! ignored and each field is trimmed. Rows may have differing widths; the
//! table builders decide how many fields they need.

use crate::config::EvaluationConfig;
use crate::reference::{AircraftTable, AirportTable};
use crate::{ReferenceData, ReferenceDataError};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub type Row = Vec<String>;

/// A row tagged with the 1-based line of the file it starts on.
pub type NumberedRow = (u64, Row);

pub fn read_rows<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Vec<Row>, ReferenceDataError> {
    Ok(read_numbered_rows(path, delimiter)?
        .into_iter()
        .map(|(_, row)| row)
        .collect())
}

pub fn read_rows_from<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Row>, ReferenceDataError> {
    Ok(read_numbered_rows_from(reader, delimiter)?
        .into_iter()
        .map(|(_, row)| row)
        .collect())
}

pub fn read_numbered_rows<P: AsRef<Path>>(
    path: P,
    delimiter: u8,
) -> Result<Vec<NumberedRow>, ReferenceDataError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let rows = read_numbered_rows_from(file, delimiter)?;
    log::debug!("Read delimited file — path={} rows={}", path.display(), rows.len());
    Ok(rows)
}

pub fn read_numbered_rows_from<R: Read>(
    reader: R,
    delimiter: u8,
) -> Result<Vec<NumberedRow>, ReferenceDataError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut record = csv::StringRecord::new();
    loop {
        // Position is taken before the read so it names the record's first line
        let line = rdr.position().line();
        if !rdr.read_record(&mut record)? {
            break;
        }
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        let line = record.position().map_or(line, |p| p.line());
        rows.push((line, record.iter().map(str::to_string).collect()));
    }
    Ok(rows)
}

pub fn load_airports<P: AsRef<Path>>(
    path: P,
    config: &EvaluationConfig,
) -> Result<AirportTable, ReferenceDataError> {
    AirportTable::from_rows(read_rows(path, config.delimiter_byte()?)?)
}

pub fn load_aircraft<P: AsRef<Path>>(
    path: P,
    config: &EvaluationConfig,
) -> Result<AircraftTable, ReferenceDataError> {
    AircraftTable::from_rows(
        read_rows(path, config.delimiter_byte()?)?,
        &config.currency_symbol,
    )
}

/// Loads both reference tables from their delimited files.
pub fn load_reference_data<P: AsRef<Path>, Q: AsRef<Path>>(
    airports_path: P,
    aircraft_path: Q,
    config: &EvaluationConfig,
) -> Result<ReferenceData, ReferenceDataError> {
    Ok(ReferenceData::new(
        load_airports(airports_path, config)?,
        load_aircraft(aircraft_path, config)?,
    ))
}
