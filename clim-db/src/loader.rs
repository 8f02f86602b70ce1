//! CSV data loading for populating a new database.
//!
//! Each loader parses CSV text and inserts rows inside one transaction.
//!
//! # CSV Formats
//!
//! - **Stations** (has headers): `station,name,latitude,longitude,elevation`
//! - **Measurements** (has headers): `station,date(YYYY-MM-DD),prcp,tobs`
//!
//! An empty `prcp` field is stored as NULL.

use crate::error::{DbError, DbResult};
use crate::models::{Measurement, Station};
use crate::Database;
use clim_utils::dates;
use csv::StringRecord;
use rusqlite::params;

/// Row counts from one loader call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub inserted: usize,
    pub skipped: usize,
}

impl Database {
    /// Load station metadata from CSV string.
    ///
    /// # Example CSV
    /// ```text
    /// station,name,latitude,longitude,elevation
    /// USC00519397,"WAIKIKI 717.2, HI US",21.2716,-157.8168,3.0
    /// ```
    ///
    /// Malformed rows abort the load; nothing is inserted in that case.
    pub fn load_stations(&self, csv_data: &str) -> DbResult<LoadSummary> {
        let mut conn = self.connection()?;
        let tx = conn.transaction()?;
        let mut summary = LoadSummary::default();
        {
            let mut rdr = csv::ReaderBuilder::new()
                .has_headers(true)
                .flexible(true)
                .from_reader(csv_data.as_bytes());
            let mut stmt = tx.prepare(
                "INSERT INTO station (station, name, latitude, longitude, elevation)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for result in rdr.records() {
                let station = parse_station(&result?)?;
                stmt.execute(params![
                    station.station,
                    station.name,
                    station.latitude,
                    station.longitude,
                    station.elevation
                ])?;
                summary.inserted += 1;
            }
        }
        tx.commit()?;
        log::info!("[clim-db] loader: Loaded {} stations", summary.inserted);
        Ok(summary)
    }

    /// Load daily measurements from CSV string.
    ///
    /// Rows with a blank station, a date not in `YYYY-MM-DD` form, or a
    /// non-numeric temperature are skipped and counted.
    ///
    /// # Example CSV
    /// ```text
    /// station,date,prcp,tobs
    /// USC00519397,2010-01-01,0.08,65
    /// USC00519397,2010-01-02,,63
    /// ```
    pub fn load_measurements(&self, csv_data: &str) -> DbResult<LoadSummary> {
        let mut conn = self.connection()?;
        let tx = conn.transaction()?;
        let mut summary = LoadSummary::default();
        {
            let mut rdr = csv::ReaderBuilder::new()
                .has_headers(true)
                .flexible(true)
                .from_reader(csv_data.as_bytes());
            let mut stmt = tx.prepare(
                "INSERT INTO measurement (station, date, prcp, tobs)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for result in rdr.records() {
                let record = result?;
                let measurement = match parse_measurement(&record) {
                    Ok(m) => m,
                    Err(e) => {
                        log::warn!("[clim-db] loader: skipping measurement: {}", e);
                        summary.skipped += 1;
                        continue;
                    }
                };
                stmt.execute(params![
                    measurement.station,
                    measurement.date,
                    measurement.prcp,
                    measurement.tobs
                ])?;
                summary.inserted += 1;
            }
        }
        tx.commit()?;
        log::info!(
            "[clim-db] loader: Loaded {} measurements, skipped {}",
            summary.inserted,
            summary.skipped
        );
        Ok(summary)
    }
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn field<'r>(record: &'r StringRecord, idx: usize) -> &'r str {
    record.get(idx).unwrap_or("").trim()
}

fn number(record: &StringRecord, idx: usize, column: &str) -> DbResult<f64> {
    let raw = field(record, idx);
    raw.parse::<f64>().map_err(|_| DbError::InvalidRecord {
        line: line_of(record),
        reason: format!("{} '{}' is not a number", column, raw),
    })
}

fn parse_station(record: &StringRecord) -> DbResult<Station> {
    let station = field(record, 0);
    if station.is_empty() {
        return Err(DbError::InvalidRecord {
            line: line_of(record),
            reason: "empty station code".to_string(),
        });
    }
    Ok(Station {
        station: station.to_string(),
        name: field(record, 1).to_string(),
        latitude: number(record, 2, "latitude")?,
        longitude: number(record, 3, "longitude")?,
        elevation: number(record, 4, "elevation")?,
    })
}

fn parse_measurement(record: &StringRecord) -> DbResult<Measurement> {
    let station = field(record, 0);
    if station.is_empty() {
        return Err(DbError::InvalidRecord {
            line: line_of(record),
            reason: "empty station code".to_string(),
        });
    }
    // Stored dates must round-trip through the ISO format unchanged.
    let date = field(record, 1);
    match dates::parse_date(date) {
        Ok(parsed) if dates::format_date(&parsed) == date => {}
        _ => {
            return Err(DbError::InvalidRecord {
                line: line_of(record),
                reason: format!("date '{}' is not YYYY-MM-DD", date),
            })
        }
    }
    let prcp = match field(record, 2) {
        "" => None,
        _ => Some(number(record, 2, "prcp")?),
    };
    Ok(Measurement {
        station: station.to_string(),
        date: date.to_string(),
        prcp,
        tobs: number(record, 3, "tobs")?,
    })
}
