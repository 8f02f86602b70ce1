//! Typed query methods for station and measurement data.
//!
//! Each public method acquires the connection once and runs its statements
//! under that guard. Dates are compared as `YYYY-MM-DD` text, which orders
//! the same way as the calendar.

use crate::error::{DbError, DbResult};
use crate::models::{DateTemperature, PrecipitationRecord, StationActivity, TemperatureSummary};
use crate::Database;
use clim_utils::dates;
use rusqlite::{params, Connection, OptionalExtension};

const STATION_ACTIVITY_SQL: &str = "SELECT m.station, s.name, COUNT(m.station) AS observations
     FROM measurement m
     INNER JOIN station s ON m.station = s.station
     GROUP BY m.station
     ORDER BY observations DESC, m.station ASC";

impl Database {
    /// Every `(date, prcp)` pair, one per measurement row, in table order.
    pub fn query_precipitation(&self) -> DbResult<Vec<PrecipitationRecord>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare("SELECT date, prcp FROM measurement")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(PrecipitationRecord {
                    date: row.get(0)?,
                    prcp: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("[clim-db] query: query_precipitation returned {} records", rows.len());
        Ok(rows)
    }

    /// Station names, one per station row, in table order.
    ///
    /// A station stored without a name yields `None` in its slot.
    pub fn query_station_names(&self) -> DbResult<Vec<Option<String>>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare("SELECT name FROM station")?;
        let names = stmt
            .query_map([], |row| row.get::<_, Option<String>>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("[clim-db] query: query_station_names returned {} records", names.len());
        Ok(names)
    }

    /// Earliest and latest measurement dates, or `None` for an empty table.
    pub fn query_date_range(&self) -> DbResult<Option<(String, String)>> {
        let conn = self.connection()?;
        let range = date_range(&conn)?;
        log::info!("[clim-db] query: query_date_range returned {:?}", range);
        Ok(range)
    }

    /// Measurement counts per station, most active first.
    ///
    /// Stations with equal counts are ordered by station code.
    pub fn query_station_activity(&self) -> DbResult<Vec<StationActivity>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(STATION_ACTIVITY_SQL)?;
        let rows = stmt
            .query_map([], station_activity_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[clim-db] query: query_station_activity returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// The station with the most measurement rows.
    pub fn query_most_active_station(&self) -> DbResult<Option<StationActivity>> {
        let conn = self.connection()?;
        most_active_station(&conn)
    }

    /// Temperatures of the most active station over the trailing year.
    ///
    /// The window ends at the latest date in the whole measurement table
    /// (not the station's own latest date) and keeps rows strictly after
    /// that date minus 365 days. Returns an empty list when there are no
    /// measurements or no measurement joins to a station.
    pub fn query_most_active_temperatures(&self) -> DbResult<Vec<DateTemperature>> {
        let conn = self.connection()?;
        let Some((_, last_date)) = date_range(&conn)? else {
            log::info!("[clim-db] query: query_most_active_temperatures found no measurements");
            return Ok(Vec::new());
        };
        let cutoff = dates::year_window_cutoff(&last_date)
            .map_err(|e| DbError::DateParse(format!("{}: {}", last_date, e)))?;
        let Some(active) = most_active_station(&conn)? else {
            return Ok(Vec::new());
        };

        let mut stmt = conn.prepare(
            "SELECT date, tobs FROM measurement
             WHERE station = ?1 AND date > ?2",
        )?;
        let rows = stmt
            .query_map(params![active.station, cutoff], |row| {
                Ok(DateTemperature {
                    date: row.get(0)?,
                    tobs: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "[clim-db] query: query_most_active_temperatures returned {} records for {} after {}",
            rows.len(),
            active.station,
            cutoff
        );
        Ok(rows)
    }

    /// Temperature summary over measurements dated on or after `start`.
    ///
    /// `start` is compared as text without any format check.
    pub fn query_summary_from(&self, start: &str) -> DbResult<TemperatureSummary> {
        let conn = self.connection()?;
        let summary = temperature_summary(
            &conn,
            "SELECT MIN(tobs), ROUND(AVG(tobs), 2), MAX(tobs)
             FROM measurement
             WHERE date >= ?1",
            params![start],
        )?;
        log::info!("[clim-db] query: query_summary_from({}) returned {:?}", start, summary);
        Ok(summary)
    }

    /// Temperature summary over measurements dated within `[start, end]`.
    ///
    /// A `start` later than `end` matches nothing and yields an empty summary.
    pub fn query_summary_between(&self, start: &str, end: &str) -> DbResult<TemperatureSummary> {
        let conn = self.connection()?;
        let summary = temperature_summary(
            &conn,
            "SELECT MIN(tobs), ROUND(AVG(tobs), 2), MAX(tobs)
             FROM measurement
             WHERE date BETWEEN ?1 AND ?2",
            params![start, end],
        )?;
        log::info!(
            "[clim-db] query: query_summary_between({}, {}) returned {:?}",
            start,
            end,
            summary
        );
        Ok(summary)
    }
}

fn date_range(conn: &Connection) -> DbResult<Option<(String, String)>> {
    let (min_date, max_date) =
        conn.query_row("SELECT MIN(date), MAX(date) FROM measurement", [], |row| {
            Ok((row.get::<_, Option<String>>(0)?, row.get::<_, Option<String>>(1)?))
        })?;
    Ok(min_date.zip(max_date))
}

fn station_activity_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StationActivity> {
    Ok(StationActivity {
        station: row.get(0)?,
        name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        count: row.get(2)?,
    })
}

fn most_active_station(conn: &Connection) -> DbResult<Option<StationActivity>> {
    let active = conn
        .query_row(
            &format!("{} LIMIT 1", STATION_ACTIVITY_SQL),
            [],
            station_activity_row,
        )
        .optional()?;
    log::info!("[clim-db] query: most active station is {:?}", active);
    Ok(active)
}

fn temperature_summary(
    conn: &Connection,
    sql: &str,
    bounds: &[&dyn rusqlite::ToSql],
) -> DbResult<TemperatureSummary> {
    conn.query_row(sql, bounds, |row| {
        Ok(TemperatureSummary {
            min: row.get(0)?,
            avg: row.get(1)?,
            max: row.get(2)?,
        })
    })
    .map_err(DbError::from_parameter)
}
