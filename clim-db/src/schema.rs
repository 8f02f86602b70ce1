//! Static schema declaration for the climate observation data file.
//!
//! The serving path never creates tables; it opens an existing file and
//! checks it against [`TABLES`]. [`create_schema`] is applied only when a
//! new database is built (in-memory or by the CSV import).

use crate::error::{DbError, DbResult};
use rusqlite::Connection;

/// Column layout a table must provide.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

/// Weather station reference data.
pub const STATION_TABLE: TableSchema = TableSchema {
    name: "station",
    columns: &["id", "station", "name", "latitude", "longitude", "elevation"],
};

/// Daily observations, one row per station and date.
pub const MEASUREMENT_TABLE: TableSchema = TableSchema {
    name: "measurement",
    columns: &["id", "station", "date", "prcp", "tobs"],
};

pub const TABLES: [TableSchema; 2] = [STATION_TABLE, MEASUREMENT_TABLE];

/// Returns the full SQL schema as a single batch string.
///
/// Column types follow the published `hawaii.sqlite` file so that a freshly
/// imported database and a published one answer queries identically.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS station (
        id INTEGER PRIMARY KEY,
        station TEXT,
        name TEXT,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    );

    CREATE TABLE IF NOT EXISTS measurement (
        id INTEGER PRIMARY KEY,
        station TEXT,
        date TEXT,
        prcp FLOAT,
        tobs FLOAT
    );
    CREATE INDEX IF NOT EXISTS idx_measurement_station ON measurement(station);
    CREATE INDEX IF NOT EXISTS idx_measurement_date ON measurement(date);
    "#
}

/// Check that every declared table and column exists.
///
/// Extra tables or columns are allowed.
pub fn verify_schema(conn: &Connection) -> DbResult<()> {
    for table in TABLES {
        let present = table_columns(conn, table.name)?;
        if present.is_empty() {
            return Err(DbError::MissingTable(table.name.to_string()));
        }
        for column in table.columns {
            if !present.iter().any(|c| c.eq_ignore_ascii_case(column)) {
                return Err(DbError::MissingColumn {
                    table: table.name.to_string(),
                    column: column.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let columns = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}
