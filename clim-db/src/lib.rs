//! SQLite store layer for weather station and daily measurement data.
//!
//! This crate wraps a single SQLite connection holding the `station` and
//! `measurement` tables and exposes typed query methods whose results
//! serialize directly into the JSON shapes served by `clim-api`.
//!
//! # Architecture
//!
//! - `Arc<Mutex<Connection>>` so one handle can be shared by every request
//!   handler; each query holds the lock only for its own duration
//! - The schema is declared statically in [`schema`] and verified when an
//!   existing data file is opened
//! - CSV loaders populate new databases (tests and the `import` command)
//!
//! # Usage
//!
//! ```rust
//! use clim_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_stations("station,name,latitude,longitude,elevation\nUSC00519397,\"WAIKIKI 717.2, HI US\",21.2716,-157.8168,3.0\n").unwrap();
//! db.load_measurements("station,date,prcp,tobs\nUSC00519397,2010-01-01,0.08,65\n").unwrap();
//!
//! let names = db.query_station_names().unwrap();
//! assert_eq!(names, vec![Some("WAIKIKI 717.2, HI US".to_string())]);
//! ```

pub mod error;
mod loader;
pub mod models;
mod queries;
pub mod schema;

pub use error::{DbError, DbResult};
pub use loader::LoadSummary;

use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Handle to the climate observation database.
///
/// Cloning is cheap and every clone shares the same connection.
///
/// # Example
///
/// ```rust
/// use clim_db::Database;
///
/// let db = Database::new().unwrap();
/// let other = db.clone();
/// db.load_stations("station,name,latitude,longitude,elevation\nUSC00513117,\"KANEOHE 838.1, HI US\",21.4234,-157.8015,14.6\n").unwrap();
/// assert_eq!(other.query_station_names().unwrap().len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    pub fn new() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self::from_connection(conn))
    }

    /// Open (or create) a writable database file and apply the schema.
    ///
    /// Used to build a data file from CSV sources.
    pub fn create<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path.as_ref())?;
        conn.execute_batch(schema::create_schema())?;
        log::info!("[clim-db] created database at {}", path.as_ref().display());
        Ok(Self::from_connection(conn))
    }

    /// Open an existing data file read-only and verify its schema.
    ///
    /// Fails if the file does not exist or lacks a declared table or column.
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open_with_flags(
            path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        schema::verify_schema(&conn)?;
        log::info!("[clim-db] opened {} read-only", path.as_ref().display());
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Acquire the connection for the duration of one operation.
    ///
    /// The guard releases the connection when dropped, on success and error alike.
    fn connection(&self) -> DbResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| DbError::ConnectionPoisoned)
    }
}
