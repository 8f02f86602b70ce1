//! Read-only JSON API over weather station and daily measurement data.
//!
//! Routes:
//! - `GET /` route listing
//! - `GET /api/v1.0/precipitation` every `{date, prcp}` record
//! - `GET /api/v1.0/stations` station names
//! - `GET /api/v1.0/tobs` trailing-year `[date, tobs]` pairs of the most active station
//! - `GET /api/v1.0/:start` `[min, avg, max]` temperature from `start`
//! - `GET /api/v1.0/:start/:end` `[min, avg, max]` temperature within `[start, end]`

pub mod config;
pub mod error;
pub mod server;
pub mod state;
pub mod web;

pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use server::ClimateServer;
pub use state::AppState;
