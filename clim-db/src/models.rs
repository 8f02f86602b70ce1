//! Row and result model structs for station and measurement data.
//!
//! Result structs derive or implement `Serialize` so the HTTP layer can hand
//! them straight to `axum::Json`. Two of them serialize as JSON arrays rather
//! than objects to keep the established response shapes.

use serde::ser::{Serialize, SerializeTuple, Serializer};

/// A weather station row.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Station code (e.g. "USC00519281").
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation in meters.
    pub elevation: f64,
}

/// A daily measurement row.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Station code, refers to [`Station::station`].
    pub station: String,
    /// Observation date ("YYYY-MM-DD").
    pub date: String,
    /// Precipitation in inches; absent on days without a reading.
    pub prcp: Option<f64>,
    /// Observed temperature in degrees Fahrenheit.
    pub tobs: f64,
}

/// One `{date, prcp}` entry of the precipitation listing.
#[derive(Debug, Clone, serde::Serialize, PartialEq)]
pub struct PrecipitationRecord {
    pub date: String,
    pub prcp: Option<f64>,
}

/// A `(date, tobs)` pair, serialized as `["2017-08-18", 79.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DateTemperature {
    pub date: String,
    pub tobs: f64,
}

impl Serialize for DateTemperature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.date)?;
        tuple.serialize_element(&self.tobs)?;
        tuple.end()
    }
}

/// Measurement count for one station, as produced by the activity ranking.
#[derive(Debug, Clone, serde::Serialize, PartialEq)]
pub struct StationActivity {
    pub station: String,
    pub name: String,
    pub count: i64,
}

/// Temperature summary over a date-filtered subset, serialized as `[min, avg, max]`.
///
/// `avg` is rounded to two decimals by the store. All three fields are `None`
/// when no measurement matched the filter.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TemperatureSummary {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

impl TemperatureSummary {
    /// True when the filter matched no measurement.
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.avg.is_none() && self.max.is_none()
    }
}

impl Serialize for TemperatureSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(&self.min)?;
        tuple.serialize_element(&self.avg)?;
        tuple.serialize_element(&self.max)?;
        tuple.end()
    }
}
