//! `query` subcommand: run one store query and print JSON.

use anyhow::Context;
use clap::Subcommand;
use clim_db::Database;
use std::path::Path;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum QueryCommand {
    /// Every date/precipitation record
    Precipitation,
    /// Station names
    Stations,
    /// Trailing-year temperatures of the most active station
    Tobs,
    /// Measurement counts per station, most active first
    Activity,
    /// Earliest and latest measurement dates
    DateRange,
    /// Temperature [min, avg, max] from START, optionally through END
    Summary {
        /// First date (inclusive), YYYY-MM-DD
        start: String,
        /// Last date (inclusive), YYYY-MM-DD
        end: Option<String>,
    },
}

/// Open the data file read-only, run `query`, and print the result.
pub fn run_query(database: &Path, query: &QueryCommand) -> anyhow::Result<()> {
    let db = Database::open_read_only(database)
        .with_context(|| format!("Failed to open data file {}", database.display()))?;
    println!("{}", render_query(&db, query)?);
    Ok(())
}

/// Run `query` and render its result as pretty-printed JSON.
pub fn render_query(db: &Database, query: &QueryCommand) -> anyhow::Result<String> {
    let json = match query {
        QueryCommand::Precipitation => serde_json::to_string_pretty(&db.query_precipitation()?)?,
        QueryCommand::Stations => serde_json::to_string_pretty(&db.query_station_names()?)?,
        QueryCommand::Tobs => serde_json::to_string_pretty(&db.query_most_active_temperatures()?)?,
        QueryCommand::Activity => serde_json::to_string_pretty(&db.query_station_activity()?)?,
        QueryCommand::DateRange => serde_json::to_string_pretty(&db.query_date_range()?)?,
        QueryCommand::Summary { start, end: None } => {
            serde_json::to_string_pretty(&db.query_summary_from(start)?)?
        }
        QueryCommand::Summary {
            start,
            end: Some(end),
        } => serde_json::to_string_pretty(&db.query_summary_between(start, end)?)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn sample_db() -> Database {
        let db = Database::new().unwrap();
        db.load_stations(
            "station,name,latitude,longitude,elevation
USC00519397,\"WAIKIKI 717.2, HI US\",21.2716,-157.8168,3.0
USC00513117,\"KANEOHE 838.1, HI US\",21.4234,-157.8015,14.6
",
        )
        .unwrap();
        db.load_measurements(
            "station,date,prcp,tobs
USC00519397,2017-01-01,0.08,65
USC00519397,2017-01-02,,63
USC00513117,2017-01-01,0.28,67
",
        )
        .unwrap();
        db
    }

    fn render(query: QueryCommand) -> Value {
        serde_json::from_str(&render_query(&sample_db(), &query).unwrap()).unwrap()
    }

    #[test]
    fn renders_station_activity() {
        assert_eq!(
            render(QueryCommand::Activity),
            json!([
                {"station": "USC00519397", "name": "WAIKIKI 717.2, HI US", "count": 2},
                {"station": "USC00513117", "name": "KANEOHE 838.1, HI US", "count": 1},
            ])
        );
    }

    #[test]
    fn renders_date_range_as_pair() {
        assert_eq!(render(QueryCommand::DateRange), json!(["2017-01-01", "2017-01-02"]));
    }

    #[test]
    fn summary_without_end_is_open_ended() {
        let open = render(QueryCommand::Summary {
            start: "2017-01-02".to_string(),
            end: None,
        });
        assert_eq!(open, json!([63.0, 63.0, 63.0]));

        let closed = render(QueryCommand::Summary {
            start: "2017-01-01".to_string(),
            end: Some("2017-01-01".to_string()),
        });
        assert_eq!(closed, json!([65.0, 66.0, 67.0]));
    }

    #[test]
    fn renders_tobs_pairs() {
        assert_eq!(
            render(QueryCommand::Tobs),
            json!([["2017-01-01", 65.0], ["2017-01-02", 63.0]])
        );
    }
}
